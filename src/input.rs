//! Input surface: logical controls and key sampling
//!
//! Maps key names to the fixed control set and tracks held keys between
//! animation frames. Held controls (turn, thrust) are level-sampled every
//! tick; fire and start are queued on key-down and consumed exactly once.

use crate::sim::TickInput;

/// The fixed set of logical controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TurnLeft,
    TurnRight,
    Thrust,
    Fire,
    Start,
}

/// Map a key name (as reported by keyboard events) to a logical control
pub fn control_for_key(key: &str) -> Option<Control> {
    match key {
        "ArrowLeft" | "a" | "A" => Some(Control::TurnLeft),
        "ArrowRight" | "d" | "D" => Some(Control::TurnRight),
        "ArrowUp" | "w" | "W" => Some(Control::Thrust),
        " " | "f" | "F" => Some(Control::Fire),
        "Enter" => Some(Control::Start),
        _ => None,
    }
}

/// Current key-down state plus queued one-shot events
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    turn_left: bool,
    turn_right: bool,
    thrust: bool,
    fire_queued: bool,
    start_queued: bool,
}

impl InputState {
    /// Engage a control. Fire/start trigger on the press itself, so key
    /// auto-repeat never machine-guns past the projectile cap faster than
    /// the host forwards events. Touch buttons drive this directly.
    pub fn press(&mut self, control: Control) {
        match control {
            Control::TurnLeft => self.turn_left = true,
            Control::TurnRight => self.turn_right = true,
            Control::Thrust => self.thrust = true,
            Control::Fire => self.fire_queued = true,
            Control::Start => self.start_queued = true,
        }
    }

    /// Disengage a held control; the one-shots have no release
    pub fn release(&mut self, control: Control) {
        match control {
            Control::TurnLeft => self.turn_left = false,
            Control::TurnRight => self.turn_right = false,
            Control::Thrust => self.thrust = false,
            Control::Fire | Control::Start => {}
        }
    }

    /// Handle a key-down event
    pub fn key_down(&mut self, key: &str) {
        if let Some(control) = control_for_key(key) {
            self.press(control);
        }
    }

    /// Handle a key-up event
    pub fn key_up(&mut self, key: &str) {
        if let Some(control) = control_for_key(key) {
            self.release(control);
        }
    }

    /// Release everything (window blur, teardown)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Produce the input for one tick, consuming the queued one-shot events
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            thrust: self.thrust,
            fire: self.fire_queued,
            start: self.start_queued,
        };
        self.fire_queued = false;
        self.start_queued = false;
        input
    }
}
