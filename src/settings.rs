//! Presentation preferences
//!
//! Purely cosmetic toggles read by the renderer. Persisted to LocalStorage
//! on the web build; game state itself is never persisted.

use serde::{Deserialize, Serialize};

/// Renderer preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settings {
    /// Draw explosion particles
    pub particles: bool,
    /// Show the FPS counter
    pub show_fps: bool,
    /// Minimize flicker (steady ship color and thrust flame)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particles: true,
            show_fps: false,
            reduced_motion: false,
        }
    }
}

/// A preference that can be flipped at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Particles,
    ShowFps,
    ReducedMotion,
}

/// Keyboard shortcuts for the preference toggles. Must stay disjoint from
/// the game control keys in [`crate::input::control_for_key`].
pub fn toggle_for_key(key: &str) -> Option<Toggle> {
    match key {
        "p" | "P" => Some(Toggle::Particles),
        "o" | "O" => Some(Toggle::ShowFps),
        "m" | "M" => Some(Toggle::ReducedMotion),
        _ => None,
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "asteroid_field_settings";

    /// Flip one preference; the host persists afterwards
    pub fn toggle(&mut self, toggle: Toggle) {
        match toggle {
            Toggle::Particles => self.particles = !self.particles,
            Toggle::ShowFps => self.show_fps = !self.show_fps,
            Toggle::ReducedMotion => self.reduced_motion = !self.reduced_motion,
        }
        log::info!("setting toggled: {toggle:?}");
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
