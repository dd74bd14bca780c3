//! Drawing-surface abstraction and per-frame emitter
//!
//! The simulation never draws; [`draw_frame`] walks a read-only snapshot of
//! the world and issues calls against the [`Surface`] trait (clear, stroke
//! polygon, fill circle, text). The browser-canvas implementation lives in
//! [`canvas`]; tests drive a recording surface instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// A color with an alpha channel, packed 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: u32,
    pub alpha: f32,
}

impl Rgba {
    pub const fn opaque(rgb: u32) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub const fn with_alpha(rgb: u32, alpha: f32) -> Self {
        Self { rgb, alpha }
    }
}

/// Arcade palette (matching the retro theme)
pub const COLOR_SHIP: Rgba = Rgba::opaque(0xffffff);
pub const COLOR_SHIP_BLINK: Rgba = Rgba::opaque(0x666666);
pub const COLOR_ACCENT: Rgba = Rgba::opaque(0xff0000);

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// The drawing surface the simulation is rendered onto
pub trait Surface {
    /// Current viewport size in pixels
    fn size(&self) -> Vec2;
    /// Fill the whole surface with the background
    fn clear(&mut self);
    /// Stroke a closed polygon
    fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba, line_width: f32);
    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Draw a line of text anchored at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Rgba, align: TextAlign);
}

/// Draw one frame: entities and HUD while running, a static status screen
/// otherwise. Pure with respect to the world state.
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface, settings: &Settings, fps: Option<u32>) {
    surface.clear();

    match state.phase {
        GamePhase::NotStarted => draw_title_screen(surface),
        GamePhase::GameOver => draw_game_over_screen(surface, state.score),
        GamePhase::Running => {
            draw_ship(state, surface, settings);
            for asteroid in &state.asteroids {
                let rot = Vec2::from_angle(asteroid.rotation);
                let points: Vec<Vec2> = asteroid
                    .outline
                    .iter()
                    .map(|&v| asteroid.pos + rot.rotate(v))
                    .collect();
                surface.stroke_polygon(&points, COLOR_ACCENT, 2.0);
            }
            for projectile in &state.projectiles {
                surface.fill_circle(projectile.pos, PROJECTILE_RADIUS, COLOR_ACCENT);
            }
            if settings.particles {
                for particle in &state.particles {
                    let color = Rgba::with_alpha(COLOR_ACCENT.rgb, particle.alpha());
                    surface.fill_circle(particle.pos, particle.size, color);
                }
            }
            draw_hud(state, surface, settings, fps);
        }
    }
}

/// Ship hull plus thrust flame, nose pointing along the heading
fn draw_ship(state: &GameState, surface: &mut dyn Surface, settings: &Settings) {
    let ship = &state.ship;
    let r = ship.radius;
    let rot = Vec2::from_angle(ship.angle);
    let place = |v: Vec2| ship.pos + rot.rotate(v);

    // Blink while the invulnerability window is open
    let blinking = ship.is_invulnerable()
        && !settings.reduced_motion
        && (state.time_ticks / 6) % 2 == 0;
    let color = if blinking { COLOR_SHIP_BLINK } else { COLOR_SHIP };

    let hull = [
        place(Vec2::new(r, 0.0)),
        place(Vec2::new(-r, r)),
        place(Vec2::new(-r / 2.0, 0.0)),
        place(Vec2::new(-r, -r)),
    ];
    surface.stroke_polygon(&hull, color, 2.0);

    if ship.thrusting {
        // Length flickers with the tick counter
        let flicker = if settings.reduced_motion {
            5.0
        } else {
            (state.time_ticks * 7 % 10) as f32
        };
        let flame = [
            place(Vec2::new(-r / 2.0, -r / 2.0)),
            place(Vec2::new(-(r + flicker), 0.0)),
            place(Vec2::new(-r / 2.0, r / 2.0)),
        ];
        surface.stroke_polygon(&flame, COLOR_ACCENT, 1.5);
    }
}

fn draw_hud(state: &GameState, surface: &mut dyn Surface, settings: &Settings, fps: Option<u32>) {
    let size = surface.size();
    surface.draw_text(
        &format!("SCORE: {}", state.score),
        Vec2::new(20.0, 30.0),
        20.0,
        COLOR_ACCENT,
        TextAlign::Left,
    );
    surface.draw_text(
        &format!("LIVES: {}", state.lives),
        Vec2::new(size.x - 20.0, 30.0),
        20.0,
        COLOR_ACCENT,
        TextAlign::Right,
    );
    if settings.show_fps {
        if let Some(fps) = fps {
            surface.draw_text(
                &format!("{fps} FPS"),
                Vec2::new(20.0, size.y - 16.0),
                10.0,
                COLOR_SHIP_BLINK,
                TextAlign::Left,
            );
        }
    }
}

fn draw_title_screen(surface: &mut dyn Surface) {
    let center = surface.size() / 2.0;
    surface.draw_text(
        "ASTEROID FIELD",
        center - Vec2::new(0.0, 60.0),
        24.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
    surface.draw_text("PRESS ENTER TO START", center, 16.0, COLOR_ACCENT, TextAlign::Center);
    surface.draw_text(
        "ARROWS/WASD TO MOVE",
        center + Vec2::new(0.0, 40.0),
        16.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
    surface.draw_text(
        "SPACE/F TO SHOOT",
        center + Vec2::new(0.0, 70.0),
        16.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
}

fn draw_game_over_screen(surface: &mut dyn Surface, score: u64) {
    let center = surface.size() / 2.0;
    surface.draw_text(
        "GAME OVER",
        center - Vec2::new(0.0, 40.0),
        24.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
    surface.draw_text(
        &format!("SCORE: {score}"),
        center,
        24.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
    surface.draw_text(
        "PRESS ENTER TO RESTART",
        center + Vec2::new(0.0, 60.0),
        16.0,
        COLOR_ACCENT,
        TextAlign::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draw calls for assertions
    #[derive(Default)]
    struct RecordingSurface {
        cleared: u32,
        polygons: Vec<Vec<Vec2>>,
        circles: Vec<(Vec2, f32)>,
        texts: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }
        fn clear(&mut self) {
            self.cleared += 1;
        }
        fn stroke_polygon(&mut self, points: &[Vec2], _color: Rgba, _line_width: f32) {
            self.polygons.push(points.to_vec());
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Rgba) {
            self.circles.push((center, radius));
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _size: f32, _color: Rgba, _align: TextAlign) {
            self.texts.push(text.to_string());
        }
    }

    fn draw(state: &GameState) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        draw_frame(state, &mut surface, &Settings::default(), Some(60));
        surface
    }

    #[test]
    fn title_screen_shows_instructions() {
        let state = GameState::new(1, Vec2::new(800.0, 600.0));
        let surface = draw(&state);
        assert_eq!(surface.cleared, 1);
        assert!(surface.polygons.is_empty());
        assert!(surface.texts.iter().any(|t| t == "PRESS ENTER TO START"));
    }

    #[test]
    fn running_frame_draws_every_entity_and_the_hud() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.start();
        state.fire_projectile();
        let surface = draw(&state);

        // Ship hull plus one polygon per asteroid
        assert_eq!(surface.polygons.len(), 1 + state.asteroids.len());
        assert_eq!(surface.circles.len(), 1);
        assert!(surface.texts.iter().any(|t| t == "SCORE: 0"));
        assert!(surface.texts.iter().any(|t| t == "LIVES: 3"));
    }

    #[test]
    fn game_over_screen_shows_final_score() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.start();
        state.score = 700;
        state.phase = GamePhase::GameOver;
        let surface = draw(&state);
        assert!(surface.polygons.is_empty());
        assert!(surface.texts.iter().any(|t| t == "SCORE: 700"));
        assert!(surface.texts.iter().any(|t| t == "PRESS ENTER TO RESTART"));
    }

    #[test]
    fn asteroid_outline_is_drawn_around_its_position() {
        let mut state = GameState::new(1, Vec2::new(800.0, 600.0));
        state.start();
        state.asteroids.truncate(1);
        state.projectiles.clear();
        let asteroid = state.asteroids[0].clone();
        let surface = draw(&state);

        let outline = &surface.polygons[1]; // index 0 is the ship hull
        assert_eq!(outline.len(), asteroid.outline.len());
        for vertex in outline {
            assert!(vertex.distance(asteroid.pos) <= asteroid.size * 1.2 + 1e-3);
        }
    }
}
