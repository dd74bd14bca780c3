//! Browser canvas implementation of the drawing surface

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{Rgba, Surface, TextAlign};

/// Retro pixel font stack, falling back to any monospace
const FONT_FAMILY: &str = "'Press Start 2P', monospace";

/// A 2D canvas context plus its current pixel size
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self { ctx, size: Vec2::new(width, height) }
    }

    /// Track a viewport resize
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    fn css_color(color: Rgba) -> String {
        let r = (color.rgb >> 16) & 0xff;
        let g = (color.rgb >> 8) & 0xff;
        let b = color.rgb & 0xff;
        format!("rgba({r}, {g}, {b}, {})", color.alpha.clamp(0.0, 1.0))
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.ctx.set_fill_style_str("#000");
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba, line_width: f32) {
        if points.len() < 2 {
            return;
        }
        self.ctx.set_stroke_style_str(&Self::css_color(color));
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(points[0].x as f64, points[0].y as f64);
        for point in &points[1..] {
            self.ctx.line_to(point.x as f64, point.y as f64);
        }
        self.ctx.close_path();
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.set_fill_style_str(&Self::css_color(color));
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size_px: f32, color: Rgba, align: TextAlign) {
        self.ctx.set_fill_style_str(&Self::css_color(color));
        self.ctx.set_font(&format!("{size_px}px {FONT_FAMILY}"));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
