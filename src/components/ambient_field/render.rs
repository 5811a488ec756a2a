//! Particle drawing.
//!
//! The renderer talks to a [`Surface`] so the engine can run against a real
//! canvas or a recording fake. Each frame clears the surface once, then paints
//! particles in store order with no z-sorting; overlaps blend.

use std::f64::consts::TAU;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::FieldConfig;
use super::particles::{Particle, Shape};
use super::theme::Color;
use super::types::Point;

/// Minimal 2D drawing target.
pub trait Surface {
	/// Resize the backing store to whole pixels.
	fn set_size(&mut self, width: u32, height: u32);
	/// Clear to fully transparent.
	fn clear(&mut self);
	/// Global alpha for the shapes that follow.
	fn set_alpha(&mut self, alpha: f64);
	/// Filled circle.
	fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
	/// Round-capped segment of `length` centered on `center`, rotated by `angle`.
	fn stroke_dash(&mut self, center: Point, length: f64, angle: f64, width: f64, color: Color);
}

/// Paints the full particle set for one frame.
pub fn draw(surface: &mut dyn Surface, particles: &[Particle], clock: f64, config: &FieldConfig) {
	surface.clear();
	for p in particles {
		surface.set_alpha(p.opacity);
		match p.shape {
			Shape::Dot => surface.fill_circle(p.position, p.size, p.color),
			Shape::Dash => surface.stroke_dash(
				p.position,
				p.dash_length,
				p.orientation + clock * config.dash_rotation_speed,
				p.size * config.dash_width_factor,
				p.color,
			),
		}
	}
	surface.set_alpha(1.0);
}

/// [`Surface`] backed by an HTML canvas and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Wrap a canvas and its 2D context.
	pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
		Self { canvas, ctx }
	}
}

impl Surface for CanvasSurface {
	fn set_size(&mut self, width: u32, height: u32) {
		self.canvas.set_width(width);
		self.canvas.set_height(height);
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(
			0.0,
			0.0,
			self.canvas.width() as f64,
			self.canvas.height() as f64,
		);
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css_rgb());
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
		self.ctx.fill();
	}

	fn stroke_dash(&mut self, center: Point, length: f64, angle: f64, width: f64, color: Color) {
		let ctx = &self.ctx;
		ctx.save();
		let _ = ctx.translate(center.x, center.y);
		let _ = ctx.rotate(angle);
		ctx.set_stroke_style_str(&color.to_css_rgb());
		ctx.set_line_width(width);
		ctx.set_line_cap("round");
		ctx.begin_path();
		ctx.move_to(-length / 2.0, 0.0);
		ctx.line_to(length / 2.0, 0.0);
		ctx.stroke();
		ctx.restore();
	}
}
