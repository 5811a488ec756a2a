//! Drawing-surface dimensions.

use super::render::Surface;
use super::types::Point;

/// Current viewport size in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	/// Width in px.
	pub width: f64,
	/// Height in px.
	pub height: f64,
}

impl Viewport {
	/// Adopt the window size and size the surface to match.
	///
	/// Idempotent and cheap; particle state is left untouched. Without a
	/// surface only the recorded dimensions change.
	pub fn resize<S: Surface + ?Sized>(&mut self, window_size: (f64, f64), surface: Option<&mut S>) {
		let (width, height) = (whole_px(window_size.0), whole_px(window_size.1));
		self.width = width as f64;
		self.height = height as f64;
		if let Some(surface) = surface {
			surface.set_size(width, height);
		}
	}

	/// Midpoint of the viewport.
	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

/// Truncate to whole pixels; negative or non-finite sizes collapse to zero.
fn whole_px(value: f64) -> u32 {
	if value.is_finite() && value > 0.0 {
		value as u32
	} else {
		0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::ambient_field::theme::Color;

	#[derive(Default)]
	struct SizeOnly(u32, u32);

	impl Surface for SizeOnly {
		fn set_size(&mut self, width: u32, height: u32) {
			self.0 = width;
			self.1 = height;
		}
		fn clear(&mut self) {}
		fn set_alpha(&mut self, _: f64) {}
		fn fill_circle(&mut self, _: Point, _: f64, _: Color) {}
		fn stroke_dash(&mut self, _: Point, _: f64, _: f64, _: f64, _: Color) {}
	}

	#[test]
	fn resize_sets_surface_to_window_size() {
		let mut viewport = Viewport::default();
		let mut surface = SizeOnly::default();
		viewport.resize((1920.0, 1080.0), Some(&mut surface));
		assert_eq!((surface.0, surface.1), (1920, 1080));
		assert_eq!((viewport.width, viewport.height), (1920.0, 1080.0));
	}

	#[test]
	fn fractional_and_degenerate_sizes() {
		let mut viewport = Viewport::default();
		viewport.resize::<SizeOnly>((800.7, -3.0), None);
		assert_eq!(viewport.width, 800.0);
		assert_eq!(viewport.height, 0.0);

		viewport.resize::<SizeOnly>((f64::NAN, 600.0), None);
		assert_eq!(viewport.width, 0.0);
		assert_eq!(viewport.height, 600.0);
	}
}
