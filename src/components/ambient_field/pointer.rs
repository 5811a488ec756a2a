//! Smoothed pointer position.
//!
//! Move events overwrite `target` (last write wins). Once per tick `advance`
//! eases `current` toward it with exponential smoothing, which is the value
//! the simulation reads.

use super::types::Point;

/// Last reported pointer position and its smoothed follower.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerTracker {
	target: Point,
	current: Point,
	smoothing: f64,
}

impl PointerTracker {
	/// Both target and smoothed position start at `origin`.
	pub fn new(origin: Point, smoothing: f64) -> Self {
		Self {
			target: origin,
			current: origin,
			smoothing,
		}
	}

	/// Record a move event; the latest one wins.
	pub fn on_move(&mut self, x: f64, y: f64) {
		self.target = Point::new(x, y);
	}

	/// `current += (target - current) * smoothing` on each axis.
	pub fn advance(&mut self) {
		self.current = self.current + (self.target - self.current) * self.smoothing;
	}

	/// Smoothed position.
	pub fn current(&self) -> Point {
		self.current
	}

	/// Last reported position.
	pub fn target(&self) -> Point {
		self.target
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn advance_moves_four_percent_of_the_gap() {
		let mut tracker = PointerTracker::new(Point::new(0.0, 0.0), 0.04);
		tracker.on_move(100.0, -50.0);
		tracker.advance();
		assert_relative_eq!(tracker.current().x, 4.0);
		assert_relative_eq!(tracker.current().y, -2.0);
		tracker.advance();
		assert_relative_eq!(tracker.current().x, 4.0 + 96.0 * 0.04);
	}

	#[test]
	fn last_move_wins() {
		let mut tracker = PointerTracker::new(Point::new(10.0, 10.0), 0.04);
		tracker.on_move(1.0, 2.0);
		tracker.on_move(300.0, 400.0);
		assert_eq!(tracker.target(), Point::new(300.0, 400.0));
		assert_eq!(tracker.current(), Point::new(10.0, 10.0));
	}

	#[test]
	fn converges_on_target() {
		let mut tracker = PointerTracker::new(Point::new(960.0, 540.0), 0.04);
		tracker.on_move(0.0, 0.0);
		for _ in 0..1000 {
			tracker.advance();
		}
		assert!(tracker.current().length() < 1e-6);
	}

	#[test]
	fn without_moves_current_stays_at_origin() {
		let origin = Point::new(640.0, 360.0);
		let mut tracker = PointerTracker::new(origin, 0.04);
		for _ in 0..10 {
			tracker.advance();
		}
		assert_eq!(tracker.current(), origin);
	}
}
