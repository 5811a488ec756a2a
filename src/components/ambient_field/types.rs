//! Small value types shared by the field engine.

/// A coordinate in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal offset from the left edge.
	pub x: f64,
	/// Vertical offset from the top edge.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance from the origin.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}
}

impl std::ops::Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}

/// Input capability class of the running environment.
///
/// Decides the particle budget and whether the pointer pulls on particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
	/// Fine pointer (mouse, trackpad). Pointer influence is live.
	Pointer,
	/// Touch-first hardware. Fewer particles, no pointer influence.
	Touch,
}

impl Tier {
	/// Lowercase label used in log lines.
	pub fn name(self) -> &'static str {
		match self {
			Tier::Pointer => "pointer",
			Tier::Touch => "touch",
		}
	}
}
