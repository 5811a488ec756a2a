//! Particle records for the ambient backdrop.
//!
//! A store is seeded once per mount. Everything except the anchor and the
//! per-tick render outputs (`position`, `opacity`) is fixed at creation.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::{FieldConfig, Span};
use super::theme::Color;
use super::types::Point;

/// Primitive a particle is drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
	/// Filled circle of radius `size`.
	Dot,
	/// Short rotating segment.
	Dash,
}

/// Sinusoidal wander around the anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
	/// Angular speed of the horizontal wave.
	pub speed_x: f64,
	/// Angular speed of the vertical wave.
	pub speed_y: f64,
	/// Shared phase offset.
	pub phase: f64,
	/// Horizontal reach in px.
	pub amplitude_x: f64,
	/// Vertical reach in px.
	pub amplitude_y: f64,
}

/// Periodic opacity modulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Twinkle {
	/// Angular speed.
	pub speed: f64,
	/// Phase offset.
	pub phase: f64,
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Anchor the particle drifts around. Only wrap-around moves it.
	pub base: Point,
	/// Where the particle is drawn this tick.
	pub position: Point,
	/// Dot radius, or the dash width before scaling.
	pub size: f64,
	/// Dot or dash.
	pub shape: Shape,
	/// Zero for dots.
	pub dash_length: f64,
	/// Base rotation for dashes.
	pub orientation: f64,
	/// Palette entry picked at creation.
	pub color: Color,
	/// Opacity the twinkle modulates.
	pub base_opacity: f64,
	/// Opacity after twinkle, written every tick.
	pub opacity: f64,
	/// Wander around the anchor.
	pub drift: Drift,
	/// Strength of the pull toward the pointer.
	pub pointer_influence: f64,
	/// Opacity modulation.
	pub twinkle: Twinkle,
}

impl Particle {
	fn seeded<R: Rng + ?Sized>(width: f64, height: f64, config: &FieldConfig, rng: &mut R) -> Self {
		let unit = Span::new(0.0, 1.0);
		let angle = Span::new(0.0, TAU);

		let base = Point::new(unit.sample(rng) * width, unit.sample(rng) * height);
		let color = config
			.palette
			.get((unit.sample(rng) * config.palette.len() as f64) as usize);
		let size = config.size_range.sample(rng);
		let shape = if unit.sample(rng) < config.dash_ratio {
			Shape::Dash
		} else {
			Shape::Dot
		};
		let dash_length = match shape {
			Shape::Dash => config.dash_length.sample(rng),
			Shape::Dot => 0.0,
		};
		let orientation = angle.sample(rng);
		let base_opacity = config.opacity_range.sample(rng);

		let drift = Drift {
			speed_x: config.drift_speed.sample(rng),
			speed_y: config.drift_speed.sample(rng),
			phase: angle.sample(rng),
			amplitude_x: config.drift_amplitude_x.sample(rng),
			amplitude_y: config.drift_amplitude_y.sample(rng),
		};
		let pointer_influence = config.pointer_influence.sample(rng);
		let twinkle = Twinkle {
			speed: config.twinkle_speed.sample(rng),
			phase: angle.sample(rng),
		};

		Self {
			base,
			position: base,
			size,
			shape,
			dash_length,
			orientation,
			color,
			base_opacity,
			opacity: base_opacity,
			drift,
			pointer_influence,
			twinkle,
		}
	}
}

/// Fixed-size particle collection, owned by one engine mount.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
	particles: Vec<Particle>,
}

impl ParticleStore {
	/// Seed `count` particles with anchors spread over the viewport.
	///
	/// Identical rng state reproduces an identical store.
	pub fn create<R: Rng + ?Sized>(
		count: usize,
		width: f64,
		height: f64,
		config: &FieldConfig,
		rng: &mut R,
	) -> Self {
		let particles = (0..count)
			.map(|_| Particle::seeded(width, height, config, rng))
			.collect();
		Self { particles }
	}

	/// Number of particles.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// True for a zero-particle store.
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	/// Particles in creation (and draw) order.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable view for the simulation step.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn store(seed: u64, count: usize) -> ParticleStore {
		let mut rng = StdRng::seed_from_u64(seed);
		ParticleStore::create(count, 1920.0, 1080.0, &FieldConfig::default(), &mut rng)
	}

	#[test]
	fn same_seed_same_store() {
		assert_eq!(store(42, 80).particles(), store(42, 80).particles());
		assert_ne!(store(42, 80).particles(), store(43, 80).particles());
	}

	#[test]
	fn count_is_exact() {
		assert_eq!(store(1, 80).len(), 80);
		assert_eq!(store(1, 40).len(), 40);
		assert!(store(1, 0).is_empty());
	}

	#[test]
	fn fields_fall_in_configured_ranges() {
		let config = FieldConfig::default();
		for p in store(9, 500).particles() {
			assert!((0.0..1920.0).contains(&p.base.x));
			assert!((0.0..1080.0).contains(&p.base.y));
			assert_eq!(p.position, p.base);
			assert!(config.size_range.contains(p.size));
			assert!(config.opacity_range.contains(p.base_opacity));
			assert_eq!(p.opacity, p.base_opacity);
			assert!(config.palette.colors.contains(&p.color));
			assert!(config.pointer_influence.contains(p.pointer_influence));
			assert!(config.twinkle_speed.contains(p.twinkle.speed));
			assert!(config.drift_speed.contains(p.drift.speed_x));
			assert!(config.drift_amplitude_y.contains(p.drift.amplitude_y));
			match p.shape {
				Shape::Dash => assert!(config.dash_length.contains(p.dash_length)),
				Shape::Dot => assert_eq!(p.dash_length, 0.0),
			}
		}
	}

	#[test]
	fn roughly_a_third_are_dashes() {
		let dashes = store(3, 2000)
			.particles()
			.iter()
			.filter(|p| p.shape == Shape::Dash)
			.count();
		assert!((600..800).contains(&dashes), "{dashes} dashes");
	}

	#[test]
	fn zero_viewport_puts_anchors_at_origin() {
		let mut rng = StdRng::seed_from_u64(5);
		let store = ParticleStore::create(10, 0.0, 0.0, &FieldConfig::default(), &mut rng);
		assert!(store.particles().iter().all(|p| p.base == Point::new(0.0, 0.0)));
	}
}
