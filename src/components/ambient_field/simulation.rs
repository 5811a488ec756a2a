//! Per-tick particle motion.
//!
//! Each tick advances a fixed-step clock and recomputes every particle's drawn
//! position from its anchor: sinusoidal drift, plus a distance-attenuated pull
//! toward the smoothed pointer. Anchors only move by wrap-around, so pointer
//! displacement never accumulates and particles relax back once the pointer
//! leaves.
//!
//! The clock step is per tick, not per second, so on-screen speed follows the
//! display refresh rate.

use super::config::FieldConfig;
use super::particles::Particle;
use super::types::{Point, Tier};
use super::viewport::Viewport;

/// Twinkle factor is `sin(..) * AMPLITUDE + MIDPOINT`, spanning [0.4, 1.0].
const TWINKLE_AMPLITUDE: f64 = 0.3;
const TWINKLE_MIDPOINT: f64 = 0.7;

/// Simulation clock plus the per-particle update rule.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Simulation {
	clock: f64,
}

impl Simulation {
	/// Clock at zero.
	pub fn new() -> Self {
		Self::default()
	}

	/// Simulation time accumulated so far.
	pub fn clock(&self) -> f64 {
		self.clock
	}

	/// Advance the clock one increment and update every particle in place.
	pub fn step(
		&mut self,
		particles: &mut [Particle],
		pointer: Point,
		tier: Tier,
		viewport: &Viewport,
		config: &FieldConfig,
	) {
		self.clock += config.sim_clock_increment;
		for p in particles.iter_mut() {
			update_particle(p, self.clock, pointer, tier, viewport, config);
		}
	}
}

fn update_particle(
	p: &mut Particle,
	t: f64,
	pointer: Point,
	tier: Tier,
	viewport: &Viewport,
	config: &FieldConfig,
) {
	let drift = drift_offset(p, t);
	let offset = pointer_offset(p, pointer, tier, config);
	p.position = p.base + drift + offset;

	wrap_anchor(p, viewport, config.wrap_margin);

	p.opacity = p.base_opacity * twinkle_factor(p, t);
}

pub(crate) fn drift_offset(p: &Particle, t: f64) -> Point {
	let d = &p.drift;
	Point::new(
		(t * d.speed_x * 2.0 + d.phase).sin() * d.amplitude_x,
		(t * d.speed_y * 2.0 + d.phase * 1.3).cos() * d.amplitude_y,
	)
}

/// Influence coefficient for a particle; zero on touch hardware or out of range.
pub(crate) fn pointer_influence(p: &Particle, pointer: Point, tier: Tier, config: &FieldConfig) -> f64 {
	if tier != Tier::Pointer {
		return 0.0;
	}
	let dist = (pointer - p.base).length();
	if dist < config.pointer_max_distance {
		(1.0 - dist / config.pointer_max_distance) * p.pointer_influence
	} else {
		0.0
	}
}

pub(crate) fn pointer_offset(p: &Particle, pointer: Point, tier: Tier, config: &FieldConfig) -> Point {
	let influence = pointer_influence(p, pointer, tier, config);
	if influence == 0.0 {
		return Point::default();
	}
	(pointer - p.base) * (influence * config.pointer_gain)
}

/// Snap the anchor to the opposite edge once the particle leaves the margin band.
///
/// The anchor itself is also checked, so a viewport that shrank under a
/// particle still pulls its anchor back into `[-margin, size + margin]`.
pub(crate) fn wrap_anchor(p: &mut Particle, viewport: &Viewport, margin: f64) {
	p.base.x = wrap_axis(p.position.x, p.base.x, viewport.width, margin);
	p.base.y = wrap_axis(p.position.y, p.base.y, viewport.height, margin);
}

fn wrap_axis(position: f64, base: f64, extent: f64, margin: f64) -> f64 {
	let (low, high) = (-margin, extent + margin);
	if position < low || base < low {
		high
	} else if position > high || base > high {
		low
	} else {
		base
	}
}

pub(crate) fn twinkle_factor(p: &Particle, t: f64) -> f64 {
	(t * p.twinkle.speed * 10.0 + p.twinkle.phase).sin() * TWINKLE_AMPLITUDE + TWINKLE_MIDPOINT
}
