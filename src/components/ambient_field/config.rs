//! Tuning knobs for the particle field.
//!
//! Every constant the engine uses lives here so tests (and pages, through the
//! `ambient-config` script element) can override them. Field names deserialize
//! in camelCase and anything omitted keeps its default.

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use super::theme::Palette;
use super::types::Tier;

/// Half-open numeric range `[min, max)`, written as `[min, max]` in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Span {
	/// Inclusive lower bound.
	pub min: f64,
	/// Exclusive upper bound.
	pub max: f64,
}

impl Span {
	/// Range from `min` up to (not including) `max`.
	pub const fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}

	/// Uniform sample in `[min, max)`. A degenerate span always yields `min`.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
		self.min + rng.gen_range(0.0..1.0) * (self.max - self.min)
	}

	/// Whether `value` falls in `[min, max)`.
	pub fn contains(&self, value: f64) -> bool {
		value >= self.min && value < self.max
	}
}

impl From<(f64, f64)> for Span {
	fn from((min, max): (f64, f64)) -> Self {
		Self { min, max }
	}
}

/// Particle budget per capability tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParticleCounts {
	/// Budget on fine-pointer devices.
	pub pointer: usize,
	/// Budget on touch-first devices.
	pub touch: usize,
}

impl Default for ParticleCounts {
	fn default() -> Self {
		Self {
			pointer: 80,
			touch: 40,
		}
	}
}

/// Rejected configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The document is not valid JSON or has mistyped fields.
	#[error("invalid config JSON: {0}")]
	Parse(#[from] serde_json::Error),
	/// `palette` is an empty list.
	#[error("palette must contain at least one color")]
	EmptyPalette,
	/// A range has `min > max`.
	#[error("range `{name}` is inverted: [{min}, {max})")]
	InvertedRange {
		/// Config key of the range.
		name: &'static str,
		/// Rejected lower bound.
		min: f64,
		/// Rejected upper bound.
		max: f64,
	},
	/// A value that must be strictly positive is not.
	#[error("`{name}` must be positive and finite, got {value}")]
	NotPositive {
		/// Config key.
		name: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// A fraction lies outside `[0, 1]`.
	#[error("`{name}` must be within [0, 1], got {value}")]
	NotUnit {
		/// Config key.
		name: &'static str,
		/// Rejected value.
		value: f64,
	},
	/// A size, factor or speed is negative or not finite.
	#[error("`{name}` must be non-negative and finite, got {value}")]
	Negative {
		/// Config key.
		name: &'static str,
		/// Rejected value.
		value: f64,
	},
	#[error("`particleCount.{tier}` of {count} exceeds the limit of {max}")]
	/// A tier's particle budget exceeds [`MAX_PARTICLES`].
	TooManyParticles {
		/// Tier name.
		tier: &'static str,
		/// Requested budget.
		count: usize,
		/// Allowed maximum.
		max: usize,
	},
}

/// Upper bound on particles per tier.
pub const MAX_PARTICLES: usize = 2000;

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
	/// Particles per capability tier.
	pub particle_count: ParticleCounts,
	/// Colors particles pick from.
	pub palette: Palette,
	/// Dot radius / dash thickness scale in px.
	pub size_range: Span,
	/// Base opacity before twinkle.
	pub opacity_range: Span,
	/// Distance outside the viewport an anchor may travel before wrapping.
	pub wrap_margin: f64,
	/// Pointer influence falls to zero at this distance.
	pub pointer_max_distance: f64,
	/// Fraction of the remaining distance the smoothed pointer covers per tick.
	pub smoothing_factor: f64,
	/// Simulation clock advance per tick (not wall-clock scaled).
	pub sim_clock_increment: f64,
	/// Share of particles drawn as dashes instead of dots.
	pub dash_ratio: f64,
	/// Dash segment length in px.
	pub dash_length: Span,
	/// Dash stroke width as a multiple of the particle size.
	pub dash_width_factor: f64,
	/// Dash rotation per unit of simulation clock.
	pub dash_rotation_speed: f64,
	/// Drift angular speed per axis.
	pub drift_speed: Span,
	/// Horizontal drift amplitude in px.
	pub drift_amplitude_x: Span,
	/// Vertical drift amplitude in px.
	pub drift_amplitude_y: Span,
	/// Per-particle pointer pull coefficient.
	pub pointer_influence: Span,
	/// Multiplier applied to the pointer displacement.
	pub pointer_gain: f64,
	/// Twinkle angular speed.
	pub twinkle_speed: Span,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: ParticleCounts::default(),
			palette: Palette::default(),
			size_range: Span::new(0.8, 3.8),
			opacity_range: Span::new(0.15, 0.65),
			wrap_margin: 20.0,
			pointer_max_distance: 300.0,
			smoothing_factor: 0.04,
			sim_clock_increment: 0.008,
			dash_ratio: 0.35,
			dash_length: Span::new(4.0, 12.0),
			dash_width_factor: 0.6,
			dash_rotation_speed: 0.2,
			drift_speed: Span::new(-0.15, 0.15),
			drift_amplitude_x: Span::new(10.0, 40.0),
			drift_amplitude_y: Span::new(8.0, 28.0),
			pointer_influence: Span::new(0.003, 0.015),
			pointer_gain: 8.0,
			twinkle_speed: Span::new(0.005, 0.02),
		}
	}
}

impl FieldConfig {
	/// Particle budget for a capability tier.
	pub fn count_for(&self, tier: Tier) -> usize {
		match tier {
			Tier::Pointer => self.particle_count.pointer,
			Tier::Touch => self.particle_count.touch,
		}
	}

	/// Parse a JSON override document and validate the result.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let config: FieldConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check every range, factor and budget is usable by the engine.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.palette.is_empty() {
			return Err(ConfigError::EmptyPalette);
		}

		let spans = [
			("sizeRange", self.size_range),
			("opacityRange", self.opacity_range),
			("dashLength", self.dash_length),
			("driftSpeed", self.drift_speed),
			("driftAmplitudeX", self.drift_amplitude_x),
			("driftAmplitudeY", self.drift_amplitude_y),
			("pointerInfluence", self.pointer_influence),
			("twinkleSpeed", self.twinkle_speed),
		];
		for (name, span) in spans {
			if !(span.min <= span.max) {
				return Err(ConfigError::InvertedRange {
					name,
					min: span.min,
					max: span.max,
				});
			}
		}

		let positives = [
			("pointerMaxDistance", self.pointer_max_distance),
			("smoothingFactor", self.smoothing_factor),
			("simClockIncrement", self.sim_clock_increment),
		];
		for (name, value) in positives {
			if !(value.is_finite() && value > 0.0) {
				return Err(ConfigError::NotPositive { name, value });
			}
		}

		let non_negatives = [
			("wrapMargin", self.wrap_margin),
			("sizeRange.min", self.size_range.min),
			("dashLength.min", self.dash_length.min),
			("dashWidthFactor", self.dash_width_factor),
			("pointerGain", self.pointer_gain),
			("dashRotationSpeed", self.dash_rotation_speed),
		];
		for (name, value) in non_negatives {
			if !(value.is_finite() && value >= 0.0) {
				return Err(ConfigError::Negative { name, value });
			}
		}

		for tier in [Tier::Pointer, Tier::Touch] {
			let count = self.count_for(tier);
			if count > MAX_PARTICLES {
				return Err(ConfigError::TooManyParticles {
					tier: tier.name(),
					count,
					max: MAX_PARTICLES,
				});
			}
		}

		let units = [
			("smoothingFactor", self.smoothing_factor),
			("dashRatio", self.dash_ratio),
			("opacityRange.min", self.opacity_range.min),
			("opacityRange.max", self.opacity_range.max),
		];
		for (name, value) in units {
			if !(0.0..=1.0).contains(&value) {
				return Err(ConfigError::NotUnit { name, value });
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn defaults_match_documented_table() {
		let config = FieldConfig::default();
		assert_eq!(config.count_for(Tier::Pointer), 80);
		assert_eq!(config.count_for(Tier::Touch), 40);
		assert_eq!(config.palette.len(), 5);
		assert_eq!(config.size_range, Span::new(0.8, 3.8));
		assert_eq!(config.opacity_range, Span::new(0.15, 0.65));
		assert_eq!(config.wrap_margin, 20.0);
		assert_eq!(config.pointer_max_distance, 300.0);
		assert_eq!(config.smoothing_factor, 0.04);
		assert_eq!(config.sim_clock_increment, 0.008);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			FieldConfig::from_json(r#"{"particleCount":{"touch":12},"wrapMargin":5,"sizeRange":[1,2]}"#)
				.unwrap();
		assert_eq!(config.particle_count.pointer, 80);
		assert_eq!(config.particle_count.touch, 12);
		assert_eq!(config.wrap_margin, 5.0);
		assert_eq!(config.size_range, Span::new(1.0, 2.0));
		assert_eq!(config.smoothing_factor, 0.04);
	}

	#[test]
	fn rejects_empty_palette() {
		let config = FieldConfig {
			palette: Palette { colors: Vec::new() },
			..FieldConfig::default()
		};
		assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
	}

	#[test]
	fn rejects_inverted_range() {
		let config = FieldConfig {
			dash_length: Span::new(12.0, 4.0),
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::InvertedRange { name: "dashLength", .. })
		));
	}

	#[test]
	fn rejects_negative_size() {
		let config = FieldConfig::from_json(r#"{"sizeRange":[-5,-1]}"#);
		assert!(matches!(
			config,
			Err(ConfigError::Negative { name: "sizeRange.min", .. })
		));

		let config = FieldConfig {
			dash_width_factor: -2.0,
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Negative { name: "dashWidthFactor", .. })
		));
	}

	#[test]
	fn rejects_non_finite_gain_and_rotation() {
		let config = FieldConfig {
			pointer_gain: f64::INFINITY,
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Negative { name: "pointerGain", .. })
		));

		let config = FieldConfig {
			dash_rotation_speed: f64::NAN,
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Negative { name: "dashRotationSpeed", .. })
		));

		let config = FieldConfig {
			dash_length: Span::new(-1.0, 4.0),
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::Negative { name: "dashLength.min", .. })
		));
	}

	#[test]
	fn rejects_oversized_particle_budget() {
		let config = FieldConfig::from_json(r#"{"particleCount":{"pointer":1000000}}"#);
		assert!(matches!(
			config,
			Err(ConfigError::TooManyParticles { tier: "pointer", count: 1_000_000, .. })
		));
		assert!(FieldConfig::from_json(r#"{"particleCount":{"touch":2000}}"#).is_ok());
	}

	#[test]
	fn rejects_bad_smoothing_and_distance() {
		let config = FieldConfig {
			smoothing_factor: 1.5,
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::NotUnit { name: "smoothingFactor", .. })
		));

		let config = FieldConfig {
			pointer_max_distance: 0.0,
			..FieldConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::NotPositive { name: "pointerMaxDistance", .. })
		));
	}

	#[test]
	fn invalid_json_is_an_error() {
		assert!(matches!(
			FieldConfig::from_json("{not json"),
			Err(ConfigError::Parse(_))
		));
		assert!(matches!(
			FieldConfig::from_json(r#"{"palette":[]}"#),
			Err(ConfigError::EmptyPalette)
		));
	}

	#[test]
	fn span_sample_stays_half_open() {
		let mut rng = StdRng::seed_from_u64(7);
		let span = Span::new(0.15, 0.65);
		for _ in 0..1000 {
			assert!(span.contains(span.sample(&mut rng)));
		}
		assert_eq!(Span::new(3.0, 3.0).sample(&mut rng), 3.0);
	}
}
