//! Ambient particle field rendered behind page content.
//!
//! A full-viewport, transparent canvas of drifting dots and short dashes:
//! - Sinusoidal drift around per-particle anchors, wrapping at the edges
//! - Gentle pull toward a smoothed pointer on mouse-driven devices
//! - Fewer particles and no pointer pull on touch hardware
//! - Twinkling opacity
//!
//! The engine core ([`FieldEngine`]) is independent of the DOM: it reads the
//! window through an [`Environment`], draws through a [`Surface`], and asks a
//! [`Scheduler`] for frames. [`AmbientField`] wires it to the browser.
//!
//! # Example
//!
//! ```ignore
//! use ambient_field::{AmbientField, FieldConfig};
//!
//! view! { <AmbientField config=FieldConfig::default() /> }
//! ```

mod capability;
mod component;
mod config;
mod environment;
mod lifecycle;
mod particles;
mod pointer;
mod render;
mod scheduler;
mod simulation;
mod theme;
mod types;
mod viewport;

pub use capability::{CapabilityProbe, detect_tier, probe_window};
pub use component::AmbientField;
pub use config::{ConfigError, FieldConfig, MAX_PARTICLES, ParticleCounts, Span};
pub use environment::{BrowserEnvironment, Environment, Listener};
pub use lifecycle::{EngineState, FieldEngine};
pub use particles::{Drift, Particle, ParticleStore, Shape, Twinkle};
pub use pointer::PointerTracker;
pub use render::{CanvasSurface, Surface, draw};
pub use scheduler::{AnimationFrameScheduler, FrameCallback, FrameHandle, Scheduler};
pub use simulation::Simulation;
pub use theme::{Color, Palette};
pub use types::{Point, Tier};
pub use viewport::Viewport;
