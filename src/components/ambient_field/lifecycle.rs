//! Engine mount/unmount and the frame loop.
//!
//! [`FieldEngine`] owns every resource a mount creates: the particle store,
//! the pending frame, and the resize/pointer listeners. `start` acquires them,
//! `stop` releases all of them, and both are idempotent.
//!
//! Each mount gets a generation number. Scheduled frames and event handlers
//! carry the generation they were created under and do nothing once it is
//! stale, so a callback that fires after `stop` (or after a restart) can
//! neither mutate particles nor draw.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info};
use rand::rngs::StdRng;

use super::capability::detect_tier;
use super::config::FieldConfig;
use super::environment::{Environment, Listener};
use super::particles::{Particle, ParticleStore};
use super::pointer::PointerTracker;
use super::render::{self, Surface};
use super::scheduler::{FrameCallback, FrameHandle, Scheduler};
use super::simulation::Simulation;
use super::types::{Point, Tier};
use super::viewport::Viewport;

/// Lifecycle state of a [`FieldEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
	/// Not mounted; holds no particles, frames or listeners.
	Idle,
	/// Mounted and ticking.
	Running,
}

/// State that exists only while running; discarded wholesale on stop.
struct Mount {
	tier: Tier,
	viewport: Viewport,
	pointer: PointerTracker,
	store: ParticleStore,
	simulation: Simulation,
	frame: Option<FrameHandle>,
	listeners: Vec<Listener>,
}

struct EngineCore {
	config: FieldConfig,
	rng: StdRng,
	surface: Option<Box<dyn Surface>>,
	generation: u64,
	mount: Option<Mount>,
}

impl EngineCore {
	/// The running mount, if it belongs to `generation`.
	fn live(&mut self, generation: u64) -> Option<&mut Mount> {
		if self.generation == generation {
			self.mount.as_mut()
		} else {
			None
		}
	}
}

/// The ambient particle field.
///
/// Cheap to clone; clones share one engine.
#[derive(Clone)]
pub struct FieldEngine {
	core: Rc<RefCell<EngineCore>>,
	environment: Rc<dyn Environment>,
	scheduler: Rc<dyn Scheduler>,
}

impl FieldEngine {
	/// Idle engine. `rng` seeds every particle store it creates.
	pub fn new(
		config: FieldConfig,
		environment: Rc<dyn Environment>,
		scheduler: Rc<dyn Scheduler>,
		rng: StdRng,
	) -> Self {
		Self {
			core: Rc::new(RefCell::new(EngineCore {
				config,
				rng,
				surface: None,
				generation: 0,
				mount: None,
			})),
			environment,
			scheduler,
		}
	}

	/// `Idle -> Running`: size the surface, seed particles, attach listeners,
	/// and schedule the first frame. No-op when already running.
	pub fn start(&self) {
		let (generation, tier) = {
			let mut core = self.core.borrow_mut();
			if core.mount.is_some() {
				return;
			}
			core.generation += 1;
			let generation = core.generation;

			let tier = detect_tier(&self.environment.probe());
			let EngineCore {
				config,
				rng,
				surface,
				..
			} = &mut *core;

			let mut viewport = Viewport::default();
			viewport.resize(self.environment.window_size(), surface.as_deref_mut());
			let store = ParticleStore::create(
				config.count_for(tier),
				viewport.width,
				viewport.height,
				config,
				rng,
			);
			let pointer = PointerTracker::new(viewport.center(), config.smoothing_factor);

			info!(
				"ambient-field: started ({} tier, {} particles, {}x{})",
				tier.name(),
				store.len(),
				viewport.width,
				viewport.height
			);

			core.mount = Some(Mount {
				tier,
				viewport,
				pointer,
				store,
				simulation: Simulation::new(),
				frame: None,
				listeners: Vec::new(),
			});
			(generation, tier)
		};

		// Handlers borrow the core themselves, so attach them only once the
		// mount is in place and the borrow above has ended.
		let mut listeners = vec![self.environment.on_resize(self.resize_handler(generation))];
		if tier == Tier::Pointer {
			listeners.push(
				self.environment
					.on_pointer_move(self.pointer_handler(generation)),
			);
		}
		// A handler may have stopped the engine during registration.
		let orphaned = match self.core.borrow_mut().live(generation) {
			Some(mount) => {
				mount.listeners = listeners;
				None
			}
			None => Some(listeners),
		};
		if orphaned.is_some() {
			return;
		}

		let handle = self.scheduler.schedule(frame_callback(
			Rc::downgrade(&self.core),
			Rc::downgrade(&self.scheduler),
			generation,
		));
		if let Some(mount) = self.core.borrow_mut().live(generation) {
			mount.frame = Some(handle);
		}
	}

	/// `Running -> Idle`: cancel the pending frame and detach every listener.
	/// Safe to call any number of times.
	pub fn stop(&self) {
		let mount = {
			let mut core = self.core.borrow_mut();
			core.generation += 1;
			core.mount.take()
		};
		let Some(mount) = mount else {
			return;
		};
		if let Some(handle) = mount.frame {
			self.scheduler.cancel(handle);
		}
		let particles = mount.store.len();
		drop(mount.listeners);
		info!("ambient-field: stopped ({} particles released)", particles);
	}

	/// Whether a mount is live.
	pub fn state(&self) -> EngineState {
		if self.core.borrow().mount.is_some() {
			EngineState::Running
		} else {
			EngineState::Idle
		}
	}

	/// Hand the engine a drawing surface. A running engine sizes it right away.
	pub fn attach_surface(&self, mut surface: Box<dyn Surface>) {
		let mut core = self.core.borrow_mut();
		if let Some(mount) = core.mount.as_mut() {
			let size = (mount.viewport.width, mount.viewport.height);
			mount.viewport.resize(size, Some(&mut *surface));
		}
		core.surface = Some(surface);
	}

	/// Take the surface back. Until another is attached, frames skip
	/// simulation and drawing.
	pub fn detach_surface(&self) -> Option<Box<dyn Surface>> {
		self.core.borrow_mut().surface.take()
	}

	/// Tier detected at start; `None` when idle.
	pub fn tier(&self) -> Option<Tier> {
		self.core.borrow().mount.as_ref().map(|m| m.tier)
	}

	/// Size of the live store; zero when idle.
	pub fn particle_count(&self) -> usize {
		self.core.borrow().mount.as_ref().map_or(0, |m| m.store.len())
	}

	/// Snapshot of the current particles; empty when idle.
	pub fn particles(&self) -> Vec<Particle> {
		self.core
			.borrow()
			.mount
			.as_ref()
			.map(|m| m.store.particles().to_vec())
			.unwrap_or_default()
	}

	/// Simulation clock of the live mount.
	pub fn clock(&self) -> Option<f64> {
		self.core.borrow().mount.as_ref().map(|m| m.simulation.clock())
	}

	/// Viewport of the live mount.
	pub fn viewport(&self) -> Option<Viewport> {
		self.core.borrow().mount.as_ref().map(|m| m.viewport)
	}

	/// Smoothed pointer position the simulation reads.
	pub fn pointer(&self) -> Option<Point> {
		self.core.borrow().mount.as_ref().map(|m| m.pointer.current())
	}

	fn resize_handler(&self, generation: u64) -> Box<dyn FnMut()> {
		let core = Rc::downgrade(&self.core);
		let environment = Rc::downgrade(&self.environment);
		Box::new(move || {
			let (Some(core), Some(environment)) = (core.upgrade(), environment.upgrade()) else {
				return;
			};
			let size = environment.window_size();
			let mut core = core.borrow_mut();
			let EngineCore {
				surface,
				mount,
				generation: current,
				..
			} = &mut *core;
			if *current != generation {
				return;
			}
			if let Some(mount) = mount.as_mut() {
				mount.viewport.resize(size, surface.as_deref_mut());
				debug!(
					"ambient-field: resized to {}x{}",
					mount.viewport.width, mount.viewport.height
				);
			}
		})
	}

	fn pointer_handler(&self, generation: u64) -> Box<dyn FnMut(f64, f64)> {
		let core = Rc::downgrade(&self.core);
		Box::new(move |x, y| {
			let Some(core) = core.upgrade() else {
				return;
			};
			if let Some(mount) = core.borrow_mut().live(generation) {
				mount.pointer.on_move(x, y);
			}
		})
	}
}

fn frame_callback(
	core: Weak<RefCell<EngineCore>>,
	scheduler: Weak<dyn Scheduler>,
	generation: u64,
) -> FrameCallback {
	Box::new(move || {
		let (Some(core), Some(scheduler)) = (core.upgrade(), scheduler.upgrade()) else {
			return;
		};
		run_frame(&core, &scheduler, generation);
	})
}

/// One tick: smooth the pointer, step and draw, then schedule the next frame.
/// Without a surface only the rescheduling happens.
fn run_frame(core: &Rc<RefCell<EngineCore>>, scheduler: &Rc<dyn Scheduler>, generation: u64) {
	{
		let mut guard = core.borrow_mut();
		let EngineCore {
			config,
			surface,
			mount,
			generation: current,
			..
		} = &mut *guard;
		if *current != generation {
			return;
		}
		let Some(mount) = mount.as_mut() else {
			return;
		};
		mount.frame = None;

		if let Some(surface) = surface.as_deref_mut() {
			mount.pointer.advance();
			mount.simulation.step(
				mount.store.particles_mut(),
				mount.pointer.current(),
				mount.tier,
				&mount.viewport,
				config,
			);
			render::draw(
				surface,
				mount.store.particles(),
				mount.simulation.clock(),
				config,
			);
		}
	}

	let handle = scheduler.schedule(frame_callback(
		Rc::downgrade(core),
		Rc::downgrade(scheduler),
		generation,
	));
	if let Some(mount) = core.borrow_mut().live(generation) {
		mount.frame = Some(handle);
	}
}
