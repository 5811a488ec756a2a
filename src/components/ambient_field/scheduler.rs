//! Frame scheduling.
//!
//! The engine never calls `requestAnimationFrame` directly. It asks a
//! [`Scheduler`] for the next frame, so tests can drive ticks by hand.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Work to run on the next frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Opaque id of a scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Runs callbacks at the next display refresh, with no fixed interval.
pub trait Scheduler {
	/// Run `callback` once on the next frame.
	fn schedule(&self, callback: FrameCallback) -> FrameHandle;
	/// Cancelling an unknown or already-fired handle is a no-op.
	fn cancel(&self, handle: FrameHandle);
}

type Pending = Rc<RefCell<Option<(FrameHandle, FrameCallback)>>>;

/// [`Scheduler`] on top of `window.requestAnimationFrame`.
///
/// Holds one long-lived JS closure that runs whichever callback is pending, so
/// scheduling from inside a frame never drops the closure that is executing.
/// At most one frame is pending; scheduling again replaces it.
pub struct AnimationFrameScheduler {
	window: Window,
	pending: Pending,
	trampoline: Closure<dyn FnMut()>,
}

impl AnimationFrameScheduler {
	/// Scheduler bound to `window`.
	pub fn new(window: Window) -> Self {
		let pending: Pending = Rc::new(RefCell::new(None));
		let slot = pending.clone();
		let trampoline = Closure::<dyn FnMut()>::new(move || {
			let due = slot.borrow_mut().take();
			if let Some((_, callback)) = due {
				callback();
			}
		});
		Self {
			window,
			pending,
			trampoline,
		}
	}
}

impl Scheduler for AnimationFrameScheduler {
	fn schedule(&self, callback: FrameCallback) -> FrameHandle {
		if let Some((stale, _)) = self.pending.borrow_mut().take() {
			let _ = self.window.cancel_animation_frame(stale.0);
		}
		match self
			.window
			.request_animation_frame(self.trampoline.as_ref().unchecked_ref())
		{
			Ok(id) => {
				let handle = FrameHandle(id);
				*self.pending.borrow_mut() = Some((handle, callback));
				handle
			}
			Err(e) => {
				warn!("ambient-field: requestAnimationFrame failed: {:?}", e);
				FrameHandle(0)
			}
		}
	}

	fn cancel(&self, handle: FrameHandle) {
		let mut pending = self.pending.borrow_mut();
		if pending.as_ref().is_some_and(|(h, _)| *h == handle) {
			pending.take();
			let _ = self.window.cancel_animation_frame(handle.0);
		}
	}
}

impl Drop for AnimationFrameScheduler {
	fn drop(&mut self) {
		if let Some((handle, _)) = self.pending.borrow_mut().take() {
			let _ = self.window.cancel_animation_frame(handle.0);
		}
	}
}
