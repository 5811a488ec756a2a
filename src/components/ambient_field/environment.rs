//! Window-side inputs: size, capability signals, and event subscriptions.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, Window};

use super::capability::{CapabilityProbe, probe_window};

/// An attached event handler. Dropping it detaches the handler.
pub struct Listener {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Listener {
	/// Listener that runs `detach` when dropped.
	pub fn new(detach: impl FnOnce() + 'static) -> Self {
		Self {
			detach: Some(Box::new(detach)),
		}
	}

	/// A listener with nothing to detach.
	pub fn inert() -> Self {
		Self { detach: None }
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

/// Everything the engine reads from the hosting window.
pub trait Environment {
	/// Current inner window size in CSS pixels.
	fn window_size(&self) -> (f64, f64);
	/// Capability signals for tier detection.
	fn probe(&self) -> CapabilityProbe;
	/// Subscribe to window resizes.
	fn on_resize(&self, handler: Box<dyn FnMut()>) -> Listener;
	/// Handler receives client coordinates.
	fn on_pointer_move(&self, handler: Box<dyn FnMut(f64, f64)>) -> Listener;
}

/// [`Environment`] backed by the browser window.
pub struct BrowserEnvironment {
	window: Window,
}

impl BrowserEnvironment {
	/// Environment reading from `window`.
	pub fn new(window: Window) -> Self {
		Self { window }
	}

	fn listen<T: ?Sized + 'static>(&self, event: &'static str, closure: Closure<T>) -> Listener {
		if let Err(e) = self
			.window
			.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
		{
			warn!("ambient-field: failed to attach {} listener: {:?}", event, e);
			return Listener::inert();
		}
		let window = self.window.clone();
		Listener::new(move || {
			let _ = window.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
		})
	}
}

impl Environment for BrowserEnvironment {
	fn window_size(&self) -> (f64, f64) {
		let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		(read(self.window.inner_width()), read(self.window.inner_height()))
	}

	fn probe(&self) -> CapabilityProbe {
		probe_window(&self.window)
	}

	fn on_resize(&self, handler: Box<dyn FnMut()>) -> Listener {
		self.listen("resize", Closure::<dyn FnMut()>::wrap(handler))
	}

	fn on_pointer_move(&self, mut handler: Box<dyn FnMut(f64, f64)>) -> Listener {
		let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			handler(ev.client_x() as f64, ev.client_y() as f64);
		});
		self.listen("mousemove", closure)
	}
}
