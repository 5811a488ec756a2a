//! Pointer vs. touch classification.
//!
//! Detection runs once when the engine starts. Any signal of touch hardware
//! selects [`Tier::Touch`]; a missing browser API counts as "no signal", so the
//! detector fails open to the richer pointer behavior.

use wasm_bindgen::JsValue;
use web_sys::Window;

use super::types::Tier;

/// Raw capability signals. `None` means the API was unavailable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilityProbe {
	/// Whether the window exposes `ontouchstart`.
	pub touch_start: Option<bool>,
	/// `navigator.maxTouchPoints`.
	pub max_touch_points: Option<i32>,
	/// Whether `(pointer: coarse)` matches.
	pub coarse_pointer: Option<bool>,
}

/// Classify the environment from its capability signals.
pub fn detect_tier(probe: &CapabilityProbe) -> Tier {
	let touch = probe.touch_start.unwrap_or(false)
		|| probe.max_touch_points.is_some_and(|points| points > 0)
		|| probe.coarse_pointer.unwrap_or(false);
	if touch { Tier::Touch } else { Tier::Pointer }
}

/// Read capability signals from a browser window.
pub fn probe_window(window: &Window) -> CapabilityProbe {
	let touch_start = js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).ok();

	let navigator = window.navigator();
	let max_touch_points =
		js_sys::Reflect::has(&navigator, &JsValue::from_str("maxTouchPoints"))
			.ok()
			.filter(|present| *present)
			.map(|_| navigator.max_touch_points());

	let coarse_pointer = window
		.match_media("(pointer: coarse)")
		.ok()
		.flatten()
		.map(|query| query.matches());

	CapabilityProbe {
		touch_start,
		max_touch_points,
		coarse_pointer,
	}
}
