//! Leptos component hosting the particle field canvas.
//!
//! Once the canvas mounts, the component builds a [`FieldEngine`] against the
//! browser window and starts it; the engine is stopped when the component's
//! owner is cleaned up, which detaches its listeners and cancels its frame.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::FieldConfig;
use super::environment::BrowserEnvironment;
use super::lifecycle::FieldEngine;
use super::render::CanvasSurface;
use super::scheduler::AnimationFrameScheduler;

/// Fixed, full-viewport and transparent to input.
const CANVAS_STYLE: &str =
	"position: fixed; inset: 0; pointer-events: none; z-index: 0; display: block;";

/// Renders the animated particle backdrop.
///
/// Place it first inside the page container; content stacked above it keeps
/// receiving input since the canvas never intercepts events.
#[component]
pub fn AmbientField(
	/// Overrides for the default tuning.
	#[prop(optional)]
	config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let engine: Rc<RefCell<Option<FieldEngine>>> = Rc::new(RefCell::new(None));
	let config = config.unwrap_or_default();
	let engine_init = engine.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if engine_init.borrow().is_some() {
			return;
		}
		let Some(window) = web_sys::window() else {
			warn!("ambient-field: no window, backdrop disabled");
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();

		let field = FieldEngine::new(
			config.clone(),
			Rc::new(BrowserEnvironment::new(window.clone())),
			Rc::new(AnimationFrameScheduler::new(window)),
			StdRng::from_entropy(),
		);
		match context_2d(&canvas) {
			Some(ctx) => field.attach_surface(Box::new(CanvasSurface::new(canvas, ctx))),
			None => warn!("ambient-field: 2d context unavailable, frames will be skipped"),
		}
		field.start();
		*engine_init.borrow_mut() = Some(field);
	});

	let engine_cleanup = SendWrapper::new(engine);
	on_cleanup(move || {
		if let Some(field) = RefCell::borrow_mut(&engine_cleanup).take() {
			field.stop();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-field"
			aria-hidden="true"
			style=CANVAS_STYLE
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}
