//! ambient-field: pointer-reactive particle backdrop for a portfolio page.
//!
//! This crate provides a WASM particle-field component that renders drifting,
//! twinkling dots and dashes behind page content, leaning toward the mouse on
//! pointer devices and scaling down on touch hardware.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Enables the browser entropy source `rand` seeds from on wasm32.
use getrandom as _;

pub mod components;

pub use components::ambient_field::{AmbientField, FieldConfig, FieldEngine, Tier};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-field: logging initialized");
}

/// Load field overrides from a script element with id="ambient-config".
/// Expected format: JSON object with camelCase `FieldConfig` keys; omitted
/// keys keep their defaults.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("ambient-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("ambient-field: loaded config overrides");
			Some(config)
		}
		Err(e) => {
			warn!("ambient-field: ignoring config overrides: {}", e);
			None
		}
	}
}

/// Main application component.
/// Mounts the particle backdrop behind the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="page">
			<AmbientField config=config />
			<main class="page-content" style="position: relative; z-index: 1;" />
		</div>
	}
}
