//! Page-level configuration for the canvas.
//!
//! Read from a `<script id="quest-config" type="application/json">` element
//! in the host page. A `?quest=<name>` query parameter overrides the quest.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, UrlSearchParams, Window};

use crate::components::scene_graph::ZOOM_SENSITIVITY;

/// Id of the script element holding the JSON config.
pub const CONFIG_ELEMENT_ID: &str = "quest-config";

/// Where to load the quest from and how the canvas responds to input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
	/// Base URL of the quest store, without a trailing slash.
	pub api_base: String,
	/// Quest to load on mount.
	pub quest: String,
	/// Fractional scale change per wheel notch.
	pub zoom_sensitivity: f64,
}

impl Default for CanvasConfig {
	fn default() -> Self {
		Self {
			api_base: "http://localhost:8000".to_string(),
			quest: String::new(),
			zoom_sensitivity: ZOOM_SENSITIVITY,
		}
	}
}

impl CanvasConfig {
	/// Parse a config document. Missing fields take their defaults.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	/// Replace the quest with the `quest` query parameter, if present and non-empty.
	pub fn with_query(mut self, search: &str) -> Self {
		if let Some(quest) = UrlSearchParams::new_with_str(search)
			.ok()
			.and_then(|params| params.get("quest"))
			.filter(|quest| !quest.is_empty())
		{
			self.quest = quest;
		}
		self
	}

	/// Build the configuration from the host page.
	///
	/// A missing config element yields the defaults; a malformed one is
	/// logged and also yields the defaults.
	pub fn load() -> Self {
		let Some(window) = web_sys::window() else {
			return Self::default();
		};
		let config = match config_text(&window).map(|text| Self::from_json(&text)) {
			Some(Ok(config)) => config,
			Some(Err(e)) => {
				warn!("quest-graph: failed to parse {CONFIG_ELEMENT_ID}: {}", e);
				Self::default()
			}
			None => Self::default(),
		};
		let config = match window.location().search() {
			Ok(search) => config.with_query(&search),
			Err(_) => config,
		};
		info!(
			"quest-graph: quest {:?} from {}",
			config.quest, config.api_base
		);
		config
	}
}

fn config_text(window: &Window) -> Option<String> {
	let element = window.document()?.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}
