//! quest-graph: Interactive scene graph editor for branching quests.
//!
//! This crate provides a WASM-based canvas component that lays out a quest's
//! scenes as draggable boxes connected by choice arrows, with pan/zoom,
//! fit-to-view, in-place text editing, and save/export against the quest store.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod config;

pub use components::scene_graph::{
	Choice, NodeStore, NodeUpdate, Position, QuestApi, SceneGraphCanvas, SceneGraphState, SceneNode,
	StoreError,
};
pub use config::CanvasConfig;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("quest-graph: logging initialized");
}

/// Main application component.
/// Reads the page configuration and renders the editor full screen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = CanvasConfig::load();
	let title = if config.quest.is_empty() {
		"Quest Graph".to_string()
	} else {
		format!("{} - Quest Graph", config.quest)
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<SceneGraphCanvas
				quest=config.quest
				api_base=config.api_base
				zoom_sensitivity=config.zoom_sensitivity
			/>
			<div class="graph-overlay">
				<p class="subtitle">
					"Drag scenes to reposition. Click a scene to inspect it. Scroll to zoom. Drag background to pan."
				</p>
			</div>
		</div>
	}
}
