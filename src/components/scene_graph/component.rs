//! Leptos component wrapping the scene graph canvas.
//!
//! The component creates an HTML canvas element, loads the quest once it is
//! mounted, and wires pointer and wheel handlers for node dragging, panning
//! and zooming. The canvas is repainted from an effect whenever the graph
//! state changes.

use leptos::ev;
use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, WheelEvent};

use super::client::QuestApi;
use super::export::{download_json, export_file_name, export_json};
use super::input::{GestureEnd, GestureListeners};
use super::panel::InspectorPanel;
use super::render;
use super::state::{LoadState, SceneGraphState};
use super::theme::Theme;
use super::types::{ScreenPoint, Size};
use super::viewport::ZOOM_SENSITIVITY;

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

/// Show a blocking message to the operator.
fn notify(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Renders an interactive, editable scene graph for one quest.
///
/// The canvas sizes itself to its parent container and follows window
/// resizes. The quest is fetched from `api_base` on mount; Save writes the
/// current snapshot back and Download offers it as a JSON file.
#[component]
pub fn SceneGraphCanvas(
	/// Name of the quest to load and save.
	#[prop(into)]
	quest: String,
	/// Base URL of the quest store.
	#[prop(into)]
	api_base: String,
	/// Fractional scale change per wheel tick.
	#[prop(default = ZOOM_SENSITIVITY)]
	zoom_sensitivity: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = RwSignal::new(SceneGraphState::new(quest.clone(), zoom_sensitivity));
	let load = Memo::new(move |_| state.with(|s| s.load_state().clone()));
	let listeners = StoredValue::<Option<GestureListeners>, LocalStorage>::new_local(None);
	let api = QuestApi::new(api_base);

	// Match the canvas bitmap to its container and report the new size.
	let fit_canvas = move || -> Option<Size> {
		let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
		let parent = canvas.parent_element()?;
		let size = Size::new(parent.client_width() as f64, parent.client_height() as f64);
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		Some(size)
	};

	let canvas_point = move |client_x: i32, client_y: i32| -> ScreenPoint {
		let (x, y) = (client_x as f64, client_y as f64);
		match canvas_ref.get_untracked() {
			Some(canvas) => {
				let rect = canvas.get_bounding_client_rect();
				ScreenPoint::new(x - rect.left(), y - rect.top())
			}
			None => ScreenPoint::new(x, y),
		}
	};

	let (api_load, quest_load) = (api.clone(), quest.clone());
	Effect::new(move |_| {
		if canvas_ref.get().is_none() {
			return;
		}
		state.update(SceneGraphState::begin_load);
		let (api, quest) = (api_load.clone(), quest_load.clone());
		wasm_bindgen_futures::spawn_local(async move {
			let result = api.load(&quest).await;
			let size = fit_canvas();
			let _ = state.try_update(|s| {
				if let Some(size) = size {
					s.resize(size);
				}
				s.finish_load(result);
			});
		});
	});

	let theme = Theme::default();
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = context_2d(&canvas) else {
			warn!("quest-graph: canvas has no 2d context");
			return;
		};
		state.with(|s| render::render(s, &ctx, &theme));
	});

	let resize = window_event_listener(ev::resize, move |_| {
		if let Some(size) = fit_canvas() {
			state.update(|s| s.resize(size));
		}
	});
	on_cleanup(move || resize.remove());

	// Window listeners of the gesture in progress, if any.
	let detach_listeners = move || {
		if let Some(session) = listeners.try_update_value(Option::take).flatten() {
			session.detach();
		}
	};
	on_cleanup(detach_listeners);

	let end_gesture = move |end: GestureEnd| {
		state.update(|s| {
			s.end_gesture(end);
		});
		detach_listeners();
	};

	let on_pointerdown = move |ev: PointerEvent| {
		let at = canvas_point(ev.client_x(), ev.client_y());
		let began = state
			.try_update(|s| s.pointer_down(at, ev.button()))
			.unwrap_or(false);
		if !began {
			return;
		}
		ev.prevent_default();

		detach_listeners();
		let session = GestureListeners::attach(
			move |ev: PointerEvent| {
				let at = canvas_point(ev.client_x(), ev.client_y());
				state.update(|s| s.pointer_move(at));
			},
			move |ev: PointerEvent| {
				end_gesture(GestureEnd::Release(canvas_point(ev.client_x(), ev.client_y())));
			},
			move || end_gesture(GestureEnd::Abort),
		);
		listeners.set_value(Some(session));
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		state.update(|s| s.wheel(ev.delta_y()));
	};

	let on_center = move |_| {
		let size = fit_canvas();
		state.update(|s| {
			if let Some(size) = size {
				s.resize(size);
			}
			s.center();
		});
	};

	let on_save = move |_| {
		let Some(payload) = state.with_untracked(SceneGraphState::save_request) else {
			return;
		};
		let api = api.clone();
		wasm_bindgen_futures::spawn_local(async move {
			match api.save(&payload).await {
				Ok(()) => info!("quest-graph: saved {:?}", payload.quest_name),
				Err(e) => {
					warn!("quest-graph: failed to save {:?}: {}", payload.quest_name, e);
					notify(&format!("Failed to save changes: {e}"));
				}
			}
		});
	};

	let on_download = move |_| {
		let Some(document) = state.with_untracked(SceneGraphState::export_document) else {
			return;
		};
		let file_name = state.with_untracked(|s| export_file_name(s.quest_name()));
		let result = export_json(&document)
			.map_err(|e| JsValue::from_str(&e.to_string()))
			.and_then(|json| download_json(&file_name, &json));
		if let Err(e) = result {
			warn!("quest-graph: export failed: {:?}", e);
		}
	};

	let disabled = move || !state.with(SceneGraphState::can_save);
	let loading_text = format!("Loading quest {quest}...");

	view! {
		<div class="scene-graph">
			<header class="scene-graph-header">
				<h1 class="scene-graph-title">{quest}</h1>
				<div class="scene-graph-actions">
					<button on:click=on_center disabled=disabled title="Fit the graph to the view">
						"Center"
					</button>
					<button on:click=on_save disabled=disabled title="Save changes">
						"Save"
					</button>
					<button on:click=on_download disabled=disabled title="Download quest as JSON">
						"Download"
					</button>
				</div>
			</header>
			<div class="scene-graph-container">
				<canvas
					node_ref=canvas_ref
					class="scene-graph-canvas"
					on:pointerdown=on_pointerdown
					on:wheel=on_wheel
					style="display: block; cursor: grab; touch-action: none;"
				/>
				{move || match load.get() {
					LoadState::Loading => {
						Some(view! { <div class="scene-graph-loading">{loading_text.clone()}</div> }.into_any())
					}
					LoadState::Failed(message) => {
						let text = format!("Failed to load quest: {message}");
						Some(view! { <div class="scene-graph-error">{text}</div> }.into_any())
					}
					LoadState::Ready => None,
				}}
				<InspectorPanel state=state />
			</div>
		</div>
	}
}
