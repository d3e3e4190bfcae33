//! Graph view state and interaction handling.
//!
//! Combines the node store with the viewport, the active input session and
//! the inspector. Every browser event handler in the component funnels into a
//! method here, which keeps the interaction rules testable off the browser.

use log::{debug, info, warn};

use super::center::center_transform;
use super::client::StoreError;
use super::drag::{DragOutcome, DragSession, node_at};
use super::edges::{Edge, derive_edges};
use super::input::{Gesture, GestureEnd, PRIMARY_BUTTON};
use super::inspector::{EditField, Inspector};
use super::store::{NodeStore, NodeUpdate};
use super::types::{QuestData, SceneNode, ScreenPoint, Size, UpdateQuestRequest};
use super::viewport::{ViewTransform, ViewportController};

/// Progress of the one fetch that populates a graph view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
	/// Fetch in flight; the graph is not shown.
	#[default]
	Loading,
	/// Fetch failed with this message; shown in place of the graph.
	Failed(String),
	/// Nodes are installed and interactive.
	Ready,
}

/// Everything one open graph view needs, minus the browser handles.
#[derive(Clone, Debug)]
pub struct SceneGraphState {
	quest_name: String,
	store: NodeStore,
	viewport: ViewportController,
	inspector: Inspector,
	gesture: Option<Gesture>,
	container: Size,
	load: LoadState,
}

impl SceneGraphState {
	/// Empty state for `quest_name`, waiting for its first load.
	pub fn new(quest_name: impl Into<String>, zoom_sensitivity: f64) -> Self {
		Self {
			quest_name: quest_name.into(),
			store: NodeStore::default(),
			viewport: ViewportController::new(zoom_sensitivity),
			inspector: Inspector::default(),
			gesture: None,
			container: Size::default(),
			load: LoadState::Loading,
		}
	}

	/// Name of the quest this view loads and saves.
	pub fn quest_name(&self) -> &str {
		&self.quest_name
	}

	/// Progress of the initial load.
	pub fn load_state(&self) -> &LoadState {
		&self.load
	}

	/// Nodes in paint order.
	pub fn nodes(&self) -> &[SceneNode] {
		self.store.nodes()
	}

	/// Edges derived from the current nodes.
	pub fn edges(&self) -> Vec<Edge<'_>> {
		derive_edges(self.store.nodes())
	}

	/// Current pan and zoom.
	pub fn transform(&self) -> ViewTransform {
		self.viewport.transform()
	}

	/// Last measured canvas size.
	pub fn container(&self) -> Size {
		self.container
	}

	/// Selection and edit state.
	pub fn inspector(&self) -> &Inspector {
		&self.inspector
	}

	/// The press being tracked, if any.
	pub fn gesture(&self) -> Option<&Gesture> {
		self.gesture.as_ref()
	}

	/// Id of the node currently being dragged, if any.
	pub fn dragged_id(&self) -> Option<&str> {
		match &self.gesture {
			Some(Gesture::NodeDrag(drag)) => Some(drag.node_id()),
			_ => None,
		}
	}

	/// Save and export are offered once a load succeeded with at least one node.
	pub fn can_save(&self) -> bool {
		self.load == LoadState::Ready && !self.store.is_empty()
	}

	// Loading

	/// Reset everything tied to the previous graph before a fresh fetch.
	pub fn begin_load(&mut self) {
		self.load = LoadState::Loading;
		self.store = NodeStore::default();
		self.inspector = Inspector::default();
		self.gesture = None;
	}

	/// Install a fetched graph and fit it to the container.
	pub fn finish_load(&mut self, result: Result<NodeStore, StoreError>) {
		match result {
			Ok(store) => {
				self.store = store;
				self.inspector = Inspector::default();
				self.gesture = None;
				self.load = LoadState::Ready;
				self.center();
				info!(
					"quest-graph: loaded {:?} with {} scenes, {} edges",
					self.quest_name,
					self.store.len(),
					self.edges().len()
				);
			}
			Err(e) => {
				warn!("quest-graph: failed to load {:?}: {}", self.quest_name, e);
				self.store = NodeStore::default();
				self.load = LoadState::Failed(e.to_string());
			}
		}
	}

	/// Record a new canvas size. The transform is left alone.
	pub fn resize(&mut self, container: Size) {
		self.container = container;
	}

	/// Fit the current nodes to the container without reloading.
	pub fn center(&mut self) {
		let fitted = center_transform(self.store.nodes(), self.container);
		self.viewport.set_transform(fitted);
	}

	// Viewport and pointer input

	/// Apply one wheel tick. Positive `delta_y` zooms out.
	pub fn wheel(&mut self, delta_y: f64) {
		self.viewport.zoom(delta_y);
	}

	/// Start a gesture for a press. Returns `true` when one began, in which
	/// case the caller must track the pointer until [`Self::end_gesture`].
	pub fn pointer_down(&mut self, at: ScreenPoint, button: i16) -> bool {
		if button != PRIMARY_BUTTON || self.load != LoadState::Ready {
			return false;
		}
		if self.gesture.is_some() {
			debug!("discarding stale gesture");
			self.gesture = None;
		}

		let transform = self.viewport.transform();
		let gesture = match node_at(self.store.nodes(), &transform, at) {
			Some(node) => Gesture::NodeDrag(DragSession::begin(node.id.clone(), at)),
			None => Gesture::Pan(self.viewport.begin_pan(at)),
		};
		self.gesture = Some(gesture);
		true
	}

	/// Track the pointer for the current gesture: pan the view or move the node.
	pub fn pointer_move(&mut self, at: ScreenPoint) {
		let update = match self.gesture.as_ref() {
			Some(Gesture::Pan(session)) => {
				self.viewport.pan(session, at);
				None
			}
			Some(Gesture::NodeDrag(drag)) => Some(drag.track(at, &self.viewport.transform())),
			None => None,
		};
		if let Some(update) = update {
			self.dispatch(update);
		}
	}

	/// Finish the current gesture. A short press on a node opens it in the
	/// inspector and its id is returned.
	pub fn end_gesture(&mut self, end: GestureEnd) -> Option<String> {
		let Some(Gesture::NodeDrag(drag)) = self.gesture.take() else {
			return None;
		};
		let GestureEnd::Release(at) = end else {
			return None;
		};

		match drag.release(at) {
			DragOutcome::Click(id) => {
				self.inspector.open(id.clone());
				Some(id)
			}
			DragOutcome::Moved(_) => None,
		}
	}

	/// Apply one update to the node collection.
	pub fn dispatch(&mut self, update: NodeUpdate) -> bool {
		self.store.apply(update)
	}

	// Inspector

	/// The node open in the inspector, resolved against the live store.
	pub fn inspected_node(&self) -> Option<&SceneNode> {
		self.inspector.inspected(&self.store)
	}

	/// Show `id` in the inspector.
	pub fn open_inspector(&mut self, id: &str) {
		self.inspector.open(id);
	}

	/// Close the inspector, discarding any draft.
	pub fn close_inspector(&mut self) {
		self.inspector.close();
	}

	/// Move the inspector along the choice at `index`.
	pub fn follow_choice(&mut self, index: usize) {
		self.inspector.follow_choice(&self.store, index);
	}

	/// Global key handling. Escape closes an open inspector.
	pub fn key(&mut self, key: &str) -> bool {
		if key == "Escape" && self.inspector.is_open() {
			self.inspector.close();
			return true;
		}
		false
	}

	/// Start editing `field` of the inspected node, replacing any other draft.
	pub fn begin_edit(&mut self, field: EditField) -> bool {
		self.inspector.begin_edit(&self.store, field)
	}

	/// Replace the draft text while an edit is in progress.
	pub fn set_draft(&mut self, value: String) {
		self.inspector.set_draft(value);
	}

	/// Commit the draft to the store. Returns whether anything changed.
	pub fn save_edit(&mut self) -> bool {
		match self.inspector.save() {
			Some(update) => self.dispatch(update),
			None => false,
		}
	}

	/// Drop the draft without touching the store.
	pub fn cancel_edit(&mut self) {
		self.inspector.cancel();
	}

	// Persistence

	/// Full-replacement save payload, or `None` while saving is not offered.
	pub fn save_request(&self) -> Option<UpdateQuestRequest> {
		self.can_save()
			.then(|| self.store.update_request(&self.quest_name))
	}

	/// Downloadable document: the scene list without positions.
	pub fn export_document(&self) -> Option<QuestData> {
		self.can_save().then(|| self.store.quest_data())
	}
}
