//! Selection and inline-edit state for the inspector panel.
//!
//! The panel shows at most one node. Within it, a single field at a time may
//! hold an edit draft: starting an edit on another field discards the current
//! draft, as does any change of selection.

use log::debug;

use super::store::{NodeStore, NodeUpdate};
use super::types::SceneNode;

/// Which node, if any, the inspector shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Selection {
	#[default]
	Closed,
	Open(String),
}

/// An editable field of the inspected node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
	/// The scene description.
	SceneText,
	/// Text of the choice at this display index.
	ChoiceText(usize),
}

impl EditField {
	/// Current value of this field on `node`, if the field exists.
	pub fn value_of(self, node: &SceneNode) -> Option<&str> {
		match self {
			EditField::SceneText => Some(&node.text),
			EditField::ChoiceText(i) => node.choices.get(i).map(|c| c.text.as_str()),
		}
	}

	fn update(self, id: String, text: String) -> NodeUpdate {
		match self {
			EditField::SceneText => NodeUpdate::SceneText { id, text },
			EditField::ChoiceText(choice) => NodeUpdate::ChoiceText { id, choice, text },
		}
	}
}

/// Uncommitted scratch copy of one field.
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
	pub field: EditField,
	pub value: String,
}

/// Inspector state machine.
#[derive(Clone, Debug, Default)]
pub struct Inspector {
	selection: Selection,
	draft: Option<EditDraft>,
}

impl Inspector {
	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn selected_id(&self) -> Option<&str> {
		match &self.selection {
			Selection::Open(id) => Some(id),
			Selection::Closed => None,
		}
	}

	/// The inspected node, resolved against the live store.
	pub fn inspected<'a>(&self, store: &'a NodeStore) -> Option<&'a SceneNode> {
		self.selected_id().and_then(|id| store.get(id))
	}

	pub fn open(&mut self, id: impl Into<String>) {
		let id = id.into();
		if self.selected_id() != Some(id.as_str()) {
			self.draft = None;
		}
		debug!("inspecting {:?}", id);
		self.selection = Selection::Open(id);
	}

	pub fn close(&mut self) {
		self.selection = Selection::Closed;
		self.draft = None;
	}

	pub fn is_open(&self) -> bool {
		matches!(self.selection, Selection::Open(_))
	}

	/// Follow the choice at `index` of the inspected node.
	///
	/// Moves the panel to the target scene when it exists. A dangling target
	/// leaves nothing to show, so the panel closes. Returns the new node.
	pub fn follow_choice<'a>(&mut self, store: &'a NodeStore, index: usize) -> Option<&'a SceneNode> {
		let target = self
			.inspected(store)
			.and_then(|node| node.choices.get(index))
			.map(|choice| choice.next_scene.clone())?;

		match store.get(&target) {
			Some(node) => {
				self.open(target);
				Some(node)
			}
			None => {
				debug!("choice leads to missing scene {:?}", target);
				self.close();
				None
			}
		}
	}

	/// Start editing `field`, seeding the draft from the live value.
	///
	/// Returns `false` when nothing is inspected or the field does not exist.
	pub fn begin_edit(&mut self, store: &NodeStore, field: EditField) -> bool {
		let Some(value) = self.inspected(store).and_then(|node| field.value_of(node)) else {
			return false;
		};
		self.draft = Some(EditDraft {
			field,
			value: value.to_string(),
		});
		true
	}

	pub fn draft(&self) -> Option<&EditDraft> {
		self.draft.as_ref()
	}

	pub fn is_editing(&self, field: EditField) -> bool {
		self.draft.as_ref().is_some_and(|d| d.field == field)
	}

	/// Replace the draft's text. Ignored when no edit is in progress.
	pub fn set_draft(&mut self, value: impl Into<String>) {
		if let Some(draft) = self.draft.as_mut() {
			draft.value = value.into();
		}
	}

	/// Finish the edit, yielding the update that commits the draft.
	pub fn save(&mut self) -> Option<NodeUpdate> {
		let draft = self.draft.take()?;
		let id = self.selected_id()?.to_string();
		Some(draft.field.update(id, draft.value))
	}

	pub fn cancel(&mut self) {
		self.draft = None;
	}
}
