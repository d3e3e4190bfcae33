//! The node collection for one open graph and the updates it accepts.
//!
//! Every mutation (a drag step, an inspector commit) arrives as a [`NodeUpdate`]
//! and is applied here, so there is exactly one writer for node data.

use std::collections::HashMap;

use log::debug;

use super::types::{NodePosition, Position, QuestData, QuestResponse, SceneNode, UpdateQuestRequest};

/// A single mutation of the node collection.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeUpdate {
	/// Move a node's top-left corner to a new graph-space position.
	Position {
		/// Node to move.
		id: String,
		/// New top-left corner.
		position: Position,
	},
	/// Replace a scene's text.
	SceneText {
		/// Node to edit.
		id: String,
		/// Replacement text.
		text: String,
	},
	/// Replace the text of one choice, addressed by display index.
	ChoiceText {
		/// Node owning the choice.
		id: String,
		/// Index into the node's choices.
		choice: usize,
		/// Replacement text.
		text: String,
	},
}

impl NodeUpdate {
	/// Id of the node this update targets.
	pub fn node_id(&self) -> &str {
		match self {
			NodeUpdate::Position { id, .. }
			| NodeUpdate::SceneText { id, .. }
			| NodeUpdate::ChoiceText { id, .. } => id,
		}
	}
}

/// Owns the nodes of the open graph.
///
/// Nodes are never added or removed after load, so the id index built at
/// construction stays valid for the store's lifetime.
#[derive(Clone, Debug, Default)]
pub struct NodeStore {
	nodes: Vec<SceneNode>,
	id_to_idx: HashMap<String, usize>,
}

impl NodeStore {
	/// Index `nodes` by id. On duplicate ids the first node wins lookups.
	pub fn new(nodes: Vec<SceneNode>) -> Self {
		let mut id_to_idx = HashMap::with_capacity(nodes.len());
		for (i, node) in nodes.iter().enumerate() {
			id_to_idx.entry(node.id.clone()).or_insert(i);
		}
		Self { nodes, id_to_idx }
	}

	/// Join the store's scene list with its separate position list.
	///
	/// Scenes without a position entry start at the origin. If several
	/// entries name the same scene, the first one wins.
	pub fn from_response(response: QuestResponse) -> Self {
		let mut positions: HashMap<String, Position> = HashMap::new();
		for entry in response.node_positions {
			positions.entry(entry.scene_id).or_insert(entry.position);
		}

		let nodes = response
			.quest_data
			.scenes
			.into_iter()
			.map(|scene| {
				let position = positions.get(&scene.scene_id).copied().unwrap_or_default();
				SceneNode::from_record(scene, position)
			})
			.collect();
		Self::new(nodes)
	}

	/// All nodes in load order, which is also paint order.
	pub fn nodes(&self) -> &[SceneNode] {
		&self.nodes
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the store holds no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Look up a node by id.
	pub fn get(&self, id: &str) -> Option<&SceneNode> {
		self.id_to_idx.get(id).map(|&idx| &self.nodes[idx])
	}

	/// Apply one update. Returns `false` when it names an unknown node or choice.
	pub fn apply(&mut self, update: NodeUpdate) -> bool {
		let Some(&idx) = self.id_to_idx.get(update.node_id()) else {
			debug!("ignoring update for unknown node {:?}", update.node_id());
			return false;
		};
		let node = &mut self.nodes[idx];

		match update {
			NodeUpdate::Position { position, .. } => node.position = position,
			NodeUpdate::SceneText { text, .. } => node.text = text,
			NodeUpdate::ChoiceText { choice, text, .. } => match node.choices.get_mut(choice) {
				Some(c) => c.text = text,
				None => {
					debug!("ignoring edit of missing choice {} on {:?}", choice, node.id);
					return false;
				}
			},
		}
		true
	}

	/// Scene list with positions stripped: the save payload and the export document.
	pub fn quest_data(&self) -> QuestData {
		QuestData {
			scenes: self.nodes.iter().map(SceneNode::to_record).collect(),
		}
	}

	/// One layout entry per node, in node order.
	pub fn node_positions(&self) -> Vec<NodePosition> {
		self.nodes
			.iter()
			.map(|node| NodePosition {
				scene_id: node.id.clone(),
				position: node.position,
			})
			.collect()
	}

	/// Full-replacement save request for the current snapshot.
	pub fn update_request(&self, quest_name: &str) -> UpdateQuestRequest {
		UpdateQuestRequest {
			quest_name: quest_name.to_string(),
			quest_data: self.quest_data(),
			node_positions: self.node_positions(),
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::components::scene_graph::types::Choice;

	fn response() -> QuestResponse {
		serde_json::from_value(json!({
			"quest_name": "tower",
			"quest_data": { "scenes": [
				{ "scene_id": "A", "text": "Gate", "choices": [{ "text": "enter", "next_scene": "B" }] },
				{ "scene_id": "B", "text": "Hall", "choices": [] },
			]},
			"node_positions": [
				{ "scene_id": "A", "position": { "x": 10.0, "y": 20.0 } },
				{ "scene_id": "A", "position": { "x": 99.0, "y": 99.0 } },
			]
		}))
		.unwrap()
	}

	#[test]
	fn load_joins_positions_and_defaults_missing_ones() {
		let store = NodeStore::from_response(response());
		assert_eq!(store.len(), 2);
		assert_eq!(store.get("A").unwrap().position, Position::new(10.0, 20.0));
		assert_eq!(store.get("B").unwrap().position, Position::default());
	}

	#[test]
	fn updates_mutate_only_the_addressed_node() {
		let mut store = NodeStore::from_response(response());
		assert!(store.apply(NodeUpdate::Position {
			id: "B".into(),
			position: Position::new(5.0, 6.0),
		}));
		assert!(store.apply(NodeUpdate::ChoiceText {
			id: "A".into(),
			choice: 0,
			text: "push the door".into(),
		}));

		assert_eq!(store.get("B").unwrap().position, Position::new(5.0, 6.0));
		assert_eq!(store.get("A").unwrap().position, Position::new(10.0, 20.0));
		assert_eq!(
			store.get("A").unwrap().choices[0],
			Choice {
				text: "push the door".into(),
				next_scene: "B".into(),
			}
		);
	}

	#[test]
	fn updates_for_unknown_targets_are_rejected() {
		let mut store = NodeStore::from_response(response());
		assert!(!store.apply(NodeUpdate::SceneText {
			id: "Z".into(),
			text: "nope".into(),
		}));
		assert!(!store.apply(NodeUpdate::ChoiceText {
			id: "B".into(),
			choice: 3,
			text: "nope".into(),
		}));
	}

	#[test]
	fn save_request_splits_scenes_from_positions() {
		let store = NodeStore::from_response(response());
		let body = serde_json::to_value(store.update_request("tower")).unwrap();

		assert_eq!(body["quest_name"], "tower");
		assert_eq!(body["quest_data"]["scenes"][0]["scene_id"], "A");
		assert!(body["quest_data"]["scenes"][0].get("position").is_none());
		assert_eq!(
			body["node_positions"],
			json!([
				{ "scene_id": "A", "position": { "x": 10.0, "y": 20.0 } },
				{ "scene_id": "B", "position": { "x": 0.0, "y": 0.0 } },
			])
		);
	}
}
