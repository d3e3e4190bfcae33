//! Scene graph data structures and the quest store's wire shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A point in graph space (the coordinate system node positions are authored in).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal coordinate, growing rightwards.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Position {
	/// Create a position from its coordinates.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A point in screen space, relative to the canvas element's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
	/// Pixels from the canvas's left edge.
	pub x: f64,
	/// Pixels from the canvas's top edge.
	pub y: f64,
}

impl ScreenPoint {
	/// Create a screen point from canvas-relative pixels.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to another screen point, in pixels.
	pub fn distance_to(self, other: ScreenPoint) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Width and height, used both for the node footprint and the container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	/// Horizontal extent.
	pub width: f64,
	/// Vertical extent.
	pub height: f64,
}

impl Size {
	/// Create a size from its extents.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// A labeled transition from one scene to another.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Choice {
	/// Label shown to the player.
	pub text: String,
	/// Target scene id. May name a scene that does not exist (dangling).
	pub next_scene: String,
}

/// A scene as the quest store keeps it: content only, no layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
	pub scene_id: String,
	#[serde(default)]
	pub text: String,
	#[serde(default)]
	pub choices: Vec<Choice>,
	/// Fields the canvas does not interpret, carried through to saves and exports.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// A node on the canvas: a scene joined with its authored position.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	/// Unique within one graph (the scene id).
	pub id: String,
	/// Scene description.
	pub text: String,
	/// Display order is meaningful and preserved.
	pub choices: Vec<Choice>,
	/// Top-left corner of the node's footprint, in graph space.
	pub position: Position,
	extra: Map<String, Value>,
}

impl SceneNode {
	/// A node at the origin with no extra store fields.
	pub fn new(id: impl Into<String>, text: impl Into<String>, choices: Vec<Choice>) -> Self {
		Self {
			id: id.into(),
			text: text.into(),
			choices,
			position: Position::default(),
			extra: Map::new(),
		}
	}

	/// Place the node's top-left corner at `(x, y)`.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.position = Position::new(x, y);
		self
	}

	/// Join a stored scene with its position.
	pub fn from_record(record: SceneRecord, position: Position) -> Self {
		Self {
			id: record.scene_id,
			text: record.text,
			choices: record.choices,
			position,
			extra: record.extra,
		}
	}

	/// The node in store shape, with its position stripped.
	pub fn to_record(&self) -> SceneRecord {
		SceneRecord {
			scene_id: self.id.clone(),
			text: self.text.clone(),
			choices: self.choices.clone(),
			extra: self.extra.clone(),
		}
	}
}

/// The scene list half of a stored quest. Also the exported document shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
	#[serde(default)]
	pub scenes: Vec<SceneRecord>,
}

/// The layout half of a stored quest: one entry per scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodePosition {
	pub scene_id: String,
	pub position: Position,
}

/// Body of `GET /get_quest_data/{quest}`.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestResponse {
	/// Name the store knows the quest by.
	#[serde(default)]
	pub quest_name: String,
	/// The scene list.
	pub quest_data: QuestData,
	/// Layout entries, keyed by scene id.
	#[serde(default)]
	pub node_positions: Vec<NodePosition>,
}

/// Body of `PUT /update_quest`. Replaces the stored quest wholesale.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateQuestRequest {
	pub quest_name: String,
	pub quest_data: QuestData,
	pub node_positions: Vec<NodePosition>,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn scene_record_defaults_missing_text_and_choices() {
		let record: SceneRecord = serde_json::from_value(json!({ "scene_id": "end" })).unwrap();
		assert_eq!(record.text, "");
		assert!(record.choices.is_empty());
	}

	#[test]
	fn unknown_scene_fields_survive_a_round_trip_through_a_node() {
		let record: SceneRecord = serde_json::from_value(json!({
			"scene_id": "1",
			"text": "A dark corridor.",
			"choices": [],
			"mood": "tense"
		}))
		.unwrap();
		let node = SceneNode::from_record(record, Position::new(4.0, 2.0));
		let value = serde_json::to_value(node.to_record()).unwrap();
		assert_eq!(value["mood"], "tense");
		assert!(value.get("position").is_none());
	}

	#[test]
	fn screen_distance_is_euclidean() {
		let a = ScreenPoint::new(0.0, 0.0);
		assert_eq!(a.distance_to(ScreenPoint::new(3.0, 4.0)), 5.0);
	}
}
