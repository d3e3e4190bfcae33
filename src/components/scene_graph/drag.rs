//! Node hit-testing and drag-versus-click disambiguation.
//!
//! A press on a node starts a [`DragSession`]. Every tracked move produces a
//! position update that is applied immediately, so there is no separate commit
//! step. On release the total press-to-release displacement decides whether
//! the gesture also counts as a click.

use super::store::NodeUpdate;
use super::types::{Position, SceneNode, ScreenPoint, Size};
use super::viewport::ViewTransform;

/// Fixed footprint of every node, in graph units.
pub const NODE_SIZE: Size = Size::new(150.0, 60.0);

/// Presses that travel less than this many pixels count as clicks.
pub const CLICK_THRESHOLD: f64 = 5.0;

/// Whether a graph-space point lies inside a node's footprint.
pub fn contains(node: &SceneNode, p: Position) -> bool {
	let (x, y) = (node.position.x, node.position.y);
	p.x >= x && p.x <= x + NODE_SIZE.width && p.y >= y && p.y <= y + NODE_SIZE.height
}

/// The topmost node under a screen point. Later nodes paint over earlier ones.
pub fn node_at<'a>(
	nodes: &'a [SceneNode],
	transform: &ViewTransform,
	point: ScreenPoint,
) -> Option<&'a SceneNode> {
	let p = transform.to_graph(point);
	nodes.iter().rev().find(|node| contains(node, p))
}

/// How a finished node gesture resolved.
#[derive(Clone, Debug, PartialEq)]
pub enum DragOutcome {
	/// Released within the click threshold; the node should be selected.
	Click(String),
	/// Released farther away; the node simply stays where it was dragged.
	Moved(String),
}

/// An in-progress press on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
	node_id: String,
	press: ScreenPoint,
}

impl DragSession {
	pub fn begin(node_id: impl Into<String>, press: ScreenPoint) -> Self {
		Self {
			node_id: node_id.into(),
			press,
		}
	}

	pub fn node_id(&self) -> &str {
		&self.node_id
	}

	/// Position update that puts the node's center under the cursor.
	pub fn track(&self, cursor: ScreenPoint, transform: &ViewTransform) -> NodeUpdate {
		let p = transform.to_graph(cursor);
		NodeUpdate::Position {
			id: self.node_id.clone(),
			position: Position::new(p.x - NODE_SIZE.width / 2.0, p.y - NODE_SIZE.height / 2.0),
		}
	}

	pub fn release(self, at: ScreenPoint) -> DragOutcome {
		if self.press.distance_to(at) < CLICK_THRESHOLD {
			DragOutcome::Click(self.node_id)
		} else {
			DragOutcome::Moved(self.node_id)
		}
	}
}
