//! Edge derivation and per-edge geometry.
//!
//! Edges are never stored. They are derived from the current node slice each
//! time it is needed, one per choice whose `next_scene` names another node in
//! the slice. Choices pointing at missing scenes are dropped silently.

use std::collections::HashMap;
use std::f64::consts::PI;

use super::types::{Position, SceneNode, Size};

/// Length of the arrowhead sides.
pub const ARROW_LENGTH: f64 = 6.0;
/// Half of the arrowhead's opening angle.
pub const ARROW_SPREAD: f64 = PI / 6.0;
/// Distance the arrow tip is pulled back from the line end. Negative values
/// place it past the end.
pub const ARROW_OFFSET: f64 = -1.0;
/// Radius of the marker circle drawn at the source anchor.
pub const MARKER_RADIUS: f64 = 5.0;

/// A derived connection, borrowed from the node slice it was computed from.
#[derive(Clone, Copy, Debug)]
pub struct Edge<'a> {
	pub source: &'a SceneNode,
	pub target: &'a SceneNode,
	/// Index of the originating choice within `source.choices`.
	pub choice: usize,
}

impl Edge<'_> {
	pub fn geometry(&self, footprint: Size) -> EdgeGeometry {
		route(self.source.position, self.target.position, footprint)
	}
}

/// Derive one edge per resolvable choice, in node then choice order.
///
/// Two choices to the same target yield two edges. Choices that point back at
/// their own scene produce no edge.
pub fn derive_edges(nodes: &[SceneNode]) -> Vec<Edge<'_>> {
	let mut id_to_idx: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
	for (i, node) in nodes.iter().enumerate() {
		id_to_idx.entry(node.id.as_str()).or_insert(i);
	}

	let mut edges = Vec::new();
	for (i, source) in nodes.iter().enumerate() {
		for (choice, c) in source.choices.iter().enumerate() {
			match id_to_idx.get(c.next_scene.as_str()) {
				Some(&j) if j != i => edges.push(Edge {
					source,
					target: &nodes[j],
					choice,
				}),
				_ => {}
			}
		}
	}
	edges
}

/// Line, arrowhead and source marker for one edge, in graph space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	pub start: Position,
	pub end: Position,
	/// Tip first, then the two back corners.
	pub arrow: [Position; 3],
	/// Center of the marker circle (the source anchor).
	pub marker: Position,
}

impl EdgeGeometry {
	pub fn angle(&self) -> f64 {
		(self.end.y - self.start.y).atan2(self.end.x - self.start.x)
	}
}

/// Route a line between two node boxes given their top-left corners.
///
/// Anchors sit on the vertical midline of each box, on the side facing the
/// other node: a source left of its target exits right and enters the
/// target's left side, otherwise the reverse.
pub fn route(source: Position, target: Position, footprint: Size) -> EdgeGeometry {
	let half_w = footprint.width / 2.0;
	let (source_dx, target_dx) = if source.x < target.x {
		(half_w, -half_w)
	} else {
		(-half_w, half_w)
	};

	let start = Position::new(
		source.x + half_w + source_dx,
		source.y + footprint.height / 2.0,
	);
	let end = Position::new(
		target.x + half_w + target_dx,
		target.y + footprint.height / 2.0,
	);

	let angle = (end.y - start.y).atan2(end.x - start.x);
	let tip = Position::new(
		end.x - ARROW_OFFSET * angle.cos(),
		end.y - ARROW_OFFSET * angle.sin(),
	);
	let left = Position::new(
		tip.x - ARROW_LENGTH * (angle - ARROW_SPREAD).cos(),
		tip.y - ARROW_LENGTH * (angle - ARROW_SPREAD).sin(),
	);
	let right = Position::new(
		tip.x - ARROW_LENGTH * (angle + ARROW_SPREAD).cos(),
		tip.y - ARROW_LENGTH * (angle + ARROW_SPREAD).sin(),
	);

	EdgeGeometry {
		start,
		end,
		arrow: [tip, left, right],
		marker: start,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::scene_graph::drag::NODE_SIZE;
	use crate::components::scene_graph::types::Choice;

	fn choice(text: &str, next: &str) -> Choice {
		Choice {
			text: text.into(),
			next_scene: next.into(),
		}
	}

	fn ids(edges: &[Edge<'_>]) -> Vec<(String, String)> {
		edges
			.iter()
			.map(|e| (e.source.id.clone(), e.target.id.clone()))
			.collect()
	}

	#[test]
	fn duplicate_choices_each_yield_an_edge() {
		let nodes = [
			SceneNode::new("A", "", vec![choice("left", "B"), choice("right", "B")]),
			SceneNode::new("B", "", Vec::new()),
		];
		let edges = derive_edges(&nodes);
		assert_eq!(
			ids(&edges),
			vec![("A".into(), "B".into()), ("A".into(), "B".into())]
		);
		assert_eq!(edges[1].choice, 1);
	}

	#[test]
	fn dangling_and_self_references_are_excluded() {
		let nodes = [SceneNode::new("A", "", vec![choice("?", "X"), choice("again", "A")])];
		assert!(derive_edges(&nodes).is_empty());
	}

	#[test]
	fn edges_to_removed_nodes_disappear() {
		let nodes = vec![
			SceneNode::new("A", "", vec![choice("go", "B"), choice("or", "C")]),
			SceneNode::new("B", "", Vec::new()),
			SceneNode::new("C", "", Vec::new()),
		];
		assert_eq!(derive_edges(&nodes).len(), 2);
		assert_eq!(ids(&derive_edges(&nodes[..2])), vec![("A".into(), "B".into())]);
	}

	#[test]
	fn forward_edges_leave_right_and_enter_left() {
		let g = route(Position::new(0.0, 0.0), Position::new(200.0, 0.0), NODE_SIZE);
		assert_eq!(g.start, Position::new(150.0, 30.0));
		assert_eq!(g.end, Position::new(200.0, 30.0));
		assert_eq!(g.marker, g.start);
		assert_eq!(g.arrow[0], Position::new(201.0, 30.0));
	}

	#[test]
	fn backward_and_vertical_edges_leave_left() {
		let back = route(Position::new(200.0, 0.0), Position::new(0.0, 0.0), NODE_SIZE);
		assert_eq!(back.start, Position::new(200.0, 30.0));
		assert_eq!(back.end, Position::new(150.0, 30.0));

		let vertical = route(Position::new(0.0, 0.0), Position::new(0.0, 300.0), NODE_SIZE);
		assert_eq!(vertical.start.x, 0.0);
		assert_eq!(vertical.end.x, 150.0);
	}

	#[test]
	fn arrowhead_is_symmetric_about_the_line() {
		let g = route(Position::new(0.0, 0.0), Position::new(400.0, 0.0), NODE_SIZE);
		let [tip, left, right] = g.arrow;
		assert!((left.x - right.x).abs() < 1e-9);
		assert!((left.y + right.y - 2.0 * tip.y).abs() < 1e-9);
		assert!((tip.x - left.x - ARROW_LENGTH * ARROW_SPREAD.cos()).abs() < 1e-9);
	}
}
