//! Fit-to-view: the transform that centers every node inside the container.

use super::drag::NODE_SIZE;
use super::types::{SceneNode, Size};
use super::viewport::{MIN_SCALE, ViewTransform};

/// Empty space kept between the fitted graph and each container edge, in pixels.
pub const FIT_MARGIN: f64 = 50.0;

/// Compute a transform that fits `nodes` inside `container`.
///
/// The bounding box of node positions is grown by one node footprint, since
/// positions mark a node's top-left corner. The center of this grown box, not
/// of the bare position box, lands on the container center. The graph is never
/// scaled above 100%; an empty graph gets the identity transform.
pub fn center_transform(nodes: &[SceneNode], container: Size) -> ViewTransform {
	let Some(first) = nodes.first() else {
		return ViewTransform::IDENTITY;
	};

	let (mut min_x, mut min_y) = (first.position.x, first.position.y);
	let (mut max_x, mut max_y) = (min_x, min_y);
	for node in &nodes[1..] {
		min_x = min_x.min(node.position.x);
		min_y = min_y.min(node.position.y);
		max_x = max_x.max(node.position.x);
		max_y = max_y.max(node.position.y);
	}

	let graph_width = (max_x - min_x) + NODE_SIZE.width;
	let graph_height = (max_y - min_y) + NODE_SIZE.height;

	let available_width = container.width - 2.0 * FIT_MARGIN;
	let available_height = container.height - 2.0 * FIT_MARGIN;

	let scale = (available_width / graph_width)
		.min(available_height / graph_height)
		.min(1.0)
		.max(MIN_SCALE);

	let center_x = min_x + graph_width / 2.0;
	let center_y = min_y + graph_height / 2.0;

	ViewTransform {
		x: container.width / 2.0 - center_x * scale,
		y: container.height / 2.0 - center_y * scale,
		scale,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::scene_graph::types::Position;

	fn node(id: &str, x: f64, y: f64) -> SceneNode {
		SceneNode::new(id, "", Vec::new()).at(x, y)
	}

	#[test]
	fn empty_graph_gets_identity() {
		assert_eq!(
			center_transform(&[], Size::new(800.0, 600.0)),
			ViewTransform::IDENTITY
		);
	}

	#[test]
	fn small_graphs_are_not_upscaled() {
		let nodes = [node("A", 0.0, 0.0), node("B", 200.0, 0.0)];
		let t = center_transform(&nodes, Size::new(1200.0, 800.0));
		assert_eq!(t.scale, 1.0);

		// Inflated box is 350 x 60 at (0, 0), so its center is (175, 30).
		assert_eq!((t.x, t.y), (600.0 - 175.0, 400.0 - 30.0));
	}

	#[test]
	fn large_graphs_shrink_to_the_tighter_axis() {
		let nodes = [node("A", 0.0, 0.0), node("B", 1850.0, 140.0)];
		let t = center_transform(&nodes, Size::new(1100.0, 700.0));
		// Available 1000 x 600 against a 2000 x 200 box.
		assert_eq!(t.scale, 0.5);

		let center = t.to_screen(Position::new(1000.0, 100.0));
		assert_eq!((center.x, center.y), (550.0, 350.0));
	}

	#[test]
	fn fitting_is_idempotent() {
		let nodes = [node("A", -40.0, 10.0), node("B", 900.0, 700.0), node("C", 20.0, -300.0)];
		let size = Size::new(640.0, 480.0);
		assert_eq!(center_transform(&nodes, size), center_transform(&nodes, size));
	}

	#[test]
	fn tiny_containers_still_respect_the_minimum_scale() {
		let nodes = [node("A", 0.0, 0.0)];
		let t = center_transform(&nodes, Size::new(60.0, 60.0));
		assert_eq!(t.scale, MIN_SCALE);
	}
}
