//! End-to-end interaction scenarios against the graph state, off the browser.

#![allow(unused_crate_dependencies)]

use std::f64::consts::PI;

use quest_graph::components::scene_graph::{
	EditField, GestureEnd, NODE_SIZE, QuestResponse, ScreenPoint, Size,
};
use quest_graph::{NodeStore, Position, SceneGraphState};
use serde_json::json;

fn ready(response: serde_json::Value) -> SceneGraphState {
	let response: QuestResponse = serde_json::from_value(response).unwrap();
	let mut state = SceneGraphState::new("loop", 0.03);
	state.resize(Size::new(1000.0, 600.0));
	state.finish_load(Ok(NodeStore::from_response(response)));
	state
}

fn round_trip() -> SceneGraphState {
	ready(json!({
		"quest_name": "loop",
		"quest_data": { "scenes": [
			{ "scene_id": "A", "text": "Gate", "choices": [{ "text": "go", "next_scene": "B" }] },
			{ "scene_id": "B", "text": "Hall", "choices": [{ "text": "back", "next_scene": "A" }] }
		]},
		"node_positions": [
			{ "scene_id": "A", "position": { "x": 0, "y": 0 } },
			{ "scene_id": "B", "position": { "x": 200, "y": 0 } }
		]
	}))
}

fn assert_close(actual: f64, expected: f64) {
	assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
}

#[test]
fn opposing_choices_route_to_facing_sides() {
	let state = round_trip();
	let edges = state.edges();
	assert_eq!(edges.len(), 2);

	let forward = edges[0].geometry(NODE_SIZE);
	assert_eq!(forward.start, Position::new(150.0, 30.0));
	assert_eq!(forward.end, Position::new(200.0, 30.0));
	assert_close(forward.angle(), 0.0);
	assert_close(forward.arrow[0].x, 201.0);

	let back = edges[1].geometry(NODE_SIZE);
	assert_eq!(back.start, Position::new(200.0, 30.0));
	assert_eq!(back.end, Position::new(150.0, 30.0));
	assert_close(back.angle(), PI);
	assert_close(back.arrow[0].x, 149.0);
}

#[test]
fn drag_then_click_then_edit_then_save() {
	let mut state = round_trip();
	let t = state.transform();
	assert_close(t.scale, 1.0);
	assert_close(t.x, 325.0);
	assert_close(t.y, 270.0);

	// Drag A by its center 40px right and 20px down.
	assert!(state.pointer_down(ScreenPoint::new(400.0, 300.0), 0));
	state.pointer_move(ScreenPoint::new(440.0, 320.0));
	assert_eq!(state.dragged_id(), Some("A"));
	assert_eq!(state.end_gesture(GestureEnd::Release(ScreenPoint::new(440.0, 320.0))), None);
	assert_eq!(state.nodes()[0].position, Position::new(40.0, 20.0));
	assert!(!state.inspector().is_open());

	// A short press on B opens the inspector.
	assert!(state.pointer_down(ScreenPoint::new(600.0, 300.0), 0));
	state.pointer_move(ScreenPoint::new(602.0, 301.0));
	assert_eq!(
		state.end_gesture(GestureEnd::Release(ScreenPoint::new(602.0, 301.0))),
		Some("B".to_string())
	);
	assert_eq!(state.inspected_node().unwrap().text, "Hall");

	assert!(state.begin_edit(EditField::ChoiceText(0)));
	state.set_draft("retreat".to_string());
	assert!(state.save_edit());
	assert_eq!(state.inspected_node().unwrap().choices[0].text, "retreat");

	let payload = serde_json::to_value(state.save_request().unwrap()).unwrap();
	assert_eq!(payload["quest_name"], "loop");
	assert_eq!(payload["quest_data"]["scenes"][1]["choices"][0]["text"], "retreat");
	assert_eq!(payload["node_positions"][0]["position"], json!({ "x": 40.0, "y": 20.0 }));
}

#[test]
fn dangling_choices_draw_nothing_and_close_the_inspector() {
	let mut state = ready(json!({
		"quest_name": "loop",
		"quest_data": { "scenes": [
			{ "scene_id": "A", "text": "Gate", "choices": [{ "text": "nowhere", "next_scene": "Z" }] }
		]},
		"node_positions": []
	}));
	assert!(state.edges().is_empty());
	assert_eq!(state.nodes()[0].position, Position::new(0.0, 0.0));

	state.open_inspector("A");
	state.follow_choice(0);
	assert!(!state.inspector().is_open());
}

#[test]
fn cancelled_press_is_never_a_click() {
	let mut state = round_trip();
	assert!(state.pointer_down(ScreenPoint::new(400.0, 300.0), 0));
	assert_eq!(state.end_gesture(GestureEnd::Abort), None);
	assert!(state.gesture().is_none());
	assert!(!state.inspector().is_open());
}
