//! Canvas rendering for the scene graph.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edge lines, arrowheads and source markers (graph space)
//! 3. Node boxes and labels (graph space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::drag::NODE_SIZE;
use super::edges::MARKER_RADIUS;
use super::state::SceneGraphState;
use super::theme::Theme;
use super::types::SceneNode;

/// Renders the complete graph to the canvas.
pub fn render(state: &SceneGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let container = state.container();
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, container.width, container.height);

	let t = state.transform();
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.scale, t.scale);

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_edges(state: &SceneGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let color = theme.edge.color.to_css();
	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);

	for edge in state.edges() {
		let g = edge.geometry(NODE_SIZE);

		ctx.set_line_width(theme.edge.line_width);
		ctx.begin_path();
		ctx.move_to(g.start.x, g.start.y);
		ctx.line_to(g.end.x, g.end.y);
		ctx.stroke();

		let [tip, left, right] = g.arrow;
		ctx.begin_path();
		ctx.move_to(tip.x, tip.y);
		ctx.line_to(left.x, left.y);
		ctx.line_to(right.x, right.y);
		ctx.close_path();
		ctx.fill();

		ctx.begin_path();
		let _ = ctx.arc(g.marker.x, g.marker.y, MARKER_RADIUS, 0.0, 2.0 * PI);
		ctx.fill();
		ctx.set_line_width(1.0);
		ctx.set_stroke_style_str(&theme.edge.marker_outline.to_css());
		ctx.stroke();
		ctx.set_stroke_style_str(&color);
	}
}

fn draw_nodes(state: &SceneGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let selected = state.inspector().selected_id();
	let dragged = state.dragged_id();

	ctx.set_font(theme.node.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");

	for node in state.nodes() {
		let is_dragged = dragged == Some(node.id.as_str());
		let is_selected = selected == Some(node.id.as_str());
		draw_node(ctx, node, theme, is_dragged, is_selected);
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &SceneNode,
	theme: &Theme,
	dragged: bool,
	selected: bool,
) {
	let style = &theme.node;
	let (x, y) = (node.position.x, node.position.y);

	rounded_rect(ctx, x, y, NODE_SIZE.width, NODE_SIZE.height, style.corner_radius);
	let fill = if dragged { style.fill_active } else { style.fill };
	ctx.set_fill_style_str(&fill.to_css());
	ctx.fill();

	let border = if selected {
		style.border_selected
	} else {
		style.border
	};
	ctx.set_stroke_style_str(&border.to_css());
	ctx.set_line_width(style.border_width);
	ctx.stroke();

	ctx.set_fill_style_str(&style.label.to_css());
	let _ = ctx.fill_text_with_max_width(
		&node.id,
		x + NODE_SIZE.width / 2.0,
		y + NODE_SIZE.height / 2.0,
		NODE_SIZE.width - 2.0 * style.corner_radius,
	);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}
