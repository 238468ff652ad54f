use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{MARKER_RADIUS, NODE_RADIUS, NetworkState};
use super::types::Point;

const BACKGROUND: &str = "#0d1117";
const EDGE_COLOR: &str = "#58a6ff";
const LABEL_COLOR: &str = "#aaaaaa";
const ROUTER_COLOR: &str = "#ff7b72";
const NODE_COLOR: &str = "#238636";
const HOVER_COLOR: &str = "#1f6feb";
const SELECTED_RING: &str = "#f0b429";
const HOP_COLOR: &str = "yellow";
const PACKET_COLOR: &str = "cyan";

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_routers(state, ctx);
	draw_nodes(state, ctx);
	draw_packet(state, ctx);
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(EDGE_COLOR);
	ctx.set_line_width(2.0);
	ctx.set_font("12px Arial");

	for edge in state.graph.edges() {
		let (Some(n1), Some(n2)) = (state.graph.node(edge.a), state.graph.node(edge.b)) else {
			continue;
		};
		let (p1, p2) = (n1.position, n2.position);
		ctx.begin_path();
		ctx.move_to(p1.x, p1.y);
		ctx.line_to(p2.x, p2.y);
		ctx.stroke();

		let mid = p1.midpoint(p2);
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&edge.weight.to_string(), mid.x, mid.y);
	}
}

// Small router badge floating above each node.
fn draw_routers(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(ROUTER_COLOR);
	for node in state.graph.nodes() {
		let p = node.position;
		ctx.fill_rect(p.x - 5.0, p.y - 40.0, 10.0, 10.0);
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let selection = state.interaction.selection();

	for node in state.graph.nodes() {
		let p = node.position;
		let hovered = state.hovered == Some(node.id);

		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		if hovered {
			ctx.set_fill_style_str(HOVER_COLOR);
			ctx.set_shadow_color(EDGE_COLOR);
			ctx.set_shadow_blur(20.0);
		} else {
			ctx.set_fill_style_str(NODE_COLOR);
		}
		ctx.fill();
		ctx.set_shadow_blur(0.0);
		ctx.set_shadow_color("transparent");

		if selection.contains(&node.id) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, NODE_RADIUS + 4.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(SELECTED_RING);
			ctx.set_line_width(2.0);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font("bold 14px Arial");
		let _ = ctx.fill_text(&node.name, p.x - 5.0, p.y + 5.0);
	}
}

fn draw_packet(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let Some(hop) = state.active_hop() else {
		return;
	};
	let (Some(from), Some(to)) = (state.graph.node(hop.from), state.graph.node(hop.to)) else {
		return;
	};
	let (p1, p2) = (from.position, to.position);

	// Dashes drift along the hop in the direction of travel.
	let (dash, gap) = (10.0, 6.0);
	ctx.save();
	ctx.begin_path();
	ctx.move_to(p1.x, p1.y);
	ctx.line_to(p2.x, p2.y);
	ctx.set_stroke_style_str(HOP_COLOR);
	ctx.set_line_width(4.0);
	ctx.set_shadow_color("gold");
	ctx.set_shadow_blur(15.0);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));
	ctx.set_line_dash_offset(-(state.flow_time * 40.0) % (dash + gap));
	ctx.stroke();
	ctx.restore();

	let Point { x, y } = p1.lerp(p2, hop.progress);
	ctx.begin_path();
	let _ = ctx.arc(x, y, MARKER_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(PACKET_COLOR);
	ctx.fill();
}
