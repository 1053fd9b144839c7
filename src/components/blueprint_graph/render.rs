use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::geometry::MarkerKind;
use super::state::{BlueprintGraphState, NODE_RADIUS, RenderEdge, RenderNode};
use super::types::EdgeStyle;

const BACKGROUND: &str = "#020617";
const ARROW_SIZE: f64 = 10.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &BlueprintGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	if !state.has_data() {
		draw_no_data(state, ctx);
		return;
	}

	let transform = state.viewport.transform();
	ctx.save();
	let _ = ctx.translate(transform.x, transform.y);
	let _ = ctx.scale(transform.k, transform.k);
	let t = ease_out_cubic(state.fade.t);
	let dimming = state.has_active_highlight();
	for edge in state.edges() {
		draw_edge(ctx, &edge, t, dimming);
	}
	for node in state.nodes() {
		draw_node(ctx, &node, t, dimming);
	}
	ctx.restore();
}

fn draw_no_data(state: &BlueprintGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(191, 219, 254, 0.8)");
	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(
		"No data to visualize",
		state.width / 2.0,
		state.height / 2.0,
	);
}

fn draw_edge(ctx: &CanvasRenderingContext2d, edge: &RenderEdge<'_>, t: f64, dimming: bool) {
	let curve = &edge.geometry.curve;
	let marker = &edge.geometry.marker;

	// t=0: every edge at base alpha; t=1: lit edges brighten, the rest dim
	let (alpha, width) = match (dimming, edge.lit) {
		(true, true) => (0.7 + 0.3 * t, 2.0 * (1.0 + 0.5 * t)),
		(true, false) => (0.7 - 0.5 * t, 2.0 * (1.0 - 0.3 * t)),
		(false, _) => (0.7, 2.0),
	};
	let rgb = match edge.style {
		EdgeStyle::Solid => "147, 197, 253",
		EdgeStyle::Dashed => "96, 165, 250",
	};
	let stroke = format!("rgba({rgb}, {alpha})");

	ctx.set_stroke_style_str(&stroke);
	ctx.set_line_width(width);
	let dash = match edge.style {
		EdgeStyle::Solid => js_sys::Array::new(),
		EdgeStyle::Dashed => js_sys::Array::of2(&JsValue::from_f64(6.0), &JsValue::from_f64(6.0)),
	};
	let _ = ctx.set_line_dash(&dash);
	ctx.begin_path();
	ctx.move_to(curve.start.x, curve.start.y);
	ctx.quadratic_curve_to(curve.control.x, curve.control.y, curve.end.x, curve.end.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	// Arrowhead sits on the rim of the target node.
	let dir = marker.direction;
	let tip = marker.tip - dir * NODE_RADIUS;
	let back = tip - dir * ARROW_SIZE;
	let (px, py) = (-dir.y * ARROW_SIZE * 0.5, dir.x * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back.x + px, back.y + py);
	ctx.line_to(back.x - px, back.y - py);
	ctx.close_path();
	match marker.kind {
		MarkerKind::Filled => {
			ctx.set_fill_style_str(&stroke);
			ctx.fill();
		}
		MarkerKind::Open => {
			ctx.set_fill_style_str(BACKGROUND);
			ctx.fill();
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}

	if let (Some(label), Some(anchor)) = (edge.label, edge.geometry.label_anchor) {
		ctx.set_fill_style_str(&format!("rgba(191, 219, 254, {})", alpha.max(0.35)));
		ctx.set_font("11px sans-serif");
		ctx.set_text_align("center");
		ctx.set_text_baseline("alphabetic");
		let _ = ctx.fill_text(label, anchor.x, anchor.y - 6.0);
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, node: &RenderNode<'_>, t: f64, dimming: bool) {
	let (x, y) = (node.x, node.y);
	let alpha = if dimming && !node.lit { 1.0 - 0.6 * t } else { 1.0 };

	if dimming && node.lit && t > 0.01 {
		let glow_radius = NODE_RADIUS * (1.3 + 0.5 * t);
		if let Ok(gradient) = ctx.create_radial_gradient(x, y, NODE_RADIUS * 0.5, x, y, glow_radius)
		{
			let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", 0.35 * t));
			let _ = gradient.add_color_stop(0.6, &format!("rgba(186, 230, 253, {})", 0.1 * t));
			let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
			ctx.begin_path();
			let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
			ctx.fill();
		}
	}

	for (radius, opacity) in [(NODE_RADIUS + 4.0, 0.2), (NODE_RADIUS + 2.0, 0.35)] {
		ctx.set_global_alpha(alpha * opacity);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
	}
	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(node.color);
	ctx.fill();

	if node.highlighted && t > 0.01 {
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS + 3.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
		ctx.set_line_width(1.5);
		ctx.stroke();
	}

	ctx.set_fill_style_str("white");
	ctx.set_font("600 12px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(node.label, x, y);

	if let Some(group) = node.group {
		ctx.set_fill_style_str("rgba(191, 219, 254, 0.8)");
		ctx.set_font("10px sans-serif");
		let _ = ctx.fill_text(group, x, y + NODE_RADIUS + 12.0);
	}
	ctx.set_global_alpha(1.0);
}
