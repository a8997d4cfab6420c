use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::projection::{Orthographic, angular_distance, great_circle};
use super::state::GlobeState;
use super::types::PointStatus;

const GRATICULE_STEP: f64 = 15.0;
/// Dash and gap as fractions of each arc's length.
const ARC_DASH: f64 = 0.4;
const ARC_GAP: f64 = 0.1;
/// Seconds per dash cycle.
const ARC_DASH_CYCLE: f64 = 1.0;

pub fn render(state: &GlobeState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#05070f");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	let proj = state.projection();
	draw_sphere(&proj, ctx);
	draw_graticule(&proj, ctx);
	draw_arcs(state, &proj, ctx);
	draw_points(state, &proj, ctx);
}

fn draw_sphere(proj: &Orthographic, ctx: &CanvasRenderingContext2d) {
	if let Ok(gradient) = ctx.create_radial_gradient(
		proj.cx - proj.radius * 0.3,
		proj.cy - proj.radius * 0.3,
		proj.radius * 0.1,
		proj.cx,
		proj.cy,
		proj.radius,
	) {
		let _ = gradient.add_color_stop(0.0, "#1b2a4a");
		let _ = gradient.add_color_stop(1.0, "#0a1226");
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	}
	ctx.begin_path();
	let _ = ctx.arc(proj.cx, proj.cy, proj.radius, 0.0, 2.0 * PI);
	ctx.fill();
	ctx.set_stroke_style_str("rgba(120, 160, 255, 0.35)");
	ctx.set_line_width(1.0);
	ctx.stroke();
}

/// Strokes a projected polyline, breaking it where it crosses to the far side.
fn stroke_path(
	points: impl IntoIterator<Item = (f64, f64)>,
	proj: &Orthographic,
	ctx: &CanvasRenderingContext2d,
) {
	let mut pen_down = false;
	ctx.begin_path();
	for (lat, lng) in points {
		match proj.project(lat, lng) {
			Some((x, y)) if pen_down => ctx.line_to(x, y),
			Some((x, y)) => {
				ctx.move_to(x, y);
				pen_down = true;
			}
			None => pen_down = false,
		}
	}
	ctx.stroke();
}

fn draw_graticule(proj: &Orthographic, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str("rgba(120, 160, 255, 0.12)");
	ctx.set_line_width(0.8);

	let mut lng = -180.0;
	while lng < 180.0 {
		stroke_path((-80..=80).map(|lat| (lat as f64, lng)), proj, ctx);
		lng += GRATICULE_STEP;
	}
	let mut lat = -75.0;
	while lat <= 75.0 {
		stroke_path((-180..=180).step_by(2).map(|lng| (lat, lng as f64)), proj, ctx);
		lat += GRATICULE_STEP;
	}
}

fn draw_arcs(state: &GlobeState, proj: &Orthographic, ctx: &CanvasRenderingContext2d) {
	let nodes = &state.snapshot.points;
	let phase = (state.flow_time / ARC_DASH_CYCLE).fract();

	ctx.set_line_width(2.0);
	ctx.set_stroke_style_str(&format!("rgba({}, 0.9)", state.config.arc_color));
	for edge in &state.snapshot.edges {
		let (Some(a), Some(b)) = (nodes.get(edge.source), nodes.get(edge.target)) else {
			continue;
		};
		let (from, to) = ((a.node.lat, a.node.lng), (b.node.lat, b.node.lng));
		let segments = (angular_distance(from, to) / 1.5).ceil().max(8.0) as usize;
		let path = great_circle(from, to, segments);

		// Dash lengths are relative to the arc's projected length.
		let length: f64 = path
			.windows(2)
			.filter_map(|w| Some((proj.project(w[0].0, w[0].1)?, proj.project(w[1].0, w[1].1)?)))
			.map(|((x1, y1), (x2, y2))| ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt())
			.sum();
		if length < 0.001 {
			continue;
		}
		let (dash, gap) = (ARC_DASH * length, ARC_GAP * length);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(-phase * (dash + gap));
		stroke_path(path, proj, ctx);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_points(state: &GlobeState, proj: &Orthographic, ctx: &CanvasRenderingContext2d) {
	let cfg = &state.config;
	let pulse = 0.5 + 0.5 * (state.flow_time * 2.0 * PI).sin();

	for (i, point) in state.snapshot.points.iter().enumerate() {
		let Some((x, y)) = proj.project(point.node.lat, point.node.lng) else {
			continue;
		};
		let (radius, color) = match point.status {
			PointStatus::Unvisited => (cfg.unvisited_radius, cfg.unvisited_color.as_str()),
			PointStatus::Visited | PointStatus::Active => {
				(cfg.visited_radius, cfg.visited_color.as_str())
			}
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		if point.status == PointStatus::Active {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 3.0 + 3.0 * pulse, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.4 + 0.4 * pulse));
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let show_label = state.hover == Some(i) || point.status != PointStatus::Unvisited;
		if show_label {
			let alpha = if state.hover == Some(i) { 1.0 } else { 0.7 };
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
			ctx.set_font("11px sans-serif");
			let _ = ctx.fill_text(&point.node.label(), x + radius + 4.0, y + 4.0);
		}
	}
}
