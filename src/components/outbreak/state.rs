use super::projection::Orthographic;
use super::types::{SimulationConfig, Snapshot};

pub const HIT_RADIUS: f64 = 10.0;
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 8.0;
/// Degrees of rotation per pixel dragged at zoom 1.
const DRAG_SPEED: f64 = 0.25;

/// Point of view: the lat/lng under the disc centre and a zoom factor.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub lat: f64,
	pub lng: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		// Continental US
		Self {
			lat: 39.6,
			lng: -98.5,
			k: 1.6,
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub view_start_lat: f64,
	pub view_start_lng: f64,
}

pub struct GlobeState {
	pub config: SimulationConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub hover: Option<usize>,
	pub snapshot: Snapshot,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl GlobeState {
	pub fn new(config: SimulationConfig, snapshot: Snapshot, width: f64, height: f64) -> Self {
		Self {
			config,
			transform: ViewTransform::default(),
			drag: DragState::default(),
			hover: None,
			snapshot,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn projection(&self) -> Orthographic {
		Orthographic {
			lat0: self.transform.lat,
			lng0: self.transform.lng,
			radius: self.width.min(self.height) * 0.45 * self.transform.k,
			cx: self.width / 2.0,
			cy: self.height / 2.0,
		}
	}

	/// Index of the visible point under the cursor, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let proj = self.projection();
		self.snapshot
			.points
			.iter()
			.enumerate()
			.filter_map(|(i, p)| {
				let (x, y) = proj.project(p.node.lat, p.node.lng)?;
				let d = ((x - sx).powi(2) + (y - sy).powi(2)).sqrt();
				(d < HIT_RADIUS).then_some((i, d))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(i, _)| i)
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			start_x: x,
			start_y: y,
			view_start_lat: self.transform.lat,
			view_start_lng: self.transform.lng,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		if !self.drag.active {
			return;
		}
		let speed = DRAG_SPEED / self.transform.k;
		self.transform.lng = wrap_lng(self.drag.view_start_lng - (x - self.drag.start_x) * speed);
		self.transform.lat =
			(self.drag.view_start_lat + (y - self.drag.start_y) * speed).clamp(-85.0, 85.0);
	}

	pub fn end_drag(&mut self) {
		self.drag.active = false;
	}

	pub fn zoom(&mut self, factor: f64) {
		self.transform.k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn wrap_lng(lng: f64) -> f64 {
	(lng + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::outbreak::types::{Node, PointStatus, PointView};

	fn state() -> GlobeState {
		let snapshot = Snapshot {
			points: vec![PointView {
				node: Node::new("DEN", "Denver", 39.6, -98.5),
				status: PointStatus::Unvisited,
			}],
			total: 1,
			..Snapshot::default()
		};
		GlobeState::new(SimulationConfig::default(), snapshot, 800.0, 600.0)
	}

	#[test]
	fn hit_test_finds_centre_point() {
		let s = state();
		assert_eq!(s.node_at_position(402.0, 301.0), Some(0));
		assert_eq!(s.node_at_position(450.0, 300.0), None);
	}

	#[test]
	fn drag_rotates_and_clamps() {
		let mut s = state();
		s.begin_drag(100.0, 100.0);
		s.drag_to(100.0, 10_000.0);
		assert_eq!(s.transform.lat, 85.0);
		s.drag_to(140.0, 100.0);
		assert!(s.transform.lng < -98.5);
		s.end_drag();
		let lng = s.transform.lng;
		s.drag_to(0.0, 0.0);
		assert_eq!(s.transform.lng, lng);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut s = state();
		for _ in 0..100 {
			s.zoom(1.1);
		}
		assert_eq!(s.transform.k, MAX_ZOOM);
		for _ in 0..100 {
			s.zoom(0.9);
		}
		assert_eq!(s.transform.k, MIN_ZOOM);
	}

	#[test]
	fn longitude_wraps() {
		assert_eq!(wrap_lng(190.0), -170.0);
		assert_eq!(wrap_lng(-190.0), 170.0);
		assert_eq!(wrap_lng(0.0), 0.0);
	}
}
