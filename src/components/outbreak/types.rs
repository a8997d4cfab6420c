use std::time::Duration;

/// A labeled geographic point the outbreak can reach.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub code: String,
	pub name: String,
	pub lat: f64,
	pub lng: f64,
}

impl Node {
	pub fn new(code: &str, name: &str, lat: f64, lng: f64) -> Self {
		Self {
			code: code.into(),
			name: name.into(),
			lat,
			lng,
		}
	}

	/// `CODE (City)`, as shown in labels and the affected list.
	pub fn label(&self) -> String {
		format!("{} ({})", self.code, self.name)
	}
}

/// One transmission hop, stored as indices into the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: usize,
	pub target: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
	#[default]
	Idle,
	Running,
	Paused,
	Completed,
}

impl RunState {
	pub fn as_str(self) -> &'static str {
		match self {
			RunState::Idle => "idle",
			RunState::Running => "running",
			RunState::Paused => "paused",
			RunState::Completed => "completed",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointStatus {
	Unvisited,
	Visited,
	/// The node the outbreak will spread from next.
	Active,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointView {
	pub node: Node,
	pub status: PointStatus,
}

/// Read-only view of a run, published after every control operation and step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
	pub points: Vec<PointView>,
	pub edges: Vec<Edge>,
	pub visited: Vec<Node>,
	pub total: usize,
	pub state: RunState,
	pub outbreak: Option<String>,
	pub error: Option<String>,
}

impl Snapshot {
	pub fn visited_count(&self) -> usize {
		self.visited.len()
	}
}

/// Tunables for the outbreak view.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
	pub nodes: Vec<Node>,
	pub period: Duration,
	pub visited_color: String,
	pub unvisited_color: String,
	pub arc_color: String,
	pub visited_radius: f64,
	pub unvisited_radius: f64,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			nodes: super::data::airports(),
			period: Duration::from_millis(3000),
			visited_color: "red".into(),
			unvisited_color: "yellow".into(),
			arc_color: "255, 221, 0".into(),
			visited_radius: 6.0,
			unvisited_radius: 3.0,
		}
	}
}
