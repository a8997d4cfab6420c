//! Outbreak stepper: walks a closed set of nodes in circular index order,
//! one hop per timer tick.

use std::time::Duration;

use log::{debug, error, info};
use thiserror::Error;

use super::data::disease_name;
use super::types::{Edge, Node, PointStatus, PointView, RunState, Snapshot};

/// Source of a recurring trigger. Dropping the returned handle disarms it.
pub trait Ticker {
	type Handle;

	fn arm(&self, period: Duration) -> Self::Handle;
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StepperError {
	#[error("no unvisited node found after {from}: scan looped back")]
	LoopedBack { from: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
	/// A new hop was added.
	Advanced(Edge),
	/// Every node was already visited; the run is over.
	Completed,
	/// The stepper was not running.
	Ignored,
}

/// User-facing controls, as bound to buttons and keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
	Start,
	Pause,
	Resume,
	Reset,
	/// Start, pause or resume depending on the current state.
	Toggle,
}

type Observer = Box<dyn FnMut(&Snapshot)>;

pub struct Stepper<T: Ticker> {
	nodes: Vec<Node>,
	period: Duration,
	ticker: T,
	timer: Option<T::Handle>,
	state: RunState,
	seen: Vec<bool>,
	visited: Vec<usize>,
	edges: Vec<Edge>,
	current: Option<usize>,
	runs: usize,
	outbreak: Option<String>,
	error: Option<StepperError>,
	observer: Option<Observer>,
}

impl<T: Ticker> Stepper<T> {
	pub fn new(nodes: Vec<Node>, period: Duration, ticker: T) -> Self {
		let seen = vec![false; nodes.len()];
		Self {
			nodes,
			period,
			ticker,
			timer: None,
			state: RunState::Idle,
			seen,
			visited: Vec::new(),
			edges: Vec::new(),
			current: None,
			runs: 0,
			outbreak: None,
			error: None,
			observer: None,
		}
	}

	/// Registers the callback that receives a snapshot after every change.
	pub fn subscribe(&mut self, observer: impl FnMut(&Snapshot) + 'static) {
		self.observer = Some(Box::new(observer));
	}

	/// Begins a fresh run from the first node and steps once immediately.
	pub fn start(&mut self) -> Result<StepOutcome, StepperError> {
		if self.state == RunState::Running || self.nodes.is_empty() {
			return Ok(StepOutcome::Ignored);
		}
		self.clear();
		self.runs += 1;
		let name = disease_name(self.runs);
		info!("Starting outbreak {} ({} nodes)", name, self.nodes.len());
		self.outbreak = Some(name);

		self.seen[0] = true;
		self.visited.push(0);
		self.current = Some(0);
		self.state = RunState::Running;
		self.notify();

		let outcome = self.step();
		// The first step may already finish a single-node run.
		if self.state == RunState::Running {
			self.timer = Some(self.ticker.arm(self.period));
		}
		outcome
	}

	/// Advances the outbreak by one hop.
	pub fn step(&mut self) -> Result<StepOutcome, StepperError> {
		if self.state != RunState::Running {
			return Ok(StepOutcome::Ignored);
		}
		let Some(from) = self.current else {
			return Ok(StepOutcome::Ignored);
		};

		if self.visited.len() >= self.nodes.len() {
			info!("Outbreak complete: {} nodes reached", self.visited.len());
			self.timer = None;
			self.state = RunState::Completed;
			self.notify();
			return Ok(StepOutcome::Completed);
		}

		let Some(next) = next_unvisited(&self.seen, from) else {
			let err = StepperError::LoopedBack {
				from: self.nodes[from].code.clone(),
			};
			error!("Error finding next unaffected node: {}", err);
			self.timer = None;
			self.state = RunState::Completed;
			self.error = Some(err.clone());
			self.notify();
			return Err(err);
		};

		let edge = Edge {
			source: from,
			target: next,
		};
		debug!(
			"Spread {} -> {}",
			self.nodes[from].code, self.nodes[next].code
		);
		self.edges.push(edge);
		self.seen[next] = true;
		self.visited.push(next);
		self.current = Some(next);
		self.notify();
		Ok(StepOutcome::Advanced(edge))
	}

	pub fn pause(&mut self) {
		if self.state != RunState::Running {
			return;
		}
		info!("Simulation paused");
		self.timer = None;
		self.state = RunState::Paused;
		self.notify();
	}

	/// Re-arms the trigger; the next hop waits for the next tick.
	pub fn resume(&mut self) {
		if self.state != RunState::Paused {
			return;
		}
		info!("Simulation resumed");
		self.timer = Some(self.ticker.arm(self.period));
		self.state = RunState::Running;
		self.notify();
	}

	pub fn reset(&mut self) {
		info!("Simulation reset");
		self.clear();
		self.outbreak = None;
		self.state = RunState::Idle;
		self.notify();
	}

	pub fn apply(&mut self, control: Control) -> Result<(), StepperError> {
		match control {
			Control::Start => return self.start().map(|_| ()),
			Control::Pause => self.pause(),
			Control::Resume => self.resume(),
			Control::Reset => self.reset(),
			Control::Toggle => match self.state {
				RunState::Idle | RunState::Completed => return self.start().map(|_| ()),
				RunState::Running => self.pause(),
				RunState::Paused => self.resume(),
			},
		}
		Ok(())
	}

	fn clear(&mut self) {
		self.timer = None;
		self.seen.iter_mut().for_each(|s| *s = false);
		self.visited.clear();
		self.edges.clear();
		self.current = None;
		self.error = None;
	}

	pub fn snapshot(&self) -> Snapshot {
		let points = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, node)| PointView {
				node: node.clone(),
				status: if self.current == Some(i) && self.state != RunState::Completed {
					PointStatus::Active
				} else if self.seen[i] {
					PointStatus::Visited
				} else {
					PointStatus::Unvisited
				},
			})
			.collect();

		Snapshot {
			points,
			edges: self.edges.clone(),
			visited: self.visited.iter().map(|&i| self.nodes[i].clone()).collect(),
			total: self.nodes.len(),
			state: self.state,
			outbreak: self.outbreak.clone(),
			error: self.error.as_ref().map(|e| e.to_string()),
		}
	}

	fn notify(&mut self) {
		if self.observer.is_none() {
			return;
		}
		let snapshot = self.snapshot();
		if let Some(observer) = self.observer.as_mut() {
			observer(&snapshot);
		}
	}
}

#[cfg(test)]
impl<T: Ticker> Stepper<T> {
	fn state(&self) -> RunState {
		self.state
	}

	fn edges(&self) -> &[Edge] {
		&self.edges
	}

	fn visited(&self) -> &[usize] {
		&self.visited
	}

	fn current(&self) -> Option<usize> {
		self.current
	}

	fn is_armed(&self) -> bool {
		self.timer.is_some()
	}
}

/// First unseen index scanning circularly forward from `from + 1`.
fn next_unvisited(seen: &[bool], from: usize) -> Option<usize> {
	let len = seen.len();
	if len == 0 {
		return None;
	}
	let start = (from + 1) % len;
	let mut idx = start;
	while seen[idx] {
		idx = (idx + 1) % len;
		if idx == start {
			return None;
		}
	}
	Some(idx)
}

#[cfg(test)]
mod tests {
	use std::cell::{Cell, RefCell};
	use std::collections::HashSet;
	use std::rc::Rc;

	use super::*;

	#[derive(Clone, Default)]
	struct Counters {
		armed: Rc<Cell<usize>>,
		cancelled: Rc<Cell<usize>>,
	}

	struct ManualTicker(Counters);

	struct ManualHandle(Rc<Cell<usize>>);

	impl Drop for ManualHandle {
		fn drop(&mut self) {
			self.0.set(self.0.get() + 1);
		}
	}

	impl Ticker for ManualTicker {
		type Handle = ManualHandle;

		fn arm(&self, period: Duration) -> ManualHandle {
			assert_eq!(period, Duration::from_millis(3000));
			self.0.armed.set(self.0.armed.get() + 1);
			ManualHandle(self.0.cancelled.clone())
		}
	}

	fn nodes(codes: &[&str]) -> Vec<Node> {
		codes
			.iter()
			.enumerate()
			.map(|(i, c)| Node::new(c, c, i as f64, -(i as f64)))
			.collect()
	}

	fn stepper(codes: &[&str]) -> (Stepper<ManualTicker>, Counters) {
		let counters = Counters::default();
		let stepper = Stepper::new(
			nodes(codes),
			Duration::from_millis(3000),
			ManualTicker(counters.clone()),
		);
		(stepper, counters)
	}

	fn e(source: usize, target: usize) -> Edge {
		Edge { source, target }
	}

	#[test]
	fn three_node_walk() {
		let (mut s, counters) = stepper(&["A", "B", "C"]);

		// Start visits A then steps once right away.
		assert_eq!(s.start(), Ok(StepOutcome::Advanced(e(0, 1))));
		assert_eq!(s.visited(), &[0, 1]);
		assert_eq!(s.edges(), &[e(0, 1)]);
		assert_eq!(counters.armed.get(), 1);
		assert!(s.is_armed());

		assert_eq!(s.step(), Ok(StepOutcome::Advanced(e(1, 2))));
		assert_eq!(s.visited(), &[0, 1, 2]);
		assert_eq!(s.edges(), &[e(0, 1), e(1, 2)]);

		assert_eq!(s.step(), Ok(StepOutcome::Completed));
		assert_eq!(s.state(), RunState::Completed);
		assert_eq!(s.edges().len(), 2);
		assert!(!s.is_armed());
		assert_eq!(counters.cancelled.get(), 1);

		assert_eq!(s.step(), Ok(StepOutcome::Ignored));
		assert_eq!(s.edges().len(), 2);
	}

	#[test]
	fn full_run_visits_every_node_once() {
		for n in 1..=20 {
			let codes: Vec<String> = (0..n).map(|i| format!("N{i}")).collect();
			let refs: Vec<&str> = codes.iter().map(String::as_str).collect();
			let (mut s, _) = stepper(&refs);
			s.start().unwrap();
			while s.state() == RunState::Running {
				s.step().unwrap();
			}
			assert_eq!(s.state(), RunState::Completed);
			assert_eq!(s.visited().len(), n);
			assert_eq!(s.edges().len(), n - 1);
			let unique: HashSet<_> = s.visited().iter().collect();
			assert_eq!(unique.len(), n);
			assert!(!s.is_armed());
		}
	}

	#[test]
	fn single_node_completes_without_arming() {
		let (mut s, counters) = stepper(&["A"]);
		assert_eq!(s.start(), Ok(StepOutcome::Completed));
		assert_eq!(s.state(), RunState::Completed);
		assert_eq!(counters.armed.get(), 0);
		assert!(s.edges().is_empty());
	}

	#[test]
	fn start_with_no_nodes_stays_idle() {
		let (mut s, counters) = stepper(&[]);
		assert_eq!(s.start(), Ok(StepOutcome::Ignored));
		assert_eq!(s.state(), RunState::Idle);
		assert_eq!(counters.armed.get(), 0);
	}

	#[test]
	fn visited_is_edges_plus_one_while_active() {
		let (mut s, _) = stepper(&["A", "B", "C", "D", "E"]);
		s.start().unwrap();
		for _ in 0..3 {
			assert_eq!(s.visited().len(), s.edges().len() + 1);
			s.step().unwrap();
		}
		s.pause();
		assert_eq!(s.visited().len(), s.edges().len() + 1);
	}

	#[test]
	fn start_while_running_is_noop() {
		let (mut s, counters) = stepper(&["A", "B", "C", "D"]);
		s.start().unwrap();
		s.step().unwrap();
		assert_eq!(s.start(), Ok(StepOutcome::Ignored));
		assert_eq!(s.visited(), &[0, 1, 2]);
		assert_eq!(s.edges().len(), 2);
		assert_eq!(counters.armed.get(), 1);
		assert_eq!(counters.cancelled.get(), 0);
	}

	#[test]
	fn pause_then_reset_clears_everything() {
		let (mut s, counters) = stepper(&["A", "B", "C", "D"]);
		s.start().unwrap();
		s.step().unwrap();
		s.pause();
		assert_eq!(s.state(), RunState::Paused);
		assert_eq!(counters.cancelled.get(), 1);
		assert_eq!(s.edges().len(), 2);

		s.reset();
		assert_eq!(s.state(), RunState::Idle);
		assert!(s.visited().is_empty());
		assert!(s.edges().is_empty());
		assert_eq!(s.current(), None);
		assert!(!s.is_armed());
	}

	#[test]
	fn resume_rearms_without_stepping() {
		let (mut s, counters) = stepper(&["A", "B", "C", "D"]);
		s.start().unwrap();
		s.pause();
		let edges = s.edges().len();

		s.resume();
		assert_eq!(s.state(), RunState::Running);
		assert_eq!(s.edges().len(), edges);
		assert_eq!(counters.armed.get(), 2);
		assert!(s.is_armed());
	}

	#[test]
	fn pause_and_resume_are_noops_in_wrong_state() {
		let (mut s, counters) = stepper(&["A", "B", "C"]);
		s.pause();
		s.resume();
		assert_eq!(s.state(), RunState::Idle);

		s.start().unwrap();
		s.resume();
		assert_eq!(counters.armed.get(), 1);
		assert_eq!(s.state(), RunState::Running);

		s.step().unwrap();
		s.step().unwrap();
		assert_eq!(s.state(), RunState::Completed);
		s.pause();
		s.resume();
		assert_eq!(s.state(), RunState::Completed);
	}

	#[test]
	fn reset_from_every_state() {
		let (mut s, counters) = stepper(&["A", "B", "C"]);
		s.reset();
		assert_eq!(s.state(), RunState::Idle);

		s.start().unwrap();
		s.reset();
		assert_eq!(s.state(), RunState::Idle);
		assert!(s.edges().is_empty());

		s.start().unwrap();
		s.pause();
		s.reset();
		assert_eq!(s.state(), RunState::Idle);
		assert!(s.visited().is_empty());

		s.start().unwrap();
		while s.state() == RunState::Running {
			s.step().unwrap();
		}
		s.reset();
		assert_eq!(s.state(), RunState::Idle);
		assert!(s.visited().is_empty());
		assert!(!s.is_armed());
		assert_eq!(counters.armed.get(), counters.cancelled.get());
	}

	#[test]
	fn restart_after_completion_begins_fresh() {
		let (mut s, _) = stepper(&["A", "B"]);
		s.start().unwrap();
		s.step().unwrap();
		assert_eq!(s.state(), RunState::Completed);

		assert_eq!(s.start(), Ok(StepOutcome::Advanced(e(0, 1))));
		assert_eq!(s.visited(), &[0, 1]);
		assert_eq!(s.edges(), &[e(0, 1)]);
	}

	#[test]
	fn toggle_cycles_through_states() {
		let (mut s, counters) = stepper(&["A", "B", "C"]);
		s.apply(Control::Toggle).unwrap();
		assert_eq!(s.state(), RunState::Running);
		s.apply(Control::Toggle).unwrap();
		assert_eq!(s.state(), RunState::Paused);
		s.apply(Control::Toggle).unwrap();
		assert_eq!(s.state(), RunState::Running);
		assert_eq!(counters.armed.get(), 2);
		assert_eq!(s.edges().len(), 1);

		s.step().unwrap();
		s.step().unwrap();
		assert_eq!(s.state(), RunState::Completed);
		s.apply(Control::Toggle).unwrap();
		assert_eq!(s.state(), RunState::Running);
		assert_eq!(s.edges().len(), 1);

		s.apply(Control::Reset).unwrap();
		assert_eq!(s.state(), RunState::Idle);
	}

	#[test]
	fn scan_wraps_and_skips_seen() {
		assert_eq!(next_unvisited(&[true, false, true, true], 2), Some(1));
		assert_eq!(next_unvisited(&[false, true, true], 2), Some(0));
		assert_eq!(next_unvisited(&[true, true, false, false], 0), Some(2));
		assert_eq!(next_unvisited(&[true, true, true], 1), None);
		assert_eq!(next_unvisited(&[], 0), None);
	}

	#[test]
	fn looped_back_scan_halts_run_and_reports() {
		let (mut s, counters) = stepper(&["A", "B", "C", "D"]);
		let last = Rc::new(RefCell::new(None));
		let log = last.clone();
		s.subscribe(move |snap| *log.borrow_mut() = Some((snap.state, snap.error.clone())));

		s.start().unwrap();
		// Only reachable if the visited flags drift from the visited list.
		s.seen.iter_mut().for_each(|seen| *seen = true);

		assert_eq!(
			s.step(),
			Err(StepperError::LoopedBack { from: "B".into() })
		);
		assert_eq!(s.state(), RunState::Completed);
		assert!(!s.is_armed());
		assert_eq!(counters.cancelled.get(), 1);
		assert_eq!(s.edges().len(), 1);
		let (state, error) = last.borrow().clone().unwrap();
		assert_eq!(state, RunState::Completed);
		assert!(error.unwrap().contains("looped back"));

		s.start().unwrap();
		assert_eq!(s.snapshot().error, None);
		s.seen.iter_mut().for_each(|seen| *seen = true);
		assert!(s.step().is_err());
		s.reset();
		assert_eq!(s.snapshot().error, None);
		assert_eq!(last.borrow().clone(), Some((RunState::Idle, None)));
	}

	#[test]
	fn observer_sees_each_change() {
		let (mut s, _) = stepper(&["A", "B", "C"]);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let log = seen.clone();
		s.subscribe(move |snap| log.borrow_mut().push((snap.state, snap.edges.len())));

		s.start().unwrap();
		s.pause();
		s.resume();
		s.step().unwrap();
		s.step().unwrap();

		assert_eq!(
			*seen.borrow(),
			vec![
				(RunState::Running, 0),
				(RunState::Running, 1),
				(RunState::Paused, 1),
				(RunState::Running, 1),
				(RunState::Running, 2),
				(RunState::Completed, 2),
			]
		);
	}

	#[test]
	fn snapshot_tags_points() {
		let (mut s, _) = stepper(&["A", "B", "C"]);
		s.start().unwrap();
		let snap = s.snapshot();
		let status: Vec<_> = snap.points.iter().map(|p| p.status).collect();
		assert_eq!(
			status,
			vec![PointStatus::Visited, PointStatus::Active, PointStatus::Unvisited]
		);
		assert_eq!(snap.visited_count(), 2);
		assert_eq!(snap.total, 3);
		assert!(snap.outbreak.is_some());
		assert_eq!(snap.error, None);
	}
}
