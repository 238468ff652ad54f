use log::{debug, info};

use super::animation::{AnimationController, AnimationParameters, HopFrame, Resume, Step, Ticket};
use super::error::{PathError, RoutingTableError};
use super::graph::GraphStore;
use super::interaction::{Answer, HIT_RADIUS, InteractionMachine, Mode, PromptRequest, Reaction};
use super::routing_table::{self, RouteRow};
use super::types::{NodeId, Path, Point, TopologyData};

pub const NODE_RADIUS: f64 = 20.0;
pub const MARKER_RADIUS: f64 = 7.0;

/// What the shell has to do after a click.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
	Nothing,
	/// Ask the user, then hand the answer to [`NetworkState::answer_prompt`].
	Prompt(PromptRequest),
	/// A new run started; drive it with [`NetworkState::advance_animation`].
	Animate(Ticket),
}

/// One editing/simulation session: the topology plus everything layered on it.
pub struct NetworkState {
	pub graph: GraphStore,
	pub interaction: InteractionMachine,
	pub animation: AnimationController,
	pub hovered: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
	last_path: Path,
	status: String,
}

impl NetworkState {
	pub fn new(data: &TopologyData, params: AnimationParameters, width: f64, height: f64) -> Self {
		Self {
			graph: GraphStore::from_data(data),
			interaction: InteractionMachine::new(),
			animation: AnimationController::new(params),
			hovered: None,
			width,
			height,
			flow_time: 0.0,
			last_path: Vec::new(),
			status: String::from("Ready"),
		}
	}

	pub fn status(&self) -> &str {
		&self.status
	}

	pub fn last_path(&self) -> &[NodeId] {
		&self.last_path
	}

	pub fn mode(&self) -> Mode {
		self.interaction.mode()
	}

	fn set_status(&mut self, status: impl Into<String>) {
		self.status = status.into();
		info!("{}", self.status);
	}

	fn name(&self, id: NodeId) -> String {
		self.graph.name_of(id).unwrap_or("?").to_owned()
	}

	pub fn toggle_mode(&mut self, mode: Mode) {
		let active = self.interaction.toggle(mode);
		let status = match (mode, active == mode) {
			(Mode::AddNode, true) => "Click anywhere on canvas to add a new node",
			(Mode::AddNode, false) => "Add Node mode off",
			(Mode::AddEdge, true) => "Select two nodes to connect",
			(Mode::AddEdge, false) => "Add Edge mode off",
			(Mode::Simulate, true) => "Click two nodes to simulate routing",
			(Mode::Simulate, false) => "Simulation mode off",
			(Mode::Idle, _) => "Ready",
		};
		self.set_status(status);
	}

	pub fn hover(&mut self, point: Option<Point>) {
		self.hovered = point.and_then(|p| self.graph.find_nearest(p, HIT_RADIUS));
	}

	pub fn click(&mut self, point: Point) -> ClickOutcome {
		match self.interaction.click(&self.graph, point) {
			Reaction::Ignored => ClickOutcome::Nothing,
			Reaction::Selected(id) => {
				self.set_status(format!("Selected {}", self.name(id)));
				ClickOutcome::Nothing
			}
			Reaction::Prompt(request) => ClickOutcome::Prompt(request),
			Reaction::Route(Ok(route)) => {
				let hops = route.hop_count();
				self.last_path = route.nodes.clone();
				let ticket = self.animation.start(route.nodes);
				self.set_status(format!(
					"Routing simulation started: {} hops, cost {}",
					hops, route.cost
				));
				ClickOutcome::Animate(ticket)
			}
			Reaction::Route(Err(PathError::Unreachable { from, to })) => {
				self.set_status(format!(
					"No route from {} to {}",
					self.name(from),
					self.name(to)
				));
				ClickOutcome::Nothing
			}
			Reaction::Route(Err(err)) => {
				self.set_status(err.to_string());
				ClickOutcome::Nothing
			}
		}
	}

	pub fn answer_prompt(&mut self, response: Option<&str>) {
		match self.interaction.answer(&mut self.graph, response) {
			Answer::NodeAdded(id) => self.set_status(format!("Node {} added", self.name(id))),
			Answer::EdgeAdded { id, a, b } => {
				debug!("{:?} joins {} and {}", id, a, b);
				self.set_status(format!(
					"Edge added between {} and {}",
					self.name(a),
					self.name(b)
				));
			}
			Answer::Cancelled => self.set_status("Input cancelled"),
			Answer::NothingPending => {}
		}
	}

	/// Runs one animation step. `None` means the run is over or was superseded.
	pub fn advance_animation(&mut self, ticket: Ticket) -> Option<Resume> {
		match self.animation.advance(ticket) {
			Step::Frame { frame, resume } => {
				if frame.progress == 0.0 {
					self.set_status(format!(
						"Hop {}: router {} → {}",
						frame.hop + 1,
						self.name(frame.from),
						self.name(frame.to)
					));
				}
				Some(resume)
			}
			Step::Completed => {
				self.set_status("Packet reached destination!");
				None
			}
			Step::Stale => None,
		}
	}

	pub fn active_hop(&self) -> Option<HopFrame> {
		self.animation.current_frame()
	}

	pub fn routing_table(&self) -> Result<Vec<RouteRow>, RoutingTableError> {
		routing_table::project(&self.graph, &self.last_path)
	}

	/// Empties the topology and abandons any selection, prompt or run.
	pub fn clear(&mut self) {
		if self.animation.is_running() {
			debug!("clear interrupts a running simulation");
		}
		self.animation.cancel();
		self.graph.clear();
		self.interaction.reset();
		self.last_path.clear();
		self.hovered = None;
		self.set_status("Network cleared!");
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}
}
