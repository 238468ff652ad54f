use log::debug;

use super::error::PathError;
use super::graph::GraphStore;
use super::path::{Route, shortest_path};
use super::types::{EdgeId, NodeId, Point};

/// Click radius around a node center.
pub const HIT_RADIUS: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	Idle,
	AddNode,
	AddEdge,
	Simulate,
}

/// Input the machine is waiting for before it can finish a click.
#[derive(Clone, Debug, PartialEq)]
pub enum PromptRequest {
	NodeName { position: Point },
	EdgeWeight { a: NodeId, b: NodeId },
}

impl PromptRequest {
	pub fn label(&self) -> &'static str {
		match self {
			PromptRequest::NodeName { .. } => "Enter node name:",
			PromptRequest::EdgeWeight { .. } => "Enter edge weight:",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Reaction {
	Ignored,
	Selected(NodeId),
	Prompt(PromptRequest),
	Route(Result<Route, PathError>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
	NodeAdded(NodeId),
	EdgeAdded { id: EdgeId, a: NodeId, b: NodeId },
	Cancelled,
	NothingPending,
}

/// Interprets clicks according to the active mode.
#[derive(Debug, Default)]
pub struct InteractionMachine {
	mode: Mode,
	selection: Vec<NodeId>,
	pending: Option<PromptRequest>,
}

impl InteractionMachine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn selection(&self) -> &[NodeId] {
		&self.selection
	}

	pub fn pending(&self) -> Option<&PromptRequest> {
		self.pending.as_ref()
	}

	/// Switches `mode` on, or back to idle if it was already on.
	pub fn toggle(&mut self, mode: Mode) -> Mode {
		self.mode = if self.mode == mode { Mode::Idle } else { mode };
		self.selection.clear();
		self.pending = None;
		self.mode
	}

	/// Forgets in-progress selections and prompts; the mode stays.
	pub fn reset(&mut self) {
		self.selection.clear();
		self.pending = None;
	}

	pub fn click(&mut self, graph: &GraphStore, point: Point) -> Reaction {
		if self.pending.is_some() {
			return Reaction::Ignored;
		}
		if self.mode == Mode::AddNode {
			let request = PromptRequest::NodeName { position: point };
			self.pending = Some(request.clone());
			return Reaction::Prompt(request);
		}
		if !matches!(self.mode, Mode::AddEdge | Mode::Simulate) {
			return Reaction::Ignored;
		}

		let Some(hit) = graph.find_nearest(point, HIT_RADIUS) else {
			return Reaction::Ignored;
		};
		self.selection.push(hit);
		let &[a, b] = self.selection.as_slice() else {
			return Reaction::Selected(hit);
		};
		self.selection.clear();

		if self.mode == Mode::AddEdge {
			let request = PromptRequest::EdgeWeight { a, b };
			self.pending = Some(request.clone());
			Reaction::Prompt(request)
		} else {
			debug!("routing {} -> {}", a, b);
			Reaction::Route(shortest_path(graph, a, b))
		}
	}

	/// Completes the pending prompt. `None` or unusable text cancels it.
	pub fn answer(&mut self, graph: &mut GraphStore, response: Option<&str>) -> Answer {
		let Some(request) = self.pending.take() else {
			return Answer::NothingPending;
		};
		let Some(text) = response.map(str::trim).filter(|t| !t.is_empty()) else {
			return Answer::Cancelled;
		};

		match request {
			PromptRequest::NodeName { position } => {
				Answer::NodeAdded(graph.add_node(position, text.to_uppercase()))
			}
			PromptRequest::EdgeWeight { a, b } => {
				let Some(weight) = leading_integer(text) else {
					return Answer::Cancelled;
				};
				match graph.add_edge(a, b, weight) {
					Ok(id) => Answer::EdgeAdded { id, a, b },
					Err(_) => Answer::Cancelled,
				}
			}
		}
	}
}

/// Reads an optionally signed run of digits from the front of `text` and
/// ignores whatever follows, so `"3.5"` is 3 and `"12ms"` is 12.
fn leading_integer(text: &str) -> Option<i64> {
	let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
	let sign_len = text.len() - unsigned.len();
	let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
	if digits == 0 {
		return None;
	}
	text[..sign_len + digits].parse().ok()
}
