use std::collections::HashMap;

use log::warn;

use super::error::GraphError;
use super::types::{Edge, EdgeId, Node, NodeId, Point, TopologyData};

/// Nodes and undirected edges of the topology.
///
/// Nodes are kept in insertion order, which is also ascending id order, so
/// lookups by id are a binary search.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_node: u32,
	next_edge: u32,
}

impl GraphStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_data(data: &TopologyData) -> Self {
		let mut graph = Self::new();
		let mut name_to_id = HashMap::new();

		for node in &data.nodes {
			let id = graph.add_node(Point::new(node.x, node.y), node.name.clone());
			name_to_id.entry(node.name.clone()).or_insert(id);
		}

		for link in &data.links {
			match (name_to_id.get(&link.source), name_to_id.get(&link.target)) {
				(Some(&a), Some(&b)) => {
					if let Err(err) = graph.add_edge(a, b, link.weight) {
						warn!("skipping link {} -> {}: {}", link.source, link.target, err);
					}
				}
				_ => warn!(
					"skipping link {} -> {}: unknown endpoint",
					link.source, link.target
				),
			}
		}

		graph
	}

	pub fn add_node(&mut self, position: Point, name: impl Into<String>) -> NodeId {
		let id = NodeId(self.next_node);
		self.next_node += 1;
		self.nodes.push(Node {
			id,
			position,
			name: name.into(),
		});
		id
	}

	/// Weight sign is not checked; shortest paths assume it is non-negative.
	pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: i64) -> Result<EdgeId, GraphError> {
		for end in [a, b] {
			if self.index_of(end).is_none() {
				return Err(GraphError::InvalidReference(end));
			}
		}
		let id = EdgeId(self.next_edge);
		self.next_edge += 1;
		self.edges.push(Edge { id, a, b, weight });
		Ok(id)
	}

	/// First node, in insertion order, whose center lies strictly inside
	/// `radius` of `point`. Overlapping hit areas resolve to the lowest id.
	pub fn find_nearest(&self, point: Point, radius: f64) -> Option<NodeId> {
		self.nodes
			.iter()
			.find(|n| n.position.distance(point) < radius)
			.map(|n| n.id)
	}

	/// Drops every node and edge. Ids keep counting up from where they were.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn index_of(&self, id: NodeId) -> Option<usize> {
		self.nodes.binary_search_by_key(&id, |n| n.id).ok()
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.index_of(id).map(|i| &self.nodes[i])
	}

	pub fn name_of(&self, id: NodeId) -> Option<&str> {
		self.node(id).map(|n| n.name.as_str())
	}

	/// First edge joining `a` and `b` in either orientation.
	pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&Edge> {
		self.edges.iter().find(|e| e.connects(a, b))
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
}

#[cfg(test)]
pub(crate) mod fixtures {
	use super::*;
	use crate::components::network_canvas::types::{TopologyLink, TopologyNode};

	/// Seven routers A-G with the stock link weights.
	pub fn seed_data() -> TopologyData {
		let nodes = [
			("A", 100.0, 100.0),
			("B", 300.0, 80.0),
			("C", 500.0, 150.0),
			("D", 200.0, 300.0),
			("E", 400.0, 300.0),
			("F", 650.0, 250.0),
			("G", 800.0, 150.0),
		]
		.into_iter()
		.map(|(name, x, y)| TopologyNode {
			name: name.into(),
			x,
			y,
		})
		.collect();

		let links = [
			("A", "B", 4),
			("A", "D", 2),
			("B", "C", 5),
			("B", "E", 10),
			("D", "E", 3),
			("E", "C", 2),
			("E", "F", 7),
			("C", "F", 1),
			("F", "G", 3),
		]
		.into_iter()
		.map(|(source, target, weight)| TopologyLink {
			source: source.into(),
			target: target.into(),
			weight,
		})
		.collect();

		TopologyData { nodes, links }
	}

	pub fn seed_graph() -> GraphStore {
		GraphStore::from_data(&seed_data())
	}

	pub fn id(graph: &GraphStore, name: &str) -> NodeId {
		graph
			.nodes()
			.iter()
			.find(|n| n.name == name)
			.map(|n| n.id)
			.unwrap_or_else(|| panic!("no node named {name}"))
	}
}
