use super::error::RoutingTableError;
use super::graph::GraphStore;
use super::types::NodeId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRow {
	pub hop: usize,
	pub from: String,
	pub to: String,
	/// `None` when the hop's edge has since disappeared.
	pub weight: Option<i64>,
}

impl RouteRow {
	pub fn weight_label(&self) -> String {
		self.weight.map_or_else(|| "?".into(), |w| w.to_string())
	}
}

/// Lists the hops of `path` against the graph as it is now. The two are not
/// kept in sync, so a hop may have lost its edge or endpoint.
pub fn project(graph: &GraphStore, path: &[NodeId]) -> Result<Vec<RouteRow>, RoutingTableError> {
	if path.is_empty() {
		return Err(RoutingTableError::NoPathAvailable);
	}
	let name = |id| graph.name_of(id).unwrap_or("?").to_owned();

	Ok(path
		.windows(2)
		.enumerate()
		.map(|(i, pair)| RouteRow {
			hop: i + 1,
			from: name(pair[0]),
			to: name(pair[1]),
			weight: graph.edge_between(pair[0], pair[1]).map(|e| e.weight),
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_canvas::graph::fixtures::{id, seed_graph};

	fn row(hop: usize, from: &str, to: &str, weight: Option<i64>) -> RouteRow {
		RouteRow {
			hop,
			from: from.into(),
			to: to.into(),
			weight,
		}
	}

	#[test]
	fn rows_for_a_d_e() {
		let graph = seed_graph();
		let path = [id(&graph, "A"), id(&graph, "D"), id(&graph, "E")];
		assert_eq!(
			project(&graph, &path).unwrap(),
			vec![row(1, "A", "D", Some(2)), row(2, "D", "E", Some(3))]
		);
	}

	#[test]
	fn reversed_hop_finds_edge() {
		let graph = seed_graph();
		let path = [id(&graph, "E"), id(&graph, "D")];
		assert_eq!(project(&graph, &path).unwrap()[0].weight, Some(3));
	}

	#[test]
	fn missing_edge_is_unknown() {
		let graph = seed_graph();
		let path = [id(&graph, "A"), id(&graph, "G")];
		let rows = project(&graph, &path).unwrap();
		assert_eq!(rows, vec![row(1, "A", "G", None)]);
		assert_eq!(rows[0].weight_label(), "?");
	}

	#[test]
	fn single_node_path_has_no_rows() {
		let graph = seed_graph();
		assert_eq!(project(&graph, &[id(&graph, "A")]).unwrap(), vec![]);
	}

	#[test]
	fn empty_path_is_an_error() {
		let graph = seed_graph();
		assert_eq!(project(&graph, &[]), Err(RoutingTableError::NoPathAvailable));
	}

	#[test]
	fn stale_path_after_clear() {
		let mut graph = seed_graph();
		let path = [id(&graph, "A"), id(&graph, "D")];
		graph.clear();
		assert_eq!(project(&graph, &path).unwrap(), vec![row(1, "?", "?", None)]);
	}
}
