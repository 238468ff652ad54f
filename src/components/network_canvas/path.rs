//! Single-source shortest paths over the undirected topology.
//!
//! Plain O(V²) Dijkstra: graphs drawn by hand stay small, so the minimum is
//! found with a linear scan instead of a heap. Scanning in id order also
//! gives the tie-break rule for free: among equally distant candidates the
//! lowest id is settled first.
//!
//! Edge weights must be non-negative. Negative weights are not detected and
//! produce unspecified (but terminating) results.

use log::debug;

use super::error::PathError;
use super::graph::GraphStore;
use super::types::{NodeId, Path};

/// A computed path and its summed edge weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
	pub nodes: Path,
	pub cost: i64,
}

impl Route {
	pub fn hop_count(&self) -> usize {
		self.nodes.len().saturating_sub(1)
	}
}

pub fn shortest_path(graph: &GraphStore, source: NodeId, dest: NodeId) -> Result<Route, PathError> {
	let src = graph.index_of(source).ok_or(PathError::UnknownNode(source))?;
	let dst = graph.index_of(dest).ok_or(PathError::UnknownNode(dest))?;
	if src == dst {
		return Ok(Route {
			nodes: vec![source],
			cost: 0,
		});
	}

	let n = graph.len();
	let mut adjacency: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
	for edge in graph.edges() {
		// add_edge only accepts live endpoints
		let (Some(a), Some(b)) = (graph.index_of(edge.a), graph.index_of(edge.b)) else {
			continue;
		};
		adjacency[a].push((b, edge.weight));
		adjacency[b].push((a, edge.weight));
	}

	let mut dist: Vec<Option<i64>> = vec![None; n];
	let mut prev: Vec<Option<usize>> = vec![None; n];
	let mut visited = vec![false; n];
	dist[src] = Some(0);

	loop {
		let mut next: Option<(usize, i64)> = None;
		for (i, d) in dist.iter().enumerate() {
			if visited[i] {
				continue;
			}
			if let Some(d) = *d {
				if next.is_none_or(|(_, best)| d < best) {
					next = Some((i, d));
				}
			}
		}
		let Some((u, du)) = next else {
			break;
		};
		visited[u] = true;
		if u == dst {
			break;
		}

		for &(v, w) in &adjacency[u] {
			if visited[v] {
				continue;
			}
			let candidate = du.saturating_add(w);
			if dist[v].is_none_or(|dv| candidate < dv) {
				dist[v] = Some(candidate);
				prev[v] = Some(u);
			}
		}
	}

	let Some(cost) = dist[dst] else {
		debug!("{} unreachable from {}", dest, source);
		return Err(PathError::Unreachable {
			from: source,
			to: dest,
		});
	};

	// Every predecessor was settled before its successor, so the walk ends at
	// `src` within n steps. A missing link before that means the chain is
	// broken and is reported rather than returned half-built.
	let nodes = graph.nodes();
	let mut path = vec![dest];
	let mut at = dst;
	while at != src {
		match prev[at] {
			Some(p) if path.len() <= n => {
				path.push(nodes[p].id);
				at = p;
			}
			_ => {
				return Err(PathError::Unreachable {
					from: source,
					to: dest,
				});
			}
		}
	}
	path.reverse();

	debug!("route {} -> {}: {} hops, cost {}", source, dest, path.len() - 1, cost);
	Ok(Route { nodes: path, cost })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_canvas::graph::fixtures::{id, seed_graph};
	use crate::components::network_canvas::types::Point;

	fn names(graph: &GraphStore, path: &[NodeId]) -> Vec<String> {
		path.iter()
			.map(|&n| graph.name_of(n).unwrap().to_owned())
			.collect()
	}

	fn summed_weight(graph: &GraphStore, path: &[NodeId]) -> i64 {
		path.windows(2)
			.map(|pair| {
				graph
					.edges()
					.iter()
					.filter(|e| e.connects(pair[0], pair[1]))
					.map(|e| e.weight)
					.min()
					.unwrap()
			})
			.sum()
	}

	#[test]
	fn seed_topology_a_to_g() {
		let graph = seed_graph();
		let route = shortest_path(&graph, id(&graph, "A"), id(&graph, "G")).unwrap();
		assert_eq!(names(&graph, &route.nodes), ["A", "D", "E", "C", "F", "G"]);
		assert_eq!(route.cost, 11);
		assert_eq!(summed_weight(&graph, &route.nodes), 11);
		assert_eq!(route.hop_count(), 5);
	}

	#[test]
	fn edges_are_traversed_both_ways() {
		let graph = seed_graph();
		let route = shortest_path(&graph, id(&graph, "G"), id(&graph, "A")).unwrap();
		assert_eq!(names(&graph, &route.nodes), ["G", "F", "C", "E", "D", "A"]);
		assert_eq!(route.cost, 11);
	}

	#[test]
	fn every_pair_in_seed_is_optimal() {
		// Floyd-Warshall as an independent reference.
		let graph = seed_graph();
		let n = graph.len();
		let mut best = vec![vec![i64::MAX / 4; n]; n];
		for (i, row) in best.iter_mut().enumerate() {
			row[i] = 0;
		}
		for e in graph.edges() {
			let (a, b) = (graph.index_of(e.a).unwrap(), graph.index_of(e.b).unwrap());
			best[a][b] = best[a][b].min(e.weight);
			best[b][a] = best[b][a].min(e.weight);
		}
		for k in 0..n {
			for i in 0..n {
				for j in 0..n {
					best[i][j] = best[i][j].min(best[i][k] + best[k][j]);
				}
			}
		}

		for (i, s) in graph.nodes().iter().enumerate() {
			for (j, d) in graph.nodes().iter().enumerate() {
				let route = shortest_path(&graph, s.id, d.id).unwrap();
				assert_eq!(route.cost, best[i][j], "{} -> {}", s.name, d.name);
				assert_eq!(summed_weight(&graph, &route.nodes), best[i][j]);
				assert_eq!(route.nodes.first(), Some(&s.id));
				assert_eq!(route.nodes.last(), Some(&d.id));
			}
		}
	}

	#[test]
	fn equal_cost_routes_prefer_lower_ids() {
		let mut graph = GraphStore::new();
		let s = graph.add_node(Point::default(), "S");
		let low = graph.add_node(Point::default(), "L");
		let high = graph.add_node(Point::default(), "H");
		let d = graph.add_node(Point::default(), "D");
		graph.add_edge(s, high, 1).unwrap();
		graph.add_edge(high, d, 1).unwrap();
		graph.add_edge(s, low, 1).unwrap();
		graph.add_edge(low, d, 1).unwrap();

		let route = shortest_path(&graph, s, d).unwrap();
		assert_eq!(route.nodes, vec![s, low, d]);
	}

	#[test]
	fn same_source_and_dest() {
		let graph = seed_graph();
		let a = id(&graph, "A");
		let route = shortest_path(&graph, a, a).unwrap();
		assert_eq!(route.nodes, vec![a]);
		assert_eq!(route.cost, 0);
	}

	#[test]
	fn disconnected_dest_is_unreachable() {
		let mut graph = seed_graph();
		let a = id(&graph, "A");
		let island = graph.add_node(Point::new(900.0, 400.0), "X");
		assert_eq!(
			shortest_path(&graph, a, island),
			Err(PathError::Unreachable { from: a, to: island })
		);
	}

	#[test]
	fn parallel_edges_use_the_cheapest() {
		let mut graph = GraphStore::new();
		let a = graph.add_node(Point::default(), "A");
		let b = graph.add_node(Point::default(), "B");
		graph.add_edge(a, b, 9).unwrap();
		graph.add_edge(b, a, 2).unwrap();
		assert_eq!(shortest_path(&graph, a, b).unwrap().cost, 2);
	}

	#[test]
	fn unknown_nodes_and_cleared_graph() {
		let mut graph = seed_graph();
		let a = id(&graph, "A");
		let g = id(&graph, "G");
		graph.clear();
		assert_eq!(shortest_path(&graph, a, g), Err(PathError::UnknownNode(a)));
	}
}
