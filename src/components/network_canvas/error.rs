use thiserror::Error;

use super::types::NodeId;

/// Rejected graph mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// An edge endpoint does not name a live node
	#[error("node {0} does not exist")]
	InvalidReference(NodeId),
}

/// Shortest-path failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
	/// Source or destination is not in the graph
	#[error("node {0} does not exist")]
	UnknownNode(NodeId),

	/// No chain of edges links the two nodes
	#[error("no route from {from} to {to}")]
	Unreachable { from: NodeId, to: NodeId },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingTableError {
	#[error("Run a routing simulation first!")]
	NoPathAvailable,
}
