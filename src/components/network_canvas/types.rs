use std::fmt;

/// Stable node identifier, allocated once at creation and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) u32);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}

	pub fn lerp(self, to: Point, t: f64) -> Point {
		Point::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
	}

	pub fn midpoint(self, other: Point) -> Point {
		self.lerp(other, 0.5)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub position: Point,
	pub name: String,
}

/// Undirected weighted link. `a` and `b` carry no direction.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub id: EdgeId,
	pub a: NodeId,
	pub b: NodeId,
	pub weight: i64,
}

impl Edge {
	pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
		(self.a == x && self.b == y) || (self.a == y && self.b == x)
	}
}

/// Source to destination inclusive. Empty means nothing has been routed.
pub type Path = Vec<NodeId>;

// Declarative topology used to seed a canvas, keyed by node name.

#[derive(Clone, Debug)]
pub struct TopologyNode {
	pub name: String,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug)]
pub struct TopologyLink {
	pub source: String,
	pub target: String,
	pub weight: i64,
}

#[derive(Clone, Debug, Default)]
pub struct TopologyData {
	pub nodes: Vec<TopologyNode>,
	pub links: Vec<TopologyLink>,
}
