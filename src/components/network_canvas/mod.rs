mod animation;
mod component;
mod error;
mod graph;
mod interaction;
mod path;
mod render;
mod routing_table;
mod state;
mod types;

pub use component::NetworkCanvas;
pub use types::{TopologyData, TopologyLink, TopologyNode};
