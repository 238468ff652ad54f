use leptos::prelude::*;

use crate::components::network_canvas::{NetworkCanvas, TopologyData, TopologyLink, TopologyNode};

/// Starter topology: seven routers with a mix of cheap and expensive links.
fn sample_topology() -> TopologyData {
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
		name: name.to_string(),
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
		source: source.to_string(),
		target: target.to_string(),
		weight,
	})
	.collect();

	TopologyData { nodes, links }
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let topology = Signal::derive(sample_topology);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="route-page">
				<div class="graph-overlay">
					<h1>"Network Route Simulator"</h1>
					<p class="subtitle">
						"Add routers and links, then pick two routers to watch a packet take the cheapest route."
					</p>
				</div>
				<NetworkCanvas data=topology />
			</div>
		</ErrorBoundary>
	}
}
