//! Network route canvas: draw a small weighted topology, then watch a packet
//! follow the shortest route between two routers.
//!
//! `/` renders the topology editor seeded with routers A-G; every other path
//! falls through to the 404 page.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Route status lines and debug traces to the browser console, and report
/// panics there too.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("network route canvas starting");
}

/// App router: the topology editor on `/`, a 404 page elsewhere.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />

		<Title text="Network Route Canvas" />

		<Meta charset="UTF-8" />
		<Meta name="description" content="Build a router topology and animate shortest-path packet routing." />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
