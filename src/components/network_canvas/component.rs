use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::animation::{AnimationParameters, Resume, Ticket};
use super::interaction::Mode;
use super::render;
use super::routing_table::RouteRow;
use super::state::{ClickOutcome, NetworkState};
use super::types::{Point, TopologyData};

type SharedState = Rc<RefCell<Option<NetworkState>>>;

/// Reactive mirrors of session state shown outside the canvas.
#[derive(Clone, Copy)]
struct Ui {
	status: RwSignal<String>,
	mode: RwSignal<Mode>,
	table: RwSignal<Option<Vec<RouteRow>>>,
}

impl Ui {
	fn sync(&self, state: &NetworkState) {
		self.status.set(state.status().to_owned());
		self.mode.set(state.mode());
	}
}

#[component]
pub fn NetworkCanvas(
	#[prop(into)] data: Signal<TopologyData>,
	#[prop(default = 900.0)] width: f64,
	#[prop(default = 480.0)] height: f64,
	#[prop(optional)] animation: AnimationParameters,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let ui = Ui {
		status: RwSignal::new(String::from("Ready")),
		mode: RwSignal::new(Mode::Idle),
		table: RwSignal::new(None),
	};
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};
		let session = NetworkState::new(&data.get(), animation, width, height);
		ui.sync(&session);
		ui.table.set(None);
		*state_init.borrow_mut() = Some(session);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(point) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let outcome = {
			let mut guard = state_click.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let outcome = s.click(point);
			ui.sync(s);
			outcome
		};

		match outcome {
			ClickOutcome::Nothing => {}
			ClickOutcome::Prompt(request) => {
				// Blocks until the user answers; no borrow is held meanwhile.
				let answer = ask_string(request.label());
				with_state(&state_click, ui, |s| s.answer_prompt(answer.as_deref()));
			}
			ClickOutcome::Animate(ticket) => {
				ui.table.set(None);
				step_animation(state_click.clone(), ui, ticket);
			}
		}
	};

	let state_move = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let point = canvas_point(canvas_ref, &ev);
		if let Some(ref mut s) = *state_move.borrow_mut() {
			s.hover(point);
		}
	};

	let state_leave = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_leave.borrow_mut() {
			s.hover(None);
		}
	};

	let state_node = state.clone();
	let on_add_node =
		move |_: MouseEvent| with_state(&state_node, ui, |s| s.toggle_mode(Mode::AddNode));
	let state_edge = state.clone();
	let on_add_edge =
		move |_: MouseEvent| with_state(&state_edge, ui, |s| s.toggle_mode(Mode::AddEdge));
	let state_sim = state.clone();
	let on_simulate =
		move |_: MouseEvent| with_state(&state_sim, ui, |s| s.toggle_mode(Mode::Simulate));

	let state_table = state.clone();
	let on_show_table = move |_: MouseEvent| {
		let rows = state_table
			.borrow()
			.as_ref()
			.map(NetworkState::routing_table);
		match rows {
			Some(Ok(rows)) => ui.table.set(Some(rows)),
			Some(Err(err)) => {
				ui.table.set(None);
				alert(&err.to_string());
			}
			None => {}
		}
	};

	let state_clear = state.clone();
	let on_clear = move |_: MouseEvent| {
		with_state(&state_clear, ui, NetworkState::clear);
		ui.table.set(None);
	};

	view! {
		<div class="network-canvas">
			<div class="toolbar">
				<button
					class:active=move || ui.mode.get() == Mode::AddNode
					on:click=on_add_node
				>
					"Add Node"
				</button>
				<button
					class:active=move || ui.mode.get() == Mode::AddEdge
					on:click=on_add_edge
				>
					"Add Edge"
				</button>
				<button
					class:active=move || ui.mode.get() == Mode::Simulate
					on:click=on_simulate
				>
					"Simulate"
				</button>
				<button on:click=on_show_table>"Routing Table"</button>
				<button on:click=on_clear>"Clear"</button>
			</div>
			<canvas
				node_ref=canvas_ref
				class="network-canvas-surface"
				on:click=on_click
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block; cursor: crosshair;"
			/>
			<p class="status">{move || ui.status.get()}</p>
			{move || {
				ui.table
					.get()
					.map(|rows| {
						view! {
							<table class="routing-table">
								<thead>
									<tr>
										<th>"Hop"</th>
										<th>"From"</th>
										<th>"To"</th>
										<th>"Cost"</th>
									</tr>
								</thead>
								<tbody>
									{rows
										.into_iter()
										.map(|row| {
											let weight = row.weight_label();
											view! {
												<tr>
													<td>{row.hop}</td>
													<td>{row.from}</td>
													<td>{row.to}</td>
													<td>{weight}</td>
												</tr>
											}
										})
										.collect_view()}
								</tbody>
							</table>
						}
					})
			}}
		</div>
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn with_state(state: &SharedState, ui: Ui, f: impl FnOnce(&mut NetworkState)) {
	if let Some(ref mut s) = *state.borrow_mut() {
		f(s);
		ui.sync(s);
	}
}

fn ask_string(label: &str) -> Option<String> {
	web_sys::window()?.prompt_with_message(label).ok().flatten()
}

fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

/// Resumes the run identified by `ticket` and books its next step. A ticket
/// that was superseded in the meantime stops here.
fn step_animation(state: SharedState, ui: Ui, ticket: Ticket) {
	let resume = {
		let mut guard = state.borrow_mut();
		let Some(s) = guard.as_mut() else {
			return;
		};
		let resume = s.advance_animation(ticket);
		ui.sync(s);
		resume
	};
	if let Some(resume) = resume {
		schedule(state, ui, ticket, resume);
	}
}

fn schedule(state: SharedState, ui: Ui, ticket: Ticket, resume: Resume) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let callback = Closure::once_into_js(move || step_animation(state, ui, ticket));
	let scheduled = match resume {
		Resume::NextFrame => window
			.request_animation_frame(callback.unchecked_ref())
			.map(drop),
		Resume::After(delay) => {
			debug!("settling for {:?}", delay);
			window
				.set_timeout_with_callback_and_timeout_and_arguments_0(
					callback.unchecked_ref(),
					i32::try_from(delay.as_millis()).unwrap_or(i32::MAX),
				)
				.map(drop)
		}
	};
	if scheduled.is_err() {
		warn!("could not schedule animation step for {:?}", ticket);
	}
}
