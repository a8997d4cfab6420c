use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent,
	Window,
};

use super::render;
use super::state::GlobeState;
use super::stepper::{Control, Stepper, Ticker};
use super::timer::IntervalTicker;
use super::types::{RunState, SimulationConfig, Snapshot};

type SharedStepper = Rc<RefCell<Stepper<IntervalTicker>>>;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn send<T: Ticker>(stepper: &RefCell<Stepper<T>>, control: Control) {
	if let Err(e) = stepper.borrow_mut().apply(control) {
		warn!("{:?} ended the run: {}", control, e);
	}
}

/// Like `send`, for window-level listeners that must not keep the stepper
/// alive. Returns false once the stepper is gone.
fn send_weak<T: Ticker>(stepper: &Weak<RefCell<Stepper<T>>>, control: Control) -> bool {
	match stepper.upgrade() {
		Some(stepper) => {
			send(&*stepper, control);
			true
		}
		None => false,
	}
}

/// Keyboard shortcuts: space toggles the run, `r` resets it.
fn shortcut(ev: &KeyboardEvent) -> Option<Control> {
	let typing = ev
		.target()
		.and_then(|t| t.dyn_into::<Element>().ok())
		.is_some_and(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA"));
	if typing {
		return None;
	}
	match ev.key().as_str() {
		" " => Some(Control::Toggle),
		"r" | "R" => Some(Control::Reset),
		_ => None,
	}
}

#[component]
pub fn OutbreakGlobe(
	#[prop(optional)] config: Option<SimulationConfig>,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let snapshot = RwSignal::new(Snapshot::default());
	let dashboard_open = RwSignal::new(false);

	let ticker = IntervalTicker::new();
	let tick_cb = ticker.callback();
	let stepper: SharedStepper = Rc::new(RefCell::new(Stepper::new(
		config.nodes.clone(),
		config.period,
		ticker,
	)));
	let state: Rc<RefCell<Option<GlobeState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let keydown_cb: Rc<RefCell<Option<Closure<dyn FnMut(KeyboardEvent)>>>> =
		Rc::new(RefCell::new(None));

	// Every stepper change reaches both the canvas and the reactive panels.
	let state_obs = state.clone();
	stepper.borrow_mut().subscribe(move |snap| {
		if let Some(ref mut s) = *state_obs.borrow_mut() {
			s.snapshot = snap.clone();
		}
		snapshot.set(snap.clone());
	});
	snapshot.set(stepper.borrow().snapshot());

	// Weak so the interval closure does not keep the stepper alive.
	let stepper_tick = Rc::downgrade(&stepper);
	*tick_cb.borrow_mut() = Some(Closure::new(move || {
		if let Some(stepper) = stepper_tick.upgrade() {
			if let Err(e) = stepper.borrow_mut().step() {
				warn!("Outbreak halted: {}", e);
			}
		}
	}));

	let (state_init, animate_init, resize_cb_init, keydown_init, stepper_init) = (
		state.clone(),
		animate.clone(),
		resize_cb.clone(),
		keydown_cb.clone(),
		stepper.clone(),
	);
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error!("No window available");
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("2d context has unexpected type");
					return;
				}
			},
			_ => {
				error!("Canvas 2d context unavailable");
				return;
			}
		};
		*state_init.borrow_mut() = Some(GlobeState::new(
			config.clone(),
			stepper_init.borrow().snapshot(),
			w,
			h,
		));

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *state_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let stepper_key = Rc::downgrade(&stepper_init);
		*keydown_init.borrow_mut() = Some(Closure::new(move |ev: KeyboardEvent| {
			if let Some(control) = shortcut(&ev) {
				ev.prevent_default();
				send_weak(&stepper_key, control);
			}
		}));
		if let Some(ref cb) = *keydown_init.borrow() {
			let _ = window.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else {
				s.hover = s.node_at_position(x, y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.end_drag();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.hover = None;
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.zoom(if ev.delta_y() > 0.0 { 0.9 } else { 1.1 });
		}
	};

	let (st_start, st_pause, st_resume, st_reset) =
		(stepper.clone(), stepper.clone(), stepper.clone(), stepper.clone());
	let run_state = move || snapshot.with(|s| s.state);
	let shown = |visible: bool| if visible { "block" } else { "none" };

	view! {
		<canvas
			node_ref=canvas_ref
			class="outbreak-globe-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
		<div class="simulation-controls">
			<button
				id="start-simulation"
				style:display=move || shown(matches!(run_state(), RunState::Idle | RunState::Completed))
				on:click=move |_| send(&*st_start, Control::Start)
			>
				"Start Simulation"
			</button>
			<button
				id="pause-simulation"
				style:display=move || shown(run_state() == RunState::Running)
				on:click=move |_| send(&*st_pause, Control::Pause)
			>
				"Pause"
			</button>
			<button
				id="resume-simulation"
				style:display=move || shown(run_state() == RunState::Paused)
				on:click=move |_| send(&*st_resume, Control::Resume)
			>
				"Resume"
			</button>
			<button
				id="reset-simulation"
				style:display=move || shown(matches!(run_state(), RunState::Running | RunState::Paused))
				on:click=move |_| send(&*st_reset, Control::Reset)
			>
				"Reset"
			</button>
		</div>
		<button id="toggle-dashboard" on:click=move |_| dashboard_open.update(|open| *open = !*open)>
			"Dashboard"
		</button>
		<Dashboard snapshot=snapshot open=dashboard_open />
	}
}

/// Affected-airport list with counters and run status.
#[component]
fn Dashboard(#[prop(into)] snapshot: Signal<Snapshot>, #[prop(into)] open: Signal<bool>) -> impl IntoView {
	view! {
		<aside id="dashboard" class="dashboard" class:open=move || open.get()>
			<h2>
				{move || snapshot.with(|s| s.outbreak.clone().unwrap_or_else(|| "No outbreak".into()))}
			</h2>
			<p class="counter">
				{move || snapshot.with(|s| format!("{} / {} airports affected", s.visited_count(), s.total))}
			</p>
			<p class="status">{move || snapshot.with(|s| s.state.as_str())}</p>
			{move || {
				snapshot
					.with(|s| s.error.clone())
					.map(|e| view! { <p class="error">{e}</p> })
			}}
			<ul id="affected-list">
				{move || {
					snapshot.with(|s| {
						s.visited
							.iter()
							.map(|node| view! { <li>{node.label()}</li> })
							.collect_view()
					})
				}}
			</ul>
		</aside>
	}
}
