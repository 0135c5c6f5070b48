//! Leptos component wrapping one particle backdrop canvas.
//!
//! The component creates an HTML canvas element, sizes its backing store
//! for the device pixel ratio, and runs an animation loop via
//! `requestAnimationFrame`: integrate, render, reschedule. The loop checks
//! a run flag at the top of every frame so component teardown halts it
//! deterministically instead of leaving a detached canvas animating.
//! Pointer and touch handlers (hero variant only) feed the engine's
//! pointer state between frames.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::engine::ParticleEngine;
use super::particles::Variant;
use super::render;
use super::theme::Theme;

/// Engine plus visual style for one mounted canvas.
struct CanvasContext {
	engine: ParticleEngine,
	theme: Theme,
}

/// Measure the canvas's CSS-pixel size.
fn measure(
	window: &Window,
	canvas: &HtmlCanvasElement,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		(
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		)
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
	}
}

/// Size the backing store for the device pixel ratio and scale the context
/// so drawing stays in CSS-pixel coordinates.
fn apply_pixel_ratio(
	window: &Window,
	canvas: &HtmlCanvasElement,
	ctx: &CanvasRenderingContext2d,
	w: f64,
	h: f64,
) {
	let dpr = window.device_pixel_ratio();
	canvas.set_width((w * dpr).floor() as u32);
	canvas.set_height((h * dpr).floor() as u32);
	let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

/// Canvas-local coordinates of a viewport-space point.
fn to_canvas_coords(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(client_x - rect.left(), client_y - rect.top())
}

/// Renders one animated particle layer on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport. Explicit `width`/`height`
/// override automatic sizing. Every instance re-measures and respawns its
/// particle store on window resize. The hero variant reacts to the
/// pointer; the ambient variant ignores it.
#[component]
pub fn ParticleCanvas(
	#[prop(default = Variant::Ambient)] variant: Variant,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let running: Rc<Cell<bool>> = Rc::new(Cell::new(false));
	let (context_init, animate_init, resize_cb_init, running_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		running.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		// Missing 2D context degrades to "no animation", never a crash.
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|obj| obj.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("particle-backdrop: no 2d context, {variant:?} layer stays static");
			return;
		};

		let (w, h) = measure(&window, &canvas, fullscreen, width, height);
		apply_pixel_ratio(&window, &canvas, &ctx, w, h);

		// Sampled once per instance; resize keeps the same answer.
		let reduced = crate::prefers_reduced_motion();
		let engine = ParticleEngine::new(variant, w, h, reduced, || js_sys::Math::random());
		debug!(
			"particle-backdrop: {variant:?} layer {}x{}, {} particles (reduced motion: {reduced})",
			w as u32,
			h as u32,
			engine.particles.len()
		);

		*context_init.borrow_mut() = Some(CanvasContext {
			engine,
			theme: Theme::default(),
		});

		// Every layer re-measures on viewport resize: fullscreen instances
		// against the window, the rest against their parent box (which a
		// window resize also reflows).
		let (context_resize, canvas_resize, ctx_resize) =
			(context_init.clone(), canvas.clone(), ctx.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = measure(&win, &canvas_resize, fullscreen, width, height);
			apply_pixel_ratio(&win, &canvas_resize, &ctx_resize, nw, nh);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				// Whole-store swap, never element-wise mutation mid-frame.
				c.engine.resize(nw, nh, || js_sys::Math::random());
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		running_init.set(true);
		let (context_anim, animate_inner, running_anim) = (
			context_init.clone(),
			animate_init.clone(),
			running_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !running_anim.get() {
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.engine.tick();
				render::render(&c.engine, &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// `on_cleanup` demands Send + Sync; SendWrapper is sound here because
	// wasm runs single-threaded, so the closure never crosses a thread.
	let (running_cleanup, resize_cb_cleanup) = (
		leptos::__reexports::send_wrapper::SendWrapper::new(running.clone()),
		leptos::__reexports::send_wrapper::SendWrapper::new(resize_cb.clone()),
	);
	on_cleanup(move || {
		running_cleanup.set(false);
		if let Some(ref cb) = *resize_cb_cleanup.borrow() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if variant != Variant::Hero {
			return;
		}
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = to_canvas_coords(&canvas, ev.client_x() as f64, ev.client_y() as f64);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.engine.set_pointer(x, y);
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if variant != Variant::Hero {
			return;
		}
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.engine.clear_pointer();
		}
	};

	let context_tm = context.clone();
	// Registered non-passive (leptos `on:` exposes no listener options);
	// the handler never calls prevent_default, so scrolling stays live.
	let on_touchmove = move |ev: TouchEvent| {
		if variant != Variant::Hero {
			return;
		}
		let Some(touch) = ev.touches().get(0) else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let (x, y) = to_canvas_coords(&canvas, touch.client_x() as f64, touch.client_y() as f64);
		if let Some(ref mut c) = *context_tm.borrow_mut() {
			c.engine.set_pointer(x, y);
		}
	};

	let context_te = context.clone();
	let on_touchend = move |_: TouchEvent| {
		if variant != Variant::Hero {
			return;
		}
		if let Some(ref mut c) = *context_te.borrow_mut() {
			c.engine.clear_pointer();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:touchmove=on_touchmove
			on:touchend=on_touchend
			style="display: block;"
		/>
	}
}
