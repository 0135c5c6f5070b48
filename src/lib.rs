//! particle-backdrop: animated canvas backdrops for a portfolio page.
//!
//! This crate provides a WASM-based canvas component that renders two
//! decorative particle layers: a sparse ambient drift behind the page and
//! a denser, pointer-reactive field in the hero section with pairwise
//! link lines.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;

pub use components::particle_canvas::{Particle, ParticleCanvas, ParticleEngine, Variant};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-backdrop: logging initialized");
}

/// Whether the user agent requests reduced motion.
///
/// Read once per canvas instance at initialization; an unavailable media
/// query reads as `false`.
pub fn prefers_reduced_motion() -> bool {
	web_sys::window()
		.and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
		.flatten()
		.is_some_and(|mql| mql.matches())
}

/// Main application component.
/// Mounts the fullscreen ambient layer and the pointer-reactive hero layer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="backdrop">
			<ParticleCanvas variant=Variant::Ambient fullscreen=true />
		</div>
		<section class="hero">
			<ParticleCanvas variant=Variant::Hero />
			<div class="hero-overlay">
				<h1>"Hi, I build interactive things"</h1>
				<p class="subtitle">"Move the pointer through the particles."</p>
			</div>
		</section>
	}
}
