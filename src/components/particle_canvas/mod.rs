//! Animated particle backdrop component.
//!
//! Renders a perpetual particle animation on an HTML canvas with:
//! - Area-based particle density with per-variant count bands
//! - Toroidal wraparound with an overscan margin at the canvas edges
//! - Pointer/touch repulsion and pairwise link lines (hero variant)
//! - Fading drift motes (ambient variant)
//! - Device-pixel-ratio-aware sizing and reduced-motion support
//!
//! # Example
//!
//! ```ignore
//! use particle_backdrop::{ParticleCanvas, Variant};
//!
//! view! {
//!     <ParticleCanvas variant=Variant::Ambient fullscreen=true />
//!     <ParticleCanvas variant=Variant::Hero />
//! }
//! ```

mod component;
mod engine;
mod particles;
mod render;
pub mod theme;

pub use component::ParticleCanvas;
pub use engine::ParticleEngine;
pub use particles::{Particle, Variant};
