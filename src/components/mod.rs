//! UI components.

pub mod particle_canvas;
