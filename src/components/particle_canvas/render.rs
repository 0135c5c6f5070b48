//! Canvas rendering for the particle layers.
//!
//! One pass per frame: clear, then a filled disc per particle. The hero
//! layer adds a second pass joining every sufficiently close unordered
//! pair with a faint line whose opacity rises as the pair closes in.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::engine::ParticleEngine;
use super::particles::Variant;
use super::theme::Theme;

/// Pair distance (px) at and beyond which no link line is drawn.
const LINK_DISTANCE: f64 = 140.0;

/// Link opacity falloff in [0, 1]: 1 at zero distance, 0 at
/// [`LINK_DISTANCE`]. Scaled by the theme's peak link alpha when drawing.
fn link_falloff(dist: f64) -> f64 {
	(1.0 - dist / LINK_DISTANCE).max(0.0)
}

/// Paint one frame of the engine's current state.
pub fn render(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let (w, h) = engine.size();
	ctx.clear_rect(0.0, 0.0, w, h);

	match engine.variant() {
		Variant::Ambient => draw_ambient_discs(engine, ctx, theme),
		Variant::Hero => {
			draw_hero_discs(engine, ctx, theme);
			draw_links(engine, ctx, theme);
		}
	}
}

fn draw_ambient_discs(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for p in &engine.particles {
		// Life is unclamped; a negative value just yields an invisible disc.
		let alpha = 0.4 * p.life;
		ctx.set_fill_style_str(&theme.ambient.with_alpha(alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.r, 0.0, PI * 2.0);
		ctx.fill();
	}
}

fn draw_hero_discs(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.hero.to_css());
	for p in &engine.particles {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.r, 0.0, PI * 2.0);
		ctx.fill();
	}
}

/// O(n²) over unordered pairs; fine at the ≤100 particle ceiling.
fn draw_links(engine: &ParticleEngine, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_line_width(theme.link_width);

	let particles = &engine.particles;
	for i in 0..particles.len() {
		for j in (i + 1)..particles.len() {
			let (a, b) = (&particles[i], &particles[j]);
			let (dx, dy) = (a.x - b.x, a.y - b.y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist >= LINK_DISTANCE {
				continue;
			}

			let alpha = link_falloff(dist) * theme.link_alpha;
			ctx.set_stroke_style_str(&theme.link.with_alpha(alpha).to_css());
			ctx.begin_path();
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
			ctx.stroke();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_opacity_vanishes_at_threshold() {
		assert_eq!(link_falloff(140.0), 0.0);
		assert_eq!(link_falloff(200.0), 0.0);
	}

	#[test]
	fn link_opacity_peaks_at_zero_distance() {
		let theme = Theme::default();
		assert!((link_falloff(0.0) * theme.link_alpha - 0.25).abs() < 1e-12);
	}

	#[test]
	fn link_opacity_rises_monotonically_as_pairs_close() {
		let mut last = -1.0;
		for d in [139.0, 100.0, 70.0, 35.0, 10.0, 0.0] {
			let a = link_falloff(d);
			assert!(a > last);
			last = a;
		}
	}
}
