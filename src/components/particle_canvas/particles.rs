//! Particle records and store initialization.
//!
//! The store is sized as a density function of canvas area, clamped to a
//! per-variant count band, and rebuilt wholesale whenever the canvas is
//! resized. Randomness is injected as a closure so spawning stays testable
//! outside the browser; the component passes `js_sys::Math::random`.

/// A single animated particle in canvas pixel space.
///
/// Velocity is in pixels per frame. `life` modulates draw opacity for the
/// ambient variant and decays every frame without a lower clamp; hero
/// particles carry a constant 1.0 that the renderer never reads.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub r: f64,
	pub life: f64,
}

/// Which of the two backdrop layers a canvas instance animates.
///
/// The variants share one engine; they differ only in density, speed,
/// radius band, and which per-frame effects apply (pointer repulsion and
/// link lines for [`Variant::Hero`], life decay for [`Variant::Ambient`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
	/// Sparse drifting motes behind the whole page.
	Ambient,
	/// Denser, pointer-reactive field with connecting lines.
	Hero,
}

impl Variant {
	/// Canvas area (px²) per particle in the density formula.
	fn area_divisor(self) -> f64 {
		match self {
			Variant::Ambient => 25_000.0,
			Variant::Hero => 18_000.0,
		}
	}

	/// Inclusive count band the store size is clamped to.
	fn count_band(self) -> (usize, usize) {
		match self {
			Variant::Ambient => (20, 60),
			Variant::Hero => (40, 100),
		}
	}

	/// Raw count substituted for the density formula under reduced motion.
	/// The band clamp still applies afterwards.
	fn reduced_motion_count(self) -> usize {
		match self {
			Variant::Ambient => 15,
			Variant::Hero => 20,
		}
	}

	/// Half-range of the symmetric random per-axis velocity, px/frame.
	fn speed_half_range(self) -> f64 {
		match self {
			Variant::Ambient => 0.15,
			Variant::Hero => 0.3,
		}
	}

	/// Radius band as (min, span): radius = min + random * span.
	fn radius_band(self) -> (f64, f64) {
		match self {
			Variant::Ambient => (0.5, 1.5),
			Variant::Hero => (0.8, 2.0),
		}
	}
}

/// Compute the particle count for a canvas of the given CSS-pixel size.
///
/// `floor(width * height / divisor)` clamped to the variant's band. Under
/// reduced motion the formula is replaced by a fixed low count before
/// clamping, so the result never leaves the band even then (a zero-area
/// canvas likewise lands on the band minimum).
pub fn target_count(variant: Variant, width: f64, height: f64, reduced_motion: bool) -> usize {
	let raw = if reduced_motion {
		variant.reduced_motion_count()
	} else {
		(width * height / variant.area_divisor()).floor().max(0.0) as usize
	};
	let (min, max) = variant.count_band();
	raw.clamp(min, max)
}

/// Build a fresh particle store for the given canvas size.
///
/// `rng` must yield values in [0, 1). Positions are uniform over the
/// canvas, velocities symmetric around zero, radii inside the variant's
/// band. Ambient particles start with life in [0.5, 1.0); hero particles
/// hold a constant 1.0.
pub fn spawn<R: FnMut() -> f64>(
	variant: Variant,
	width: f64,
	height: f64,
	reduced_motion: bool,
	mut rng: R,
) -> Vec<Particle> {
	let count = target_count(variant, width, height, reduced_motion);
	let speed = variant.speed_half_range();
	let (r_min, r_span) = variant.radius_band();

	(0..count)
		.map(|_| Particle {
			x: rng() * width,
			y: rng() * height,
			vx: (rng() - 0.5) * 2.0 * speed,
			vy: (rng() - 0.5) * 2.0 * speed,
			r: r_min + rng() * r_span,
			life: match variant {
				Variant::Ambient => 0.5 + rng() * 0.5,
				Variant::Hero => 1.0,
			},
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Deterministic [0, 1) sequence for spawn tests.
	fn cycle_rng() -> impl FnMut() -> f64 {
		let mut i = 0u64;
		move || {
			i = i.wrapping_add(1);
			(i % 97) as f64 / 97.0
		}
	}

	#[test]
	fn count_matches_density_formula() {
		// 500x500 = 250000 px²: floor(10) clamps up to 20, floor(13.9) up to 40.
		assert_eq!(target_count(Variant::Ambient, 500.0, 500.0, false), 20);
		assert_eq!(target_count(Variant::Hero, 500.0, 500.0, false), 40);

		// 1920x1080: floor(82.9) = 60 after clamp, floor(115.2) = 100 after clamp.
		assert_eq!(target_count(Variant::Ambient, 1920.0, 1080.0, false), 60);
		assert_eq!(target_count(Variant::Hero, 1920.0, 1080.0, false), 100);

		// Mid-band area passes through unclamped.
		assert_eq!(target_count(Variant::Ambient, 1000.0, 1000.0, false), 40);
		assert_eq!(target_count(Variant::Hero, 1000.0, 1000.0, false), 55);
	}

	#[test]
	fn count_never_leaves_band() {
		assert_eq!(target_count(Variant::Ambient, 0.0, 0.0, false), 20);
		assert_eq!(target_count(Variant::Hero, 0.0, 0.0, false), 40);
		assert_eq!(target_count(Variant::Ambient, 1e6, 1e6, false), 60);
		assert_eq!(target_count(Variant::Hero, 1e6, 1e6, false), 100);
	}

	#[test]
	fn reduced_motion_count_is_clamped_to_band_minimum() {
		// Raw reduced counts (15/20) sit below the bands, so the clamp
		// lifts them to the minimum regardless of area.
		assert_eq!(target_count(Variant::Ambient, 1920.0, 1080.0, true), 20);
		assert_eq!(target_count(Variant::Hero, 1920.0, 1080.0, true), 40);
	}

	#[test]
	fn spawn_size_is_idempotent_for_same_inputs() {
		let a = spawn(Variant::Hero, 800.0, 600.0, false, cycle_rng());
		let b = spawn(Variant::Hero, 800.0, 600.0, false, cycle_rng());
		assert_eq!(a.len(), b.len());
		assert_eq!(a.len(), target_count(Variant::Hero, 800.0, 600.0, false));
	}

	#[test]
	fn spawned_particles_lie_inside_bands() {
		let (w, h) = (800.0, 600.0);
		for variant in [Variant::Ambient, Variant::Hero] {
			let (r_min, r_span) = variant.radius_band();
			let speed = variant.speed_half_range();
			for p in spawn(variant, w, h, false, cycle_rng()) {
				assert!((0.0..w).contains(&p.x));
				assert!((0.0..h).contains(&p.y));
				assert!(p.vx.abs() <= speed && p.vy.abs() <= speed);
				assert!(p.r >= r_min && p.r < r_min + r_span);
			}
		}
	}

	#[test]
	fn ambient_life_starts_in_upper_half_hero_life_is_constant() {
		for p in spawn(Variant::Ambient, 640.0, 480.0, false, cycle_rng()) {
			assert!((0.5..1.0).contains(&p.life));
		}
		for p in spawn(Variant::Hero, 640.0, 480.0, false, cycle_rng()) {
			assert_eq!(p.life, 1.0);
		}
	}
}
