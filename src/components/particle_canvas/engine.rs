//! Per-canvas animation engine: particle store, pointer state, integrator.
//!
//! One [`ParticleEngine`] is created per canvas instance and owns all of its
//! mutable state; the ambient and hero layers never share anything. The
//! animation loop calls [`ParticleEngine::tick`] once per frame before
//! rendering, and input handlers overwrite the pointer position between
//! frames.

use super::particles::{self, Particle, Variant};

/// Overscan margin before a coordinate wraps to the opposite edge, px.
/// Keeps particles from visibly popping at the instant of wraparound.
const WRAP_MARGIN: f64 = 20.0;

/// Radius of the pointer repulsion field, px.
const POINTER_RADIUS: f64 = 150.0;

/// Position nudge applied per frame at zero distance from the pointer, px.
const POINTER_STRENGTH: f64 = 1.2;

/// Added to the distance divisor so a particle sitting exactly on the
/// pointer still gets a finite push.
const DIST_EPSILON: f64 = 0.001;

/// Per-frame life decay for ambient particles. Unclamped: particles fade
/// past zero over a long session and are never recycled.
const LIFE_DECAY: f64 = 0.002;

/// Pointer position meaning "no pointer": far outside any canvas, so the
/// repulsion field never reaches a particle.
const POINTER_AWAY: (f64, f64) = (-9999.0, -9999.0);

/// Last known pointer position in canvas-local coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PointerState {
	pub x: f64,
	pub y: f64,
}

impl Default for PointerState {
	fn default() -> Self {
		let (x, y) = POINTER_AWAY;
		Self { x, y }
	}
}

/// Wrap one coordinate toroidally once it leaves the overscan band.
fn wrap(v: f64, dim: f64) -> f64 {
	if v < -WRAP_MARGIN {
		dim + WRAP_MARGIN
	} else if v > dim + WRAP_MARGIN {
		-WRAP_MARGIN
	} else {
		v
	}
}

/// Position nudge pushing a particle away from the pointer.
///
/// `(dx, dy)` is the particle-minus-pointer vector. Returns zero outside
/// [`POINTER_RADIUS`]; inside, the magnitude falls off linearly from
/// [`POINTER_STRENGTH`] at the pointer to zero at the radius.
fn repulsion(dx: f64, dy: f64) -> (f64, f64) {
	let dist = (dx * dx + dy * dy).sqrt();
	if dist >= POINTER_RADIUS {
		return (0.0, 0.0);
	}
	let force = (POINTER_RADIUS - dist) / POINTER_RADIUS;
	let scale = force * POINTER_STRENGTH / (dist + DIST_EPSILON);
	(dx * scale, dy * scale)
}

/// Animation state for one canvas: store, dimensions, pointer.
///
/// Created when the component mounts and rebuilt-in-place on resize. The
/// frame loop is the only per-frame writer; pointer handlers overwrite
/// [`PointerState`] between frames.
pub struct ParticleEngine {
	variant: Variant,
	width: f64,
	height: f64,
	reduced_motion: bool,
	pointer: PointerState,
	/// Replaced wholesale on resize, never mutated element-wise there.
	pub particles: Vec<Particle>,
}

impl ParticleEngine {
	/// Build an engine with a freshly spawned store for the given canvas
	/// size. `reduced_motion` is sampled once here and reused on resize.
	pub fn new<R: FnMut() -> f64>(
		variant: Variant,
		width: f64,
		height: f64,
		reduced_motion: bool,
		rng: R,
	) -> Self {
		Self {
			variant,
			width,
			height,
			reduced_motion,
			pointer: PointerState::default(),
			particles: particles::spawn(variant, width, height, reduced_motion, rng),
		}
	}

	/// Which layer this engine animates.
	pub fn variant(&self) -> Variant {
		self.variant
	}

	/// Canvas size in CSS pixels.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Adopt new canvas dimensions and discard the old store for a fresh
	/// spawn. Old particles are not interpolated into the new space.
	pub fn resize<R: FnMut() -> f64>(&mut self, width: f64, height: f64, rng: R) {
		self.width = width;
		self.height = height;
		self.particles = particles::spawn(self.variant, width, height, self.reduced_motion, rng);
	}

	/// Record the pointer position in canvas-local coordinates.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer = PointerState { x, y };
	}

	/// Forget the pointer (leave/touch-end): parks it far away so the
	/// repulsion field goes quiet.
	pub fn clear_pointer(&mut self) {
		self.pointer = PointerState::default();
	}

	/// Advance every particle by one frame.
	///
	/// Order per particle: velocity step, then the variant effect (hero
	/// pointer repulsion or ambient life decay), then per-axis wraparound.
	pub fn tick(&mut self) {
		let (px, py) = (self.pointer.x, self.pointer.y);
		let hero = self.variant == Variant::Hero;

		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;

			if hero {
				let (nx, ny) = repulsion(p.x - px, p.y - py);
				p.x += nx;
				p.y += ny;
			} else {
				p.life -= LIFE_DECAY;
			}

			p.x = wrap(p.x, self.width);
			p.y = wrap(p.y, self.height);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn fixed_rng() -> impl FnMut() -> f64 {
		let mut i = 0u64;
		move || {
			i = i.wrapping_add(7);
			(i % 89) as f64 / 89.0
		}
	}

	fn hero_engine(w: f64, h: f64) -> ParticleEngine {
		ParticleEngine::new(Variant::Hero, w, h, false, fixed_rng())
	}

	fn magnitude(v: (f64, f64)) -> f64 {
		(v.0 * v.0 + v.1 * v.1).sqrt()
	}

	#[test]
	fn wrap_sends_overscan_to_opposite_margin() {
		assert_eq!(wrap(825.0, 800.0), -20.0);
		assert_eq!(wrap(-25.0, 800.0), 820.0);
		// Inside the overscan band nothing moves.
		assert_eq!(wrap(-20.0, 800.0), -20.0);
		assert_eq!(wrap(820.0, 800.0), 820.0);
		assert_eq!(wrap(400.0, 800.0), 400.0);
	}

	#[test]
	fn positions_stay_inside_overscan_band() {
		let mut engine = hero_engine(320.0, 240.0);
		for _ in 0..600 {
			engine.tick();
			for p in &engine.particles {
				assert!((-20.0..=340.0).contains(&p.x));
				assert!((-20.0..=260.0).contains(&p.y));
			}
		}
	}

	#[test]
	fn velocity_step_moves_particles() {
		let mut engine = hero_engine(800.0, 600.0);
		let before: Vec<(f64, f64)> = engine.particles.iter().map(|p| (p.x, p.y)).collect();
		engine.tick();
		for (p, (x0, y0)) in engine.particles.iter().zip(before) {
			// Pointer is parked away, so the step is exactly the velocity.
			assert!((p.x - (x0 + p.vx)).abs() < 1e-9);
			assert!((p.y - (y0 + p.vy)).abs() < 1e-9);
		}
	}

	#[test]
	fn repulsion_is_zero_at_and_beyond_threshold() {
		assert_eq!(repulsion(150.0, 0.0), (0.0, 0.0));
		assert_eq!(repulsion(0.0, 200.0), (0.0, 0.0));
		assert_eq!(repulsion(106.07, 106.07), (0.0, 0.0));
	}

	#[test]
	fn repulsion_grows_as_pointer_closes_in() {
		let mut last = 0.0;
		for d in [149.0, 120.0, 80.0, 40.0, 10.0, 1.0] {
			let m = magnitude(repulsion(d, 0.0));
			assert!(m > last, "nudge should grow as distance shrinks");
			last = m;
		}
	}

	#[test]
	fn repulsion_near_contact_approaches_full_strength() {
		// Magnitude ≈ force * 1.2 once the distance dwarfs the epsilon guard.
		let m = magnitude(repulsion(0.5, 0.0));
		assert!(m.is_finite());
		assert!((m - 1.2).abs() < 0.02);
		// Exactly on the pointer the epsilon keeps the divisor sane: the
		// zero delta vector yields a finite zero nudge, never NaN.
		let on_top = repulsion(0.0, 0.0);
		assert_eq!(on_top, (0.0, 0.0));
	}

	#[test]
	fn ambient_life_decays_unclamped() {
		let mut engine = ParticleEngine::new(Variant::Ambient, 400.0, 300.0, false, fixed_rng());
		let life0: Vec<f64> = engine.particles.iter().map(|p| p.life).collect();
		engine.tick();
		for (p, l0) in engine.particles.iter().zip(&life0) {
			assert!((p.life - (l0 - 0.002)).abs() < 1e-12);
		}
		// Known quirk: life keeps falling past zero and particles are never
		// recycled, they just go invisible over a long session.
		for _ in 0..600 {
			engine.tick();
		}
		assert!(engine.particles.iter().all(|p| p.life < life0[0]));
		assert!(engine.particles.iter().any(|p| p.life < 0.0));
	}

	#[test]
	fn hero_life_never_decays() {
		let mut engine = hero_engine(400.0, 300.0);
		for _ in 0..100 {
			engine.tick();
		}
		assert!(engine.particles.iter().all(|p| p.life == 1.0));
	}

	#[test]
	fn resize_replaces_the_store_wholesale() {
		let mut engine = hero_engine(500.0, 500.0);
		assert_eq!(engine.particles.len(), 40);
		engine.resize(1920.0, 1080.0, fixed_rng());
		assert_eq!(engine.size(), (1920.0, 1080.0));
		assert_eq!(engine.particles.len(), 100);
	}

	#[test]
	fn resize_respawns_parent_sized_layers_too() {
		// A parent-box reflow resizes non-fullscreen layers the same way:
		// fresh spawn at the new density, not a scale of the old store.
		let mut engine = ParticleEngine::new(Variant::Ambient, 800.0, 600.0, false, fixed_rng());
		assert_eq!(engine.particles.len(), 20);
		engine.resize(1600.0, 900.0, fixed_rng());
		assert_eq!(engine.size(), (1600.0, 900.0));
		assert_eq!(
			engine.particles.len(),
			particles::target_count(Variant::Ambient, 1600.0, 900.0, false)
		);
		assert_eq!(engine.particles.len(), 57);
	}

	#[test]
	fn pointer_repulsion_pushes_nearby_particles_outward() {
		let mut engine = hero_engine(800.0, 600.0);
		// Park one particle near the pointer with no drift of its own.
		engine.particles[0] = Particle {
			x: 410.0,
			y: 300.0,
			vx: 0.0,
			vy: 0.0,
			r: 1.0,
			life: 1.0,
		};
		engine.set_pointer(400.0, 300.0);
		engine.tick();
		assert!(engine.particles[0].x > 410.0, "pushed away along +x");
		assert!((engine.particles[0].y - 300.0).abs() < 1e-9);

		// Clearing the pointer parks it beyond reach: no further push.
		engine.clear_pointer();
		let x_after = engine.particles[0].x;
		engine.tick();
		assert!((engine.particles[0].x - x_after).abs() < 1e-9);
	}
}
