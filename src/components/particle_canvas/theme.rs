//! Visual styling for the particle backdrop layers.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Colors and line metrics for both layers.
///
/// The defaults match the site palette: violet motes on the ambient layer,
/// near-white points joined by faint violet links on the hero layer.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Ambient disc color; its alpha is further scaled by `0.4 * life`.
	pub ambient: Color,
	/// Hero disc color, drawn at a fixed alpha.
	pub hero: Color,
	/// Hero link line color; alpha scales with pair distance up to `link_alpha`.
	pub link: Color,
	/// Peak link opacity, reached as pair distance approaches zero.
	pub link_alpha: f64,
	/// Link stroke width, px.
	pub link_width: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			ambient: Color::rgba(124, 58, 237, 1.0),
			hero: Color::rgba(232, 236, 243, 0.7),
			link: Color::rgba(124, 58, 237, 1.0),
			link_alpha: 0.25,
			link_width: 1.5,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_is_rgba() {
		let c = Color::rgba(124, 58, 237, 1.0).with_alpha(0.25);
		assert_eq!(c.to_css(), "rgba(124, 58, 237, 0.25)");
	}
}
