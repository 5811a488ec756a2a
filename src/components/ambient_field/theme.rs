//! Particle colors.
//!
//! The backdrop draws from a small fixed palette; each particle picks one
//! entry at creation and keeps it for its lifetime.

use serde::Deserialize;

/// RGB color triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Color {
	/// Color from its three channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// CSS `rgb(r, g, b)` string for canvas fill and stroke styles.
	pub fn to_css_rgb(self) -> String {
		format!("rgb({}, {}, {})", self.r, self.g, self.b)
	}
}

/// Colors particles are drawn from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Palette {
	/// Entries in pick order.
	pub colors: Vec<Color>,
}

impl Palette {
	/// Cool accents with warm highlights (default)
	pub fn flares() -> Self {
		Self {
			colors: vec![
				Color::rgb(34, 211, 238),  // Cyan
				Color::rgb(99, 102, 241),  // Indigo
				Color::rgb(255, 255, 255), // White
				Color::rgb(244, 114, 182), // Soft pink
				Color::rgb(251, 191, 36),  // Amber
			],
		}
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.colors.len()
	}

	/// True when the palette has no colors.
	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}

	/// Color at `index`, wrapping around the palette.
	///
	/// Returns white for an empty palette; validated configs never have one.
	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(255, 255, 255);
		}
		self.colors[index % self.colors.len()]
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::flares()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_palette_has_five_entries() {
		let palette = Palette::default();
		assert_eq!(palette.len(), 5);
		assert_eq!(palette.get(0), Color::rgb(34, 211, 238));
		assert_eq!(palette.get(5), palette.get(0));
	}

	#[test]
	fn css_rgb_format() {
		assert_eq!(Color::rgb(244, 114, 182).to_css_rgb(), "rgb(244, 114, 182)");
	}

	#[test]
	fn palette_deserializes_from_bare_list() {
		let palette: Palette =
			serde_json::from_str(r#"[{"r":1,"g":2,"b":3},{"r":4,"g":5,"b":6}]"#).unwrap();
		assert_eq!(palette.len(), 2);
		assert_eq!(palette.get(1), Color::rgb(4, 5, 6));
	}
}
