//! Colors and fonts for the canvas layer.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node box colors.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	pub fill: Color,
	/// Fill while the node is being dragged.
	pub fill_active: Color,
	pub border: Color,
	/// Border of the node open in the inspector.
	pub border_selected: Color,
	pub border_width: f64,
	pub corner_radius: f64,
	pub label: Color,
	pub label_font: &'static str,
}

/// Edge line, arrowhead and marker colors.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub line_width: f64,
	/// Outline around the source marker, usually the background color.
	pub marker_outline: Color,
}

/// Complete visual theme for the graph canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: Color,
	pub node: NodeStyle,
	pub edge: EdgeStyle,
}

impl Default for Theme {
	fn default() -> Self {
		Self::forest()
	}
}

impl Theme {
	/// Deep green background with parchment text (default).
	pub fn forest() -> Self {
		let parchment = Color::rgb(214, 189, 152);
		let background = Color::rgb(26, 54, 54);
		Self {
			background,
			node: NodeStyle {
				fill: Color::rgb(64, 83, 76),
				fill_active: Color::rgb(103, 125, 106),
				border: parchment.with_alpha(0.6),
				border_selected: parchment,
				border_width: 2.0,
				corner_radius: 8.0,
				label: parchment,
				label_font: "14px sans-serif",
			},
			edge: EdgeStyle {
				color: parchment,
				line_width: 2.0,
				marker_outline: background,
			},
		}
	}
}
