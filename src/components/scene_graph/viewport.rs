//! Pan and zoom for the whole scene.
//!
//! The viewport maps graph space to screen space with a single affine
//! transform: `screen = graph * scale + (x, y)`. Zoom is anchored at the
//! coordinate origin rather than the cursor, so zooming also moves content
//! relative to the pointer.

use super::types::{Position, ScreenPoint};

/// Smallest allowed zoom factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest allowed zoom factor.
pub const MAX_SCALE: f64 = 5.0;
/// Fractional scale change per wheel tick.
pub const ZOOM_SENSITIVITY: f64 = 0.03;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to `MIN_SCALE..=MAX_SCALE`).
	pub scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl ViewTransform {
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		scale: 1.0,
	};

	pub fn to_screen(&self, p: Position) -> ScreenPoint {
		ScreenPoint::new(p.x * self.scale + self.x, p.y * self.scale + self.y)
	}

	pub fn to_graph(&self, p: ScreenPoint) -> Position {
		Position::new((p.x - self.x) / self.scale, (p.y - self.y) / self.scale)
	}
}

fn clamp_scale(scale: f64) -> f64 {
	if scale.is_nan() {
		return 1.0;
	}
	scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// An in-progress background pan.
///
/// Holds the press point minus the transform offset at press time, so the
/// offset under the cursor stays fixed for the rest of the gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
	grab_x: f64,
	grab_y: f64,
}

/// Owns the current transform and implements the wheel and pan gestures.
#[derive(Clone, Debug)]
pub struct ViewportController {
	transform: ViewTransform,
	sensitivity: f64,
}

impl Default for ViewportController {
	fn default() -> Self {
		Self::new(ZOOM_SENSITIVITY)
	}
}

impl ViewportController {
	pub fn new(sensitivity: f64) -> Self {
		Self {
			transform: ViewTransform::IDENTITY,
			sensitivity,
		}
	}

	pub fn transform(&self) -> ViewTransform {
		self.transform
	}

	pub fn set_transform(&mut self, transform: ViewTransform) {
		self.transform = ViewTransform {
			scale: clamp_scale(transform.scale),
			..transform
		};
	}

	/// Apply one wheel tick. Positive `delta_y` (scrolling down) zooms out.
	pub fn zoom(&mut self, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			1.0 - self.sensitivity
		} else {
			1.0 + self.sensitivity
		};
		self.transform.scale = clamp_scale(self.transform.scale * factor);
	}

	pub fn begin_pan(&self, press: ScreenPoint) -> PanSession {
		PanSession {
			grab_x: press.x - self.transform.x,
			grab_y: press.y - self.transform.y,
		}
	}

	pub fn pan(&mut self, session: &PanSession, cursor: ScreenPoint) {
		self.transform.x = cursor.x - session.grab_x;
		self.transform.y = cursor.y - session.grab_y;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zoom_stays_within_bounds_for_long_wheel_runs() {
		let mut viewport = ViewportController::default();
		for _ in 0..500 {
			viewport.zoom(-120.0);
			assert!(viewport.transform().scale <= MAX_SCALE);
		}
		assert_eq!(viewport.transform().scale, MAX_SCALE);

		for i in 0..1000 {
			viewport.zoom(if i % 7 == 0 { -1.0 } else { 1.0 });
			let scale = viewport.transform().scale;
			assert!((MIN_SCALE..=MAX_SCALE).contains(&scale));
		}
		assert_eq!(viewport.transform().scale, MIN_SCALE);
	}

	#[test]
	fn zoom_is_anchored_at_origin() {
		let mut viewport = ViewportController::default();
		viewport.set_transform(ViewTransform {
			x: 40.0,
			y: -15.0,
			scale: 1.0,
		});
		viewport.zoom(-1.0);
		let t = viewport.transform();
		assert_eq!((t.x, t.y), (40.0, -15.0));
		assert!((t.scale - 1.03).abs() < 1e-12);
	}

	#[test]
	fn zero_wheel_delta_zooms_in() {
		let mut viewport = ViewportController::new(0.05);
		viewport.zoom(0.0);
		assert!((viewport.transform().scale - 1.05).abs() < 1e-12);

		viewport.zoom(-0.0);
		assert!((viewport.transform().scale - 1.05 * 1.05).abs() < 1e-12);
	}

	#[test]
	fn pan_keeps_the_grabbed_point_under_the_cursor() {
		let mut viewport = ViewportController::default();
		viewport.set_transform(ViewTransform {
			x: 100.0,
			y: 50.0,
			scale: 2.0,
		});
		let session = viewport.begin_pan(ScreenPoint::new(300.0, 200.0));
		viewport.pan(&session, ScreenPoint::new(320.0, 170.0));

		let t = viewport.transform();
		assert_eq!((t.x, t.y, t.scale), (120.0, 20.0, 2.0));
	}

	#[test]
	fn screen_and_graph_conversions_invert_each_other() {
		let t = ViewTransform {
			x: 12.0,
			y: -8.0,
			scale: 0.5,
		};
		let p = Position::new(200.0, 40.0);
		assert_eq!(t.to_graph(t.to_screen(p)), p);
	}

	#[test]
	fn set_transform_clamps_scale() {
		let mut viewport = ViewportController::default();
		viewport.set_transform(ViewTransform {
			x: 0.0,
			y: 0.0,
			scale: 40.0,
		});
		assert_eq!(viewport.transform().scale, MAX_SCALE);
	}
}
