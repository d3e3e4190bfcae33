//! Input sessions for pointer gestures.
//!
//! A session exists only between a press and its end. The pure half
//! ([`Gesture`]) lives in the graph state; the browser half
//! ([`GestureListeners`]) holds the window-level listeners that keep tracking
//! the pointer once it leaves the canvas. Both are created at press time and
//! dropped together when the gesture ends by release, pointer-cancel or loss
//! of window focus.

use leptos::ev;
use leptos::prelude::*;
use web_sys::PointerEvent;

use super::drag::DragSession;
use super::types::ScreenPoint;
use super::viewport::PanSession;

/// The primary (usually left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// What the current press is doing.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
	Pan(PanSession),
	NodeDrag(DragSession),
}

/// Why a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEnd {
	/// Pointer released at this canvas-relative point.
	Release(ScreenPoint),
	/// Pointer cancelled by the browser, or the window lost focus.
	Abort,
}

/// Window-level listeners attached for the duration of one gesture.
pub struct GestureListeners {
	handles: Vec<WindowListenerHandle>,
}

impl GestureListeners {
	/// Attach move, release, cancel and blur listeners to the window.
	pub fn attach(
		on_move: impl Fn(PointerEvent) + 'static,
		on_release: impl Fn(PointerEvent) + 'static,
		on_abort: impl Fn() + Clone + 'static,
	) -> Self {
		let on_cancel = on_abort.clone();
		let handles = vec![
			window_event_listener(ev::pointermove, on_move),
			window_event_listener(ev::pointerup, on_release),
			window_event_listener(ev::pointercancel, move |_| on_cancel()),
			window_event_listener(ev::blur, move |_| on_abort()),
		];
		Self { handles }
	}

	pub fn detach(self) {
		for handle in self.handles {
			handle.remove();
		}
	}
}
