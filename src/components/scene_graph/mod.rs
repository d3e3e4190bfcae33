//! Interactive scene graph canvas.
//!
//! Renders a quest's scenes as boxes on an HTML canvas, connected by one
//! arrow per choice, with:
//! - Pan (drag the background) and origin-anchored wheel zoom
//! - Node dragging, with short presses treated as clicks that open the inspector
//! - Fit-to-view on load and on demand
//! - In-place editing of scene and choice text in the inspector panel
//! - Save back to the quest store and JSON download
//!
//! # Example
//!
//! ```ignore
//! use quest_graph::SceneGraphCanvas;
//!
//! view! { <SceneGraphCanvas quest="dark_tower" api_base="http://localhost:8000" /> }
//! ```

mod center;
mod client;
mod component;
mod drag;
mod edges;
mod export;
mod input;
mod inspector;
mod panel;
mod render;
mod state;
mod store;
mod theme;
mod types;
mod viewport;

pub use client::{QuestApi, StoreError};
pub use component::SceneGraphCanvas;
pub use drag::NODE_SIZE;
pub use input::GestureEnd;
pub use inspector::EditField;
pub use state::{LoadState, SceneGraphState};
pub use store::{NodeStore, NodeUpdate};
pub use types::{Choice, Position, QuestResponse, SceneNode, ScreenPoint, Size};
pub use viewport::ZOOM_SENSITIVITY;
