//! UI components.

pub mod scene_graph;
