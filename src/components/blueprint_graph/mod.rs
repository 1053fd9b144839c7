//! Interactive company/contract diagram: force layout, curved edges,
//! zoom/pan and hover highlighting drawn on a canvas.

mod component;
pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod layout;
pub mod model;
mod render;
pub mod state;
mod types;
pub mod viewport;

pub use component::BlueprintGraphCanvas;
pub use types::GraphData;
