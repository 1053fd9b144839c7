//! Interactive widgets of the app.

pub mod blueprint_graph;
