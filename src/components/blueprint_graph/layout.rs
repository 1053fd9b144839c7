//! Deterministic force-directed placement.
//!
//! Nodes start evenly spaced on a circle and are then relaxed for a fixed
//! number of steps under pairwise repulsion, edge springs and a pull toward
//! the viewport center. There is no randomness: the same graph, viewport and
//! parameters always produce the same positions. Repulsion is all-pairs, which
//! is fine for the tens of nodes a blueprint holds.

use std::f64::consts::PI;

use super::config::LayoutParams;
use super::geometry::{Point, Size, Vector, point};
use super::model::{Edge, NormalizedGraph};

/// Added to squared distances so coincident nodes never divide by zero.
const DIST_EPSILON: f64 = 0.01;
/// Gap kept between the seed circle and the viewport border.
const SEED_MARGIN: f64 = 80.0;

/// Final node positions, indexed like `NormalizedGraph::nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
	positions: Vec<Point>,
}

impl Layout {
	#[cfg(test)]
	pub fn from_positions(positions: Vec<Point>) -> Self {
		Self { positions }
	}

	pub fn get(&self, idx: usize) -> Option<Point> {
		self.positions.get(idx).copied()
	}

	pub fn positions(&self) -> &[Point] {
		&self.positions
	}
}

/// `n` points evenly spread on a circle centered in the viewport, the first
/// one at angle zero.
pub fn seed_positions(n: usize, viewport: Size) -> Vec<Point> {
	let center = point(viewport.width / 2.0, viewport.height / 2.0);
	let radius = viewport.width.min(viewport.height) / 2.0 - SEED_MARGIN;
	(0..n)
		.map(|i| {
			let angle = 2.0 * PI * i as f64 / n as f64;
			point(
				center.x + radius * angle.cos(),
				center.y + radius * angle.sin(),
			)
		})
		.collect()
}

pub fn layout(graph: &NormalizedGraph, viewport: Size, params: &LayoutParams) -> Layout {
	let n = graph.nodes().len();
	let center = point(viewport.width / 2.0, viewport.height / 2.0);
	let mut positions = seed_positions(n, viewport);
	let mut velocities = vec![Vector::zero(); n];

	for _ in 0..params.iterations {
		step(&mut positions, &mut velocities, graph.edges(), center, params);
	}

	log::debug!(
		"laid out {} nodes / {} edges in {}x{} over {} steps",
		n,
		graph.edges().len(),
		viewport.width,
		viewport.height,
		params.iterations
	);
	Layout { positions }
}

fn step(
	positions: &mut [Point],
	velocities: &mut [Vector],
	edges: &[Edge],
	center: Point,
	params: &LayoutParams,
) {
	let n = positions.len();

	for a in 0..n {
		for b in (a + 1)..n {
			let delta = positions[a] - positions[b];
			let dist2 = delta.square_length() + DIST_EPSILON;
			let push = delta / dist2.sqrt() * (params.repulsion / dist2);
			velocities[a] += push;
			velocities[b] -= push;
		}
	}

	for edge in edges {
		let delta = positions[edge.target] - positions[edge.source];
		let dist = delta.length().max(1.0);
		let pull = delta / dist * (params.stiffness * (dist - params.rest_length));
		velocities[edge.source] += pull;
		velocities[edge.target] -= pull;
	}

	for (pos, vel) in positions.iter_mut().zip(velocities.iter_mut()) {
		*vel += (center - *pos) * params.center_pull;
		*pos += *vel * params.dt;
		*vel *= params.damping;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::blueprint_graph::geometry::size;
	use crate::components::blueprint_graph::model::{Normalized, normalize};
	use crate::components::blueprint_graph::types::{EdgeStyle, GraphEdge, GraphNode};

	fn graph(ids: &[&str], edges: &[(&str, &str)]) -> NormalizedGraph {
		let nodes: Vec<_> = ids.iter().map(|id| GraphNode::new(*id)).collect();
		let edges: Vec<_> = edges.iter().map(|(s, t)| GraphEdge::new(*s, *t)).collect();
		match normalize(&nodes, &edges) {
			Normalized::Graph(g) => g,
			Normalized::Empty => panic!("expected a graph"),
		}
	}

	fn all_finite(layout: &Layout) -> bool {
		layout.positions().iter().all(|p| p.x.is_finite() && p.y.is_finite())
	}

	#[test]
	fn seed_is_a_circle_in_the_viewport() {
		let seed = seed_positions(4, size(800.0, 560.0));
		// radius = 560 / 2 - 80
		assert!((seed[0] - point(600.0, 280.0)).length() < 1e-9);
		assert!((seed[1] - point(400.0, 480.0)).length() < 1e-9);
		assert!((seed[2] - point(200.0, 280.0)).length() < 1e-9);
		assert!((seed[3] - point(400.0, 80.0)).length() < 1e-9);
	}

	#[test]
	fn zero_iterations_returns_the_seed() {
		let g = graph(&["A", "B", "C"], &[("A", "B")]);
		let params = LayoutParams {
			iterations: 0,
			..LayoutParams::default()
		};
		let viewport = size(800.0, 560.0);
		let out = layout(&g, viewport, &params);
		assert_eq!(out.positions(), seed_positions(3, viewport).as_slice());
	}

	#[test]
	fn returns_one_finite_position_per_node() {
		let ids: Vec<String> = (0..30).map(|i| format!("N{i}")).collect();
		let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
		let edges: Vec<(&str, &str)> = ids.windows(2).map(|w| (w[0], w[1])).collect();
		let g = graph(&ids, &edges);
		let out = layout(&g, size(800.0, 560.0), &LayoutParams::default());
		assert_eq!(out.positions().len(), 30);
		assert!(all_finite(&out));
	}

	#[test]
	fn identical_inputs_give_identical_positions() {
		let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "A"), ("D", "A")]);
		let params = LayoutParams::default();
		let first = layout(&g, size(640.0, 480.0), &params);
		let second = layout(&g, size(640.0, 480.0), &params);
		assert_eq!(first, second);
	}

	#[test]
	fn viewport_size_changes_the_result() {
		let g = graph(&["A", "B", "C"], &[("A", "B")]);
		let params = LayoutParams::default();
		let small = layout(&g, size(640.0, 480.0), &params);
		let large = layout(&g, size(1280.0, 960.0), &params);
		assert_ne!(small, large);
	}

	#[test]
	fn single_node_without_edges_terminates() {
		let g = graph(&["A"], &[]);
		let out = layout(&g, size(800.0, 560.0), &LayoutParams::default());
		assert_eq!(out.positions().len(), 1);
		assert!(all_finite(&out));
		// pulled from the seed toward the center, never past it
		let p = out.get(0).unwrap();
		assert!(p.x < 600.0 && p.x > 400.0);
		assert!((p.y - 280.0).abs() < 1e-9);
	}

	#[test]
	fn coincident_nodes_stay_finite() {
		// radius = 160 / 2 - 80 = 0, so every node starts on the center
		let g = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
		let out = layout(&g, size(160.0, 160.0), &LayoutParams::default());
		assert_eq!(out.positions().len(), 3);
		assert!(all_finite(&out));
	}

	#[test]
	fn self_loops_and_parallel_edges_are_harmless() {
		let g = graph(&["A", "B"], &[("A", "A"), ("A", "B"), ("A", "B")]);
		let out = layout(&g, size(800.0, 560.0), &LayoutParams::default());
		assert!(all_finite(&out));
	}

	#[test]
	fn symmetric_pair_stays_centered() {
		let g = graph(&["A", "B"], &[("A", "B")]);
		let out = layout(&g, size(800.0, 560.0), &LayoutParams::default());
		let mid = out.get(0).unwrap().lerp(out.get(1).unwrap(), 0.5);
		assert!((mid - point(400.0, 280.0)).length() < 1e-6);
	}

	#[test]
	fn stronger_repulsion_spreads_nodes_further() {
		let g = graph(&["A", "B", "C", "D"], &[]);
		let viewport = size(800.0, 560.0);
		let center = point(400.0, 280.0);
		let spread = |repulsion: f64| {
			let params = LayoutParams {
				repulsion,
				..LayoutParams::default()
			};
			let out = layout(&g, viewport, &params);
			out.positions().iter().map(|p| (*p - center).length()).sum::<f64>()
		};
		assert!(spread(40_000.0) > spread(2_000.0));
	}

	#[test]
	fn end_to_end_layout_of_three_nodes() {
		let nodes = [GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("C")];
		let edges = [
			GraphEdge::new("A", "B"),
			GraphEdge::new("B", "C").with_style(EdgeStyle::Dashed),
			GraphEdge::new("A", "X"),
		];
		let Normalized::Graph(g) = normalize(&nodes, &edges) else {
			panic!("expected a graph");
		};
		let out = layout(&g, size(800.0, 560.0), &LayoutParams::default());
		assert_eq!(out.positions().len(), 3);
		assert!(all_finite(&out));
		assert!(g.index_of("C").and_then(|i| out.get(i)).is_some());
		assert_eq!(g.index_of("X"), None);
	}

	fn assert_positions(out: &Layout, expected: &[(f64, f64)]) {
		assert_eq!(out.positions().len(), expected.len());
		for (i, (p, (x, y))) in out.positions().iter().zip(expected).enumerate() {
			assert!(
				(p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6,
				"node {i}: got ({}, {}), want ({x}, {y})",
				p.x,
				p.y
			);
		}
	}

	#[test]
	fn one_step_of_a_connected_pair() {
		// Seeds at (600, 280) and (200, 280), d = 400. For A:
		// v = 8000 / (d² + 0.01) * 400 / sqrt(d² + 0.01)  repulsion, pushes right
		//   - 0.02 * (400 - 140)                         spring, pulls left
		//   - 0.02 * 200                                  centering
		// x = 600 + v * 0.02, damping applied after the move
		let g = graph(&["A", "B"], &[("A", "B")]);
		let params = LayoutParams {
			iterations: 1,
			..LayoutParams::default()
		};
		let out = layout(&g, size(800.0, 560.0), &params);
		assert_positions(&out, &[(599.817, 280.0), (200.183, 280.0)]);
	}

	#[test]
	fn two_steps_with_unequal_springs() {
		// A's springs to B (side of the seed square) and C (its diagonal) are
		// stretched by different amounts; the second step carries damped velocity.
		let g = graph(&["A", "B", "C", "D"], &[("A", "B"), ("A", "C")]);
		let params = LayoutParams {
			iterations: 2,
			..LayoutParams::default()
		};
		let out = layout(&g, size(800.0, 560.0), &params);
		assert_positions(
			&out,
			&[
				(599.371713624684, 280.115045244066),
				(400.115034756588, 479.667891172026),
				(200.513251433334, 280.000010683642),
				(400.000000185394, 80.217052900266),
			],
		);
	}
}
