//! World-space geometry and the curved edge builder.
//!
//! Every edge is drawn as a quadratic Bézier bowed sideways from its chord,
//! so two opposite relations between the same pair of companies do not
//! overlap.

use super::layout::Layout;
use super::model::NormalizedGraph;
use super::types::EdgeStyle;

pub type Point = euclid::default::Point2D<f64>;
pub type Vector = euclid::default::Vector2D<f64>;
pub type Size = euclid::default::Size2D<f64>;

pub fn point(x: f64, y: f64) -> Point {
	euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
	euclid::vec2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
	euclid::size2(width, height)
}

/// Below this length a vector has no usable direction.
const DIRECTION_EPSILON: f64 = 1e-9;
/// Straight segments used to approximate a curve for hit testing.
const HIT_SAMPLES: usize = 24;

fn unit_or_zero(v: Vector) -> Vector {
	let len = v.length();
	if len > DIRECTION_EPSILON {
		v / len
	} else {
		Vector::zero()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
	pub start: Point,
	pub control: Point,
	pub end: Point,
}

impl QuadCurve {
	pub fn point_at(&self, t: f64) -> Point {
		let a = self.start.lerp(self.control, t);
		let b = self.control.lerp(self.end, t);
		a.lerp(b, t)
	}

	/// Unit direction of travel where the curve meets `end`.
	pub fn end_direction(&self) -> Vector {
		let tangent = unit_or_zero(self.end - self.control);
		if tangent != Vector::zero() {
			return tangent;
		}
		let chord = unit_or_zero(self.end - self.start);
		if chord != Vector::zero() { chord } else { vector(1.0, 0.0) }
	}

	/// Approximate distance from `p` to the curve.
	pub fn distance_to(&self, p: Point) -> f64 {
		let mut best = f64::INFINITY;
		let mut prev = self.start;
		for i in 1..=HIT_SAMPLES {
			let next = self.point_at(i as f64 / HIT_SAMPLES as f64);
			best = best.min(distance_to_segment(p, prev, next));
			prev = next;
		}
		best
	}
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
	let ab = b - a;
	let len2 = ab.square_length();
	if len2 <= DIRECTION_EPSILON {
		return (p - a).length();
	}
	let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
	(p - (a + ab * t)).length()
}

/// Curve from `source` to `target` whose control point sits `bend` units
/// along the chord normal, off the chord midpoint.
pub fn build_path(source: Point, target: Point, bend: f64) -> QuadCurve {
	let mid = source.lerp(target, 0.5);
	let normal = vector(target.y - source.y, -(target.x - source.x));
	QuadCurve {
		start: source,
		control: mid + unit_or_zero(normal) * bend,
		end: target,
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
	/// Filled arrowhead for solid relations.
	Filled,
	/// Outlined arrowhead for dashed relations.
	Open,
}

impl From<EdgeStyle> for MarkerKind {
	fn from(style: EdgeStyle) -> Self {
		match style {
			EdgeStyle::Solid => MarkerKind::Filled,
			EdgeStyle::Dashed => MarkerKind::Open,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndMarker {
	pub tip: Point,
	pub direction: Vector,
	pub kind: MarkerKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeGeometry {
	/// Index of the edge in `NormalizedGraph::edges`.
	pub edge: usize,
	pub curve: QuadCurve,
	/// Set only when the edge carries a label.
	pub label_anchor: Option<Point>,
	pub marker: EndMarker,
}

/// Geometry for every edge whose endpoints both have a position, in edge order.
pub fn build_edges(graph: &NormalizedGraph, layout: &Layout, bend: f64) -> Vec<EdgeGeometry> {
	graph
		.edges()
		.iter()
		.enumerate()
		.filter_map(|(i, edge)| {
			let (Some(s), Some(t)) = (layout.get(edge.source), layout.get(edge.target)) else {
				log::debug!("skipping edge {i}: endpoint has no position");
				return None;
			};
			let curve = build_path(s, t, bend);
			Some(EdgeGeometry {
				edge: i,
				curve,
				label_anchor: edge.label.as_ref().map(|_| curve.point_at(0.5)),
				marker: EndMarker {
					tip: curve.end,
					direction: curve.end_direction(),
					kind: edge.style.into(),
				},
			})
		})
		.collect()
}
