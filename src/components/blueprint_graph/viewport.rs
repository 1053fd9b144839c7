//! Zoom and pan state driven by wheel and pointer events.

use super::config::ViewConfig;
use super::geometry::{Point, point, vector};

/// Maps world coordinates to screen pixels: `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	pub k: f64,
	pub x: f64,
	pub y: f64,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			k: 1.0,
			x: 0.0,
			y: 0.0,
		}
	}
}

impl Transform {
	#[cfg(test)]
	pub fn world_to_screen(&self, p: Point) -> Point {
		point(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	pub fn screen_to_world(&self, p: Point) -> Point {
		point((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	/// Zoom one wheel notch around `cursor`, keeping the world point under it fixed.
	pub fn zoomed_at(&self, cursor: Point, delta: f64, min_k: f64, max_k: f64) -> Self {
		let factor = if delta > 0.0 { 0.9 } else { 1.1 };
		let k = (self.k * factor).clamp(min_k, max_k);
		let scale = k / self.k;
		Self {
			k,
			x: cursor.x - (cursor.x - self.x) * scale,
			y: cursor.y - (cursor.y - self.y) * scale,
		}
	}

	pub fn panned_by(&self, dx: f64, dy: f64) -> Self {
		Self {
			x: self.x + dx,
			y: self.y + dy,
			..*self
		}
	}
}

/// Sole owner of the view `Transform`. Each handler replaces the transform
/// with a complete new value.
#[derive(Clone, Debug)]
pub struct ViewportController {
	transform: Transform,
	/// Last pointer position while a pan session is active.
	pan_from: Option<Point>,
	min_zoom: f64,
	max_zoom: f64,
}

impl ViewportController {
	pub fn new(view: &ViewConfig) -> Self {
		Self {
			transform: Transform::default(),
			pan_from: None,
			min_zoom: view.min_zoom,
			max_zoom: view.max_zoom,
		}
	}

	pub fn transform(&self) -> Transform {
		self.transform
	}

	pub fn is_panning(&self) -> bool {
		self.pan_from.is_some()
	}

	pub fn wheel(&mut self, cursor: Point, delta: f64) {
		self.transform = self
			.transform
			.zoomed_at(cursor, delta, self.min_zoom, self.max_zoom);
	}

	pub fn pointer_down(&mut self, at: Point) {
		self.pan_from = Some(at);
	}

	/// Returns `true` when the move panned the view.
	pub fn pointer_move(&mut self, at: Point) -> bool {
		let Some(from) = self.pan_from else {
			return false;
		};
		let delta = at - from;
		self.transform = self.transform.panned_by(delta.x, delta.y);
		self.pan_from = Some(at);
		delta != vector(0.0, 0.0)
	}

	pub fn pointer_up(&mut self) {
		self.pan_from = None;
	}
}
