use super::config::GraphConfig;
use super::geometry::{EdgeGeometry, build_edges, point, size};
use super::interaction::{HoverTarget, InteractionState};
use super::layout::{Layout, layout};
use super::model::{Normalized, NormalizedGraph, normalize};
use super::types::{EdgeStyle, GraphData};
use super::viewport::ViewportController;

const COLORS: &[&str] = &[
	"#38bdf8", "#f59e0b", "#34d399", "#f87171", "#a78bfa", "#fb923c", "#f472b6", "#94a3b8",
	"#facc15", "#2dd4bf",
];

pub const NODE_RADIUS: f64 = 24.0;
/// Screen-space half width of the band that counts as hovering an edge.
pub const EDGE_HIT_WIDTH: f64 = 6.0;
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 560.0;

/// Measured container size, falling back to the default when the
/// environment could not report a usable one.
pub fn viewport_size(width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let usable = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
	match (usable(width), usable(height)) {
		(Some(w), Some(h)) => (w, h),
		_ => {
			log::warn!(
				"viewport size {width:?}x{height:?} unavailable, using {DEFAULT_WIDTH}x{DEFAULT_HEIGHT}"
			);
			(DEFAULT_WIDTH, DEFAULT_HEIGHT)
		}
	}
}

/// Palette color for a group tag. Nodes without a group use the first color.
pub fn group_color(group: Option<&str>) -> &'static str {
	let Some(group) = group else {
		return COLORS[0];
	};
	// FNV-1a, stable across runs and targets
	let hash = group
		.bytes()
		.fold(0x811c_9dc5_u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
	COLORS[hash as usize % COLORS.len()]
}

#[derive(Clone, Debug, Default)]
pub struct HighlightFade {
	/// Eased-in highlight strength in `[0, 1]`.
	pub t: f64,
	/// Target that is still fading out after the pointer left it.
	pub prev: HoverTarget,
	delay_t: f64,
}

struct Scene {
	graph: NormalizedGraph,
	layout: Layout,
	edges: Vec<EdgeGeometry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderNode<'a> {
	pub id: &'a str,
	pub label: &'a str,
	pub group: Option<&'a str>,
	pub color: &'static str,
	pub x: f64,
	pub y: f64,
	pub highlighted: bool,
	/// Highlighted by the current or the fading target.
	pub lit: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderEdge<'a> {
	pub index: usize,
	pub source: &'a str,
	pub target: &'a str,
	pub label: Option<&'a str>,
	pub style: EdgeStyle,
	pub geometry: &'a EdgeGeometry,
	pub highlighted: bool,
	pub lit: bool,
}

/// Everything one mounted diagram view owns.
pub struct BlueprintGraphState {
	scene: Option<Scene>,
	config: GraphConfig,
	pub viewport: ViewportController,
	pub interaction: InteractionState,
	pub fade: HighlightFade,
	pub width: f64,
	pub height: f64,
}

impl BlueprintGraphState {
	/// An invalid `config` is replaced by the defaults.
	pub fn new(data: &GraphData, width: f64, height: f64, config: GraphConfig) -> Self {
		let config = match config.validate() {
			Ok(()) => config,
			Err(err) => {
				log::warn!("{err}, using the default config");
				GraphConfig::default()
			}
		};
		let mut state = Self {
			scene: None,
			viewport: ViewportController::new(&config.view),
			config,
			interaction: InteractionState::default(),
			fade: HighlightFade::default(),
			width,
			height,
		};
		state.set_data(data);
		state
	}

	/// Replace the snapshot. Positions are recomputed from scratch; the view
	/// transform is kept.
	pub fn set_data(&mut self, data: &GraphData) {
		self.interaction.clear();
		self.fade = HighlightFade::default();
		self.scene = match normalize(&data.nodes, &data.edges) {
			Normalized::Empty => {
				log::debug!("snapshot has no nodes");
				None
			}
			Normalized::Graph(graph) => Some(self.build_scene(graph)),
		};
	}

	/// A size change discards all positions and lays out again from the seed.
	pub fn resize(&mut self, width: f64, height: f64) {
		if width == self.width && height == self.height {
			return;
		}
		self.width = width;
		self.height = height;
		if let Some(scene) = self.scene.take() {
			log::debug!("relayout for {width}x{height}");
			self.scene = Some(self.build_scene(scene.graph));
		}
	}

	fn build_scene(&self, graph: NormalizedGraph) -> Scene {
		let layout = layout(&graph, size(self.width, self.height), &self.config.layout);
		let edges = build_edges(&graph, &layout, self.config.view.bend);
		Scene {
			graph,
			layout,
			edges,
		}
	}

	pub fn has_data(&self) -> bool {
		self.scene.is_some()
	}

	pub fn graph(&self) -> Option<&NormalizedGraph> {
		self.scene.as_ref().map(|s| &s.graph)
	}

	/// Topmost node under the screen point. Later nodes are drawn on top.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let scene = self.scene.as_ref()?;
		let p = self.viewport.transform().screen_to_world(point(sx, sy));
		scene
			.layout
			.positions()
			.iter()
			.rposition(|n| (*n - p).length() < NODE_RADIUS)
	}

	/// Closest edge whose curve passes within the hover band of the point.
	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let scene = self.scene.as_ref()?;
		let transform = self.viewport.transform();
		let p = transform.screen_to_world(point(sx, sy));
		let tolerance = EDGE_HIT_WIDTH / transform.k;
		scene
			.edges
			.iter()
			.map(|g| (g.edge, g.curve.distance_to(p)))
			.filter(|(_, d)| *d <= tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(idx, _)| idx)
	}

	pub fn target_at(&self, sx: f64, sy: f64) -> HoverTarget {
		if let Some(idx) = self.node_at_position(sx, sy) {
			if let Some(node) = self.graph().and_then(|g| g.node(idx)) {
				return HoverTarget::Node(node.id.clone());
			}
		}
		match self.edge_at_position(sx, sy) {
			Some(idx) => HoverTarget::Edge(idx),
			None => HoverTarget::None,
		}
	}

	/// Point the hover at whatever is under the screen point.
	pub fn hover_at(&mut self, sx: f64, sy: f64) -> bool {
		let target = self.target_at(sx, sy);
		self.set_hover(target)
	}

	pub fn set_hover(&mut self, target: HoverTarget) -> bool {
		let was_hovering = !self.interaction.hover().is_none();
		let previous = self.interaction.hover().clone();
		if !self.interaction.enter(target) {
			return false;
		}
		if was_hovering && self.interaction.hover().is_none() {
			self.fade.prev = previous;
		} else {
			self.fade.prev = HoverTarget::None;
			if !was_hovering {
				self.fade.delay_t = 0.0;
			}
		}
		true
	}

	/// The target whose highlight is on screen: the hovered one, or the one
	/// still fading out.
	pub fn highlight_source(&self) -> &HoverTarget {
		let current = self.interaction.hover();
		if current.is_none() { &self.fade.prev } else { current }
	}

	pub fn has_active_highlight(&self) -> bool {
		!self.highlight_source().is_none()
	}

	pub fn nodes(&self) -> Vec<RenderNode<'_>> {
		let Some(scene) = &self.scene else {
			return Vec::new();
		};
		let source = self.highlight_source();
		scene
			.graph
			.nodes()
			.iter()
			.zip(scene.layout.positions())
			.map(|(node, p)| RenderNode {
				id: &node.id,
				label: &node.label,
				group: node.group.as_deref(),
				color: group_color(node.group.as_deref()),
				x: p.x,
				y: p.y,
				highlighted: self.interaction.node_highlighted(&node.id),
				lit: source.highlights_node(&node.id),
			})
			.collect()
	}

	pub fn edges(&self) -> Vec<RenderEdge<'_>> {
		let Some(scene) = &self.scene else {
			return Vec::new();
		};
		let source = self.highlight_source();
		scene
			.edges
			.iter()
			.filter_map(|geometry| {
				let edge = scene.graph.edges().get(geometry.edge)?;
				let (from, to) = scene.graph.endpoints(geometry.edge)?;
				Some(RenderEdge {
					index: geometry.edge,
					source: from,
					target: to,
					label: edge.label.as_deref(),
					style: edge.style,
					geometry,
					highlighted: self.interaction.edge_highlighted(geometry.edge, from, to),
					lit: source.highlights_edge(geometry.edge, from, to),
				})
			})
			.collect()
	}

	/// Advance the highlight fade by `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		let hovering = !self.interaction.hover().is_none();
		let (target, delay, speed) = if hovering {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if hovering {
			self.fade.delay_t = (self.fade.delay_t + dt).min(delay);
			if self.fade.delay_t >= delay {
				self.fade.t += (target - self.fade.t) * speed * dt;
			}
		} else {
			self.fade.t += (target - self.fade.t) * speed * dt;
			if self.fade.t < 0.01 {
				self.fade.t = 0.0;
				self.fade.prev = HoverTarget::None;
			}
		}
	}
}
