//! Hover target and the highlight flags derived from it.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverTarget {
	#[default]
	None,
	Node(String),
	/// Index into `NormalizedGraph::edges`.
	Edge(usize),
}

impl HoverTarget {
	pub fn is_none(&self) -> bool {
		matches!(self, HoverTarget::None)
	}

	pub fn highlights_node(&self, id: &str) -> bool {
		matches!(self, HoverTarget::Node(hovered) if hovered == id)
	}

	/// An edge lights up when it is hovered or touches the hovered node.
	pub fn highlights_edge(&self, index: usize, source: &str, target: &str) -> bool {
		match self {
			HoverTarget::None => false,
			HoverTarget::Edge(hovered) => *hovered == index,
			HoverTarget::Node(id) => id == source || id == target,
		}
	}
}

/// Sole owner of the current `HoverTarget`.
#[derive(Clone, Debug, Default)]
pub struct InteractionState {
	hover: HoverTarget,
}

impl InteractionState {
	pub fn hover(&self) -> &HoverTarget {
		&self.hover
	}

	/// Replace the target in one step, returning `true` if it changed.
	pub fn enter(&mut self, target: HoverTarget) -> bool {
		if self.hover == target {
			return false;
		}
		self.hover = target;
		true
	}

	pub fn clear(&mut self) -> bool {
		self.enter(HoverTarget::None)
	}

	pub fn node_highlighted(&self, id: &str) -> bool {
		self.hover.highlights_node(id)
	}

	pub fn edge_highlighted(&self, index: usize, source: &str, target: &str) -> bool {
		self.hover.highlights_edge(index, source, target)
	}
}
