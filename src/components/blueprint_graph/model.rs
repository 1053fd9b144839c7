//! Input validation: resolves edge endpoints to node indices and drops what
//! cannot be drawn.

use std::collections::HashMap;

use super::types::{EdgeStyle, GraphEdge, GraphNode};

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: String,
	/// The input label, or the id when none was given.
	pub label: String,
	pub group: Option<String>,
}

/// An edge whose endpoints are both known, stored as node indices.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub source: usize,
	pub target: usize,
	pub label: Option<String>,
	pub style: EdgeStyle,
}

/// A non-empty graph with unique node ids and only valid edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedGraph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<String, usize>,
}

impl NormalizedGraph {
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, idx: usize) -> Option<&Node> {
		self.nodes.get(idx)
	}

	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Ids of the two endpoints of edge `idx`.
	pub fn endpoints(&self, idx: usize) -> Option<(&str, &str)> {
		let edge = self.edges.get(idx)?;
		Some((
			self.nodes[edge.source].id.as_str(),
			self.nodes[edge.target].id.as_str(),
		))
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Normalized {
	/// Nothing to lay out or draw.
	Empty,
	Graph(NormalizedGraph),
}

/// Keeps the first node for every id and every edge whose endpoints exist,
/// both in input order.
pub fn normalize(nodes: &[GraphNode], edges: &[GraphEdge]) -> Normalized {
	let mut graph = NormalizedGraph::default();

	for node in nodes {
		if graph.index.contains_key(&node.id) {
			log::debug!("ignoring duplicate node id {:?}", node.id);
			continue;
		}
		graph.index.insert(node.id.clone(), graph.nodes.len());
		graph.nodes.push(Node {
			id: node.id.clone(),
			label: node.label.clone().unwrap_or_else(|| node.id.clone()),
			group: node.group.clone(),
		});
	}

	if graph.nodes.is_empty() {
		return Normalized::Empty;
	}

	for edge in edges {
		let (Some(source), Some(target)) =
			(graph.index_of(&edge.source), graph.index_of(&edge.target))
		else {
			log::debug!("dropping dangling edge {} -> {}", edge.source, edge.target);
			continue;
		};
		graph.edges.push(Edge {
			source,
			target,
			label: edge.label.clone(),
			style: edge.style,
		});
	}

	Normalized::Graph(graph)
}
