use serde::Deserialize;

use super::error::Result;

/// A company (or any other entity) as produced by the graph parser.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	/// Classification tag such as a jurisdiction; only picks a color and badge.
	#[serde(default)]
	pub group: Option<String>,
}

#[cfg(test)]
impl GraphNode {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			group: None,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
	#[default]
	Solid,
	Dashed,
}

/// A directed relation (contract, payment) between two node ids.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default, deserialize_with = "style_or_default")]
	pub style: EdgeStyle,
}

#[cfg(test)]
impl GraphEdge {
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			label: None,
			style: EdgeStyle::Solid,
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_style(mut self, style: EdgeStyle) -> Self {
		self.style = style;
		self
	}
}

// Parsers emit `"style": null` for plain arrows.
fn style_or_default<'de, D>(deserializer: D) -> std::result::Result<EdgeStyle, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<EdgeStyle>::deserialize(deserializer)?.unwrap_or_default())
}

/// One immutable snapshot of the diagram input.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Parse the `{ nodes: [...], edges: [...] }` payload of the graph parser.
	pub fn from_json(payload: &str) -> Result<Self> {
		Ok(serde_json::from_str(payload)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_parser_payload_with_optional_fields() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": "A", "label": "TONY HK LTD", "group": "HK"},
					{"id": "B"}
				],
				"edges": [
					{"source": "A", "target": "B", "label": "KONTRAKT #1", "style": "dashed"},
					{"source": "B", "target": "A", "style": null},
					{"source": "B", "target": "A"}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].group.as_deref(), Some("HK"));
		assert_eq!(data.nodes[1].label, None);
		assert_eq!(data.edges[0].style, EdgeStyle::Dashed);
		assert_eq!(data.edges[1].style, EdgeStyle::Solid);
		assert_eq!(data.edges[2].style, EdgeStyle::Solid);
		assert_eq!(data.edges[2].label, None);
	}

	#[test]
	fn missing_lists_default_to_empty() {
		let data = GraphData::from_json("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.edges.is_empty());
	}

	#[test]
	fn rejects_malformed_payload() {
		assert!(GraphData::from_json(r#"{"nodes": [{"label": "no id"}]}"#).is_err());
		assert!(GraphData::from_json(r#"{"edges": [{"source": "A", "target": "B", "style": "dotted"}]}"#).is_err());
		assert!(GraphData::from_json("not json").is_err());
	}
}
