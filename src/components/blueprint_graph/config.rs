use serde::Deserialize;

use super::error::{Error, Result};

/// Knobs of the force simulation. Changing them tunes layout density
/// without touching the algorithm.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
	pub repulsion: f64,
	pub rest_length: f64,
	pub stiffness: f64,
	pub damping: f64,
	pub center_pull: f64,
	pub dt: f64,
	pub iterations: usize,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			repulsion: 8000.0,
			rest_length: 140.0,
			stiffness: 0.02,
			damping: 0.85,
			center_pull: 0.02,
			dt: 0.02,
			iterations: 220,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
	/// Offset of the edge control point from the chord midpoint.
	pub bend: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			bend: 30.0,
			min_zoom: 0.4,
			max_zoom: 3.0,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	pub layout: LayoutParams,
	pub view: ViewConfig,
}

impl GraphConfig {
	/// Check ranges the simulation and the viewport rely on. The view starts
	/// at zoom 1, so the zoom bounds must contain it.
	pub fn validate(&self) -> Result<()> {
		let l = &self.layout;
		let v = &self.view;
		for (field, value) in [
			("layout.repulsion", l.repulsion),
			("layout.rest_length", l.rest_length),
			("layout.stiffness", l.stiffness),
			("layout.damping", l.damping),
			("layout.center_pull", l.center_pull),
			("layout.dt", l.dt),
			("view.bend", v.bend),
			("view.min_zoom", v.min_zoom),
			("view.max_zoom", v.max_zoom),
		] {
			if !value.is_finite() {
				return Err(invalid(field, format!("{value} is not finite")));
			}
		}
		if !(0.0..=1.0).contains(&l.damping) {
			return Err(invalid("layout.damping", format!("{} is outside [0, 1]", l.damping)));
		}
		if l.dt <= 0.0 {
			return Err(invalid("layout.dt", format!("{} must be positive", l.dt)));
		}
		if v.min_zoom <= 0.0 {
			return Err(invalid("view.min_zoom", format!("{} must be positive", v.min_zoom)));
		}
		if v.min_zoom > 1.0 {
			return Err(invalid(
				"view.min_zoom",
				format!("{} is above the initial zoom 1", v.min_zoom),
			));
		}
		if v.max_zoom < 1.0 {
			return Err(invalid(
				"view.max_zoom",
				format!("{} is below the initial zoom 1", v.max_zoom),
			));
		}
		Ok(())
	}
}

fn invalid(field: &'static str, reason: String) -> Error {
	Error::InvalidConfig { field, reason }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_documented_values() {
		let config = GraphConfig::default();
		assert_eq!(config.layout.rest_length, 140.0);
		assert_eq!(config.layout.stiffness, 0.02);
		assert_eq!(config.layout.damping, 0.85);
		assert_eq!(config.layout.center_pull, 0.02);
		assert_eq!(config.layout.dt, 0.02);
		assert_eq!(config.layout.iterations, 220);
		assert_eq!(config.view.bend, 30.0);
		assert_eq!((config.view.min_zoom, config.view.max_zoom), (0.4, 3.0));
		assert!(config.validate().is_ok());
	}

	fn parse(payload: &str) -> Result<GraphConfig> {
		let config: GraphConfig = serde_json::from_str(payload)?;
		config.validate()?;
		Ok(config)
	}

	#[test]
	fn partial_json_overrides_only_named_knobs() {
		let config = parse(r#"{"layout": {"rest_length": 200, "iterations": 50}}"#).unwrap();
		assert_eq!(config.layout.rest_length, 200.0);
		assert_eq!(config.layout.iterations, 50);
		assert_eq!(config.layout.damping, 0.85);
		assert_eq!(config.view, ViewConfig::default());
	}

	#[test]
	fn rejects_inverted_zoom_bounds() {
		let err = parse(r#"{"view": {"min_zoom": 1.0, "max_zoom": 0.5}}"#).unwrap_err();
		assert!(matches!(err, Error::InvalidConfig { field: "view.max_zoom", .. }));
	}

	#[test]
	fn zoom_bounds_must_contain_the_initial_zoom() {
		let err = parse(r#"{"view": {"min_zoom": 1.5, "max_zoom": 3.0}}"#).unwrap_err();
		assert!(matches!(err, Error::InvalidConfig { field: "view.min_zoom", .. }));

		let err = parse(r#"{"view": {"min_zoom": 0.2, "max_zoom": 0.8}}"#).unwrap_err();
		assert!(matches!(err, Error::InvalidConfig { field: "view.max_zoom", .. }));

		assert!(parse(r#"{"view": {"min_zoom": 1.0, "max_zoom": 1.0}}"#).is_ok());
	}

	#[test]
	fn malformed_config_is_a_payload_error() {
		assert!(matches!(parse(r#"{"layout": {"iterations": -1}}"#), Err(Error::Payload(_))));
	}

	#[test]
	fn rejects_out_of_range_simulation_values() {
		let mut config = GraphConfig::default();
		config.layout.damping = 1.5;
		assert!(config.validate().is_err());

		let mut config = GraphConfig::default();
		config.layout.dt = 0.0;
		assert!(config.validate().is_err());

		let mut config = GraphConfig::default();
		config.layout.repulsion = f64::NAN;
		assert!(matches!(
			config.validate(),
			Err(Error::InvalidConfig { field: "layout.repulsion", .. })
		));
	}

	#[test]
	fn zero_iterations_is_allowed() {
		let config = parse(r#"{"layout": {"iterations": 0}}"#).unwrap();
		assert_eq!(config.layout.iterations, 0);
	}
}
