use serde::Deserialize;

use crate::error::DashboardError;

/// Tunables for the dashboard client.
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for backend routes. Empty means same origin.
    pub api_base: String,
    /// Quiet period before a delta edit triggers a refetch.
    pub debounce_ms: u32,
    pub suggestion_limit: usize,
    pub default_step: u32,
    pub step_presets: Vec<u32>,
    /// Delta slider bounds, in percent.
    pub delta_min: f64,
    pub delta_max: f64,
    pub delta_default: f64,
    pub default_entity: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            debounce_ms: 500,
            suggestion_limit: 6,
            default_step: 5,
            step_presets: vec![1, 5, 10],
            delta_min: 0.0,
            delta_max: 50.0,
            delta_default: 20.0,
            default_entity: "Florida Polytechnic University".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Config baked in at build time: `CAMPUSLENS_CONFIG` (JSON, partial is
    /// fine) if set, then `api_base` from `CAMPUSLENS_API_BASE` if set.
    pub fn from_build_env() -> Result<Self, DashboardError> {
        let mut config = match option_env!("CAMPUSLENS_CONFIG") {
            Some(raw) => Self::from_json(raw)?,
            None => Self::default(),
        };
        if let Some(base) = option_env!("CAMPUSLENS_API_BASE") {
            config.api_base = base.trim_end_matches('/').to_string();
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, DashboardError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.debounce_ms == 0 {
            return Err(DashboardError::Config("debounce_ms must be positive".into()));
        }
        if self.suggestion_limit == 0 {
            return Err(DashboardError::Config(
                "suggestion_limit must be positive".into(),
            ));
        }
        if self.step_presets.is_empty() || self.step_presets.contains(&0) {
            return Err(DashboardError::Config(
                "step_presets must be non-empty positive integers".into(),
            ));
        }
        if !self.step_presets.contains(&self.default_step) {
            return Err(DashboardError::Config(format!(
                "default_step {} is not one of the presets {:?}",
                self.default_step, self.step_presets
            )));
        }
        if self.delta_min >= self.delta_max {
            return Err(DashboardError::Config(format!(
                "delta range [{}, {}] is empty",
                self.delta_min, self.delta_max
            )));
        }
        if self.delta_default < self.delta_min || self.delta_default > self.delta_max {
            return Err(DashboardError::Config(format!(
                "delta_default {} outside [{}, {}]",
                self.delta_default, self.delta_min, self.delta_max
            )));
        }
        Ok(())
    }

    /// Absolute URL for a backend route such as `/api/metadata`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.suggestion_limit, 6);
        assert_eq!(config.default_step, 5);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = DashboardConfig::from_json(r#"{"api_base": "http://localhost:5000"}"#).unwrap();
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.step_presets, vec![1, 5, 10]);
        assert_eq!(
            config.endpoint("/api/metadata"),
            "http://localhost:5000/api/metadata"
        );
    }

    #[test]
    fn test_json_config_is_validated() {
        let err = DashboardConfig::from_json(r#"{"debounce_ms": 0}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)), "got {:?}", err);

        let err = DashboardConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_default_step_must_be_a_preset() {
        let config = DashboardConfig {
            default_step: 3,
            ..DashboardConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)), "got {:?}", err);
    }

    #[test]
    fn test_rejects_inverted_delta_range() {
        let config = DashboardConfig {
            delta_min: 50.0,
            delta_max: 10.0,
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_step_preset() {
        let config = DashboardConfig {
            step_presets: vec![0, 5],
            ..DashboardConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
