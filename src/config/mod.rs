//! Configuration loading and management

use crate::core::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Route configuration for one entity class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Entity field holding the slug (e.g., "slug", "permalink")
    pub field: String,

    /// URL path prefix for this class (e.g., "/products")
    #[serde(default)]
    pub prefix: String,
}

impl RouteConfig {
    pub fn new(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            prefix: prefix.into(),
        }
    }

    /// The prefix without surrounding slashes
    pub fn trimmed_prefix(&self) -> &str {
        self.prefix.trim_matches('/')
    }

    /// `/` followed by the trimmed prefix
    pub fn static_prefix(&self) -> String {
        format!("/{}", self.trimmed_prefix())
    }
}

/// Complete configuration for slug routing
///
/// Classes keep the order in which they appear in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Maximum number of entities per class when listing every route;
    /// absent or zero means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_collection_limit: Option<usize>,

    /// Entity class -> route configuration
    #[serde(default)]
    pub routes: IndexMap<String, RouteConfig>,
}

impl RoutingConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: err.to_string(),
            },
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|err| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Add or replace the route configuration of a class
    pub fn with_route(mut self, class: impl Into<String>, route: RouteConfig) -> Self {
        self.routes.insert(class.into(), route);
        self
    }

    pub fn with_collection_limit(mut self, limit: usize) -> Self {
        self.route_collection_limit = Some(limit);
        self
    }

    /// Route configuration for a class
    pub fn route_for(&self, class: &str) -> Option<&RouteConfig> {
        self.routes.get(class)
    }

    /// The effective limit for listing every route (`None` = unbounded)
    pub fn collection_limit(&self) -> Option<usize> {
        self.route_collection_limit.filter(|limit| *limit > 0)
    }

    /// Reject routes without a field name
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (class, route) in &self.routes {
            if route.field.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("routes.{}.field", class),
                    message: "field name must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge several configurations
    ///
    /// Later configurations override the route of a class they share with
    /// earlier ones (the class keeps its first position) and override the
    /// collection limit when they set one.
    pub fn merge(configs: Vec<RoutingConfig>) -> Self {
        let mut merged = RoutingConfig::default();
        for config in configs {
            if config.route_collection_limit.is_some() {
                merged.route_collection_limit = config.route_collection_limit;
            }
            merged.routes.extend(config.routes);
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
route_collection_limit: 50
routes:
  product:
    field: slug
    prefix: /products/
  taxon:
    field: permalink
    prefix: t
"#;

    #[test]
    fn test_from_yaml_str_keeps_order() {
        let config = RoutingConfig::from_yaml_str(YAML).unwrap();
        let classes: Vec<&str> = config.routes.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["product", "taxon"]);
        assert_eq!(config.collection_limit(), Some(50));
        assert_eq!(config.route_for("taxon").unwrap().field, "permalink");
    }

    #[test]
    fn test_static_prefix_trims_slashes() {
        let config = RoutingConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.route_for("product").unwrap().static_prefix(), "/products");
        assert_eq!(config.route_for("taxon").unwrap().static_prefix(), "/t");
        assert_eq!(RouteConfig::new("slug", "").static_prefix(), "/");
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        let config = RoutingConfig::default().with_collection_limit(0);
        assert_eq!(config.collection_limit(), None);
        assert_eq!(RoutingConfig::default().collection_limit(), None);
    }

    #[test]
    fn test_empty_field_rejected() {
        let err = RoutingConfig::from_yaml_str("routes:\n  product:\n    field: ''\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_yaml_serialization() {
        let config = RoutingConfig::from_yaml_str(YAML).unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = RoutingConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_merge_last_wins() {
        let first = RoutingConfig::default()
            .with_route("product", RouteConfig::new("slug", "/p"))
            .with_route("taxon", RouteConfig::new("permalink", "/t"))
            .with_collection_limit(10);
        let second = RoutingConfig::default().with_route("product", RouteConfig::new("code", "/item"));

        let merged = RoutingConfig::merge(vec![first, second]);
        let classes: Vec<&str> = merged.routes.keys().map(String::as_str).collect();
        assert_eq!(classes, vec!["product", "taxon"]);
        assert_eq!(merged.route_for("product").unwrap().field, "code");
        assert_eq!(merged.collection_limit(), Some(10));
    }
}
