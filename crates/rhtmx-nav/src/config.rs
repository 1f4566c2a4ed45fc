// File: src/config.rs
// Purpose: Navigation configuration parsing from rhtmx-nav.toml

use crate::error::ConfigError;
use crate::route::{RouteDef, RouteTable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Navigation configuration
///
/// ```toml
/// mount_target = "app"
///
/// [[routes]]
/// path = "/"
/// view = "root"
///
/// [[routes]]
/// path = "/workflow/:workflowId"
/// view = "root"
/// name = "workflow"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    /// Id of the element the resolved view is attached to (default: "app")
    #[serde(default = "default_mount_target")]
    pub mount_target: String,

    /// Base path the app is served under (e.g., "/console")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Whether clicks on in-app links are turned into navigations (default: true)
    #[serde(default = "default_true")]
    pub intercept_links: bool,

    /// Ordered routes; the first matching entry wins
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub path: String,

    /// Name of a registered view
    pub view: String,

    #[serde(default)]
    pub name: Option<String>,
}

// Default values
fn default_mount_target() -> String {
    "app".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            mount_target: default_mount_target(),
            base_path: None,
            intercept_links: true,
            routes: Vec::new(),
        }
    }
}

impl NavConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        toml::from_str(content).context("Failed to parse navigation config")
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read navigation config {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file: {:?}", path))
    }

    /// Load configuration from default path (./rhtmx-nav.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rhtmx-nav.toml")
    }

    /// Resolves view names into route definitions, preserving order
    pub fn route_defs<V, F>(&self, resolve_view: F) -> std::result::Result<Vec<RouteDef<V>>, ConfigError>
    where
        F: Fn(&str) -> Option<V>,
    {
        self.routes
            .iter()
            .map(|route| {
                let view = resolve_view(&route.view).ok_or_else(|| ConfigError::UnknownView {
                    pattern: route.path.clone(),
                    view: route.view.clone(),
                })?;
                let def = RouteDef::new(route.path.clone(), view);
                Ok(match &route.name {
                    Some(name) => def.named(name.clone()),
                    None => def,
                })
            })
            .collect()
    }

    /// Builds the validated route table
    pub fn route_table<V, F>(&self, resolve_view: F) -> std::result::Result<RouteTable<V>, ConfigError>
    where
        F: Fn(&str) -> Option<V>,
    {
        RouteTable::from_defs(self.route_defs(resolve_view)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const WORKFLOW_ROUTES: &str = r#"
        [[routes]]
        path = "/"
        view = "root"

        [[routes]]
        path = "/workflow/:workflowId"
        view = "root"
        name = "workflow"
    "#;

    fn views(name: &str) -> Option<&'static str> {
        match name {
            "root" => Some("RootView"),
            _ => None,
        }
    }

    #[test]
    fn test_default_config() {
        let config = NavConfig::default();
        assert_eq!(config.mount_target, "app");
        assert_eq!(config.base_path, None);
        assert!(config.intercept_links);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_parse_routes_in_order() {
        let config = NavConfig::from_toml_str(WORKFLOW_ROUTES).unwrap();
        assert_eq!(config.mount_target, "app");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].path, "/workflow/:workflowId");
        assert_eq!(config.routes[1].name.as_deref(), Some("workflow"));

        let table = config.route_table(views).unwrap();
        let patterns: Vec<&str> = table.iter().map(|e| e.pattern().as_str()).collect();
        assert_eq!(patterns, vec!["/", "/workflow/:workflowId"]);
        assert!(table.find_by_name("workflow").is_some());
    }

    #[test]
    fn test_unknown_view() {
        let config = NavConfig::from_toml_str(
            r#"
            [[routes]]
            path = "/"
            view = "dashboard"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.route_table(views).unwrap_err(),
            ConfigError::UnknownView {
                pattern: "/".to_string(),
                view: "dashboard".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(NavConfig::from_toml_str("routes = 3").is_err());
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(NavConfig::from_toml_str("  \n").unwrap(), NavConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mount_target = \"root\"\nbase_path = \"/console\"").unwrap();
        write!(file, "{}", WORKFLOW_ROUTES).unwrap();

        let config = NavConfig::load(file.path()).unwrap();
        assert_eq!(config.mount_target, "root");
        assert_eq!(config.base_path.as_deref(), Some("/console"));
        assert_eq!(config.routes.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = NavConfig::load(dir.path().join("rhtmx-nav.toml")).unwrap();
        assert_eq!(config, NavConfig::default());
    }
}
