// File: src/config.rs
// Purpose: Configuration parsing from kiln.toml

use anyhow::{Context, Result};
use kiln_router::{Group, Route, Routes};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::validation::Catalog;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub i18n: I18nConfig,
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Namespace applied to every handler action (e.g. "app\\controllers")
    #[serde(default)]
    pub namespace: Option<String>,

    /// Path prefix applied to every route (e.g. "/api")
    #[serde(default)]
    pub prefix: Option<String>,

    /// Declared routes, in matching order
    #[serde(default)]
    pub routes: Vec<RouteDefinition>,
}

/// A route declared in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDefinition {
    /// HTTP methods; upper-cased when the route is built (default: GET)
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    pub pattern: String,

    /// Handler reference: "Controller::method"
    pub action: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub middleware: Vec<String>,

    /// Parameter constraints (parameter name → regex fragment)
    #[serde(default)]
    pub patterns: HashMap<String, String>,
}

/// Cache configuration: the default store and every named store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_store")]
    pub default: String,

    #[serde(default = "default_cache_configurations")]
    pub configurations: HashMap<String, StoreConfig>,
}

/// Cache store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// In-process store
    Memory,

    /// Files under a directory
    File { path: PathBuf },

    /// Redis-compatible server
    Redis {
        url: String,
        #[serde(default = "default_key_prefix")]
        prefix: String,
    },

    /// Store that keeps nothing
    Null,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default = "default_language")]
    pub language: String,

    /// Message table (key → message with `%s` placeholders)
    #[serde(default)]
    pub messages: HashMap<String, String>,
}

// Default values
fn default_name() -> String {
    "kiln-app".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn default_cache_store() -> String {
    "memory".to_string()
}

fn default_cache_configurations() -> HashMap<String, StoreConfig> {
    HashMap::from([("memory".to_string(), StoreConfig::Memory)])
}

fn default_key_prefix() -> String {
    "kiln:".to_string()
}

fn default_language() -> String {
    "en_US".to_string()
}

// Default implementations
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default: default_cache_store(),
            configurations: default_cache_configurations(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            messages: HashMap::new(),
        }
    }
}

impl I18nConfig {
    /// Message catalog for translated validation errors
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.messages.clone())
    }
}

impl RouteDefinition {
    /// Builds the route this definition describes
    pub fn to_route(&self) -> Route {
        let methods: Vec<String> = self
            .methods
            .iter()
            .map(|method| method.to_ascii_uppercase())
            .collect();

        let mut route = Route::new(methods, self.pattern.clone(), self.action.clone())
            .middleware(self.middleware.clone())
            .patterns(self.patterns.clone());

        if let Some(name) = &self.name {
            route = route.with_name(name.clone());
        }

        route
    }
}

impl RoutingConfig {
    /// Builds the route table, applying the global namespace and prefix
    pub fn build_routes(&self) -> Routes {
        let mut group = Group::new();
        if let Some(prefix) = &self.prefix {
            group = group.with_prefix(prefix.clone());
        }
        if let Some(namespace) = &self.namespace {
            group = group.with_namespace(namespace.clone());
        }

        let mut routes = Routes::new();
        routes.group(group, |routes| {
            for definition in &self.routes {
                routes.add(definition.to_route());
            }
        });

        tracing::debug!(routes = routes.len(), "built route table from configuration");
        routes
    }
}

impl Config {
    /// Load configuration from kiln.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            tracing::debug!(?path, "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./kiln.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("kiln.toml")
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that would build unusable routes
    fn validate(&self) -> Result<()> {
        for definition in &self.routing.routes {
            if definition.methods.is_empty() {
                anyhow::bail!("Route '{}' declares no methods", definition.pattern);
            }
        }
        Ok(())
    }
}
