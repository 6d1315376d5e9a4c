//! Cache service wiring
//!
//! Resolves cache store configurations by name. Storage engines themselves
//! live outside this crate; the manager only hands out the configuration an
//! engine would be built from.

use std::collections::HashMap;

use crate::config::{CacheConfig, StoreConfig};

/// Cache service errors
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache store `{0}` is not configured")]
    UnknownStore(String),

    #[error("default cache store `{0}` is not configured")]
    MissingDefault(String),
}

/// Named cache store configurations with a default
///
/// # Examples
///
/// ```
/// use kiln::config::{CacheConfig, StoreConfig};
/// use kiln::services::CacheManager;
///
/// let manager = CacheManager::from_config(&CacheConfig::default()).unwrap();
/// assert_eq!(manager.store(None).unwrap(), &StoreConfig::Memory);
/// assert!(manager.store(Some("redis")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CacheManager {
    default: String,
    configurations: HashMap<String, StoreConfig>,
}

impl CacheManager {
    /// Builds the manager, checking that the default store exists
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        if !config.configurations.contains_key(&config.default) {
            return Err(CacheError::MissingDefault(config.default.clone()));
        }

        tracing::debug!(
            default = %config.default,
            stores = config.configurations.len(),
            "cache manager registered"
        );

        Ok(Self {
            default: config.default.clone(),
            configurations: config.configurations.clone(),
        })
    }

    pub fn default_store(&self) -> &str {
        &self.default
    }

    /// Configuration of a named store, or of the default store for `None`
    pub fn store(&self, name: Option<&str>) -> Result<&StoreConfig, CacheError> {
        let name = name.unwrap_or(self.default.as_str());
        self.configurations
            .get(name)
            .ok_or_else(|| CacheError::UnknownStore(name.to_string()))
    }

    /// Configured store names, sorted
    pub fn store_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.configurations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn config() -> CacheConfig {
        CacheConfig {
            default: "file".to_string(),
            configurations: HashMap::from([
                ("memory".to_string(), StoreConfig::Memory),
                (
                    "file".to_string(),
                    StoreConfig::File {
                        path: PathBuf::from("storage/cache"),
                    },
                ),
            ]),
        }
    }

    #[test]
    fn test_default_store() {
        let manager = CacheManager::from_config(&config()).unwrap();

        assert_eq!(manager.default_store(), "file");
        assert!(matches!(manager.store(None).unwrap(), StoreConfig::File { .. }));
    }

    #[test]
    fn test_named_store() {
        let manager = CacheManager::from_config(&config()).unwrap();

        assert_eq!(manager.store(Some("memory")).unwrap(), &StoreConfig::Memory);
        assert_eq!(manager.store_names(), vec!["file", "memory"]);
    }

    #[test]
    fn test_unknown_store() {
        let manager = CacheManager::from_config(&config()).unwrap();

        assert!(matches!(
            manager.store(Some("redis")),
            Err(CacheError::UnknownStore(name)) if name == "redis"
        ));
    }

    #[test]
    fn test_missing_default() {
        let mut config = config();
        config.default = "redis".to_string();

        assert!(matches!(
            CacheManager::from_config(&config),
            Err(CacheError::MissingDefault(_))
        ));
    }
}
