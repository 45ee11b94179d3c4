use std::path::{Path, PathBuf};

use shop_common::catalog::Catalog;
use tracing::info;

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to a JSON product catalog. `None` serves the built-in sample catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `CATALOG_PATH`: JSON array of products (omit to use the sample catalog)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(std::env::var("CATALOG_PATH").ok())
    }

    fn from_vars(catalog_path: Option<String>) -> Result<Self, AppError> {
        let catalog_path = catalog_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        if let Some(path) = &catalog_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "catalog file not found at {}",
                    path.display()
                )));
            }
        }

        Ok(Self { catalog_path })
    }

    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }

    /// Load the configured catalog, falling back to the built-in sample.
    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        match self.catalog_path() {
            Some(path) => Ok(Catalog::load(path)?),
            None => {
                info!("CATALOG_PATH not set, using sample catalog");
                Ok(shop_common::sample::sample_catalog())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_path_uses_sample() {
        let config = Config::from_vars(None).unwrap();
        assert!(config.catalog_path().is_none());

        let config = Config::from_vars(Some("  ".to_string())).unwrap();
        assert!(config.catalog_path().is_none());
    }

    #[test]
    fn test_missing_catalog_file_rejected() {
        let err = Config::from_vars(Some("/definitely/not/here/catalog.json".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("catalog file not found")));
    }

    #[test]
    fn test_sample_catalog_when_unset() {
        let catalog = Config::from_vars(None).unwrap().load_catalog().unwrap();
        assert_eq!(catalog.len(), 8);
    }
}
