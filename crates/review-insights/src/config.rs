use std::path::PathBuf;

use shop_common::catalog::Catalog;
use shop_common::review::ReviewBook;
use tracing::info;

use crate::error::AppError;

pub const DEFAULT_MENTION_COUNT: u32 = 50;
pub const MAX_MENTION_COUNT: u32 = 500;

/// Application configuration loaded explicitly from environment variables.
///
/// Unset data paths fall back to the built-in sample catalog and reviews.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: Option<PathBuf>,
    pub reviews_path: Option<PathBuf>,
    /// Posts simulated per product when a request does not say
    pub mention_count: u32,
    /// Fixed seed for the mention generator. `None` seeds from OS entropy per request.
    pub social_seed: Option<u64>,
}

/// Raw environment values, split out so parsing can be tested without touching the
/// process environment.
#[derive(Debug, Default)]
struct Vars {
    catalog_path: Option<String>,
    reviews_path: Option<String>,
    mention_count: Option<String>,
    social_seed: Option<String>,
}

impl Config {
    /// Optional:
    /// - `CATALOG_PATH`: JSON array of products
    /// - `REVIEWS_PATH`: JSON array of reviews
    /// - `SOCIAL_MENTION_COUNT`: default simulated posts per request (1..=500, default 50)
    /// - `SOCIAL_SEED`: u64 seed making simulated mentions reproducible
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(Vars {
            catalog_path: std::env::var("CATALOG_PATH").ok(),
            reviews_path: std::env::var("REVIEWS_PATH").ok(),
            mention_count: std::env::var("SOCIAL_MENTION_COUNT").ok(),
            social_seed: std::env::var("SOCIAL_SEED").ok(),
        })
    }

    fn from_vars(vars: Vars) -> Result<Self, AppError> {
        let catalog_path = existing_path("CATALOG_PATH", vars.catalog_path)?;
        let reviews_path = existing_path("REVIEWS_PATH", vars.reviews_path)?;

        let mention_count = match vars.mention_count {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_MENTION_COUNT).contains(n))
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "SOCIAL_MENTION_COUNT must be an integer in 1..={MAX_MENTION_COUNT}, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_MENTION_COUNT,
        };

        let social_seed = match vars.social_seed {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("SOCIAL_SEED must be a u64, got '{raw}'"))
            })?),
            None => None,
        };

        Ok(Self {
            catalog_path,
            reviews_path,
            mention_count,
            social_seed,
        })
    }

    pub fn load_catalog(&self) -> Result<Catalog, AppError> {
        match &self.catalog_path {
            Some(path) => Ok(Catalog::load(path)?),
            None => {
                info!("CATALOG_PATH not set, using sample catalog");
                Ok(shop_common::sample::sample_catalog())
            }
        }
    }

    pub fn load_reviews(&self) -> Result<ReviewBook, AppError> {
        match &self.reviews_path {
            Some(path) => Ok(ReviewBook::load(path)?),
            None => {
                info!("REVIEWS_PATH not set, using sample reviews");
                Ok(shop_common::sample::sample_reviews())
            }
        }
    }
}

fn existing_path(var: &str, value: Option<String>) -> Result<Option<PathBuf>, AppError> {
    let Some(path) = value.filter(|v| !v.trim().is_empty()).map(PathBuf::from) else {
        return Ok(None);
    };
    if !path.exists() {
        return Err(AppError::Config(format!(
            "{var} points to a missing file: {}",
            path.display()
        )));
    }
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(Vars::default()).unwrap();
        assert_eq!(config.mention_count, DEFAULT_MENTION_COUNT);
        assert_eq!(config.social_seed, None);
        assert!(config.catalog_path.is_none());
        assert!(config.reviews_path.is_none());
    }

    #[test]
    fn test_parses_count_and_seed() {
        let config = Config::from_vars(Vars {
            mention_count: Some("120".to_string()),
            social_seed: Some(" 42 ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(config.mention_count, 120);
        assert_eq!(config.social_seed, Some(42));
    }

    #[test]
    fn test_rejects_out_of_range_count() {
        for raw in ["0", "501", "many"] {
            let err = Config::from_vars(Vars {
                mention_count: Some(raw.to_string()),
                ..Default::default()
            })
            .unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{raw}");
        }
    }

    #[test]
    fn test_rejects_missing_reviews_file() {
        let err = Config::from_vars(Vars {
            reviews_path: Some("/no/such/reviews.json".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("REVIEWS_PATH"));
    }

    #[test]
    fn test_sample_data_fallback() {
        let config = Config::from_vars(Vars::default()).unwrap();
        assert_eq!(config.load_catalog().unwrap().len(), 8);
        assert!(!config.load_reviews().unwrap().is_empty());
    }
}
