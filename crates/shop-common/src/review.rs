use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CommonError;

/// A customer review of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    /// Star rating, 1..=5
    pub rating: u8,
    pub comment: String,
    /// RFC 3339 timestamp as stored by the review source
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Reviews grouped by product id, each group in source order.
#[derive(Debug, Clone, Default)]
pub struct ReviewBook {
    by_product: HashMap<String, Vec<Review>>,
    total: usize,
}

impl ReviewBook {
    pub fn new(reviews: Vec<Review>) -> Result<Self, CommonError> {
        let total = reviews.len();
        let mut by_product: HashMap<String, Vec<Review>> = HashMap::new();
        for review in reviews {
            if !(1..=5).contains(&review.rating) {
                return Err(CommonError::InvalidReviewRating {
                    id: review.id,
                    rating: review.rating,
                });
            }
            by_product
                .entry(review.product_id.clone())
                .or_default()
                .push(review);
        }
        Ok(Self { by_product, total })
    }

    pub fn from_json(json: &str, origin: &str) -> Result<Self, CommonError> {
        let reviews: Vec<Review> =
            serde_json::from_str(json).map_err(|source| CommonError::Json {
                path: origin.to_string(),
                source,
            })?;
        Self::new(reviews)
    }

    pub fn load(path: &Path) -> Result<Self, CommonError> {
        let content = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let book = Self::from_json(&content, &path.display().to_string())?;
        info!(path = %path.display(), reviews = book.len(), "reviews loaded");
        Ok(book)
    }

    /// Reviews for a product; empty when the product has none.
    pub fn for_product(&self, product_id: &str) -> &[Review] {
        self.by_product
            .get(product_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
