/// Error types shared across the shop tool servers.
///
/// These cover loading and validating the data files (catalog, reviews) that both
/// servers read at startup. Application-specific errors are defined in each server
/// crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("product {id}: invalid price {price}")]
    InvalidPrice { id: String, price: f64 },

    #[error("product {id}: rating {rating} outside 0..=5")]
    InvalidRating { id: String, rating: f64 },

    #[error("review {id}: rating {rating} outside 1..=5")]
    InvalidReviewRating { id: String, rating: u8 },
}
