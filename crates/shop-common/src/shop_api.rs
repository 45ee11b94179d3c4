use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryCount, Product, ProductPage};

// --- product-finder ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionInfo {
    /// Answer key, e.g. "price_range"
    pub id: String,
    pub text: String,
    /// Allowed answers, in display order
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RecommendProductsParams {
    /// Product category such as "Electronics", or "Any".
    pub category: Option<String>,
    /// Budget such as "Under $50", "$100-$500" or "No budget limit".
    pub price_range: Option<String>,
    /// What matters most: "Quality", "Price", "Brand", "Features" or "Reviews".
    pub feature_priority: Option<String>,
    /// Intended use such as "Personal" or "Gift".
    pub usage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            rating: product.rating,
            reviews: product.reviews,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecommendProductsResponse {
    pub recommendations: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub name: String,
    pub product_count: usize,
}

impl From<CategoryCount> for CategoryInfo {
    fn from(count: CategoryCount) -> Self {
        Self {
            name: count.name,
            product_count: count.product_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryInfo>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProductParams {
    /// Catalog product ID such as "1".
    pub product_id: String,
}

/// Full product record, including description, tags and curated related IDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductDetail {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub related_product_ids: Vec<String>,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            rating: product.rating,
            reviews: product.reviews,
            description: product.description.clone(),
            tags: product.tags.clone(),
            related_product_ids: product.related_product_ids.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RelatedProductsParams {
    /// Catalog product ID such as "1".
    pub product_id: String,
    /// Maximum number of related products (default: 4).
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RelatedProductsResponse {
    pub product_id: String,
    pub related: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchProductsParams {
    /// Category to keep, matched case-insensitively.
    pub category: Option<String>,
    /// Text searched in product names, descriptions and tags.
    pub search_term: Option<String>,
    /// Sort field: "name", "price", "rating" or "reviews".
    pub sort_by: Option<String>,
    /// "asc" (default) or "desc".
    pub sort_order: Option<String>,
    /// 1-based page number (default: 1).
    pub page: Option<u32>,
    /// Products per page (default: 12, max 100).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductPageResponse {
    pub products: Vec<ProductSummary>,
    pub total_products: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub limit: usize,
}

impl From<ProductPage<'_>> for ProductPageResponse {
    fn from(page: ProductPage<'_>) -> Self {
        Self {
            products: page.products.into_iter().map(ProductSummary::from).collect(),
            total_products: page.total_products,
            total_pages: page.total_pages,
            current_page: page.current_page,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindProductsParams {
    /// Free-text query such as "cotton" or "wireless".
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FindProductsResponse {
    pub matches: Vec<ProductSummary>,
}

// --- review-insights ---

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzeReviewParams {
    /// Review text to classify.
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProductReviewsParams {
    /// Catalog product ID such as "1".
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AnalyzePostParams {
    /// Post text to classify.
    pub text: String,
    /// Platform the post came from (default: "twitter").
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SocialMentionsParams {
    /// Catalog product ID such as "1".
    pub product_id: String,
    /// Number of simulated posts (default from server config, max 500).
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LabelShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionAnalysis {
    pub emotion: String,
    pub emoji: String,
    pub score: f32,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReviewAnalysis {
    pub review_id: String,
    pub analysis: EmotionAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmotionSummary {
    pub total_reviews: usize,
    pub emotion_distribution: Vec<LabelShare>,
    /// Absent when there are no reviews
    pub dominant_emotion: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductReviewsResponse {
    pub product_id: String,
    pub analyses: Vec<ReviewAnalysis>,
    pub summary: EmotionSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SentimentAnalysis {
    pub sentiment: String,
    pub emoji: String,
    pub score: f32,
    pub platform: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SocialPostInfo {
    pub id: String,
    pub platform: String,
    pub text: String,
    pub timestamp: String,
    pub likes: u32,
    /// Absent on platforms without sharing (instagram)
    pub shares: Option<u32>,
    pub comments: u32,
    pub analysis: SentimentAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MentionSummary {
    pub product: String,
    pub total_mentions: usize,
    pub sentiment_distribution: Vec<LabelShare>,
    pub platform_distribution: Vec<LabelShare>,
    pub overall_sentiment: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SocialMentionsResponse {
    pub posts: Vec<SocialPostInfo>,
    pub summary: MentionSummary,
}
