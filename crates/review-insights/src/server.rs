/// MCP server implementation for review and social sentiment insights.
///
/// Exposes four tools:
/// - `analyze_review`: Emotion of a single review text
/// - `analyze_product_reviews`: Per-review emotions plus a summary for one product
/// - `analyze_post`: Sentiment of a single social media post
/// - `analyze_social_mentions`: Simulated social mentions of a product, classified and summarized
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::info;

use crate::config::{Config, MAX_MENTION_COUNT};
use crate::emotion::ReviewAnalyzer;
use crate::error::AppError;
use crate::sentiment::{PostAnalyzer, DEFAULT_PLATFORM};
use crate::social::{analyze_mentions, MentionGenerator};
use shop_common::catalog::{Catalog, Product};
use shop_common::review::ReviewBook;
use shop_common::shop_api::{
    AnalyzePostParams, AnalyzeReviewParams, EmotionAnalysis, ProductReviewsParams,
    ProductReviewsResponse, SentimentAnalysis, SocialMentionsParams, SocialMentionsResponse,
};

#[derive(Clone)]
pub struct ReviewInsightsServer {
    catalog: Arc<Catalog>,
    reviews: Arc<ReviewBook>,
    review_analyzer: Arc<ReviewAnalyzer>,
    post_analyzer: Arc<PostAnalyzer>,
    generator: Arc<MentionGenerator>,
    mention_count: u32,
    social_seed: Option<u64>,
    tool_router: ToolRouter<ReviewInsightsServer>,
}

impl ReviewInsightsServer {
    pub fn new(catalog: Catalog, reviews: ReviewBook, config: &Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            reviews: Arc::new(reviews),
            review_analyzer: Arc::new(ReviewAnalyzer::default()),
            post_analyzer: Arc::new(PostAnalyzer::default()),
            generator: Arc::new(MentionGenerator::new()),
            mention_count: config.mention_count,
            social_seed: config.social_seed,
            tool_router: Self::tool_router(),
        }
    }

    fn product(&self, product_id: &str) -> Result<&Product, AppError> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))
    }

    fn rng(&self) -> StdRng {
        match self.social_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[tool_router]
impl ReviewInsightsServer {
    #[tool(description = "Classify the emotion of a product review (happy, satisfied, neutral, disappointed, angry) with an emoji and a confidence score.")]
    async fn analyze_review(
        &self,
        Parameters(params): Parameters<AnalyzeReviewParams>,
    ) -> Result<Json<EmotionAnalysis>, String> {
        let text = params.text.trim();
        if text.is_empty() {
            return Err("text must not be empty".to_string());
        }
        Ok(Json(self.review_analyzer.analyze(text, Utc::now())))
    }

    #[tool(description = "Analyze the emotions of all stored reviews of a product and summarize the emotion distribution.")]
    async fn analyze_product_reviews(
        &self,
        Parameters(params): Parameters<ProductReviewsParams>,
    ) -> Result<Json<ProductReviewsResponse>, String> {
        let product_id = params.product_id.trim().to_string();
        let product = self.product(&product_id).map_err(|e| e.to_string())?;

        let reviews = self.reviews.for_product(&product.id);
        let (analyses, summary) = self.review_analyzer.analyze_reviews(reviews, Utc::now());
        info!(
            product_id = %product.id,
            reviews = summary.total_reviews,
            dominant = summary.dominant_emotion.as_deref().unwrap_or("N/A"),
            "product reviews analyzed"
        );

        Ok(Json(ProductReviewsResponse {
            product_id: product.id.clone(),
            analyses,
            summary,
        }))
    }

    #[tool(description = "Classify the sentiment of a social media post (very_positive, positive, neutral, negative, very_negative).")]
    async fn analyze_post(
        &self,
        Parameters(params): Parameters<AnalyzePostParams>,
    ) -> Result<Json<SentimentAnalysis>, String> {
        let text = params.text.trim();
        if text.is_empty() {
            return Err("text must not be empty".to_string());
        }
        let platform = params
            .platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PLATFORM);
        Ok(Json(self.post_analyzer.analyze(text, platform, Utc::now())))
    }

    #[tool(description = "Simulate social media mentions of a catalog product, classify each post's sentiment and summarize by sentiment and platform.")]
    async fn analyze_social_mentions(
        &self,
        Parameters(params): Parameters<SocialMentionsParams>,
    ) -> Result<Json<SocialMentionsResponse>, String> {
        let product_id = params.product_id.trim().to_string();
        let product = self.product(&product_id).map_err(|e| e.to_string())?;
        let count = params
            .count
            .unwrap_or(self.mention_count)
            .min(MAX_MENTION_COUNT) as usize;

        let now = Utc::now();
        let posts = self
            .generator
            .generate(&product.name, count, &mut self.rng(), now);
        let response = analyze_mentions(&self.post_analyzer, &product.name, posts, now);
        info!(
            product = %product.name,
            mentions = response.summary.total_mentions,
            overall = response.summary.overall_sentiment.as_deref().unwrap_or("N/A"),
            "social mentions analyzed"
        );

        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for ReviewInsightsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "review-insights".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Review and social sentiment MCP server. Use analyze_review or \
                 analyze_post for a single text, analyze_product_reviews for the \
                 stored reviews of a product, and analyze_social_mentions for a \
                 simulated sample of social posts about a product. Classification is \
                 keyword based."
                    .to_string(),
            ),
        }
    }
}
