/// MCP server implementation for the product finder.
///
/// Exposes seven tools:
/// - `get_questions`: The questionnaire to present to a shopper
/// - `recommend_products`: Up to five products matching questionnaire answers
/// - `list_categories`: Catalog categories with product counts
/// - `get_product`: One product with its full details
/// - `related_products`: Curated and same-category products related to one product
/// - `search_products`: Filtered, sorted, paginated catalog listing
/// - `find_products`: Keyword lookup of up to five products from free text
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{debug, info};

use crate::error::AppError;
use crate::model::{get_questions, AnswerSet};
use crate::recommend::recommend;
use shop_common::catalog::{
    Catalog, Product, ProductQuery, SortKey, SortOrder, DEFAULT_PAGE_SIZE,
    DEFAULT_RELATED_COUNT,
};
use shop_common::shop_api::{
    CategoryInfo, CategoryListResponse, FindProductsParams, FindProductsResponse,
    GetProductParams, ProductDetail, ProductPageResponse, ProductSummary, QuestionInfo,
    QuestionsResponse, RecommendProductsParams, RecommendProductsResponse,
    RelatedProductsParams, RelatedProductsResponse, SearchProductsParams,
};

#[derive(Clone)]
pub struct ProductFinderServer {
    catalog: Arc<Catalog>,
    tool_router: ToolRouter<ProductFinderServer>,
}

impl ProductFinderServer {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl ProductFinderServer {
    #[tool(description = "Get the product finder questionnaire: four questions (category, price_range, feature_priority, usage) with their allowed answers.")]
    async fn get_questions(&self) -> Result<Json<QuestionsResponse>, String> {
        let questions = get_questions().iter().map(QuestionInfo::from).collect();
        Ok(Json(QuestionsResponse { questions }))
    }

    #[tool(description = "Recommend up to five products from questionnaire answers. Every answer is optional; 'Any' category and 'No budget limit' disable their filters.")]
    async fn recommend_products(
        &self,
        Parameters(params): Parameters<RecommendProductsParams>,
    ) -> Result<Json<RecommendProductsResponse>, String> {
        let answers = AnswerSet::from(params);
        Ok(Json(self.recommend_for(&answers)))
    }

    #[tool(description = "List the product categories in the catalog with the number of products in each.")]
    async fn list_categories(&self) -> Result<Json<CategoryListResponse>, String> {
        let categories = self
            .catalog
            .categories()
            .into_iter()
            .map(CategoryInfo::from)
            .collect();
        Ok(Json(CategoryListResponse { categories }))
    }

    #[tool(description = "Get one product by ID with its description, tags and related product IDs.")]
    async fn get_product(
        &self,
        Parameters(params): Parameters<GetProductParams>,
    ) -> Result<Json<ProductDetail>, String> {
        let product = self
            .product(params.product_id.trim())
            .map_err(|e| e.to_string())?;
        Ok(Json(ProductDetail::from(product)))
    }

    #[tool(description = "List products related to a product: its curated related IDs first, then other products from the same category. Default count 4.")]
    async fn related_products(
        &self,
        Parameters(params): Parameters<RelatedProductsParams>,
    ) -> Result<Json<RelatedProductsResponse>, String> {
        let product = self
            .product(params.product_id.trim())
            .map_err(|e| e.to_string())?;
        let count = params
            .count
            .map_or(DEFAULT_RELATED_COUNT, |c| c as usize);

        let related = self
            .catalog
            .related(&product.id, count)
            .into_iter()
            .map(ProductSummary::from)
            .collect();
        Ok(Json(RelatedProductsResponse {
            product_id: product.id.clone(),
            related,
        }))
    }

    #[tool(description = "Browse the catalog: optional case-insensitive category, search term over name/description/tags, sort (name, price, rating, reviews; asc or desc) and pagination.")]
    async fn search_products(
        &self,
        Parameters(params): Parameters<SearchProductsParams>,
    ) -> Result<Json<ProductPageResponse>, String> {
        let sort_by = params.sort_by.as_deref().and_then(|raw| {
            let key = SortKey::parse(raw);
            if key.is_none() {
                debug!(sort_by = raw, "unknown sort field, keeping catalog order");
            }
            key
        });
        let query = ProductQuery {
            category: params.category,
            search: params.search_term,
            sort_by,
            order: params
                .sort_order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
        };
        let page = params.page.map_or(1, |p| p as usize);
        let limit = params.limit.map_or(DEFAULT_PAGE_SIZE, |l| l as usize);

        let page = self.catalog.browse(&query, page, limit);
        info!(
            total = page.total_products,
            page = page.current_page,
            "catalog browsed"
        );
        Ok(Json(ProductPageResponse::from(page)))
    }

    #[tool(description = "Find up to five products whose name, category or tags contain the query text (case-insensitive).")]
    async fn find_products(
        &self,
        Parameters(params): Parameters<FindProductsParams>,
    ) -> Result<Json<FindProductsResponse>, String> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err("query must not be empty".to_string());
        }
        let matches: Vec<ProductSummary> = self
            .catalog
            .keyword_matches(query)
            .into_iter()
            .map(ProductSummary::from)
            .collect();
        info!(query, results = matches.len(), "keyword lookup");
        Ok(Json(FindProductsResponse { matches }))
    }
}

impl ProductFinderServer {
    fn product(&self, product_id: &str) -> Result<&Product, AppError> {
        self.catalog
            .get(product_id)
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))
    }

    fn recommend_for(&self, answers: &AnswerSet) -> RecommendProductsResponse {
        let recommendations: Vec<ProductSummary> = recommend(self.catalog.products(), answers)
            .into_iter()
            .map(ProductSummary::from)
            .collect();

        info!(
            category = answers.category.as_deref().unwrap_or("-"),
            price_range = answers.price_range.as_deref().unwrap_or("-"),
            feature_priority = answers.feature_priority.as_deref().unwrap_or("-"),
            results = recommendations.len(),
            "recommendations computed"
        );

        RecommendProductsResponse { recommendations }
    }
}

#[tool_handler]
impl ServerHandler for ProductFinderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "product-finder".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Product finder MCP server. Call get_questions to obtain the shopper \
                 questionnaire, then recommend_products with the chosen answers to get \
                 up to five matching products. list_categories shows what the catalog \
                 carries; search_products, find_products, get_product and \
                 related_products browse it directly."
                    .to_string(),
            ),
        }
    }
}
