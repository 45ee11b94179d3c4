/// Product catalog shared by the shop tool servers.
///
/// A catalog is an ordered list of products loaded once at startup, either from a
/// JSON file (`CATALOG_PATH`) or from the built-in sample data. Products are
/// immutable after loading; source order is preserved because the recommender's
/// "no priority" path returns products in catalog order.
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CommonError;

/// A single product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier, unique within a catalog (e.g. "1")
    pub id: String,
    /// Display name, e.g. "Premium Wireless Headphones"
    pub name: String,
    /// Category name, e.g. "Electronics". Matched case-sensitively.
    pub category: String,
    /// Price in store currency
    pub price: f64,
    /// Average star rating in 0..=5
    #[serde(default)]
    pub rating: Option<f64>,
    /// Number of reviews
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Curated related products. Same-category products fill in when short.
    #[serde(default, alias = "relatedProductIds")]
    pub related_product_ids: Vec<String>,
}

impl Product {
    /// Rating used for ranking; a missing rating ranks as 0.
    pub fn rating_or_zero(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Review count used for ranking; a missing count ranks as 0.
    pub fn review_count(&self) -> u32 {
        self.reviews.unwrap_or(0)
    }
}

pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_RELATED_COUNT: usize = 4;
pub const MAX_KEYWORD_MATCHES: usize = 5;

/// Product field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Rating,
    Reviews,
}

impl SortKey {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "rating" => Some(SortKey::Rating),
            "reviews" => Some(SortKey::Reviews),
            _ => None,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
            SortKey::Rating => a
                .rating_or_zero()
                .partial_cmp(&b.rating_or_zero())
                .unwrap_or(Ordering::Equal),
            SortKey::Reviews => a.review_count().cmp(&b.review_count()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// "desc" / "descending" sort high to low; anything else sorts low to high.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Filters and ordering for [`Catalog::browse`]. Empty strings count as unset.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Category name, compared case-insensitively
    pub category: Option<String>,
    /// Substring searched in name, description and tags, case-insensitively
    pub search: Option<String>,
    pub sort_by: Option<SortKey>,
    pub order: SortOrder,
}

/// One page of a filtered, ordered product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage<'a> {
    pub products: Vec<&'a Product>,
    /// Matches across all pages
    pub total_products: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub limit: usize,
}

/// Number of products in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already-constructed products, validating them.
    pub fn new(products: Vec<Product>) -> Result<Self, CommonError> {
        validate(&products)?;
        Ok(Self { products })
    }

    /// Parse a JSON array of products. `origin` names the source in error messages.
    pub fn from_json(json: &str, origin: &str) -> Result<Self, CommonError> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|source| CommonError::Json {
                path: origin.to_string(),
                source,
            })?;
        Self::new(products)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CommonError> {
        let content = std::fs::read_to_string(path).map_err(|source| CommonError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&content, &path.display().to_string())?;
        info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order, with product counts.
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = Vec::new();
        for product in &self.products {
            match counts.iter_mut().find(|c| c.name == product.category) {
                Some(entry) => entry.product_count += 1,
                None => counts.push(CategoryCount {
                    name: product.category.clone(),
                    product_count: 1,
                }),
            }
        }
        counts
    }

    /// Filter, order and paginate the catalog. `page` is 1-based; out-of-range
    /// values are clamped, and a page past the end is empty.
    pub fn browse(&self, query: &ProductQuery, page: usize, limit: usize) -> ProductPage<'_> {
        let category = non_empty(query.category.as_deref()).map(str::to_lowercase);
        let search = non_empty(query.search.as_deref()).map(str::to_lowercase);

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| category.as_ref().map_or(true, |c| p.category.to_lowercase() == *c))
            .filter(|p| search.as_ref().map_or(true, |term| mentions(p, term)))
            .collect();

        if let Some(key) = query.sort_by {
            matches.sort_by(|a, b| match query.order {
                SortOrder::Ascending => key.compare(a, b),
                SortOrder::Descending => key.compare(b, a),
            });
        }

        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let page = page.max(1);
        let total_products = matches.len();
        let products = matches
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        ProductPage {
            products,
            total_products,
            total_pages: total_products.div_ceil(limit),
            current_page: page,
            limit,
        }
    }

    /// Up to `count` products related to `id`: its curated ids first, then other
    /// products of the same category. Empty for an unknown id.
    pub fn related(&self, id: &str, count: usize) -> Vec<&Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };

        let mut related: Vec<&Product> = Vec::with_capacity(count);
        let curated = product.related_product_ids.iter().filter_map(|rid| self.get(rid));
        let same_category = self
            .products
            .iter()
            .filter(|p| p.category == product.category);

        for candidate in curated.chain(same_category) {
            if related.len() >= count {
                break;
            }
            if candidate.id != product.id && !related.iter().any(|r| r.id == candidate.id) {
                related.push(candidate);
            }
        }
        related
    }

    /// Lowercased substring match of `query` against name, category and tags, in
    /// catalog order, capped at `MAX_KEYWORD_MATCHES`.
    pub fn keyword_matches(&self, query: &str) -> Vec<&Product> {
        let Some(term) = non_empty(Some(query)).map(str::to_lowercase) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&term)
                    || p.category.to_lowercase().contains(&term)
                    || p.tags.iter().any(|t| t.to_lowercase().contains(&term))
            })
            .take(MAX_KEYWORD_MATCHES)
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `term` must already be lowercase.
fn mentions(product: &Product, term: &str) -> bool {
    product.name.to_lowercase().contains(term)
        || product
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
        || product.tags.iter().any(|t| t.to_lowercase().contains(term))
}

fn validate(products: &[Product]) -> Result<(), CommonError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id.as_str()) {
            return Err(CommonError::DuplicateProduct(product.id.clone()));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CommonError::InvalidPrice {
                id: product.id.clone(),
                price: product.price,
            });
        }
        if let Some(rating) = product.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CommonError::InvalidRating {
                    id: product.id.clone(),
                    rating,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_with_optional_fields() {
        let json = r#"[
            {"id": "1", "name": "Headphones", "category": "Electronics", "price": 199.99, "rating": 4.8, "reviews": 120},
            {"id": "2", "name": "Mystery Box", "category": "Books", "price": 12.0}
        ]"#;
        let catalog = Catalog::from_json(json, "inline").unwrap();
        assert_eq!(catalog.len(), 2);

        let bare = catalog.get("2").unwrap();
        assert_eq!(bare.rating, None);
        assert_eq!(bare.rating_or_zero(), 0.0);
        assert_eq!(bare.review_count(), 0);
        assert!(bare.tags.is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"[
            {"id": "1", "name": "A", "category": "Books", "price": 1.0},
            {"id": "1", "name": "B", "category": "Books", "price": 2.0}
        ]"#;
        let err = Catalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CommonError::DuplicateProduct(id) if id == "1"));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let json = r#"[{"id": "1", "name": "A", "category": "Books", "price": 1.0, "rating": 5.5}]"#;
        let err = Catalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CommonError::InvalidRating { .. }));
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"id": "1", "name": "A", "category": "Books", "price": -3.0}]"#;
        let err = Catalog::from_json(json, "inline").unwrap_err();
        assert!(matches!(err, CommonError::InvalidPrice { .. }));
    }

    #[test]
    fn test_malformed_json_reports_origin() {
        let err = Catalog::from_json("{not json", "catalog.json").unwrap_err();
        assert!(err.to_string().contains("catalog.json"));
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = crate::sample::sample_catalog();
        let categories = catalog.categories();
        assert_eq!(categories[0].name, "Electronics");
        assert_eq!(categories[1].name, "Clothing");

        let total: usize = categories.iter().map(|c| c.product_count).sum();
        assert_eq!(total, catalog.len());
    }

    fn item(id: &str, name: &str, category: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            rating: None,
            reviews: None,
            description: None,
            tags: Vec::new(),
            related_product_ids: Vec::new(),
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_related_ids_alias_parses() {
        let json = r#"[
            {"id": "1", "name": "A", "category": "Books", "price": 1.0, "relatedProductIds": ["2"]},
            {"id": "2", "name": "B", "category": "Books", "price": 2.0}
        ]"#;
        let catalog = Catalog::from_json(json, "inline").unwrap();
        assert_eq!(catalog.get("1").unwrap().related_product_ids, vec!["2"]);
    }

    #[test]
    fn test_browse_category_is_case_insensitive() {
        let catalog = crate::sample::sample_catalog();
        let page = catalog.browse(
            &ProductQuery {
                category: Some("electronics".to_string()),
                ..Default::default()
            },
            1,
            DEFAULT_PAGE_SIZE,
        );
        assert_eq!(ids(&page.products), vec!["1", "2", "6"]);
        assert_eq!(page.total_products, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_browse_searches_description_and_tags() {
        let mut bottle = item("1", "Bottle", "Home Goods", 20.0);
        bottle.description = Some("Keeps drinks COLD for a day".to_string());
        let mut mug = item("2", "Mug", "Home Goods", 10.0);
        mug.tags = vec!["Coldbrew".to_string()];
        let lamp = item("3", "Lamp", "Home Goods", 30.0);
        let catalog = Catalog::new(vec![bottle, mug, lamp]).unwrap();

        let query = ProductQuery {
            search: Some("cold".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&catalog.browse(&query, 1, 12).products), vec!["1", "2"]);
    }

    #[test]
    fn test_browse_sorts_stably_in_both_orders() {
        let catalog = Catalog::new(vec![
            item("a", "Zeta", "Books", 20.0),
            item("b", "alpha", "Books", 10.0),
            item("c", "Mid", "Books", 20.0),
        ])
        .unwrap();
        let sorted = |key, order| {
            let query = ProductQuery {
                sort_by: Some(key),
                order,
                ..Default::default()
            };
            ids(&catalog.browse(&query, 1, 12).products)
        };

        assert_eq!(sorted(SortKey::Price, SortOrder::Ascending), vec!["b", "a", "c"]);
        assert_eq!(sorted(SortKey::Price, SortOrder::Descending), vec!["a", "c", "b"]);
        assert_eq!(sorted(SortKey::Name, SortOrder::Ascending), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_browse_paginates() {
        let catalog = Catalog::new(
            (1..=5)
                .map(|i| item(&i.to_string(), "Book", "Books", 1.0))
                .collect(),
        )
        .unwrap();

        let second = catalog.browse(&ProductQuery::default(), 2, 2);
        assert_eq!(ids(&second.products), vec!["3", "4"]);
        assert_eq!(second.total_products, 5);
        assert_eq!(second.total_pages, 3);
        assert_eq!(second.current_page, 2);

        let past_end = catalog.browse(&ProductQuery::default(), 9, 2);
        assert!(past_end.products.is_empty());

        let clamped = catalog.browse(&ProductQuery::default(), 0, 0);
        assert_eq!(clamped.current_page, 1);
        assert_eq!(clamped.limit, 1);
        assert_eq!(ids(&clamped.products), vec!["1"]);
    }

    #[test]
    fn test_related_prefers_curated_then_category() {
        let mut first = item("1", "A", "Books", 1.0);
        first.related_product_ids = vec!["4".to_string(), "1".to_string(), "missing".to_string()];
        let catalog = Catalog::new(vec![
            first,
            item("2", "B", "Books", 1.0),
            item("3", "C", "Books", 1.0),
            item("4", "D", "Toys", 1.0),
        ])
        .unwrap();

        assert_eq!(ids(&catalog.related("1", 4)), vec!["4", "2", "3"]);
        assert_eq!(ids(&catalog.related("1", 2)), vec!["4", "2"]);
        assert!(catalog.related("nope", 4).is_empty());
        assert!(catalog.related("1", 0).is_empty());
    }

    #[test]
    fn test_keyword_matches_name_category_and_tags() {
        let mut shirt = item("1", "T-Shirt", "Clothing", 25.0);
        shirt.tags = vec!["Cotton".to_string()];
        let catalog = Catalog::new(vec![
            item("2", "Cotton Candy Maker", "Home Goods", 40.0),
            shirt,
            item("3", "Novel", "Books", 15.0),
        ])
        .unwrap();

        assert_eq!(ids(&catalog.keyword_matches("  COTTON ")), vec!["2", "1"]);
        assert_eq!(ids(&catalog.keyword_matches("books")), vec!["3"]);
        assert!(catalog.keyword_matches("   ").is_empty());
    }

    #[test]
    fn test_keyword_matches_capped() {
        let catalog = Catalog::new(
            (1..=8)
                .map(|i| item(&i.to_string(), "Gadget", "Electronics", 1.0))
                .collect(),
        )
        .unwrap();
        assert_eq!(catalog.keyword_matches("gadget").len(), MAX_KEYWORD_MATCHES);
    }
}
