/// Rule-based product recommendation.
///
/// Strict pipeline, each stage consuming the previous stage's output:
/// 1. category filter (skipped when unanswered or "Any")
/// 2. price bracket filter (skipped for "No budget limit" or unknown answers)
/// 3. stable sort by the feature priority ("Brand" and "Features" keep input order)
/// 4. truncate to `MAX_RECOMMENDATIONS`
///
/// Unknown answers never fail; they disable their stage. The result borrows from the
/// catalog, so it can only ever contain catalog products, each at most once.
use std::cmp::Ordering;

use shop_common::catalog::Product;
use tracing::debug;

use crate::model::{AnswerSet, FeaturePriority};

pub const MAX_RECOMMENDATIONS: usize = 5;

pub fn recommend<'a>(catalog: &'a [Product], answers: &AnswerSet) -> Vec<&'a Product> {
    let mut shortlist: Vec<&Product> = catalog.iter().collect();

    if let Some(category) = answers.category_filter() {
        shortlist.retain(|p| p.category == category);
    }

    if let Some(range) = answers.price_range() {
        shortlist.retain(|p| range.contains(p.price));
    }

    if let Some(priority) = answers.feature_priority() {
        sort_by_priority(&mut shortlist, priority);
    }

    if let Some(usage) = &answers.usage {
        debug!(usage = usage.as_str(), "usage answer does not affect ranking");
    }

    shortlist.truncate(MAX_RECOMMENDATIONS);
    shortlist
}

fn sort_by_priority(products: &mut [&Product], priority: FeaturePriority) {
    match priority {
        FeaturePriority::Quality => products.sort_by(|a, b| {
            b.rating_or_zero()
                .partial_cmp(&a.rating_or_zero())
                .unwrap_or(Ordering::Equal)
        }),
        FeaturePriority::Price => products.sort_by(|a, b| {
            a.price
                .partial_cmp(&b.price)
                .unwrap_or(Ordering::Equal)
        }),
        FeaturePriority::Reviews => {
            products.sort_by(|a, b| b.review_count().cmp(&a.review_count()))
        }
        // No brand or feature signal in the product data yet.
        FeaturePriority::Brand | FeaturePriority::Features => {}
    }
}
