//! Admin global search: one query ranked in memory across products,
//! categories, customers, and orders. Prefix matches beat substring
//! matches; each entity group is capped.

use crate::constants::SEARCH_GROUP_LIMIT;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use closet_core::models::{Category, Customer, Order, Product};
use closet_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub customers: Vec<Customer>,
    pub orders: Vec<Order>,
}

/// Rank pre-filtered candidates: prefix match first, then substring, each
/// alphabetical; anything else drops out.
fn rank_by<T>(items: Vec<T>, query: &str, key: impl Fn(&T) -> String, limit: usize) -> Vec<T> {
    let query = query.to_lowercase();

    let mut scored: Vec<(u8, String, T)> = items
        .into_iter()
        .filter_map(|item| {
            let name = key(&item).to_lowercase();
            if name.starts_with(&query) {
                Some((0, name, item))
            } else if name.contains(&query) {
                Some((1, name, item))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| (a.0, a.1.as_str()).cmp(&(b.0, b.1.as_str())));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, _, item)| item)
        .collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "search",
    params(("q" = String, Query, description = "Search text")),
    responses(
        (status = 200, description = "Grouped, ranked matches", body = SearchResults),
        (status = 400, description = "Empty query", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn global_search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResults>, HttpAppError> {
    let q = query.q.trim();
    if q.is_empty() {
        return Err(AppError::InvalidInput("Search query cannot be empty".to_string()).into());
    }

    let fetch_limit = (SEARCH_GROUP_LIMIT * 2) as i64;
    let (products, categories, customers, orders) = tokio::try_join!(
        state.products.search(q, fetch_limit),
        state.categories.search(q, fetch_limit),
        state.customers.search(q, fetch_limit),
        state.orders.search(q, fetch_limit),
    )?;

    Ok(Json(SearchResults {
        products: rank_by(products, q, |p| p.name.clone(), SEARCH_GROUP_LIMIT),
        categories: rank_by(categories, q, |c| c.name.clone(), SEARCH_GROUP_LIMIT),
        customers: rank_by(customers, q, |c| c.name.clone(), SEARCH_GROUP_LIMIT),
        orders: rank_by(orders, q, |o| o.order_number.clone(), SEARCH_GROUP_LIMIT),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_prefers_prefix_matches() {
        let items = vec![
            "summer dress".to_string(),
            "dress shirt".to_string(),
            "handbag".to_string(),
            "dresser runner".to_string(),
        ];

        let ranked = rank_by(items, "dress", |s| s.clone(), 10);
        assert_eq!(ranked, vec!["dress shirt", "dresser runner", "summer dress"]);
    }

    #[test]
    fn test_rank_is_case_insensitive_and_capped() {
        let items = vec![
            "Denim Jacket".to_string(),
            "denim skirt".to_string(),
            "DENIM cap".to_string(),
        ];

        let ranked = rank_by(items, "DeNiM", |s| s.clone(), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], "DENIM cap");
    }

    #[test]
    fn test_rank_drops_non_matches() {
        let items = vec!["shoes".to_string(), "shirt".to_string()];
        let ranked = rank_by(items, "hat", |s| s.clone(), 10);
        assert!(ranked.is_empty());
    }
}
