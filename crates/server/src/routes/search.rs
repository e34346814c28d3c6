use actix_web::{post, web, HttpResponse};
use promptvec_common::PromptVecError;
use promptvec_vector::SearchRequest;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::SearchResponse;

/// Cosine similarity search over one store
///
/// `limit` defaults to `config.default_search_limit` and must not exceed
/// `config.max_search_limit`.
#[post("/vectorstores/{id}/search")]
pub async fn search(
    path: web::Path<String>,
    req: web::Json<SearchRequest>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let store_id = path.into_inner();
    let mut request = req.into_inner();

    let max_limit = state.config.max_search_limit;
    let limit = request.limit.unwrap_or(state.config.default_search_limit);
    if limit == 0 || limit > max_limit {
        return Err(PromptVecError::invalid_input(format!(
            "limit must be between 1 and {}",
            max_limit
        ))
        .into());
    }
    request.limit = Some(limit);

    let results = state.vector_stores.search(&store_id, &request).await?;

    info!(
        "Search on store {} completed - {} results (limit={}, filters={})",
        store_id,
        results.len(),
        limit,
        request.filters.len()
    );

    Ok(HttpResponse::Ok().json(SearchResponse {
        count: results.len(),
        results,
    }))
}
