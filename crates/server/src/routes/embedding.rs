use actix_web::{delete, post, web, HttpResponse};
use promptvec_vector::NewEmbedding;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Append an embedding; answers with the updated store
#[post("/vectorstores/{id}/embeddings")]
pub async fn add_embedding(
    path: web::Path<String>,
    req: web::Json<NewEmbedding>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let store = state
        .vector_stores
        .add_embedding(&path, req.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(store))
}

/// Remove an embedding; answers with the updated store
#[delete("/vectorstores/{id}/embeddings/{embedding_id}")]
pub async fn remove_embedding(
    path: web::Path<(String, String)>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let (store_id, embedding_id) = path.into_inner();
    let store = state
        .vector_stores
        .remove_embedding(&store_id, &embedding_id)
        .await?;
    Ok(HttpResponse::Ok().json(store))
}
