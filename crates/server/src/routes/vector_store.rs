use actix_web::{delete, get, post, put, web, HttpResponse};
use promptvec_vector::{NewVectorStore, VectorStoreUpdate};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{ListStoresQuery, MessageResponse};

#[get("/vectorstores")]
pub async fn list_stores(
    query: web::Query<ListStoresQuery>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let stores = state
        .vector_stores
        .list_stores(query.namespace.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(stores))
}

#[post("/vectorstores")]
pub async fn create_store(
    req: web::Json<NewVectorStore>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let store = state.vector_stores.create_store(req.into_inner()).await?;
    Ok(HttpResponse::Created().json(store))
}

#[get("/vectorstores/{id}")]
pub async fn get_store(
    path: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let store = state.vector_stores.get_store(&path).await?;
    Ok(HttpResponse::Ok().json(store))
}

#[put("/vectorstores/{id}")]
pub async fn update_store(
    path: web::Path<String>,
    req: web::Json<VectorStoreUpdate>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let store = state
        .vector_stores
        .update_store(&path, req.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(store))
}

#[delete("/vectorstores/{id}")]
pub async fn delete_store(
    path: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    state.vector_stores.delete_store(&path).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Vector store deleted")))
}
