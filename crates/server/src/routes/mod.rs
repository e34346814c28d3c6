use actix_web::{error::InternalError, web, HttpResponse};

use crate::types::MessageResponse;

pub mod embedding;
pub mod search;
pub mod system;
pub mod vector_store;

/// Largest accepted JSON body (stores may be created with their embeddings)
const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;

/// Register all routes under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/api")
            .service(system::health)
            .service(vector_store::list_stores)
            .service(vector_store::create_store)
            .service(vector_store::get_store)
            .service(vector_store::update_store)
            .service(vector_store::delete_store)
            .service(embedding::add_embedding)
            .service(embedding::remove_embedding)
            .service(search::search),
    );
}

/// Malformed bodies answer 400 with the same `{"message"}` shape as other errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            let body = MessageResponse::new(err.to_string());
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}
