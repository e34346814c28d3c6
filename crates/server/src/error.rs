use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use promptvec_common::PromptVecError;
use std::fmt;
use tracing::{error, warn};

use crate::types::MessageResponse;

/// HTTP wrapper around [`PromptVecError`]
#[derive(Debug)]
pub struct ApiError(pub PromptVecError);

impl From<PromptVecError> for ApiError {
    fn from(err: PromptVecError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        HttpResponse::build(status).json(MessageResponse::new(self.0.to_string()))
    }
}
