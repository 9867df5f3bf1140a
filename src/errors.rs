use crate::navigator::form::{ErrorMap, FORM_WIDE_KEY};
use crate::navigator::ArticleSetError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Server-side failure. Rendered in the same field-keyed shape as validation
/// errors so a waiting form can show it as a form-wide message.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }

    pub fn to_error_map(&self) -> ErrorMap {
        ErrorMap::from([(FORM_WIDE_KEY.to_string(), vec![self.message.clone()])])
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ArticleSetError> for AppError {
    fn from(err: ArticleSetError) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed ({}): {}", self.status, self.message);
        (self.status, Json(self.to_error_map())).into_response()
    }
}
