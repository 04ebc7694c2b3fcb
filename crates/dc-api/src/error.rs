//! HTTP mapping for `AppError`.
//!
//! Handlers return [`ApiError`]; its response carries an [`ErrorPage`] marker
//! and no body. [`crate::middleware::render_error_pages`] turns the marker
//! into a localised HTML page once the session's language is known.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dc_core::error::AppError;

/// Marker left in response extensions for the error-page middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPage {
    /// Catalogue key under `errors.`.
    pub message_key: &'static str,
}

#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::NotFound(..) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message_key(&self) -> &'static str {
        match self.0 {
            AppError::NotFound(..) => "not_found",
            AppError::ValidationError(_) => "invalid",
            AppError::Conflict(_) => "conflict",
            AppError::Unavailable(_) => "unavailable",
            AppError::Internal(_) => "internal",
        }
    }
}

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, %status, "Request failed");
        } else {
            tracing::debug!(error = %self.0, %status, "Request rejected");
        }
        let mut response = status.into_response();
        response.extensions_mut().insert(ErrorPage { message_key: self.message_key() });
        response
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
