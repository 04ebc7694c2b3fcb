//! derm-centre/crates/dc-api/src/middleware.rs Middleware
//!
//! Request tracing, CORS, compression, security headers, and rendering of
//! error pages.

use axum::extract::{Request, State};
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use dc_ui::{ErrorPage as ErrorTemplate, Template};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::ErrorPage;
use crate::session::SessionId;
use crate::AppState;

/// Spans every request at INFO with method, URI and status.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

// The site is served from one origin; CORS only admits plain reads and form posts.
pub fn cors_policy() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .max_age(std::time::Duration::from_secs(3600))
}

pub fn compression() -> CompressionLayer {
    CompressionLayer::new()
}

pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    [
        SetResponseHeaderLayer::if_not_present(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ),
        SetResponseHeaderLayer::if_not_present(HeaderName::from_static("x-frame-options"), HeaderValue::from_static("DENY")),
    ]
}

/// Replaces bodiless error responses produced by `ApiError` with the
/// localised error page.
pub async fn render_error_pages(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let session = req.extensions().get::<SessionId>().copied();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    let Some(marker) = response.extensions().get::<ErrorPage>().copied() else {
        return response;
    };
    let status = response.status();
    let ctx = match session {
        Some(id) => state.page_context(id, &path).await,
        None => state.page_context_for(Default::default(), &path).await,
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!(error = %e.0, "Error page context unavailable");
            return (status, "error").into_response();
        }
    };

    match ErrorTemplate::build(&ctx, status.as_u16(), marker.message_key).render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Error page failed to render");
            (status, status.canonical_reason().unwrap_or("error")).into_response()
        }
    }
}
