//! # dc-api
//!
//! The web routing and orchestration layer for the clinic site.

pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use chrono::{NaiveDate, Utc};
use dc_core::i18n::{Catalog, Language};
use dc_core::traits::{BookingService, ContactService, ContentRepo};
use dc_ui::{PageContext, Tr};
use tower_http::services::ServeDir;

use crate::error::ApiResult;
use crate::metrics::Metrics;
use crate::session::{SessionId, SessionStore};

pub use crate::error::ApiError;

/// Supplies "today" for new booking wizards.
pub type Today = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone)]
pub struct ApiOptions {
    /// Absolute origin used in canonical links, sitemap and structured data.
    pub base_url: String,
    pub secure_cookie: bool,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: "https://drdermatology.com".into(),
            secure_cookie: false,
            static_dir: "static".into(),
        }
    }
}

/// State shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<dyn ContentRepo>,
    pub booking: Arc<dyn BookingService>,
    pub contact: Arc<dyn ContactService>,
    pub catalog: Arc<Catalog>,
    pub sessions: SessionStore,
    pub metrics: Arc<Metrics>,
    pub options: ApiOptions,
    pub today: Today,
}

impl AppState {
    pub fn new(
        content: Arc<dyn ContentRepo>,
        booking: Arc<dyn BookingService>,
        contact: Arc<dyn ContactService>,
        catalog: Arc<Catalog>,
        options: ApiOptions,
    ) -> Self {
        Self {
            content,
            booking,
            contact,
            catalog,
            sessions: SessionStore::new(),
            metrics: Arc::new(Metrics::new()),
            options,
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Pins the booking window start, for tests and demos.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Arc::new(move || today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    pub fn tr(&self, language: Language) -> Tr {
        Tr::new(self.catalog.clone(), language)
    }

    /// Page chrome inputs for a request from `session` to `path`.
    pub async fn page_context(&self, session: SessionId, path: &str) -> ApiResult<PageContext> {
        self.page_context_for(self.sessions.language(session), path).await
    }

    pub async fn page_context_for(&self, language: Language, path: &str) -> ApiResult<PageContext> {
        Ok(PageContext {
            tr: self.tr(language),
            clinic: self.content.clinic().await?,
            base_url: self.options.base_url.clone(),
            path: path.to_string(),
            today: self.today(),
        })
    }
}

/// Builds the full application router with middleware attached.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.options.static_dir);
    let [nosniff, referrer, frame] = middleware::security_headers();

    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route("/treatments", get(handlers::treatments))
        .route("/treatments/{slug}", get(handlers::treatment))
        .route("/blog", get(handlers::blog_index))
        .route("/blog/{id}", get(handlers::blog_post))
        .route("/blog/{id}/like", post(handlers::like_post))
        .route("/gallery", get(handlers::gallery))
        .route("/gallery/{id}/like", post(handlers::like_gallery_item))
        .route("/booking", get(handlers::booking_page).post(handlers::booking_action))
        .route("/contact", get(handlers::contact_page).post(handlers::contact_submit))
        .route("/language", post(handlers::set_language))
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .nest_service("/static", static_files)
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(state.clone(), middleware::render_error_pages))
        .layer(axum::middleware::from_fn_with_state(state.clone(), session::session_middleware))
        .layer(nosniff)
        .layer(referrer)
        .layer(frame)
        .layer(middleware::compression())
        .layer(middleware::cors_policy())
        .layer(middleware::trace_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use dc_core::traits::{MockBookingService, MockContactService, MockContentRepo};
    use tower::ServiceExt;

    fn state(content: MockContentRepo) -> AppState {
        AppState::new(
            Arc::new(content),
            Arc::new(MockBookingService::new()),
            Arc::new(MockContactService::new()),
            Arc::new(Catalog::embedded().unwrap()),
            ApiOptions::default(),
        )
    }

    #[tokio::test]
    async fn health_needs_no_content() {
        let response = router(state(MockContentRepo::new()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn content_outage_is_a_server_error() {
        let mut content = MockContentRepo::new();
        content.expect_clinic().returning(|| Err(anyhow::anyhow!("content source offline")));

        let response = router(state(content))
            .oneshot(Request::get("/about").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn booking_window_follows_the_utc_calendar() {
        let state = state(MockContentRepo::new());
        let before = Utc::now().date_naive();
        let today = state.today();
        let after = Utc::now().date_naive();
        assert!(today == before || today == after);
    }
}
