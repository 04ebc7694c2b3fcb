//! Shared harness: builds the router over the static content and drives it
//! like a browser that keeps its session cookie.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, REFERER, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use dc_api::{router, ApiOptions, AppState};
use dc_content_static::StaticContent;
use dc_core::i18n::Catalog;
use dc_core::traits::{BookingService, ContactService};
use dc_frontdesk_sim::{SimulatedFrontDesk, SimulatedOutcome};
use tower::ServiceExt;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()
}

pub fn desk(outcome: SimulatedOutcome) -> Arc<SimulatedFrontDesk> {
    Arc::new(SimulatedFrontDesk::new(Duration::ZERO, outcome))
}

pub fn state(booking: Arc<dyn BookingService>, contact: Arc<dyn ContactService>) -> AppState {
    let catalog = tokio_test::assert_ok!(Catalog::embedded());
    AppState::new(
        Arc::new(StaticContent::new()),
        booking,
        contact,
        Arc::new(catalog),
        ApiOptions::default(),
    )
    .with_today(today())
}

pub fn router_with(state: AppState) -> Router {
    router(state)
}

/// Router over the static content with an always-succeeding front desk.
pub fn app() -> Router {
    let desk = desk(SimulatedOutcome::Succeed);
    router(state(desk.clone(), desk))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}

/// One visitor. Keeps the session cookie the site hands out.
#[derive(Clone)]
pub struct Visitor {
    app: Router,
    cookie: Option<String>,
}

impl Visitor {
    pub fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    pub async fn get(&mut self, uri: &str) -> Reply {
        let request = self.request(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> Reply {
        let request = self
            .request(Method::POST, uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(form)))
            .unwrap();
        self.send(request).await
    }

    pub async fn post_from(&mut self, uri: &str, referer: &str, form: &[(&str, &str)]) -> Reply {
        let request = self
            .request(Method::POST, uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(REFERER, referer)
            .body(Body::from(encode_form(form)))
            .unwrap();
        self.send(request).await
    }

    fn request(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Reply {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set) = response.headers().get(SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply { status, headers, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }
}

fn encode_form(form: &[(&str, &str)]) -> String {
    let encode = |raw: &str| {
        raw.chars()
            .map(|c| match c {
                ' ' => "+".to_string(),
                '&' | '=' | '+' | '%' | '#' => format!("%{:02X}", c as u32),
                c => c.to_string(),
            })
            .collect::<String>()
    };
    form.iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
