//! The five-step booking wizard driven through `POST /booking`.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use common::{desk, router_with, state, Visitor};
use dc_core::traits::{BookingError, BookingService, MockBookingService, MockContactService};
use dc_core::wizard::{BookingConfirmation, BookingRequest};
use dc_frontdesk_sim::{SimulatedFrontDesk, SimulatedOutcome};

async fn next(visitor: &mut Visitor, fields: &[(&str, &str)]) {
    let mut form = vec![("action", "next")];
    form.extend_from_slice(fields);
    let reply = visitor.post("/booking", &form).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER, "{}", reply.body);
    assert_eq!(reply.location(), Some("/booking"));
}

async fn reach_review(visitor: &mut Visitor) {
    visitor.get("/booking").await;
    next(visitor, &[("provider", "1")]).await;
    next(visitor, &[("service", "1")]).await;
    next(visitor, &[("date", "2025-01-10"), ("time", "09:00 AM")]).await;
    next(
        visitor,
        &[
            ("first_name", "Jane"),
            ("last_name", "Doe"),
            ("email", "jane@example.com"),
            ("phone", "555-0100"),
            ("date_of_birth", ""),
            ("notes", ""),
        ],
    )
    .await;
}

fn confirming_desk(calls: usize) -> MockBookingService {
    let mut booking = MockBookingService::new();
    booking.expect_submit().times(calls).returning(|request| {
        assert_eq!(request.time, "09:00 AM");
        assert_eq!(request.patient.full_name(), "Jane Doe");
        Ok(BookingConfirmation { reference: "DC-0A1B2C3D".into(), confirmed_at: Utc::now() })
    });
    booking
}

#[tokio::test]
async fn full_flow_submits_exactly_once() {
    let app = router_with(state(Arc::new(confirming_desk(1)), Arc::new(MockContactService::new())));
    let mut visitor = Visitor::new(app);

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 1 of 5"));

    reach_review(&mut visitor).await;
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 5 of 5"));
    assert!(page.body.contains("Dr. Sarah Johnson"));
    assert!(page.body.contains("Jane Doe"));

    let reply = visitor.post("/booking", &[("action", "submit")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("DC-0A1B2C3D"));
    assert!(!page.body.contains("Step 5 of 5"));

    // A repeated submit is refused; the mock would panic on a second call.
    let reply = visitor.post("/booking", &[("action", "submit")]).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn incomplete_step_does_not_advance() {
    let mut visitor = Visitor::new(common::app());

    next(&mut visitor, &[]).await;
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 1 of 5"));

    next(&mut visitor, &[("provider", "2")]).await;
    next(&mut visitor, &[("service", "4")]).await;
    next(&mut visitor, &[("date", "2025-01-07")]).await;
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 3 of 5"), "time is still missing");
}

#[tokio::test]
async fn going_back_keeps_choices() {
    let mut visitor = Visitor::new(common::app());

    next(&mut visitor, &[("provider", "3")]).await;
    let reply = visitor.post("/booking", &[("action", "back")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 1 of 5"));
    assert!(page.body.contains("value=\"3\" checked"));
}

#[tokio::test]
async fn tampered_choices_are_rejected() {
    let mut visitor = Visitor::new(common::app());

    let reply = visitor.post("/booking", &[("action", "next"), ("provider", "77")]).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    next(&mut visitor, &[("provider", "1")]).await;
    next(&mut visitor, &[("service", "2")]).await;
    let reply = visitor.post("/booking", &[("action", "next"), ("date", "2025-03-01")]).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    let reply = visitor.post("/booking", &[("action", "next"), ("time", "11:45 PM")]).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);

    let reply = visitor.post("/booking", &[("action", "teleport")]).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    let reply = visitor.post("/booking", &[("action", "select"), ("time", "09:00 AM")]).await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn failed_submission_stays_on_review() {
    let failing = desk(SimulatedOutcome::Fail);
    let mut visitor = Visitor::new(router_with(state(failing.clone(), failing)));

    reach_review(&mut visitor).await;
    let reply = visitor.post("/booking", &[("action", "submit")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("We could not complete your booking. Please try again."));
    assert!(page.body.contains("Step 5 of 5"));
    assert!(page.body.contains("value=\"submit\""));

    let metrics = visitor.get("/metrics").await;
    assert!(metrics.body.contains("derm_centre_bookings_total{outcome=\"unavailable\"} 1"));
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_in_flight_conflicts() {
    let slow = Arc::new(SimulatedFrontDesk::new(Duration::from_millis(500), SimulatedOutcome::Succeed));
    let mut visitor = Visitor::new(router_with(state(slow.clone(), slow)));
    reach_review(&mut visitor).await;

    let mut first = visitor.clone();
    let pending = tokio::spawn(async move { first.post("/booking", &[("action", "submit")]).await });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let reply = visitor.post("/booking", &[("action", "submit")]).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    let reply = visitor.post("/booking", &[("action", "back")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    let reply = visitor.post("/booking", &[("action", "restart")]).await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let done = pending.await.unwrap();
    assert_eq!(done.status, StatusCode::SEE_OTHER);
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("DC-"));
}

#[tokio::test]
async fn restart_after_confirmation() {
    let mut visitor = Visitor::new(common::app());
    reach_review(&mut visitor).await;
    visitor.post("/booking", &[("action", "submit")]).await;

    let reply = visitor.post("/booking", &[("action", "restart")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 1 of 5"));
    assert!(!page.body.contains(" checked"));
}

#[tokio::test(start_paused = true)]
async fn dropped_submit_still_settles_the_wizard() {
    let slow = Arc::new(SimulatedFrontDesk::new(Duration::from_secs(60), SimulatedOutcome::Succeed));
    let mut visitor = Visitor::new(router_with(state(slow.clone(), slow)));
    reach_review(&mut visitor).await;

    let submit = visitor.post("/booking", &[("action", "submit")]);
    assert!(tokio::time::timeout(Duration::from_secs(1), submit).await.is_err());
    tokio::time::sleep(Duration::from_secs(120)).await;

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("DC-"));
    let reply = visitor.post("/booking", &[("action", "restart")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
}

struct BrokenDesk;

#[async_trait]
impl BookingService for BrokenDesk {
    async fn submit(&self, _request: &BookingRequest) -> Result<BookingConfirmation, BookingError> {
        panic!("front desk crashed");
    }
}

#[tokio::test]
async fn crashed_submit_can_be_restarted() {
    let mut visitor = Visitor::new(router_with(state(Arc::new(BrokenDesk), Arc::new(MockContactService::new()))));
    reach_review(&mut visitor).await;

    let reply = visitor.post("/booking", &[("action", "submit")]).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);

    let page = visitor.get("/booking").await;
    assert!(page.body.contains("We could not complete your booking. Please try again."));
    assert!(page.body.contains("Step 5 of 5"));
    let reply = visitor.post("/booking", &[("action", "restart")]).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    let page = visitor.get("/booking").await;
    assert!(page.body.contains("Step 1 of 5"));
}
