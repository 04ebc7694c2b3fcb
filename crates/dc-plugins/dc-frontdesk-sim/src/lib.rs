//! # dc-frontdesk-sim
//! derm-centre/crates/dc-plugins/dc-frontdesk-sim/src/lib.rs
//! Simulated front desk: accepts bookings and contact messages after a
//! configurable delay, without talking to any real scheduling system.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dc_core::models::ContactMessage;
use dc_core::traits::{BookingError, BookingService, ContactError, ContactService};
use dc_core::wizard::{BookingConfirmation, BookingRequest};
use serde::Deserialize;
use uuid::Uuid;

/// How every simulated call ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedOutcome {
    #[default]
    Succeed,
    Fail,
}

pub struct SimulatedFrontDesk {
    latency: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedFrontDesk {
    pub fn new(latency: Duration, outcome: SimulatedOutcome) -> Self {
        Self { latency, outcome }
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// "DC-" followed by eight upper-case hex digits.
fn booking_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("DC-{}", id[..8].to_ascii_uppercase())
}

#[async_trait]
impl BookingService for SimulatedFrontDesk {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, BookingError> {
        self.pause().await;

        if self.outcome == SimulatedOutcome::Fail {
            tracing::warn!(doctor = %request.doctor.id, "Simulated booking failure");
            return Err(BookingError::Unavailable("front desk offline".into()));
        }

        let confirmation = BookingConfirmation {
            reference: booking_reference(),
            confirmed_at: Utc::now(),
        };
        tracing::info!(
            reference = %confirmation.reference,
            doctor = %request.doctor.id,
            service = %request.service.id,
            date = %request.date,
            "Booking confirmed"
        );
        Ok(confirmation)
    }
}

#[async_trait]
impl ContactService for SimulatedFrontDesk {
    async fn send(&self, message: &ContactMessage) -> Result<(), ContactError> {
        self.pause().await;
        match self.outcome {
            SimulatedOutcome::Succeed => {
                tracing::info!(subject = %message.subject, "Contact message accepted");
                Ok(())
            }
            SimulatedOutcome::Fail => Err(ContactError::Unavailable("relay offline".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dc_core::models::{Doctor, RecordId, Service};
    use dc_core::wizard::PatientInfo;

    fn request(time: &str) -> BookingRequest {
        BookingRequest {
            doctor: Doctor {
                id: RecordId(1),
                name: "Dr. Sarah Johnson".into(),
                title: String::new(),
                specialty: String::new(),
                experience: String::new(),
                rating: 4.9,
                reviews: 0,
                price: 350,
                availability: vec![],
            },
            service: Service {
                id: RecordId(1),
                category: "dermatology".into(),
                name: "General Dermatology Consultation".into(),
                duration_minutes: 30,
                price: 200,
                description: String::new(),
            },
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            time: time.into(),
            patient: PatientInfo {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                email: "jane@example.com".into(),
                phone: "555-0100".into(),
                ..PatientInfo::default()
            },
        }
    }

    #[tokio::test]
    async fn confirms_with_reference() {
        let desk = SimulatedFrontDesk::new(Duration::ZERO, SimulatedOutcome::Succeed);
        let confirmation = desk.submit(&request("09:00 AM")).await.unwrap();
        assert!(confirmation.reference.starts_with("DC-"));
        assert_eq!(confirmation.reference.len(), 11);
    }

    #[tokio::test]
    async fn references_differ_between_bookings() {
        let desk = SimulatedFrontDesk::new(Duration::ZERO, SimulatedOutcome::Succeed);
        let first = desk.submit(&request("09:00 AM")).await.unwrap();
        let second = desk.submit(&request("09:00 AM")).await.unwrap();
        assert_ne!(first.reference, second.reference);
    }

    #[tokio::test]
    async fn failing_desk_reports_unavailable() {
        let desk = SimulatedFrontDesk::new(Duration::ZERO, SimulatedOutcome::Fail);
        assert!(matches!(desk.submit(&request("09:00 AM")).await, Err(BookingError::Unavailable(_))));
        let message = ContactMessage {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone: None,
            subject: "Hi".into(),
            message: "Hello".into(),
        };
        assert!(desk.send(&message).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_honoured() {
        let desk = SimulatedFrontDesk::new(Duration::from_millis(1500), SimulatedOutcome::Succeed);
        let started = tokio::time::Instant::now();
        desk.submit(&request("10:00 AM")).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1500));
    }
}
