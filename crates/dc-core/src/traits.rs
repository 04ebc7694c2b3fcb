//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    BlogPost, ClinicInfo, ContactMessage, Department, Doctor, Faq, GalleryItem, RecordId, Service,
    Treatment,
};
use crate::wizard::{BookingConfirmation, BookingRequest};

/// Read-only content contract for articles, gallery cases and practice data.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentRepo: Send + Sync {
    // Blog
    async fn list_posts(&self) -> anyhow::Result<Vec<BlogPost>>;
    async fn get_post(&self, id: RecordId) -> anyhow::Result<Option<BlogPost>>;

    // Gallery
    async fn list_gallery(&self) -> anyhow::Result<Vec<GalleryItem>>;
    async fn get_gallery_item(&self, id: RecordId) -> anyhow::Result<Option<GalleryItem>>;

    // Booking catalogue
    async fn list_doctors(&self) -> anyhow::Result<Vec<Doctor>>;
    async fn get_doctor(&self, id: RecordId) -> anyhow::Result<Option<Doctor>>;
    async fn list_services(&self) -> anyhow::Result<Vec<Service>>;
    async fn get_service(&self, id: RecordId) -> anyhow::Result<Option<Service>>;

    // Practice
    async fn list_treatments(&self) -> anyhow::Result<Vec<Treatment>>;
    async fn clinic(&self) -> anyhow::Result<ClinicInfo>;
    async fn departments(&self) -> anyhow::Result<Vec<Department>>;
    async fn faqs(&self) -> anyhow::Result<Vec<Faq>>;
}

/// Why the front desk refused or failed a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Network or service outage; the request may be retried.
    #[error("booking service unavailable: {0}")]
    Unavailable(String),

    /// The chosen slot was taken between selection and submission.
    #[error("the selected time slot is no longer available")]
    SlotTaken,

    /// The service refused the request outright.
    #[error("booking rejected: {0}")]
    Rejected(String),
}

/// Appointment intake contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Books the appointment described by `request`.
    async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, BookingError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("message relay unavailable: {0}")]
    Unavailable(String),
}

/// Outbound channel for contact-form messages.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContactService: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), ContactError>;
}
