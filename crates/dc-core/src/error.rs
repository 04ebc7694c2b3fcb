//! # AppError
//!
//! Centralized error handling for the clinic site.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

use crate::traits::{BookingError, ContactError};
use crate::wizard::WizardError;

/// The primary error type for all dc-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., blog post, gallery item, doctor)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty required field, date outside the booking window)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Request conflicts with current state (e.g., a booking already in flight)
    #[error("conflict: {0}")]
    Conflict(String),

    /// A downstream service (booking desk, mail relay) could not be reached
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Infrastructure failure (e.g., template rendering, content source down)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Failed(booking) => booking.into(),
            WizardError::SubmissionInFlight | WizardError::AlreadySubmitted => {
                AppError::Conflict(err.to_string())
            }
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Unavailable(_) => AppError::Unavailable(err.to_string()),
            BookingError::SlotTaken => AppError::Conflict(err.to_string()),
            BookingError::Rejected(_) => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for clinic site logic.
pub type Result<T> = std::result::Result<T, AppError>;
