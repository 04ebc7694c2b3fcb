//! # Booking wizard
//!
//! A strictly linear five-step flow: provider, service, date and time,
//! patient details, review. Each step must be complete before the wizard
//! moves forward; moving back never clears what was chosen. The review step
//! hands a [`BookingRequest`] to a [`BookingService`] and the wizard ends in
//! [`WizardStep::Submitted`] once the service confirms.
//!
//! The wizard is a plain value owned by the caller (one per browsing
//! session). Submission is split into [`BookingWizard::begin_submission`] and
//! [`BookingWizard::finish_submission`] so a caller holding the wizard behind
//! a lock can release it while the service call is pending.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Doctor, Service};
use crate::traits::{BookingError, BookingService};

pub const TOTAL_STEPS: u8 = 5;

/// Length of the rolling window of bookable days, starting today.
pub const BOOKING_WINDOW_DAYS: u64 = 14;

/// Slots offered on every bookable day.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
    "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    Provider,
    Service,
    DateTime,
    PatientInfo,
    Review,
    Submitted,
}

impl WizardStep {
    /// 1-based position; `Submitted` reports 6.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Provider => 1,
            WizardStep::Service => 2,
            WizardStep::DateTime => 3,
            WizardStep::PatientInfo => 4,
            WizardStep::Review => 5,
            WizardStep::Submitted => 6,
        }
    }

    fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Provider => Some(WizardStep::Service),
            WizardStep::Service => Some(WizardStep::DateTime),
            WizardStep::DateTime => Some(WizardStep::PatientInfo),
            WizardStep::PatientInfo => Some(WizardStep::Review),
            WizardStep::Review | WizardStep::Submitted => None,
        }
    }

    fn previous(self) -> Option<WizardStep> {
        match self {
            WizardStep::Service => Some(WizardStep::Provider),
            WizardStep::DateTime => Some(WizardStep::Service),
            WizardStep::PatientInfo => Some(WizardStep::DateTime),
            WizardStep::Review => Some(WizardStep::PatientInfo),
            WizardStep::Provider | WizardStep::Submitted => None,
        }
    }
}

/// The bookable days: `BOOKING_WINDOW_DAYS` consecutive days from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    start: NaiveDate,
}

impl AvailabilityWindow {
    pub fn starting(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..BOOKING_WINDOW_DAYS).filter_map(move |offset| self.start.checked_add_days(Days::new(offset)))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates().any(|d| d == date)
    }
}

/// Contact details collected on step 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl PatientInfo {
    /// First name, last name, email and phone are all present.
    pub fn has_required_fields(&self) -> bool {
        [&self.first_name, &self.last_name, &self.email, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Everything chosen so far. Fields are only ever overwritten, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSelection {
    pub provider: Option<Doctor>,
    pub service: Option<Service>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub patient: PatientInfo,
}

impl BookingSelection {
    fn to_request(&self) -> Option<BookingRequest> {
        Some(BookingRequest {
            doctor: self.provider.clone()?,
            service: self.service.clone()?,
            date: self.date?,
            time: self.time.clone()?,
            patient: self.patient.clone(),
        })
    }
}

/// A complete selection, as handed to the booking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor: Doctor,
    pub service: Service,
    pub date: NaiveDate,
    pub time: String,
    pub patient: PatientInfo,
}

/// The booking service's acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Reference quoted to the patient, e.g. "DC-3F2A91C0"
    pub reference: String,
    pub confirmed_at: DateTime<Utc>,
}

/// Outcome of [`BookingWizard::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward to the given step.
    Moved(WizardStep),
    /// The current step is incomplete (or the wizard is finished/busy); nothing changed.
    Blocked,
    /// On the review step; the caller should submit.
    SubmissionRequired,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("{0} is outside the booking window")]
    DateOutsideWindow(NaiveDate),

    #[error("`{0}` is not an offered time slot")]
    UnknownTimeSlot(String),

    #[error("the booking can only be submitted from the review step")]
    NotReadyToSubmit,

    #[error("the booking is incomplete")]
    Incomplete,

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("the booking has already been submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Failed(#[from] BookingError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    step: WizardStep,
    selection: BookingSelection,
    window: AvailabilityWindow,
    in_flight: bool,
    last_failure: Option<BookingError>,
    confirmation: Option<BookingConfirmation>,
}

impl BookingWizard {
    /// A fresh wizard on step 1 whose booking window starts at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::Provider,
            selection: BookingSelection::default(),
            window: AvailabilityWindow::starting(today),
            in_flight: false,
            last_failure: None,
            confirmation: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn window(&self) -> &AvailabilityWindow {
        &self.window
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// The error from the most recent failed submission, cleared on the next attempt.
    pub fn last_failure(&self) -> Option<&BookingError> {
        self.last_failure.as_ref()
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    /// Progress bar value, 20 per completed-or-current step.
    pub fn progress_percent(&self) -> u8 {
        self.step.number().min(TOTAL_STEPS) * (100 / TOTAL_STEPS)
    }

    /// Whether the data the current step asks for is complete.
    pub fn is_step_valid(&self) -> bool {
        let s = &self.selection;
        match self.step {
            WizardStep::Provider => s.provider.is_some(),
            WizardStep::Service => s.service.is_some(),
            WizardStep::DateTime => s.date.is_some() && s.time.is_some(),
            WizardStep::PatientInfo => s.patient.has_required_fields(),
            WizardStep::Review => true,
            WizardStep::Submitted => false,
        }
    }

    /// Moves to the next step if the current one is complete.
    pub fn advance(&mut self) -> Advance {
        if self.in_flight || !self.is_step_valid() {
            debug!(step = ?self.step, in_flight = self.in_flight, "wizard advance blocked");
            return Advance::Blocked;
        }
        if self.step == WizardStep::Review {
            return Advance::SubmissionRequired;
        }
        match self.step.next() {
            Some(next) => {
                debug!(from = ?self.step, to = ?next, "wizard advanced");
                self.step = next;
                Advance::Moved(next)
            }
            None => Advance::Blocked,
        }
    }

    pub fn can_retreat(&self) -> bool {
        !self.in_flight && self.step.previous().is_some()
    }

    /// Steps back one step, keeping every choice. Returns `false` when
    /// already on step 1, finished, or waiting on a submission.
    pub fn retreat(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        match self.step.previous() {
            Some(previous) => {
                debug!(from = ?self.step, to = ?previous, "wizard retreated");
                self.step = previous;
                true
            }
            None => false,
        }
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.in_flight {
            Err(WizardError::SubmissionInFlight)
        } else if self.step == WizardStep::Submitted {
            Err(WizardError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    pub fn choose_provider(&mut self, doctor: Doctor) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.selection.provider = Some(doctor);
        Ok(())
    }

    pub fn choose_service(&mut self, service: Service) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.selection.service = Some(service);
        Ok(())
    }

    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), WizardError> {
        self.ensure_editable()?;
        if !self.window.contains(date) {
            return Err(WizardError::DateOutsideWindow(date));
        }
        self.selection.date = Some(date);
        Ok(())
    }

    pub fn choose_time(&mut self, slot: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;
        let slot = slot.trim();
        let offered = TIME_SLOTS
            .iter()
            .find(|offered| offered.eq_ignore_ascii_case(slot))
            .ok_or_else(|| WizardError::UnknownTimeSlot(slot.to_string()))?;
        self.selection.time = Some((*offered).to_string());
        Ok(())
    }

    pub fn set_patient(&mut self, patient: PatientInfo) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.selection.patient = patient;
        Ok(())
    }

    /// Marks a submission as in flight and returns the request to send.
    /// At most one submission can be in flight at a time.
    pub fn begin_submission(&mut self) -> Result<BookingRequest, WizardError> {
        match self.step {
            WizardStep::Submitted => return Err(WizardError::AlreadySubmitted),
            WizardStep::Review => {}
            _ => return Err(WizardError::NotReadyToSubmit),
        }
        if self.in_flight {
            return Err(WizardError::SubmissionInFlight);
        }
        let request = self.selection.to_request().ok_or(WizardError::Incomplete)?;
        self.in_flight = true;
        self.last_failure = None;
        debug!(doctor = %request.doctor.id, service = %request.service.id, "booking submission started");
        Ok(request)
    }

    /// Records the booking service's answer for the in-flight submission.
    pub fn finish_submission(&mut self, outcome: Result<BookingConfirmation, BookingError>) {
        if !self.in_flight {
            warn!("booking outcome arrived with no submission in flight; ignored");
            return;
        }
        self.in_flight = false;
        match outcome {
            Ok(confirmation) => {
                info!(reference = %confirmation.reference, "booking confirmed");
                self.confirmation = Some(confirmation);
                self.step = WizardStep::Submitted;
            }
            Err(err) => {
                warn!(error = %err, "booking submission failed");
                self.last_failure = Some(err);
            }
        }
    }

    /// Submits through `service` and waits for the outcome. For callers that
    /// own the wizard outright; shared callers use the begin/finish pair.
    pub async fn submit(&mut self, service: &dyn BookingService) -> Result<&BookingConfirmation, WizardError> {
        let request = self.begin_submission()?;
        let outcome = service.submit(&request).await;
        let failure = outcome.as_ref().err().cloned();
        self.finish_submission(outcome);
        match (failure, self.confirmation.as_ref()) {
            (Some(err), _) => Err(WizardError::Failed(err)),
            (None, Some(confirmation)) => Ok(confirmation),
            (None, None) => Err(WizardError::Incomplete),
        }
    }
}
