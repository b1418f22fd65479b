//! Appointment types and lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Cancellable, Center, Resource, UserSummary};

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked and pending.
    Scheduled,
    /// Attended.
    Completed,
    /// Cancelled by either side.
    Cancelled,
    /// Moved to another time.
    Rescheduled,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

/// An appointment between a patient and a provider at a center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Appointment ID.
    pub id: u64,
    /// Patient user ID.
    pub patient_id: u64,
    /// Provider user ID.
    pub provider_id: u64,
    /// Center ID.
    pub center_id: u64,
    /// Scheduled start.
    pub appointment_datetime: DateTime<Utc>,
    /// Current status.
    pub status: AppointmentStatus,
    /// Reason for the visit.
    #[serde(default)]
    pub reason: Option<String>,
    /// Provider or admin notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Embedded patient.
    #[serde(default)]
    pub patient: Option<UserSummary>,
    /// Embedded provider.
    #[serde(default)]
    pub provider: Option<UserSummary>,
    /// Embedded center.
    #[serde(default)]
    pub center: Option<Center>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Returns true if the appointment is still scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}

impl Resource for Appointment {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Cancellable for Appointment {
    fn mark_cancelled(&mut self) {
        self.status = AppointmentStatus::Cancelled;
    }

    fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

/// Booking form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewAppointment {
    /// Patient user ID.
    #[validate(range(min = 1, message = "Select a patient"))]
    pub patient_id: u64,
    /// Provider user ID.
    #[validate(range(min = 1, message = "Select a provider"))]
    pub provider_id: u64,
    /// Center ID.
    #[validate(range(min = 1, message = "Select a center"))]
    pub center_id: u64,
    /// Requested start.
    pub appointment_datetime: DateTime<Utc>,
    /// Reason for the visit.
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Partial update of an appointment. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AppointmentUpdate {
    /// New start time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_datetime: Option<DateTime<Utc>>,
    /// New status, subject to server-side transition rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    /// New reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: Option<String>,
    /// New notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query parameters for listing appointments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppointmentFilter {
    /// Only this patient's appointments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<u64>,
    /// Only this provider's appointments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<u64>,
    /// Only appointments at this center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<u64>,
    /// Only appointments with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl AppointmentFilter {
    /// Filter by patient.
    pub fn for_patient(patient_id: u64) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }

    /// Filter by provider.
    pub fn for_provider(provider_id: u64) -> Self {
        Self {
            provider_id: Some(provider_id),
            ..Self::default()
        }
    }

    /// Restricts the filter to one status.
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }
}
