//! Transportation request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Appointment, Cancellable, Resource};

/// Lifecycle status of a transportation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportationStatus {
    /// Requested, awaiting dispatch.
    Pending,
    /// A vehicle has been assigned.
    Confirmed,
    /// Trip done.
    Completed,
    /// Cancelled.
    Cancelled,
    /// Changed after confirmation.
    Modified,
}

impl std::fmt::Display for TransportationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportationStatus::Pending => write!(f, "pending"),
            TransportationStatus::Confirmed => write!(f, "confirmed"),
            TransportationStatus::Completed => write!(f, "completed"),
            TransportationStatus::Cancelled => write!(f, "cancelled"),
            TransportationStatus::Modified => write!(f, "modified"),
        }
    }
}

/// A ride to or from an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportationRequest {
    /// Request ID.
    pub id: u64,
    /// Appointment served by the ride.
    pub appointment_id: u64,
    /// Requesting patient.
    #[serde(default)]
    pub patient_id: Option<u64>,
    /// Pickup address.
    pub pickup_address: String,
    /// Drop-off address, defaulting to the center.
    #[serde(default)]
    pub dropoff_address: Option<String>,
    /// Requested pickup time.
    pub pickup_time: DateTime<Utc>,
    /// Vehicle type (e.g. "sedan", "wheelchair_van").
    #[serde(default)]
    pub vehicle_type: Option<String>,
    /// Number of passengers.
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    /// Accessibility or other needs.
    #[serde(default)]
    pub special_requirements: Option<String>,
    /// Current status.
    pub status: TransportationStatus,
    /// Embedded appointment.
    #[serde(default)]
    pub appointment: Option<Box<Appointment>>,
}

fn default_passengers() -> u32 {
    1
}

impl TransportationRequest {
    /// Returns true while the request waits for dispatch.
    pub fn is_pending(&self) -> bool {
        self.status == TransportationStatus::Pending
    }
}

impl Resource for TransportationRequest {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Cancellable for TransportationRequest {
    fn mark_cancelled(&mut self) {
        self.status = TransportationStatus::Cancelled;
    }

    fn is_cancelled(&self) -> bool {
        self.status == TransportationStatus::Cancelled
    }
}

/// Transportation request form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewTransportationRequest {
    /// Appointment served by the ride.
    #[validate(range(min = 1, message = "Select an appointment"))]
    pub appointment_id: u64,
    /// Pickup address.
    #[validate(length(min = 5, max = 255, message = "Enter a pickup address"))]
    pub pickup_address: String,
    /// Drop-off address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 255, message = "Enter a valid drop-off address"))]
    pub dropoff_address: Option<String>,
    /// Requested pickup time.
    pub pickup_time: DateTime<Utc>,
    /// Vehicle type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Number of passengers.
    #[validate(range(min = 1, max = 10, message = "Passengers must be between 1 and 10"))]
    pub passengers: u32,
    /// Accessibility or other needs.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000))]
    pub special_requirements: Option<String>,
}

/// Partial update of a transportation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct TransportationUpdate {
    /// New pickup address.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 5, max = 255, message = "Enter a pickup address"))]
    pub pickup_address: Option<String>,
    /// New drop-off address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_address: Option<String>,
    /// New pickup time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<DateTime<Utc>>,
    /// New passenger count.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 10, message = "Passengers must be between 1 and 10"))]
    pub passengers: Option<u32>,
    /// New requirements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<String>,
    /// New status, subject to server-side transition rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransportationStatus>,
}

/// Query parameters for listing transportation requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransportationFilter {
    /// Only requests for this appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<u64>,
    /// Only requests of this patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<u64>,
    /// Only requests with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransportationStatus>,
}
