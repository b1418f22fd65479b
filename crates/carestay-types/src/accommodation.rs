//! Accommodation (room stay) types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{Appointment, Cancellable, MealOption, Resource, Room};

/// Lifecycle status of an accommodation booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationStatus {
    /// Requested, awaiting confirmation.
    Pending,
    /// Confirmed by the facility.
    Confirmed,
    /// Guest has arrived.
    CheckedIn,
    /// Guest has left.
    CheckedOut,
    /// Cancelled.
    Cancelled,
    /// Changed after confirmation.
    Modified,
}

impl std::fmt::Display for AccommodationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccommodationStatus::Pending => write!(f, "pending"),
            AccommodationStatus::Confirmed => write!(f, "confirmed"),
            AccommodationStatus::CheckedIn => write!(f, "checked_in"),
            AccommodationStatus::CheckedOut => write!(f, "checked_out"),
            AccommodationStatus::Cancelled => write!(f, "cancelled"),
            AccommodationStatus::Modified => write!(f, "modified"),
        }
    }
}

/// A room stay linked to an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    /// Accommodation ID.
    pub id: u64,
    /// Appointment the stay belongs to.
    pub appointment_id: u64,
    /// Booked room.
    pub room_id: u64,
    /// Selected meal plan.
    #[serde(default)]
    pub meal_option_id: Option<u64>,
    /// Arrival date.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Number of guests.
    #[serde(default = "default_guests")]
    pub guests: u32,
    /// Free-text requests.
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Current status.
    pub status: AccommodationStatus,
    /// Embedded appointment.
    #[serde(default)]
    pub appointment: Option<Box<Appointment>>,
    /// Embedded room.
    #[serde(default)]
    pub room: Option<Room>,
    /// Embedded meal option.
    #[serde(default)]
    pub meal_option: Option<MealOption>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_guests() -> u32 {
    1
}

impl Accommodation {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }
}

impl Resource for Accommodation {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Cancellable for Accommodation {
    fn mark_cancelled(&mut self) {
        self.status = AccommodationStatus::Cancelled;
    }

    fn is_cancelled(&self) -> bool {
        self.status == AccommodationStatus::Cancelled
    }
}

/// Room booking form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[validate(schema(function = "validate_stay_dates", skip_on_field_errors = false))]
pub struct NewAccommodation {
    /// Appointment the stay belongs to.
    #[validate(range(min = 1, message = "Select an appointment"))]
    pub appointment_id: u64,
    /// Room to book.
    #[validate(range(min = 1, message = "Select a room"))]
    pub room_id: u64,
    /// Meal plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_option_id: Option<u64>,
    /// Arrival date.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Number of guests.
    #[validate(range(min = 1, max = 6, message = "Guests must be between 1 and 6"))]
    pub guests: u32,
    /// Free-text requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Special requests are limited to 1000 characters"))]
    pub special_requests: Option<String>,
}

fn validate_stay_dates(stay: &NewAccommodation) -> Result<(), ValidationError> {
    if stay.check_out_date <= stay.check_in_date {
        let mut err = ValidationError::new("check_out_before_check_in");
        err.message = Some("Check-out must be after check-in".into());
        return Err(err);
    }
    Ok(())
}

/// Partial update of an accommodation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AccommodationUpdate {
    /// New room.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<u64>,
    /// New meal plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_option_id: Option<u64>,
    /// New arrival date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<NaiveDate>,
    /// New departure date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<NaiveDate>,
    /// New guest count.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 6, message = "Guests must be between 1 and 6"))]
    pub guests: Option<u32>,
    /// New requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Special requests are limited to 1000 characters"))]
    pub special_requests: Option<String>,
    /// New status, subject to server-side transition rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccommodationStatus>,
}

/// Query parameters for listing accommodations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccommodationFilter {
    /// Only stays for this appointment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<u64>,
    /// Only stays of this patient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<u64>,
    /// Only stays with this status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AccommodationStatus>,
}
