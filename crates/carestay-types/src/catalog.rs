//! Read-mostly facility catalog: centers, rooms, and meal options.

use serde::{Deserialize, Serialize};

use crate::Resource;

/// A healthcare center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    /// Center ID.
    pub id: u64,
    /// Center name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

impl Resource for Center {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Query parameters for listing centers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CenterFilter {
    /// Only centers in this city.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// A bookable room at a center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Room ID.
    pub id: u64,
    /// Owning center.
    pub center_id: u64,
    /// Room number as shown on the door.
    pub room_number: String,
    /// Room type (e.g. "single", "double", "suite").
    #[serde(default)]
    pub room_type: Option<String>,
    /// Maximum number of guests.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Price per night.
    #[serde(default)]
    pub price_per_night: Option<f64>,
    /// Whether the room can currently be booked.
    #[serde(default)]
    pub is_available: bool,
    /// Embedded center.
    #[serde(default)]
    pub center: Option<Center>,
}

impl Resource for Room {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Query parameters for listing rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomFilter {
    /// Only rooms at this center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_id: Option<u64>,
    /// Only rooms with this availability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// A meal plan that can be attached to an accommodation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealOption {
    /// Meal option ID.
    pub id: u64,
    /// Name (e.g. "Full board").
    pub name: String,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Price per day.
    #[serde(default)]
    pub price: Option<f64>,
}

impl Resource for MealOption {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Query parameters for listing meal options. The API takes none today.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealOptionFilter {}
