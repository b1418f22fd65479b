//! Common types used throughout `carestay`.
//!
//! This crate provides the domain entities mirrored from the Carestay REST API,
//! their lifecycle status enums, the request payloads sent back to it, and the
//! synchronous client-side validation rules applied to those payloads before
//! any request is made.

mod accommodation;
mod appointment;
mod catalog;
mod feedback;
mod notification;
mod resource;
mod transportation;
mod user;
pub mod validation;

pub use accommodation::{
    Accommodation, AccommodationFilter, AccommodationStatus, AccommodationUpdate,
    NewAccommodation,
};
pub use appointment::{
    Appointment, AppointmentFilter, AppointmentStatus, AppointmentUpdate, NewAppointment,
};
pub use catalog::{Center, CenterFilter, MealOption, MealOptionFilter, Room, RoomFilter};
pub use feedback::{Feedback, FeedbackCategory, FeedbackFilter, FeedbackUpdate, NewFeedback};
pub use notification::{Notification, NotificationFilter};
pub use resource::{Cancellable, Resource};
pub use transportation::{
    NewTransportationRequest, TransportationFilter, TransportationRequest,
    TransportationStatus, TransportationUpdate,
};
pub use user::{
    AuthSession, LoginRequest, RegisterRequest, Role, User, UserFilter, UserSummary,
};
pub use validation::FieldError;
