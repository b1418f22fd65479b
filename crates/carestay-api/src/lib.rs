//! # Carestay API
//!
//! Typed HTTP client for the Carestay REST API.
//!
//! [`ApiClient`] owns the connection and the bearer token. Each resource is
//! exposed through a small endpoint struct implementing the traits in
//! [`resource`], which is what the state layer programs against.
//!
//! Every response body is normalized by [`envelope`] before decoding, so
//! callers never see the `{ "data": ... }` wrapper.

mod accommodations;
mod appointments;
mod auth;
mod catalog;
mod client;
pub mod dashboard;
pub mod envelope;
mod error;
mod feedback;
mod notifications;
pub mod resource;
mod transportation;
mod users;

pub use accommodations::AccommodationsApi;
pub use appointments::AppointmentsApi;
pub use auth::{AuthApi, AuthEndpoints};
pub use catalog::{CentersApi, MealOptionsApi, RoomsApi};
pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use dashboard::{AdminStats, DashboardApi, DashboardSource, PatientStats, ProviderStats};
pub use error::{ApiError, ApiResult};
pub use feedback::FeedbackApi;
pub use notifications::{MarkReadApi, NotificationsApi};
pub use resource::{CancelApi, DeleteApi, ReadApi, WriteApi};
pub use transportation::TransportationApi;
pub use users::UsersApi;
