//! # Carestay State
//!
//! Client-side state for Carestay applications: one store per server
//! collection, the authentication state machine, dashboard figures, session
//! persistence, settings and logging setup.
//!
//! Everything hangs off [`CarestayApp`], which is created once from
//! [`Settings`] and passed to whatever renders it. There are no globals.

pub mod app;
pub mod auth;
pub mod dashboard;
mod error;
pub mod logging;
mod notifications;
pub mod session;
pub mod settings;
pub mod store;

pub use app::{
    AccommodationStore, AppointmentStore, CarestayApp, CenterStore, FeedbackStore,
    MealOptionStore, NotificationStore, RoomStore, TransportationStore, UserStore,
};
pub use auth::{AuthPhase, AuthState, AuthStore};
pub use dashboard::{DashboardState, DashboardStore};
pub use error::{Error, Result, SessionError, SettingsError};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use settings::Settings;
pub use store::{ResourceStore, StoreState};
