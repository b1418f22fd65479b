//! # Application Root
//!
//! [`CarestayApp`] owns the HTTP client, the session storage and one instance
//! of every store. Whenever the authenticated identity changes, every domain
//! store is reset so nothing cached for one user is shown to the next.

use std::path::Path;
use std::sync::Arc;

use carestay_api::{
    AccommodationsApi, ApiClient, AppointmentsApi, AuthEndpoints, CentersApi, DashboardApi,
    FeedbackApi, MealOptionsApi, NotificationsApi, RoomsApi, TransportationApi, UsersApi,
};
use carestay_types::{
    validation, Accommodation, Appointment, Feedback, LoginRequest, NewAccommodation,
    NewAppointment, NewFeedback, NewTransportationRequest, RegisterRequest,
    TransportationRequest, User,
};

use crate::auth::AuthStore;
use crate::dashboard::DashboardStore;
use crate::error::{Error, Result};
use crate::session::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use crate::settings::Settings;
use crate::store::ResourceStore;

/// Appointment store.
pub type AppointmentStore = ResourceStore<AppointmentsApi>;
/// Accommodation store.
pub type AccommodationStore = ResourceStore<AccommodationsApi>;
/// Transportation request store.
pub type TransportationStore = ResourceStore<TransportationApi>;
/// Feedback store.
pub type FeedbackStore = ResourceStore<FeedbackApi>;
/// Notification store.
pub type NotificationStore = ResourceStore<NotificationsApi>;
/// Center store.
pub type CenterStore = ResourceStore<CentersApi>;
/// Room store.
pub type RoomStore = ResourceStore<RoomsApi>;
/// Meal option store.
pub type MealOptionStore = ResourceStore<MealOptionsApi>;
/// User store.
pub type UserStore = ResourceStore<UsersApi>;

/// The application's state, created once at startup.
///
/// # Examples
///
/// ```rust,ignore
/// use carestay_state::CarestayApp;
/// use carestay_types::{AppointmentFilter, LoginRequest};
///
/// let app = CarestayApp::load(None)?;
/// let next = app.login(&LoginRequest::new("ada@example.com", "secret")).await?;
///
/// let me = app.auth().user().expect("logged in");
/// app.appointments().fetch_list(&AppointmentFilter::for_patient(me.id)).await;
/// ```
pub struct CarestayApp {
    client: ApiClient,
    storage: Arc<dyn SessionStorage>,
    auth: AuthStore<AuthEndpoints>,
    appointments: AppointmentStore,
    accommodations: AccommodationStore,
    transportation: TransportationStore,
    feedback: FeedbackStore,
    notifications: NotificationStore,
    centers: CenterStore,
    rooms: RoomStore,
    meal_options: MealOptionStore,
    users: UserStore,
    dashboard: DashboardStore<DashboardApi>,
}

impl std::fmt::Debug for CarestayApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarestayApp")
            .field("client", &self.client)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl CarestayApp {
    /// Builds the application from settings and restores a persisted session.
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = ApiClient::with_timeout(&settings.api_url, settings.timeout())?;
        let storage: Arc<dyn SessionStorage> = match settings.session_path() {
            Some(path) => Arc::new(FileSessionStorage::new(path)),
            None => {
                tracing::warn!("No config directory, session will not survive restarts");
                Arc::new(MemorySessionStorage::new())
            }
        };

        let app = Self::with_parts(client, storage);
        app.restore();
        Ok(app)
    }

    /// Loads settings from `config_file` (or the default location) and the
    /// environment, then builds the application.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let settings = Settings::load_from(config_file)?;
        Self::new(&settings)
    }

    /// Builds the application from an existing client and storage.
    ///
    /// No session is restored; call [`CarestayApp::restore`] if needed.
    pub fn with_parts(client: ApiClient, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            auth: AuthStore::new(client.auth(), storage.clone()),
            appointments: ResourceStore::new(client.appointments()),
            accommodations: ResourceStore::new(client.accommodations()),
            transportation: ResourceStore::new(client.transportation()),
            feedback: ResourceStore::new(client.feedback()),
            notifications: ResourceStore::new(client.notifications()),
            centers: ResourceStore::new(client.centers()),
            rooms: ResourceStore::new(client.rooms()),
            meal_options: ResourceStore::new(client.meal_options()),
            users: ResourceStore::new(client.users()),
            dashboard: DashboardStore::new(client.dashboard()),
            storage,
            client,
        }
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Session storage.
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// Authentication store.
    pub fn auth(&self) -> &AuthStore<AuthEndpoints> {
        &self.auth
    }

    /// Appointment store.
    pub fn appointments(&self) -> &AppointmentStore {
        &self.appointments
    }

    /// Accommodation store.
    pub fn accommodations(&self) -> &AccommodationStore {
        &self.accommodations
    }

    /// Transportation request store.
    pub fn transportation(&self) -> &TransportationStore {
        &self.transportation
    }

    /// Feedback store.
    pub fn feedback(&self) -> &FeedbackStore {
        &self.feedback
    }

    /// Notification store.
    pub fn notifications(&self) -> &NotificationStore {
        &self.notifications
    }

    /// Center store.
    pub fn centers(&self) -> &CenterStore {
        &self.centers
    }

    /// Room store.
    pub fn rooms(&self) -> &RoomStore {
        &self.rooms
    }

    /// Meal option store.
    pub fn meal_options(&self) -> &MealOptionStore {
        &self.meal_options
    }

    /// User store.
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Dashboard store.
    pub fn dashboard(&self) -> &DashboardStore<DashboardApi> {
        &self.dashboard
    }

    // ==================== Authentication ====================

    /// Re-enters a persisted session. Returns true if one was found.
    pub fn restore(&self) -> bool {
        self.auth.restore()
    }

    /// Validates the credentials, logs in, and returns the path to navigate to.
    ///
    /// Domain stores are reset on success.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<String> {
        validation::check(credentials).map_err(Error::Validation)?;
        let target = self.auth.login(credentials).await?;
        self.reset_stores();
        Ok(target)
    }

    /// Validates the payload, registers, and returns the path to navigate to.
    ///
    /// Domain stores are reset on success.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<String> {
        validation::check(payload).map_err(Error::Validation)?;
        let target = self.auth.register(payload).await?;
        self.reset_stores();
        Ok(target)
    }

    /// Logs out and resets every store.
    pub async fn logout(&self) {
        self.auth.logout().await;
        self.reset_stores();
    }

    /// Re-fetches the authenticated user.
    ///
    /// If the server rejects the token the session ends, and every store is
    /// reset as on logout. Prefer this over [`AuthStore::refresh_user`].
    pub async fn refresh_user(&self) -> Result<User> {
        let result = self.auth.refresh_user().await;
        if matches!(&result, Err(Error::Api(e)) if e.is_unauthorized()) {
            self.reset_stores();
        }
        result
    }

    /// Drops every cached domain collection.
    pub fn reset_stores(&self) {
        self.appointments.reset();
        self.accommodations.reset();
        self.transportation.reset();
        self.feedback.reset();
        self.notifications.reset();
        self.centers.reset();
        self.rooms.reset();
        self.meal_options.reset();
        self.users.reset();
        self.dashboard.reset();
        tracing::debug!("Reset all stores");
    }

    // ==================== Validated mutations ====================

    /// Validates and books an appointment.
    pub async fn book_appointment(&self, payload: &NewAppointment) -> Result<Appointment> {
        validation::check(payload).map_err(Error::Validation)?;
        Ok(self.appointments.create(payload).await?)
    }

    /// Validates and books an accommodation.
    pub async fn book_accommodation(&self, payload: &NewAccommodation) -> Result<Accommodation> {
        validation::check(payload).map_err(Error::Validation)?;
        Ok(self.accommodations.create(payload).await?)
    }

    /// Validates and submits a transportation request.
    pub async fn request_transportation(
        &self,
        payload: &NewTransportationRequest,
    ) -> Result<TransportationRequest> {
        validation::check(payload).map_err(Error::Validation)?;
        Ok(self.transportation.create(payload).await?)
    }

    /// Validates and submits feedback.
    pub async fn submit_feedback(&self, payload: &NewFeedback) -> Result<Feedback> {
        validation::check(payload).map_err(Error::Validation)?;
        Ok(self.feedback.create(payload).await?)
    }
}
