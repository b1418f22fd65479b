//! # API Client
//!
//! HTTP client for communicating with the Carestay REST API.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::envelope;
use crate::error::{ApiError, ApiResult};
use crate::{
    AccommodationsApi, AppointmentsApi, AuthEndpoints, CentersApi, DashboardApi, FeedbackApi,
    MealOptionsApi, NotificationsApi, RoomsApi, TransportationApi, UsersApi,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the Carestay API.
///
/// The client is cheaply cloneable. Clones share the bearer token, so setting
/// it once after login authenticates every resource API built from the client.
///
/// # Examples
///
/// ```rust,ignore
/// use carestay_api::{ApiClient, ReadApi};
/// use carestay_types::AppointmentFilter;
///
/// let client = ApiClient::new("https://api.carestay.example")?;
/// client.set_token(Some(token));
///
/// let mine = client
///     .appointments()
///     .list(&AppointmentFilter::for_patient(42))
///     .await?;
/// println!("{} appointments", mine.len());
/// ```
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.has_token())
            .finish()
    }
}

impl ApiClient {
    /// Creates a client for the given base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client cannot be built.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(base_url, http))
    }

    /// Creates a client around an existing `reqwest` client.
    pub fn with_http(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the bearer token attached to every request.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    /// Current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    /// Returns true if a bearer token is set.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().is_some()
    }

    // ==================== Resource APIs ====================

    /// Authentication endpoints.
    pub fn auth(&self) -> AuthEndpoints {
        AuthEndpoints::new(self.clone())
    }

    /// Appointment endpoints.
    pub fn appointments(&self) -> AppointmentsApi {
        AppointmentsApi::new(self.clone())
    }

    /// Accommodation endpoints.
    pub fn accommodations(&self) -> AccommodationsApi {
        AccommodationsApi::new(self.clone())
    }

    /// Transportation endpoints.
    pub fn transportation(&self) -> TransportationApi {
        TransportationApi::new(self.clone())
    }

    /// Feedback endpoints.
    pub fn feedback(&self) -> FeedbackApi {
        FeedbackApi::new(self.clone())
    }

    /// Notification endpoints.
    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.clone())
    }

    /// Center endpoints.
    pub fn centers(&self) -> CentersApi {
        CentersApi::new(self.clone())
    }

    /// Room endpoints.
    pub fn rooms(&self) -> RoomsApi {
        RoomsApi::new(self.clone())
    }

    /// Meal option endpoints.
    pub fn meal_options(&self) -> MealOptionsApi {
        MealOptionsApi::new(self.clone())
    }

    /// User endpoints.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Client-side dashboard aggregation.
    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.clone())
    }

    // ==================== Requests ====================

    /// `GET path` and decode the normalized payload.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.execute(Method::GET, path, self.request(Method::GET, path)).await?;
        envelope::decode_body(&body)
    }

    /// `GET path?query` and decode the normalized payload.
    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path).query(query);
        let body = self.execute(Method::GET, path, req).await?;
        envelope::decode_body(&body)
    }

    /// `POST path` with a JSON body and decode the normalized payload.
    pub async fn post_json<T, B>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::POST, path).json(payload);
        let body = self.execute(Method::POST, path, req).await?;
        envelope::decode_body(&body)
    }

    /// `PUT path` with a JSON body and decode the normalized payload.
    pub async fn put_json<T, B>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let req = self.request(Method::PUT, path).json(payload);
        let body = self.execute(Method::PUT, path, req).await?;
        envelope::decode_body(&body)
    }

    /// Sends a body-less request, ignoring whatever the server returns on success.
    pub async fn send_empty(&self, method: Method, path: &str) -> ApiResult<()> {
        let req = self.request(method.clone(), path);
        self.execute(method, path, req).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match self.token.read().as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Sends the request and returns the body of a 2xx response.
    async fn execute(&self, method: Method, path: &str, req: RequestBuilder) -> ApiResult<String> {
        tracing::debug!(%method, path, "API request");

        let res = req.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "API request failed to send");
            ApiError::Network(e)
        })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), body);
            tracing::warn!(%method, path, status = status.as_u16(), error = %err, "API request rejected");
            return Err(err);
        }

        Ok(body)
    }
}
