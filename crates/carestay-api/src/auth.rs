//! Authentication endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{AuthSession, LoginRequest, RegisterRequest, User};

use crate::error::ApiResult;
use crate::ApiClient;

/// Authentication operations used by the auth store.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a session.
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthSession>;

    /// Creates an account and returns its session.
    async fn register(&self, payload: &RegisterRequest) -> ApiResult<AuthSession>;

    /// Invalidates the current token server-side.
    async fn logout(&self) -> ApiResult<()>;

    /// Fetches the authenticated user.
    async fn current_user(&self) -> ApiResult<User>;

    /// Sets or clears the bearer token used by subsequent requests.
    fn set_token(&self, token: Option<String>);
}

/// `/auth` endpoints.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    client: ApiClient,
}

impl AuthEndpoints {
    /// Creates the auth API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for AuthEndpoints {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthSession> {
        self.client.post_json("/auth/login", credentials).await
    }

    async fn register(&self, payload: &RegisterRequest) -> ApiResult<AuthSession> {
        self.client.post_json("/auth/register", payload).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.client.send_empty(Method::POST, "/auth/logout").await
    }

    async fn current_user(&self) -> ApiResult<User> {
        self.client.get_json("/auth/me").await
    }

    fn set_token(&self, token: Option<String>) {
        self.client.set_token(token);
    }
}
