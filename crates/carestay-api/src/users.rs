//! User directory endpoints (admin).

use async_trait::async_trait;

use carestay_types::{User, UserFilter};

use crate::error::ApiResult;
use crate::resource::ReadApi;
use crate::ApiClient;

/// `/users` resource.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for UsersApi {
    type Entity = User;
    type Filter = UserFilter;

    const NAME: &'static str = "users";
    const ITEM: &'static str = "user";

    async fn list(&self, filter: &UserFilter) -> ApiResult<Vec<User>> {
        self.client.get_json_with_query("/users", filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<User> {
        self.client.get_json(&format!("/users/{id}")).await
    }
}
