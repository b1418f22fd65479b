//! Notification endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{Notification, NotificationFilter};

use crate::error::ApiResult;
use crate::resource::{DeleteApi, ReadApi};
use crate::ApiClient;

const PATH: &str = "/notifications";

/// Read-state operations on notifications.
#[async_trait]
pub trait MarkReadApi: ReadApi<Entity = Notification> {
    /// Marks one notification read and returns the server's copy.
    async fn mark_read(&self, id: u64) -> ApiResult<Notification>;

    /// Marks every notification of the current user read.
    async fn mark_all_read(&self) -> ApiResult<()>;
}

/// `/notifications` resource, scoped server-side to the authenticated user.
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    client: ApiClient,
}

impl NotificationsApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for NotificationsApi {
    type Entity = Notification;
    type Filter = NotificationFilter;

    const NAME: &'static str = "notifications";
    const ITEM: &'static str = "notification";

    async fn list(&self, filter: &NotificationFilter) -> ApiResult<Vec<Notification>> {
        self.client.get_json_with_query(PATH, filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Notification> {
        self.client.get_json(&format!("{PATH}/{id}")).await
    }
}

#[async_trait]
impl MarkReadApi for NotificationsApi {
    async fn mark_read(&self, id: u64) -> ApiResult<Notification> {
        self.client
            .put_json(&format!("{PATH}/{id}/read"), &serde_json::json!({}))
            .await
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        self.client
            .send_empty(Method::PUT, &format!("{PATH}/read-all"))
            .await
    }
}

#[async_trait]
impl DeleteApi for NotificationsApi {
    async fn delete(&self, id: u64) -> ApiResult<()> {
        self.client
            .send_empty(Method::DELETE, &format!("{PATH}/{id}"))
            .await
    }
}
