//! Feedback endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{Feedback, FeedbackFilter, FeedbackUpdate, NewFeedback};

use crate::error::ApiResult;
use crate::resource::{DeleteApi, ReadApi, WriteApi};
use crate::ApiClient;

const PATH: &str = "/feedback";

/// `/feedback` resource.
#[derive(Debug, Clone)]
pub struct FeedbackApi {
    client: ApiClient,
}

impl FeedbackApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for FeedbackApi {
    type Entity = Feedback;
    type Filter = FeedbackFilter;

    const NAME: &'static str = "feedback";
    const ITEM: &'static str = "feedback";

    async fn list(&self, filter: &FeedbackFilter) -> ApiResult<Vec<Feedback>> {
        self.client.get_json_with_query(PATH, filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Feedback> {
        self.client.get_json(&format!("{PATH}/{id}")).await
    }
}

#[async_trait]
impl WriteApi for FeedbackApi {
    type Create = NewFeedback;
    type Update = FeedbackUpdate;

    async fn create(&self, payload: &NewFeedback) -> ApiResult<Feedback> {
        self.client.post_json(PATH, payload).await
    }

    async fn update(&self, id: u64, payload: &FeedbackUpdate) -> ApiResult<Feedback> {
        self.client.put_json(&format!("{PATH}/{id}"), payload).await
    }
}

#[async_trait]
impl DeleteApi for FeedbackApi {
    async fn delete(&self, id: u64) -> ApiResult<()> {
        self.client
            .send_empty(Method::DELETE, &format!("{PATH}/{id}"))
            .await
    }
}
