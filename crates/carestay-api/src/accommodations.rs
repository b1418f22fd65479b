//! Accommodation (room stay) endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{Accommodation, AccommodationFilter, AccommodationUpdate, NewAccommodation};

use crate::error::ApiResult;
use crate::resource::{CancelApi, ReadApi, WriteApi};
use crate::ApiClient;

const PATH: &str = "/accommodations";

/// `/accommodations` resource.
#[derive(Debug, Clone)]
pub struct AccommodationsApi {
    client: ApiClient,
}

impl AccommodationsApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for AccommodationsApi {
    type Entity = Accommodation;
    type Filter = AccommodationFilter;

    const NAME: &'static str = "accommodations";
    const ITEM: &'static str = "accommodation";

    async fn list(&self, filter: &AccommodationFilter) -> ApiResult<Vec<Accommodation>> {
        self.client.get_json_with_query(PATH, filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Accommodation> {
        self.client.get_json(&format!("{PATH}/{id}")).await
    }
}

#[async_trait]
impl WriteApi for AccommodationsApi {
    type Create = NewAccommodation;
    type Update = AccommodationUpdate;

    async fn create(&self, payload: &NewAccommodation) -> ApiResult<Accommodation> {
        self.client.post_json(PATH, payload).await
    }

    async fn update(&self, id: u64, payload: &AccommodationUpdate) -> ApiResult<Accommodation> {
        self.client.put_json(&format!("{PATH}/{id}"), payload).await
    }
}

#[async_trait]
impl CancelApi for AccommodationsApi {
    async fn cancel(&self, id: u64) -> ApiResult<()> {
        self.client
            .send_empty(Method::POST, &format!("{PATH}/{id}/cancel"))
            .await
    }
}
