//! Read-only catalog endpoints: centers, rooms, and meal options.

use async_trait::async_trait;

use carestay_types::{Center, CenterFilter, MealOption, MealOptionFilter, Room, RoomFilter};

use crate::error::ApiResult;
use crate::resource::ReadApi;
use crate::ApiClient;

/// `/centers` resource.
#[derive(Debug, Clone)]
pub struct CentersApi {
    client: ApiClient,
}

impl CentersApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for CentersApi {
    type Entity = Center;
    type Filter = CenterFilter;

    const NAME: &'static str = "centers";
    const ITEM: &'static str = "center";

    async fn list(&self, filter: &CenterFilter) -> ApiResult<Vec<Center>> {
        self.client.get_json_with_query("/centers", filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Center> {
        self.client.get_json(&format!("/centers/{id}")).await
    }
}

/// `/rooms` resource.
#[derive(Debug, Clone)]
pub struct RoomsApi {
    client: ApiClient,
}

impl RoomsApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for RoomsApi {
    type Entity = Room;
    type Filter = RoomFilter;

    const NAME: &'static str = "rooms";
    const ITEM: &'static str = "room";

    async fn list(&self, filter: &RoomFilter) -> ApiResult<Vec<Room>> {
        self.client.get_json_with_query("/rooms", filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Room> {
        self.client.get_json(&format!("/rooms/{id}")).await
    }
}

/// `/meal-options` resource.
#[derive(Debug, Clone)]
pub struct MealOptionsApi {
    client: ApiClient,
}

impl MealOptionsApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for MealOptionsApi {
    type Entity = MealOption;
    type Filter = MealOptionFilter;

    const NAME: &'static str = "meal options";
    const ITEM: &'static str = "meal option";

    async fn list(&self, _filter: &MealOptionFilter) -> ApiResult<Vec<MealOption>> {
        self.client.get_json("/meal-options").await
    }

    async fn get(&self, id: u64) -> ApiResult<MealOption> {
        self.client.get_json(&format!("/meal-options/{id}")).await
    }
}
