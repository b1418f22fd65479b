//! Resource-oriented API traits.
//!
//! Stores are generic over these traits rather than over [`crate::ApiClient`],
//! so each store only sees the operations its resource supports and tests can
//! substitute their own implementations.

use async_trait::async_trait;
use serde::Serialize;

use carestay_types::Resource;

use crate::error::ApiResult;

/// List and fetch-by-id.
#[async_trait]
pub trait ReadApi: Send + Sync {
    /// Entity returned by the endpoints.
    type Entity: Resource + std::fmt::Debug;
    /// Query parameters accepted by `list`.
    type Filter: Serialize + Default + Send + Sync;

    /// Plural resource name, used in log lines and fallback error messages.
    const NAME: &'static str;
    /// Singular resource name, used for single-entity messages.
    const ITEM: &'static str;

    /// Lists entities matching the filter.
    async fn list(&self, filter: &Self::Filter) -> ApiResult<Vec<Self::Entity>>;

    /// Fetches one entity.
    async fn get(&self, id: u64) -> ApiResult<Self::Entity>;
}

/// Create and update.
#[async_trait]
pub trait WriteApi: ReadApi {
    /// Creation payload.
    type Create: Serialize + Send + Sync;
    /// Update payload.
    type Update: Serialize + Send + Sync;

    /// Creates an entity and returns the server's copy.
    async fn create(&self, payload: &Self::Create) -> ApiResult<Self::Entity>;

    /// Updates an entity and returns the server's copy.
    async fn update(&self, id: u64, payload: &Self::Update) -> ApiResult<Self::Entity>;
}

/// Server-side cancellation. The response body is not used.
#[async_trait]
pub trait CancelApi: ReadApi {
    /// Cancels an entity.
    async fn cancel(&self, id: u64) -> ApiResult<()>;
}

/// Hard deletion.
#[async_trait]
pub trait DeleteApi: ReadApi {
    /// Deletes an entity.
    async fn delete(&self, id: u64) -> ApiResult<()>;
}
