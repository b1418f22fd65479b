//! Transportation request endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{
    NewTransportationRequest, TransportationFilter, TransportationRequest, TransportationUpdate,
};

use crate::error::ApiResult;
use crate::resource::{CancelApi, ReadApi, WriteApi};
use crate::ApiClient;

const PATH: &str = "/transportation";

/// `/transportation` resource.
#[derive(Debug, Clone)]
pub struct TransportationApi {
    client: ApiClient,
}

impl TransportationApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for TransportationApi {
    type Entity = TransportationRequest;
    type Filter = TransportationFilter;

    const NAME: &'static str = "transportation requests";
    const ITEM: &'static str = "transportation request";

    async fn list(&self, filter: &TransportationFilter) -> ApiResult<Vec<TransportationRequest>> {
        self.client.get_json_with_query(PATH, filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<TransportationRequest> {
        self.client.get_json(&format!("{PATH}/{id}")).await
    }
}

#[async_trait]
impl WriteApi for TransportationApi {
    type Create = NewTransportationRequest;
    type Update = TransportationUpdate;

    async fn create(&self, payload: &NewTransportationRequest) -> ApiResult<TransportationRequest> {
        self.client.post_json(PATH, payload).await
    }

    async fn update(
        &self,
        id: u64,
        payload: &TransportationUpdate,
    ) -> ApiResult<TransportationRequest> {
        self.client.put_json(&format!("{PATH}/{id}"), payload).await
    }
}

#[async_trait]
impl CancelApi for TransportationApi {
    async fn cancel(&self, id: u64) -> ApiResult<()> {
        self.client
            .send_empty(Method::POST, &format!("{PATH}/{id}/cancel"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_returns_bare_entity() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transportation"))
            .and(body_partial_json(serde_json::json!({
                "appointment_id": 12,
                "passengers": 2
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 31,
                "appointment_id": 12,
                "pickup_address": "12 Harbour Road",
                "pickup_time": "2026-03-02T07:45:00Z",
                "passengers": 2,
                "status": "pending"
            })))
            .mount(&mock_server)
            .await;

        let api = ApiClient::new(mock_server.uri()).unwrap().transportation();
        let created = api
            .create(&NewTransportationRequest {
                appointment_id: 12,
                pickup_address: "12 Harbour Road".into(),
                dropoff_address: None,
                pickup_time: Utc.with_ymd_and_hms(2026, 3, 2, 7, 45, 0).unwrap(),
                vehicle_type: None,
                passengers: 2,
                special_requirements: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 31);
        assert!(created.is_pending());
    }
}
