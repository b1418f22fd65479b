//! Appointment endpoints.

use async_trait::async_trait;
use reqwest::Method;

use carestay_types::{Appointment, AppointmentFilter, AppointmentUpdate, NewAppointment};

use crate::error::ApiResult;
use crate::resource::{CancelApi, ReadApi, WriteApi};
use crate::ApiClient;

const PATH: &str = "/appointments";

/// `/appointments` resource.
#[derive(Debug, Clone)]
pub struct AppointmentsApi {
    client: ApiClient,
}

impl AppointmentsApi {
    /// Creates the resource API on top of a shared client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReadApi for AppointmentsApi {
    type Entity = Appointment;
    type Filter = AppointmentFilter;

    const NAME: &'static str = "appointments";
    const ITEM: &'static str = "appointment";

    async fn list(&self, filter: &AppointmentFilter) -> ApiResult<Vec<Appointment>> {
        self.client.get_json_with_query(PATH, filter).await
    }

    async fn get(&self, id: u64) -> ApiResult<Appointment> {
        self.client.get_json(&format!("{PATH}/{id}")).await
    }
}

#[async_trait]
impl WriteApi for AppointmentsApi {
    type Create = NewAppointment;
    type Update = AppointmentUpdate;

    async fn create(&self, payload: &NewAppointment) -> ApiResult<Appointment> {
        self.client.post_json(PATH, payload).await
    }

    async fn update(&self, id: u64, payload: &AppointmentUpdate) -> ApiResult<Appointment> {
        self.client.put_json(&format!("{PATH}/{id}"), payload).await
    }
}

#[async_trait]
impl CancelApi for AppointmentsApi {
    async fn cancel(&self, id: u64) -> ApiResult<()> {
        self.client
            .send_empty(Method::POST, &format!("{PATH}/{id}/cancel"))
            .await
    }
}
