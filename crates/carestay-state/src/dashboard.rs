//! Dashboard store: the last computed figures for the signed-in role.

use parking_lot::RwLock;

use carestay_api::{AdminStats, ApiError, DashboardSource, PatientStats, ProviderStats};
use carestay_types::{Role, User};

/// Snapshot of the dashboard store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Last admin figures.
    pub admin: Option<AdminStats>,
    /// Last provider figures.
    pub provider: Option<ProviderStats>,
    /// Last patient figures.
    pub patient: Option<PatientStats>,
    /// True while figures are being computed.
    pub is_loading: bool,
    /// Message describing the last failure.
    pub error: Option<String>,
}

/// Holds dashboard figures. Every load refetches and recomputes.
pub struct DashboardStore<D: DashboardSource> {
    source: D,
    state: RwLock<DashboardState>,
}

impl<D: DashboardSource> std::fmt::Debug for DashboardStore<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardStore")
            .field("state", &*self.state.read())
            .finish()
    }
}

impl<D: DashboardSource> DashboardStore<D> {
    /// Creates an empty store.
    pub fn new(source: D) -> Self {
        Self {
            source,
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.state.read().clone()
    }

    /// Loads the figures matching `user`'s role.
    pub async fn load_for(&self, user: &User) {
        match user.role {
            Role::Admin => self.load_admin().await,
            Role::Provider => self.load_provider(user.id).await,
            Role::Patient => self.load_patient(user.id).await,
        }
    }

    /// Loads facility-wide figures.
    pub async fn load_admin(&self) {
        self.begin();
        match self.source.admin_stats().await {
            Ok(stats) => self.finish(|s| s.admin = Some(stats)),
            Err(e) => self.fail("Failed to load dashboard statistics", &e),
        }
    }

    /// Loads figures for one provider.
    pub async fn load_provider(&self, provider_id: u64) {
        self.begin();
        match self.source.provider_stats(provider_id).await {
            Ok(stats) => self.finish(|s| s.provider = Some(stats)),
            Err(e) => self.fail("Failed to load provider statistics", &e),
        }
    }

    /// Loads figures for one patient.
    pub async fn load_patient(&self, patient_id: u64) {
        self.begin();
        match self.source.patient_stats(patient_id).await {
            Ok(stats) => self.finish(|s| s.patient = Some(stats)),
            Err(e) => self.fail("Failed to load patient statistics", &e),
        }
    }

    /// Clears the error message.
    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    /// Drops all figures.
    pub fn reset(&self) {
        *self.state.write() = DashboardState::default();
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.is_loading = true;
        state.error = None;
    }

    fn finish(&self, apply: impl FnOnce(&mut DashboardState)) {
        let mut state = self.state.write();
        apply(&mut state);
        state.is_loading = false;
    }

    fn fail(&self, fallback: &str, err: &ApiError) {
        tracing::warn!(error = %err, "{fallback}");
        let mut state = self.state.write();
        state.error = Some(err.user_message().unwrap_or(fallback).to_string());
        state.is_loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carestay_api::ApiResult;
    use pretty_assertions::assert_eq;

    struct Fixed {
        fail: bool,
    }

    #[async_trait]
    impl DashboardSource for Fixed {
        async fn admin_stats(&self) -> ApiResult<AdminStats> {
            if self.fail {
                return Err(ApiError::from_response(500, ""));
            }
            Ok(AdminStats {
                total_centers: 2,
                ..AdminStats::default()
            })
        }

        async fn provider_stats(&self, _provider_id: u64) -> ApiResult<ProviderStats> {
            Ok(ProviderStats {
                today_appointments: 3,
                upcoming_appointments: 2,
                ..ProviderStats::default()
            })
        }

        async fn patient_stats(&self, _patient_id: u64) -> ApiResult<PatientStats> {
            Err(ApiError::from_response(403, r#"{"error":"Forbidden"}"#))
        }
    }

    fn user(role: Role) -> User {
        User {
            id: 8,
            name: "Sam".into(),
            email: "sam@example.com".into(),
            role,
            phone: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_load_for_dispatches_on_role() {
        let store = DashboardStore::new(Fixed { fail: false });

        store.load_for(&user(Role::Provider)).await;
        let state = store.snapshot();
        assert_eq!(state.provider.as_ref().map(|p| p.today_appointments), Some(3));
        assert!(state.admin.is_none());

        store.load_for(&user(Role::Admin)).await;
        assert_eq!(store.snapshot().admin.map(|a| a.total_centers), Some(2));
    }

    #[tokio::test]
    async fn test_failures_are_recorded() {
        let store = DashboardStore::new(Fixed { fail: true });

        store.load_admin().await;
        assert_eq!(
            store.snapshot().error.as_deref(),
            Some("Failed to load dashboard statistics")
        );

        store.load_for(&user(Role::Patient)).await;
        let state = store.snapshot();
        assert_eq!(state.error.as_deref(), Some("Forbidden"));
        assert!(!state.is_loading);

        store.reset();
        assert_eq!(store.snapshot(), DashboardState::default());
    }
}
