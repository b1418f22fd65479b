//! Read-state operations on the notification store.

use carestay_api::{ApiResult, MarkReadApi};

use crate::store::ResourceStore;

impl<A: MarkReadApi> ResourceStore<A> {
    /// Marks one notification read, taking the server's copy.
    pub async fn mark_read(&self, id: u64) -> ApiResult<()> {
        let updated = match self.api().mark_read(id).await {
            Ok(n) => n,
            Err(e) => {
                self.record_failure("Failed to mark notification as read", &e);
                return Err(e);
            }
        };
        self.update_local(id, |local| {
            *local = updated.clone();
            local.is_read = true;
        });
        Ok(())
    }

    /// Marks every notification read.
    pub async fn mark_all_read(&self) -> ApiResult<()> {
        if let Err(e) = self.api().mark_all_read().await {
            self.record_failure("Failed to mark notifications as read", &e);
            return Err(e);
        }
        self.modify_items(|items| items.iter_mut().for_each(|n| n.is_read = true));
        Ok(())
    }

    /// Number of unread notifications among the local items.
    pub fn unread_count(&self) -> usize {
        self.items().iter().filter(|n| !n.is_read).count()
    }
}

#[cfg(test)]
mod tests {
    use carestay_api::{ApiClient, NotificationsApi};
    use carestay_types::NotificationFilter;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn seeded(mock_server: &MockServer) -> ResourceStore<NotificationsApi> {
        Mock::given(method("GET"))
            .and(path("/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [
                { "id": 1, "user_id": 5, "title": "Reminder", "message": "Tomorrow 9:00", "is_read": false },
                { "id": 2, "user_id": 5, "title": "Ride booked", "message": "Pickup 8:15", "is_read": false },
                { "id": 3, "user_id": 5, "title": "Welcome", "message": "Hi", "is_read": true }
            ]})))
            .mount(mock_server)
            .await;

        let store = ResourceStore::new(ApiClient::new(mock_server.uri()).unwrap().notifications());
        store.fetch_list(&NotificationFilter::default()).await;
        store
    }

    #[tokio::test]
    async fn test_mark_read_updates_one() {
        let mock_server = MockServer::start().await;
        let store = seeded(&mock_server).await;
        assert_eq!(store.unread_count(), 2);

        Mock::given(method("PUT"))
            .and(path("/notifications/1/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "id": 1, "user_id": 5, "title": "Reminder", "message": "Tomorrow 9:00", "is_read": true }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        store.mark_read(1).await.unwrap();
        assert_eq!(store.unread_count(), 1);
        assert!(store.items()[0].is_read);
        assert!(!store.items()[1].is_read);
    }

    #[tokio::test]
    async fn test_mark_all_read() {
        let mock_server = MockServer::start().await;
        let store = seeded(&mock_server).await;

        Mock::given(method("PUT"))
            .and(path("/notifications/read-all"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        store.mark_all_read().await.unwrap();
        assert_eq!(store.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_mark_read_failure_keeps_state() {
        let mock_server = MockServer::start().await;
        let store = seeded(&mock_server).await;

        Mock::given(method("PUT"))
            .and(path("/notifications/2/read"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        assert!(store.mark_read(2).await.is_err());
        assert_eq!(
            store.error().as_deref(),
            Some("Failed to mark notification as read")
        );
        assert_eq!(store.unread_count(), 2);
    }

    #[tokio::test]
    async fn test_delete_notification() {
        let mock_server = MockServer::start().await;
        let store = seeded(&mock_server).await;

        Mock::given(method("DELETE"))
            .and(path("/notifications/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(1)
            .mount(&mock_server)
            .await;

        store.delete(3).await.unwrap();
        let ids: Vec<u64> = store.items().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
