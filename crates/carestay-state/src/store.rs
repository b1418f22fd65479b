//! # Resource Stores
//!
//! A [`ResourceStore`] mirrors one server collection in memory: the last
//! fetched list, the last fetched single entity, a loading flag and the last
//! error message. Which operations a store offers follows from the API traits
//! its endpoint implements.
//!
//! Read operations record failures in the state and return nothing. Mutations
//! record the failure and also hand the [`ApiError`] back to the caller.
//!
//! Concurrent calls are not de-duplicated; the last response to arrive wins.

use parking_lot::RwLock;

use carestay_api::{ApiError, ApiResult, CancelApi, DeleteApi, ReadApi, WriteApi};
use carestay_types::{Cancellable, Resource};

/// Snapshot of a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<E> {
    /// Last fetched list, plus local mutations since.
    pub items: Vec<E>,
    /// Last entity fetched by id.
    pub selected: Option<E>,
    /// True while a request started by this store is in flight.
    pub is_loading: bool,
    /// Message describing the last failure.
    pub error: Option<String>,
}

impl<E> Default for StoreState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            is_loading: false,
            error: None,
        }
    }
}

#[derive(Clone, Copy)]
enum Action {
    FetchList,
    FetchOne,
    Create,
    Update,
    Cancel,
    Delete,
}

impl Action {
    fn fallback_message<A: ReadApi>(self) -> String {
        match self {
            Action::FetchList => format!("Failed to fetch {}", A::NAME),
            Action::FetchOne => format!("Failed to fetch {}", A::ITEM),
            Action::Create => format!("Failed to create {}", A::ITEM),
            Action::Update => format!("Failed to update {}", A::ITEM),
            Action::Cancel => format!("Failed to cancel {}", A::ITEM),
            Action::Delete => format!("Failed to delete {}", A::ITEM),
        }
    }
}

/// In-memory mirror of one server collection.
pub struct ResourceStore<A: ReadApi> {
    api: A,
    state: RwLock<StoreState<A::Entity>>,
}

impl<A: ReadApi> std::fmt::Debug for ResourceStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("ResourceStore")
            .field("resource", &A::NAME)
            .field("items", &state.items.len())
            .field("is_loading", &state.is_loading)
            .field("error", &state.error)
            .finish()
    }
}

impl<A: ReadApi> ResourceStore<A> {
    /// Creates an empty store over an endpoint.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// The underlying endpoint.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> StoreState<A::Entity> {
        self.state.read().clone()
    }

    /// Current items.
    pub fn items(&self) -> Vec<A::Entity> {
        self.state.read().items.clone()
    }

    /// Currently selected entity.
    pub fn selected(&self) -> Option<A::Entity> {
        self.state.read().selected.clone()
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Last error message.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Replaces `items` with the server's list.
    pub async fn fetch_list(&self, filter: &A::Filter) {
        self.begin();
        match self.api.list(filter).await {
            Ok(items) => {
                tracing::debug!(resource = A::NAME, count = items.len(), "Fetched list");
                let mut state = self.state.write();
                state.items = items;
                state.is_loading = false;
            }
            Err(e) => self.fail(Action::FetchList, &e),
        }
    }

    /// Loads one entity into `selected`.
    pub async fn fetch_by_id(&self, id: u64) {
        self.begin();
        match self.api.get(id).await {
            Ok(entity) => {
                let mut state = self.state.write();
                state.selected = Some(entity);
                state.is_loading = false;
            }
            Err(e) => self.fail(Action::FetchOne, &e),
        }
    }

    /// Clears the error message.
    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    /// Drops all cached state.
    pub fn reset(&self) {
        *self.state.write() = StoreState::default();
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.is_loading = true;
        state.error = None;
    }

    fn fail(&self, action: Action, err: &ApiError) {
        self.record_failure(&action.fallback_message::<A>(), err);
    }

    /// Records the server's message, or `fallback` when there is none.
    pub(crate) fn record_failure(&self, fallback: &str, err: &ApiError) {
        let message = err.user_message().unwrap_or(fallback).to_owned();
        tracing::warn!(resource = A::NAME, error = %err, "{fallback}");

        let mut state = self.state.write();
        state.error = Some(message);
        state.is_loading = false;
    }

    fn finish<T>(&self, action: Action, result: ApiResult<T>) -> ApiResult<T> {
        match result {
            Ok(value) => {
                self.state.write().is_loading = false;
                Ok(value)
            }
            Err(e) => {
                self.fail(action, &e);
                Err(e)
            }
        }
    }

    /// Applies `f` to the entity with `id` in `items` and in `selected`.
    pub(crate) fn update_local(&self, id: u64, f: impl Fn(&mut A::Entity)) {
        let mut state = self.state.write();
        state.items.iter_mut().filter(|e| e.id() == id).for_each(&f);
        if let Some(selected) = state.selected.as_mut().filter(|e| e.id() == id) {
            f(selected);
        }
    }

    pub(crate) fn modify_items(&self, f: impl FnOnce(&mut Vec<A::Entity>)) {
        f(&mut self.state.write().items);
    }
}

impl<A: WriteApi> ResourceStore<A> {
    /// Creates an entity and appends the server's copy to `items`.
    pub async fn create(&self, payload: &A::Create) -> ApiResult<A::Entity> {
        self.begin();
        let entity = self.finish(Action::Create, self.api.create(payload).await)?;
        tracing::info!(resource = A::NAME, id = entity.id(), "Created");
        self.state.write().items.push(entity.clone());
        Ok(entity)
    }

    /// Updates an entity and replaces the local copies.
    pub async fn update(&self, id: u64, payload: &A::Update) -> ApiResult<A::Entity> {
        self.begin();
        let entity = self.finish(Action::Update, self.api.update(id, payload).await)?;
        self.update_local(id, |local| *local = entity.clone());
        Ok(entity)
    }
}

impl<A> ResourceStore<A>
where
    A: CancelApi,
    A::Entity: Cancellable,
{
    /// Cancels an entity server-side and marks the local copies cancelled.
    ///
    /// The entity is not re-fetched.
    pub async fn cancel(&self, id: u64) -> ApiResult<()> {
        self.begin();
        self.finish(Action::Cancel, self.api.cancel(id).await)?;
        tracing::info!(resource = A::NAME, id, "Cancelled");
        self.update_local(id, |local| local.mark_cancelled());
        Ok(())
    }
}

impl<A: DeleteApi> ResourceStore<A> {
    /// Deletes an entity and drops the local copies.
    pub async fn delete(&self, id: u64) -> ApiResult<()> {
        self.begin();
        self.finish(Action::Delete, self.api.delete(id).await)?;
        tracing::info!(resource = A::NAME, id, "Deleted");

        let mut state = self.state.write();
        state.items.retain(|e| e.id() != id);
        if state.selected.as_ref().is_some_and(|e| e.id() == id) {
            state.selected = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq)]
    struct Ticket {
        id: u64,
        title: String,
        cancelled: bool,
    }

    impl Resource for Ticket {
        fn id(&self) -> u64 {
            self.id
        }
    }

    impl Cancellable for Ticket {
        fn mark_cancelled(&mut self) {
            self.cancelled = true;
        }

        fn is_cancelled(&self) -> bool {
            self.cancelled
        }
    }

    #[derive(Debug, Default, Serialize)]
    struct NoFilter {}

    fn ticket(id: u64, title: &str) -> Ticket {
        Ticket {
            id,
            title: title.into(),
            cancelled: false,
        }
    }

    /// Serves canned responses; `None` means "fail".
    #[derive(Default)]
    struct FakeApi {
        list: Mutex<Option<Vec<Ticket>>>,
        fail_with: Mutex<Option<u16>>,
    }

    impl FakeApi {
        fn result<T>(&self, value: T) -> ApiResult<T> {
            match *self.fail_with.lock() {
                Some(status) => Err(ApiError::from_response(status, "")),
                None => Ok(value),
            }
        }
    }

    #[async_trait]
    impl ReadApi for FakeApi {
        type Entity = Ticket;
        type Filter = NoFilter;

        const NAME: &'static str = "tickets";
        const ITEM: &'static str = "ticket";

        async fn list(&self, _filter: &NoFilter) -> ApiResult<Vec<Ticket>> {
            self.result(self.list.lock().clone().unwrap_or_default())
        }

        async fn get(&self, id: u64) -> ApiResult<Ticket> {
            self.result(ticket(id, "fetched"))
        }
    }

    #[async_trait]
    impl WriteApi for FakeApi {
        type Create = String;
        type Update = String;

        async fn create(&self, title: &String) -> ApiResult<Ticket> {
            self.result(ticket(99, title))
        }

        async fn update(&self, id: u64, title: &String) -> ApiResult<Ticket> {
            self.result(ticket(id, title))
        }
    }

    #[async_trait]
    impl CancelApi for FakeApi {
        async fn cancel(&self, _id: u64) -> ApiResult<()> {
            self.result(())
        }
    }

    #[async_trait]
    impl DeleteApi for FakeApi {
        async fn delete(&self, _id: u64) -> ApiResult<()> {
            self.result(())
        }
    }

    fn store_with(items: Vec<Ticket>) -> ResourceStore<FakeApi> {
        let api = FakeApi::default();
        *api.list.lock() = Some(items);
        ResourceStore::new(api)
    }

    #[tokio::test]
    async fn test_fetch_list_replaces_items() {
        let store = store_with(vec![ticket(1, "a"), ticket(2, "b")]);
        store.fetch_list(&NoFilter {}).await;
        store.fetch_list(&NoFilter {}).await;

        let state = store.snapshot();
        assert_eq!(state.items, vec![ticket(1, "a"), ticket(2, "b")]);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_records_fallback_message() {
        let store = store_with(vec![]);
        *store.api().fail_with.lock() = Some(500);

        store.fetch_list(&NoFilter {}).await;
        assert_eq!(store.error().as_deref(), Some("Failed to fetch tickets"));
        assert!(!store.is_loading());

        store.fetch_by_id(4).await;
        assert_eq!(store.error().as_deref(), Some("Failed to fetch ticket"));

        store.clear_error();
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_create_appends_once() {
        let store = store_with(vec![ticket(1, "a")]);
        store.fetch_list(&NoFilter {}).await;

        let created = store.create(&"new".to_string()).await.unwrap();
        let items = store.items();
        assert_eq!(items.last(), Some(&created));
        assert_eq!(items.iter().filter(|t| t.id == 99).count(), 1);
    }

    #[tokio::test]
    async fn test_create_failure_returns_error() {
        let store = store_with(vec![]);
        *store.api().fail_with.lock() = Some(422);

        let err = store.create(&"x".to_string()).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
        assert_eq!(store.error().as_deref(), Some("Failed to create ticket"));
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_item_and_selected() {
        let store = store_with(vec![ticket(1, "a"), ticket(2, "b")]);
        store.fetch_list(&NoFilter {}).await;
        store.fetch_by_id(2).await;

        store.update(2, &"renamed".to_string()).await.unwrap();
        assert_eq!(store.items()[1].title, "renamed");
        assert_eq!(store.selected().map(|t| t.title), Some("renamed".to_string()));
        assert_eq!(store.items()[0].title, "a");
    }

    #[tokio::test]
    async fn test_cancel_only_touches_target() {
        let store = store_with(vec![ticket(1, "a"), ticket(2, "b"), ticket(3, "c")]);
        store.fetch_list(&NoFilter {}).await;

        store.cancel(2).await.unwrap();
        let flags: Vec<bool> = store.items().iter().map(|t| t.cancelled).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[tokio::test]
    async fn test_delete_removes_item_and_selection() {
        let store = store_with(vec![ticket(1, "a"), ticket(2, "b")]);
        store.fetch_list(&NoFilter {}).await;
        store.fetch_by_id(1).await;

        store.delete(1).await.unwrap();
        assert_eq!(store.items(), vec![ticket(2, "b")]);
        assert!(store.selected().is_none());
    }

    #[tokio::test]
    async fn test_reset_drops_everything() {
        let store = store_with(vec![ticket(1, "a")]);
        store.fetch_list(&NoFilter {}).await;
        store.fetch_by_id(1).await;

        store.reset();
        assert_eq!(store.snapshot(), StoreState::default());
    }
}
