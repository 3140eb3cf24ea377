//! Record synchronization core.
//!
//! [`RecipeSync`] owns the authoritative in-memory ordered collection of the
//! current owner's records and mediates every mutation through a
//! [`RecipeStore`] adapter:
//!
//! - **Optimistic mutation**: `create` and `delete` change the local
//!   collection before the store call is issued, and undo that change if the
//!   call fails.
//!
//! - **Refresh reconciliation**: overlapping `refresh` calls are applied in
//!   issuance order, so a slow listing that arrives after a newer one has
//!   resolved is discarded rather than overwriting fresher state.
//!
//! - **Single-writer state**: every read-modify-write of the collection runs
//!   under one lock, which is never held across a store call. Collaborators
//!   observe the state through cloned [`SyncView`] snapshots, pushed through
//!   a watch channel on every change.
//!
//! The collection is kept sorted newest first, ties broken by id, and never
//! contains records of another owner.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::recipe::{OwnerId, Recipe, RecipeDraft, RecipeId};
use crate::store::{RecipeStore, RemoteError};

/// Read-only snapshot of the core's observable state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncView {
    /// The owner's records, newest first.
    pub records: Vec<Recipe>,

    /// True while a refresh is in flight.
    pub is_loading: bool,

    /// The most recent remote failure. Cleared by the next command that
    /// completes successfully.
    pub last_error: Option<RemoteError>,
}

/// Mutable state behind the single-writer lock.
#[derive(Debug, Default)]
struct SyncState {
    records: Vec<Recipe>,
    last_error: Option<RemoteError>,
    /// Sequence number of the most recently issued refresh.
    issued_seq: u64,
    /// Highest refresh sequence number whose outcome has been accepted.
    applied_seq: u64,
}

impl SyncState {
    fn view(&self) -> SyncView {
        SyncView {
            records: self.records.clone(),
            is_loading: self.issued_seq > self.applied_seq,
            last_error: self.last_error.clone(),
        }
    }

    /// Insert `record` at the position preserving newest-first order.
    fn sorted_insert(&mut self, record: Recipe) {
        let pos = self.records.partition_point(|existing| {
            Recipe::cmp_newest_first(existing, &record) == std::cmp::Ordering::Less
        });
        self.records.insert(pos, record);
    }
}

/// Synchronization core for one owner's recipe collection.
///
/// Construct with [`RecipeSync::new`], handing in the store adapter and the
/// identity supplied by the external identity provider. All commands take
/// `&self`; wrap the core in an [`Arc`] to drive it from several tasks.
pub struct RecipeSync {
    store: Arc<dyn RecipeStore>,
    owner: Option<OwnerId>,
    state: Mutex<SyncState>,
    views: watch::Sender<SyncView>,
}

impl std::fmt::Debug for RecipeSync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeSync")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl RecipeSync {
    /// Create a core for `owner`, mediating through `store`.
    ///
    /// `owner` is `None` when no session is active; commands that need an
    /// identity then fail with [`Error::Unauthenticated`] and the collection
    /// stays empty.
    #[must_use]
    pub fn new(store: Arc<dyn RecipeStore>, owner: Option<OwnerId>) -> Self {
        let (views, _) = watch::channel(SyncView::default());
        Self {
            store,
            owner,
            state: Mutex::new(SyncState::default()),
            views,
        }
    }

    /// The owner identity this core serves, if a session is active.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    /// The current observable state.
    #[must_use]
    pub fn view(&self) -> SyncView {
        self.views.borrow().clone()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver holds the current snapshot immediately and is notified
    /// on every subsequent change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SyncView> {
        self.views.subscribe()
    }

    fn publish(&self, state: &SyncState) {
        self.views.send_replace(state.view());
    }

    /// Reload the collection from the remote store.
    ///
    /// On success the collection is replaced wholesale with the listing,
    /// re-sorted newest first, and `last_error` is cleared. On failure the
    /// previous collection is left untouched and the failure is recorded.
    ///
    /// Overlapping refreshes resolve in issuance order: a listing belonging
    /// to an older refresh than the last accepted one is discarded without
    /// touching the collection, and its call returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] when no session is active, or
    /// [`Error::Remote`] when the adapter fails.
    pub async fn refresh(&self) -> Result<()> {
        let Some(owner) = self.owner.clone() else {
            return Err(Error::Unauthenticated);
        };

        let seq = {
            let mut state = self.state.lock().await;
            state.issued_seq += 1;
            self.publish(&state);
            state.issued_seq
        };
        debug!(owner = %owner, seq, "Refresh issued");

        let outcome = self.store.list_by_owner(&owner).await;

        let mut state = self.state.lock().await;
        if seq <= state.applied_seq {
            debug!(seq, applied = state.applied_seq, "Discarding stale refresh result");
            return Ok(());
        }
        state.applied_seq = seq;

        match outcome {
            Ok(mut records) => {
                records.retain(|record| record.owner_id == owner);
                records.sort_by(Recipe::cmp_newest_first);
                info!(owner = %owner, count = records.len(), "Refreshed records");
                state.records = records;
                state.last_error = None;
                self.publish(&state);
                Ok(())
            }
            Err(err) => {
                warn!(owner = %owner, error = %err, "Refresh failed");
                state.last_error = Some(err.clone());
                self.publish(&state);
                Err(Error::Remote(err))
            }
        }
    }

    /// Validate `draft` and persist it as a new record.
    ///
    /// The record enters the collection before the store call is issued, so
    /// the view reflects it immediately; if the put fails, the insert is
    /// undone and the failure recorded. On success the local copy is already
    /// authoritative and no re-fetch happens.
    ///
    /// The draft is normalized first: surrounding whitespace is trimmed and
    /// blank ingredient or step lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthenticated`] when no session is active, or
    /// [`Error::Validation`] when a required field normalizes to empty; both
    /// leave the collection untouched and never reach the store. Returns
    /// [`Error::Remote`] after rollback when the put fails.
    pub async fn create(&self, draft: RecipeDraft) -> Result<Recipe> {
        let Some(owner) = self.owner.clone() else {
            return Err(Error::Unauthenticated);
        };

        let draft = draft.normalized();
        if let Some(field) = draft.missing_field() {
            return Err(Error::validation(field));
        }

        let record = Recipe::new(owner, draft);
        debug!(id = %record.id, name = %record.name, "Creating record");

        {
            let mut state = self.state.lock().await;
            state.sorted_insert(record.clone());
            self.publish(&state);
        }

        match self.store.put(&record).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.last_error = None;
                self.publish(&state);
                info!(id = %record.id, "Created record");
                Ok(record)
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                state.records.retain(|existing| existing.id != record.id);
                state.last_error = Some(err.clone());
                self.publish(&state);
                warn!(id = %record.id, error = %err, "Create failed, rolled back");
                Err(Error::Remote(err))
            }
        }
    }

    /// Remove the record with `id` locally and from the remote store.
    ///
    /// The record leaves the collection before the store call is issued; if
    /// the remote delete fails, it returns at its sorted position and the
    /// failure is recorded. A record that a concurrent refresh already
    /// restored is not re-inserted, so the collection never holds an id
    /// twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when `id` is not in the collection; the
    /// store is not contacted. Returns [`Error::Remote`] after rollback when
    /// the remote delete fails.
    pub async fn delete(&self, id: RecipeId) -> Result<()> {
        let removed = {
            let mut state = self.state.lock().await;
            let Some(pos) = state.records.iter().position(|record| record.id == id) else {
                return Err(Error::not_found(id));
            };
            let removed = state.records.remove(pos);
            self.publish(&state);
            removed
        };
        debug!(id = %id, "Deleting record");

        match self.store.delete(id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.last_error = None;
                self.publish(&state);
                info!(id = %id, "Deleted record");
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.lock().await;
                // A concurrent refresh may already have restored this id;
                // the collection never holds the same id twice.
                if !state.records.iter().any(|record| record.id == removed.id) {
                    state.sorted_insert(removed);
                }
                state.last_error = Some(err.clone());
                self.publish(&state);
                warn!(id = %id, error = %err, "Delete failed, record retained");
                Err(Error::Remote(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use tokio::sync::Notify;

    use super::*;
    use crate::recipe::Category;
    use crate::store::MemoryStore;

    fn test_draft(name: &str) -> RecipeDraft {
        RecipeDraft::new(
            name.to_string(),
            Category::Dinner,
            vec!["Ingredient".to_string()],
            vec!["Step".to_string()],
        )
    }

    fn recipe_created(owner: &str, name: &str, created_at: &str) -> Recipe {
        let mut recipe = Recipe::new(OwnerId::new(owner), test_draft(name));
        recipe.created_at = created_at.parse().unwrap();
        recipe
    }

    fn sync_with(store: Arc<dyn RecipeStore>, owner: Option<&str>) -> RecipeSync {
        RecipeSync::new(store, owner.map(OwnerId::new))
    }

    /// Adapter double wrapping [`MemoryStore`] with per-operation failure
    /// switches, a delete call counter, and gates that hold an operation
    /// until released.
    #[derive(Default)]
    struct ScriptedStore {
        inner: MemoryStore,
        fail_put: AtomicBool,
        fail_list: AtomicBool,
        fail_delete: AtomicBool,
        put_gate: Option<Arc<Notify>>,
        list_gate: Option<Arc<Notify>>,
        delete_gate: Option<Arc<Notify>>,
        delete_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RecipeStore for ScriptedStore {
        async fn put(&self, record: &Recipe) -> crate::store::Result<()> {
            if let Some(gate) = &self.put_gate {
                gate.notified().await;
            }
            if self.fail_put.load(Ordering::SeqCst) {
                return Err(RemoteError::Network("injected put failure".to_string()));
            }
            self.inner.put(record).await
        }

        async fn list_by_owner(&self, owner: &OwnerId) -> crate::store::Result<Vec<Recipe>> {
            if let Some(gate) = &self.list_gate {
                gate.notified().await;
            }
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(RemoteError::Timeout("injected list failure".to_string()));
            }
            self.inner.list_by_owner(owner).await
        }

        async fn delete(&self, id: RecipeId) -> crate::store::Result<()> {
            if let Some(gate) = &self.delete_gate {
                gate.notified().await;
            }
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(RemoteError::Unknown("injected delete failure".to_string()));
            }
            self.inner.delete(id).await
        }
    }

    /// Adapter double whose two listings resolve on separate signals, for
    /// driving completion-order races.
    struct RacingStore {
        calls: AtomicUsize,
        first_release: Arc<Notify>,
        second_release: Arc<Notify>,
        first_result: Vec<Recipe>,
        second_result: Vec<Recipe>,
    }

    #[async_trait::async_trait]
    impl RecipeStore for RacingStore {
        async fn put(&self, _record: &Recipe) -> crate::store::Result<()> {
            Ok(())
        }

        async fn list_by_owner(&self, _owner: &OwnerId) -> crate::store::Result<Vec<Recipe>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.first_release.notified().await;
                Ok(self.first_result.clone())
            } else {
                self.second_release.notified().await;
                Ok(self.second_result.clone())
            }
        }

        async fn delete(&self, _id: RecipeId) -> crate::store::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_create_persists_and_fronts_record() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store.clone(), Some("u1"));

        let created = sync.create(test_draft("Stew")).await.unwrap();

        assert_eq!(sync.owner().map(OwnerId::as_str), Some("u1"));
        let view = sync.view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].id, created.id);
        assert_eq!(view.records[0].name, "Stew");
        assert!(view.last_error.is_none());
        assert!(store.contains(created.id).await);
    }

    #[tokio::test]
    async fn test_create_inserts_new_record_at_front() {
        let store = Arc::new(ScriptedStore::default());
        store
            .inner
            .put(&recipe_created("u1", "Oldest", "2020-05-01T12:00:00Z"))
            .await
            .unwrap();
        let sync = sync_with(store, Some("u1"));
        sync.refresh().await.unwrap();

        sync.create(test_draft("Fresh")).await.unwrap();

        let view = sync.view();
        assert_eq!(view.records.len(), 2);
        assert_eq!(view.records[0].name, "Fresh");
        assert_eq!(view.records[1].name, "Oldest");
    }

    #[tokio::test]
    async fn test_create_normalizes_draft() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store, Some("u1"));

        let draft = RecipeDraft::new(
            "  Pancakes  ".to_string(),
            Category::Breakfast,
            vec!["Flour".to_string(), "   ".to_string()],
            vec!["Mix".to_string(), String::new()],
        );
        let created = sync.create(draft).await.unwrap();

        assert_eq!(created.name, "Pancakes");
        assert_eq!(created.ingredients, vec!["Flour".to_string()]);
        assert_eq!(created.steps, vec!["Mix".to_string()]);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_draft() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store.clone(), Some("u1"));

        let mut draft = test_draft("Stew");
        draft.ingredients = vec!["   ".to_string()];
        let err = sync.create(draft).await.unwrap_err();

        assert!(err.is_validation());
        let view = sync.view();
        assert!(view.records.is_empty());
        assert!(view.last_error.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_without_session_is_refused() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store.clone(), None);

        let err = sync.create(test_draft("Stew")).await.unwrap_err();

        assert!(err.is_unauthenticated());
        assert!(sync.owner().is_none());
        assert!(sync.view().records.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_create_rolls_back() {
        let store = Arc::new(ScriptedStore::default());
        store.fail_put.store(true, Ordering::SeqCst);
        let sync = sync_with(store.clone(), Some("u1"));

        let err = sync.create(test_draft("Stew")).await.unwrap_err();

        assert!(err.is_remote());
        let view = sync.view();
        assert!(view.records.is_empty());
        assert_eq!(
            view.last_error,
            Some(RemoteError::Network("injected put failure".to_string()))
        );
        assert!(store.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_is_visible_before_put_resolves() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(ScriptedStore {
            put_gate: Some(gate.clone()),
            ..ScriptedStore::default()
        });
        let sync = Arc::new(sync_with(store, Some("u1")));

        let task = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.create(test_draft("Stew")).await }
        });

        let mut views = sync.subscribe();
        while sync.view().records.is_empty() {
            views.changed().await.unwrap();
        }
        assert_eq!(sync.view().records[0].name, "Stew");

        gate.notify_one();
        let created = task.await.unwrap().unwrap();
        assert_eq!(sync.view().records[0].id, created.id);
    }

    #[tokio::test]
    async fn test_refresh_sorts_newest_first() {
        let store = Arc::new(ScriptedStore::default());
        for recipe in [
            recipe_created("u1", "T3", "2026-03-03T12:00:00Z"),
            recipe_created("u1", "T1", "2026-03-01T12:00:00Z"),
            recipe_created("u1", "T2", "2026-03-02T12:00:00Z"),
        ] {
            store.inner.put(&recipe).await.unwrap();
        }
        let sync = sync_with(store, Some("u1"));

        sync.refresh().await.unwrap();

        let names: Vec<String> = sync
            .view()
            .records
            .iter()
            .map(|record| record.name.clone())
            .collect();
        assert_eq!(names, ["T3", "T2", "T1"]);
    }

    #[tokio::test]
    async fn test_refresh_excludes_other_owners() {
        let store = Arc::new(ScriptedStore::default());
        store
            .inner
            .put(&recipe_created("u1", "Mine", "2026-03-01T12:00:00Z"))
            .await
            .unwrap();
        store
            .inner
            .put(&recipe_created("u2", "Theirs", "2026-03-02T12:00:00Z"))
            .await
            .unwrap();
        let sync = sync_with(store, Some("u1"));

        sync.refresh().await.unwrap();

        let view = sync.view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].name, "Mine");
    }

    #[tokio::test]
    async fn test_refresh_without_session_is_refused() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store, None);

        let err = sync.refresh().await.unwrap_err();
        assert!(err.is_unauthenticated());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_records() {
        let store = Arc::new(ScriptedStore::default());
        store
            .inner
            .put(&recipe_created("u1", "Kept", "2026-03-01T12:00:00Z"))
            .await
            .unwrap();
        let sync = sync_with(store.clone(), Some("u1"));
        sync.refresh().await.unwrap();

        store.fail_list.store(true, Ordering::SeqCst);
        let err = sync.refresh().await.unwrap_err();

        assert!(err.is_remote());
        let view = sync.view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].name, "Kept");
        assert_eq!(
            view.last_error,
            Some(RemoteError::Timeout("injected list failure".to_string()))
        );
        assert!(!view.is_loading);
    }

    #[tokio::test]
    async fn test_is_loading_during_refresh() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(ScriptedStore {
            list_gate: Some(gate.clone()),
            ..ScriptedStore::default()
        });
        let sync = Arc::new(sync_with(store, Some("u1")));
        assert!(!sync.view().is_loading);

        let task = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.refresh().await }
        });

        let mut views = sync.subscribe();
        while !sync.view().is_loading {
            views.changed().await.unwrap();
        }

        gate.notify_one();
        task.await.unwrap().unwrap();
        assert!(!sync.view().is_loading);
    }

    #[tokio::test]
    async fn test_stale_refresh_result_is_discarded() {
        let first_release = Arc::new(Notify::new());
        let second_release = Arc::new(Notify::new());
        let store = Arc::new(RacingStore {
            calls: AtomicUsize::new(0),
            first_release: first_release.clone(),
            second_release: second_release.clone(),
            first_result: vec![recipe_created("u1", "Stale listing", "2026-03-01T12:00:00Z")],
            second_result: vec![recipe_created("u1", "Fresh listing", "2026-03-02T12:00:00Z")],
        });
        let sync = Arc::new(sync_with(store.clone(), Some("u1")));

        let first = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.refresh().await }
        });
        while store.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.refresh().await }
        });
        while store.calls.load(Ordering::SeqCst) == 1 {
            tokio::task::yield_now().await;
        }

        // Resolve the second refresh first, then let the stale one land.
        second_release.notify_one();
        second.await.unwrap().unwrap();
        first_release.notify_one();
        first.await.unwrap().unwrap();

        let view = sync.view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].name, "Fresh listing");
        assert!(!view.is_loading);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store.clone(), Some("u1"));
        let created = sync.create(test_draft("Stew")).await.unwrap();

        sync.delete(created.id).await.unwrap();

        assert!(sync.view().records.is_empty());
        assert!(!store.contains(created.id).await);
    }

    #[tokio::test]
    async fn test_delete_removes_before_remote_resolves() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(ScriptedStore {
            delete_gate: Some(gate.clone()),
            ..ScriptedStore::default()
        });
        let recipe = recipe_created("u1", "Stew", "2026-03-01T12:00:00Z");
        store.inner.put(&recipe).await.unwrap();
        let sync = Arc::new(sync_with(store, Some("u1")));
        sync.refresh().await.unwrap();

        let task = tokio::spawn({
            let sync = Arc::clone(&sync);
            let id = recipe.id;
            async move { sync.delete(id).await }
        });

        let mut views = sync.subscribe();
        while !sync.view().records.is_empty() {
            views.changed().await.unwrap();
        }

        gate.notify_one();
        task.await.unwrap().unwrap();
        assert!(sync.view().records.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_id_skips_remote() {
        let store = Arc::new(ScriptedStore::default());
        let sync = sync_with(store.clone(), Some("u1"));

        let err = sync.delete(RecipeId::new()).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.delete_calls.load(Ordering::SeqCst), 0);
        assert!(sync.view().last_error.is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_restores_record_at_position() {
        let store = Arc::new(ScriptedStore::default());
        let middle = recipe_created("u1", "Middle", "2026-03-02T12:00:00Z");
        for recipe in [
            recipe_created("u1", "Newest", "2026-03-03T12:00:00Z"),
            middle.clone(),
            recipe_created("u1", "Oldest", "2026-03-01T12:00:00Z"),
        ] {
            store.inner.put(&recipe).await.unwrap();
        }
        let sync = sync_with(store.clone(), Some("u1"));
        sync.refresh().await.unwrap();

        store.fail_delete.store(true, Ordering::SeqCst);
        let err = sync.delete(middle.id).await.unwrap_err();

        assert!(err.is_remote());
        let view = sync.view();
        let names: Vec<&str> = view.records.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(names, ["Newest", "Middle", "Oldest"]);
        assert_eq!(
            view.last_error,
            Some(RemoteError::Unknown("injected delete failure".to_string()))
        );
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_single_copy_after_refresh_restores() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(ScriptedStore {
            delete_gate: Some(gate.clone()),
            ..ScriptedStore::default()
        });
        store.fail_delete.store(true, Ordering::SeqCst);
        let recipe = recipe_created("u1", "Stew", "2026-03-01T12:00:00Z");
        store.inner.put(&recipe).await.unwrap();
        let sync = Arc::new(sync_with(store, Some("u1")));
        sync.refresh().await.unwrap();

        let task = tokio::spawn({
            let sync = Arc::clone(&sync);
            let id = recipe.id;
            async move { sync.delete(id).await }
        });

        let mut views = sync.subscribe();
        while !sync.view().records.is_empty() {
            views.changed().await.unwrap();
        }

        // The remote still lists the record, so this refresh restores it.
        sync.refresh().await.unwrap();
        assert_eq!(sync.view().records.len(), 1);

        gate.notify_one();
        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_remote());

        let view = sync.view();
        assert_eq!(view.records.len(), 1);
        assert_eq!(view.records[0].id, recipe.id);
        assert!(view.last_error.is_some());
    }

    #[tokio::test]
    async fn test_success_clears_last_error() {
        let store = Arc::new(ScriptedStore::default());
        store.fail_put.store(true, Ordering::SeqCst);
        let sync = sync_with(store.clone(), Some("u1"));

        sync.create(test_draft("Stew")).await.unwrap_err();
        assert!(sync.view().last_error.is_some());

        store.fail_put.store(false, Ordering::SeqCst);
        sync.refresh().await.unwrap();
        assert!(sync.view().last_error.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_both_records() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store.clone(), Some("u1"));

        let (first, second) = tokio::join!(
            sync.create(test_draft("Stew")),
            sync.create(test_draft("Soup"))
        );
        first.unwrap();
        second.unwrap();

        assert_eq!(sync.view().records.len(), 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_subscription_sees_published_changes() {
        let store = Arc::new(MemoryStore::new());
        let sync = sync_with(store, Some("u1"));
        let mut views = sync.subscribe();
        assert!(views.borrow_and_update().records.is_empty());

        sync.create(test_draft("Stew")).await.unwrap();

        assert!(views.has_changed().unwrap());
        assert_eq!(views.borrow_and_update().records.len(), 1);
    }

    #[tokio::test]
    async fn test_view_orders_ties_by_id() {
        let store = Arc::new(ScriptedStore::default());
        let mut a = recipe_created("u1", "A", "2026-03-01T12:00:00Z");
        let mut b = recipe_created("u1", "B", "2026-03-01T12:00:00Z");
        if b.id < a.id {
            std::mem::swap(&mut a, &mut b);
        }
        store.inner.put(&b).await.unwrap();
        store.inner.put(&a).await.unwrap();
        let sync = sync_with(store, Some("u1"));

        sync.refresh().await.unwrap();

        let view = sync.view();
        assert_eq!(view.records[0].id, a.id);
        assert_eq!(view.records[1].id, b.id);
    }
}
