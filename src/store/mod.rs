//! Layout persistence and remote synchronization.
//!
//! [`LayoutStore`] owns the user's [`LayoutModel`] and keeps three copies in
//! step: the in-memory model, a local cache slot for fast first paint, and the
//! remote document that follows the user across devices.
//!
//! # Load
//!
//! [`LayoutStore::load_local`] applies the normalized cache immediately.
//! [`LayoutStore::load_remote`] then fetches the remote copy; a successful
//! fetch replaces the model and the cache, a failure keeps what is shown and
//! raises a [`SyncWarning`]. A fetch that resolves after a local mutation is
//! discarded: the local edit is newer.
//!
//! # Save
//!
//! Every mutation writes the cache synchronously and (re)starts a single
//! debounce timer. When the timer fires, the current model is sent unless it
//! equals the last payload the remote accepted. Rapid edits therefore
//! coalesce into one write, and a write gate keeps at most one `put` in
//! flight. Failed writes are not retried; the next mutation saves again.
//!
//! Scheduling spawns a Tokio task, so mutations must happen inside a runtime.

mod cache;
mod error;
mod remote;
mod warning;

#[cfg(test)]
mod tests;

pub use cache::LayoutCache;
pub use error::{RemoteError, StoreError};
pub use remote::{HttpRemote, MemoryRemote, RemoteLayout};
pub use warning::{SyncWarning, WarningKind};

use crate::layout::{normalize, LayoutModel};
use crate::widgets::WidgetRegistry;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Default delay between the last mutation and the remote write.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Capacity of the warning channel.
const WARNING_CHANNEL_CAPACITY: usize = 16;

/// How far loading has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing loaded; the registry default is shown.
    Unloaded,
    /// The local cache (or the default, if it was empty) has been applied.
    LocalHydrated,
    /// A remote fetch completed and was applied or found nothing stored.
    RemoteHydrated,
}

/// Result of [`LayoutStore::load_remote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The remote layout replaced the local one.
    Applied,
    /// The remote has nothing stored for this user.
    Empty,
    /// The fetch finished after a local edit (or teardown) and was dropped.
    Discarded,
    /// The fetch failed; a warning was raised.
    Failed,
}

/// Result of one remote save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The remote accepted the payload.
    Saved,
    /// The payload matched the last saved one, or the store was torn down.
    Skipped,
    /// The remote rejected the payload; a warning was raised.
    Failed,
}

struct State {
    model: LayoutModel,
    hydration: Hydration,
    /// Bumped by every applied mutation.
    edits: u64,
    /// Last payload the remote is known to hold.
    last_saved: Option<Value>,
    /// Pending debounce timer and its sequence number.
    pending: Option<(u64, JoinHandle<()>)>,
    timer_seq: u64,
    warning: Option<SyncWarning>,
    torn_down: bool,
}

struct Inner<R> {
    registry: Arc<WidgetRegistry>,
    cache: LayoutCache,
    remote: R,
    debounce: Duration,
    state: Mutex<State>,
    write_gate: tokio::sync::Mutex<()>,
    warnings: broadcast::Sender<SyncWarning>,
}

impl<R> Inner<R> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn raise(&self, warning: SyncWarning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.lock().warning = Some(warning.clone());
        if self.warnings.send(warning).is_err() {
            tracing::trace!("No subscribers for sync warning");
        }
    }

    fn write_cache(&self, model: &LayoutModel) {
        if let Err(e) = self.cache.write(model) {
            self.raise(SyncWarning::new(WarningKind::CacheFailed, e.to_string()));
        }
    }
}

impl<R: RemoteLayout> Inner<R> {
    async fn save(&self) -> SaveOutcome {
        let _gate = self.write_gate.lock().await;

        let (model, payload) = {
            let state = self.lock();
            if state.torn_down {
                return SaveOutcome::Skipped;
            }
            let payload = state.model.to_value();
            if state.last_saved.as_ref() == Some(&payload) {
                tracing::debug!("Layout unchanged since last save, skipping remote write");
                return SaveOutcome::Skipped;
            }
            (state.model.clone(), payload)
        };

        match self.remote.put(&model).await {
            Ok(()) => {
                tracing::debug!("Saved layout to remote");
                self.lock().last_saved = Some(payload);
                SaveOutcome::Saved
            }
            Err(e) => {
                self.raise(SyncWarning::new(WarningKind::SaveFailed, e.to_string()));
                SaveOutcome::Failed
            }
        }
    }
}

/// Persistence boundary for one user's layout.
///
/// Cloning is cheap and every clone shares the same state.
pub struct LayoutStore<R> {
    inner: Arc<Inner<R>>,
}

impl<R> Clone for LayoutStore<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> std::fmt::Debug for LayoutStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("LayoutStore")
            .field("cache", &self.inner.cache)
            .field("hydration", &state.hydration)
            .field("edits", &state.edits)
            .field("save_pending", &state.pending.is_some())
            .field("torn_down", &state.torn_down)
            .finish()
    }
}

impl<R: RemoteLayout> LayoutStore<R> {
    /// Creates a store showing the registry's default layout.
    pub fn new(
        registry: Arc<WidgetRegistry>,
        cache: LayoutCache,
        remote: R,
        debounce: Duration,
    ) -> Self {
        let (warnings, _rx) = broadcast::channel(WARNING_CHANNEL_CAPACITY);
        let model = registry.default_layout();
        Self {
            inner: Arc::new(Inner {
                registry,
                cache,
                remote,
                debounce,
                state: Mutex::new(State {
                    model,
                    hydration: Hydration::Unloaded,
                    edits: 0,
                    last_saved: None,
                    pending: None,
                    timer_seq: 0,
                    warning: None,
                    torn_down: false,
                }),
                write_gate: tokio::sync::Mutex::new(()),
                warnings,
            }),
        }
    }

    /// The registry layouts are normalized against.
    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.inner.registry
    }

    /// The remote backend.
    pub fn remote(&self) -> &R {
        &self.inner.remote
    }

    /// The local cache slot.
    pub fn cache(&self) -> &LayoutCache {
        &self.inner.cache
    }

    /// Snapshot of the current model.
    pub fn model(&self) -> LayoutModel {
        self.inner.lock().model.clone()
    }

    /// Current hydration state.
    pub fn hydration(&self) -> Hydration {
        self.inner.lock().hydration
    }

    /// Whether a debounced save is waiting to fire.
    pub fn save_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    /// Applies the normalized local cache.
    ///
    /// An empty or corrupt slot yields the default layout. Returns `true`
    /// if the cache held a layout.
    pub fn load_local(&self) -> bool {
        let raw = match self.inner.cache.read() {
            Ok(raw) => raw,
            Err(e) => {
                self.inner
                    .raise(SyncWarning::new(WarningKind::CacheFailed, e.to_string()));
                None
            }
        };
        let found = raw.is_some();
        let model = normalize(raw.as_ref(), &self.inner.registry);

        let mut state = self.inner.lock();
        if state.torn_down || state.edits > 0 {
            return found;
        }
        state.model = model;
        if state.hydration == Hydration::Unloaded {
            state.hydration = Hydration::LocalHydrated;
        }
        tracing::info!(found, "Applied local layout cache");
        found
    }

    /// Fetches the remote layout and applies it unless the model has been
    /// edited locally, before or during the fetch.
    pub async fn load_remote(&self) -> RemoteOutcome {
        {
            let state = self.inner.lock();
            if state.torn_down || state.edits > 0 {
                tracing::info!("Layout already edited locally, skipping remote fetch");
                return RemoteOutcome::Discarded;
            }
        }
        let fetched = self.inner.remote.fetch().await;

        let raw = match fetched {
            Ok(raw) => raw,
            Err(e) => {
                if self.inner.lock().torn_down {
                    return RemoteOutcome::Discarded;
                }
                self.inner
                    .raise(SyncWarning::new(WarningKind::LoadFailed, e.to_string()));
                return RemoteOutcome::Failed;
            }
        };

        let model = {
            let mut state = self.inner.lock();
            if state.torn_down || state.edits > 0 {
                tracing::info!("Local edits happened during remote fetch, discarding it");
                return RemoteOutcome::Discarded;
            }
            state.hydration = Hydration::RemoteHydrated;
            let Some(raw) = raw else {
                tracing::info!("No remote layout stored yet");
                return RemoteOutcome::Empty;
            };
            state.model = normalize(Some(&raw), &self.inner.registry);
            state.last_saved = Some(raw);
            state.model.clone()
        };
        tracing::info!("Applied remote layout");
        self.inner.write_cache(&model);
        RemoteOutcome::Applied
    }

    /// Runs the full load protocol: local cache first, then the remote.
    pub async fn load(&self) -> RemoteOutcome {
        self.load_local();
        self.load_remote().await
    }

    /// Applies `edit` to the model. When it reports a change, writes the
    /// cache and schedules a debounced save.
    ///
    /// Returns what `edit` returned. After teardown nothing is applied.
    pub(crate) fn mutate(&self, edit: impl FnOnce(&mut LayoutModel) -> bool) -> bool {
        let model = {
            let mut state = self.inner.lock();
            if state.torn_down || !edit(&mut state.model) {
                return false;
            }
            state.edits += 1;
            state.model.clone()
        };
        self.inner.write_cache(&model);
        self.schedule_save(self.inner.debounce);
        true
    }

    /// Replaces the whole model, normalizing it first.
    ///
    /// This is an administrative path (the `layout reset` command) that sits
    /// outside the controller's VIEW/EDIT state machine: it applies in either
    /// mode. It still counts as a local edit, so it writes the cache,
    /// schedules a save and makes a later remote load discard its result.
    ///
    /// Returns `true` if the layout changed.
    pub fn replace(&self, model: LayoutModel) -> bool {
        let model = normalize(Some(&model.to_value()), &self.inner.registry);
        self.mutate(|current| {
            if *current == model {
                return false;
            }
            *current = model;
            true
        })
    }

    /// Fires the pending save immediately (through the debounce task).
    pub fn flush_now(&self) {
        self.schedule_save(Duration::ZERO);
    }

    /// Cancels any pending timer and saves now, waiting for the result.
    pub async fn save_now(&self) -> SaveOutcome {
        {
            let mut state = self.inner.lock();
            if let Some((_, handle)) = state.pending.take() {
                handle.abort();
            }
        }
        self.inner.save().await
    }

    fn schedule_save(&self, delay: Duration) {
        let mut state = self.inner.lock();
        if state.torn_down {
            return;
        }
        if let Some((_, handle)) = state.pending.take() {
            handle.abort();
        }
        state.timer_seq += 1;
        let seq = state.timer_seq;
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                // Clear our own slot so a later mutation cannot abort the put.
                let mut state = inner.lock();
                if state.pending.as_ref().is_some_and(|(pending, _)| *pending == seq) {
                    state.pending = None;
                }
            }
            inner.save().await;
        });
        state.pending = Some((seq, handle));
    }

    /// Stops all sync activity. Pending saves are cancelled, later mutations
    /// are ignored and late fetches are discarded.
    pub fn teardown(&self) {
        let mut state = self.inner.lock();
        state.torn_down = true;
        if let Some((_, handle)) = state.pending.take() {
            handle.abort();
        }
        tracing::debug!("Layout store torn down");
    }

    /// Removes the local cache slot (logout).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the slot exists but cannot be removed; a
    /// [`WarningKind::CacheFailed`] warning is raised as well.
    pub fn clear_cache(&self) -> Result<(), StoreError> {
        self.inner.cache.clear().map_err(|e| {
            self.inner
                .raise(SyncWarning::new(WarningKind::CacheFailed, e.to_string()));
            e
        })
    }

    /// Subscribes to sync warnings.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncWarning> {
        self.inner.warnings.subscribe()
    }

    /// The current dismissible warning, if any.
    pub fn warning(&self) -> Option<SyncWarning> {
        self.inner.lock().warning.clone()
    }

    /// Dismisses the current warning.
    pub fn dismiss_warning(&self) {
        self.inner.lock().warning = None;
    }
}
