//! Remote layout backends.
//!
//! The store talks to the remote copy through [`RemoteLayout`]. Production
//! uses [`HttpRemote`]; [`MemoryRemote`] keeps the document in-process for
//! offline use and tests.

use super::RemoteError;
use crate::layout::LayoutModel;
use layout_client::LayoutClient;
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Remote storage for one user's layout document.
///
/// Futures must be `Send` because the store drives saves from spawned tasks.
pub trait RemoteLayout: Send + Sync + 'static {
    /// Fetches the stored document. `Ok(None)` means nothing was saved yet.
    fn fetch(&self) -> impl Future<Output = Result<Option<Value>, RemoteError>> + Send;

    /// Replaces the stored document with `layout`.
    fn put(&self, layout: &LayoutModel) -> impl Future<Output = Result<(), RemoteError>> + Send;
}

/// [`RemoteLayout`] over the HTTP layout endpoint.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: LayoutClient,
}

impl HttpRemote {
    /// Wraps a configured client.
    pub fn new(client: LayoutClient) -> Self {
        Self { client }
    }

    /// Endpoint URL, for diagnostics.
    pub fn url(&self) -> &str {
        self.client.url()
    }
}

impl RemoteLayout for HttpRemote {
    fn fetch(&self) -> impl Future<Output = Result<Option<Value>, RemoteError>> + Send {
        async move { Ok(self.client.fetch().await?) }
    }

    fn put(&self, layout: &LayoutModel) -> impl Future<Output = Result<(), RemoteError>> + Send {
        let payload = layout.to_value();
        async move { Ok(self.client.put(&payload).await?) }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    stored: Option<Value>,
    puts: usize,
    fail_fetch: bool,
    fail_put: bool,
}

/// In-process [`RemoteLayout`].
///
/// Clones share the same document, so a test can keep a handle while the
/// store owns another and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    state: Arc<Mutex<MemoryState>>,
    latency: Duration,
}

impl MemoryRemote {
    /// Empty remote with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote already holding `document`.
    pub fn with_document(document: Value) -> Self {
        let remote = Self::new();
        remote.lock().stored = Some(document);
        remote
    }

    /// Delays every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes subsequent fetches fail (or succeed again).
    pub fn fail_fetches(&self, fail: bool) {
        self.lock().fail_fetch = fail;
    }

    /// Makes subsequent puts fail (or succeed again).
    pub fn fail_puts(&self, fail: bool) {
        self.lock().fail_put = fail;
    }

    /// Number of successful puts so far.
    pub fn put_count(&self) -> usize {
        self.lock().puts
    }

    /// The stored document.
    pub fn document(&self) -> Option<Value> {
        self.lock().stored.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl RemoteLayout for MemoryRemote {
    fn fetch(&self) -> impl Future<Output = Result<Option<Value>, RemoteError>> + Send {
        async move {
            self.delay().await;
            let state = self.lock();
            if state.fail_fetch {
                return Err(RemoteError::Unavailable("fetch refused".to_string()));
            }
            Ok(state.stored.clone())
        }
    }

    fn put(&self, layout: &LayoutModel) -> impl Future<Output = Result<(), RemoteError>> + Send {
        let payload = layout.to_value();
        async move {
            self.delay().await;
            let mut state = self.lock();
            if state.fail_put {
                return Err(RemoteError::Unavailable("put refused".to_string()));
            }
            state.stored = Some(payload);
            state.puts += 1;
            Ok(())
        }
    }
}
