//! Tests for the LayoutStore module.
//!
//! - `load`: local and remote hydration, healing, late-fetch discard
//! - `save`: debounce coalescing, skip-identical, failures, write gate
//! - `lifecycle`: teardown, logout, replace, shared clones

mod save;

use super::{LayoutCache, LayoutStore, MemoryRemote, DEFAULT_DEBOUNCE};
use crate::layout::{LayoutModel, SizePreset};
use crate::widgets::test_support::abcd_registry;
use crate::widgets::WidgetId;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A store over a temp-dir cache and an in-memory remote.
pub(super) struct Fixture {
    pub store: LayoutStore<MemoryRemote>,
    pub remote: MemoryRemote,
    pub cache: LayoutCache,
    _dir: TempDir,
}

pub(super) fn fixture(remote: MemoryRemote) -> Fixture {
    let dir = TempDir::new().expect("temp dir");
    let cache = LayoutCache::for_user(dir.path(), "alice");
    let store = LayoutStore::new(
        Arc::new(abcd_registry()),
        cache.clone(),
        remote.clone(),
        DEFAULT_DEBOUNCE,
    );
    Fixture {
        store,
        remote,
        cache,
        _dir: dir,
    }
}

/// Sleeps just past the debounce window.
pub(super) async fn settle() {
    tokio::time::sleep(DEFAULT_DEBOUNCE + Duration::from_millis(100)).await;
}

/// Default layout plus `id` at `preset`.
pub(super) fn default_plus(id: &str, preset: SizePreset) -> LayoutModel {
    let mut model = abcd_registry().default_layout();
    model.push(WidgetId::from(id), preset);
    model
}

pub(super) fn add(store: &LayoutStore<MemoryRemote>, id: &str, preset: SizePreset) -> bool {
    store.mutate(|m| m.push(WidgetId::from(id), preset))
}

pub(super) fn ids(model: &LayoutModel) -> Vec<&str> {
    model.order.iter().map(WidgetId::as_str).collect()
}
