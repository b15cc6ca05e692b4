//! Debounced save tests for LayoutStore.

use super::{add, fixture, settle};
use crate::layout::SizePreset;
use crate::store::{MemoryRemote, SaveOutcome, WarningKind, DEFAULT_DEBOUNCE};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_rapid_mutations_coalesce_into_one_put() {
    let fx = fixture(MemoryRemote::new());

    assert!(add(&fx.store, "c", SizePreset::Tall));
    assert!(add(&fx.store, "d", SizePreset::Tile));
    assert!(fx.store.mutate(|m| m.remove("b")));
    assert!(fx.store.mutate(|m| {
        m.sizes.insert("c".into(), SizePreset::Hero);
        true
    }));
    assert!(fx.store.save_pending());
    assert_eq!(fx.remote.put_count(), 0);

    settle().await;
    assert_eq!(fx.remote.put_count(), 1);
    assert_eq!(fx.remote.document(), Some(fx.store.model().to_value()));
    assert!(!fx.store.save_pending());
}

#[tokio::test(start_paused = true)]
async fn test_mutation_writes_cache_before_remote() {
    let fx = fixture(MemoryRemote::new());
    add(&fx.store, "c", SizePreset::Wide);

    let cached = fx.cache.read().expect("read").expect("cache written");
    assert_eq!(cached, fx.store.model().to_value());
    assert_eq!(fx.remote.put_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_each_mutation_restarts_the_debounce_timer() {
    let fx = fixture(MemoryRemote::new());
    let half = DEFAULT_DEBOUNCE / 2 + Duration::from_millis(100);

    add(&fx.store, "c", SizePreset::Tile);
    tokio::time::sleep(half).await;
    add(&fx.store, "d", SizePreset::Tile);
    tokio::time::sleep(half).await;
    assert_eq!(fx.remote.put_count(), 0);

    settle().await;
    assert_eq!(fx.remote.put_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_identical_payload_is_not_sent_twice() {
    let fx = fixture(MemoryRemote::new());
    add(&fx.store, "c", SizePreset::Tile);
    settle().await;
    assert_eq!(fx.remote.put_count(), 1);

    add(&fx.store, "d", SizePreset::Tile);
    fx.store.mutate(|m| m.remove("d"));
    settle().await;
    assert_eq!(fx.remote.put_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_save_warns_and_next_mutation_retries() {
    let fx = fixture(MemoryRemote::new());
    fx.remote.fail_puts(true);
    let mut rx = fx.store.subscribe();

    add(&fx.store, "c", SizePreset::Tile);
    settle().await;
    assert_eq!(fx.remote.put_count(), 0);
    let warning = fx.store.warning().expect("warning retained");
    assert_eq!(warning.kind, WarningKind::SaveFailed);
    assert_eq!(rx.try_recv().expect("warning broadcast"), warning);

    // The attempted state is still in the cache.
    let cached = fx.cache.read().expect("read").expect("cache written");
    assert_eq!(cached, fx.store.model().to_value());

    fx.store.dismiss_warning();
    assert!(fx.store.warning().is_none());

    // No automatic retry.
    settle().await;
    assert_eq!(fx.remote.put_count(), 0);

    fx.remote.fail_puts(false);
    add(&fx.store, "d", SizePreset::Tile);
    settle().await;
    assert_eq!(fx.remote.put_count(), 1);
    assert!(fx.store.warning().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_flush_now_skips_the_debounce_window() {
    let fx = fixture(MemoryRemote::new());
    add(&fx.store, "c", SizePreset::Tile);
    fx.store.flush_now();

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(fx.remote.put_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_save_now_reports_outcome() {
    let fx = fixture(MemoryRemote::new());
    add(&fx.store, "c", SizePreset::Tile);

    assert_eq!(fx.store.save_now().await, SaveOutcome::Saved);
    assert!(!fx.store.save_pending());
    assert_eq!(fx.store.save_now().await, SaveOutcome::Skipped);

    fx.remote.fail_puts(true);
    add(&fx.store, "d", SizePreset::Tile);
    assert_eq!(fx.store.save_now().await, SaveOutcome::Failed);
    assert_eq!(fx.remote.put_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_put_is_not_cancelled_by_new_mutation() {
    let remote = MemoryRemote::new().with_latency(Duration::from_secs(1));
    let fx = fixture(remote);

    add(&fx.store, "c", SizePreset::Tile);
    fx.store.flush_now();
    tokio::time::sleep(Duration::from_millis(10)).await;

    // First put is in flight; the second waits on the write gate.
    add(&fx.store, "d", SizePreset::Tile);
    fx.store.flush_now();
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(fx.remote.put_count(), 0);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(fx.remote.put_count(), 2);
    assert_eq!(fx.remote.document(), Some(fx.store.model().to_value()));
}
