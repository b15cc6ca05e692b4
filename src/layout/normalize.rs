//! Schema healing for stored layouts.
//!
//! Anything read back from the local cache or the remote endpoint is
//! untrusted: it may be absent, written by an older schema, hand-edited or
//! truncated. [`normalize`] always returns a layout that satisfies the model
//! invariants, falling back to the registry's default layout when the input
//! cannot be salvaged.

use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

use super::{LayoutModel, SizePreset, SCHEMA_VERSION};
use crate::widgets::{WidgetId, WidgetRegistry};

/// Heals an untrusted stored layout.
///
/// 1. Wrong, missing or non-integer `version` → default layout.
/// 2. `order` is filtered to ids the registry knows, deduplicated keeping
///    the first occurrence.
/// 3. Missing non-removable widgets are appended at the end.
/// 4. Each id takes its preset from `sizes` if that entry is a recognized
///    preset name, otherwise the widget's default preset.
///
/// Normalization is idempotent: feeding the result back in (via
/// [`LayoutModel::to_value`]) returns the same layout.
pub fn normalize(raw: Option<&Value>, registry: &WidgetRegistry) -> LayoutModel {
    let Some(raw) = raw else {
        tracing::debug!("no stored layout, using default");
        return registry.default_layout();
    };
    let Some(obj) = raw.as_object() else {
        tracing::debug!("stored layout is not an object, using default");
        return registry.default_layout();
    };

    let version = obj.get("version").and_then(Value::as_u64);
    if version != Some(u64::from(SCHEMA_VERSION)) {
        tracing::info!(
            stored = ?obj.get("version"),
            current = SCHEMA_VERSION,
            "discarding stored layout with unsupported schema version"
        );
        return registry.default_layout();
    }

    let Some(order) = obj.get("order").and_then(Value::as_array) else {
        tracing::debug!("stored layout has no order array, using default");
        return registry.default_layout();
    };

    let mut kept: Vec<&'static str> = Vec::with_capacity(order.len());
    let mut seen = HashSet::with_capacity(order.len());
    for entry in order {
        let Some(id) = entry.as_str() else {
            tracing::debug!(entry = %entry, "dropping non-string layout entry");
            continue;
        };
        let Some(def) = registry.lookup(id) else {
            tracing::debug!(id, "dropping unknown widget from stored layout");
            continue;
        };
        if !seen.insert(def.id) {
            tracing::debug!(id, "dropping duplicate widget from stored layout");
            continue;
        }
        kept.push(def.id);
    }
    for id in registry.mandatory_ids() {
        if seen.insert(id) {
            tracing::debug!(id, "restoring missing mandatory widget");
            kept.push(id);
        }
    }

    let sizes = obj.get("sizes").and_then(Value::as_object);
    let mut model = LayoutModel::empty();
    for id in kept {
        let Some(def) = registry.lookup(id) else {
            continue;
        };
        let preset = sizes
            .and_then(|s| s.get(id))
            .and_then(Value::as_str)
            .and_then(|s| SizePreset::from_str(s).ok())
            .unwrap_or_else(|| {
                tracing::debug!(id, preset = %def.default_preset, "using default preset");
                def.default_preset
            });
        model.push(WidgetId::from(id), preset);
    }
    model
}

/// Parses and heals a serialized layout.
///
/// Text that is not valid JSON is treated the same as an absent layout.
pub fn normalize_str(raw: &str, registry: &WidgetRegistry) -> LayoutModel {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => normalize(Some(&value), registry),
        Err(e) => {
            tracing::debug!(error = %e, "stored layout is not valid JSON, using default");
            registry.default_layout()
        }
    }
}
