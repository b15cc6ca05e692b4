//! Widget context providing shared state for widget rendering.
//!
//! The dashboard's business data (sales figures, ledgers, customer records)
//! is produced by external collaborators. They hand the layout engine a
//! [`DashboardData`] snapshot of pre-formatted values; each render borrows it
//! as a read-only [`WidgetContext`].

use std::collections::BTreeMap;
use std::fmt;

/// Measured inner size of a widget's container, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerSize {
    /// Available columns.
    pub width: u16,
    /// Available rows.
    pub height: u16,
}

impl ContainerSize {
    /// Creates a container size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Returns `true` if nothing can be drawn.
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Owned snapshot of data shared by all widgets.
///
/// Keys are widget ids (or `"<id>.<field>"` for secondary values such as a
/// KPI's delta).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    /// Whether the collaborators are still fetching.
    pub loading: bool,
    /// Pre-formatted scalar values.
    pub values: BTreeMap<String, String>,
    /// Pre-formatted list rows.
    pub rows: BTreeMap<String, Vec<String>>,
    /// Numeric series for chart widgets.
    pub series: BTreeMap<String, Vec<f64>>,
}

impl DashboardData {
    /// Sets a scalar value, builder style.
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Sets list rows, builder style.
    pub fn with_rows(mut self, key: &str, rows: &[&str]) -> Self {
        self.rows
            .insert(key.to_string(), rows.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Sets a numeric series, builder style.
    pub fn with_series(mut self, key: &str, series: &[f64]) -> Self {
        self.series.insert(key.to_string(), series.to_vec());
        self
    }

    /// Marks the snapshot as still loading.
    pub fn loading(mut self) -> Self {
        self.loading = true;
        self
    }

    /// Borrows the snapshot as a render context without a navigation hook.
    pub fn context(&self) -> WidgetContext<'_> {
        WidgetContext::new(self)
    }
}

/// Read-only context passed to widgets during rendering.
///
/// All fields are borrowed to avoid cloning the snapshot on every render.
pub struct WidgetContext<'a> {
    /// Shared data snapshot.
    pub data: &'a DashboardData,

    /// Navigation callback owned by the host (e.g. open the invoice list).
    ///
    /// `None` when the host does not support navigation.
    pub navigate: Option<&'a (dyn Fn(&str) + Sync)>,
}

impl<'a> WidgetContext<'a> {
    /// Creates a context over `data` with no navigation hook.
    pub fn new(data: &'a DashboardData) -> Self {
        Self {
            data,
            navigate: None,
        }
    }

    /// Sets the navigation callback.
    pub fn with_navigation(mut self, navigate: &'a (dyn Fn(&str) + Sync)) -> Self {
        self.navigate = Some(navigate);
        self
    }

    /// Whether the collaborators are still loading.
    pub fn is_loading(&self) -> bool {
        self.data.loading
    }

    /// Pre-formatted scalar value for `key`.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.data.values.get(key).map(String::as_str)
    }

    /// List rows for `key`; empty when absent.
    pub fn rows(&self, key: &str) -> &'a [String] {
        self.data.rows.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Numeric series for `key`; empty when absent.
    pub fn series(&self, key: &str) -> &'a [f64] {
        self.data.series.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Asks the host to navigate to `target`.
    ///
    /// Returns `false` if no navigation hook is installed.
    pub fn navigate_to(&self, target: &str) -> bool {
        match self.navigate {
            Some(navigate) => {
                navigate(target);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for WidgetContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetContext")
            .field("data", &self.data)
            .field("navigate", &self.navigate.is_some())
            .finish()
    }
}
