//! Non-fatal sync notices surfaced to the user.

use std::fmt;

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The remote layout could not be fetched; the shown layout was kept.
    LoadFailed,
    /// The remote write failed; the local cache holds the attempted state.
    SaveFailed,
    /// The local cache could not be read, written or cleared.
    CacheFailed,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadFailed => "Couldn't load your saved layout",
            Self::SaveFailed => "Couldn't save your layout",
            Self::CacheFailed => "Couldn't update the local layout cache",
        })
    }
}

/// A transient, dismissible warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncWarning {
    /// Category.
    pub kind: WarningKind,
    /// Underlying error text.
    pub message: String,
}

impl SyncWarning {
    /// Creates a warning.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SyncWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_kind_and_message() {
        let warning = SyncWarning::new(WarningKind::SaveFailed, "Server error: HTTP 503");
        assert_eq!(
            warning.to_string(),
            "Couldn't save your layout: Server error: HTTP 503"
        );
    }
}
