//! Recoverable deserialization failures.
//!
//! A malformed timestamp does not fail deserialization: the field is
//! treated as absent and the failure is handed to an [`Observer`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::FieldPath;
use crate::timestamp::TimestampError;

// -----------------------------------------------------------------------------
// Observer

/// Receives recoverable failures from a
/// [`DeserializeDriver`](crate::DeserializeDriver).
pub trait Observer {
    /// A timestamp at `path` could not be decoded from `raw`.
    fn malformed_timestamp(&mut self, path: &FieldPath, raw: &str, error: &TimestampError);
}

/// Reports through `log::warn!`. Used when no observer is given.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn malformed_timestamp(&mut self, path: &FieldPath, raw: &str, error: &TimestampError) {
        log::warn!("ignoring timestamp at `{path}`: {error} (raw value {raw:?})");
    }
}

// -----------------------------------------------------------------------------
// CollectObserver

/// A recorded recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: String,
    pub raw: String,
    pub message: String,
}

/// Keeps every reported failure.
///
/// ```
/// use jsondto_mapper::{DeserializeDriver, derive::Record};
/// use jsondto_mapper::diagnostics::CollectObserver;
///
/// #[derive(Record)]
/// struct Event {
///     name: String,
///     at: Option<chrono::DateTime<chrono::FixedOffset>>,
/// }
///
/// let mut observer = CollectObserver::new();
/// let input = serde_json::json!({ "name": "boot", "at": "yesterday" });
/// let event: Event = DeserializeDriver::with_observer(&mut observer)
///     .deserialize(&input)
///     .unwrap();
///
/// assert_eq!(event.name, "boot");
/// assert!(event.at.is_none());
/// assert_eq!(observer.diagnostics()[0].path, "at");
/// ```
#[derive(Debug, Default, Clone)]
pub struct CollectObserver {
    diagnostics: Vec<Diagnostic>,
}

impl CollectObserver {
    #[inline]
    pub const fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[inline]
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Observer for CollectObserver {
    fn malformed_timestamp(&mut self, path: &FieldPath, raw: &str, error: &TimestampError) {
        self.diagnostics.push(Diagnostic {
            path: path.to_string(),
            raw: raw.into(),
            message: error.to_string(),
        });
    }
}
