//! Raw input event types consumed by the extraction core.
//!
//! Events carry a key identity and a high-resolution timestamp in
//! milliseconds. Timestamps only need to be mutually comparable within one
//! session; the origin is whatever monotonic clock the event source uses.

use serde::{Deserialize, Serialize};

/// Whether a key transition is a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A single key transition as delivered by the external event source.
///
/// Repeats of the same key identity are expected; there is no uniqueness
/// constraint of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Key identity as reported by the input surface (e.g. "a", "Backspace")
    pub key: String,
    /// Press or release
    pub kind: KeyEventKind,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: f64,
}

impl RawEvent {
    /// Create a press event.
    pub fn press(key: impl Into<String>, timestamp_ms: f64) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Press,
            timestamp_ms,
        }
    }

    /// Create a release event.
    pub fn release(key: impl Into<String>, timestamp_ms: f64) -> Self {
        Self {
            key: key.into(),
            kind: KeyEventKind::Release,
            timestamp_ms,
        }
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyEventKind::Press
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let down = RawEvent::press("a", 10.0);
        assert!(down.is_press());
        assert_eq!(down.key, "a");

        let up = RawEvent::release("a", 90.0);
        assert_eq!(up.kind, KeyEventKind::Release);
        assert_eq!(up.timestamp_ms, 90.0);
    }

    #[test]
    fn test_event_kind_serialization() {
        let json = serde_json::to_string(&RawEvent::press("Shift", 1.5)).unwrap();
        assert!(json.contains("\"press\""));
        assert!(json.contains("Shift"));
    }
}
