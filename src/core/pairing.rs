//! Press/release pairing into completed keystrokes.
//!
//! The pairer matches each release to the most recent unmatched press of the
//! same (case-folded) key identity. Pairing is keyed on the raw identity, not
//! the mapped code, so identities outside the alphabet still pair correctly.

use crate::source::types::{KeyEventKind, RawEvent};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A completed press/release interval for one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keystroke {
    /// Key identity as reported by the input surface
    pub key: String,
    /// Press timestamp in milliseconds
    pub press_time_ms: f64,
    /// Release timestamp in milliseconds
    pub release_time_ms: f64,
}

impl Keystroke {
    /// Time the key was held down, in milliseconds.
    pub fn hold_time_ms(&self) -> f64 {
        self.release_time_ms - self.press_time_ms
    }
}

/// Per-key state machine matching presses to releases.
///
/// Holds at most one pending press per key identity. State is scoped to a
/// single session; call [`reset`](Self::reset) at tracking boundaries.
#[derive(Debug, Default)]
pub struct KeystrokePairer {
    pending: HashMap<String, f64>,
}

impl KeystrokePairer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press.
    ///
    /// First press wins: a repeated press while one is already pending (key
    /// bounce, auto-repeat) is dropped so the original timing survives.
    pub fn on_press(&mut self, identity: &str, timestamp_ms: f64) {
        self.pending
            .entry(identity.to_lowercase())
            .or_insert(timestamp_ms);
    }

    /// Record a release, completing a keystroke if a press is pending.
    ///
    /// An orphan release (no pending press for this identity) is silently
    /// discarded; the input surface is racy and the pipeline must stay live.
    pub fn on_release(&mut self, identity: &str, timestamp_ms: f64) -> Option<Keystroke> {
        self.pending
            .remove(&identity.to_lowercase())
            .map(|press_time_ms| Keystroke {
                key: identity.to_string(),
                press_time_ms,
                release_time_ms: timestamp_ms,
            })
    }

    /// Route a raw event to press or release handling.
    pub fn on_event(&mut self, event: &RawEvent) -> Option<Keystroke> {
        match event.kind {
            KeyEventKind::Press => {
                self.on_press(&event.key, event.timestamp_ms);
                None
            }
            KeyEventKind::Release => self.on_release(&event.key, event.timestamp_ms),
        }
    }

    /// Drop all pending presses.
    pub fn reset(&mut self) {
        self.pending.clear();
    }

    /// Number of presses still awaiting a release.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Pair a whole batch of raw events with a dedicated pairer instance.
///
/// Returned keystrokes are in release-completion order, not chronological
/// order; batch consumers sort by press time before walking them.
pub fn pair_events(events: &[RawEvent]) -> Vec<Keystroke> {
    let mut pairer = KeystrokePairer::new();
    events
        .iter()
        .filter_map(|event| pairer.on_event(event))
        .collect()
}

/// Stable-sort keystrokes chronologically by press time.
pub fn sort_by_press_time(keystrokes: &mut [Keystroke]) {
    keystrokes.sort_by(|a, b| a.press_time_ms.total_cmp(&b.press_time_ms));
}
