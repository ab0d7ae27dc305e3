//! Digraph formation from consecutive keystrokes.
//!
//! A digraph is a timing record over two chronologically consecutive
//! keystrokes. The same validity rule backs two delivery protocols: a
//! streaming one (keystrokes arrive one at a time, in order) and a batch one
//! (raw events arrive unordered, are paired, sorted, then walked).

use crate::core::keymap::{key_code, KeyCode};
use crate::core::pairing::{pair_events, sort_by_press_time, Keystroke};
use crate::source::types::RawEvent;
use serde::{Deserialize, Serialize};

/// Minimum raw events for a batch pass (2 presses + 2 releases).
pub const MIN_RAW_EVENTS: usize = 4;

/// Timing validation policy.
///
/// The digraph path rejects non-positive intervals; the batch aggregator
/// accepts every sample into its statistics. The two policies are kept
/// distinct on purpose: downstream consumers may depend on either behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingPolicy {
    /// Admit strictly positive intervals only.
    #[default]
    Strict,
    /// Admit every interval, including zero and negative ones.
    Permissive,
}

impl TimingPolicy {
    /// Check whether an interval passes this policy.
    pub fn admits(self, interval_ms: f64) -> bool {
        match self {
            TimingPolicy::Strict => interval_ms > 0.0,
            TimingPolicy::Permissive => true,
        }
    }
}

/// Timing record over two consecutive keystrokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigraphRecord {
    /// Mapped code of the earlier keystroke's key
    pub previous_key: KeyCode,
    /// Mapped code of the later keystroke's key
    pub current_key: KeyCode,
    /// Press-to-press interval in milliseconds
    pub digraph_time_ms: f64,
    /// Hold time of the earlier keystroke in milliseconds
    pub previous_hold_ms: f64,
    /// Hold time of the later keystroke in milliseconds
    pub current_hold_ms: f64,
}

impl DigraphRecord {
    /// Form a record between two consecutive keystrokes.
    ///
    /// Returns `None` when the policy rejects any of the three intervals.
    pub fn between(previous: &Keystroke, current: &Keystroke, policy: TimingPolicy) -> Option<Self> {
        let digraph_time_ms = current.press_time_ms - previous.press_time_ms;
        let previous_hold_ms = previous.hold_time_ms();
        let current_hold_ms = current.hold_time_ms();

        if !policy.admits(digraph_time_ms)
            || !policy.admits(previous_hold_ms)
            || !policy.admits(current_hold_ms)
        {
            return None;
        }

        Some(Self {
            previous_key: key_code(&previous.key),
            current_key: key_code(&current.key),
            digraph_time_ms,
            previous_hold_ms,
            current_hold_ms,
        })
    }
}

/// Streaming digraph former.
///
/// Holds the last completed keystroke and forms at most one record per new
/// keystroke. Precondition: keystrokes are delivered in chronological order
/// (the live path trusts delivery order to stay O(1) per event; the batch
/// path sorts instead).
#[derive(Debug, Default)]
pub struct DigraphStream {
    last: Option<Keystroke>,
    policy: TimingPolicy,
}

impl DigraphStream {
    /// Create a stream with the strict policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: TimingPolicy) -> Self {
        Self { last: None, policy }
    }

    /// Feed one completed keystroke.
    ///
    /// The reference always advances to the new keystroke, whether or not a
    /// record was emitted; an invalid pair only skips that one digraph.
    pub fn advance(&mut self, keystroke: Keystroke) -> Option<DigraphRecord> {
        let record = self
            .last
            .as_ref()
            .and_then(|previous| DigraphRecord::between(previous, &keystroke, self.policy));

        if record.is_none() && self.last.is_some() {
            tracing::debug!(key = %keystroke.key, "digraph skipped: timing rejected");
        }

        self.last = Some(keystroke);
        record
    }

    /// Drop the last-keystroke reference.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Batch digraph extraction over an unordered set of raw events.
///
/// Pairs every event with a dedicated pairer, sorts the completed keystrokes
/// by press time to reconstruct a deterministic timeline, then walks them
/// with the same validity rule the streaming path uses.
pub fn digraphs_from_events(events: &[RawEvent]) -> Vec<DigraphRecord> {
    if events.len() < MIN_RAW_EVENTS {
        return Vec::new();
    }

    let mut keystrokes = pair_events(events);
    sort_by_press_time(&mut keystrokes);

    let mut stream = DigraphStream::new();
    keystrokes
        .into_iter()
        .filter_map(|keystroke| stream.advance(keystroke))
        .collect()
}
