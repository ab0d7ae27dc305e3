//! Session-level statistical feature extraction.
//!
//! One batch call turns a captured raw event sequence into a fixed 9-field
//! feature vector: mean and standard deviation over four timing
//! distributions plus a raw error-correction count. The vector feeds an
//! external anomaly scorer; this module retains nothing between calls.

use crate::core::digraph::{TimingPolicy, MIN_RAW_EVENTS};
use crate::core::keymap::is_error_key;
use crate::core::pairing::{pair_events, sort_by_press_time, Keystroke};
use crate::source::types::RawEvent;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Minimum completed keystrokes for a feature vector.
pub const MIN_KEYSTROKES: usize = 2;

/// Statistical timing features for one session.
///
/// Field order mirrors the 9-slot layout the downstream scorer consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionFeatureVector {
    /// Mean key hold time (ms)
    pub hold_time_mean: f64,
    /// Standard deviation of hold times
    pub hold_time_std_dev: f64,
    /// Mean press-to-press interval between adjacent keystrokes (ms)
    pub press_press_mean: f64,
    /// Standard deviation of press-to-press intervals
    pub press_press_std_dev: f64,
    /// Mean release-to-release interval (ms)
    pub release_release_mean: f64,
    /// Standard deviation of release-to-release intervals
    pub release_release_std_dev: f64,
    /// Mean release-to-next-press interval (ms, negative when keys overlap)
    pub release_press_mean: f64,
    /// Standard deviation of release-to-press intervals
    pub release_press_std_dev: f64,
    /// Number of error-correction (backspace) keystrokes, unnormalized
    pub error_key_count: u32,
}

/// Extract session features with the default permissive policy.
///
/// Returns `None` when the session holds fewer than [`MIN_RAW_EVENTS`] raw
/// events or fewer than [`MIN_KEYSTROKES`] completed keystrokes. `None`
/// means "not enough data yet", not an error.
///
/// Unlike the digraph path, zero and negative intervals flow into the
/// statistics unfiltered. Release-to-press going negative on overlapping
/// keys is itself a typing-style signal.
pub fn extract_session_features(events: &[RawEvent]) -> Option<SessionFeatureVector> {
    extract_session_features_with(events, TimingPolicy::Permissive)
}

/// Extract session features under an explicit timing policy.
///
/// [`TimingPolicy::Strict`] drops non-positive samples before aggregation,
/// matching the digraph path's validity rule.
pub fn extract_session_features_with(
    events: &[RawEvent],
    policy: TimingPolicy,
) -> Option<SessionFeatureVector> {
    if events.len() < MIN_RAW_EVENTS {
        return None;
    }

    let mut keystrokes = pair_events(events);
    sort_by_press_time(&mut keystrokes);

    if keystrokes.len() < MIN_KEYSTROKES {
        return None;
    }

    let samples = TimingSamples::collect(&keystrokes, policy);
    let error_key_count = keystrokes
        .iter()
        .filter(|keystroke| is_error_key(&keystroke.key))
        .count() as u32;

    Some(SessionFeatureVector {
        hold_time_mean: sample_mean(&samples.hold),
        hold_time_std_dev: sample_std_dev(&samples.hold),
        press_press_mean: sample_mean(&samples.press_press),
        press_press_std_dev: sample_std_dev(&samples.press_press),
        release_release_mean: sample_mean(&samples.release_release),
        release_release_std_dev: sample_std_dev(&samples.release_release),
        release_press_mean: sample_mean(&samples.release_press),
        release_press_std_dev: sample_std_dev(&samples.release_press),
        error_key_count,
    })
}

/// The four timing distributions sampled from a sorted keystroke sequence.
#[derive(Debug, Default)]
struct TimingSamples {
    hold: Vec<f64>,
    press_press: Vec<f64>,
    release_release: Vec<f64>,
    release_press: Vec<f64>,
}

impl TimingSamples {
    /// One linear pass: a hold sample per keystroke, one pp/rr/rp sample per
    /// adjacent pair (`n-1` samples for `n` keystrokes).
    fn collect(keystrokes: &[Keystroke], policy: TimingPolicy) -> Self {
        let mut samples = Self::default();

        for keystroke in keystrokes {
            push_sample(&mut samples.hold, keystroke.hold_time_ms(), policy);
        }

        for pair in keystrokes.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            push_sample(
                &mut samples.press_press,
                current.press_time_ms - previous.press_time_ms,
                policy,
            );
            push_sample(
                &mut samples.release_release,
                current.release_time_ms - previous.release_time_ms,
                policy,
            );
            push_sample(
                &mut samples.release_press,
                current.press_time_ms - previous.release_time_ms,
                policy,
            );
        }

        samples
    }
}

fn push_sample(distribution: &mut Vec<f64>, value: f64, policy: TimingPolicy) {
    if policy.admits(value) {
        distribution.push(value);
    }
}

fn sample_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().mean()
}

/// Sample standard deviation (`n-1` denominator).
///
/// A single sample degenerates to denominator 1, i.e. 0.0, rather than
/// dividing by zero.
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().std_dev()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Press/release event pair for one key.
    fn tap(key: &str, press: f64, release: f64) -> [RawEvent; 2] {
        [RawEvent::press(key, press), RawEvent::release(key, release)]
    }

    #[test]
    fn test_absent_below_event_floor() {
        let events = vec![
            RawEvent::press("a", 0.0),
            RawEvent::release("a", 80.0),
            RawEvent::press("b", 120.0),
        ];
        assert!(extract_session_features(&events).is_none());
    }

    #[test]
    fn test_absent_below_keystroke_floor() {
        // 4 events but only one completed keystroke (orphan releases)
        let events = vec![
            RawEvent::release("x", 5.0),
            RawEvent::press("a", 10.0),
            RawEvent::release("a", 90.0),
            RawEvent::release("y", 95.0),
        ];
        assert!(extract_session_features(&events).is_none());
    }

    #[test]
    fn test_two_keystroke_example() {
        // Holds 100 and 140: mean 120, sample std dev over denominator 1
        let mut events = Vec::new();
        events.extend(tap("a", 0.0, 100.0));
        events.extend(tap("b", 200.0, 340.0));

        let features = extract_session_features(&events).unwrap();
        assert_eq!(features.hold_time_mean, 120.0);
        assert!((features.hold_time_std_dev - 800.0_f64.sqrt()).abs() < 1e-9);

        // Single adjacent pair: one sample each, std dev pinned to 0
        assert_eq!(features.press_press_mean, 200.0);
        assert_eq!(features.press_press_std_dev, 0.0);
        assert_eq!(features.release_release_mean, 240.0);
        assert_eq!(features.release_press_mean, 100.0);
        assert_eq!(features.error_key_count, 0);
    }

    #[test]
    fn test_std_devs_never_negative() {
        let mut events = Vec::new();
        for (i, key) in ["t", "e", "s", "t"].iter().enumerate() {
            let base = i as f64 * 180.0;
            events.extend(tap(key, base, base + 70.0 + i as f64 * 15.0));
        }

        let features = extract_session_features(&events).unwrap();
        for std in [
            features.hold_time_std_dev,
            features.press_press_std_dev,
            features.release_release_std_dev,
            features.release_press_std_dev,
        ] {
            assert!(std >= 0.0);
        }
    }

    #[test]
    fn test_error_key_count() {
        let mut events = Vec::new();
        events.extend(tap("a", 0.0, 80.0));
        events.extend(tap("Backspace", 200.0, 260.0));
        events.extend(tap("backspace", 400.0, 470.0));
        events.extend(tap("b", 600.0, 690.0));

        let features = extract_session_features(&events).unwrap();
        assert_eq!(features.error_key_count, 2);
    }

    #[test]
    fn test_permissive_admits_negative_release_press() {
        // "b" is pressed while "a" is still held: rp sample is negative
        let events = vec![
            RawEvent::press("a", 0.0),
            RawEvent::press("b", 100.0),
            RawEvent::release("a", 150.0),
            RawEvent::release("b", 260.0),
        ];

        let features = extract_session_features(&events).unwrap();
        assert_eq!(features.release_press_mean, -50.0);
    }

    #[test]
    fn test_strict_policy_filters_nonpositive_samples() {
        let events = vec![
            RawEvent::press("a", 0.0),
            RawEvent::press("b", 100.0),
            RawEvent::release("a", 150.0),
            RawEvent::release("b", 260.0),
        ];

        let strict = extract_session_features_with(&events, TimingPolicy::Strict).unwrap();
        // The negative rp sample is dropped, leaving that distribution empty
        assert_eq!(strict.release_press_mean, 0.0);
        assert_eq!(strict.release_press_std_dev, 0.0);
        // Positive distributions are untouched
        assert_eq!(strict.press_press_mean, 100.0);
    }

    #[test]
    fn test_rerun_on_same_events_is_identical() {
        let mut events = Vec::new();
        events.extend(tap("h", 0.0, 90.0));
        events.extend(tap("i", 140.0, 220.0));
        events.extend(tap("!", 400.0, 470.0));

        let first = extract_session_features(&events).unwrap();
        let second = extract_session_features(&events).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_vector_serializes_all_nine_fields() {
        let mut events = Vec::new();
        events.extend(tap("a", 0.0, 100.0));
        events.extend(tap("b", 200.0, 340.0));
        let features = extract_session_features(&events).unwrap();

        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 9);
        assert_eq!(json["error_key_count"], 0);
    }
}
