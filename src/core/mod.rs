//! Core extraction pipeline.
//!
//! This module contains:
//! - Key symbol mapping to a fixed 50-symbol alphabet
//! - Press/release pairing into completed keystrokes
//! - Digraph formation (streaming and batch)
//! - Session-level statistical feature extraction

pub mod digraph;
pub mod features;
pub mod keymap;
pub mod pairing;

// Re-export commonly used types
pub use digraph::{digraphs_from_events, DigraphRecord, DigraphStream, TimingPolicy, MIN_RAW_EVENTS};
pub use features::{
    extract_session_features, extract_session_features_with, SessionFeatureVector, MIN_KEYSTROKES,
};
pub use keymap::{is_error_key, key_code, KeyCode, BACKSPACE_KEY, MAX_KEY_CODE, UNKNOWN_KEY};
pub use pairing::{pair_events, sort_by_press_time, Keystroke, KeystrokePairer};
