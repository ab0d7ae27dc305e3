//! Keystroke Dynamics - behavioral-biometric timing feature extraction.
//!
//! This library derives timing features from raw keyboard press/release
//! events for use by a downstream anomaly/authenticity scorer. It pairs
//! events into keystrokes, forms digraphs over consecutive keystroke pairs,
//! and computes session-level timing statistics.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Keystroke Dynamics Core                  │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐   ┌────────────┐   ┌───────────────────┐    │
//! │  │   Event    │──▶│  Session   │──▶│  Keystroke Pairer │    │
//! │  │   Source   │   │  Tracker   │   └─────────┬─────────┘    │
//! │  └────────────┘   └────────────┘             │              │
//! │                            ┌─────────────────┴──────┐       │
//! │                            ▼                        ▼       │
//! │                   ┌─────────────────┐   ┌─────────────────┐ │
//! │                   │ Digraph Stream  │   │    Session      │ │
//! │                   │  (per record)   │   │   Features      │ │
//! │                   └─────────────────┘   │    (batch)      │ │
//! │                                         └─────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Capturing events from an input surface, scoring feature vectors, and
//! persisting model parameters are external collaborators; nothing in this
//! crate does I/O beyond log events.
//!
//! # Example
//!
//! ```
//! use keystroke_dynamics::{RawEvent, SessionTracker};
//!
//! let mut tracker = SessionTracker::new();
//! tracker.subscribe(|digraph| println!("digraph: {digraph:?}"));
//!
//! tracker.start_tracking();
//! tracker.handle_event(RawEvent::press("a", 0.0));
//! tracker.handle_event(RawEvent::release("a", 100.0));
//! tracker.handle_event(RawEvent::press("b", 200.0));
//! tracker.handle_event(RawEvent::release("b", 340.0));
//!
//! let features = tracker.stop_and_extract();
//! assert!(features.is_some());
//! ```

pub mod config;
pub mod core;
pub mod session;
pub mod source;

// Re-export key types at crate root for convenience
pub use config::ExtractorConfig;
pub use core::{
    digraphs_from_events, extract_session_features, extract_session_features_with, key_code,
    DigraphRecord, DigraphStream, Keystroke, KeystrokePairer, SessionFeatureVector, TimingPolicy,
};
pub use session::{DigraphSubscription, SessionTracker};
pub use source::{ChannelEventSource, EventInjector, KeyEventKind, RawEvent, SourceError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
