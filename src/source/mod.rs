//! Event source boundary for the extraction core.
//!
//! The core consumes raw key transitions pushed by an external capture
//! layer. This module defines the event types and a channel-backed bridge
//! so capture and extraction stay decoupled.

pub mod channel;
pub mod types;

// Re-export commonly used types
pub use channel::{ChannelEventSource, EventInjector, SourceError};
pub use types::{KeyEventKind, RawEvent};
