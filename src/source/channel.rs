//! Channel-backed bridge between an external event source and the core.
//!
//! The capture layer (platform hook, browser bridge, replay harness) is an
//! external collaborator. It gets an [`EventInjector`] handle and pushes one
//! [`RawEvent`] per physical key transition; the session tracker drains the
//! receiving side. No events are accepted while the source is stopped.

use crate::source::types::RawEvent;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Errors that can occur on the event source boundary.
#[derive(Debug)]
pub enum SourceError {
    AlreadyRunning,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::AlreadyRunning => write!(f, "Event source is already running"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Write handle given to the capture layer.
///
/// Cheap to clone; every clone feeds the same source.
#[derive(Clone)]
pub struct EventInjector {
    sender: Sender<RawEvent>,
    running: Arc<AtomicBool>,
}

impl EventInjector {
    /// Push one event into the source.
    ///
    /// Returns `false` if the source is stopped or the channel is full; the
    /// event is dropped in either case. The input surface is inherently racy,
    /// so losing an event here is absorbed rather than surfaced.
    pub fn push(&self, event: RawEvent) -> bool {
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }
        self.sender.try_send(event).is_ok()
    }
}

/// Bounded-channel event source.
pub struct ChannelEventSource {
    sender: Sender<RawEvent>,
    receiver: Receiver<RawEvent>,
    running: Arc<AtomicBool>,
}

impl ChannelEventSource {
    /// Create a source with the default channel capacity.
    pub fn new() -> Self {
        Self::with_capacity(crate::config::DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a source with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start accepting events.
    pub fn start(&mut self) -> Result<(), SourceError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(SourceError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);
        tracing::debug!("event source started");
        Ok(())
    }

    /// Stop accepting events. Events already queued stay drainable.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        tracing::debug!("event source stopped");
    }

    /// Check if the source is currently accepting events.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Get an injector handle for the capture layer.
    pub fn injector(&self) -> EventInjector {
        EventInjector {
            sender: self.sender.clone(),
            running: self.running.clone(),
        }
    }

    /// Get the receiver for queued events.
    pub fn receiver(&self) -> &Receiver<RawEvent> {
        &self.receiver
    }

    /// Try to receive one event without blocking.
    pub fn try_recv(&self) -> Option<RawEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for ChannelEventSource {
    fn default() -> Self {
        Self::new()
    }
}
