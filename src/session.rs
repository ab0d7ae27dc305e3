//! Session tracking: the composition root of the extraction core.
//!
//! A [`SessionTracker`] owns one tracking session's state: the pending-press
//! map, the streaming digraph reference, and the captured raw event
//! sequence. Each session (or concurrent batch extraction) gets its own
//! instance; nothing here is shared or global.
//!
//! Precondition for the streaming path: events are pushed in non-decreasing
//! timestamp order. The batch entry point sorts internally and tolerates
//! out-of-order delivery.

use crate::config::ExtractorConfig;
use crate::core::digraph::{DigraphRecord, DigraphStream};
use crate::core::features::{extract_session_features_with, SessionFeatureVector};
use crate::core::pairing::KeystrokePairer;
use crate::source::channel::ChannelEventSource;
use crate::source::types::{KeyEventKind, RawEvent};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

type DigraphSink = Box<dyn FnMut(&DigraphRecord) + Send>;

/// Handle for a registered digraph sink.
///
/// Dropping the subscription does not detach the sink; call
/// [`cancel`](Self::cancel) to stop delivery.
#[derive(Clone)]
pub struct DigraphSubscription {
    active: Arc<AtomicBool>,
}

impl DigraphSubscription {
    /// Detach the sink. Cancelled sinks are pruned on the next dispatch.
    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Owns one tracking session and drives the extraction pipeline.
pub struct SessionTracker {
    session_id: Uuid,
    started_at: Option<DateTime<Utc>>,
    tracking: bool,
    events: Vec<RawEvent>,
    pairer: KeystrokePairer,
    stream: DigraphStream,
    sinks: Vec<(Arc<AtomicBool>, DigraphSink)>,
    config: ExtractorConfig,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: None,
            tracking: false,
            events: Vec::new(),
            pairer: KeystrokePairer::new(),
            stream: DigraphStream::with_policy(config.streaming_policy),
            sinks: Vec::new(),
            config,
        }
    }

    /// Unique identifier for this tracker instance.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Wall-clock start of the current session, if tracking.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Begin a tracking session. No-op if one is already active.
    ///
    /// Any state left over from a previous session is cleared so sessions
    /// never leak into each other.
    pub fn start_tracking(&mut self) {
        if self.tracking {
            return;
        }
        self.reset_session_state();
        self.tracking = true;
        self.started_at = Some(Utc::now());
        tracing::info!(session_id = %self.session_id, "tracking started");
    }

    /// End the tracking session and return the captured raw events.
    ///
    /// Pending presses and the streaming reference are discarded; no digraph
    /// is emitted after a stop. Returns an empty vector if not tracking.
    pub fn stop_tracking(&mut self) -> Vec<RawEvent> {
        if !self.tracking {
            return Vec::new();
        }
        self.tracking = false;
        self.started_at = None;
        let events = std::mem::take(&mut self.events);
        self.pairer.reset();
        self.stream.reset();
        tracing::info!(
            session_id = %self.session_id,
            event_count = events.len(),
            "tracking stopped"
        );
        events
    }

    /// Push interface for the external event source.
    ///
    /// Ignored unless tracking. A release that completes a keystroke may
    /// advance the digraph stream and fan a record out to subscribers.
    pub fn handle_event(&mut self, event: RawEvent) {
        if !self.tracking {
            return;
        }

        self.events.push(event.clone());

        match event.kind {
            KeyEventKind::Press => self.pairer.on_press(&event.key, event.timestamp_ms),
            KeyEventKind::Release => {
                if let Some(keystroke) = self.pairer.on_release(&event.key, event.timestamp_ms) {
                    if let Some(record) = self.stream.advance(keystroke) {
                        self.dispatch(&record);
                    }
                }
            }
        }
    }

    /// Drain all queued events from a channel source.
    pub fn drain(&mut self, source: &ChannelEventSource) {
        while let Some(event) = source.try_recv() {
            self.handle_event(event);
        }
    }

    /// Register a streaming digraph sink.
    ///
    /// Every validly formed digraph is delivered to each active sink, in
    /// registration order.
    pub fn subscribe<F>(&mut self, sink: F) -> DigraphSubscription
    where
        F: FnMut(&DigraphRecord) + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        self.sinks.push((active.clone(), Box::new(sink)));
        DigraphSubscription { active }
    }

    /// Stop tracking and run batch extraction over the captured events.
    ///
    /// Uses the configured batch policy. `None` when the session was too
    /// short to yield a feature vector.
    pub fn stop_and_extract(&mut self) -> Option<SessionFeatureVector> {
        let events = self.stop_tracking();
        extract_session_features_with(&events, self.config.batch_policy)
    }

    fn dispatch(&mut self, record: &DigraphRecord) {
        self.sinks.retain(|(active, _)| active.load(Ordering::SeqCst));
        for (_, sink) in self.sinks.iter_mut() {
            sink(record);
        }
    }

    fn reset_session_state(&mut self) {
        self.events.clear();
        self.pairer.reset();
        self.stream.reset();
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
