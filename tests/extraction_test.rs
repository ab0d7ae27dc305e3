//! End-to-end tests for the extraction pipeline.

use keystroke_dynamics::{
    digraphs_from_events, extract_session_features, ChannelEventSource, DigraphRecord, RawEvent,
    SessionTracker,
};
use std::sync::{Arc, Mutex};

/// Simulate typing a string: each character pressed 60ms after the previous
/// release, held for 80ms.
fn typed_events(text: &str) -> Vec<RawEvent> {
    let mut events = Vec::new();
    let mut clock = 0.0;
    for ch in text.chars() {
        let key = ch.to_string();
        events.push(RawEvent::press(key.clone(), clock));
        events.push(RawEvent::release(key, clock + 80.0));
        clock += 140.0;
    }
    events
}

#[test]
fn test_full_pipeline_over_typed_phrase() {
    let events = typed_events("hello");

    let mut source = ChannelEventSource::new();
    source.start().unwrap();
    let injector = source.injector();
    for event in &events {
        assert!(injector.push(event.clone()));
    }
    source.stop();

    let streamed = Arc::new(Mutex::new(Vec::new()));
    let sink_records = streamed.clone();

    let mut tracker = SessionTracker::new();
    tracker.subscribe(move |record: &DigraphRecord| {
        sink_records.lock().unwrap().push(record.clone());
    });
    tracker.start_tracking();
    tracker.drain(&source);

    // 5 keystrokes form 4 digraphs
    let streamed = streamed.lock().unwrap().clone();
    assert_eq!(streamed.len(), 4);
    for record in &streamed {
        assert_eq!(record.digraph_time_ms, 140.0);
        assert_eq!(record.current_hold_ms, 80.0);
    }

    let features = tracker.stop_and_extract().unwrap();
    assert_eq!(features.hold_time_mean, 80.0);
    assert_eq!(features.hold_time_std_dev, 0.0);
    assert_eq!(features.press_press_mean, 140.0);
    assert_eq!(features.release_press_mean, 60.0);
    assert_eq!(features.error_key_count, 0);
}

#[test]
fn test_streaming_and_batch_digraphs_agree_on_ordered_input() {
    let events = typed_events("rhythm");

    let streamed = Arc::new(Mutex::new(Vec::new()));
    let sink_records = streamed.clone();

    let mut tracker = SessionTracker::new();
    tracker.subscribe(move |record: &DigraphRecord| {
        sink_records.lock().unwrap().push(record.clone());
    });
    tracker.start_tracking();
    for event in events.clone() {
        tracker.handle_event(event);
    }
    tracker.stop_tracking();

    let batch = digraphs_from_events(&events);
    assert_eq!(*streamed.lock().unwrap(), batch);
}

#[test]
fn test_batch_tolerates_out_of_order_release_delivery() {
    // Overlapped typing: releases complete in a different order than presses
    let events = vec![
        RawEvent::press("t", 0.0),
        RawEvent::press("h", 95.0),
        RawEvent::release("h", 160.0),
        RawEvent::release("t", 180.0),
        RawEvent::press("e", 230.0),
        RawEvent::release("e", 310.0),
    ];

    let records = digraphs_from_events(&events);
    assert_eq!(records.len(), 2);
    // Chronological reconstruction: t -> h -> e by press time
    assert_eq!(records[0].digraph_time_ms, 95.0);
    assert_eq!(records[1].digraph_time_ms, 135.0);

    let features = extract_session_features(&events).unwrap();
    // rp samples: 95 - 180 = -85 (overlap), 230 - 160 = 70
    assert!((features.release_press_mean - (-7.5)).abs() < 1e-9);
}

#[test]
fn test_noisy_input_is_absorbed_not_raised() {
    let mut events = vec![
        RawEvent::release("ghost", 1.0), // orphan release
        RawEvent::press("a", 10.0),
        RawEvent::press("a", 40.0), // auto-repeat press
    ];
    events.push(RawEvent::release("a", 120.0));
    events.push(RawEvent::press("Backspace", 200.0));
    events.push(RawEvent::release("Backspace", 270.0));

    let features = extract_session_features(&events).unwrap();
    assert_eq!(features.error_key_count, 1);
    // First-press-wins kept the 10.0 press time
    assert_eq!(features.hold_time_mean, (110.0 + 70.0) / 2.0);
}

#[test]
fn test_independent_trackers_share_nothing() {
    let mut first = SessionTracker::new();
    let mut second = SessionTracker::new();
    assert_ne!(first.session_id(), second.session_id());

    first.start_tracking();
    second.start_tracking();

    first.handle_event(RawEvent::press("a", 0.0));
    // The release lands on the other tracker; neither completes a keystroke
    second.handle_event(RawEvent::release("a", 100.0));

    assert!(first.stop_and_extract().is_none());
    assert!(second.stop_and_extract().is_none());
}
