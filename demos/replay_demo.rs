//! Demonstration of the keystroke dynamics extraction pipeline.
//!
//! This example shows how to:
//! 1. Create an event source and session tracker
//! 2. Subscribe to streaming digraph records
//! 3. Replay a synthetic typing session through the push boundary
//! 4. Extract the session-level feature vector
//!
//! Run with: cargo run --example replay_demo

use keystroke_dynamics::{ChannelEventSource, RawEvent, SessionTracker, VERSION};

/// Synthesize a short typing session with a correction in the middle.
fn scripted_session() -> Vec<RawEvent> {
    let script = [
        ("h", 0.0, 85.0),
        ("e", 130.0, 210.0),
        ("l", 250.0, 335.0),
        ("p", 390.0, 460.0), // typo
        ("Backspace", 620.0, 700.0),
        ("l", 780.0, 860.0),
        ("o", 905.0, 990.0),
        ("!", 1150.0, 1240.0),
    ];

    script
        .iter()
        .flat_map(|(key, press, release)| {
            [
                RawEvent::press(*key, *press),
                RawEvent::release(*key, *release),
            ]
        })
        .collect()
}

fn main() {
    println!("Keystroke Dynamics - Replay Demo (v{VERSION})");
    println!("=============================================");
    println!();

    let mut source = ChannelEventSource::new();
    source.start().expect("source should not be running yet");
    let injector = source.injector();

    let mut tracker = SessionTracker::new();
    println!("Session ID: {}", tracker.session_id());
    println!();

    let subscription = tracker.subscribe(|record| {
        println!(
            "  digraph {:>2} -> {:>2}  dt={:>6.1}ms  holds={:>5.1}/{:>5.1}ms",
            record.previous_key,
            record.current_key,
            record.digraph_time_ms,
            record.previous_hold_ms,
            record.current_hold_ms,
        );
    });

    tracker.start_tracking();
    println!("Replaying scripted session...");

    for event in scripted_session() {
        injector.push(event);
    }
    source.stop();
    tracker.drain(&source);

    subscription.cancel();

    println!();
    match tracker.stop_and_extract() {
        Some(features) => {
            println!("Session feature vector:");
            println!("{}", serde_json::to_string_pretty(&features).unwrap());
        }
        None => println!("Session too short for feature extraction."),
    }

    println!();
    println!("Demo complete!");
}
