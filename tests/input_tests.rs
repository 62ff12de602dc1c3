use std::time::{Duration, Instant};

use spotify_remote_rs::{ButtonEvent, DebouncedButton};

const WINDOW: Duration = Duration::from_millis(20);

/// Sample `button` every `step_ms` from 0 to `until_ms` inclusive, treating
/// the raw line as high inside `[high_from_ms, high_until_ms)`. Returns the
/// number of press events seen.
fn run_pulse(
    button: &mut DebouncedButton,
    step_ms: u64,
    until_ms: u64,
    high_from_ms: u64,
    high_until_ms: u64,
) -> usize {
    let base = Instant::now();
    let mut events = 0;
    let mut at = 0;
    while at <= until_ms {
        let raw = at >= high_from_ms && at < high_until_ms;
        if button.sample(raw, base + Duration::from_millis(at)) == Some(ButtonEvent::Pressed) {
            events += 1;
        }
        at += step_ms;
    }
    events
}

#[test]
fn pulse_shorter_than_the_window_emits_nothing() {
    let mut button = DebouncedButton::new(WINDOW);
    let events = run_pulse(&mut button, 5, 100, 0, 10);
    assert_eq!(events, 0);
    assert!(!button.stable_state());
}

#[test]
fn pulse_longer_than_the_window_emits_exactly_once() {
    let mut button = DebouncedButton::new(WINDOW);
    let events = run_pulse(&mut button, 5, 100, 0, 30);
    assert_eq!(events, 1);
}

#[test]
fn tick_rate_does_not_change_the_event_count() {
    let mut coarse = DebouncedButton::new(WINDOW);
    let mut fine = DebouncedButton::new(WINDOW);

    assert_eq!(run_pulse(&mut coarse, 10, 100, 0, 30), 1);
    assert_eq!(run_pulse(&mut fine, 1, 100, 0, 30), 1);
}

#[test]
fn holding_the_button_does_not_re_emit() {
    let mut button = DebouncedButton::new(WINDOW);
    let events = run_pulse(&mut button, 5, 2_000, 0, 2_000);
    assert_eq!(events, 1);
    assert!(button.stable_state());
}

#[test]
fn each_full_press_emits_its_own_event() {
    let mut button = DebouncedButton::new(WINDOW);
    let base = Instant::now();
    let mut events = 0;

    // Two presses of 50ms separated by 50ms of silence
    for at in (0..200).step_by(5) {
        let raw = (at < 50) || (100..150).contains(&at);
        if button.sample(raw, base + Duration::from_millis(at)) == Some(ButtonEvent::Pressed) {
            events += 1;
        }
    }
    assert_eq!(events, 2);
}

#[test]
fn bouncy_edges_inside_the_window_are_ignored() {
    let mut button = DebouncedButton::new(WINDOW);
    let base = Instant::now();
    let mut events = 0;

    // Raw line chatters every 4ms for 16ms, then settles high
    let samples = [
        (0, true),
        (4, false),
        (8, true),
        (12, false),
        (16, true),
        (24, true),
        (32, true),
        (40, true),
        (60, true),
    ];
    for (at, raw) in samples {
        if button.sample(raw, base + Duration::from_millis(at)) == Some(ButtonEvent::Pressed) {
            events += 1;
        }
    }
    assert_eq!(events, 1);
}
