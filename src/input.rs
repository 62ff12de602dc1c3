use std::time::{Duration, Instant};

/// One physical input line, sampled once per loop tick.
pub trait InputPin {
    fn is_high(&mut self) -> bool;
}

/// Discrete event produced by a debounced line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed,
}

/// Converts noisy digital samples into at most one event per press. A raw
/// change starts a candidate window; the new level must hold for the whole
/// window before it commits, and only a low-to-high commit emits. Pulses
/// shorter than the window emit nothing, and holding the line high emits
/// nothing further.
#[derive(Debug)]
pub struct DebouncedButton {
    raw_sample: bool,
    stable_state: bool,
    last_transition_time: Instant,
    window: Duration,
}

impl DebouncedButton {
    pub fn new(window: Duration) -> Self {
        Self {
            raw_sample: false,
            stable_state: false,
            last_transition_time: Instant::now(),
            window,
        }
    }

    /// Feed one raw sample. Returns an event only on the tick where a
    /// press commits.
    pub fn sample(&mut self, raw: bool, now: Instant) -> Option<ButtonEvent> {
        if raw != self.raw_sample {
            self.raw_sample = raw;
            self.last_transition_time = now;
        }

        if raw != self.stable_state
            && now.duration_since(self.last_transition_time) >= self.window
        {
            self.stable_state = raw;
            if raw {
                return Some(ButtonEvent::Pressed);
            }
        }
        None
    }

    pub fn stable_state(&self) -> bool {
        self.stable_state
    }
}
