//! Search input debouncing.
//!
//! Input settles for [`SEARCH_DEBOUNCE`] before it is emitted, and a value
//! equal to the last emitted one is swallowed. Emission only starts a new
//! request; it never cancels one already in flight.

use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    last_emitted: Option<String>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: None,
        }
    }

    /// Record a keystroke; restarts the quiet period.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now));
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// The settled value, if the quiet period has passed and it differs from
    /// the previous emission.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let due = self.deadline().is_some_and(|deadline| now >= deadline);
        if !due {
            return None;
        }
        let (value, _) = self.pending.take()?;
        if self.last_emitted.as_deref() == Some(value.as_str()) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }
}
