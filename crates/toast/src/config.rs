//! Toast display configuration and the duration policy.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;

use crate::kind::{ToastEvent, ToastKind};

/// Values below this are read as seconds rather than milliseconds.
const SECONDS_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Fallback display time in milliseconds.
    pub default_ms: u64,
    /// Display time per kind, in milliseconds.
    pub per_kind: HashMap<ToastKind, u64>,
    /// Visible toasts kept at once; older ones are evicted.
    pub max_toasts: usize,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            default_ms: 3500,
            per_kind: HashMap::from([
                (ToastKind::Success, 2500),
                (ToastKind::Info, 3500),
                (ToastKind::Warning, 4500),
                (ToastKind::Error, 6000),
            ]),
            max_toasts: 5,
        }
    }
}

impl ToastConfig {
    /// Display time for an event: explicit duration, else the kind's default,
    /// else the global default, then normalized.
    pub fn duration_for(&self, event: &ToastEvent) -> Duration {
        let raw = event
            .duration_ms
            .or_else(|| self.per_kind.get(&event.kind).map(|ms| *ms as f64))
            .unwrap_or(self.default_ms as f64);
        normalize_duration(raw, self.default_ms)
    }
}

/// Interpret a raw duration.
///
/// Non-finite or non-positive values fall back to `default_ms`; values under
/// 100 are seconds; anything else is milliseconds.
pub fn normalize_duration(raw: f64, default_ms: u64) -> Duration {
    if !raw.is_finite() || raw <= 0.0 {
        return Duration::from_millis(default_ms);
    }
    let ms = if raw < SECONDS_THRESHOLD { raw * 1000.0 } else { raw };
    Duration::from_millis((ms.round() as u64).max(1))
}
