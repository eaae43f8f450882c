//! Terminal toast renderer.

use std::time::Duration;

use chrono::{DateTime, Utc};

use catalog_events::Subscription;
use catalog_toast::{ToastConfig, ToastEvent, ToastItem, ToastList, ToastService};

/// Longest wait between polls; toasts arrive without a wake-up.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Owns one toast subscription and the list it feeds.
pub struct ToastPrinter {
    subscription: Subscription<ToastEvent>,
    list: ToastList,
}

impl ToastPrinter {
    pub fn new(service: &ToastService, config: ToastConfig) -> Self {
        Self {
            subscription: service.subscribe(),
            list: ToastList::new(config),
        }
    }

    pub fn visible(&self) -> &[ToastItem] {
        self.list.items()
    }

    /// Dismiss elapsed toasts, take in newly published ones, and return the
    /// lines to print for the new arrivals, oldest first.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Vec<String> {
        for gone in self.list.expire(now) {
            tracing::debug!(id = %gone.id, kind = gone.kind.as_str(), "toast dismissed");
        }

        let fresh = self.list.pump(&self.subscription, now).min(self.list.items().len());
        self.list.items()[..fresh]
            .iter()
            .rev()
            .map(|toast| format!("[{}] {}", toast.kind.as_str(), toast.message))
            .collect()
    }

    /// How long to sleep before the next poll.
    pub fn wait(&self, now: DateTime<Utc>) -> Duration {
        self.list
            .next_deadline()
            .and_then(|deadline| (deadline - now).to_std().ok())
            .map_or(POLL_INTERVAL, |until| until.min(POLL_INTERVAL))
    }
}
