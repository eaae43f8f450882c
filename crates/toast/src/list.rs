//! Visible toast list (renderer state).
//!
//! Time is passed in by the caller, so display and dismissal are driven by
//! whatever loop owns the renderer.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use catalog_events::Subscription;

use crate::config::ToastConfig;
use crate::kind::{ToastEvent, ToastKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ToastItem {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

impl ToastItem {
    /// `None` when the duration is too large to represent (never expires).
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let delta = TimeDelta::from_std(self.duration).ok()?;
        self.created_at.checked_add_signed(delta)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }
}

/// Newest-first, bounded list of visible toasts.
#[derive(Debug, Clone, Default)]
pub struct ToastList {
    config: ToastConfig,
    items: Vec<ToastItem>,
}

impl ToastList {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[ToastItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Show a toast. The oldest ones beyond `max_toasts` are evicted.
    pub fn push(&mut self, event: ToastEvent, now: DateTime<Utc>) -> Uuid {
        let item = ToastItem {
            id: Uuid::now_v7(),
            kind: event.kind,
            duration: self.config.duration_for(&event),
            message: event.message,
            created_at: now,
        };
        let id = item.id;

        self.items.insert(0, item);
        self.items.truncate(self.config.max_toasts);
        id
    }

    /// Move every pending bus event into the list. Returns how many arrived.
    pub fn pump(&mut self, subscription: &Subscription<ToastEvent>, now: DateTime<Utc>) -> usize {
        let events = subscription.drain();
        let count = events.len();
        for event in events {
            self.push(event, now);
        }
        count
    }

    /// Drop toasts whose display time has elapsed; returns them.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<ToastItem> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| item.is_expired(now));
        self.items = kept;
        expired
    }

    /// Earliest moment a visible toast is due to disappear.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.items.iter().filter_map(ToastItem::expires_at).min()
    }

    pub fn close(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}
