use std::sync::Arc;

use catalog_events::{EventBus, InMemoryEventBus, Subscription};

use crate::kind::{ToastEvent, ToastKind};

/// Emits toasts onto the shared bus. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ToastService {
    bus: Arc<InMemoryEventBus<ToastEvent>>,
}

impl ToastService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription<ToastEvent> {
        self.bus.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(ToastEvent::new(ToastKind::Success, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(ToastEvent::new(ToastKind::Error, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(ToastEvent::new(ToastKind::Info, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(ToastEvent::new(ToastKind::Warning, message));
    }

    pub fn success_for(&self, message: impl Into<String>, duration_ms: f64) {
        self.emit(ToastEvent::new(ToastKind::Success, message).with_duration(duration_ms));
    }

    pub fn error_for(&self, message: impl Into<String>, duration_ms: f64) {
        self.emit(ToastEvent::new(ToastKind::Error, message).with_duration(duration_ms));
    }

    pub fn info_for(&self, message: impl Into<String>, duration_ms: f64) {
        self.emit(ToastEvent::new(ToastKind::Info, message).with_duration(duration_ms));
    }

    pub fn warning_for(&self, message: impl Into<String>, duration_ms: f64) {
        self.emit(ToastEvent::new(ToastKind::Warning, message).with_duration(duration_ms));
    }

    pub fn emit(&self, event: ToastEvent) {
        tracing::debug!(kind = %event.kind, message = %event.message, "toast");
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!("failed to publish toast: {err:?}");
        }
    }
}
