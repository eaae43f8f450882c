//! `catalog-toast`: transient notifications.
//!
//! Producers call [`ToastService`]; each [`ToastList`] renderer drains its own
//! bus subscription and manages display and auto-dismiss.

pub mod config;
pub mod kind;
pub mod list;
pub mod service;

pub use config::{ToastConfig, normalize_duration};
pub use kind::{ToastEvent, ToastKind};
pub use list::{ToastItem, ToastList};
pub use service::ToastService;
