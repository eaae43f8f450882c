//! `catalog-app`: wiring, navigation and page controllers for the products
//! catalog, plus the `catalog` command-line front-end.

pub mod config;
pub mod confirm;
pub mod context;
pub mod debounce;
pub mod files;
pub mod pages;
pub mod routes;
pub mod toasts;

pub use config::{AppConfig, ConfigError};
pub use confirm::ConfirmDialog;
pub use context::{Catalog, HttpBackend};
pub use debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
pub use pages::{FormPage, ListPage, SubmitError, TrackKey};
pub use routes::Route;
pub use toasts::ToastPrinter;
