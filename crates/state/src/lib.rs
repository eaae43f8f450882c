//! `catalog-state`: client-side state for the product catalog.
//!
//! State transitions are pure (`reducer`); the store (`store`) sequences them
//! around backend calls and publishes every new state to its subscribers.

pub mod reducer;
pub mod store;
pub mod view;

pub use reducer::{Action, LoadStatus, ProductsState, reduce};
pub use store::{DEFAULT_PAGE_SIZE, LOAD_FAILED, ProductsStore, REMOVE_FAILED};
pub use view::ProductsView;
