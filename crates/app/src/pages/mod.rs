//! Page controllers: the behavior behind the list and form screens, free of
//! any rendering.

pub mod form;
pub mod list;

pub use form::{BackendVerifier, FormPage, SubmitError};
pub use list::{ListPage, PAGE_SIZES, TrackKey, track_by};

#[cfg(test)]
pub(crate) mod testing;
