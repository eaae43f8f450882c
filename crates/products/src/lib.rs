//! `catalog-products`: the product record and its editing rules.
//!
//! - `product`: wire/domain model and list pages
//! - `dates`: release/revision calendar rules
//! - `form`: editable form state with field and cross-field validation

pub mod dates;
pub mod form;
pub mod product;
pub mod validation;

pub use dates::{parse_iso_date, revision_for, today_local, validate_release};
pub use form::{FormMode, IdVerifier, ProductForm};
pub use product::{Product, ProductPage};
pub use validation::{Field, FieldError, FormErrors};
