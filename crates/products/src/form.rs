//! Editable product form.
//!
//! Holds raw text values the way an input form does, validates them per field,
//! and keeps `date_revision` derived from `date_release` on every change.
//! `id` and `date_revision` are read-only for the user.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use catalog_core::{DomainResult, ProductId};

use crate::dates::{parse_iso_date, revision_for, validate_release};
use crate::product::Product;
use crate::validation::{Field, FieldError, FormErrors};

const NAME_LEN: (usize, usize) = (6, 100);
const DESCRIPTION_LEN: (usize, usize) = (10, 200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Asks the backend whether an id is already in use.
#[async_trait]
pub trait IdVerifier: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn id_exists(&self, id: &ProductId) -> Result<bool, Self::Error>;
}

#[derive(Debug, Clone)]
pub struct ProductForm {
    mode: FormMode,
    id: String,
    name: String,
    description: String,
    logo: String,
    date_release: String,
    date_revision: String,
    touched: BTreeSet<Field>,
    id_taken: bool,
}

impl ProductForm {
    /// Blank form for a new product, with a freshly generated id.
    pub fn for_create() -> Self {
        Self {
            mode: FormMode::Create,
            id: ProductId::generate().into_inner(),
            name: String::new(),
            description: String::new(),
            logo: String::new(),
            date_release: String::new(),
            date_revision: String::new(),
            touched: BTreeSet::new(),
            id_taken: false,
        }
    }

    /// Form patched with an existing product.
    pub fn for_edit(product: &Product) -> Self {
        Self {
            mode: FormMode::Edit,
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            logo: product.logo.clone(),
            date_release: product.date_release.format("%Y-%m-%d").to_string(),
            date_revision: product.date_revision.format("%Y-%m-%d").to_string(),
            touched: BTreeSet::new(),
            id_taken: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        self.mode == FormMode::Edit
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::Logo => &self.logo,
            Field::DateRelease => &self.date_release,
            Field::DateRevision => &self.date_revision,
        }
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.touched.insert(Field::Name);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
        self.touched.insert(Field::Description);
    }

    pub fn set_logo(&mut self, value: impl Into<String>) {
        self.logo = value.into();
        self.touched.insert(Field::Logo);
    }

    /// Sets the release date and recomputes the revision date from it.
    ///
    /// An unparseable value clears the revision date.
    pub fn set_date_release(&mut self, value: impl Into<String>) {
        self.date_release = value.into();
        self.touched.insert(Field::DateRelease);

        self.date_revision = parse_iso_date(&self.date_release)
            .and_then(revision_for)
            .map(|revision| revision.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
    }

    /// Logo URL to preview, if one is set.
    pub fn logo_preview(&self) -> Option<&str> {
        Some(self.logo.as_str()).filter(|logo| !logo.is_empty())
    }

    /// Every failing field, first rule per field.
    pub fn errors(&self, today: NaiveDate) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.id.trim().is_empty() {
            errors.insert(Field::Id, FieldError::Required);
        } else if self.id_taken {
            errors.insert(Field::Id, FieldError::IdTaken);
        }

        if let Some(error) = check_text(&self.name, NAME_LEN) {
            errors.insert(Field::Name, error);
        }
        if let Some(error) = check_text(&self.description, DESCRIPTION_LEN) {
            errors.insert(Field::Description, error);
        }
        if self.logo.is_empty() {
            errors.insert(Field::Logo, FieldError::Required);
        }

        if self.date_release.is_empty() {
            errors.insert(Field::DateRelease, FieldError::Required);
        } else {
            match parse_iso_date(&self.date_release) {
                Ok(release) => {
                    if let Err(error) = validate_release(release, today) {
                        errors.insert(Field::DateRelease, error);
                    }
                }
                Err(_) => errors.insert(Field::DateRelease, FieldError::InvalidDate),
            }
        }

        if self.date_revision.is_empty() {
            errors.insert(Field::DateRevision, FieldError::Required);
        }

        errors
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), FormErrors> {
        let errors = self.errors(today);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn is_valid(&self, today: NaiveDate) -> bool {
        self.errors(today).is_empty()
    }

    /// Asynchronous uniqueness check for the id of a new product.
    ///
    /// Returns whether the id is free. In edit mode the id belongs to the
    /// record being edited, so no request is made. A blank id is never free.
    pub async fn check_id_available<V>(&mut self, verifier: &V) -> Result<bool, V::Error>
    where
        V: IdVerifier + ?Sized,
    {
        if self.is_edit() {
            self.id_taken = false;
            return Ok(true);
        }

        let Ok(id) = ProductId::new(self.id.clone()) else {
            return Ok(false);
        };

        let exists = verifier.id_exists(&id).await?;
        if exists {
            tracing::debug!(%id, "product id already taken");
        }
        self.id_taken = exists;
        Ok(!exists)
    }

    /// Product built from the raw values, read-only fields included.
    pub fn to_product(&self) -> DomainResult<Product> {
        Ok(Product {
            id: ProductId::new(self.id.clone())?,
            name: self.name.clone(),
            description: self.description.clone(),
            logo: self.logo.clone(),
            date_release: parse_iso_date(&self.date_release)?,
            date_revision: parse_iso_date(&self.date_revision)?,
        })
    }

    /// Clears the form for another new product. Edit forms are left alone.
    pub fn reset(&mut self) {
        if self.is_edit() {
            return;
        }
        *self = Self::for_create();
    }
}

fn check_text(value: &str, (min, max): (usize, usize)) -> Option<FieldError> {
    let len = value.chars().count();
    if len == 0 {
        Some(FieldError::Required)
    } else if len < min {
        Some(FieldError::TooShort { min })
    } else if len > max {
        Some(FieldError::TooLong { max })
    } else {
        None
    }
}
