//! Field-level validation results for the product form.

use std::collections::BTreeMap;

use thiserror::Error;

/// Editable (or displayed) fields of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Id,
    Name,
    Description,
    Logo,
    DateRelease,
    DateRevision,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Description => "description",
            Field::Logo => "logo",
            Field::DateRelease => "date_release",
            Field::DateRevision => "date_revision",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First failing rule for a field. Messages are what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Este campo es requerido")]
    Required,

    #[error("Mínimo {min} caracteres")]
    TooShort { min: usize },

    #[error("Máximo {max} caracteres")]
    TooLong { max: usize },

    #[error("Fecha inválida")]
    InvalidDate,

    #[error("La fecha debe ser igual o mayor a la fecha actual")]
    ReleaseInPast,

    #[error("El ID ya existe")]
    IdTaken,
}

/// Validation failures keyed by field, one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} campo(s) inválido(s)", .0.len())]
pub struct FormErrors(BTreeMap<Field, FieldError>);

impl FormErrors {
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.entry(field).or_insert(error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}
