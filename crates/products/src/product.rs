use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use catalog_core::{DomainResult, Entity, ProductId};

use crate::dates::revision_for;

/// A catalog product (banking product record).
///
/// `date_revision` always sits one year after `date_release`; construct through
/// [`Product::new`] or [`Product::with_release`] to keep that coupling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub logo: String,
    #[serde(with = "iso_date")]
    pub date_release: NaiveDate,
    #[serde(with = "iso_date")]
    pub date_revision: NaiveDate,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        description: impl Into<String>,
        logo: impl Into<String>,
        date_release: NaiveDate,
    ) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: name.into(),
            description: description.into(),
            logo: logo.into(),
            date_release,
            date_revision: revision_for(date_release)?,
        })
    }

    /// Same product with a new release date and the matching revision date.
    pub fn with_release(mut self, date_release: NaiveDate) -> DomainResult<Self> {
        self.date_revision = revision_for(date_release)?;
        self.date_release = date_release;
        Ok(self)
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` is expected lowercased and trimmed; an empty needle matches.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// One page of products as returned by `GET /products`.
///
/// The backend answers either with a bare array (total = its length) or with
/// `{ "items": [...], "total": n }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: usize,
}

impl ProductPage {
    pub fn new(items: Vec<Product>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

impl<'de> Deserialize<'de> for ProductPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(Vec<Product>),
            Paged {
                items: Vec<Product>,
                total: Option<usize>,
            },
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(items) => ProductPage::new(items),
            Wire::Paged { items, total } => {
                let total = total.unwrap_or(items.len());
                ProductPage { items, total }
            }
        })
    }
}

/// `YYYY-MM-DD` on the wire. Timestamps such as `2025-01-01T00:00:00.000Z`
/// are accepted on input and truncated to their date.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        crate::dates::parse_iso_date(&raw).map_err(D::Error::custom)
    }
}
