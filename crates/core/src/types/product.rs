//! Product records.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as shown on the page and persisted in local storage.
///
/// The JSON shape matches the persisted catalogs:
/// `{"id": 1, "name": "Vibe Tote", "price": "₩149,000", "desc": "…", "image": "https://…"}`.
/// `desc` may be absent, `image` may be absent or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Create a product record.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: impl Into<Price>,
        desc: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price: price.into(),
            desc: desc.into(),
            image,
        }
    }

    /// Build a product from text currently displayed on the page.
    ///
    /// The result does not refer back to any catalog record: whatever is on
    /// screen is what gets added, under the given (usually timestamp) id.
    #[must_use]
    pub fn from_display(id: ProductId, snapshot: DisplaySnapshot) -> Self {
        Self {
            id,
            name: snapshot.name,
            price: Price::new(snapshot.price),
            desc: snapshot.desc,
            image: snapshot.image.filter(|src| !src.is_empty()),
        }
    }
}

/// Text and image source read back from rendered markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub name: String,
    pub price: String,
    pub desc: String,
    pub image: Option<String>,
}
