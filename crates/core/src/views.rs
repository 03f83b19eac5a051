//! Display models for product cards and the detail modal.

use crate::types::{Price, Product, ProductId};

/// Glyph shown where a product has no image.
pub const PLACEHOLDER_GLYPH: &str = "🛍";

/// Image slot of a card, cart row or detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    Image { src: String, alt: String },
    Placeholder,
}

impl Thumbnail {
    /// The product's image, or the placeholder when it has none.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        match product.image.as_deref() {
            Some(src) if !src.trim().is_empty() => Self::Image {
                src: src.to_owned(),
                alt: product.name.clone(),
            },
            _ => Self::Placeholder,
        }
    }
}

/// A clickable product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub thumbnail: Thumbnail,
}

impl From<&Product> for CardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price.clone(),
            thumbnail: Thumbnail::for_product(product),
        }
    }
}

/// Contents of the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub name: String,
    pub price: Price,
    pub desc: String,
    pub image: Thumbnail,
}

impl From<&Product> for DetailView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.clone(),
            desc: product.desc.clone(),
            image: Thumbnail::for_product(product),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image_is_placeholder() {
        let product = Product::new(
            ProductId::new(1),
            "Tote",
            "₩1",
            "",
            Some("  ".to_string()),
        );
        assert_eq!(Thumbnail::for_product(&product), Thumbnail::Placeholder);
    }

    #[test]
    fn test_image_alt_is_name() {
        let product = Product::new(
            ProductId::new(1),
            "Tote",
            "₩1",
            "long text",
            Some("https://img.test/t.png".to_string()),
        );
        let detail = DetailView::from(&product);
        assert_eq!(detail.desc, "long text");
        assert_eq!(
            detail.image,
            Thumbnail::Image {
                src: "https://img.test/t.png".to_string(),
                alt: "Tote".to_string(),
            }
        );
    }
}
