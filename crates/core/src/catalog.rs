//! Product catalogs.
//!
//! Three slots feed the page: the popular slider, the new-arrivals slider and
//! the single MD pick. Each slot can be overridden by a JSON value persisted
//! under a fixed key; an override replaces the built-in sample data wholesale.
//! Missing, unreadable and malformed overrides all fall back to the samples.

use serde::de::DeserializeOwned;

use crate::store::{KeyValueStore, load_json};
use crate::types::{Product, ProductId};

/// Maximum number of cards a slider shows; the "show more" modal lists all.
pub const SLIDER_LIMIT: usize = 6;

/// A catalog slot and its persisted override key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogSlot {
    Popular,
    New,
    MdPick,
}

impl CatalogSlot {
    /// Every slot, in page order.
    pub const ALL: [Self; 3] = [Self::MdPick, Self::Popular, Self::New];

    /// Storage key holding the slot's override.
    #[must_use]
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Popular => "vibeBagshopProducts",
            Self::New => "vibeBagshopNewProducts",
            Self::MdPick => "vibeBagshopMDProduct",
        }
    }
}

/// The three catalogs for one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub popular: Vec<Product>,
    pub new_arrivals: Vec<Product>,
    pub md_pick: Product,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            popular: sample_popular(),
            new_arrivals: sample_new_arrivals(),
            md_pick: sample_md_pick(),
        }
    }
}

impl Catalog {
    /// Resolve every slot against `store`, falling back per slot.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            popular: load_slot(store, CatalogSlot::Popular).unwrap_or_else(sample_popular),
            new_arrivals: load_slot(store, CatalogSlot::New).unwrap_or_else(sample_new_arrivals),
            md_pick: load_slot(store, CatalogSlot::MdPick).unwrap_or_else(sample_md_pick),
        }
    }

    /// Products shown in a slot's slider.
    #[must_use]
    pub fn slider(&self, slot: CatalogSlot) -> &[Product] {
        let list = self.list(slot);
        list.get(..SLIDER_LIMIT).unwrap_or(list)
    }

    /// Every product in a slot.
    #[must_use]
    pub fn list(&self, slot: CatalogSlot) -> &[Product] {
        match slot {
            CatalogSlot::Popular => &self.popular,
            CatalogSlot::New => &self.new_arrivals,
            CatalogSlot::MdPick => core::slice::from_ref(&self.md_pick),
        }
    }
}

/// Read one override; `None` means "use the samples".
fn load_slot<T, S>(store: &S, slot: CatalogSlot) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match load_json(store, slot.storage_key()) {
        Ok(value) => {
            if value.is_some() {
                tracing::debug!(slot = ?slot, "using persisted catalog override");
            }
            value
        }
        Err(e) => {
            tracing::warn!(slot = ?slot, error = %e, "ignoring catalog override");
            None
        }
    }
}

// =============================================================================
// Sample Data
// =============================================================================

fn placeholder_image(label: &str) -> Option<String> {
    Some(format!(
        "https://via.placeholder.com/300x300/ddd/999?text={label}"
    ))
}

fn sample(id: i64, name: &str, price: &str, desc: &str, label: &str) -> Product {
    Product::new(
        ProductId::new(id),
        name,
        price,
        desc,
        placeholder_image(label),
    )
}

fn sample_popular() -> Vec<Product> {
    vec![
        sample(
            1,
            "Vibe Tote",
            "₩149,000",
            "An everyday tote that works for the office and the weekend. Water resistant with generous storage.",
            "Tote",
        ),
        sample(
            2,
            "Curve Cross",
            "₩119,000",
            "A crossbody with a signature curved line. Light and comfortable to wear.",
            "Cross",
        ),
        sample(
            3,
            "Mini Clutch",
            "₩89,000",
            "A mini clutch for parties and meetings, sized for the essentials.",
            "Clutch",
        ),
        sample(
            4,
            "Weekender",
            "₩229,000",
            "A weekender for short trips with room to spare and a clean silhouette.",
            "Weekender",
        ),
        sample(
            5,
            "Sling Bag",
            "₩99,000",
            "A sling for an active day that stays out of the way.",
            "Sling",
        ),
        sample(
            6,
            "Bucket Hat",
            "₩79,000",
            "A trend-forward bucket bag that suits casual and formal looks alike.",
            "Bucket",
        ),
        sample(
            7,
            "Travel Set",
            "₩179,000",
            "A travel organizer set that keeps the essentials in order.",
            "Travel",
        ),
        sample(
            8,
            "Pouch Trio",
            "₩59,000",
            "Three pouches for cosmetics, small items and electronics.",
            "Pouch",
        ),
    ]
}

fn sample_new_arrivals() -> Vec<Product> {
    vec![
        sample(101, "Neo Mini", "₩99,000", "A minimal new mini bag.", "Neo+Mini"),
        sample(
            102,
            "Arc Tote",
            "₩159,000",
            "A tote defined by its arched lines.",
            "Arc+Tote",
        ),
        sample(
            103,
            "Luna Clutch",
            "₩79,000",
            "A clutch with a soft moonlit sheen.",
            "Luna+Clutch",
        ),
        sample(
            104,
            "Flex Cross",
            "₩119,000",
            "Supple materials and an easy fit.",
            "Flex+Cross",
        ),
        sample(
            105,
            "Pod Set",
            "₩69,000",
            "A pouch set built for small things.",
            "Pod+Set",
        ),
        sample(
            106,
            "Wave Bag",
            "₩139,000",
            "A distinctive wave-shaped design.",
            "Wave+Bag",
        ),
        sample(
            107,
            "Cube Pouch",
            "₩49,000",
            "A square, cube-shaped pouch.",
            "Cube+Pouch",
        ),
        sample(
            108,
            "Ring Bag",
            "₩89,000",
            "A bag finished with a ring accent.",
            "Ring+Bag",
        ),
    ]
}

fn sample_md_pick() -> Product {
    sample(
        999,
        "VIBE Curve Mini",
        "₩189,000",
        "A color that shifts with the light and a silhouette that fits the hand.",
        "MD+Curve",
    )
}
