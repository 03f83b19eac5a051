//! Shopping cart.
//!
//! [`Cart`] is the in-memory list of lines. [`CartEngine`] wraps it with the
//! store and the UI: every mutation is written through to the store in full,
//! then the badge and the cart panel are refreshed. The engine is the only
//! owner of the cart; callers go through its operations.
//!
//! # Persisted Shape
//!
//! Lines are stored as product objects with a `qty` field alongside:
//!
//! ```json
//! [{"id": 1, "name": "Vibe Tote", "price": "₩149,000", "desc": "…", "image": "…", "qty": 2}]
//! ```

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, load_json, save_json};
use crate::types::{Price, Product, ProductId};
use crate::views::Thumbnail;

/// Storage key for the cart.
pub const CART_STORAGE_KEY: &str = "vibeBagshopCart";

/// One product in the cart with its quantity.
///
/// The product is a snapshot taken when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub qty: u32,
}

impl CartLine {
    /// Identity of the line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// `qty × price`, saturating.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.product.price.amount().saturating_mul(u64::from(self.qty))
    }
}

/// Ordered cart lines, at most one per product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from persisted lines.
    ///
    /// Zero quantities are raised to 1 and repeated ids are merged into the
    /// first occurrence, so the usual invariants hold for hand-edited storage.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for mut line in lines {
            line.qty = line.qty.max(1);
            match cart.line_mut(line.id()) {
                Some(existing) => existing.qty = existing.qty.saturating_add(line.qty),
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    /// Add one unit: bump an existing line or append a new one.
    pub fn add(&mut self, product: Product) {
        match self.line_mut(product.id) {
            Some(line) => line.qty = line.qty.saturating_add(1),
            None => self.lines.push(CartLine { product, qty: 1 }),
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id() != id);
        self.lines.len() != before
    }

    /// Change a line's quantity by `delta`, never below 1.
    ///
    /// Returns `false` when there is no line for `id`.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i32) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };
        let next = i64::from(line.qty) + i64::from(delta);
        line.qty = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
        true
    }

    /// Total number of units, as shown on the badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |sum, line| sum.saturating_add(line.qty))
    }

    /// Sum of `qty × numeric(price)` over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0_u64, |sum, line| sum.saturating_add(line.subtotal()))
    }

    /// Display model for the cart panel.
    #[must_use]
    pub fn panel(&self) -> CartPanel {
        if self.is_empty() {
            return CartPanel::Empty {
                total: Price::from_amount(0),
            };
        }

        CartPanel::Lines {
            rows: self.lines.iter().map(CartRow::from).collect(),
            total: Price::from_amount(self.total()),
        }
    }
}

// =============================================================================
// Display Model
// =============================================================================

/// What the cart panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartPanel {
    /// Empty-state message and a zero total.
    Empty { total: Price },
    /// One row per line and the formatted total.
    Lines { rows: Vec<CartRow>, total: Price },
}

impl CartPanel {
    /// The formatted total.
    #[must_use]
    pub const fn total(&self) -> &Price {
        match self {
            Self::Empty { total } | Self::Lines { total, .. } => total,
        }
    }
}

/// One cart panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub qty: u32,
    pub thumbnail: Thumbnail,
}

impl From<&CartLine> for CartRow {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            name: line.product.name.clone(),
            price: line.product.price.clone(),
            qty: line.qty,
            thumbnail: Thumbnail::for_product(&line.product),
        }
    }
}

// =============================================================================
// Engine
// =============================================================================

/// UI side of the cart: badge, panel and the "added" notice.
pub trait CartSurface {
    /// Show the unit count on the badge (hidden at 0).
    fn show_count(&mut self, count: u32);

    /// Replace the cart panel contents.
    fn render(&mut self, panel: &CartPanel);

    /// Surface a transient "added to cart" confirmation.
    fn confirm_added(&mut self, product: &Product);
}

/// The cart plus its persistence and its UI.
#[derive(Debug)]
pub struct CartEngine<S, U> {
    cart: Cart,
    store: S,
    surface: U,
}

impl<S: KeyValueStore, U: CartSurface> CartEngine<S, U> {
    /// Load the persisted cart and show its badge count.
    ///
    /// An unreadable or malformed stored cart yields an empty cart.
    pub fn load(store: S, mut surface: U) -> Self {
        let cart = match load_json::<Vec<CartLine>, _>(&store, CART_STORAGE_KEY) {
            Ok(lines) => Cart::from_lines(lines.unwrap_or_default()),
            Err(e) => {
                tracing::warn!(error = %e, "starting with an empty cart");
                Cart::new()
            }
        };
        tracing::debug!(lines = cart.lines().len(), "cart loaded");
        surface.show_count(cart.item_count());
        Self {
            cart,
            store,
            surface,
        }
    }

    /// Add one unit of `product` and confirm it to the user.
    pub fn add(&mut self, product: Product) {
        tracing::debug!(id = %product.id, name = %product.name, "add to cart");
        self.cart.add(product.clone());
        self.commit();
        self.surface.confirm_added(&product);
    }

    /// Remove the line for `id`; an unknown id changes nothing.
    pub fn remove(&mut self, id: ProductId) {
        if !self.cart.remove(id) {
            tracing::debug!(%id, "remove: no such cart line");
        }
        self.commit();
    }

    /// Change the quantity of the line for `id` by `delta`, clamped at 1.
    pub fn adjust_quantity(&mut self, id: ProductId, delta: i32) {
        if self.cart.adjust_quantity(id, delta) {
            self.commit();
        }
    }

    /// Re-render the panel from the current cart.
    pub fn render(&mut self) {
        self.surface.render(&self.cart.panel());
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The UI surface.
    #[must_use]
    pub const fn surface(&self) -> &U {
        &self.surface
    }

    /// Persist, refresh the badge and re-render.
    fn commit(&mut self) {
        if let Err(e) = save_json(&mut self.store, CART_STORAGE_KEY, self.cart.lines()) {
            // The in-memory cart stays authoritative for this session.
            tracing::warn!(error = %e, "cart not persisted");
        }
        self.surface.show_count(self.cart.item_count());
        self.render();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{MemoryStore, StoreError};

    /// Records what the engine asked the UI to do.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        counts: Vec<u32>,
        panels: Vec<CartPanel>,
        confirmed: Vec<ProductId>,
    }

    impl CartSurface for RecordingSurface {
        fn show_count(&mut self, count: u32) {
            self.counts.push(count);
        }

        fn render(&mut self, panel: &CartPanel) {
            self.panels.push(panel.clone());
        }

        fn confirm_added(&mut self, product: &Product) {
            self.confirmed.push(product.id);
        }
    }

    /// A store whose writes always fail.
    #[derive(Debug, Default)]
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn product(id: i64, price: &str) -> Product {
        Product::new(
            ProductId::new(id),
            format!("Bag {id}"),
            price,
            "",
            None,
        )
    }

    fn engine() -> CartEngine<MemoryStore, RecordingSurface> {
        CartEngine::load(MemoryStore::new(), RecordingSurface::default())
    }

    fn id_qty(cart: &Cart) -> Vec<(i64, u32)> {
        cart.lines()
            .iter()
            .map(|line| (line.id().as_i64(), line.qty))
            .collect()
    }

    #[test]
    fn test_add_same_id_twice_merges() {
        let mut engine = engine();
        engine.add(product(1, "₩1,000"));
        engine.add(product(1, "₩1,000"));
        assert_eq!(id_qty(engine.cart()), vec![(1, 2)]);
        assert_eq!(engine.surface().confirmed.len(), 2);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(product(1, "₩1,000"));
        cart.add(product(1, "₩9,999"));
        assert_eq!(cart.lines()[0].product.price.as_str(), "₩1,000");
    }

    #[test]
    fn test_adjust_quantity_clamps_to_one() {
        let mut engine = engine();
        engine.add(product(1, "₩1,000"));
        engine.adjust_quantity(ProductId::new(1), 3);
        engine.adjust_quantity(ProductId::new(1), -100);
        assert_eq!(id_qty(engine.cart()), vec![(1, 1)]);
    }

    #[test]
    fn test_adjust_unknown_id_is_silent_noop() {
        let mut engine = engine();
        engine.add(product(1, "₩1,000"));
        let renders = engine.surface().panels.len();
        engine.adjust_quantity(ProductId::new(2), 1);
        assert_eq!(engine.surface().panels.len(), renders);
        assert_eq!(id_qty(engine.cart()), vec![(1, 1)]);
    }

    #[test]
    fn test_remove_unknown_id_still_renders() {
        let mut engine = engine();
        engine.remove(ProductId::new(77));
        assert!(engine.cart().is_empty());
        assert_eq!(
            engine.surface().panels.last(),
            Some(&CartPanel::Empty {
                total: Price::new("₩0")
            })
        );
    }

    #[test]
    fn test_total_formats_like_prices() {
        let mut cart = Cart::new();
        cart.add(product(1, "₩1,000"));
        cart.add(product(1, "₩1,000"));
        cart.add(product(2, "₩500"));
        assert_eq!(cart.total(), 2_500);
        assert_eq!(cart.panel().total().as_str(), "₩2,500");
    }

    #[test]
    fn test_unparsable_price_counts_as_zero() {
        let mut cart = Cart::new();
        cart.add(product(1, "ask in store"));
        cart.add(product(2, "₩500"));
        assert_eq!(cart.total(), 500);
    }

    #[test]
    fn test_badge_tracks_unit_count() {
        let mut engine = engine();
        engine.add(product(1, "₩1,000"));
        engine.add(product(2, "₩1,000"));
        engine.adjust_quantity(ProductId::new(2), 4);
        engine.remove(ProductId::new(1));
        assert_eq!(engine.surface().counts, vec![0, 1, 2, 6, 5]);
        assert_eq!(engine.cart().item_count(), 5);
    }

    #[test]
    fn test_panel_rows_carry_thumbnails() {
        let mut cart = Cart::new();
        let mut with_image = product(1, "₩1,000");
        with_image.image = Some("https://img.test/1.png".to_string());
        cart.add(with_image);
        cart.add(product(2, "₩1,000"));

        let CartPanel::Lines { rows, .. } = cart.panel() else {
            panic!("expected rows");
        };
        assert!(matches!(rows[0].thumbnail, Thumbnail::Image { .. }));
        assert_eq!(rows[1].thumbnail, Thumbnail::Placeholder);
    }

    #[test]
    fn test_persisted_form_reloads_same_lines() {
        let mut engine = engine();
        engine.add(product(3, "₩3,000"));
        engine.add(product(1, "₩1,000"));
        engine.add(product(2, "₩2,000"));
        engine.adjust_quantity(ProductId::new(1), 2);
        engine.add(product(3, "₩3,000"));
        engine.remove(ProductId::new(2));
        engine.add(product(4, "₩4,000"));

        let reloaded = CartEngine::load(engine.store().clone(), RecordingSurface::default());
        assert_eq!(id_qty(reloaded.cart()), vec![(3, 2), (1, 3), (4, 1)]);
        assert_eq!(reloaded.cart(), engine.cart());
        assert_eq!(reloaded.surface().counts, vec![6]);
    }

    #[test]
    fn test_persisted_shape_is_flat() {
        let mut engine = engine();
        engine.add(product(1, "₩1,000"));
        let raw = engine.store().get(CART_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "name": "Bag 1",
                "price": "₩1,000",
                "desc": "",
                "image": null,
                "qty": 1
            }])
        );
    }

    #[test]
    fn test_malformed_persisted_cart_starts_empty() {
        let store = MemoryStore::with_entries([(CART_STORAGE_KEY, "[{\"id\": ")]);
        let engine = CartEngine::load(store, RecordingSurface::default());
        assert!(engine.cart().is_empty());
        assert_eq!(engine.surface().counts, vec![0]);
    }

    #[test]
    fn test_persisted_zero_qty_and_duplicates_are_normalized() {
        let store = MemoryStore::with_entries([(
            CART_STORAGE_KEY,
            r#"[{"id": 1, "name": "A", "price": "₩1", "qty": 0},
                {"id": 2, "name": "B", "price": "₩2", "qty": 2},
                {"id": 1, "name": "A", "price": "₩1", "qty": 3}]"#,
        )]);
        let engine = CartEngine::load(store, RecordingSurface::default());
        assert_eq!(id_qty(engine.cart()), vec![(1, 4), (2, 2)]);
    }

    #[test]
    fn test_unwritable_store_keeps_session_cart() {
        let mut engine = CartEngine::load(ReadOnlyStore, RecordingSurface::default());
        engine.add(product(1, "₩1,000"));
        engine.add(product(1, "₩1,000"));
        assert_eq!(id_qty(engine.cart()), vec![(1, 2)]);
        assert_eq!(engine.surface().counts.last(), Some(&2));
    }
}
