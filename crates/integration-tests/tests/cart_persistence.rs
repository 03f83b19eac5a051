//! Cart and catalog state surviving a page reload through the store.

#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use vibe_bagshop_core::cart::CART_STORAGE_KEY;
use vibe_bagshop_core::{
    CartEngine, CartPanel, Catalog, CatalogSlot, KeyValueStore, MemoryStore, Product, ProductId,
};
use vibe_bagshop_integration_tests::RecordingSurface;

fn bag(id: i64, price: &str) -> Product {
    Product::new(ProductId::new(id), format!("Bag {id}"), price, "", None)
}

fn reload(store: MemoryStore) -> CartEngine<MemoryStore, RecordingSurface> {
    CartEngine::load(store, RecordingSurface::default())
}

fn id_qty(engine: &CartEngine<MemoryStore, RecordingSurface>) -> Vec<(i64, u32)> {
    engine
        .cart()
        .lines()
        .iter()
        .map(|line| (line.id().as_i64(), line.qty))
        .collect()
}

#[test]
fn test_reload_reproduces_lines_in_order() {
    let mut engine = reload(MemoryStore::new());
    engine.add(bag(3, "₩1,000"));
    engine.add(bag(1, "₩2,000"));
    engine.add(bag(3, "₩1,000"));
    engine.add(bag(2, "₩3,000"));
    engine.adjust_quantity(ProductId::new(1), 4);
    engine.remove(ProductId::new(2));
    engine.adjust_quantity(ProductId::new(3), -100);
    engine.add(bag(7, "₩500"));

    let before = id_qty(&engine);
    assert_eq!(before, vec![(3, 1), (1, 5), (7, 1)]);

    let reloaded = reload(engine.store().clone());
    assert_eq!(id_qty(&reloaded), before);
    assert_eq!(reloaded.surface().counts, vec![7]);
}

#[test]
fn test_total_after_reload() {
    let mut engine = reload(MemoryStore::new());
    engine.add(bag(1, "₩1,000"));
    engine.add(bag(1, "₩1,000"));
    engine.add(bag(2, "₩500"));

    let mut reloaded = reload(engine.store().clone());
    reloaded.render();
    let panel = reloaded.surface().panels.last().unwrap();
    assert_eq!(panel.total().as_str(), "₩2,500");
    assert!(matches!(panel, CartPanel::Lines { rows, .. } if rows.len() == 2));
}

#[test]
fn test_emptied_cart_reloads_empty() {
    let mut engine = reload(MemoryStore::new());
    engine.add(bag(1, "₩1,000"));
    engine.remove(ProductId::new(1));

    let mut reloaded = reload(engine.store().clone());
    assert!(reloaded.cart().is_empty());
    reloaded.render();
    assert!(matches!(
        reloaded.surface().panels.last(),
        Some(CartPanel::Empty { .. })
    ));
}

#[test]
fn test_malformed_cart_loads_empty_and_is_overwritten() {
    let store = MemoryStore::with_entries([(CART_STORAGE_KEY, "{not json")]);
    let mut engine = reload(store);
    assert!(engine.cart().is_empty());
    assert_eq!(engine.surface().counts, vec![0]);

    engine.add(bag(5, "₩9,900"));
    let saved = engine.store().get(CART_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(value[0]["id"], 5);
    assert_eq!(value[0]["qty"], 1);
    assert_eq!(value[0]["price"], "₩9,900");
}

#[test]
fn test_catalog_override_feeds_cart() {
    let popular = serde_json::json!([
        {"id": 11, "name": "Override Tote", "price": "₩88,000"},
        {"id": 12, "name": "Override Clutch", "price": "₩42,000", "image": null}
    ]);
    let store = MemoryStore::with_entries([(
        CatalogSlot::Popular.storage_key(),
        popular.to_string(),
    )]);

    let catalog = Catalog::load(&store);
    let names: Vec<&str> = catalog
        .list(CatalogSlot::Popular)
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Override Tote", "Override Clutch"]);
    assert_eq!(catalog.new_arrivals, Catalog::default().new_arrivals);

    let mut engine = reload(store);
    for product in catalog.list(CatalogSlot::Popular) {
        engine.add(product.clone());
    }
    let reloaded = reload(engine.store().clone());
    assert_eq!(id_qty(&reloaded), vec![(11, 1), (12, 1)]);
    assert_eq!(reloaded.cart().total(), 130_000);
}

#[test]
fn test_malformed_catalog_falls_back_per_slot() {
    let store = MemoryStore::with_entries([
        (CatalogSlot::MdPick.storage_key(), "[]"),
        (CatalogSlot::New.storage_key(), "\"oops\""),
    ]);
    let catalog = Catalog::load(&store);
    assert_eq!(catalog, Catalog::default());
}
