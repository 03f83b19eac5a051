//! Vibe Bagshop Core - storefront domain library.
//!
//! This crate holds everything the storefront page does that does not touch
//! the browser directly:
//! - `web` - wasm glue binding this crate to the DOM and the scene graph
//! - `storefront` - page host serving the shell, the wasm bundle and assets
//!
//! # Architecture
//!
//! The DOM, browser storage and the 3D scene graph are reached only through
//! traits ([`KeyValueStore`], [`CartSurface`], [`FilterableCard`],
//! [`SceneBackend`]). The wasm crate implements them against the browser; tests
//! implement them in memory.
//!
//! # Modules
//!
//! - [`types`] - Product, price, color and id newtypes
//! - [`store`] - Persistent string-keyed store adapter
//! - [`catalog`] - Built-in and overridable product catalogs
//! - [`cart`] - Cart state and the persisting cart engine
//! - [`search`] - Live search filter over rendered cards
//! - [`viewer`] - 3D viewer lifecycle and auto-rotation
//! - [`views`] - Display models for cards and the detail modal
//! - [`features`] - Element IDs each page feature binds to

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod features;
pub mod search;
pub mod store;
pub mod types;
pub mod viewer;
pub mod views;

pub use cart::{Cart, CartEngine, CartLine, CartPanel, CartRow, CartSurface};
pub use catalog::{Catalog, CatalogSlot};
pub use features::Feature;
pub use search::{FilterOutcome, FilterableCard, Segment, apply_filter};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use types::*;
pub use viewer::{SceneBackend, Viewer};
pub use views::{CardView, DetailView, Thumbnail};
