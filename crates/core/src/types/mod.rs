//! Core types for the storefront.
//!
//! This module provides type-safe wrappers for the page's domain concepts.

pub mod color;
pub mod id;
pub mod price;
pub mod product;

pub use color::{Color, ColorError};
pub use id::ProductId;
pub use price::{CURRENCY_SYMBOL, Price};
pub use product::{DisplaySnapshot, Product};
