//! Build script for the storefront page host.
//!
//! Stamps the stylesheet with a content hash so the page can link an
//! immutable, cache-friendly copy of it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Hex characters of the SHA-256 kept in file names.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo"));
    stamp_stylesheet(&manifest_dir.join("static/css"));
}

/// Copy `main.css` to `derived/main.{hash}.css` and export `CSS_HASH`.
///
/// A missing stylesheet exports an empty hash; the page then links the
/// unhashed file.
fn stamp_stylesheet(css_dir: &Path) {
    let source = css_dir.join("main.css");
    println!("cargo:rerun-if-changed={}", source.display());

    let content = match fs::read(&source) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=stylesheet not stamped: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let hash = digest.get(..HASH_LEN).unwrap_or(&digest);
    println!("cargo:rustc-env=CSS_HASH={hash}");

    let derived = css_dir.join("derived");
    fs::create_dir_all(&derived).expect("Failed to create derived stylesheet directory");
    fs::copy(&source, derived.join(format!("main.{hash}.css")))
        .expect("Failed to copy stylesheet to derived directory");
}
