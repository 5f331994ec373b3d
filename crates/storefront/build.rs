//! Build script for storefront crate.
//!
//! Computes content hashes for the static assets so templates can append a
//! `?v=<hash>` cache-buster that changes only when the file does.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Static assets to fingerprint: (path under `static/`, env var name).
const ASSETS: &[(&str, &str)] = &[("css/main.css", "CSS_HASH"), ("js/app.js", "JS_HASH")];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    for (relative, var) in ASSETS {
        let asset_path = static_dir.join(relative);
        println!("cargo:rerun-if-changed={}", asset_path.display());

        let hash = match fs::read(&asset_path) {
            Ok(content) => short_hash(&content),
            Err(e) => {
                println!("cargo:warning=Could not read {relative}: {e}");
                String::new()
            }
        };

        println!("cargo:rustc-env={var}={hash}");
    }
}

/// First 8 hex characters of the SHA-256 digest.
fn short_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let hash = format!("{:x}", hasher.finalize());
    hash.chars().take(8).collect()
}
