//! Meshwire — typed client-side data model for a cluster-management REST API
//!
//! This is the public meta-crate. Downstream users depend on **meshwire** only.
//!
//! It re-exports the stable public API from:
//!   - `meshwire-core`  (guards, errors, scalar wrappers, wire helpers, paging)
//!   - `meshwire-model` (discriminator kinds, registries, codec, entities)

pub use meshwire_core as core;
pub use meshwire_model as model;

pub use meshwire_core::error::WireError;

/// Crate version, as reported to diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Prelude
//

pub mod prelude {
    pub use meshwire_core::prelude::*;
    pub use meshwire_model::prelude::*;
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    // End-to-end through the facade only.
    #[test]
    fn facade_exposes_the_decode_path() {
        let page = json!({
            "ContinuationToken": "",
            "Items": [
                { "Kind": "FileShare", "Path": "\\\\backup\\share" },
            ],
        });
        let storages = decode_page(&page, decode_tagged_object::<BackupStorage>).unwrap();
        assert!(storages.is_last_page());
        assert_eq!(storages.len(), 1);
    }

    #[test]
    fn version_matches_the_manifest() {
        assert_eq!(crate::VERSION, env!("CARGO_PKG_VERSION"));
    }
}
