// SPDX-FileCopyrightText: 2026 Purrview Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Purrview catalog client.
//!
//! This crate provides the domain types, the classified API error taxonomy
//! and the trait seams used throughout the Purrview workspace. The session,
//! auth and catalog crates all build on the definitions here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{ApiError, PurrviewError};
pub use types::{
    AdapterKind, AuthGrant, AuthOutcome, BreedImage, BreedRecord, HealthStatus, LoginRequest,
    PageRequest, PageResult, RegisterRequest, Session, TotalSource, UserRecord,
};

pub use traits::{ApiAdapter, AuthBackend, CatalogBackend, KeyValueStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_kind_round_trips_through_strings() {
        use std::str::FromStr;

        for kind in [AdapterKind::Auth, AdapterKind::Catalog] {
            let s = kind.to_string();
            let parsed = AdapterKind::from_str(&s).expect("should parse back");
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn total_source_displays_snake_case() {
        assert_eq!(TotalSource::Known.to_string(), "known");
        assert_eq!(TotalSource::Estimated.to_string(), "estimated");
        assert_eq!(TotalSource::Exact.to_string(), "exact");
    }

    #[test]
    fn all_traits_are_object_safe() {
        // Each seam is held as a trait object by the service crates.
        fn _kv(_: &dyn KeyValueStore) {}
        fn _auth(_: &dyn AuthBackend) {}
        fn _catalog(_: &dyn CatalogBackend) {}
        fn _adapter(_: &dyn ApiAdapter) {}
    }
}
