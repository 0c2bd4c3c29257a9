//! SQLite persistence for `hm-core` indexes.
//!
//! One database file per collection. A save writes the whole entry table
//! and adjacency in one transaction; searches only touch the strength
//! column afterwards.

pub mod collection;
pub mod error;
pub mod json_bridge;
pub mod schema;
pub mod store;

pub use collection::{CollectionStore, load_config};
pub use error::{Result, StoreError};
pub use store::Store;
