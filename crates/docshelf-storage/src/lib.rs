//! # docshelf-storage
//!
//! Object storage for uploaded document bytes. Supports the local
//! filesystem, an in-process map, and S3-compatible object stores.

pub mod key;
pub mod manager;
pub mod mime;
pub mod providers;

pub use key::generate_storage_key;
pub use manager::StorageManager;
