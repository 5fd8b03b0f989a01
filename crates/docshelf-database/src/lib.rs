//! # docshelf-database
//!
//! PostgreSQL connection management, the table-store traits consumed by the
//! service layer, and their PostgreSQL and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{DocumentStore, GroupStore};
