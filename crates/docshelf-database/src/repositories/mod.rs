//! PostgreSQL repository implementations for groups and documents.

pub mod document;
pub mod group;

pub use document::DocumentRepository;
pub use group::GroupRepository;
