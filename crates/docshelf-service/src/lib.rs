//! # docshelf-service
//!
//! Business logic service layer for DocShelf. Services orchestrate the
//! table stores, the object store and admin authentication to implement
//! the application use cases.
//!
//! Services follow constructor injection: all dependencies are provided at
//! construction time via `Arc` references.

pub mod document;
pub mod group;
pub mod notification;
pub mod reorder;
pub mod shelf;

#[cfg(test)]
pub(crate) mod testing;

pub use document::{DocumentService, DownloadedFile, UploadRequest, ViewLink};
pub use group::GroupService;
pub use notification::{RecordingSink, TracingSink};
pub use reorder::{MoveOutcome, OrderedCollectionManager};
pub use shelf::Shelf;
