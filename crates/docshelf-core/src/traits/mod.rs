//! Core traits defined in `docshelf-core` and implemented by other crates.

pub mod notify;
pub mod order;
pub mod storage;

pub use notify::{Notification, NotificationSink, Severity};
pub use order::DisplayOrderWriter;
pub use storage::StorageProvider;
