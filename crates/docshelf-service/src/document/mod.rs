//! Document use cases.

pub mod service;

pub use service::{DocumentService, DownloadedFile, UploadRequest, ViewLink};
