//! Document domain entities.

pub mod kind;
pub mod model;
pub mod size;

pub use kind::FileCategory;
pub use model::{CreateDocument, Document};
pub use size::format_file_size;
