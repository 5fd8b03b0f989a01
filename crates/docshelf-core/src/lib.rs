//! # docshelf-core
//!
//! Core crate for DocShelf. Contains the unified error system, configuration
//! schemas, typed identifiers, the backend seams (storage, display-order
//! writes, notifications) and the pure ordering rules shared by groups and
//! documents.
//!
//! This crate has **no** internal dependencies on other DocShelf crates.

pub mod config;
pub mod error;
pub mod ordering;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use ordering::{MoveDirection, Ordered, OrderWrite, SwapPlan};
pub use result::AppResult;
