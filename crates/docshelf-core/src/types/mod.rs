//! Core type definitions used across the DocShelf workspace.

pub mod id;

pub use id::*;
