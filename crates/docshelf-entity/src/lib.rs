//! # docshelf-entity
//!
//! Domain entity models for DocShelf. Every struct in this crate represents
//! a database table row or a domain value object. Table rows derive
//! `sqlx::FromRow` and implement [`docshelf_core::Ordered`] so the shared
//! ordering rules apply to both kinds.

pub mod document;
pub mod group;
