//! Group entity model.

use chrono::{DateTime, Utc};
use docshelf_core::Ordered;
use docshelf_core::types::GroupId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named container of documents. Groups form one global sibling set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Display name (never empty).
    pub name: String,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// Position among all groups.
    pub display_order: i32,
}

impl Ordered for Group {
    type Id = GroupId;

    fn id(&self) -> GroupId {
        self.id
    }

    fn display_order(&self) -> i32 {
        self.display_order
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Data required to create a new group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGroup {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Initial position, normally the append order of the current set.
    pub display_order: i32,
}
