//! Group listing, creation, reordering and deletion.

use std::sync::Arc;

use tracing::info;

use docshelf_auth::AdminClaims;
use docshelf_core::error::AppError;
use docshelf_core::ordering::{MoveDirection, OrderWrite};
use docshelf_core::result::AppResult;
use docshelf_core::types::GroupId;
use docshelf_database::{DocumentStore, GroupStore};
use docshelf_entity::group::{CreateGroup, Group};

use crate::reorder::{MoveOutcome, OrderedCollectionManager};

/// Longest accepted group name, in characters.
pub const MAX_GROUP_NAME_LEN: usize = 200;

/// Manages groups.
#[derive(Debug, Clone)]
pub struct GroupService {
    /// Group table.
    groups: Arc<dyn GroupStore>,
    /// Document table, consulted before deleting a group.
    documents: Arc<dyn DocumentStore>,
    /// Reorder writer over the group table.
    ordering: OrderedCollectionManager<dyn GroupStore>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(groups: Arc<dyn GroupStore>, documents: Arc<dyn DocumentStore>) -> Self {
        let ordering = OrderedCollectionManager::new(Arc::clone(&groups), "group");
        Self {
            groups,
            documents,
            ordering,
        }
    }

    /// All groups in presentation order.
    pub async fn list_groups(&self) -> AppResult<Vec<Group>> {
        self.groups.list_ordered().await
    }

    /// Gets a group by ID.
    pub async fn get_group(&self, id: GroupId) -> AppResult<Group> {
        self.groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Group {id} not found")))
    }

    /// Creates a group at the end of the current order.
    pub async fn create_group(&self, name: &str) -> AppResult<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Group name cannot be empty"));
        }
        if name.chars().count() > MAX_GROUP_NAME_LEN {
            return Err(AppError::validation(format!(
                "Group name cannot exceed {MAX_GROUP_NAME_LEN} characters"
            )));
        }

        let siblings = self.groups.list_ordered().await?;
        let display_order = self.ordering.append_order(&siblings);

        let group = self
            .groups
            .insert(&CreateGroup {
                name: name.to_string(),
                display_order,
            })
            .await?;

        info!(group_id = %group.id, name = %group.name, display_order, "Group created");
        Ok(group)
    }

    /// Moves a group one step, reading the current order from the store.
    pub async fn move_group(
        &self,
        id: GroupId,
        direction: MoveDirection,
    ) -> AppResult<MoveOutcome<GroupId>> {
        let siblings = self.groups.list_ordered().await?;
        self.move_group_in(&siblings, id, direction).await
    }

    /// Moves a group one step within an already fetched list.
    pub async fn move_group_in(
        &self,
        siblings: &[Group],
        id: GroupId,
        direction: MoveDirection,
    ) -> AppResult<MoveOutcome<GroupId>> {
        self.ordering.move_item(siblings, id, direction).await
    }

    /// Rewrites group positions to `1..=n`.
    pub async fn renumber_groups(&self, admin: &AdminClaims) -> AppResult<Vec<OrderWrite<GroupId>>> {
        let siblings = self.groups.list_ordered().await?;
        let writes = self.ordering.renumber(&siblings).await?;
        info!(admin = admin.username(), writes = writes.len(), "Groups renumbered");
        Ok(writes)
    }

    /// Deletes an empty group.
    pub async fn delete_group(&self, admin: &AdminClaims, id: GroupId) -> AppResult<()> {
        let group = self.get_group(id).await?;

        let owned = self.documents.count_by_group(id).await?;
        if owned > 0 {
            return Err(AppError::conflict(format!(
                "Group '{}' still contains {owned} document(s)",
                group.name
            )));
        }

        if !self.groups.delete(id).await? {
            return Err(AppError::not_found(format!("Group {id} not found")));
        }

        info!(admin = admin.username(), group_id = %id, name = %group.name, "Group deleted");
        Ok(())
    }
}
