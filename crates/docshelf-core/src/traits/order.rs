//! The single write primitive the reorder manager needs from a table store.

use async_trait::async_trait;

use crate::result::AppResult;

/// Persists a new `display_order` for one row.
///
/// Each call is an independent single-row update; there is no batching
/// and no transaction spanning two calls.
#[async_trait]
pub trait DisplayOrderWriter<Id>: Send + Sync
where
    Id: Send + 'static,
{
    /// Set `display_order` of the row identified by `id`.
    ///
    /// Fails with `NotFound` when the row does not exist.
    async fn write_display_order(&self, id: Id, display_order: i32) -> AppResult<()>;
}
