//! Ordered-collection manager.
//!
//! Turns the pure plans of [`docshelf_core::ordering`] into store writes.
//! Writes are issued one at a time and each is awaited before the next
//! starts. Nothing is rolled back or retried: when a later write fails the
//! sibling set stays half updated and the caller gets a `PartialFailure`
//! naming what was applied.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use docshelf_core::error::AppError;
use docshelf_core::ordering::{self, MoveDirection, OrderWrite, Ordered, SwapPlan};
use docshelf_core::result::AppResult;
use docshelf_core::traits::DisplayOrderWriter;

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome<Id> {
    /// Target absent or already at the boundary; nothing was written.
    Unchanged,
    /// Both writes of the swap were applied.
    Swapped(SwapPlan<Id>),
}

impl<Id: Copy> MoveOutcome<Id> {
    /// Whether any write happened.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Swapped(_))
    }

    /// Applied writes in issue order.
    pub fn writes(&self) -> Vec<OrderWrite<Id>> {
        match self {
            Self::Unchanged => Vec::new(),
            Self::Swapped(plan) => plan.writes().to_vec(),
        }
    }
}

/// Applies reorder plans to one kind of sibling set.
pub struct OrderedCollectionManager<W: ?Sized> {
    writer: Arc<W>,
    kind: &'static str,
}

impl<W: ?Sized> Clone for OrderedCollectionManager<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            kind: self.kind,
        }
    }
}

impl<W: ?Sized> fmt::Debug for OrderedCollectionManager<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedCollectionManager")
            .field("kind", &self.kind)
            .finish()
    }
}

impl<W: ?Sized> OrderedCollectionManager<W> {
    /// Create a manager writing through `writer`. `kind` names the entity
    /// in logs and error messages.
    pub fn new(writer: Arc<W>, kind: &'static str) -> Self {
        Self { writer, kind }
    }

    /// `display_order` for a new entity appended to `siblings`.
    pub fn append_order<T: Ordered>(&self, siblings: &[T]) -> i32 {
        ordering::append_order(siblings)
    }

    /// Move `target` one step within `siblings`.
    ///
    /// `siblings` is the caller's current view of the set; the caller must
    /// refetch it afterwards to observe the result.
    pub async fn move_item<T>(
        &self,
        siblings: &[T],
        target: T::Id,
        direction: MoveDirection,
    ) -> AppResult<MoveOutcome<T::Id>>
    where
        T: Ordered,
        W: DisplayOrderWriter<T::Id>,
    {
        let Some(plan) = ordering::plan_move(siblings, target, direction) else {
            if siblings.iter().any(|s| s.id() == target) {
                debug!(kind = self.kind, id = %target, %direction, "Already at boundary; nothing to move");
            } else {
                debug!(kind = self.kind, id = %target, "Not in sibling set; ignoring move");
            }
            return Ok(MoveOutcome::Unchanged);
        };

        self.writer
            .write_display_order(plan.target.id, plan.target.display_order)
            .await
            .inspect_err(|e| {
                warn!(kind = self.kind, id = %plan.target.id, error = %e, "Reorder write failed; nothing applied");
            })?;

        if let Err(e) = self
            .writer
            .write_display_order(plan.neighbor.id, plan.neighbor.display_order)
            .await
        {
            warn!(
                kind = self.kind,
                applied = %plan.target.id,
                pending = %plan.neighbor.id,
                error = %e,
                "Reorder left half applied"
            );
            return Err(AppError::partial_failure(
                format!(
                    "{} {} now has display_order {} but {} still has {}",
                    self.kind,
                    plan.target.id,
                    plan.target.display_order,
                    plan.neighbor.id,
                    plan.target.display_order,
                ),
                e,
            ));
        }

        info!(
            kind = self.kind,
            id = %target,
            %direction,
            swapped_with = %plan.neighbor.id,
            "Moved"
        );
        Ok(MoveOutcome::Swapped(plan))
    }

    /// Rewrite `siblings` to `1..=n` in their current order.
    ///
    /// Returns the writes that were applied.
    pub async fn renumber<T>(&self, siblings: &[T]) -> AppResult<Vec<OrderWrite<T::Id>>>
    where
        T: Ordered,
        W: DisplayOrderWriter<T::Id>,
    {
        let writes = ordering::plan_renumber(siblings);

        for (applied, write) in writes.iter().enumerate() {
            if let Err(e) = self
                .writer
                .write_display_order(write.id, write.display_order)
                .await
            {
                if applied == 0 {
                    return Err(e);
                }
                warn!(kind = self.kind, applied, total = writes.len(), error = %e, "Renumber stopped part way");
                return Err(AppError::partial_failure(
                    format!(
                        "Renumbered {applied} of {} {} entries before failing",
                        writes.len(),
                        self.kind
                    ),
                    e,
                ));
            }
        }

        info!(kind = self.kind, writes = writes.len(), "Renumbered");
        Ok(writes)
    }
}
