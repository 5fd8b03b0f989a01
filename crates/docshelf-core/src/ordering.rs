//! Display-order rules shared by groups and documents.
//!
//! Every function here is pure: it inspects a sibling set that the caller
//! already fetched and returns the writes to perform. Issuing those writes
//! (sequentially, one row at a time) is the job of the reorder manager in
//! `docshelf-service`.
//!
//! Siblings are ordered by `display_order` ascending, then `created_at`,
//! then id. Values need not be contiguous or unique.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An entity positioned within a sibling set by an integer `display_order`.
pub trait Ordered {
    /// Identifier type of the entity.
    type Id: Copy + Eq + Ord + fmt::Display + Send + Sync + 'static;

    /// The entity's identifier.
    fn id(&self) -> Self::Id;

    /// Current position value.
    fn display_order(&self) -> i32;

    /// Creation time, used as the first tie-breaker.
    fn created_at(&self) -> DateTime<Utc>;
}

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Towards the front of the sorted sequence.
    Up,
    /// Towards the back of the sorted sequence.
    Down,
}

impl MoveDirection {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A single-row `display_order` update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWrite<Id> {
    /// Row to update.
    pub id: Id,
    /// New value.
    pub display_order: i32,
}

/// The two writes that exchange `display_order` between adjacent siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan<Id> {
    /// The moved entity receives its neighbor's old value.
    pub target: OrderWrite<Id>,
    /// The neighbor receives the moved entity's old value.
    pub neighbor: OrderWrite<Id>,
}

impl<Id: Copy> SwapPlan<Id> {
    /// Writes in issue order: target first, then neighbor.
    pub fn writes(&self) -> [OrderWrite<Id>; 2] {
        [self.target, self.neighbor]
    }
}

/// Compare two siblings by presentation position.
pub fn compare<T: Ordered>(a: &T, b: &T) -> Ordering {
    a.display_order()
        .cmp(&b.display_order())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Sort a sibling set in place into presentation order.
pub fn sort_siblings<T: Ordered>(siblings: &mut [T]) {
    siblings.sort_by(compare);
}

/// Borrow a sibling set in presentation order without reordering it.
pub fn sorted<T: Ordered>(siblings: &[T]) -> Vec<&T> {
    let mut refs: Vec<&T> = siblings.iter().collect();
    refs.sort_by(|a, b| compare(*a, *b));
    refs
}

/// The `display_order` for an entity appended to the end of `siblings`.
///
/// `max(display_order, default 0) + 1`, so an empty set yields `1`.
pub fn append_order<T: Ordered>(siblings: &[T]) -> i32 {
    siblings
        .iter()
        .map(Ordered::display_order)
        .fold(0, i32::max)
        .saturating_add(1)
}

/// Plan a one-step move of `target` within `siblings`.
///
/// Returns `None` when the target is absent or already at the boundary in
/// the requested direction; no writes are needed in either case.
pub fn plan_move<T: Ordered>(
    siblings: &[T],
    target: T::Id,
    direction: MoveDirection,
) -> Option<SwapPlan<T::Id>> {
    let ordered = sorted(siblings);
    let index = ordered.iter().position(|s| s.id() == target)?;

    let neighbor_index = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => index + 1,
    };
    let neighbor = ordered.get(neighbor_index)?;
    let current = ordered[index];

    Some(SwapPlan {
        target: OrderWrite {
            id: current.id(),
            display_order: neighbor.display_order(),
        },
        neighbor: OrderWrite {
            id: neighbor.id(),
            display_order: current.display_order(),
        },
    })
}

/// Plan a rewrite of `siblings` to the contiguous range `1..=n`.
///
/// Presentation order is preserved. Only entries whose value changes are
/// returned, in presentation order.
pub fn plan_renumber<T: Ordered>(siblings: &[T]) -> Vec<OrderWrite<T::Id>> {
    sorted(siblings)
        .into_iter()
        .zip(1..)
        .filter(|(s, position)| s.display_order() != *position)
        .map(|(s, position)| OrderWrite {
            id: s.id(),
            display_order: position,
        })
        .collect()
}
