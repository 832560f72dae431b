//! Plan identity and allocation.
//!
//! A [`PlanId`] is a lightweight `u64` token with value equality. IDs are
//! handed out by a single [`PlanIdAllocator`] owned by the world state, so
//! they are unique for the lifetime of a game and never reused.

use serde::{Deserialize, Serialize};

/// A game-clock frame number.
pub type Frame = u32;

/// A unique plan identifier.
///
/// Allocation order equals submission order, which makes `PlanId` a usable
/// tiebreak key for anything that must iterate plans deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanId(u64);

impl PlanId {
    /// The null / invalid plan sentinel.
    pub const INVALID: PlanId = PlanId(0);

    /// Create a plan ID from a raw `u64`.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) ID.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Plan({})", self.0)
    }
}

/// Allocates monotonically increasing plan IDs.
#[derive(Debug)]
pub struct PlanIdAllocator {
    next_id: u64,
}

impl PlanIdAllocator {
    /// Creates a new allocator. IDs start at 1 (0 is reserved for [`PlanId::INVALID`]).
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh plan ID.
    pub fn allocate(&mut self) -> PlanId {
        let id = self.next_id;
        self.next_id += 1;
        PlanId(id)
    }

    /// Returns the number of IDs allocated so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.next_id - 1
    }
}

impl Default for PlanIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert!(!PlanId::INVALID.is_valid());
        assert!(PlanId::from_raw(3).is_valid());
    }

    #[test]
    fn test_allocator_produces_increasing_ids() {
        let mut alloc = PlanIdAllocator::new();
        let a = alloc.allocate();
        let b = alloc.allocate();
        let c = alloc.allocate();
        assert_eq!(a.id(), 1);
        assert!(a < b && b < c);
        assert_eq!(alloc.count(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(PlanId::from_raw(42).to_string(), "Plan(42)");
    }
}
