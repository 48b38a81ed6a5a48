//! The shared life pool.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Result of a mutation of the life pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeChange {
    /// Lives before the mutation.
    pub before: u32,
    /// Lives after the mutation.
    pub after: u32,
    /// True only for the mutation that took the pool to zero.
    pub died: bool,
}

impl LifeChange {
    /// Whether the mutation changed anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.before != self.after
    }
}

/// Bounded life counter, always within `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lives {
    current: u32,
    max: u32,
}

impl Lives {
    /// Creates a full pool of `max` lives.
    #[must_use]
    pub fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Returns the current count.
    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Whether no lives are left.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Removes `amount` lives, saturating at zero. Damage to an empty pool is
    /// a no-op.
    pub fn damage(&mut self, amount: u32) -> LifeChange {
        let before = self.current;
        self.current = self.current.saturating_sub(amount);
        LifeChange {
            before,
            after: self.current,
            died: before > 0 && self.current == 0,
        }
    }

    /// Restores `amount` lives, clamped to `max`.
    pub fn heal(&mut self, amount: u32) -> LifeChange {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        LifeChange {
            before,
            after: self.current,
            died: false,
        }
    }
}

/// Anything that can absorb damage on behalf of the player.
///
/// The question arbiter applies wrong-answer damage through this trait so it
/// does not need to know who owns the pool.
pub trait LifePool {
    /// Lives currently left.
    fn lives(&self) -> u32;

    /// Applies damage and records the change.
    fn take_damage(&mut self, amount: u32, clock: &dyn Clock) -> LifeChange;

    /// Whether the pool is empty.
    fn is_depleted(&self) -> bool {
        self.lives() == 0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_damage_reports_death_once() {
        let mut lives = Lives::full(2);

        let first = lives.damage(1);
        let second = lives.damage(1);
        let third = lives.damage(1);

        assert!(!first.died);
        assert!(second.died);
        assert!(!third.died);
        assert!(!third.changed());
        assert!(lives.is_depleted());
    }

    #[test]
    fn test_heal_never_exceeds_max() {
        let mut lives = Lives::full(3);
        lives.damage(1);

        let change = lives.heal(10);

        assert_eq!(change.after, 3);
        assert_eq!(lives.current(), lives.max());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(u32),
        Heal(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u32..6).prop_map(Op::Damage),
            (0u32..6).prop_map(Op::Heal),
        ]
    }

    proptest! {
        #[test]
        fn prop_lives_stay_within_bounds(max in 1u32..10, ops in prop::collection::vec(op(), 0..40)) {
            let mut lives = Lives::full(max);
            for op in ops {
                let was_empty = lives.is_depleted();
                let change = match op {
                    Op::Damage(amount) => lives.damage(amount),
                    Op::Heal(amount) => lives.heal(amount),
                };
                prop_assert!(lives.current() <= lives.max());
                prop_assert_eq!(change.after, lives.current());
                if was_empty && matches!(op, Op::Damage(_)) {
                    prop_assert!(!change.changed());
                    prop_assert!(!change.died);
                }
            }
        }
    }
}
