//! Resource vectors: the (weight, cost) pair carried by edges and labels.
//!
//! Two vectors are compared in the *product order*: `a <= b` iff both
//! components of `a` are no larger than those of `b`. That order is only
//! partial, so `ResourceVector` implements `PartialOrd` and not `Ord`;
//! incomparable vectors yield `None`.
//!
//! Dominance is the strict part of the product order: `a` dominates `b`
//! iff `a <= b && a != b`, which is exactly `a < b`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar type of a single resource.
pub type Resource = i64;

/// A (weight, cost) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourceVector {
    pub weight: Resource,
    pub cost: Resource,
}

impl ResourceVector {
    /// The resources of the empty path.
    pub const ZERO: ResourceVector = ResourceVector { weight: 0, cost: 0 };

    pub const fn new(weight: Resource, cost: Resource) -> Self {
        Self { weight, cost }
    }

    /// True if neither component is negative.
    pub fn is_non_negative(&self) -> bool {
        self.weight >= 0 && self.cost >= 0
    }

    /// Component-wise addition, `None` on overflow.
    pub fn checked_add(self, rhs: ResourceVector) -> Option<ResourceVector> {
        Some(ResourceVector {
            weight: self.weight.checked_add(rhs.weight)?,
            cost: self.cost.checked_add(rhs.cost)?,
        })
    }

    /// Strict dominance: no worse in either resource, better in at least one.
    pub fn dominates(&self, other: &ResourceVector) -> bool {
        self < other
    }

    /// Dominates or equals. A store rejects candidates for which some
    /// retained label `covers` them.
    pub fn covers(&self, other: &ResourceVector) -> bool {
        self <= other
    }

    /// Key for the lexicographic (weight, then cost) total order used by
    /// the setting strategy and for sorting frontiers.
    pub fn lex_key(&self) -> (Resource, Resource) {
        (self.weight, self.cost)
    }
}

impl PartialOrd for ResourceVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.weight.cmp(&other.weight), self.cost.cmp(&other.cost)) {
            (Ordering::Equal, Ordering::Equal) => Some(Ordering::Equal),
            (Ordering::Less | Ordering::Equal, Ordering::Less | Ordering::Equal) => {
                Some(Ordering::Less)
            }
            (Ordering::Greater | Ordering::Equal, Ordering::Greater | Ordering::Equal) => {
                Some(Ordering::Greater)
            }
            _ => None,
        }
    }
}

impl std::ops::Add for ResourceVector {
    type Output = ResourceVector;

    fn add(self, rhs: ResourceVector) -> ResourceVector {
        ResourceVector {
            weight: self.weight + rhs.weight,
            cost: self.cost + rhs.cost,
        }
    }
}

impl From<(Resource, Resource)> for ResourceVector {
    fn from((weight, cost): (Resource, Resource)) -> Self {
        Self { weight, cost }
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.weight, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rv(w: Resource, c: Resource) -> ResourceVector {
        ResourceVector::new(w, c)
    }

    #[test]
    fn test_product_order() {
        assert!(rv(1, 1) <= rv(1, 2));
        assert!(rv(1, 1) <= rv(1, 1));
        assert!(rv(2, 3) >= rv(1, 3));
        assert_eq!(rv(1, 5).partial_cmp(&rv(2, 1)), None);
        assert_eq!(rv(3, 3).partial_cmp(&rv(3, 3)), Some(Ordering::Equal));
    }

    #[test]
    fn test_dominance_is_strict() {
        assert!(rv(0, 1).dominates(&rv(1, 1)));
        assert!(rv(1, 0).dominates(&rv(1, 1)));
        assert!(!rv(1, 1).dominates(&rv(1, 1)), "irreflexive");
        assert!(!rv(1, 1).dominates(&rv(0, 1)), "asymmetric");
        assert!(!rv(0, 5).dominates(&rv(5, 0)), "incomparable");
        assert!(rv(1, 1).covers(&rv(1, 1)));
    }

    #[test]
    fn test_dominance_is_transitive() {
        let (a, b, c) = (rv(0, 0), rv(1, 0), rv(1, 2));
        assert!(a.dominates(&b) && b.dominates(&c));
        assert!(a.dominates(&c));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(rv(1, 2).checked_add(rv(3, 4)), Some(rv(4, 6)));
        assert_eq!(rv(Resource::MAX, 0).checked_add(rv(1, 0)), None);
        assert_eq!(rv(1, 2) + rv(3, 4), rv(4, 6));
    }

    #[test]
    fn test_display_and_non_negative() {
        assert_eq!(rv(6, 10).to_string(), "(6, 10)");
        assert!(rv(0, 0).is_non_negative());
        assert!(!rv(0, -1).is_non_negative());
    }
}
