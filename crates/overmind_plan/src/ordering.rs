//! Plan ordering policy.
//!
//! Plans compete for actors strictly by urgency: a lower `priority` value is
//! always attempted first, regardless of cost, kind or race. Equal priorities
//! are tied, and [`sort_plans`] is stable so tied plans keep their input
//! order.

use std::cmp::Ordering;

use crate::plan::Plan;

/// Compare two plans by priority, lower first.
#[must_use]
pub fn compare(a: &Plan, b: &Plan) -> Ordering {
    a.priority().cmp(&b.priority())
}

/// Sort plans (or references to plans) into assignment order.
pub fn sort_plans<P: AsRef<Plan>>(plans: &mut [P]) {
    // `sort_by` is stable.
    plans.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitType;
    use crate::id::PlanId;
    use crate::plan::{PlanPayload, PlanRequest};

    fn plan(id: u64, priority: i32) -> Plan {
        Plan::new(
            PlanId::from_raw(id),
            PlanRequest::new(PlanPayload::unit(UnitType::Drone)).with_priority(priority),
            0,
        )
    }

    #[test]
    fn test_lower_priority_first() {
        assert_eq!(compare(&plan(1, 1), &plan(2, 5)), Ordering::Less);
        assert_eq!(compare(&plan(1, 5), &plan(2, 1)), Ordering::Greater);
    }

    #[test]
    fn test_equal_priorities_tie() {
        assert_eq!(compare(&plan(1, 3), &plan(2, 3)), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut plans = vec![plan(1, 5), plan(2, 1), plan(3, 5), plan(4, 3), plan(5, 1)];
        sort_plans(&mut plans);
        let ids: Vec<u64> = plans.iter().map(|p| p.id().id()).collect();
        assert_eq!(ids, vec![2, 5, 4, 1, 3]);
    }

    #[test]
    fn test_sort_references() {
        let owned = [plan(1, 9), plan(2, -1)];
        let mut refs: Vec<&Plan> = owned.iter().collect();
        sort_plans(&mut refs);
        assert_eq!(refs[0].id(), PlanId::from_raw(2));
    }
}
