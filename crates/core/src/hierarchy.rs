//! Manager-assignment validation for the reporting hierarchy.
//!
//! The employees and their manager references must always form a forest:
//! no employee manages themselves and no chain of manager references loops
//! back to where it started. [`validate_manager_assignment`] decides whether
//! a proposed edit keeps that true against the current state.
//!
//! Pre-existing dangling references are tolerated on read (a chain walk
//! stops there as if it had reached a root) but a write may never introduce
//! a reference to an employee that does not exist.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::EmployeeId;

/// Hard upper bound on chain-walk steps, whatever the employee count.
pub const CHAIN_WALK_CEILING: usize = 100_000;

// ---------------------------------------------------------------------------
// Lookup seam
// ---------------------------------------------------------------------------

/// Read access to the current manager relation.
pub trait ManagerLookup {
    /// The manager reference of `id`.
    ///
    /// `None` when no employee `id` exists, `Some(None)` for an employee
    /// without a manager.
    fn manager_of(&self, id: &str) -> Option<Option<&str>>;

    /// Number of employees known to the lookup (bounds chain walks).
    fn employee_count(&self) -> usize;
}

/// In-memory snapshot of `employee id -> manager id`.
#[derive(Debug, Clone, Default)]
pub struct ManagerMap {
    managers: HashMap<EmployeeId, Option<EmployeeId>>,
}

impl ManagerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the manager reference of `id`.
    pub fn insert(&mut self, id: impl Into<EmployeeId>, manager_id: Option<EmployeeId>) {
        self.managers.insert(id.into(), manager_id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.managers.contains_key(id)
    }
}

impl FromIterator<(EmployeeId, Option<EmployeeId>)> for ManagerMap {
    fn from_iter<I: IntoIterator<Item = (EmployeeId, Option<EmployeeId>)>>(iter: I) -> Self {
        Self {
            managers: iter.into_iter().collect(),
        }
    }
}

impl ManagerLookup for ManagerMap {
    fn manager_of(&self, id: &str) -> Option<Option<&str>> {
        self.managers.get(id).map(|m| m.as_deref())
    }

    fn employee_count(&self) -> usize {
        self.managers.len()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// How the upward chain walk from the proposed manager ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainWalk {
    /// No manager proposed; nothing to walk.
    Skipped,
    /// The walk reached an employee with no (or a dangling) manager reference.
    ReachedRoot { steps: usize },
    /// The walk hit its step bound without reaching a root. The data already
    /// holds a loop or an absurdly deep chain; the assignment was not
    /// rejected, but it was not proven acyclic either.
    Bounded { steps: usize },
}

/// A manager assignment that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAssignment {
    pub subject_id: EmployeeId,
    pub manager_id: Option<EmployeeId>,
    pub walk: ChainWalk,
}

/// Decide whether `subject_id` may report to `proposed_manager_id`.
///
/// - `None` is always legal: the subject becomes a root.
/// - The subject itself yields [`CoreError::SelfManagement`].
/// - An id absent from `lookup` yields [`CoreError::UnknownManager`].
/// - If walking up from the proposed manager reaches the subject, the
///   assignment yields [`CoreError::Cycle`].
pub fn validate_manager_assignment<L: ManagerLookup + ?Sized>(
    subject_id: &str,
    proposed_manager_id: Option<&str>,
    lookup: &L,
) -> Result<ValidatedAssignment, CoreError> {
    let Some(manager_id) = proposed_manager_id else {
        return Ok(ValidatedAssignment {
            subject_id: subject_id.to_string(),
            manager_id: None,
            walk: ChainWalk::Skipped,
        });
    };

    if manager_id == subject_id {
        return Err(CoreError::SelfManagement {
            employee_id: subject_id.to_string(),
        });
    }

    ensure_manager_exists(manager_id, lookup)?;

    let limit = walk_limit(lookup);
    let mut current = manager_id;
    let mut steps = 0usize;

    let walk = loop {
        if current == subject_id {
            return Err(CoreError::Cycle {
                employee_id: subject_id.to_string(),
                manager_id: manager_id.to_string(),
            });
        }
        if steps >= limit {
            break ChainWalk::Bounded { steps };
        }
        steps += 1;
        match lookup.manager_of(current) {
            Some(Some(next)) => current = next,
            // A null reference or a dangling one ends the chain.
            Some(None) | None => break ChainWalk::ReachedRoot { steps },
        }
    };

    Ok(ValidatedAssignment {
        subject_id: subject_id.to_string(),
        manager_id: Some(manager_id.to_string()),
        walk,
    })
}

/// Manager check for a brand-new employee.
///
/// A new id cannot already sit on any chain, so only existence matters.
pub fn validate_new_manager<L: ManagerLookup + ?Sized>(
    proposed_manager_id: Option<&str>,
    lookup: &L,
) -> Result<(), CoreError> {
    match proposed_manager_id {
        Some(manager_id) => ensure_manager_exists(manager_id, lookup),
        None => Ok(()),
    }
}

fn ensure_manager_exists<L: ManagerLookup + ?Sized>(
    manager_id: &str,
    lookup: &L,
) -> Result<(), CoreError> {
    if lookup.manager_of(manager_id).is_none() {
        return Err(CoreError::UnknownManager {
            manager_id: manager_id.to_string(),
        });
    }
    Ok(())
}

/// A well-formed chain visits each employee at most once.
fn walk_limit<L: ManagerLookup + ?Sized>(lookup: &L) -> usize {
    lookup
        .employee_count()
        .saturating_add(1)
        .min(CHAIN_WALK_CEILING)
}
