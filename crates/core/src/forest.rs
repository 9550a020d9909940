//! Derivation of the reporting forest from the flat manager relation.
//!
//! Used for org-chart rendering and to precompute which managers an
//! employee may not be assigned (its own descendants).

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::types::EmployeeId;

/// Anything carrying an id and an optional manager reference.
pub trait HierarchyNode {
    fn node_id(&self) -> &str;
    fn manager_ref(&self) -> Option<&str>;
}

impl HierarchyNode for (EmployeeId, Option<EmployeeId>) {
    fn node_id(&self) -> &str {
        &self.0
    }

    fn manager_ref(&self) -> Option<&str> {
        self.1.as_deref()
    }
}

/// Roots plus each employee's direct reports, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Forest {
    pub roots: Vec<EmployeeId>,
    pub children: HashMap<EmployeeId, Vec<EmployeeId>>,
}

/// Build the forest for `employees`.
///
/// A root is any employee whose manager reference is null or does not
/// resolve within `employees`. No sorting or de-duplication happens; with
/// duplicate ids the child ordering is unspecified but the call still
/// succeeds.
pub fn build_forest<T: HierarchyNode>(employees: &[T]) -> Forest {
    let known: HashSet<&str> = employees.iter().map(HierarchyNode::node_id).collect();

    let mut forest = Forest::default();
    for employee in employees {
        match employee.manager_ref() {
            Some(manager) if known.contains(manager) => {
                forest
                    .children
                    .entry(manager.to_string())
                    .or_default()
                    .push(employee.node_id().to_string());
            }
            _ => forest.roots.push(employee.node_id().to_string()),
        }
    }
    forest
}

impl Forest {
    /// Direct reports of `id` (empty when it has none).
    pub fn reports_of(&self, id: &str) -> &[EmployeeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every employee below `id`, excluding `id` itself.
    pub fn descendants(&self, id: &str) -> HashSet<EmployeeId> {
        let mut seen: HashSet<EmployeeId> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for child in self.reports_of(current) {
                if child != id && seen.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }
        seen
    }

    /// Nest `employees` under the forest's roots for rendering.
    ///
    /// Each id is emitted at most once, so records caught in a corrupt loop
    /// (unreachable from any root) are simply absent from the result.
    pub fn nest<T: HierarchyNode + Clone>(&self, employees: &[T]) -> Vec<OrgNode<T>> {
        let by_id: HashMap<&str, &T> = employees.iter().map(|e| (e.node_id(), e)).collect();
        let mut emitted: HashSet<&str> = HashSet::new();
        self.roots
            .iter()
            .filter_map(|root| self.nest_node(root, &by_id, &mut emitted))
            .collect()
    }

    fn nest_node<'a, T: HierarchyNode + Clone>(
        &'a self,
        id: &'a str,
        by_id: &HashMap<&str, &T>,
        emitted: &mut HashSet<&'a str>,
    ) -> Option<OrgNode<T>> {
        if !emitted.insert(id) {
            return None;
        }
        let employee = (*by_id.get(id)?).clone();
        let reports = self
            .reports_of(id)
            .iter()
            .filter_map(|child| self.nest_node(child, by_id, emitted))
            .collect();
        Some(OrgNode { employee, reports })
    }
}

/// One employee in the rendered org chart with its reports beneath it.
#[derive(Debug, Clone, Serialize)]
pub struct OrgNode<T> {
    #[serde(flatten)]
    pub employee: T,
    pub reports: Vec<OrgNode<T>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(edges: &[(&str, Option<&str>)]) -> Vec<(EmployeeId, Option<EmployeeId>)> {
        edges
            .iter()
            .map(|(id, m)| (id.to_string(), m.map(str::to_string)))
            .collect()
    }

    fn ids(items: &[&str]) -> Vec<EmployeeId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_children_in_input_order() {
        let input = nodes(&[
            ("1", None),
            ("3", Some("1")),
            ("2", Some("1")),
            ("4", Some("2")),
        ]);
        let forest = build_forest(&input);
        assert_eq!(forest.roots, ids(&["1"]));
        assert_eq!(forest.reports_of("1"), ids(&["3", "2"]).as_slice());
        assert_eq!(forest.reports_of("2"), ids(&["4"]).as_slice());
        assert!(forest.reports_of("4").is_empty());
    }

    #[test]
    fn dangling_reference_is_a_root() {
        let input = nodes(&[("1", None), ("2", Some("gone"))]);
        let forest = build_forest(&input);
        assert_eq!(forest.roots, ids(&["1", "2"]));
        assert!(forest.children.is_empty());
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        let forest = build_forest::<(EmployeeId, Option<EmployeeId>)>(&[]);
        assert!(forest.roots.is_empty());
        assert!(forest.children.is_empty());
    }

    #[test]
    fn descendants_exclude_self() {
        let input = nodes(&[
            ("a", None),
            ("b", Some("a")),
            ("c", Some("b")),
            ("d", Some("c")),
            ("x", None),
        ]);
        let forest = build_forest(&input);
        let below_b = forest.descendants("b");
        assert_eq!(below_b.len(), 2);
        assert!(below_b.contains("c") && below_b.contains("d"));
        assert!(forest.descendants("d").is_empty());
        assert_eq!(forest.descendants("a").len(), 3);
    }

    #[test]
    fn descendants_terminate_on_corrupt_loop() {
        let input = nodes(&[("a", Some("b")), ("b", Some("a"))]);
        let forest = build_forest(&input);
        assert!(forest.roots.is_empty());
        let below_a = forest.descendants("a");
        assert_eq!(below_a.len(), 1);
        assert!(below_a.contains("b"));
    }

    #[test]
    fn duplicate_ids_do_not_crash() {
        let input = nodes(&[("a", None), ("b", Some("a")), ("b", Some("a"))]);
        let forest = build_forest(&input);
        assert_eq!(forest.reports_of("a").len(), 2);
        let nested = forest.nest(&input);
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].reports.len(), 1);
    }

    #[test]
    fn nest_renders_every_reachable_employee_once() {
        let input = nodes(&[
            ("1", None),
            ("2", Some("1")),
            ("3", Some("2")),
            ("5", Some("1")),
            ("loop1", Some("loop2")),
            ("loop2", Some("loop1")),
        ]);
        let forest = build_forest(&input);
        let nested = forest.nest(&input);

        assert_eq!(nested.len(), 1);
        let root = &nested[0];
        assert_eq!(root.employee.0, "1");
        assert_eq!(root.reports.len(), 2);
        assert_eq!(root.reports[0].employee.0, "2");
        assert_eq!(root.reports[0].reports[0].employee.0, "3");
        assert_eq!(root.reports[1].employee.0, "5");
    }

    /// Following manager references from any rendered node always ends at a
    /// root within a finite number of steps.
    #[test]
    fn every_non_root_chain_reaches_a_root() {
        let input = nodes(&[
            ("1", None),
            ("2", Some("1")),
            ("3", Some("2")),
            ("4", Some("missing")),
            ("5", Some("4")),
            ("6", Some("6")),
        ]);
        let forest = build_forest(&input);
        let parent: HashMap<&str, &str> = forest
            .children
            .iter()
            .flat_map(|(m, kids)| kids.iter().map(move |k| (k.as_str(), m.as_str())))
            .collect();

        for (id, _) in &input {
            let mut current = id.as_str();
            let mut steps = 0;
            while let Some(up) = parent.get(current) {
                current = up;
                steps += 1;
                if steps > input.len() {
                    break;
                }
            }
            let reaches_root = forest.roots.iter().any(|r| r == current);
            // "6" manages itself and is never rendered; everyone else reaches a root.
            if id != "6" {
                assert!(reaches_root, "{id} should reach a root");
            }
        }
    }
}
