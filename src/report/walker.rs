//! Group hierarchy traversal
//!
//! Groups arrive as a flat list with parent pointers. [`GroupIndex`] builds a
//! parent-to-children index once, then walks it depth-first in source-list
//! order: a group is visited before its children, and siblings keep the order
//! they have in the list.

use std::collections::{HashMap, HashSet};

use crate::client::models::Group;

/// Which groups a walk starts from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupScope {
    /// Every group without a parent
    Roots,
    /// Every group with exactly this name
    Named(String),
}

impl GroupScope {
    /// Scope from an optional group name; `None` selects the roots.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some(name) => GroupScope::Named(name.to_string()),
            None => GroupScope::Roots,
        }
    }

    pub fn matches(&self, group: &Group) -> bool {
        match self {
            GroupScope::Roots => group.is_root(),
            GroupScope::Named(name) => group.name == *name,
        }
    }
}

/// A group reached by a walk, with its depth below the scoped group
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub group: &'a Group,
    pub depth: usize,
}

/// Parent-to-children index over a flat group list
pub struct GroupIndex<'a> {
    groups: &'a [Group],
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> GroupIndex<'a> {
    pub fn new(groups: &'a [Group]) -> Self {
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, group) in groups.iter().enumerate() {
            if let Some(parent) = group.parent_id.as_deref() {
                children.entry(parent).or_default().push(i);
            }
        }

        Self { groups, children }
    }

    /// Indices of the children of `group`, in source-list order.
    ///
    /// A group that does not declare children has none, whatever the list says.
    fn child_indices(&self, group: &Group) -> &[usize] {
        if !group.has_children {
            return &[];
        }
        self.children
            .get(group.id.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every group to process for `scope`, in processing order.
    ///
    /// With `recurse`, each scoped group is followed by its whole subtree.
    /// A group is visited at most once even if it is reachable twice.
    pub fn walk(&self, scope: &GroupScope, recurse: bool) -> Vec<Visit<'a>> {
        let mut visited = HashSet::new();
        let mut visits = Vec::new();

        for (i, group) in self.groups.iter().enumerate() {
            if scope.matches(group) {
                self.visit_subtree(i, recurse, &mut visited, &mut visits);
            }
        }

        visits
    }

    fn visit_subtree(
        &self,
        start: usize,
        recurse: bool,
        visited: &mut HashSet<usize>,
        visits: &mut Vec<Visit<'a>>,
    ) {
        let groups = self.groups;
        let mut stack = vec![(start, 0)];

        while let Some((i, depth)) = stack.pop() {
            if !visited.insert(i) {
                continue;
            }

            let group = &groups[i];
            visits.push(Visit { group, depth });

            if recurse {
                // Reversed so the first child is popped first.
                let children = self.child_indices(group);
                stack.extend(children.iter().rev().map(|&c| (c, depth + 1)));
            }
        }
    }
}
