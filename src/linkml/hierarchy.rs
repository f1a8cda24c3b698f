//! Class Hierarchy Analysis
//!
//! Builds the `is_a`/`mixins` graph of a LinkML document and reports the
//! classes that can never be rooted in one of the `ontogpt:core` base
//! classes: members of inheritance cycles and classes whose ancestry ends
//! at an undeclared name.

use petgraph::algo::{has_path_connecting, kosaraju_scc};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::types::{LinkML, SpiresCoreClass};

/// Why a class has no path to a core class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum UnrootedReason {
    /// Neither `is_a` nor mixins are set
    NoParent,
    /// A parent name is neither declared nor a core class
    UnknownParent(String),
    /// The class sits in an inheritance cycle
    Cyclic,
    /// All parents are themselves unrooted
    UnrootedParent(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnrootedClass {
    pub class: String,
    pub reason: UnrootedReason,
}

/// Result of [`analyze`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyReport {
    /// Groups of classes inheriting from each other, in declaration order
    pub cycles: Vec<Vec<String>>,
    /// Classes with no path to a core class, in declaration order
    pub unrooted: Vec<UnrootedClass>,
}

impl HierarchyReport {
    pub fn is_clean(&self) -> bool {
        self.cycles.is_empty() && self.unrooted.is_empty()
    }

    pub fn reason(&self, class: &str) -> Option<&UnrootedReason> {
        self.unrooted.iter().find(|u| u.class == class).map(|u| &u.reason)
    }
}

/// Analyze the inheritance structure of a document
pub fn analyze(linkml: &LinkML) -> HierarchyReport {
    let mut graph: DiGraph<String, ()> = DiGraph::with_capacity(linkml.classes.len(), linkml.classes.len());
    let mut indices: HashMap<String, NodeIndex> = HashMap::with_capacity(linkml.classes.len());

    let mut index_of = |graph: &mut DiGraph<String, ()>, name: &str| -> NodeIndex {
        *indices
            .entry(name.to_string())
            .or_insert_with(|| graph.add_node(name.to_string()))
    };

    let core: Vec<NodeIndex> = SpiresCoreClass::ALL
        .iter()
        .map(|c| index_of(&mut graph, c.as_str()))
        .collect();
    let declared: Vec<(NodeIndex, &str)> = linkml
        .classes
        .keys()
        .map(|name| (index_of(&mut graph, name), name.as_str()))
        .collect();

    let mut self_parented = HashSet::new();
    for (name, class) in &linkml.classes {
        let child = index_of(&mut graph, name);
        for parent in class.parents() {
            let parent_idx = index_of(&mut graph, parent);
            if parent_idx == child {
                self_parented.insert(child);
            }
            graph.update_edge(child, parent_idx, ());
        }
    }

    // Cycles: multi-member SCCs plus direct self-references
    let mut in_cycle = HashSet::new();
    let mut cycles = Vec::new();
    for scc in kosaraju_scc(&graph) {
        if scc.len() > 1 || self_parented.contains(&scc[0]) {
            in_cycle.extend(scc.iter().copied());
            let members: HashSet<NodeIndex> = scc.into_iter().collect();
            cycles.push(
                declared
                    .iter()
                    .filter(|(idx, _)| members.contains(idx))
                    .map(|(_, name)| name.to_string())
                    .collect::<Vec<_>>(),
            );
        }
    }
    // Report cycles in the order their first member was declared
    cycles.sort_by_key(|members| {
        members
            .first()
            .and_then(|m| linkml.classes.get_index_of(m))
            .unwrap_or(usize::MAX)
    });

    let rooted = |idx: NodeIndex| {
        core.contains(&idx) || core.iter().any(|&c| has_path_connecting(&graph, idx, c, None))
    };

    let mut unrooted = Vec::new();
    for &(idx, name) in &declared {
        if rooted(idx) {
            continue;
        }
        let class = &linkml.classes[name];
        let reason = if in_cycle.contains(&idx) {
            UnrootedReason::Cyclic
        } else if let Some(first) = class.parents().next() {
            match class.parents().find(|p| !linkml.classes.contains_key(*p)) {
                Some(unknown) => UnrootedReason::UnknownParent(unknown.to_string()),
                None => UnrootedReason::UnrootedParent(first.to_string()),
            }
        } else {
            UnrootedReason::NoParent
        };
        unrooted.push(UnrootedClass {
            class: name.to_string(),
            reason,
        });
    }

    HierarchyReport { cycles, unrooted }
}
