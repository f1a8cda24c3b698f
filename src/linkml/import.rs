//! LinkML -> Graph
//!
//! Reconstructs diagram nodes and relationships from a schema document in
//! two passes:
//! 1. Materialise a node for every class rooted at `NamedEntity` or at an
//!    already-materialised class, repeating full passes until one adds
//!    nothing. Parents therefore always exist before their children.
//! 2. Turn every `Triple` class whose subject and object ranges name
//!    materialised nodes into an association.
//!
//! Classes that resolve to neither are dropped.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use super::hierarchy;
use super::relationships::PROMPT_EXAMPLES;
use super::types::{LinkML, LinkMLAttribute, LinkMLClass, SpiresCoreClass};
use crate::model::{Attribute, Cardinality, Node, Ontology, Relationship};

/// Nodes and relationships recovered from a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMLGraph {
    pub nodes: Vec<Node>,
    pub relationships: Vec<Relationship>,
}

impl LinkMLGraph {
    pub fn node_by_caption(&self, caption: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.caption == caption)
    }
}

fn attribute_to_property(attribute: &LinkMLAttribute) -> Attribute {
    Attribute {
        description: attribute.description.clone().unwrap_or_default(),
        required: Some(attribute.required.unwrap_or(false)),
        identifier: Some(attribute.identifier.unwrap_or(false)),
        range: attribute.range.clone(),
        ..Default::default()
    }
}

fn class_to_node(id: String, name: &str, class: &LinkMLClass, ontologies: &[Ontology]) -> Node {
    let id_prefixes = class.id_prefixes.as_deref().unwrap_or_default();
    Node {
        id,
        caption: name.to_string(),
        description: class.description.clone().unwrap_or_default(),
        properties: class
            .attributes
            .iter()
            .map(|(key, attribute)| (key.clone(), attribute_to_property(attribute)))
            .collect::<IndexMap<_, _>>(),
        ontologies: Some(
            ontologies
                .iter()
                .filter(|o| id_prefixes.contains(&o.prefix()))
                .cloned()
                .collect(),
        ),
        examples: None,
    }
}

/// Split a `prompt.examples` annotation back into entries
fn parse_examples(slot: &LinkMLAttribute) -> Option<Vec<String>> {
    slot.annotations.get(PROMPT_EXAMPLES).map(|joined| {
        joined
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Rebuild a diagram from a LinkML document.
///
/// Node and relationship ids are assigned sequentially from `"0"`. Node
/// ontologies are picked from `ontologies` by the class's `id_prefixes`.
pub fn to_graph(linkml: &LinkML, ontologies: &[Ontology]) -> LinkMLGraph {
    let mut nodes: Vec<Node> = Vec::new();
    let position = |nodes: &[Node], caption: &str| nodes.iter().position(|n| n.caption == caption);

    // Pass 1: fixed point over the class hierarchy
    let mut passes = 0;
    loop {
        passes += 1;
        let mut progress = false;
        for (name, class) in &linkml.classes {
            if position(&nodes, name.as_str()).is_some() {
                continue;
            }
            let rooted = class.is_a_core(SpiresCoreClass::NamedEntity);
            let has_parent = class.parents().any(|p| position(&nodes, p).is_some());
            if rooted || has_parent {
                let node = class_to_node(nodes.len().to_string(), name, class, ontologies);
                nodes.push(node);
                progress = true;
            }
        }
        if !progress {
            break;
        }
    }

    let mut relationships: Vec<Relationship> = Vec::new();
    let mut next_relationship_id = 0usize;
    let mut next_id = || {
        let id = next_relationship_id.to_string();
        next_relationship_id += 1;
        id
    };

    // Inheritance edges, child order, is_a before mixins
    for child in &nodes {
        let class = &linkml.classes[child.caption.as_str()];
        let mut seen = HashSet::new();
        for parent in class.parents() {
            if parent == child.caption || !seen.insert(parent) {
                continue;
            }
            if let Some(parent_idx) = position(&nodes, parent) {
                relationships.push(Relationship::inheritance(next_id(), child.id.clone(), nodes[parent_idx].id.clone()));
            }
        }
    }

    // Pass 2: triples
    let mut resolved_triples = HashSet::new();
    for (name, class) in &linkml.classes {
        if !class.is_a_core(SpiresCoreClass::Triple) {
            continue;
        }
        let (Some(subject), Some(object)) = (class.slot_usage.get("subject"), class.slot_usage.get("object")) else {
            continue;
        };
        let from_idx = subject.range.as_deref().and_then(|r| position(&nodes, r));
        let to_idx = object.range.as_deref().and_then(|r| position(&nodes, r));
        let (Some(from_idx), Some(to_idx)) = (from_idx, to_idx) else {
            continue;
        };

        if let Some(examples) = parse_examples(subject) {
            nodes[from_idx].examples = Some(examples);
        }
        if let Some(examples) = parse_examples(object) {
            nodes[to_idx].examples = Some(examples);
        }

        let mut relationship = Relationship::association(
            next_id(),
            nodes[from_idx].id.clone(),
            nodes[to_idx].id.clone(),
            "",
        )
        .with_cardinality(Cardinality::OneToMany)
        .with_description(class.description.clone().unwrap_or_default());
        relationship.examples = class.slot_usage.get("predicate").and_then(parse_examples);
        relationships.push(relationship);
        resolved_triples.insert(name.as_str());
    }

    report_dropped(linkml, &nodes, &resolved_triples);
    debug!(
        classes = linkml.classes.len(),
        nodes = nodes.len(),
        relationships = relationships.len(),
        passes,
        "rebuilt graph from LinkML"
    );

    LinkMLGraph { nodes, relationships }
}

/// Log classes that became neither a node nor a relationship. Classes rooted
/// at a non-entity core class (predicates, documents) are expected to vanish.
fn report_dropped(linkml: &LinkML, nodes: &[Node], resolved_triples: &HashSet<&str>) {
    let materialised: HashSet<&str> = nodes.iter().map(|n| n.caption.as_str()).collect();
    let dropped: Vec<&str> = linkml
        .classes
        .iter()
        .filter(|(name, class)| {
            !materialised.contains(name.as_str())
                && !resolved_triples.contains(name.as_str())
                && !matches!(
                    class.is_a.as_deref().and_then(SpiresCoreClass::from_name),
                    Some(
                        SpiresCoreClass::RelationshipType
                            | SpiresCoreClass::TextWithEntity
                            | SpiresCoreClass::TextWithTriples
                    )
                )
        })
        .map(|(name, _)| name.as_str())
        .collect();

    if dropped.is_empty() {
        return;
    }
    let report = hierarchy::analyze(linkml);
    for name in dropped {
        match report.reason(name) {
            Some(reason) => warn!(class = name, ?reason, "dropping class with unresolvable hierarchy"),
            None => warn!(class = name, "dropping class with unresolvable subject or object"),
        }
    }
}
