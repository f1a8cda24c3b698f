//! Relationship reification: cardinality bounds, Triple and Predicate classes

use indexmap::IndexMap;

use super::attributes::properties_to_attributes;
use super::names::{NameResolver, NodeLookup};
use super::ontologies::{to_annotations, to_id_prefixes};
use super::types::{LinkMLAttribute, LinkMLClass, SpiresCoreClass};
use crate::model::{Cardinality, Node, Relationship};

/// Annotation key carrying comma-separated examples on triple slots
pub const PROMPT_EXAMPLES: &str = "prompt.examples";

/// Which end of a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipMember {
    Subject,
    Object,
}

impl RelationshipMember {
    pub fn slot_name(&self) -> &'static str {
        match self {
            RelationshipMember::Subject => "subject",
            RelationshipMember::Object => "object",
        }
    }
}

/// Endpoint bounds; a `None` maximum means unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityBounds {
    pub subject_minimum: u32,
    pub subject_maximum: Option<u32>,
    pub object_minimum: u32,
    pub object_maximum: Option<u32>,
}

/// Minimum occurrences; only custom cardinalities can raise it above 0
pub fn minimum_cardinality(relationship: &Relationship, member: RelationshipMember) -> u32 {
    match relationship.cardinality {
        Some(Cardinality::Custom) => {
            let custom = relationship.custom_cardinality.unwrap_or_default();
            match member {
                RelationshipMember::Subject => custom.subject_minimum.unwrap_or(0),
                RelationshipMember::Object => custom.object_minimum.unwrap_or(0),
            }
        }
        _ => 0,
    }
}

/// Maximum occurrences
pub fn maximum_cardinality(relationship: &Relationship, member: RelationshipMember) -> Option<u32> {
    use RelationshipMember::*;

    match relationship.cardinality {
        Some(Cardinality::Custom) => {
            let custom = relationship.custom_cardinality.unwrap_or_default();
            match member {
                Subject => custom.subject_maximum,
                Object => custom.object_maximum,
            }
        }
        Some(Cardinality::OneToOne) => Some(1),
        Some(Cardinality::OneToMany) => (member == Subject).then_some(1),
        Some(Cardinality::ManyToOne) => (member == Object).then_some(1),
        Some(Cardinality::ManyToMany) | None => None,
    }
}

pub fn cardinality_bounds(relationship: &Relationship) -> CardinalityBounds {
    use RelationshipMember::*;

    CardinalityBounds {
        subject_minimum: minimum_cardinality(relationship, Subject),
        subject_maximum: maximum_cardinality(relationship, Subject),
        object_minimum: minimum_cardinality(relationship, Object),
        object_maximum: maximum_cardinality(relationship, Object),
    }
}

/// Relationships leaving `node_id`, in array order
pub fn relationships_from<'a>(
    relationships: &'a [Relationship],
    node_id: &'a str,
) -> impl Iterator<Item = &'a Relationship> + 'a {
    relationships.iter().filter(move |r| r.from_id == node_id)
}

fn examples_annotation(examples: Option<&[String]>) -> IndexMap<String, String> {
    let mut annotations = IndexMap::new();
    annotations.insert(
        PROMPT_EXAMPLES.to_string(),
        examples.map(|e| e.join(", ")).unwrap_or_default(),
    );
    annotations
}

fn triple_slot(
    relationship: &Relationship,
    node: Option<&Node>,
    member: RelationshipMember,
    names: &NameResolver,
) -> LinkMLAttribute {
    let Some(node) = node else {
        return LinkMLAttribute::default();
    };

    LinkMLAttribute {
        range: names.class_name(&node.id).map(str::to_string),
        annotations: examples_annotation(node.examples.as_deref()),
        minimum_cardinality: Some(minimum_cardinality(relationship, member)),
        maximum_cardinality: maximum_cardinality(relationship, member),
        ..Default::default()
    }
}

fn triple_description(from: Option<&Node>, to: Option<&Node>, description: &str) -> String {
    let mut text = String::from("A triple");
    if let Some(from) = from {
        text.push_str(&format!(" where the subject is a {}", from.caption));
    }
    if from.is_some() && to.is_some() {
        text.push_str(" and");
    }
    if let Some(to) = to {
        text.push_str(&format!(" where the object is a {}", to.caption));
    }
    if !description.is_empty() {
        text.push_str(&format!(". {}", description));
    }
    text
}

/// The `<Name>Relationship` class: a Triple with subject/object/predicate
/// slot usage plus the relationship's own properties.
pub fn relationship_to_relationship_class(
    relationship: &Relationship,
    nodes: &NodeLookup<'_>,
    names: &NameResolver,
) -> LinkMLClass {
    let from = nodes.find(&relationship.from_id);
    let to = nodes.find(&relationship.to_id);

    let mut slot_usage = IndexMap::new();
    slot_usage.insert(
        RelationshipMember::Subject.slot_name().to_string(),
        triple_slot(relationship, from, RelationshipMember::Subject, names),
    );
    slot_usage.insert(
        RelationshipMember::Object.slot_name().to_string(),
        triple_slot(relationship, to, RelationshipMember::Object, names),
    );
    slot_usage.insert(
        "predicate".to_string(),
        LinkMLAttribute {
            range: Some(format!("{}Predicate", names.relationship_class_name(relationship))),
            annotations: examples_annotation(relationship.examples.as_deref()),
            ..Default::default()
        },
    );
    slot_usage.extend(properties_to_attributes(&relationship.properties));

    LinkMLClass {
        is_a: Some(SpiresCoreClass::Triple.as_str().to_string()),
        description: Some(triple_description(from, to, &relationship.description)),
        slot_usage,
        ..Default::default()
    }
}

/// The `<Name>Predicate` class identifying the relationship type
pub fn relationship_to_predicate_class(relationship: &Relationship, names: &NameResolver) -> LinkMLClass {
    let ontologies = relationship.ontologies();

    let mut attributes = IndexMap::new();
    attributes.insert(
        "label".to_string(),
        LinkMLAttribute {
            description: Some(format!(
                "The predicate for the {} relationships.",
                names.relationship_class_name(relationship)
            )),
            ..Default::default()
        },
    );

    LinkMLClass {
        is_a: Some(SpiresCoreClass::RelationshipType.as_str().to_string()),
        attributes,
        id_prefixes: Some(to_id_prefixes(ontologies)),
        annotations: Some(to_annotations(ontologies)),
        ..Default::default()
    }
}
