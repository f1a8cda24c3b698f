//! Node -> LinkML class

use super::attributes::properties_to_attributes;
use super::names::{to_snake_case, NameResolver, NodeLookup};
use super::ontologies::{to_annotations, to_id_prefixes};
use super::relationships::relationships_from;
use super::types::{LinkMLAttribute, LinkMLClass, SpiresCoreClass};
use crate::model::{Node, Relationship};

/// Convert a node into its class declaration.
///
/// Outgoing inheritance edges are resolved in array order: the first parent
/// that exists becomes `is_a`, the rest become mixins. Nodes without an
/// identifier property get one synthesised from the snake-cased caption.
pub fn node_to_class(
    node: &Node,
    nodes: &NodeLookup<'_>,
    relationships: &[Relationship],
    names: &NameResolver,
) -> LinkMLClass {
    let mut parents = relationships_from(relationships, &node.id)
        .filter(|r| r.is_inheritance())
        .filter_map(|r| nodes.find(&r.to_id))
        .filter_map(|parent| names.class_name(&parent.id))
        .map(str::to_string);

    let is_a = parents
        .next()
        .unwrap_or_else(|| SpiresCoreClass::NamedEntity.as_str().to_string());
    let mixins: Vec<String> = parents.collect();

    let class_name = names
        .class_name(&node.id)
        .map(str::to_string)
        .unwrap_or_default();

    let mut attributes = properties_to_attributes(&node.properties);
    if !node.has_identifier() {
        attributes.insert(
            to_snake_case(&node.caption),
            LinkMLAttribute {
                identifier: Some(true),
                description: Some(format!("A unique identifier for the {} class.", class_name)),
                ..Default::default()
            },
        );
    }

    let ontologies = node.ontologies();
    LinkMLClass {
        is_a: Some(is_a),
        mixins,
        description: Some(node.description.clone()),
        attributes,
        id_prefixes: Some(to_id_prefixes(ontologies)),
        annotations: Some(to_annotations(ontologies)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Ontology};

    fn convert(node_id: &str, nodes: &[Node], relationships: &[Relationship]) -> LinkMLClass {
        let lookup = NodeLookup::new(nodes);
        let names = NameResolver::build(nodes, relationships, &[]);
        let node = lookup.find(node_id).unwrap();
        node_to_class(node, &lookup, relationships, &names)
    }

    #[test]
    fn test_synthesised_identifier() {
        let nodes = vec![Node::new("n0", "Medical Record").with_description("A record")];
        let class = convert("n0", &nodes, &[]);

        assert_eq!(class.is_a.as_deref(), Some("NamedEntity"));
        assert_eq!(class.description.as_deref(), Some("A record"));
        assert_eq!(class.attributes.len(), 1);
        let id = &class.attributes["medical_record"];
        assert_eq!(id.identifier, Some(true));
        assert_eq!(
            id.description.as_deref(),
            Some("A unique identifier for the MedicalRecord class.")
        );
        assert_eq!(class.id_prefixes, Some(vec![]));
        assert!(class.annotations.unwrap().is_empty());
    }

    #[test]
    fn test_explicit_identifier_suppresses_synthesis() {
        let nodes = vec![Node::new("n0", "Person")
            .with_property("ssn", Attribute::described("SSN").identifier())
            .with_property("name", Attribute::described("Name"))];
        let class = convert("n0", &nodes, &[]);

        assert_eq!(class.attributes.len(), 2);
        assert!(!class.attributes.contains_key("person"));
        assert_eq!(
            class.attributes.values().filter(|a| a.identifier == Some(true)).count(),
            1
        );
    }

    #[test]
    fn test_parent_and_mixins() {
        let nodes = vec![
            Node::new("dog", "Dog"),
            Node::new("animal", "Animal"),
            Node::new("pet", "Pet"),
            Node::new("named", "Named Thing"),
        ];
        let relationships = vec![
            Relationship::inheritance("r0", "dog", "animal"),
            Relationship::association("r1", "dog", "pet", "LIKES"),
            Relationship::inheritance("r2", "dog", "missing"),
            Relationship::inheritance("r3", "dog", "pet"),
            Relationship::inheritance("r4", "dog", "named"),
        ];
        let class = convert("dog", &nodes, &relationships);

        assert_eq!(class.is_a.as_deref(), Some("Animal"));
        assert_eq!(class.mixins, vec!["Pet", "NamedThing"]);
    }

    #[test]
    fn test_ontology_annotations() {
        let nodes = vec![Node::new("n0", "Gene").with_ontologies(vec![Ontology::new(
            "hgnc",
            "http://identifiers.org/hgnc/",
            "bioportal:hgnc-nr",
        )])];
        let class = convert("n0", &nodes, &[]);

        assert_eq!(class.id_prefixes, Some(vec!["HGNC".to_string()]));
        assert_eq!(class.annotations.unwrap()["annotators"], "bioportal:hgnc-nr");
    }
}
