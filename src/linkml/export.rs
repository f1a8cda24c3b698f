//! Graph -> LinkML
//!
//! Assembles the whole schema document from a diagram:
//! 1. Drop unnamed nodes and relationships without two distinct endpoints
//! 2. Document header, prefixes and imports
//! 3. Root classes for the chosen SPIRES mode
//! 4. Relationship + Predicate classes per association
//! 5. One class per node
//! 6. Enums referenced by property ranges

use indexmap::IndexMap;
use tracing::debug;

use super::attributes::referenced_enums;
use super::classes::node_to_class;
use super::names::{to_attribute_name, to_class_name, to_snake_case, NameResolver, NodeLookup};
use super::ontologies::to_prefixes;
use super::relationships::{relationship_to_predicate_class, relationship_to_relationship_class};
use super::types::{
    BasicType, EnumDefinition, EnumType, LinkML, LinkMLAttribute, LinkMLClass, SpiresCoreClass, SpiresType,
};
use crate::model::{Graph, Node, Ontology, Relationship};

pub const LINKML_PREFIX: (&str, &str) = ("linkml", "https://w3id.org/linkml/");
pub const ONTOGPT_PREFIX: (&str, &str) = ("ontogpt", "http://w3id.org/ontogpt/");
pub const IMPORTS: [&str; 2] = ["ontogpt:core", "linkml:types"];

/// Per-call view over the filtered diagram
struct ExportContext {
    nodes: Vec<Node>,
    relationships: Vec<Relationship>,
    names: NameResolver,
}

impl ExportContext {
    fn new(graph: &Graph, spires_type: SpiresType) -> Self {
        let nodes: Vec<Node> = graph
            .nodes
            .iter()
            .filter(|n| !to_class_name(&n.caption).is_empty())
            .cloned()
            .collect();

        let relationships: Vec<Relationship> = {
            let lookup = NodeLookup::new(&nodes);
            graph
                .relationships
                .iter()
                .filter(|r| match (lookup.find(&r.from_id), lookup.find(&r.to_id)) {
                    (Some(from), Some(to)) => from.caption != to.caption,
                    _ => false,
                })
                .cloned()
                .collect()
        };

        let dropped = graph.relationships.len() - relationships.len();
        if dropped > 0 {
            debug!(dropped, "skipped dangling or self-referential relationships");
        }

        let reserved: Vec<&str> = spires_type
            .root_class_names()
            .iter()
            .copied()
            .chain(SpiresCoreClass::ALL.iter().map(|c| c.as_str()))
            .collect();
        let names = NameResolver::build(&nodes, &relationships, &reserved);
        Self {
            nodes,
            relationships,
            names,
        }
    }

    fn lookup(&self) -> NodeLookup<'_> {
        NodeLookup::new(&self.nodes)
    }

    fn associations(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(|r| r.is_association())
    }

    fn caption(&self, id: &str) -> &str {
        self.nodes
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.caption.as_str())
            .unwrap_or_default()
    }

    fn document_description(&self, relationship: &Relationship) -> String {
        format!(
            "A document that contains {} to {} relationships",
            self.caption(&relationship.from_id),
            self.caption(&relationship.to_id)
        )
    }

    fn document_prompt(&self, relationship: &Relationship) -> String {
        let mut prompt = format!(
            "A semi-colon separated list of {} to {} relationships",
            self.caption(&relationship.from_id),
            self.caption(&relationship.to_id)
        );
        if relationship.r#type.is_empty() {
            prompt.push('.');
        } else {
            prompt.push_str(&format!(", where the relationship is \"{}\".", relationship.r#type));
        }
        if let Some(examples) = relationship.examples.as_deref().filter(|e| !e.is_empty()) {
            prompt.push_str(&format!(" For example: {}", examples.join(", ")));
        }
        prompt
    }

    /// Container + one `<Name>Document` per association
    fn relation_extraction_classes(&self) -> IndexMap<String, LinkMLClass> {
        let mut container_attributes = IndexMap::new();
        let mut documents = IndexMap::new();

        for relationship in self.associations() {
            let name = self.names.relationship_class_name(relationship);
            let description = self.document_description(relationship);
            let prompt = self.document_prompt(relationship);

            container_attributes.insert(
                format!("{}Document", to_attribute_name(&name)),
                LinkMLAttribute {
                    range: Some(format!("{}Document", name)),
                    description: Some(description.clone()),
                    annotations: prompt_annotation(&prompt),
                    ..Default::default()
                },
            );

            let mut slot_usage = IndexMap::new();
            slot_usage.insert(
                "triples".to_string(),
                LinkMLAttribute {
                    range: Some(format!("{}Relationship", name)),
                    annotations: prompt_annotation(&prompt),
                    ..Default::default()
                },
            );
            documents.insert(
                format!("{}Document", name),
                LinkMLClass {
                    is_a: Some(SpiresCoreClass::TextWithTriples.as_str().to_string()),
                    description: Some(description),
                    slot_usage,
                    ..Default::default()
                },
            );
        }

        let mut classes = IndexMap::with_capacity(documents.len() + 1);
        classes.insert(
            "Container".to_string(),
            LinkMLClass {
                tree_root: Some(true),
                is_a: Some(SpiresCoreClass::NamedEntity.as_str().to_string()),
                description: Some("A document that contains relationships between two entities.".to_string()),
                attributes: container_attributes,
                ..Default::default()
            },
        );
        classes.extend(documents);
        classes
    }

    /// A single `Document` with one multivalued attribute per node type
    fn entity_recognition_classes(&self) -> IndexMap<String, LinkMLClass> {
        let attributes = self
            .nodes
            .iter()
            .filter_map(|node| {
                let class_name = self.names.class_name(&node.id)?;
                Some((
                    to_attribute_name(class_name),
                    LinkMLAttribute {
                        range: Some(class_name.to_string()),
                        multivalued: Some(true),
                        ..Default::default()
                    },
                ))
            })
            .collect();

        let mut classes = IndexMap::new();
        classes.insert(
            "Document".to_string(),
            LinkMLClass {
                tree_root: Some(true),
                is_a: Some(SpiresCoreClass::TextWithEntity.as_str().to_string()),
                attributes,
                ..Default::default()
            },
        );
        classes
    }

    fn root_classes(&self, spires_type: SpiresType) -> IndexMap<String, LinkMLClass> {
        match spires_type {
            SpiresType::Re => self.relation_extraction_classes(),
            SpiresType::Er => self.entity_recognition_classes(),
            SpiresType::LinkMl => IndexMap::new(),
        }
    }

    fn ontologies(&self) -> Vec<Ontology> {
        self.nodes
            .iter()
            .flat_map(|n| n.ontologies().iter().cloned())
            .chain(self.relationships.iter().flat_map(|r| r.ontologies().iter().cloned()))
            .collect()
    }

    /// Referenced enums, each once, nodes before relationships
    fn enums(&self) -> Option<IndexMap<String, EnumDefinition>> {
        let referenced: Vec<EnumType> = self
            .nodes
            .iter()
            .flat_map(|n| referenced_enums(&n.properties))
            .chain(self.relationships.iter().flat_map(|r| referenced_enums(&r.properties)))
            .collect();

        if referenced.is_empty() {
            return None;
        }
        let mut enums = IndexMap::new();
        for enum_type in referenced {
            enums
                .entry(enum_type.as_str().to_string())
                .or_insert_with(|| enum_type.to_definition());
        }
        Some(enums)
    }
}

fn prompt_annotation(prompt: &str) -> IndexMap<String, String> {
    let mut annotations = IndexMap::new();
    annotations.insert("prompt".to_string(), prompt.to_string());
    annotations
}

/// Build a LinkML document named `name` from a diagram.
///
/// Deterministic and infallible: unnamed nodes, dangling relationships and
/// relationships between equally-captioned nodes are left out.
pub fn from_graph(name: &str, graph: &Graph, spires_type: SpiresType) -> LinkML {
    let ctx = ExportContext::new(graph, spires_type);
    let lookup = ctx.lookup();
    let snake_name = to_snake_case(name);

    let mut prefixes = IndexMap::new();
    prefixes.insert(LINKML_PREFIX.0.to_string(), LINKML_PREFIX.1.to_string());
    prefixes.insert(ONTOGPT_PREFIX.0.to_string(), ONTOGPT_PREFIX.1.to_string());
    prefixes.extend(to_prefixes(&ctx.ontologies()));

    let mut classes = ctx.root_classes(spires_type);
    for relationship in ctx.associations() {
        let class_name = ctx.names.relationship_class_name(relationship);
        classes.insert(
            format!("{}Relationship", class_name),
            relationship_to_relationship_class(relationship, &lookup, &ctx.names),
        );
        classes.insert(
            format!("{}Predicate", class_name),
            relationship_to_predicate_class(relationship, &ctx.names),
        );
    }
    for node in &ctx.nodes {
        let Some(class_name) = ctx.names.class_name(&node.id) else {
            continue;
        };
        classes.insert(
            class_name.to_string(),
            node_to_class(node, &lookup, &ctx.relationships, &ctx.names),
        );
    }

    debug!(
        schema = %snake_name,
        spires_type = %spires_type,
        nodes = ctx.nodes.len(),
        relationships = ctx.relationships.len(),
        classes = classes.len(),
        "built LinkML document"
    );

    LinkML {
        id: format!("https://example.com/{}", snake_name),
        default_range: Some(BasicType::String.as_str().to_string()),
        name: snake_name,
        title: name.to_string(),
        description: graph.description.clone().unwrap_or_default(),
        license: graph.license.clone(),
        prefixes,
        imports: IMPORTS.iter().map(|s| s.to_string()).collect(),
        enums: ctx.enums(),
        classes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, Cardinality};

    fn people_graph() -> Graph {
        Graph::new(
            vec![Node::new("n0", "Person"), Node::new("n1", "Company")],
            vec![Relationship::association("r0", "n0", "n1", "WORKS_AT").with_cardinality(Cardinality::OneToMany)],
        )
    }

    #[test]
    fn test_document_header() {
        let linkml = from_graph("My Schema", &people_graph(), SpiresType::LinkMl);

        assert_eq!(linkml.id, "https://example.com/my_schema");
        assert_eq!(linkml.name, "my_schema");
        assert_eq!(linkml.title, "My Schema");
        assert_eq!(linkml.default_range.as_deref(), Some("string"));
        assert_eq!(linkml.imports, vec!["ontogpt:core", "linkml:types"]);
        assert_eq!(linkml.prefixes["linkml"], "https://w3id.org/linkml/");
        assert_eq!(linkml.prefixes["ontogpt"], "http://w3id.org/ontogpt/");
        assert!(linkml.enums.is_none());
    }

    #[test]
    fn test_linkml_mode_classes() {
        let linkml = from_graph("x", &people_graph(), SpiresType::LinkMl);
        let keys: Vec<_> = linkml.classes.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "PersonWorksAtCompanyRelationship",
                "PersonWorksAtCompanyPredicate",
                "Person",
                "Company"
            ]
        );
    }

    #[test]
    fn test_relation_extraction_root() {
        let mut graph = people_graph();
        graph.relationships[0].examples = Some(vec!["Ann at Acme".into(), "Bo at Initech".into()]);
        let linkml = from_graph("x", &graph, SpiresType::Re);

        let container = &linkml.classes["Container"];
        assert_eq!(container.tree_root, Some(true));
        assert_eq!(container.is_a.as_deref(), Some("NamedEntity"));
        let attr = &container.attributes["personWorksAtCompanyDocument"];
        assert_eq!(attr.range.as_deref(), Some("PersonWorksAtCompanyDocument"));
        assert_eq!(
            attr.description.as_deref(),
            Some("A document that contains Person to Company relationships")
        );
        assert_eq!(
            attr.annotations["prompt"],
            "A semi-colon separated list of Person to Company relationships, where the relationship is \"WORKS_AT\". For example: Ann at Acme, Bo at Initech"
        );

        let document = &linkml.classes["PersonWorksAtCompanyDocument"];
        assert_eq!(document.is_a.as_deref(), Some("TextWithTriples"));
        assert_eq!(
            document.slot_usage["triples"].range.as_deref(),
            Some("PersonWorksAtCompanyRelationship")
        );
        assert_eq!(linkml.classes.keys().next().map(String::as_str), Some("Container"));
    }

    #[test]
    fn test_untyped_relationship_prompt() {
        let mut graph = people_graph();
        graph.relationships[0].r#type.clear();
        let linkml = from_graph("x", &graph, SpiresType::Re);
        assert_eq!(
            linkml.classes["PersonCompanyDocument"].slot_usage["triples"].annotations["prompt"],
            "A semi-colon separated list of Person to Company relationships."
        );
    }

    #[test]
    fn test_entity_recognition_root() {
        let graph = Graph::new(vec![Node::new("n0", "Medical Record"), Node::new("n1", "Person")], vec![]);
        let linkml = from_graph("x", &graph, SpiresType::Er);

        let document = &linkml.classes["Document"];
        assert_eq!(document.is_a.as_deref(), Some("TextWithEntity"));
        assert_eq!(document.tree_root, Some(true));
        let record = &document.attributes["medicalRecord"];
        assert_eq!(record.range.as_deref(), Some("MedicalRecord"));
        assert_eq!(record.multivalued, Some(true));
    }

    #[test]
    fn test_filters_unnamed_dangling_and_self_referential() {
        let graph = Graph::new(
            vec![
                Node::new("n0", "Person"),
                Node::new("n1", ""),
                Node::new("n2", "Person"),
                Node::new("n3", "Company"),
            ],
            vec![
                Relationship::association("r0", "n0", "n1", "TO_UNNAMED"),
                Relationship::association("r1", "n0", "n2", "KNOWS"),
                Relationship::association("r2", "n0", "ghost", "HAUNTS"),
                Relationship::association("r3", "n0", "n3", "WORKS_AT"),
            ],
        );
        let linkml = from_graph("x", &graph, SpiresType::LinkMl);

        let relationship_classes: Vec<_> = linkml
            .classes
            .keys()
            .filter(|k| k.ends_with("Relationship"))
            .collect();
        assert_eq!(relationship_classes, vec!["PersonWorksAtCompanyRelationship"]);
        assert!(!linkml.classes.contains_key(""));
    }

    #[test]
    fn test_enum_collection() {
        let graph = Graph::new(
            vec![
                Node::new("n0", "Person").with_property("gender", Attribute::described("G").with_range("Gender")),
                Node::new("n1", "Patient").with_property("sex", Attribute::described("S").with_range("Gender")),
            ],
            vec![],
        );
        let linkml = from_graph("x", &graph, SpiresType::LinkMl);

        let enums = linkml.enums.unwrap();
        assert_eq!(enums.len(), 1);
        let values: Vec<_> = enums["Gender"].permissible_values.keys().map(String::as_str).collect();
        assert_eq!(values, vec!["man", "woman"]);
    }

    #[test]
    fn test_ontology_prefixes_merged() {
        let gene = Node::new("n0", "Gene").with_ontologies(vec![Ontology::new(
            "hgnc",
            "http://identifiers.org/hgnc/",
            "bioportal:hgnc-nr",
        )]);
        let linkml = from_graph("x", &Graph::new(vec![gene], vec![]), SpiresType::LinkMl);
        let keys: Vec<_> = linkml.prefixes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["linkml", "ontogpt", "HGNC"]);
    }

    #[test]
    fn test_colliding_relationships_keep_separate_classes() {
        let graph = Graph::new(
            vec![
                Node::new("n0", "Person"),
                Node::new("n1", "Company"),
                Node::new("n2", "Person Works"),
                Node::new("n3", "At Company"),
            ],
            vec![
                Relationship::association("r0", "n0", "n1", "WORKS_AT"),
                Relationship::association("r1", "n0", "n1", "WORKS_AT"),
                Relationship::association("r2", "n2", "n3", ""),
            ],
        );
        let linkml = from_graph("x", &graph, SpiresType::Re);

        for suffix in ["Relationship", "Predicate", "Document"] {
            let keys: Vec<_> = linkml
                .classes
                .keys()
                .filter(|k| k.starts_with("PersonWorksAtCompany") && k.ends_with(suffix))
                .map(String::as_str)
                .collect();
            assert_eq!(keys.len(), 3, "{} classes: {:?}", suffix, keys);
        }

        let third = &linkml.classes["PersonWorksAtCompany3Relationship"];
        assert_eq!(
            third.description.as_deref(),
            Some("A triple where the subject is a Person Works and where the object is a At Company")
        );
        assert_eq!(
            third.slot_usage["predicate"].range.as_deref(),
            Some("PersonWorksAtCompany3Predicate")
        );
        assert_eq!(
            linkml.classes["PersonWorksAtCompany2Document"].slot_usage["triples"].range.as_deref(),
            Some("PersonWorksAtCompany2Relationship")
        );
        assert_eq!(linkml.classes["Container"].attributes.len(), 3);
    }

    #[test]
    fn test_root_and_core_names_reserved() {
        let graph = Graph::new(vec![Node::new("n0", "Container"), Node::new("n1", "Triple")], vec![]);

        let re = from_graph("x", &graph, SpiresType::Re);
        assert_eq!(re.classes["Container"].tree_root, Some(true));
        assert_eq!(re.classes["Container2"].is_a.as_deref(), Some("NamedEntity"));
        assert!(re.classes.contains_key("Triple2"));
        assert!(!re.classes.contains_key("Triple"));

        let er = from_graph("x", &Graph::new(vec![Node::new("n0", "Document")], vec![]), SpiresType::Er);
        assert_eq!(er.classes["Document"].tree_root, Some(true));
        assert_eq!(er.classes["Document"].attributes["document2"].range.as_deref(), Some("Document2"));
        assert_eq!(er.classes["Document2"].is_a.as_deref(), Some("NamedEntity"));

        let plain = from_graph("x", &graph, SpiresType::LinkMl);
        assert!(plain.classes.contains_key("Container"));
        assert_eq!(plain.classes["Container"].tree_root, None);
    }

    #[test]
    fn test_punctuation_only_caption_skipped() {
        let graph = Graph::new(
            vec![Node::new("n0", "!!!"), Node::new("n1", "Person")],
            vec![Relationship::association("r0", "n1", "n0", "SHOUTS")],
        );
        let linkml = from_graph("x", &graph, SpiresType::LinkMl);

        let keys: Vec<_> = linkml.classes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Person"]);
    }

    #[test]
    fn test_deterministic() {
        let graph = people_graph();
        assert_eq!(
            from_graph("x", &graph, SpiresType::Re),
            from_graph("x", &graph, SpiresType::Re)
        );
    }
}
