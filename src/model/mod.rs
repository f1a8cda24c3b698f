//! Diagram Model
//!
//! The value types the editor hands to the converter: a [`Graph`] of
//! [`Node`]s joined by [`Relationship`]s, with free-form [`Attribute`]
//! descriptors and [`Ontology`] annotations.
//!
//! Field names follow the editor's JSON (camelCase). Anything the editor
//! stores that the converter does not use (positions, styles, entity
//! markers) is ignored on input.

pub mod ontology;
pub mod relationship;

pub use ontology::Ontology;
pub use relationship::{Cardinality, CustomCardinality, Relationship, RelationshipType};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Node or relationship identifier
pub type Id = String;

/// A whole diagram
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Opaque editor styling, carried through untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub style: serde_json::Value,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        Self {
            nodes,
            relationships,
            ..Default::default()
        }
    }

    /// Parse a graph from the editor's JSON export
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A diagram node; becomes a LinkML class when its caption is non-empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: Id,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: IndexMap<String, Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontologies: Option<Vec<Ontology>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
}

impl Node {
    pub fn new(id: impl Into<Id>, caption: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            caption: caption.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, attribute: Attribute) -> Self {
        self.properties.insert(key.into(), attribute);
        self
    }

    pub fn with_ontologies(mut self, ontologies: Vec<Ontology>) -> Self {
        self.ontologies = Some(ontologies);
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = Some(examples.into_iter().map(Into::into).collect());
        self
    }

    /// Ontologies attached to this node, empty when unset
    pub fn ontologies(&self) -> &[Ontology] {
        self.ontologies.as_deref().unwrap_or_default()
    }

    pub fn has_identifier(&self) -> bool {
        self.properties.values().any(|p| p.identifier.unwrap_or(false))
    }
}

/// Free-form property descriptor on a node or relationship
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,
    /// Basic type, enum type or regex type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// `list`, `set` or `array`; anything else is ignored on export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

impl Attribute {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    pub fn with_collection(mut self, collection_type: impl Into<String>) -> Self {
        self.collection_type = Some(collection_type.into());
        self
    }

    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    pub fn identifier(mut self) -> Self {
        self.identifier = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_json_ignores_editor_fields() {
        let json = r#"{
            "nodes": [{
                "id": "n0",
                "caption": "Person",
                "position": {"x": 1.0, "y": 2.0},
                "style": {},
                "entityType": "node",
                "properties": {"age": {"description": "Age", "collectionType": "list"}}
            }],
            "relationships": [],
            "style": {"font-size": 12}
        }"#;

        let graph = Graph::from_json(json).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].caption, "Person");
        assert_eq!(graph.nodes[0].description, "");
        let age = &graph.nodes[0].properties["age"];
        assert_eq!(age.collection_type.as_deref(), Some("list"));
        assert!(graph.style.is_object());
    }

    #[test]
    fn test_has_identifier() {
        let plain = Node::new("n0", "Person").with_property("name", Attribute::described("Name"));
        assert!(!plain.has_identifier());

        let keyed = plain.with_property("ssn", Attribute::described("SSN").identifier());
        assert!(keyed.has_identifier());
    }
}
