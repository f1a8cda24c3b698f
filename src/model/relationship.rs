//! Relationships between diagram nodes

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Attribute, Id, Ontology};

/// Kind of edge drawn in the editor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    /// A named association; exported as Triple/Predicate classes
    #[default]
    Association,
    /// An "is-a" or mixin edge from child to parent
    Inheritance,
}

/// Multiplicity of a relationship's two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
    /// Bounds come from [`CustomCardinality`]
    Custom,
}

/// User-specified endpoint bounds for [`Cardinality::Custom`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCardinality {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_minimum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_maximum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_minimum: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_maximum: Option<u32>,
}

/// An edge between two nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: Id,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub relationship_type: RelationshipType,
    pub from_id: Id,
    pub to_id: Id,
    #[serde(default)]
    pub properties: IndexMap<String, Attribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<Cardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_cardinality: Option<CustomCardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ontologies: Option<Vec<Ontology>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default)]
    pub description: String,
}

impl Relationship {
    /// A named association, defaulting to one-to-many like the editor does
    pub fn association(
        id: impl Into<Id>,
        from_id: impl Into<Id>,
        to_id: impl Into<Id>,
        r#type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            r#type: r#type.into(),
            relationship_type: RelationshipType::Association,
            from_id: from_id.into(),
            to_id: to_id.into(),
            cardinality: Some(Cardinality::OneToMany),
            ..Default::default()
        }
    }

    /// An inheritance edge from `child_id` to `parent_id`
    pub fn inheritance(id: impl Into<Id>, child_id: impl Into<Id>, parent_id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            relationship_type: RelationshipType::Inheritance,
            from_id: child_id.into(),
            to_id: parent_id.into(),
            ..Default::default()
        }
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }

    pub fn with_custom_cardinality(mut self, custom: CustomCardinality) -> Self {
        self.cardinality = Some(Cardinality::Custom);
        self.custom_cardinality = Some(custom);
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

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_association(&self) -> bool {
        self.relationship_type == RelationshipType::Association
    }

    pub fn is_inheritance(&self) -> bool {
        self.relationship_type == RelationshipType::Inheritance
    }

    /// Ontologies attached to this relationship, empty when unset
    pub fn ontologies(&self) -> &[Ontology] {
        self.ontologies.as_deref().unwrap_or_default()
    }

}
