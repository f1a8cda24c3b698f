//! LinkML document types and the fixed value tables the converter knows

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LinkmlError;

// =============================================================================
// Document
// =============================================================================

/// A LinkML schema document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkML {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_range: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default)]
    pub prefixes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default)]
    pub classes: IndexMap<String, LinkMLClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enums: Option<IndexMap<String, EnumDefinition>>,
}

/// A class declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkMLClass {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_a: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, LinkMLAttribute>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub slot_usage: IndexMap<String, LinkMLAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_prefixes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_root: Option<bool>,
}

impl LinkMLClass {
    /// Parent names in resolution order: `is_a` first, then mixins
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.is_a
            .as_deref()
            .into_iter()
            .chain(self.mixins.iter().map(String::as_str))
    }

    pub fn is_a_core(&self, core: SpiresCoreClass) -> bool {
        self.is_a.as_deref() == Some(core.as_str())
    }
}

/// An attribute or slot-usage entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkMLAttribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multivalued: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_values: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<ArrayConstraint>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub annotations: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_cardinality: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_cardinality: Option<u32>,
}

/// Dimensional constraint for array-valued attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_number_dimensions: Option<u32>,
}

/// An enumeration; permissible values are usually bare (`null`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDefinition {
    #[serde(default)]
    pub permissible_values: IndexMap<String, Option<PermissibleValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissibleValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// =============================================================================
// Generation modes and core classes
// =============================================================================

/// Which root/document structure to synthesise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpiresType {
    /// Plain LinkML, no root class
    #[serde(rename = "LinkML")]
    LinkMl,
    /// Relation extraction: one document class per association
    #[default]
    #[serde(rename = "Spires RE")]
    Re,
    /// Entity recognition: one root attribute per node type
    #[serde(rename = "Spires ER")]
    Er,
}

impl SpiresType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpiresType::LinkMl => "LinkML",
            SpiresType::Re => "Spires RE",
            SpiresType::Er => "Spires ER",
        }
    }

    /// Fixed names of the root classes this mode synthesises
    pub fn root_class_names(&self) -> &'static [&'static str] {
        match self {
            SpiresType::LinkMl => &[],
            SpiresType::Re => &["Container"],
            SpiresType::Er => &["Document"],
        }
    }
}

impl fmt::Display for SpiresType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpiresType {
    type Err = LinkmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkml" => Ok(SpiresType::LinkMl),
            "re" | "spires re" | "spires-re" => Ok(SpiresType::Re),
            "er" | "spires er" | "spires-er" => Ok(SpiresType::Er),
            _ => Err(LinkmlError::UnknownSpiresType(s.to_string())),
        }
    }
}

/// Base classes provided by the `ontogpt:core` import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpiresCoreClass {
    NamedEntity,
    RelationshipType,
    TextWithEntity,
    TextWithTriples,
    Triple,
}

impl SpiresCoreClass {
    pub const ALL: [SpiresCoreClass; 5] = [
        SpiresCoreClass::NamedEntity,
        SpiresCoreClass::RelationshipType,
        SpiresCoreClass::TextWithEntity,
        SpiresCoreClass::TextWithTriples,
        SpiresCoreClass::Triple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpiresCoreClass::NamedEntity => "NamedEntity",
            SpiresCoreClass::RelationshipType => "RelationshipType",
            SpiresCoreClass::TextWithEntity => "TextWithEntity",
            SpiresCoreClass::TextWithTriples => "TextWithTriples",
            SpiresCoreClass::Triple => "Triple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

// =============================================================================
// Range value tables
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    String,
    Integer,
    Boolean,
    Float,
    Date,
    Datetime,
}

impl BasicType {
    pub const ALL: [BasicType; 6] = [
        BasicType::String,
        BasicType::Integer,
        BasicType::Boolean,
        BasicType::Float,
        BasicType::Date,
        BasicType::Datetime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BasicType::String => "string",
            BasicType::Integer => "integer",
            BasicType::Boolean => "boolean",
            BasicType::Float => "float",
            BasicType::Date => "date",
            BasicType::Datetime => "datetime",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionType {
    List,
    Set,
    Array,
}

impl CollectionType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "list" => Some(CollectionType::List),
            "set" => Some(CollectionType::Set),
            "array" => Some(CollectionType::Array),
            _ => None,
        }
    }
}

/// String types constrained by a fixed pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegexType {
    AmericanPhoneNumber,
}

impl RegexType {
    pub const ALL: [RegexType; 1] = [RegexType::AmericanPhoneNumber];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegexType::AmericanPhoneNumber => "American Phone Number",
        }
    }

    pub fn pattern(&self) -> &'static str {
        match self {
            RegexType::AmericanPhoneNumber => r"^[\d\(\)\-]+$",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Enumerations with a fixed set of permissible values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumType {
    Gender,
}

impl EnumType {
    pub const ALL: [EnumType; 1] = [EnumType::Gender];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnumType::Gender => "Gender",
        }
    }

    pub fn permissible_values(&self) -> &'static [&'static str] {
        match self {
            EnumType::Gender => &["man", "woman"],
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn to_definition(&self) -> EnumDefinition {
        EnumDefinition {
            permissible_values: self
                .permissible_values()
                .iter()
                .map(|value| (value.to_string(), None))
                .collect(),
        }
    }
}

/// What a property's `range` string resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKind {
    Basic(BasicType),
    Enum(EnumType),
    Regex(RegexType),
}

impl RangeKind {
    /// Resolve a range name; unknown names yield `None`
    pub fn parse(range: &str) -> Option<Self> {
        BasicType::from_name(range)
            .map(RangeKind::Basic)
            .or_else(|| EnumType::from_name(range).map(RangeKind::Enum))
            .or_else(|| RegexType::from_name(range).map(RangeKind::Regex))
    }

    /// The LinkML `range` value to emit
    pub fn linkml_range(&self) -> &'static str {
        match self {
            RangeKind::Basic(basic) => basic.as_str(),
            RangeKind::Enum(enum_type) => enum_type.as_str(),
            RangeKind::Regex(_) => BasicType::String.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_kind_resolution() {
        assert_eq!(RangeKind::parse("integer"), Some(RangeKind::Basic(BasicType::Integer)));
        assert_eq!(RangeKind::parse("Gender"), Some(RangeKind::Enum(EnumType::Gender)));
        assert_eq!(
            RangeKind::parse("American Phone Number"),
            Some(RangeKind::Regex(RegexType::AmericanPhoneNumber))
        );
        assert_eq!(RangeKind::parse("Money"), None);
        assert_eq!(RangeKind::parse("American Phone Number").unwrap().linkml_range(), "string");
    }

    #[test]
    fn test_spires_type_parsing() {
        assert_eq!("re".parse::<SpiresType>().unwrap(), SpiresType::Re);
        assert_eq!("LinkML".parse::<SpiresType>().unwrap(), SpiresType::LinkMl);
        assert_eq!("Spires ER".parse::<SpiresType>().unwrap(), SpiresType::Er);
        assert!("owl".parse::<SpiresType>().is_err());
    }

    #[test]
    fn test_class_parents_order() {
        let class = LinkMLClass {
            is_a: Some("Animal".into()),
            mixins: vec!["Pet".into(), "Named".into()],
            ..Default::default()
        };
        let parents: Vec<_> = class.parents().collect();
        assert_eq!(parents, vec!["Animal", "Pet", "Named"]);
    }

    #[test]
    fn test_enum_definition_has_null_values() {
        let def = EnumType::Gender.to_definition();
        let json = serde_json::to_value(&def).unwrap();
        assert!(json["permissible_values"]["man"].is_null());
        assert!(json["permissible_values"]["woman"].is_null());
    }
}
