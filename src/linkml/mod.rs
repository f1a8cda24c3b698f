//! Graph <-> LinkML transformation engine
//!
//! The forward direction ([`from_graph`]) turns an arrows diagram into a
//! SPIRES-flavoured LinkML schema. The reverse direction ([`to_graph`])
//! rebuilds nodes and relationships from a schema, dropping anything whose
//! hierarchy or endpoints cannot be resolved.

pub mod attributes;
pub mod classes;
pub mod export;
pub mod hierarchy;
pub mod import;
pub mod names;
pub mod ontologies;
pub mod relationships;
pub mod types;
pub mod yaml;

pub use export::from_graph;
pub use hierarchy::{analyze, HierarchyReport, UnrootedClass, UnrootedReason};
pub use import::{to_graph, LinkMLGraph};
pub use names::NameResolver;
pub use types::{
    BasicType, CollectionType, EnumDefinition, EnumType, LinkML, LinkMLAttribute, LinkMLClass,
    RegexType, SpiresCoreClass, SpiresType,
};
pub use yaml::{from_json, from_yaml, import_text, recognise, to_json, to_yaml};
