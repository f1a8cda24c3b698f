//! Arrows LinkML
//!
//! Bidirectional conversion between arrows property-graph diagrams and
//! LinkML schemas in the SPIRES style used by OntoGPT.
//!
//! ## Features
//!
//! - **Graph -> LinkML**: nodes become classes, associations become
//!   `Triple`/`RelationshipType` class pairs, inheritance edges become
//!   `is_a`/`mixins`
//! - **LinkML -> Graph**: hierarchy resolution by fixed point, triples
//!   back into associations
//! - **Diagnostics**: cycle and unrooted-class detection over `is_a`/`mixins`
//! - **Prompts**: schema-assistant prompt templates
//!
//! ## Architecture
//!
//! ```text
//! Graph ──from_graph──> LinkML ──to_yaml──> schema.yaml
//!   ^                     │
//!   └──────to_graph───────┘
//! ```

pub mod config;
pub mod error;
pub mod linkml;
pub mod model;
pub mod prompt;

pub use config::ConverterConfig;
pub use error::{LinkmlError, Result};
pub use linkml::{from_graph, to_graph, LinkML, LinkMLGraph, SpiresType};
pub use model::{Attribute, Cardinality, Graph, Node, Ontology, Relationship, RelationshipType};
pub use prompt::{compute_prompt, edit_prompt, Command, CommandKind};
