//! Name Resolution
//!
//! Derives LinkML identifiers from free-text captions:
//! - Class names (PascalCase) from node captions
//! - Attribute names (camelCase) from property keys
//! - Relationship class names from both endpoints plus the relationship type
//!
//! The free functions are pure. [`NameResolver`] is built once per
//! conversion and assigns every node and association a unique name,
//! suffixing later ones whose name is already taken.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::model::{Id, Node, Relationship};

// =============================================================================
// Case conversion
// =============================================================================

/// Split free text into words at separators, case changes and letter/digit
/// boundaries. `"HTTPServer v2"` -> `["HTTP", "Server", "v", "2"]`
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.map(char::is_lowercase).unwrap_or(false));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// First letter upper, rest lower
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Class name for a caption: `"works at"` -> `"WorksAt"`
pub fn to_class_name(caption: &str) -> String {
    split_words(caption).iter().map(|w| capitalize(w)).collect()
}

/// Attribute name for a property key: `"Date of birth"` -> `"dateOfBirth"`
pub fn to_attribute_name(key: &str) -> String {
    split_words(key)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
        .collect()
}

/// `"Medical Record"` -> `"medical_record"`
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Relationship class name from endpoint class names and the edge type,
/// e.g. `("Person", "WORKS_AT", "Company")` -> `"PersonWorksAtCompany"`
pub fn to_relationship_class_name(from_class: &str, r#type: &str, to_class: &str) -> String {
    format!("{}{}{}", from_class, to_class_name(r#type), to_class)
}

// =============================================================================
// Node lookup
// =============================================================================

/// Id -> node index over a node list. The first node with a given id wins.
#[derive(Debug)]
pub struct NodeLookup<'a> {
    by_id: HashMap<&'a str, &'a Node>,
}

impl<'a> NodeLookup<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        for node in nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }
        Self { by_id }
    }

    pub fn find(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }
}

// =============================================================================
// Name Resolver
// =============================================================================

/// Entry in the name resolution map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Unique class name within this document
    pub class_name: String,
    /// Caption it was derived from (for diagnostics)
    pub caption: String,
    /// Whether a suffix was appended to avoid a collision
    pub disambiguated: bool,
}

/// Suffixes appended to a relationship name to form its generated classes
pub const RELATIONSHIP_CLASS_SUFFIXES: [&str; 3] = ["Relationship", "Predicate", "Document"];

/// Assigns each node a unique class name, in node order, then each
/// association a unique relationship name, in relationship order.
#[derive(Debug, Default)]
pub struct NameResolver {
    /// node id -> resolved name entry
    resolved: HashMap<Id, ResolvedName>,

    /// relationship id -> relationship name (without class suffix)
    relationships: HashMap<Id, String>,

    /// Class names already in use, including reserved ones
    taken: HashSet<String>,

    /// Relationship names already in use
    relationship_names: HashSet<String>,
}

/// Smallest `base2`, `base3`, ... for which `is_taken` is false
fn suffixed(base: &str, is_taken: impl Fn(&str) -> bool) -> String {
    let mut suffix = 2;
    let mut candidate = format!("{}{}", base, suffix);
    while is_taken(&candidate) {
        suffix += 1;
        candidate = format!("{}{}", base, suffix);
    }
    candidate
}

impl NameResolver {
    /// Build the resolution map for a diagram.
    ///
    /// `reserved` names are never handed to nodes. The first node to claim a
    /// class name keeps it; later ones get the smallest free numeric suffix
    /// starting at 2. Association names follow the same rule, and also avoid
    /// names whose generated classes would clash with a node class.
    pub fn build(nodes: &[Node], relationships: &[Relationship], reserved: &[&str]) -> Self {
        let mut resolver = Self {
            taken: reserved.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        };

        for node in nodes {
            if resolver.resolved.contains_key(&node.id) {
                continue;
            }

            let base_name = to_class_name(&node.caption);
            let (class_name, disambiguated) = if resolver.taken.contains(&base_name) {
                let candidate = suffixed(&base_name, |c| resolver.taken.contains(c));
                warn!(
                    node = %node.id,
                    caption = %node.caption,
                    taken = %base_name,
                    renamed = %candidate,
                    "class name collision"
                );
                (candidate, true)
            } else {
                (base_name, false)
            };

            resolver.taken.insert(class_name.clone());
            resolver.resolved.insert(
                node.id.clone(),
                ResolvedName {
                    class_name,
                    caption: node.caption.clone(),
                    disambiguated,
                },
            );
        }

        for relationship in relationships.iter().filter(|r| r.is_association()) {
            if resolver.relationships.contains_key(&relationship.id) {
                continue;
            }

            let base_name = resolver.joined_relationship_name(relationship);
            let name = if resolver.relationship_name_taken(&base_name) {
                let candidate = suffixed(&base_name, |c| resolver.relationship_name_taken(c));
                warn!(
                    relationship = %relationship.id,
                    taken = %base_name,
                    renamed = %candidate,
                    "relationship name collision"
                );
                candidate
            } else {
                base_name
            };

            resolver.relationship_names.insert(name.clone());
            resolver.relationships.insert(relationship.id.clone(), name);
        }

        debug!(
            nodes = resolver.resolved.len(),
            relationships = resolver.relationships.len(),
            disambiguated = resolver.disambiguated_count(),
            "resolved class names"
        );
        resolver
    }

    fn joined_relationship_name(&self, relationship: &Relationship) -> String {
        to_relationship_class_name(
            self.class_name(&relationship.from_id).unwrap_or_default(),
            &relationship.r#type,
            self.class_name(&relationship.to_id).unwrap_or_default(),
        )
    }

    fn relationship_name_taken(&self, name: &str) -> bool {
        self.relationship_names.contains(name)
            || RELATIONSHIP_CLASS_SUFFIXES
                .iter()
                .any(|suffix| self.taken.contains(&format!("{}{}", name, suffix)))
    }

    pub fn get(&self, node_id: &str) -> Option<&ResolvedName> {
        self.resolved.get(node_id)
    }

    /// Class name for a node id
    pub fn class_name(&self, node_id: &str) -> Option<&str> {
        self.resolved.get(node_id).map(|r| r.class_name.as_str())
    }

    /// Unique name for an association, used as the stem of its
    /// Relationship, Predicate and Document classes. Relationships not seen
    /// by [`NameResolver::build`] fall back to the joined endpoint and type
    /// names.
    pub fn relationship_class_name(&self, relationship: &Relationship) -> String {
        self.relationships
            .get(&relationship.id)
            .cloned()
            .unwrap_or_else(|| self.joined_relationship_name(relationship))
    }

    pub fn disambiguated_count(&self) -> usize {
        self.resolved.values().filter(|r| r.disambiguated).count()
    }
}
