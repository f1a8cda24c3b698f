//! Ontology prefixes and annotators

use indexmap::IndexMap;

use crate::model::Ontology;

/// Annotator strings joined with `", "`
pub fn to_annotators(ontologies: &[Ontology]) -> String {
    ontologies
        .iter()
        .map(|o| o.annotator.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Uppercased ontology id -> namespace URL. Later duplicates overwrite
/// earlier ones in place.
pub fn to_prefixes(ontologies: &[Ontology]) -> IndexMap<String, String> {
    let mut prefixes = IndexMap::with_capacity(ontologies.len());
    for ontology in ontologies {
        prefixes.insert(ontology.prefix(), ontology.namespace.clone());
    }
    prefixes
}

/// Uppercased ids, in order, for `id_prefixes`
pub fn to_id_prefixes(ontologies: &[Ontology]) -> Vec<String> {
    ontologies.iter().map(Ontology::prefix).collect()
}

/// `annotations` block for a class: `annotators` when there are ontologies,
/// otherwise empty
pub fn to_annotations(ontologies: &[Ontology]) -> IndexMap<String, String> {
    let mut annotations = IndexMap::new();
    if !ontologies.is_empty() {
        annotations.insert("annotators".to_string(), to_annotators(ontologies));
    }
    annotations
}
