//! Ontology records used to annotate nodes and relationships

use serde::{Deserialize, Serialize};

/// An ontology the editor can attach to a node or relationship
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// Short identifier, e.g. `GO`; uppercased it becomes the LinkML prefix
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Namespace URL the prefix expands to
    pub namespace: String,
    /// Annotator spec handed to the extraction tool
    #[serde(default)]
    pub annotator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
}

impl Ontology {
    pub fn new(
        id: impl Into<String>,
        namespace: impl Into<String>,
        annotator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            annotator: annotator.into(),
            ..Default::default()
        }
    }

    /// The LinkML prefix for this ontology
    pub fn prefix(&self) -> String {
        self.id.to_uppercase()
    }

    /// Ontologies available without querying the ontology search service
    pub fn builtin() -> Vec<Ontology> {
        BUILTIN
            .iter()
            .map(|(id, name, description, namespace, annotator)| Ontology {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                namespace: namespace.to_string(),
                annotator: annotator.to_string(),
                terms: None,
                properties: None,
            })
            .collect()
    }
}

// (id, name, description, namespace, annotator)
const BUILTIN: &[(&str, &str, &str, &str, &str)] = &[
    (
        "HPO",
        "Phenotype",
        "Terms representing medically relevant phenotypes and disease-phenotype annotations.",
        "http://purl.obolibrary.org/obo/HP_",
        "sqlite:obo:HPO",
    ),
    (
        "GO",
        "Function, process, component",
        "Terms representing attributes of gene products in all organisms.",
        "http://purl.obolibrary.org/obo/GO_",
        "sqlite:obo:GO",
    ),
    (
        "Mondo",
        "Disease",
        "Terms representing human diseases.",
        "http://purl.obolibrary.org/obo/MONDO_",
        "sqlite:obo:Mondo",
    ),
    (
        "VO",
        "Vaccine",
        "Terms in the domain of vaccine and vaccination.",
        "http://purl.obolibrary.org/obo/VO_",
        "sqlite:obo:VO",
    ),
    (
        "ChEBI",
        "Chemical",
        "Structured classification of molecular entities of biological interest.",
        "http://purl.obolibrary.org/obo/CHEBI_",
        "sqlite:obo:ChEBI",
    ),
    (
        "Uberon",
        "Tissue",
        "Terms representing body parts, organs and tissues.",
        "http://purl.obolibrary.org/obo/UBERON_",
        "sqlite:obo:Uberon",
    ),
    (
        "CL",
        "Cell",
        "Terms representing publicly available cell lines.",
        "http://purl.obolibrary.org/obo/CL_",
        "sqlite:obo:CL",
    ),
    (
        "PR",
        "Protein",
        "Terms representing protein-related entities.",
        "http://purl.obolibrary.org/obo/PR_",
        "sqlite:obo:PR",
    ),
    (
        "SO",
        "Sequence",
        "Terms representing features and properties of nucleic acid used in sequence annotation.",
        "http://purl.obolibrary.org/obo/SO_",
        "sqlite:obo:SO",
    ),
    (
        "PW",
        "Pathway",
        "Terms for annotating gene products to pathways.",
        "http://purl.obolibrary.org/obo/PW_",
        "sqlite:obo:PW",
    ),
    (
        "RO",
        "Relation",
        "Terms and properties representing relationships used across biological ontologies.",
        "http://purl.obolibrary.org/obo/RO_",
        "sqlite:obo:RO",
    ),
    (
        "HGNC",
        "Gene",
        "Identifiers for representing genes.",
        "http://identifiers.org/hgnc/",
        "bioportal:hgnc-nr",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue() {
        let ontologies = Ontology::builtin();
        assert_eq!(ontologies.len(), 12);

        let go = ontologies.iter().find(|o| o.id == "GO").unwrap();
        assert_eq!(go.namespace, "http://purl.obolibrary.org/obo/GO_");
        assert_eq!(go.annotator, "sqlite:obo:GO");
    }

    #[test]
    fn test_prefix_is_uppercased() {
        let mondo = Ontology::new("Mondo", "http://purl.obolibrary.org/obo/MONDO_", "sqlite:obo:Mondo");
        assert_eq!(mondo.prefix(), "MONDO");
    }
}
