//! Reading and writing LinkML documents as text

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

use super::import::{to_graph, LinkMLGraph};
use super::types::LinkML;
use crate::error::{LinkmlError, Result};
use crate::model::Ontology;

static UNIQUE_VALUES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *)unique_values: true$").expect("valid regex pattern"));

static NULL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^( *[^ #][^\n]*?): null$").expect("valid regex pattern"));

/// A key or sequence entry that opens a literal or folded block scalar
static BLOCK_SCALAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ *(?:- |.*: )[|>][-+1-9]*$").expect("valid regex pattern"));

/// Render a schema as YAML.
///
/// `unique_values` is commented out since LinkML tooling rejects it, and
/// bare permissible values are written as `man:` instead of `man: null`.
/// Block scalar contents (multi-line descriptions) are left untouched.
pub fn to_yaml(linkml: &LinkML) -> Result<String> {
    let yaml = serde_yaml::to_string(linkml)?;
    let mut out = String::with_capacity(yaml.len());
    let mut block_scalar: Option<usize> = None;
    let mut permissible_values: Option<usize> = None;

    for line in yaml.lines() {
        let indent = line.len() - line.trim_start_matches(' ').len();
        let blank = line.trim().is_empty();

        if let Some(header) = block_scalar {
            if blank || indent > header {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_scalar = None;
        }
        if permissible_values.is_some_and(|values| !blank && indent <= values) {
            permissible_values = None;
        }

        if BLOCK_SCALAR.is_match(line) {
            block_scalar = Some(indent);
        } else if line.trim_start() == "permissible_values:" {
            permissible_values = Some(indent);
        }

        let line = match permissible_values {
            Some(values) if indent > values => NULL_VALUE.replace(line, "${1}:"),
            _ => UNIQUE_VALUES.replace(line, "${1}# unique_values: true --> not supported yet"),
        };
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

pub fn from_yaml(text: &str) -> Result<LinkML> {
    Ok(serde_yaml::from_str(text)?)
}

pub fn to_json(linkml: &LinkML) -> Result<String> {
    Ok(serde_json::to_string_pretty(linkml)?)
}

pub fn from_json(text: &str) -> Result<LinkML> {
    Ok(serde_json::from_str(text)?)
}

/// Whether `text` looks like a LinkML document: a YAML mapping whose
/// `prefixes` declare `linkml`.
pub fn recognise(text: &str) -> bool {
    let Ok(Value::Mapping(document)) = serde_yaml::from_str::<Value>(text) else {
        return false;
    };
    matches!(
        document.get("prefixes"),
        Some(Value::Mapping(prefixes)) if prefixes.contains_key("linkml")
    )
}

/// Parse pasted or uploaded text into diagram nodes and relationships
pub fn import_text(text: &str, ontologies: &[Ontology]) -> Result<LinkMLGraph> {
    if !recognise(text) {
        return Err(LinkmlError::NotLinkml);
    }
    let linkml = from_yaml(text)?;
    debug!(name = %linkml.name, classes = linkml.classes.len(), "importing LinkML text");
    Ok(to_graph(&linkml, ontologies))
}
