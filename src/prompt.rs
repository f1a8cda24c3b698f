//! Prompt composition for schema-assistant commands
//!
//! Each diagram context-menu command renders a fixed English template
//! around the names of the selected classes and associations, usually
//! followed by the full schema text. Sending the prompt to a language
//! model is left to the caller.

use std::fmt;
use std::str::FromStr;

use crate::error::{LinkmlError, Result};

const INTRO: &str = "From the LinkML schema provided below, ";

const OUTRO: &str =
    "Maintain all the existing classes and structure from the schema. Return the entire updated schema.";

const RELATIONSHIP_EXPLANATION: &str = "For each association, introduce a predicate (a class characterized by is_a: RelationshipType) and a new relationship (a class characterized by is_a: Triple).";

/// Command names without their arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    AddClassSimilarToClass,
    AddClassAssociatedToClass,
    AddAttributeToRelationship,
    AddClassesSimilarToEntities,
    ReifyClass,
    ExplainClass,
    ExplainEntities,
    FixClassName,
    FixClassOntology,
}

impl CommandKind {
    pub const ALL: [CommandKind; 9] = [
        CommandKind::AddClassSimilarToClass,
        CommandKind::AddClassAssociatedToClass,
        CommandKind::AddAttributeToRelationship,
        CommandKind::AddClassesSimilarToEntities,
        CommandKind::ReifyClass,
        CommandKind::ExplainClass,
        CommandKind::ExplainEntities,
        CommandKind::FixClassName,
        CommandKind::FixClassOntology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::AddClassSimilarToClass => "add-class-similar-to-class",
            CommandKind::AddClassAssociatedToClass => "add-class-associated-to-class",
            CommandKind::AddAttributeToRelationship => "add-attribute-to-relationship",
            CommandKind::AddClassesSimilarToEntities => "add-classes-similar-to-entities",
            CommandKind::ReifyClass => "reify-class",
            CommandKind::ExplainClass => "explain-class",
            CommandKind::ExplainEntities => "explain-entities",
            CommandKind::FixClassName => "fix-class-name",
            CommandKind::FixClassOntology => "fix-class-ontology",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = LinkmlError;

    fn from_str(s: &str) -> Result<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LinkmlError::UnknownCommand(s.to_string()))
    }
}

/// A command with the class/association names it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddClassSimilarToClass { node: String, schema: String },
    AddClassAssociatedToClass { node: String, schema: String },
    AddAttributeToRelationship { relationship: String, schema: String },
    AddClassesSimilarToEntities {
        nodes: Vec<String>,
        relationships: Vec<String>,
        schema: String,
    },
    ReifyClass { node: String, schema: String },
    ExplainClass { node: String, schema: String },
    ExplainEntities {
        nodes: Vec<String>,
        relationships: Vec<String>,
    },
    FixClassName { node: String, schema: String },
    FixClassOntology { node: String, schema: String },
}

impl Command {
    /// Build a command from loose selections, as a command line would supply
    /// them. Single-target commands take the first node (or relationship).
    pub fn new(
        kind: CommandKind,
        nodes: Vec<String>,
        relationships: Vec<String>,
        schema: impl Into<String>,
    ) -> Result<Self> {
        let schema = schema.into();
        let missing = |what: &'static str| LinkmlError::MissingPromptTarget {
            command: kind.to_string(),
            missing: what,
        };
        let node = || nodes.first().cloned().ok_or_else(|| missing("class"));

        Ok(match kind {
            CommandKind::AddClassSimilarToClass => Command::AddClassSimilarToClass { node: node()?, schema },
            CommandKind::AddClassAssociatedToClass => Command::AddClassAssociatedToClass { node: node()?, schema },
            CommandKind::ReifyClass => Command::ReifyClass { node: node()?, schema },
            CommandKind::ExplainClass => Command::ExplainClass { node: node()?, schema },
            CommandKind::FixClassName => Command::FixClassName { node: node()?, schema },
            CommandKind::FixClassOntology => Command::FixClassOntology { node: node()?, schema },
            CommandKind::AddAttributeToRelationship => Command::AddAttributeToRelationship {
                relationship: relationships
                    .first()
                    .cloned()
                    .ok_or_else(|| missing("association"))?,
                schema,
            },
            CommandKind::AddClassesSimilarToEntities | CommandKind::ExplainEntities => {
                if nodes.is_empty() && relationships.is_empty() {
                    return Err(missing("class or association"));
                }
                if kind == CommandKind::ExplainEntities {
                    Command::ExplainEntities { nodes, relationships }
                } else {
                    Command::AddClassesSimilarToEntities {
                        nodes,
                        relationships,
                        schema,
                    }
                }
            }
        })
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddClassSimilarToClass { .. } => CommandKind::AddClassSimilarToClass,
            Command::AddClassAssociatedToClass { .. } => CommandKind::AddClassAssociatedToClass,
            Command::AddAttributeToRelationship { .. } => CommandKind::AddAttributeToRelationship,
            Command::AddClassesSimilarToEntities { .. } => CommandKind::AddClassesSimilarToEntities,
            Command::ReifyClass { .. } => CommandKind::ReifyClass,
            Command::ExplainClass { .. } => CommandKind::ExplainClass,
            Command::ExplainEntities { .. } => CommandKind::ExplainEntities,
            Command::FixClassName { .. } => CommandKind::FixClassName,
            Command::FixClassOntology { .. } => CommandKind::FixClassOntology,
        }
    }
}

/// Render the prompt text for a command
pub fn compute_prompt(command: &Command) -> String {
    match command {
        Command::AddClassSimilarToClass { node, schema } => format!(
            "{INTRO}add a new class that is semantically similar to {node}.\n\
             Ensure that the new class fits within the context. {OUTRO}\n\n{schema}"
        ),
        Command::AddClassAssociatedToClass { node, schema } => format!(
            "{INTRO}add a new class that can be in a relationship with {node}.\n\
             Ensure that the new class fits within the context.\n\
             Add one or more new associations between the newly introduced class and {node}.\n\
             {RELATIONSHIP_EXPLANATION}\n\
             {OUTRO}\n\n{schema}"
        ),
        Command::FixClassName { node, schema } => format!(
            "{INTRO}if you retain it necessary, update the class named {node}\n\
             by renaming it to better reflect its role and context within the schema.\n\
             Prevent more than one class from having the same name by using synonyms.\n\
             Ensure the new names enhance clarity and preserve the intended meaning.\n\
             {OUTRO}\n\n{schema}"
        ),
        Command::ExplainClass { node, schema } => format!(
            "{INTRO}explain in human-friendly terms the class {node}.\n\
             The explanation should include details on its role within the schema, \
             its relation to other classes, and any examples provided.\n\n{schema}"
        ),
        Command::AddAttributeToRelationship { relationship, schema } => format!(
            "{INTRO}add relevant attributes to the association named {relationship}.\n\
             Ensure that the proposed attributes align with the semantics of the association {relationship}.\n\
             {OUTRO}\n\n{schema}"
        ),
        Command::AddClassesSimilarToEntities {
            nodes,
            relationships,
            schema,
        } => {
            let mut subschema = String::new();
            if !nodes.is_empty() {
                subschema.push_str(&format!("classes: {}", nodes.join(",")));
            }
            if !nodes.is_empty() && !relationships.is_empty() {
                subschema.push_str(" and ");
            }
            if !relationships.is_empty() {
                subschema.push_str(&format!("associations: {}", relationships.join(",")));
            }
            format!(
                "{INTRO}add one or more new classes that semantically fit the context defined by the subschema,\n\
                 which includes the following {subschema}.\n\
                 The new classes should logically extend or complement the meaning and structure \
                 of these existing classes and associations.\n\
                 {OUTRO}\n\n{schema}"
            )
        }
        Command::ExplainEntities { nodes, relationships } => {
            let selection = nodes
                .iter()
                .chain(relationships)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            format!(
                "{INTRO}explain in human-friendly terms the portion of the schema that includes {selection}.\n\
                 The explanation should include details on its role within the schema and any examples provided."
            )
        }
        Command::ReifyClass { node, schema } => format!(
            "{INTRO}reify any attributes that you consider \"reifiable\" in the class named {node}.\n\
             This means creating a new class for each reified attribute and removing them from the class named {node}.\n\
             Ensure that the new class(es) fits within the context.\n\
             Add one or more new associations between the newly introduced class(es) and {node}.\n\
             {RELATIONSHIP_EXPLANATION}\n\
             Ensure that the new relationship(s) fits within the context.\n\
             {OUTRO}\n\n{schema}\n"
        ),
        Command::FixClassOntology { node, schema } => format!(
            "{INTRO}propose relevant ontologies that could be used to annotate the class named {node}.\n\
             Return only the shortened namespace of these ontologies separated by commas.\n\n{schema}"
        ),
    }
}

/// Wrap a free-form operation around a schema and an optional selection of
/// its classes
pub fn edit_prompt(schema: &str, selection: Option<&str>, operation: &str) -> String {
    let selection = match selection {
        Some(selection) if !selection.is_empty() => {
            format!("Given this selection of classes in that schema\n\n{selection}\n\n")
        }
        _ => String::new(),
    };
    format!(
        "\nGiven this LinkML schema\n\n\n{schema}\n\n\n{selection}\nPerform this operation\n\n\n{operation}\n\n\n\
         Return an updated version of the full LinkML schema"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = "name: zoo\n";

    #[test]
    fn test_command_kind_names() {
        for kind in CommandKind::ALL {
            assert_eq!(kind.as_str().parse::<CommandKind>().unwrap(), kind);
        }
        assert!(matches!(
            "summon-class".parse::<CommandKind>(),
            Err(LinkmlError::UnknownCommand(name)) if name == "summon-class"
        ));
    }

    #[test]
    fn test_single_class_prompt() {
        let command = Command::new(CommandKind::AddClassSimilarToClass, vec!["Dog".into()], vec![], SCHEMA).unwrap();
        assert_eq!(command.kind(), CommandKind::AddClassSimilarToClass);
        assert_eq!(
            compute_prompt(&command),
            "From the LinkML schema provided below, add a new class that is semantically similar to Dog.\n\
             Ensure that the new class fits within the context. Maintain all the existing classes and structure \
             from the schema. Return the entire updated schema.\n\nname: zoo\n"
        );
    }

    #[test]
    fn test_relationship_prompts_explain_triples() {
        let command = Command::ReifyClass {
            node: "Person".into(),
            schema: SCHEMA.into(),
        };
        let prompt = compute_prompt(&command);
        assert!(prompt.contains("in the class named Person.\n"));
        assert!(prompt.contains("is_a: RelationshipType"));
        assert!(prompt.ends_with("name: zoo\n\n"));
    }

    #[test]
    fn test_entity_selection_prompts() {
        let both = Command::AddClassesSimilarToEntities {
            nodes: vec!["Person".into(), "Company".into()],
            relationships: vec!["WORKS_AT".into()],
            schema: SCHEMA.into(),
        };
        assert!(compute_prompt(&both).contains("which includes the following classes: Person,Company and associations: WORKS_AT.\n"));

        let classes_only = Command::AddClassesSimilarToEntities {
            nodes: vec!["Person".into()],
            relationships: vec![],
            schema: SCHEMA.into(),
        };
        assert!(compute_prompt(&classes_only).contains("the following classes: Person.\n"));

        let explain = Command::ExplainEntities {
            nodes: vec!["Person".into()],
            relationships: vec!["WORKS_AT".into()],
        };
        let prompt = compute_prompt(&explain);
        assert!(prompt.contains("that includes Person,WORKS_AT.\n"));
        assert!(!prompt.contains(SCHEMA));
    }

    #[test]
    fn test_missing_targets() {
        let err = Command::new(CommandKind::ExplainClass, vec![], vec!["R".into()], SCHEMA).unwrap_err();
        assert!(matches!(err, LinkmlError::MissingPromptTarget { missing: "class", .. }));

        let err = Command::new(CommandKind::AddAttributeToRelationship, vec!["A".into()], vec![], SCHEMA).unwrap_err();
        assert!(matches!(err, LinkmlError::MissingPromptTarget { missing: "association", .. }));

        assert!(Command::new(CommandKind::ExplainEntities, vec![], vec![], SCHEMA).is_err());
    }

    #[test]
    fn test_edit_prompt() {
        let prompt = edit_prompt("name: zoo", Some("Dog:\n  is_a: Animal"), "Add a Cat class");
        assert!(prompt.starts_with("\nGiven this LinkML schema\n\n\nname: zoo\n\n\n"));
        assert!(prompt.contains("Given this selection of classes in that schema\n\nDog:\n  is_a: Animal\n\n\n"));
        assert!(prompt.contains("Perform this operation\n\n\nAdd a Cat class\n\n\n"));
        assert!(prompt.ends_with("Return an updated version of the full LinkML schema"));

        let bare = edit_prompt("name: zoo", None, "Add a Cat class");
        assert!(!bare.contains("selection"));
    }
}
