//! LinkML Converter CLI
//!
//! Converts arrows diagrams to LinkML schemas and back, checks schema
//! hierarchies and composes schema-assistant prompts.

use anyhow::{bail, Context};
use arrows_linkml::config::OutputFormat;
use arrows_linkml::linkml::{self, UnrootedReason};
use arrows_linkml::{compute_prompt, edit_prompt, Command, CommandKind, ConverterConfig, Graph, SpiresType};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkml-convert")]
#[command(about = "Convert between arrows diagrams and LinkML schemas")]
struct Cli {
    /// Configuration file (layered over arrows-linkml.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a diagram (graph JSON) into a LinkML schema
    Export {
        /// Diagram JSON file
        graph: PathBuf,
        /// Schema name (defaults to the configured name)
        #[arg(short, long)]
        name: Option<String>,
        /// Root structure: linkml, re or er
        #[arg(short, long)]
        spires_type: Option<String>,
        /// Write JSON instead of YAML
        #[arg(long)]
        json: bool,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a LinkML schema into diagram nodes and relationships
    Import {
        /// LinkML YAML file
        schema: PathBuf,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report inheritance cycles and classes that cannot be imported
    Check {
        /// LinkML YAML file
        schema: PathBuf,
    },

    /// Print the prompt for a schema-assistant command
    Prompt {
        /// Command name, e.g. add-class-similar-to-class
        command: String,
        /// LinkML YAML file
        schema: PathBuf,
        /// Selected class
        #[arg(long = "node")]
        nodes: Vec<String>,
        /// Selected association
        #[arg(long = "relationship")]
        relationships: Vec<String>,
    },

    /// Print a free-form edit prompt
    Edit {
        /// LinkML YAML file
        schema: PathBuf,
        /// Operation to perform on the schema
        operation: String,
        /// File holding the selected classes
        #[arg(long)]
        selection: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("✅ Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ConverterConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Export {
            graph,
            name,
            spires_type,
            json,
            output,
        } => {
            let diagram = Graph::from_json(&read(&graph)?)?;
            let name = name.unwrap_or_else(|| config.export.schema_name.clone());
            let spires_type = match spires_type {
                Some(s) => s.parse::<SpiresType>()?,
                None => config.spires_type()?,
            };

            let schema = linkml::from_graph(&name, &diagram, spires_type);
            let text = if json || config.output.format == OutputFormat::Json {
                linkml::to_json(&schema)?
            } else {
                linkml::to_yaml(&schema)?
            };
            write(output.as_deref(), &text)
        }

        Commands::Import { schema, output } => {
            let imported = linkml::import_text(&read(&schema)?, &config.ontologies())?;
            eprintln!(
                "📥 {} nodes, {} relationships",
                imported.nodes.len(),
                imported.relationships.len()
            );
            write(output.as_deref(), &serde_json::to_string_pretty(&imported)?)
        }

        Commands::Check { schema } => {
            let text = read(&schema)?;
            if !linkml::recognise(&text) {
                bail!("{} is not a LinkML schema", schema.display());
            }
            let report = linkml::analyze(&linkml::from_yaml(&text)?);
            if report.is_clean() {
                println!("✅ Hierarchy is clean");
                return Ok(());
            }

            for cycle in &report.cycles {
                println!("❌ Inheritance cycle: {}", cycle.join(" -> "));
            }
            for unrooted in &report.unrooted {
                let reason = match &unrooted.reason {
                    UnrootedReason::NoParent => "no is_a or mixins".to_string(),
                    UnrootedReason::UnknownParent(parent) => format!("unknown parent {}", parent),
                    UnrootedReason::Cyclic => "part of a cycle".to_string(),
                    UnrootedReason::UnrootedParent(parent) => format!("parent {} is unrooted", parent),
                };
                println!("⚠️  {} will be dropped on import: {}", unrooted.class, reason);
            }
            std::process::exit(1);
        }

        Commands::Prompt {
            command,
            schema,
            nodes,
            relationships,
        } => {
            let kind: CommandKind = command.parse()?;
            let command = Command::new(kind, nodes, relationships, read(&schema)?)?;
            println!("{}", compute_prompt(&command));
            Ok(())
        }

        Commands::Edit {
            schema,
            operation,
            selection,
        } => {
            let selection = selection.as_deref().map(read).transpose()?;
            println!("{}", edit_prompt(&read(&schema)?, selection.as_deref(), &operation));
            Ok(())
        }
    }
}
