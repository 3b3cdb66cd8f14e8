//! asv: inspect ActivityStreams documents against the vocabulary catalogue.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use activity_vocab::alias::AliasMap;
use activity_vocab::config::VocabConfig;
use activity_vocab::vocab::Vocabulary;

#[derive(Parser)]
#[command(name = "asv", version, about = "ActivityStreams vocabulary inspector")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a document and show its type, ancestry and properties.
    Resolve {
        /// JSON-LD document.
        file: PathBuf,
    },

    /// Show the alias map built from a document's @context.
    Context {
        /// JSON-LD document.
        file: PathBuf,
    },

    /// Show ancestors, descendants and disjoint types of a type.
    Hierarchy {
        /// Unprefixed type name, e.g. "Create".
        type_name: String,
    },

    /// List catalogue types.
    Types {
        /// Only types of this vocabulary.
        #[arg(long)]
        vocabulary: Option<String>,
    },

    /// Decode a document and serialise it again.
    Roundtrip {
        /// JSON-LD document.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => VocabConfig::load(path)?,
        None => VocabConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&config.logging.filter))
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let catalogue = config.catalogue()?;

    match cli.command {
        Commands::Resolve { file } => {
            let doc = read_document(&file)?;
            let value = catalogue.decode_document(&doc)?;
            let tag = value.vocab_type();

            println!("type:        {}", tag.name());
            println!("vocabulary:  {}", tag.vocabulary());
            let ancestors: Vec<&str> = tag.ancestors().iter().map(|t| t.name()).collect();
            println!("ancestors:   {}", display_list(&ancestors));
            println!("capabilities: {}", display_list(tag.capabilities()));
            match value.id() {
                Some(id) => println!("id:          {id}"),
                None => println!("id:          (none)"),
            }

            let properties = value.properties();
            println!("\nProperties:");
            for (def, slots) in properties.iter() {
                let shapes: Vec<&str> = slots.iter().map(|s| s.shape_name()).collect();
                println!(
                    "  {:<20} {:?} [{}]",
                    def.term,
                    properties.has(def.term),
                    shapes.join(", ")
                );
            }
            let unknown = properties.unknown();
            if !unknown.is_empty() {
                println!("\nUnrecognised members:");
                for key in unknown.keys() {
                    println!("  {key}");
                }
            }
        }

        Commands::Context { file } => {
            let doc = read_document(&file)?;
            let aliases = doc
                .get("@context")
                .map(AliasMap::from_context)
                .unwrap_or_default();
            if aliases.is_empty() {
                println!("No aliases declared.");
            } else {
                let mut entries: Vec<(&str, &str)> = aliases.iter().collect();
                entries.sort_unstable();
                for (term, alias) in entries {
                    let alias = if alias.is_empty() { "(default)" } else { alias };
                    println!("  {alias:<12} {term}");
                }
            }
            for vocabulary in catalogue.vocabularies() {
                println!("prefix for {vocabulary}: \"{}\"", aliases.prefix(*vocabulary));
            }
        }

        Commands::Hierarchy { type_name } => {
            let entry = catalogue
                .get(&type_name)
                .ok_or_else(|| miette::miette!("\"{type_name}\" is not a catalogue type"))?;
            let tag = entry.tag();

            let ancestors: Vec<&str> = tag.ancestors().iter().map(|t| t.name()).collect();
            let descendants: Vec<&str> = tag
                .descendants()
                .iter()
                .filter(|t| catalogue.contains_type(**t))
                .map(|t| t.name())
                .collect();
            let disjoint: Vec<&str> = catalogue
                .types()
                .map(|e| e.name())
                .filter(|name| tag.is_disjoint_with(name))
                .collect();

            println!("{} ({})", tag.name(), tag.vocabulary());
            println!("  root:        {}", tag.root().name());
            println!("  ancestors:   {}", display_list(&ancestors));
            println!("  descendants: {}", display_list(&descendants));
            println!("  disjoint:    {}", display_list(&disjoint));
        }

        Commands::Types { vocabulary } => {
            let only = match vocabulary {
                Some(name) => Some(
                    Vocabulary::from_name(&name)
                        .ok_or_else(|| miette::miette!("unknown vocabulary \"{name}\""))?,
                ),
                None => None,
            };
            let entries: Vec<_> = catalogue
                .types()
                .filter(|e| only.is_none_or(|v| e.vocabulary() == v))
                .collect();
            println!("Types ({}):", entries.len());
            for entry in entries {
                let parents: Vec<&str> = entry.tag().parents().iter().map(|t| t.name()).collect();
                println!(
                    "  {:<24} {:<16} extends {}",
                    entry.name(),
                    entry.vocabulary().name(),
                    display_list(&parents)
                );
            }
        }

        Commands::Roundtrip { file } => {
            let doc = read_document(&file)?;
            let value = catalogue.decode_document(&doc)?;
            let aliases = doc
                .get("@context")
                .map(AliasMap::from_context)
                .unwrap_or_default();
            let mut out = serde_json::Map::new();
            if let Some(context) = doc.get("@context") {
                out.insert("@context".into(), context.clone());
            }
            if let Value::Object(body) = value.to_json_with(&aliases) {
                out.extend(body);
            }
            let out = Value::Object(out);
            let rendered = serde_json::to_string_pretty(&out).into_diagnostic()?;
            println!("{rendered}");
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).into_diagnostic()?;
    serde_json::from_str(&content).into_diagnostic()
}

fn display_list(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
