//! verikg CLI: knowledge-graph fact checker.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use verikg::config::CheckerConfig;
use verikg::engine::{
    DEFAULT_HIERARCHY_FILE, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_REFERENCE_FILE, Engine,
    GraphSources, resolve_input,
};

#[derive(Parser)]
#[command(name = "verikg", version, about = "Knowledge-graph fact checker")]
struct Cli {
    /// Reference knowledge graph (N-Triples).
    #[arg(long, global = true, default_value = DEFAULT_REFERENCE_FILE)]
    reference: PathBuf,

    /// Class hierarchy (N-Triples).
    #[arg(long, global = true, default_value = DEFAULT_HIERARCHY_FILE)]
    hierarchy: PathBuf,

    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads (overrides the config; 0 = one per core).
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every candidate statement and write the results.
    Check {
        /// Candidate file; takes precedence over --input when it exists.
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Candidate statements (N-Triples, reified).
        #[arg(long, default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        /// Output file for the scores.
        #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
        output: PathBuf,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Score a single triple.
    Score {
        /// Subject IRI (or `_:label`).
        subject: String,
        /// Predicate IRI.
        predicate: String,
        /// Object IRI, `_:label`, or literal value.
        object: String,

        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show statistics about the loaded graphs.
    Info,

    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(path: Option<&Path>, threads: Option<usize>) -> Result<CheckerConfig> {
    let mut config = match path {
        Some(path) => CheckerConfig::load(path)?,
        None => CheckerConfig::default(),
    };
    if let Some(threads) = threads {
        config.threads = threads;
    }
    Ok(config)
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
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.threads)?;

    let sources = GraphSources {
        reference: cli.reference,
        hierarchy: cli.hierarchy,
    };

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }

        Commands::Check {
            file,
            input,
            output,
            json,
        } => {
            let input = resolve_input(file.as_deref(), &input);
            let engine = Engine::open(&sources, config)?;
            let report = engine.check_file(&input, &output)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
            } else {
                println!("Scored {} statements", report.evaluation.count);
                println!("  labelled:  {}", report.evaluation.labelled);
                println!("  malformed: {}", report.malformed);
                println!("  output:    {}", report.output.display());
                println!("Deviation: {}", report.evaluation.deviation);
            }
        }

        Commands::Score {
            subject,
            predicate,
            object,
            json,
        } => {
            let engine = Engine::open(&sources, config)?;
            let verdict = engine.score(&subject, &predicate, &object)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&verdict).into_diagnostic()?);
            } else {
                println!("{} ({})", verdict.score, verdict.basis);
            }
        }

        Commands::Info => {
            let engine = Engine::open(&sources, config)?;
            println!("{}", engine.info());
        }
    }

    Ok(())
}
