///
/// This module implements the CLI interface for docbundle: command parsing, argument
/// exposure and the printed reports.
///
/// All document and bundle logic lives in the [`docbundle-core`] crate. This module
/// loads files, calls into the core and prints JSON to stdout; logs go to stderr.
///
/// ## How To Use
/// - For command-line users: use the installed `docbundle` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// [`docbundle-core`]: ../../docbundle-core/
use crate::load_config::{load_answers, load_config};
use crate::report::{CheckSummary, OverflowReport, PlanReport};
use anyhow::Result;
use clap::{Parser, Subcommand};
use docbundle_core::assembly::Assembly;
use docbundle_core::contract::OutputKey;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// CLI for docbundle: inspect overflow and delivery plans for interview documents.
#[derive(Parser)]
#[clap(
    name = "docbundle",
    version,
    about = "Decide addenda and plan document bundles for guided-interview output"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate an assembly file and summarise its documents, bundles and roles
    Check {
        /// Path to the YAML assembly file
        #[clap(long)]
        config: PathBuf,
    },
    /// Report which fields overflow and whether each document needs its addendum
    Overflow {
        /// Path to the YAML assembly file
        #[clap(long)]
        config: PathBuf,
        /// Path to the JSON answers file
        #[clap(long)]
        answers: PathBuf,
        /// Only report this document id
        #[clap(long)]
        document: Option<String>,
    },
    /// Print the renditions a role's bundle would be merged from
    Plan {
        /// Path to the YAML assembly file
        #[clap(long)]
        config: PathBuf,
        /// Path to the JSON answers file
        #[clap(long)]
        answers: PathBuf,
        /// Bundle role, e.g. court_bundle or user_bundle
        #[clap(long)]
        role: String,
        /// final or preview
        #[clap(long, default_value = "final")]
        key: OutputKey,
        /// One output per direct child instead of one combined output
        #[clap(long)]
        per_child: bool,
    },
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Check { config } => {
            let assembly = resolve(&config)?;
            tracing::info!(command = "check", "Assembly is valid");
            print_json(&CheckSummary::from_assembly(&assembly))
        }
        Commands::Overflow {
            config,
            answers,
            document,
        } => {
            let assembly = resolve(&config)?;
            let store = load_answers(answers)?;
            let reports: Vec<OverflowReport> = match document {
                Some(id) => {
                    let Some(doc) = assembly.document(&id) else {
                        tracing::error!(command = "overflow", document = %id, "Unknown document id");
                        anyhow::bail!("No document with id '{id}'");
                    };
                    vec![OverflowReport::for_document(&id, doc, &store)]
                }
                None => assembly
                    .documents()
                    .map(|(id, doc)| OverflowReport::for_document(id, doc, &store))
                    .collect(),
            };
            tracing::info!(command = "overflow", documents = reports.len(), "Overflow report built");
            print_json(&reports)
        }
        Commands::Plan {
            config,
            answers,
            role,
            key,
            per_child,
        } => {
            let assembly = resolve(&config)?;
            let store = load_answers(answers)?;
            let bundle = assembly.roles().bundle(&role).map_err(|e| {
                tracing::error!(command = "plan", role = %role, error = %e, "Unknown role");
                anyhow::Error::new(e)
            })?;
            let plan = if per_child {
                PlanReport::per_child(&role, key, bundle, &store)
            } else {
                PlanReport::flattened(&role, key, bundle, &store)
            };
            tracing::info!(command = "plan", role = %role, outputs = plan.outputs.len(), "Delivery plan built");
            print_json(&plan)
        }
    }
}

fn resolve(config: &Path) -> Result<Assembly> {
    let config = load_config(config)?;
    Assembly::from_config(&config).map_err(|e| {
        tracing::error!(error = %e, "Assembly configuration is invalid");
        anyhow::Error::new(e).context("Invalid assembly configuration")
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
