// Matter Automation Analysis - Command Line
// Every subcommand prints JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use matter_automation::aggregate::{aggregate, summarize, Dimension};
use matter_automation::cli::{init_tracing, DataArgs};
use matter_automation::report::ReportBuilder;
use matter_automation::{TaxonomyKind, TaxonomyRegistry};

#[derive(Parser, Debug)]
#[command(name = "matter-automation")]
#[command(about = "Estimate how much billed legal work AI could automate")]
#[command(version)]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full automation report (all tables, projection, task deep dive)
    Report(DataArgs),

    /// Headline figures for one taxonomy
    Summary {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long, default_value = "practice-area")]
        taxonomy: String,
    },

    /// Group hours by one or more dimensions
    Aggregate {
        #[command(flatten)]
        data: DataArgs,

        #[arg(short, long, default_value = "practice-area")]
        taxonomy: String,

        /// category, month, year, user, matter, matter-name, rate-type (repeatable)
        #[arg(short, long = "by", default_value = "category")]
        by: Vec<String>,
    },

    /// Full-year projection and efficiency scenarios
    Project(DataArgs),

    /// List registered taxonomies and their categories
    Taxonomies,

    /// Classify a single label
    Classify {
        text: String,

        #[arg(short, long, default_value = "practice-area")]
        taxonomy: String,
    },
}

fn main() -> Result<()> {
    init_tracing("matter_automation=info");
    let cli = Cli::parse();
    let registry = TaxonomyRegistry::global()?;

    match &cli.command {
        Command::Report(data) => {
            let (config, dataset) = data.load(registry)?;
            let report = ReportBuilder::new(&config, registry)
                .build(&dataset.entries, dataset.tasks.as_deref())?;
            emit(&report, cli.pretty)
        }
        Command::Summary { data, taxonomy } => {
            let kind = parse_kind(taxonomy)?;
            let (_, dataset) = data.load(registry)?;
            let entries = entries_for(kind, &dataset)?;
            emit(&summarize(entries, kind)?, cli.pretty)
        }
        Command::Aggregate { data, taxonomy, by } => {
            let kind = parse_kind(taxonomy)?;
            let dimensions = by
                .iter()
                .map(|d| d.parse::<Dimension>())
                .collect::<matter_automation::Result<Vec<_>>>()?;
            let (_, dataset) = data.load(registry)?;
            let entries = entries_for(kind, &dataset)?;
            emit(&aggregate(entries, &dimensions, kind)?, cli.pretty)
        }
        Command::Project(data) => {
            let (config, dataset) = data.load(registry)?;
            let projection = ReportBuilder::new(&config, registry)
                .project(&dataset.entries)?
                .context("No dated entries in the analysis year; nothing to project")?;
            emit(&projection, cli.pretty)
        }
        Command::Taxonomies => emit(&registry.taxonomies(), cli.pretty),
        Command::Classify { text, taxonomy } => {
            let taxonomy = registry.get_taxonomy(taxonomy)?;
            emit(&taxonomy.classify(Some(text)), cli.pretty)
        }
    }
}

fn parse_kind(name: &str) -> Result<TaxonomyKind> {
    Ok(name.parse::<TaxonomyKind>()?)
}

/// Task-level figures come from the task export, the rest from the matter export
fn entries_for(
    kind: TaxonomyKind,
    dataset: &matter_automation::Dataset,
) -> Result<&[matter_automation::AnalyzedEntry]> {
    match kind {
        TaxonomyKind::TaskLevel => dataset
            .tasks
            .as_deref()
            .context("Task-level analysis needs the task export (--tasks)"),
        _ => Ok(&dataset.entries),
    }
}

fn emit<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
