//! Command-line interface for vquery
//!
//! # Usage Examples
//!
//! ## Queries
//! ```bash
//! # Page 3 of Electronics, 25 per page, most expensive first
//! vquery run --sql "select * from products" \
//!   --filter "category eq Electronics" \
//!   --page 3 --page-size 25 --sort price:desc --pretty
//!
//! # Request from a JSON file, with the mock backend's latency and failures
//! vquery run --request request.json --simulate
//! ```
//!
//! ## Metadata
//! ```bash
//! vquery schema company
//! vquery templates
//! ```
//!
//! Logging is controlled through `RUST_LOG`, e.g. `RUST_LOG=query_engine=debug`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use dataset_core::Dataset;
use dataset_generator::SchemaRegistry;
use query_engine::QUERY_TEMPLATES;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use vquery::{EngineSettings, RunArgs};

#[derive(Parser)]
#[command(name = "vquery")]
#[command(about = "Query large synthetic datasets without materializing them")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query and print the JSON response
    Run {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Print a dataset's columns, size and period
    Schema {
        /// Dataset name or table name
        dataset: String,
    },

    /// List the canned queries
    Templates,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { args } => run_query(args).await,
        Commands::Schema { dataset } => {
            let dataset: Dataset = dataset
                .parse()
                .with_context(|| format!("Invalid dataset '{dataset}'"))?;
            print_schema(dataset)
        }
        Commands::Templates => print_json(&QUERY_TEMPLATES, true),
    }
}

async fn run_query(args: RunArgs) -> anyhow::Result<()> {
    let mut settings = match &args.config {
        Some(path) => EngineSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {path:?}"))?,
        None => EngineSettings::default(),
    };
    if args.simulate {
        settings.simulation.enabled = true;
    }

    let request = args.to_request()?;
    request.validate()?;
    let engine = settings
        .build_engine()
        .context("Failed to initialize query engine")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received interrupt, cancelling query");
            on_interrupt.cancel();
        }
    });

    match engine.run(request, &cancel).await {
        Ok(response) => print_json(&response, args.pretty),
        Err(e) if e.is_cancelled() => {
            tracing::info!("Query cancelled");
            Ok(())
        }
        Err(e) => Err(e).context("Query failed"),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaSummary<'a> {
    dataset: Dataset,
    table: &'static str,
    size: u64,
    period: u64,
    columns: &'a [dataset_core::Column],
}

fn print_schema(dataset: Dataset) -> anyhow::Result<()> {
    let registry = SchemaRegistry::build().context("Failed to build schema registry")?;
    let schema = registry.schema(dataset);
    print_json(
        &SchemaSummary {
            dataset,
            table: dataset.table_name(),
            size: schema.size,
            period: schema.period,
            columns: &schema.columns,
        },
        true,
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
