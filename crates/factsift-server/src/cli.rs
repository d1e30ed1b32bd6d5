//! Command-line interface.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use factsift_core::FactSiftConfig;
use factsift_pipeline::{LogProgress, QueryTemplate, DEFAULT_TEMPLATE};
use factsift_table::{CsvFile, Table, TableSink, TableSource};
use tracing::{error, info};

use crate::enrichment::{self, RunSettings};
use crate::routes;
use crate::state::AppState;

/// Exit code when the CSV was produced but the sheet update failed.
pub const EXIT_SHEET_UPDATE_FAILED: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "factsift", version, about = "Look up contact details for a list of entities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enrich one column of a CSV file or Google Sheet
    Run(RunArgs),
    /// Validate a query template
    Check {
        #[arg(long)]
        template: String,
    },
    /// Start the HTTP server
    Serve {
        /// Overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "sheet_url"])))]
pub struct RunArgs {
    /// CSV file to read entities from
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Google Sheets URL to read entities from
    #[arg(long)]
    pub sheet_url: Option<String>,

    /// Column holding the entity names
    #[arg(long, default_value = "Name")]
    pub column: String,

    /// Search query template, must contain {entity}
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Scan the search snippets for phone numbers
    #[arg(long)]
    pub phones: bool,

    /// Scan the search snippets for email addresses
    #[arg(long)]
    pub emails: bool,

    /// Where to write the augmented CSV (stdout if omitted)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Append the augmented rows to the source sheet
    #[arg(long, requires = "sheet_url", conflicts_with = "input")]
    pub update_sheet: bool,

    /// Overrides FACTSIFT_MAX_CONCURRENCY
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl RunArgs {
    fn settings(&self) -> RunSettings {
        RunSettings {
            column: self.column.clone(),
            template: self.template.clone(),
            extract_phone: self.phones,
            extract_email: self.emails,
        }
    }
}

/// Run a parsed command and return the process exit code.
pub async fn execute(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Check { template } => Ok(check(&template)),
        Command::Run(args) => {
            let config = FactSiftConfig::from_env()?;
            run(args, config).await
        }
        Command::Serve { port } => {
            let mut config = FactSiftConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
            Ok(0)
        }
    }
}

fn check(template: &str) -> i32 {
    match QueryTemplate::parse(template) {
        Ok(t) => {
            println!("OK: {}", t);
            0
        }
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

async fn run(args: RunArgs, mut config: FactSiftConfig) -> anyhow::Result<i32> {
    if args.update_sheet && args.sheet_url.is_none() {
        anyhow::bail!("--update-sheet needs --sheet-url");
    }
    if let Some(n) = args.concurrency {
        config.max_concurrency = n;
    }
    let settings = args.settings();

    // Validate against the loaded table before building any API client.
    let (table, sheet) = match (&args.input, &args.sheet_url) {
        (Some(path), _) => (CsvFile::new(path).load().await?, None),
        (None, Some(url)) => {
            let connector = enrichment::sheet_connector(&config)?;
            let sheet = connector.open(url)?;
            (sheet.load().await?, Some(sheet))
        }
        (None, None) => anyhow::bail!("either --input or --sheet-url is required"),
    };
    enrichment::prepare(&table, &settings)?;

    let pipeline = enrichment::build_pipeline(&config)?;
    let result = enrichment::enrich_table(&pipeline, &table, &settings, &LogProgress).await?;
    info!(
        rows = result.table.len(),
        no_results = result.without_results(),
        "Enrichment finished"
    );

    write_output(&result.table, args.output.as_ref()).await?;

    if let Some(sheet) = sheet.filter(|_| args.update_sheet) {
        if let Err(e) = sheet.write(&result.table).await {
            error!("Sheet update failed: {}", e);
            return Ok(EXIT_SHEET_UPDATE_FAILED);
        }
        info!("Sheet updated");
    }

    Ok(0)
}

async fn write_output(table: &Table, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            CsvFile::new(path)
                .write(table)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", table.to_csv_string()?),
    }
    Ok(())
}

async fn serve(config: FactSiftConfig) -> anyhow::Result<()> {
    let port = config.port;
    let state = Arc::new(AppState::from_config(config)?);
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("FactSift server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
