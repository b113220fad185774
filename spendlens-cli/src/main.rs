use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod serve;
mod statement;

const DEFAULT_LOG_FILTER: &str = "spendlens=info,tower_http=info";

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SPENDLENS_BUILD_SHA"), ")"),
    about = "Expense analyzer: statement PDF scraping and LLM transaction classification"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP classification relay (/analyze, /analyze_insights)
    Serve {
        /// Bind address (default: SERVER_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port (default: SERVER_PORT or 8000)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Bank statement PDF commands
    Statement {
        #[command(subcommand)]
        command: StatementCommand,
    },
}

#[derive(Subcommand, Debug)]
enum StatementCommand {
    /// Extract transactions from a statement PDF into a CSV file
    Convert {
        /// Input statement PDF
        #[arg(long)]
        pdf: PathBuf,

        /// Output CSV path
        #[arg(long)]
        out: PathBuf,
    },

    /// Show per-page extraction results without writing anything
    Inspect {
        #[arg(long)]
        pdf: PathBuf,

        /// Dump the full report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => serve::run_server(host, port).await?,

        Command::Statement { command } => match command {
            StatementCommand::Convert { pdf, out } => statement::convert(&pdf, &out)?,
            StatementCommand::Inspect { pdf, json } => statement::inspect(&pdf, json)?,
        },
    }

    Ok(())
}
