//! aastocks CLI - AAStocks historical prices and live quotes.

use aastocks_lib::prelude::*;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use commands::watch::SourceKind;
use display::Format;

#[derive(Parser)]
#[command(name = "aastocks")]
#[command(about = "AAStocks historical prices and live quotes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only log errors)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base URL of the chart data feed
    #[arg(long, env = "AASTOCKS_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Base URL of the quote website (detail and dividend pages)
    #[arg(long, env = "AASTOCKS_QUOTE_URL", global = true)]
    quote_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Download a symbol's historical prices
    History {
        /// Stock symbol (e.g., 00006)
        symbol: String,

        /// Bar frequency (hourly, daily, weekly, monthly)
        #[arg(short, long, default_value = "daily")]
        frequency: PriceFrequency,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a symbol's quote details
    Quote {
        /// Stock symbol (e.g., 00006)
        symbol: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Download a symbol's dividend history
    Dividends {
        /// Stock symbol (e.g., 00006)
        symbol: String,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a saved feed body
    Parse {
        /// Feed file ("-" reads stdin)
        input: PathBuf,

        /// Bar frequency the feed was downloaded with
        #[arg(short, long, default_value = "daily")]
        frequency: PriceFrequency,

        /// Year assigned to intraday rows. Defaults to the current year
        #[arg(long)]
        year: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Stream live prices for a symbol until interrupted
    Watch {
        /// Stock symbol (e.g., 00006)
        symbol: String,

        /// Polling interval in seconds
        #[arg(short, long, default_value = "5")]
        interval: u64,

        /// Stop after this many consecutive failed polls
        #[arg(long, default_value = "5")]
        max_errors: u32,

        /// Stop after this many events
        #[arg(short = 'n', long)]
        count: Option<u64>,

        /// Where each poll reads the price from
        #[arg(long, value_enum, default_value = "detail")]
        source: SourceKind,
    },
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default().with_timeout(Duration::from_secs(self.timeout));
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(quote_url) = &self.quote_url {
            config = config.with_quote_base_url(quote_url.as_str());
        }
        config
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = cli.client_config();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::History {
            symbol,
            frequency,
            format,
            output,
        } => commands::history::history(config, &symbol, frequency, format, output).await,
        Commands::Quote { symbol, json } => commands::quote::quote(config, &symbol, json).await,
        Commands::Dividends {
            symbol,
            format,
            output,
        } => commands::dividends::dividends(config, &symbol, format, output).await,
        Commands::Parse {
            input,
            frequency,
            year,
            format,
            output,
        } => commands::parse::parse(&input, frequency, year, format, output),
        Commands::Watch {
            symbol,
            interval,
            max_errors,
            count,
            source,
        } => {
            commands::watch::watch(
                config,
                &symbol,
                source,
                Duration::from_secs(interval),
                max_errors,
                count,
                cli.quiet,
            )
            .await
        }
    }
}
