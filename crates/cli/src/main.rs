//! Amount Field CLI - render, parse and live-edit currency amounts.
//!
//! # Usage
//!
//! ```bash
//! # Format an amount
//! amf-cli --locale de_DE render 1234.5
//!
//! # Read a display string back
//! amf-cli --locale en_US parse '$1,234.50'
//!
//! # Replay keystrokes ('<' is backspace, '|' ends editing)
//! amf-cli --currency JPY type '1234.5<|'
//!
//! # Show the resolved locale profile as JSON
//! amf-cli --locale pt_BR --json profile
//! ```
//!
//! # Commands
//!
//! - `render` - Format an amount for display
//! - `parse` - Read a display string into an amount
//! - `type` - Replay keystrokes through the editor
//! - `profile` - Show the resolved locale profile
//! - `locales` - List built-in locales

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io;

use amount_field_core::{Decimal, SeparatorMatching};
use clap::{Parser, Subcommand};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{OutputFormat, write_report};
use config::CliConfig;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "amf-cli")]
#[command(author, version, about = "Currency amount formatting and editing tools")]
struct Cli {
    /// Locale tag, e.g. `en_US` or `de-DE` (overrides `AMOUNT_FIELD_LOCALE`)
    #[arg(short, long, global = true)]
    locale: Option<String>,

    /// ISO 4217 currency code (overrides `AMOUNT_FIELD_CURRENCY`)
    #[arg(short, long, global = true)]
    currency: Option<String>,

    /// Separator matching (`token` or `char-set`)
    #[arg(long, global = true)]
    separator_matching: Option<SeparatorMatching>,

    /// Write reports as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format an amount for display
    Render {
        /// Amount, e.g. `1234.5`
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Read a display string into an amount
    Parse {
        /// Display string, e.g. `$1,234.50`
        text: String,

        /// Fail on unreadable text instead of reading it as zero
        #[arg(long)]
        strict: bool,
    },
    /// Replay keystrokes through the editor
    Type {
        /// Keys to type; `<` is backspace, `|` ends editing
        keys: String,

        /// Amount the field starts with
        #[arg(short, long, allow_negative_numbers = true)]
        start: Option<Decimal>,
    },
    /// Show the resolved locale profile
    Profile,
    /// List built-in locales
    Locales,
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay machine-readable.
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "amount_field_cli=info,amount_field_core=info".into());
    let fmt_layer = if cli.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?.with_overrides(
        cli.locale.as_deref(),
        cli.currency.as_deref(),
        cli.separator_matching,
    )?;
    tracing::debug!(?config, "Configuration loaded");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Render { amount } => {
            write_report(&mut out, format, &commands::render::render(&config, amount))?;
        }
        Commands::Parse { text, strict } => {
            let report = commands::render::parse(&config, &text, strict)?;
            write_report(&mut out, format, &report)?;
        }
        Commands::Type { keys, start } => {
            let report = commands::simulate::simulate(&config, start, &keys);
            write_report(&mut out, format, &report)?;
        }
        Commands::Profile => write_report(&mut out, format, &commands::inspect::profile(&config))?,
        Commands::Locales => write_report(&mut out, format, &commands::inspect::locales())?,
    }
    Ok(())
}
