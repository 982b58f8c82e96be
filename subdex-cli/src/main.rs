//! subdex CLI — evaluate subject-indexing predictions against gold standards.

mod commands;
mod input;
mod output;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use subdex_core::{BackendRegistry, ConfigOverrides, OutputFormat, load_config};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// subdex: quality metrics for automated subject indexing
#[derive(Parser, Debug)]
#[command(name = "subdex", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (reads `.subdex/config.toml`)
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write JSON logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Maximum number of hits per document
    #[arg(long)]
    limit: Option<usize>,

    /// Minimum hit score (0.0-1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    output: Option<OutputArg>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
enum OutputArg {
    Table,
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Table => OutputFormat::Table,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Evaluate a JSON Lines corpus of predictions and gold subjects
    Eval {
        /// Corpus file, one `{"hits": [...], "gold": [...]}` document per line
        corpus: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Suggest subjects for a text with a registered backend
    Suggest {
        /// Document text
        text: String,

        /// Backend identifier
        #[arg(short, long)]
        backend: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List registered backends
    Backends,
}

impl Commands {
    fn overrides(&self) -> ConfigOverrides {
        let (filter, backend) = match self {
            Commands::Eval { filter, .. } => (Some(filter), None),
            Commands::Suggest {
                filter, backend, ..
            } => (Some(filter), backend.clone()),
            Commands::Backends => (None, None),
        };
        ConfigOverrides {
            limit: filter.and_then(|f| f.limit),
            threshold: filter.and_then(|f| f.threshold),
            output: filter.and_then(|f| f.output).map(OutputFormat::from),
            backend,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    // Optional JSON file layer for structured logging
    let mut _guard = None;
    let json_layer = match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let file_name = path
                .file_name()
                .context("--log-file must name a file")?;
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            _guard = Some(guard);
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let config = load_config(
        Some(&cli.workspace),
        cli.config.as_deref(),
        &cli.command.overrides(),
    )?;
    tracing::debug!(?config, "Loaded configuration");

    let registry = BackendRegistry::with_defaults();
    let rendered = match &cli.command {
        Commands::Eval { corpus, .. } => commands::eval(&config, corpus)?,
        Commands::Suggest { text, .. } => commands::suggest(&config, &registry, text)?,
        Commands::Backends => commands::backends(&registry),
    };
    print!("{rendered}");
    Ok(())
}
