//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tokentint_core::{EnrichConfig, EnrichResult, ProgressReporter, enrich_list};
use tokentint_shared::{
    AppConfig, FetchConfig, FieldNames, TokenOutcome, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// tokentint — derive logo colors for every token in a token list.
#[derive(Parser)]
#[command(
    name = "tokentint",
    version,
    about = "Enrich token-list metadata with colors extracted from each token's logo.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enrich a token list in place and render its HTML preview.
    Enrich {
        /// Token-list JSON file to enrich (rewritten in place).
        file: PathBuf,

        /// Preview output path (defaults to preview.html next to the input).
        #[arg(short, long)]
        preview: Option<PathBuf>,

        /// HTTP timeout per logo download, in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Re-render the HTML preview from an already-enriched token list.
    Preview {
        /// Enriched token-list JSON file.
        file: PathBuf,

        /// Preview output path (defaults to preview.html next to the input).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "tokentint=info",
        1 => "tokentint=debug",
        _ => "tokentint=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Enrich {
            file,
            preview,
            timeout,
        } => cmd_enrich(&file, preview, timeout).await,
        Command::Preview { file, out } => cmd_preview(&file, out).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

/// Resolve the preview output path next to the input file.
fn default_preview_path(input: &Path, config: &AppConfig) -> PathBuf {
    input.with_file_name(&config.output.preview_name)
}

async fn cmd_enrich(file: &Path, preview: Option<PathBuf>, timeout: Option<u64>) -> Result<()> {
    let config = load_config()?;

    if !file.exists() {
        return Err(eyre!("token list '{}' not found", file.display()));
    }

    let mut fetch = FetchConfig::from(&config);
    if let Some(secs) = timeout {
        fetch.timeout_secs = secs;
    }

    let enrich_config = EnrichConfig {
        input: file.to_path_buf(),
        preview: preview.unwrap_or_else(|| default_preview_path(file, &config)),
        fields: FieldNames::from(&config),
        fetch,
    };

    info!(
        input = %enrich_config.input.display(),
        preview = %enrich_config.preview.display(),
        timeout_secs = enrich_config.fetch.timeout_secs,
        "enriching token list"
    );

    let reporter = CliProgress::new();
    let result = enrich_list(&enrich_config, &reporter).await?;

    // Print summary
    println!();
    println!("  Token list enriched!");
    println!("  Tokens:   {}", result.total);
    println!("  Enriched: {}", result.enriched);
    println!("  Fallback: {}", result.fallback);
    println!("  Skipped:  {}", result.skipped);
    println!("  List:     {}", result.input_path.display());
    println!("  Preview:  {}", result.preview_path.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_preview(file: &Path, out: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let fields = FieldNames::from(&config);

    let content = std::fs::read_to_string(file)
        .map_err(|e| eyre!("cannot read '{}': {e}", file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| eyre!("failed to parse '{}': {e}", file.display()))?;

    let title = tokentint_artifacts::list_title(&document);
    let cards = tokentint_artifacts::cards_from_document(&document, &fields)?;
    let html = tokentint_artifacts::render_preview(&title, &cards);

    let out = out.unwrap_or_else(|| default_preview_path(file, &config));
    tokentint_artifacts::write_preview(&out, &html)?;

    info!(cards = cards.len(), out = %out.display(), "preview rendered");
    println!("Preview written to: {}", out.display());

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: indicatif spinner plus a status line per token.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn token_started(&self, symbol: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Processing [{current}/{total}] {symbol}"));
    }

    fn token_finished(&self, symbol: &str, outcome: &TokenOutcome) {
        let line = match outcome {
            TokenOutcome::Enriched => format!("  ✔ {symbol}"),
            TokenOutcome::Skipped => format!("  → {symbol} — no logo, skipped"),
            TokenOutcome::Fallback { reason } => {
                format!("  ✖ {symbol} — {reason} (fallback colors)")
            }
        };
        self.spinner.println(line);
    }

    fn done(&self, _result: &EnrichResult) {
        self.spinner.finish_and_clear();
    }
}
