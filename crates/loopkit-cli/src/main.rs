//! Loopkit CLI — entry point.
//!
//! # Commands
//!
//! - `loopkit run -m MESSAGE [--max-steps N] [--strict]` — one bounded run
//! - `loopkit chat` — interactive REPL
//! - `loopkit status` — show configuration and provider status

mod helpers;
mod repl;
mod status;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::info;

use loopkit_agent::tools::math::{AddNumbersTool, CurrentTimeTool};
use loopkit_agent::tools::weather::GetWeatherTool;
use loopkit_agent::{LoopConfig, LoopRunner, RunStatus, ToolRegistry};
use loopkit_core::config::{load_config, Config};
use loopkit_endpoints::http_endpoint::create_endpoint;
use loopkit_endpoints::RequestConfig;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 🔁 Loopkit — bounded tool-calling loops for language models
#[derive(Parser)]
#[command(name = "loopkit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one bounded loop and print the final answer
    Run {
        /// The prompt to run
        #[arg(short, long)]
        message: String,

        /// Override the configured step ceiling
        #[arg(long)]
        max_steps: Option<usize>,

        /// Abort the run on tool failure instead of feeding it back
        #[arg(long, default_value_t = false)]
        strict: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Chat interactively (REPL), one bounded run per message
    Chat {
        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            message,
            max_steps,
            strict,
            logs,
        } => {
            init_logging(logs);
            run_once(&message, max_steps, strict).await
        }
        Commands::Chat { logs } => {
            init_logging(logs);
            let config = load_config(None);
            let runner = build_runner(&config, None, false)?;
            repl::run(runner).await
        }
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Run command
// ─────────────────────────────────────────────

async fn run_once(message: &str, max_steps: Option<usize>, strict: bool) -> Result<()> {
    let config = load_config(None);
    let runner = build_runner(&config, max_steps, strict)?;

    // Ctrl-C cancels the run at the next suspension point; tools already
    // in flight finish first.
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    info!("processing single message");
    let report = runner
        .run_with_cancellation(message, cancel)
        .await
        .context("run failed")?;

    helpers::print_response(&report.text);
    match report.status {
        RunStatus::Done => {}
        RunStatus::BudgetExhausted => {
            helpers::print_notice(&format!(
                "step budget exhausted after {} steps without a final answer",
                report.steps_taken
            ));
        }
        RunStatus::Cancelled => {
            helpers::print_notice(&format!("cancelled after {} steps", report.steps_taken));
        }
    }

    Ok(())
}

/// Build a [`LoopRunner`] from the loaded configuration.
pub fn build_runner(
    config: &Config,
    max_steps_override: Option<usize>,
    strict_override: bool,
) -> Result<LoopRunner> {
    let defaults = &config.defaults;

    let endpoint = create_endpoint(&defaults.model, &config.providers)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(GetWeatherTool::new(
        config.tools.weather.api_base.clone(),
    )));
    tools.register(Arc::new(AddNumbersTool));
    tools.register(Arc::new(CurrentTimeTool));

    let loop_config = LoopConfig {
        max_steps: max_steps_override.unwrap_or(defaults.max_steps as usize),
        strict_tool_errors: strict_override || defaults.strict_tool_errors,
        system_prompt: defaults.system_prompt.clone(),
        request: RequestConfig {
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        },
    };

    Ok(LoopRunner::new(Arc::new(endpoint), tools, loop_config))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("loopkit=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
