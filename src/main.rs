use clap::Parser;
use plan_agent::agent::{Agent, CliAgent};
use plan_agent::config::AgentConfig;
use plan_agent::device::SystemProbe;
use plan_agent::model::HttpModelLoader;
use plan_agent::trace::JsonlTrace;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plan-agent")]
#[command(
    version,
    about = "CLI Agent that generates and executes a plan based on a natural language instruction."
)]
struct Cli {
    /// The natural language instruction for the agent.
    instruction: String,

    /// TOML config file (default: plan-agent.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the fine-tuned model and tokenizer
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// JSON-lines trace file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Inference server generate endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Model name known to the inference server
    #[arg(long)]
    model_name: Option<String>,

    #[arg(long)]
    max_new_tokens: Option<u32>,

    /// Skip the GPU availability check
    #[arg(long)]
    allow_cpu: bool,

    /// Show debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AgentConfig) {
        if let Some(path) = &self.model_path {
            config.model_path = path.clone();
        }
        if let Some(path) = &self.log_file {
            config.log_file = path.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(name) = &self.model_name {
            config.model_name = Some(name.clone());
        }
        if let Some(n) = self.max_new_tokens {
            config.max_new_tokens = n;
        }
        if self.allow_cpu {
            config.require_gpu = false;
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "plan_agent=debug" } else { "plan_agent=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match AgentConfig::load_with_fallback(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    let trace = match JsonlTrace::create(&config.log_file) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Failed to prepare trace log {}: {e}", config.log_file.display());
            return ExitCode::FAILURE;
        }
    };

    let loader = HttpModelLoader::from_config(&config);
    let mut agent = CliAgent::new(config, SystemProbe, loader, trace, std::io::stdout());

    match agent.run(&cli.instruction) {
        Ok(summary) => {
            tracing::debug!(steps = summary.plan.steps.len(), "run finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("agent run failed: {e}");
            ExitCode::FAILURE
        }
    }
}
