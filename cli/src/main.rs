//! CLI entrypoint for shellfix
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use shellfix_application::{
    Activation, AnalyzeFailureUseCase, BehaviorConfig, Decision, DecisionContext,
    DecisionProgress, GenerateCommandUseCase, NoCache, NoProgress, SuggestionBackend,
    SuggestionCache, evaluate_activation,
};
use shellfix_domain::Request;
use shellfix_domain::core::string::first_token;
use shellfix_infrastructure::{
    BackendSettings, ConfigLoader, FileConfig, JsonFileCache, create_backend,
};
use shellfix_presentation::{
    CacheAction, Cli, Command, ConsoleFormatter, FailureMenu, MenuChoice, ProgressReporter,
    SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&format!("{:#}", e)));
            return ExitCode::FAILURE;
        }
    };

    match run(cli).await {
        Ok(code) => ExitCode::from(code.clamp(0, 255) as u8),
        Err(e) => {
            eprintln!("{}", ConsoleFormatter::error(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging based on verbosity level. `RUST_LOG` wins when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(filter());

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(Some(guard))
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?
    };

    for issue in config.validate() {
        warn!("{}", issue);
        if !cli.quiet {
            eprintln!("{}", ConsoleFormatter::warning(&issue.to_string()));
        }
    }
    Ok(config)
}

fn build_cache(config: &FileConfig) -> Arc<dyn SuggestionCache> {
    if !config.cache.enabled {
        return Arc::new(NoCache);
    }
    match config.cache.resolved_path() {
        Some(path) => Arc::new(JsonFileCache::open(path)),
        None => {
            warn!("No data directory available, caching disabled");
            Arc::new(NoCache)
        }
    }
}

fn progress_for(quiet: bool) -> Box<dyn DecisionProgress> {
    if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

/// Cancel the token on Ctrl-C.
fn cancel_on_interrupt() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            child.cancel();
        }
    });
    token
}

async fn run(cli: Cli) -> Result<i32> {
    info!("Starting shellfix");

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Command::Analyze {
            command,
            exit_code,
            error,
            force,
        } => {
            let error = error.as_deref().unwrap_or_default();
            let request = Request::reactive(command.as_str(), error, *exit_code)?
                .with_working_directory(std::env::current_dir().unwrap_or_default());
            run_analyze(&cli, &config, request, *force).await
        }
        Command::Ask { query } => run_ask(&cli, &config, &query.join(" ")).await,
        Command::Cache { action } => run_cache(&config, *action),
        Command::Check => run_check(&config).await,
        Command::Models => run_models(&config).await,
        Command::Config => run_config(&cli, &config),
    }
}

async fn run_analyze(cli: &Cli, config: &FileConfig, request: Request, force: bool) -> Result<i32> {
    let passthrough = request.exit_code();
    let (policy, _) = config.activation.to_policy();
    let mut ctx = DecisionContext::new();

    match evaluate_activation(&policy, request.command(), &ctx, force) {
        Activation::PassThrough => {
            info!("Activation gate closed for {}", first_token(request.command()));
            return Ok(passthrough);
        }
        Activation::Prompt => match FailureMenu::stdio().prompt() {
            Ok(MenuChoice::Suggest) => {}
            Ok(MenuChoice::ShowManual) => {
                let tool = first_token(request.command());
                let tip = format!("📖 Tip: Use 'man {}' for documentation", tool);
                println!("{}", tip.cyan());
                return Ok(passthrough);
            }
            Ok(MenuChoice::Skip) => return Ok(passthrough),
            Ok(MenuChoice::Disable) => {
                ctx.disable_for_session();
                println!(
                    "{}",
                    ConsoleFormatter::info(
                        "AI disabled for this session. Restart terminal to re-enable."
                    )
                );
            }
            Err(e) => {
                info!("Menu cancelled: {}", e);
                return Ok(passthrough);
            }
        },
        Activation::Run => {}
    }
    if ctx.is_session_disabled() {
        return Ok(passthrough);
    }

    // Installed after the menu so Ctrl-C still interrupts the prompt
    let ctx = ctx.with_cancellation(cancel_on_interrupt());
    let backend = create_backend(&BackendSettings::from_config(config))?;
    let (timeout, _) = config.parse_timeout();
    let use_case = AnalyzeFailureUseCase::new(backend, build_cache(config))
        .with_config(BehaviorConfig::with_timeout_seconds(timeout));

    let progress = progress_for(cli.quiet);
    let decision = use_case
        .execute_with_progress(&request, &ctx, progress.as_ref())
        .await?;

    print_decision(config, &decision);
    Ok(decision.exit_code(passthrough))
}

async fn run_ask(cli: &Cli, config: &FileConfig, query: &str) -> Result<i32> {
    let request = Request::proactive(query)?
        .with_working_directory(std::env::current_dir().unwrap_or_default());
    let ctx = DecisionContext::new().with_cancellation(cancel_on_interrupt());

    if !cli.quiet {
        eprintln!("{}", ConsoleFormatter::generating(query));
    }

    let backend = create_backend(&BackendSettings::from_config(config))?;
    let (timeout, _) = config.parse_timeout();
    let use_case = GenerateCommandUseCase::new(backend)
        .with_config(BehaviorConfig::with_timeout_seconds(timeout));

    let progress = progress_for(cli.quiet);
    let decision = use_case
        .execute_with_progress(&request, &ctx, progress.as_ref())
        .await?;

    print_decision(config, &decision);
    Ok(decision.exit_code(0))
}

/// Suggestions go to stdout; rejection and danger blocks go to stderr.
fn print_decision(config: &FileConfig, decision: &Decision) {
    let text = ConsoleFormatter::new(config.output.show_confidence).decision(decision);
    match decision {
        Decision::Accepted(_) | Decision::Cached(_) => println!("{}", text),
        Decision::Rejected(_) | Decision::Dangerous { .. } => eprintln!("{}", text),
        Decision::Skipped => {}
    }
}

fn run_cache(config: &FileConfig, action: CacheAction) -> Result<i32> {
    let cache = build_cache(config);
    match action {
        CacheAction::Stats => println!("{}", ConsoleFormatter::cache_stats(&cache.stats())),
        CacheAction::Clear => {
            cache.clear()?;
            println!("{}", ConsoleFormatter::success("Cache cleared"));
        }
    }
    Ok(0)
}

async fn run_check(config: &FileConfig) -> Result<i32> {
    let settings = BackendSettings::from_config(config);
    let backend = create_backend(&settings)?;

    if backend.is_available().await {
        println!(
            "{}",
            ConsoleFormatter::success(&format!("{} backend is reachable", backend.provider()))
        );
        Ok(0)
    } else {
        println!(
            "{}",
            ConsoleFormatter::error(&format!("{} backend is not reachable", backend.provider()))
        );
        Ok(1)
    }
}

async fn run_models(config: &FileConfig) -> Result<i32> {
    let settings = BackendSettings::from_config(config);
    let backend: Arc<dyn SuggestionBackend> = create_backend(&settings)?;
    let models = backend.list_models().await?;

    if models.is_empty() {
        println!("{}", ConsoleFormatter::warning("No models available"));
        return Ok(0);
    }
    println!("{}", format!("Models ({}):", backend.provider()).cyan().bold());
    for model in models {
        println!("  {}", model);
    }
    Ok(0)
}

fn run_config(cli: &Cli, config: &FileConfig) -> Result<i32> {
    println!("{}", "⚙️  Configuration:".cyan().bold());
    println!("{}", toml::to_string_pretty(config).context("failed to render configuration")?);

    println!("{}", "Sources (highest priority first):".cyan().bold());
    if cli.no_config {
        println!("  {} built-in defaults (--no-config)", "Default".yellow());
        return Ok(0);
    }
    for source in ConfigLoader::sources(cli.config.as_deref()) {
        let marker = if source.found { "✓".green() } else { "-".dimmed() };
        println!("  {} {:<9} {}", marker, source.label.yellow(), source.location);
    }
    Ok(0)
}
