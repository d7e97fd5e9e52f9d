//! marathon - movie and series marathon planner, as a Telegram bot or a CLI.

/// Telegram bot front end.
mod bot;
/// Application configuration (TOML).
mod config;
/// Shared catalog, narrative and chart components.
mod services;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use marathon_api::telegram::TelegramApi;
use marathon_core::message::{adjust_message, plan_message, plan_narrative_message};
use marathon_core::{RenderError, RequestId, adjust, plan};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::bot::Bot;
use crate::config::{AppConfig, resolve_config_path};
use crate::services::{build_services, build_telegram_client};

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "marathon", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot until interrupted.
    Bot,
    /// Plan a marathon for a title and render its chart.
    Plan(PlanArgs),
    /// Fit a viewing session into the available time.
    Adjust(AdjustArgs),
    /// Show the catalog entry a query resolves to.
    Search(SearchArgs),
    /// Write a default config file if none exists.
    Init,
    /// Print shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `plan` subcommand.
#[derive(clap::Args)]
struct PlanArgs {
    /// Movie or series title.
    #[arg(required = true, num_args = 1..)]
    title: Vec<String>,

    /// Skip chart rendering.
    #[arg(long)]
    no_chart: bool,
}

/// Arguments for the `adjust` subcommand.
#[derive(clap::Args)]
struct AdjustArgs {
    /// Movie or series title.
    #[arg(required = true, num_args = 1..)]
    title: Vec<String>,

    /// Available time in minutes.
    #[arg(long, short, value_parser = clap::value_parser!(u32).range(1..))]
    minutes: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Loads the config for `dir`, falling back to defaults when absent.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Runs the bot until Ctrl-C.
///
/// # Errors
///
/// Returns an error if a token is missing, a client fails to build, or the
/// first poll fails.
async fn run_bot(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let telegram = build_telegram_client()?;
    let services = build_services(&config)?;
    let me = telegram.get_me().await.context("getMe failed")?;
    tracing::info!(username = me.username.as_deref().unwrap_or("-"), "bot identity");
    let bot = Arc::new(Bot::new(telegram, services).username(me.username));

    bot::run(bot, config.bot.poll_timeout_secs, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
        }
    })
    .await
}

/// Prints a marathon plan and writes its chart.
///
/// # Errors
///
/// Returns an error if configuration, lookup or chart writing fails.
#[instrument(skip_all)]
async fn run_plan(args: &PlanArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let services = build_services(&config)?;
    let query = args.title.join(" ");

    let detail = services.catalog.resolve(&query).await?;
    let plan = plan(detail.unit_minutes, detail.unit_count, services.pause_minutes);

    let text = match services.narrative.describe_plan(&detail, &plan).await {
        Ok(narrative) => plan_narrative_message(&detail, &plan, &narrative),
        Err(e) => {
            tracing::debug!(reason = %e.reason, "using plan template");
            plan_message(&detail, &plan)
        }
    };
    for line in text.lines() {
        tracing::info!("{line}");
    }

    if args.no_chart {
        return Ok(());
    }
    match services.charts.render(&plan, &detail.title, RequestId::new()) {
        Ok(path) => tracing::info!("Chart: {}", path.display()),
        Err(RenderError::EmptyPlan) => tracing::info!("Chart: skipped (no runtime data)"),
        Err(e) => return Err(e).context("failed to render chart"),
    }
    Ok(())
}

/// Prints how much of a title fits into the given minutes.
///
/// # Errors
///
/// Returns an error if configuration or lookup fails, or nothing fits.
#[instrument(skip_all)]
async fn run_adjust(args: &AdjustArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let services = build_services(&config)?;
    let query = args.title.join(" ");

    let detail = services.catalog.resolve(&query).await?;
    let fit = adjust(&detail, args.minutes, services.pause_minutes)?;
    for line in adjust_message(&detail, &fit).lines() {
        tracing::info!("{line}");
    }
    Ok(())
}

/// Prints the search hit and normalized runtime data for a query.
///
/// # Errors
///
/// Returns an error if configuration or lookup fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let services = build_services(&config)?;
    let query = args.query.join(" ");

    let hit = services.catalog.search(&query).await?;
    let detail = services.catalog.detail(hit.external_id, hit.media_kind).await?;

    tracing::info!("ID: {}", hit.external_id);
    tracing::info!("Type: {}", hit.media_kind);
    tracing::info!("Title: {}", detail.title);
    tracing::info!("Unit runtime: {} min", detail.unit_minutes);
    if detail.has_unknown_count() {
        tracing::info!("Units: unknown");
    } else {
        tracing::info!("Units: {}", detail.unit_count);
    }
    Ok(())
}

/// Writes the default config file.
///
/// # Errors
///
/// Returns an error if the file already exists or cannot be written.
fn run_init(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() {
        bail!("config file already exists: {}", path.display());
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Bot => run_bot(dir).await,
        Commands::Plan(args) => run_plan(&args, dir).await,
        Commands::Adjust(args) => run_adjust(&args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Init => run_init(dir),
        Commands::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "marathon",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
