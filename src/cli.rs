//! Subcommand arguments and entry points for the linkhub CLI.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use linkhub_config::{
    CliOverrides, Config, ConfigError, LoggingConfig, apply_overrides, load_config,
    validate_config,
};
use linkhub_rules::{
    AgentClassifier, Clock, ContextResolver, DeviceClass, FileProvider, HubSnapshot, HubStats,
    LinkStats, PublicLink, RequestFacts, VisitorContext, format_ctr, prepare_for_sync, rank_view,
    summarize,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rank a hub's links for one visitor.
#[derive(Parser, Debug, Clone)]
pub struct RankArgs {
    /// Config file path (json/jsonc/yaml/toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hub snapshot (json/yaml/toml)
    #[arg(short, long)]
    pub links: PathBuf,

    /// Visitor user agent
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Geo-resolved country code
    #[arg(long)]
    pub country: Option<String>,

    /// Visitor-supplied local hour, as sent in the X-Visitor-Hour header
    #[arg(long)]
    pub hour: Option<String>,

    /// Skip user-agent classification and use this device class
    #[arg(long)]
    pub device: Option<DeviceClass>,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Prepare a hub's links for saving: trim fields and keep the newest rule
/// of each type.
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Config file path (json/jsonc/yaml/toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hub snapshot (json/yaml/toml)
    #[arg(short, long)]
    pub links: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Summarize a hub's visit and click counters.
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Config file path (json/jsonc/yaml/toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hub snapshot (json/yaml/toml)
    #[arg(short, long)]
    pub links: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,
}

/// Visitor context as reported by `rank`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextReport {
    pub device: DeviceClass,
    pub country: String,
    pub time_hour: u8,
}

impl From<&VisitorContext> for ContextReport {
    fn from(ctx: &VisitorContext) -> Self {
        Self {
            device: ctx.device,
            country: ctx.country.clone(),
            time_hour: ctx.time_hour,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankReport {
    pub context: ContextReport,
    /// Crawlers see the same links but should not be counted as visits.
    pub is_bot: bool,
    pub links: Vec<PublicLink>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    #[serde(flatten)]
    pub stats: LinkStats,
    pub ctr_display: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub title: String,
    pub total_visits: u64,
    pub total_clicks: u64,
    pub links: Vec<LinkReport>,
    pub top_link: Option<LinkReport>,
}

impl StatsReport {
    pub fn new(title: impl Into<String>, stats: HubStats, precision: u8) -> Self {
        let report = |stats: LinkStats| LinkReport {
            ctr_display: format_ctr(stats.ctr, precision),
            stats,
        };
        Self {
            title: title.into(),
            total_visits: stats.total_visits,
            total_clicks: stats.total_clicks,
            links: stats.links.into_iter().map(report).collect(),
            top_link: stats.top_link.map(report),
        }
    }
}

pub fn run_rank(args: RankArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_settings(args.config.as_deref(), &args.overrides)?;
    init_tracing(&config.logging);

    let snapshot = FileProvider::load(&args.links)?;
    let resolver = build_resolver(&config)?;
    let facts = RequestFacts {
        user_agent: args.user_agent.as_deref(),
        country: args.country.as_deref(),
        visitor_hour: args.hour.as_deref(),
    };
    let mut ctx = resolver.resolve(&facts);
    if let Some(device) = args.device {
        ctx.device = device;
    }

    let report = rank_report(&snapshot, &resolver, &facts, &ctx);
    info!(
        visible = report.links.len(),
        total = snapshot.links.len(),
        bot = report.is_bot,
        "ranked hub"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run_normalize(args: NormalizeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_settings(args.config.as_deref(), &args.overrides)?;
    init_tracing(&config.logging);

    let snapshot = normalize_snapshot(FileProvider::load(&args.links)?);
    info!(links = snapshot.links.len(), "normalized hub");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

pub fn run_stats(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_settings(args.config.as_deref(), &args.overrides)?;
    init_tracing(&config.logging);

    let snapshot = FileProvider::load(&args.links)?;
    let stats = summarize(snapshot.visit_count, &snapshot.links);
    let report = StatsReport::new(snapshot.title, stats, config.analytics.ctr_precision);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Load the config file if one was given, then apply overrides and validate.
pub fn load_settings(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

pub fn build_resolver(config: &Config) -> Result<ContextResolver, Box<dyn std::error::Error>> {
    let classifier =
        AgentClassifier::new(&config.context.mobile_keywords, &config.context.bot_keywords)?;
    let clock: Clock = config.context.clock.parse()?;
    debug!(clock = %clock, "built context resolver");
    Ok(ContextResolver::new(
        classifier,
        config.context.unknown_country.clone(),
        clock,
    ))
}

pub fn rank_report(
    snapshot: &HubSnapshot,
    resolver: &ContextResolver,
    facts: &RequestFacts<'_>,
    ctx: &VisitorContext,
) -> RankReport {
    let is_bot = resolver
        .classifier()
        .is_bot(facts.user_agent.unwrap_or(""));
    RankReport {
        context: ContextReport::from(ctx),
        is_bot,
        links: rank_view(&snapshot.links, ctx)
            .into_iter()
            .map(PublicLink::from)
            .collect(),
    }
}

pub fn normalize_snapshot(mut snapshot: HubSnapshot) -> HubSnapshot {
    snapshot.links = snapshot.links.into_iter().map(prepare_for_sync).collect();
    snapshot
}

fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(filter_directives(config))
        .unwrap_or_else(|_| EnvFilter::new(linkhub_core::DEFAULT_LOG_LEVEL));

    // Reports go to stdout, so logs default to stderr
    let writer = match config
        .output
        .as_deref()
        .unwrap_or(linkhub_core::DEFAULT_LOG_OUTPUT)
    {
        "stdout" => BoxMakeWriter::new(io::stdout),
        _ => BoxMakeWriter::new(io::stderr),
    };
    let layer = fmt::layer().with_writer(writer);
    let registry = tracing_subscriber::registry().with(filter);

    match config
        .format
        .as_deref()
        .unwrap_or(linkhub_core::DEFAULT_LOG_FORMAT)
    {
        "json" => registry.with(layer.json()).init(),
        "compact" => registry.with(layer.compact()).init(),
        _ => registry.with(layer).init(),
    }
    debug!(
        version = linkhub_core::VERSION,
        "{} logging initialized",
        linkhub_core::PROJECT_NAME
    );
}

/// Base level followed by per-module `target=level` overrides.
fn filter_directives(config: &LoggingConfig) -> String {
    let base = config
        .level
        .as_deref()
        .unwrap_or(linkhub_core::DEFAULT_LOG_LEVEL);
    let mut modules: Vec<(&String, &String)> = config.filters.iter().collect();
    modules.sort();
    std::iter::once(base.to_string())
        .chain(modules.into_iter().map(|(module, level)| format!("{module}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
