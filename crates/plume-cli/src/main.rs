//! Plume - plugin resolution from artifact repositories
//!
//! Usage:
//!   plume resolve com.example.foo --version 1.0
//!   plume resolve com.example.foo --module g:n:1.0
//!   plume repos

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plume_core::config::{default_config_path, parse_plume_toml};
use plume_core::prelude::*;

#[derive(Parser)]
#[command(name = "plume")]
#[command(about = "Resolve plugins against artifact repositories", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ~/.config/plume/plume.toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a plugin request
    Resolve(ResolveArgs),

    /// List the repositories a resolution would consult
    Repos {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct ResolveArgs {
    /// Plugin id, e.g. com.example.hello
    id: String,

    /// Plugin version
    #[arg(long, short = 'V')]
    version: Option<String>,

    /// Explicit implementation module: group:name[:version]
    #[arg(long, short)]
    module: Option<String>,

    /// Version grammar (default, semver); overrides the configured scheme
    #[arg(long)]
    scheme: Option<SchemeKind>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// No output (non-zero exit if not found)
    Quiet,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plume=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Resolve(args) => {
            let found = run_resolve(config, args)?;
            if !found {
                std::process::exit(1);
            }
        }
        Commands::Repos { format } => run_repos(config, format)?,
    }

    Ok(())
}

/// Load the explicit config file, or the default one if it exists
fn load_config(path: Option<PathBuf>) -> Result<PlumeConfig> {
    match path {
        Some(path) => parse_plume_toml(&path),
        None => load_optional_config(&default_config_path()?),
    }
}

/// Parse `path` if present, otherwise fall back to an empty configuration
fn load_optional_config(path: &Path) -> Result<PlumeConfig> {
    if path.exists() {
        tracing::debug!("Using config file {}", path.display());
        parse_plume_toml(path)
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Ok(PlumeConfig::new())
    }
}

fn build_request(args: &ResolveArgs) -> Result<PluginRequest> {
    let id = PluginId::new(args.id.as_str())?;
    let mut request = PluginRequest::new(id);
    if let Some(version) = &args.version {
        request = request.with_version(version.as_str());
    }
    if let Some(module) = &args.module {
        let selector: ModuleSelector = module
            .parse()
            .with_context(|| format!("Invalid --module value '{}'", module))?;
        request = request.with_module(selector);
    }
    Ok(request)
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut PlumeConfig, args: &ResolveArgs) {
    if let Some(scheme) = args.scheme {
        config.resolver.scheme = scheme;
    }
}

fn run_resolve(mut config: PlumeConfig, args: ResolveArgs) -> Result<bool> {
    apply_overrides(&mut config, &args);

    let request = build_request(&args)?;
    let resolver = config.build_resolver()?;
    let outcome = resolver.resolve(&request)?;

    match args.format {
        OutputFormat::Table => {
            let mut report = TableReport::default();
            outcome.report_to(&mut report);
            for line in report.lines {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let mut classpath = ClasspathContext::new();
            if let Some(resolution) = outcome.resolution() {
                resolution.apply(&mut classpath);
            }
            let output = serde_json::json!({
                "request": request.to_string(),
                "outcome": outcome,
                "classpath": classpath.classpath(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }

    Ok(outcome.is_found())
}

/// Collects table lines as results are reported
#[derive(Default)]
struct TableReport {
    lines: Vec<String>,
    header_printed: bool,
}

impl PluginResolutionResult for TableReport {
    fn found(&mut self, source_label: &str, resolution: &PluginResolution) {
        let mut classpath = ClasspathContext::new();
        resolution.apply(&mut classpath);

        self.lines.push(format!(
            "Plugin '{}' found in {}",
            resolution.plugin_id(),
            source_label
        ));
        for entry in classpath.classpath() {
            self.lines.push(format!("  classpath: {}", entry));
        }
    }

    fn not_found(&mut self, repository: &str, reason: &str) {
        if !self.header_printed {
            self.lines
                .push("Plugin not found. Searched in the following repositories:".to_string());
            self.header_printed = true;
        }
        self.lines.push(format!("  {:<36} {}", repository, reason));
    }
}

fn run_repos(config: PlumeConfig, format: OutputFormat) -> Result<()> {
    let resolver = config.build_resolver()?;
    let repositories = resolver.service().repositories();

    match format {
        OutputFormat::Table => {
            if repositories.is_empty() {
                println!("No repositories configured");
                return Ok(());
            }
            println!("{:<36} URL", "NAME");
            for repository in repositories {
                println!("{:<36} {}", repository.name, repository.url);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(repositories)?);
        }
        OutputFormat::Quiet => {}
    }

    Ok(())
}
