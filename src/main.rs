use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

use update_digest::config::{ReportConfig, LOG_LEVEL_ENV};
use update_digest::loader::load_updates;
use update_digest::{FilterRegistry, ReportRenderer};

/// Render category digests from update data
#[derive(Parser)]
#[command(name = "update-digest", version)]
#[command(about = "Group updates by category and render a text digest", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a digest of the given categories
    Render {
        /// Updates file (YAML or JSON mapping of update id to record)
        #[arg(short, long)]
        updates: PathBuf,

        /// Category to include; repeat for several (overrides config and environment)
        #[arg(short = 'C', long = "category")]
        categories: Vec<String>,

        /// Path to TOML configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,

        /// Custom Tera template
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Write the digest to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the registered template filters
    Filters,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "warn".to_string()),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!("update-digest started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Render {
            updates,
            categories,
            config,
            template,
            output,
        } => run_render(updates, categories, config, template, output),
        Commands::Filters => {
            for name in FilterRegistry::new().names() {
                println!("{name}");
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run_render(
    updates_path: PathBuf,
    categories: Vec<String>,
    config_path: Option<PathBuf>,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => ReportConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReportConfig::default(),
    };
    config.merge_env_vars();

    if !categories.is_empty() {
        config.categories = categories;
    }
    if template.is_some() {
        config.template = template;
    }
    config.validate()?;

    let updates = load_updates(&updates_path)
        .with_context(|| format!("Failed to load updates {}", updates_path.display()))?;

    let renderer = match &config.template {
        Some(path) => ReportRenderer::from_template_file(path)
            .with_context(|| format!("Failed to load template {}", path.display()))?,
        None => ReportRenderer::new()?,
    };

    let report = renderer.render(&config.categories, &updates, &config.separator)?;

    match output {
        Some(path) => {
            fs::write(&path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!("Wrote digest to {}", path.display());
        }
        None => print!("{report}"),
    }

    Ok(())
}
