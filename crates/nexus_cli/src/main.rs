//! NEXUS motion CLI
//!
//! Runs the page motion layer headless:
//! - `simulate`: play a JSON scenario and print frames as JSON
//! - `config`: print the default motion.toml or content table
//! - `check`: validate a configuration/content pair and list targets

mod scenario;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nexus_motion::{ContentTable, MotionConfig, PageSession};
use scenario::{Scenario, ScenarioRunner};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nexus")]
#[command(about = "Headless runner for the NEXUS page motion layer")]
#[command(version)]
struct Cli {
    /// Log component transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a scenario against a headless page session
    Simulate {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Motion configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Content table (JSON)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Also record every n-th frame
        #[arg(long)]
        every: Option<u32>,

        /// Pretty-print frames
        #[arg(long)]
        pretty: bool,
    },

    /// Print the default configuration
    Config {
        /// Print the default content table instead
        #[arg(long)]
        content: bool,
    },

    /// Validate configuration and content
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long)]
        content: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Simulate {
            scenario,
            config,
            content,
            every,
            pretty,
        } => cmd_simulate(&scenario, config.as_deref(), content.as_deref(), every, pretty),
        Commands::Config { content } => cmd_config(content),
        Commands::Check { config, content } => cmd_check(config.as_deref(), content.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<MotionConfig> {
    match path {
        Some(path) => MotionConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(MotionConfig::default()),
    }
}

fn load_content(path: Option<&Path>) -> Result<ContentTable> {
    match path {
        Some(path) => ContentTable::from_path(path)
            .with_context(|| format!("Failed to load content {}", path.display())),
        None => Ok(ContentTable::default()),
    }
}

fn cmd_simulate(
    scenario_path: &Path,
    config: Option<&Path>,
    content: Option<&Path>,
    every: Option<u32>,
    pretty: bool,
) -> Result<()> {
    let scenario = Scenario::from_path(scenario_path)?;
    let mut session = PageSession::mount(load_config(config)?, load_content(content)?)
        .context("Failed to mount page session")?;

    tracing::info!(steps = scenario.steps.len(), "running scenario");
    let frames = ScenarioRunner::new(every).run(&mut session, &scenario)?;
    session.unmount();

    for frame in &frames {
        let line = if pretty {
            serde_json::to_string_pretty(frame)?
        } else {
            serde_json::to_string(frame)?
        };
        println!("{line}");
    }
    Ok(())
}

fn cmd_config(content: bool) -> Result<()> {
    let text = if content {
        serde_json::to_string_pretty(&ContentTable::default())?
    } else {
        toml::to_string_pretty(&MotionConfig::default())
            .context("Failed to serialize default config")?
    };
    println!("{text}");
    Ok(())
}

fn cmd_check(config: Option<&Path>, content: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let content = load_content(content)?;
    let session = PageSession::mount(config, content).context("Failed to mount page session")?;

    println!("ok: {} targets", session.targets().len());
    for (id, name) in session.targets() {
        let reveal = if session.reveal(name).is_some() {
            " (reveal)"
        } else {
            ""
        };
        println!("  {id:>3}  {name}{reveal}");
    }
    println!("menu entries: {}", session.overlay().item_count());
    println!(
        "marquee: {} phrases x {} copies",
        session.marquee().phrases().len(),
        session.marquee().copies()
    );
    Ok(())
}
