//! CuteTween CLI
//!
//! Lists the preset catalog and plays presets headlessly against a
//! simulated transform, logging property values as time advances.
//!
//! ```text
//! cutetween list
//! cutetween play bounce --seconds 2
//! cutetween play button_pop --config animations.toml
//! cutetween catalog animations.toml
//! ```

mod config;
mod player;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{CatalogConfig, PlayerConfig};
use cute_tween_presets::PresetRegistry;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Preview CuteTween presets from the command line
#[derive(Parser, Debug)]
#[command(name = "cutetween")]
#[command(about = "Play CuteTween animation presets headlessly")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List built-in presets
    List,

    /// Play one preset (or a named catalog entry) until it finishes
    Play {
        /// Preset name (e.g. "paper_drop") or animation name from --config
        preset: String,

        /// Stop after this many seconds
        #[arg(long)]
        seconds: Option<f32>,

        /// Simulated frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Seed for randomized presets
        #[arg(long)]
        seed: Option<u64>,

        /// Catalog file with [player] settings and [[animations]]
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Simulate a target without an opacity channel
        #[arg(long)]
        no_opacity: bool,

        /// Override the preset duration
        #[arg(short, long)]
        duration: Option<f32>,
    },

    /// Play every animation in a catalog file
    Catalog {
        /// Catalog file
        file: PathBuf,
    },

    /// Write a catalog with every built-in preset at its defaults
    Init {
        /// Output file (prints to stdout when omitted)
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::List => cmd_list(),
        Commands::Play {
            preset,
            seconds,
            fps,
            seed,
            config,
            no_opacity,
            duration,
        } => {
            let catalog = match config {
                Some(path) => CatalogConfig::load(&path)?,
                None => CatalogConfig::default(),
            };

            let mut settings = catalog.player.clone();
            if let Some(seconds) = seconds {
                settings.seconds = seconds;
            }
            if let Some(fps) = fps {
                anyhow::ensure!(fps > 0, "--fps must be at least 1");
                settings.fps = fps;
            }
            if seed.is_some() {
                settings.seed = seed;
            }

            cmd_play(&catalog, &settings, &preset, !no_opacity, duration)
        }
        Commands::Catalog { file } => cmd_catalog(&CatalogConfig::load(&file)?),
        Commands::Init { output } => cmd_init(output),
    }
}

fn cmd_list() -> Result<()> {
    let registry = PresetRegistry::builtin();
    for id in registry.list_ids() {
        let preset = registry.create(id)?;
        println!(
            "{:<16} {:>5.2}s  {}",
            id.as_str(),
            preset.duration(),
            id.description()
        );
    }
    Ok(())
}

fn cmd_play(
    catalog: &CatalogConfig,
    settings: &PlayerConfig,
    name: &str,
    opacity: bool,
    duration: Option<f32>,
) -> Result<()> {
    let (mut preset, opacity) = match catalog.animation(name) {
        Some(entry) => (entry.preset.clone(), entry.opacity && opacity),
        None => (PresetRegistry::builtin().create_named(name)?, opacity),
    };
    if let Some(duration) = duration {
        anyhow::ensure!(duration >= 0.0, "--duration must not be negative");
        preset.set_duration(duration);
    }

    let report = player::play(name, &mut preset, settings, opacity)?;
    print_report(&report);
    Ok(())
}

fn cmd_catalog(catalog: &CatalogConfig) -> Result<()> {
    info!(animations = catalog.animations.len(), "playing catalog");
    for entry in &catalog.animations {
        let mut preset = entry.preset.clone();
        let report = player::play(&entry.name, &mut preset, &catalog.player, entry.opacity)?;
        print_report(&report);
    }
    Ok(())
}

fn cmd_init(output: Option<PathBuf>) -> Result<()> {
    let content = CatalogConfig::builtin()?.to_toml()?;
    match output {
        Some(path) => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote catalog");
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn print_report(report: &player::Report) {
    let t = report.transform;
    println!(
        "{}: {} frames ({:.3}s), {}",
        report.name,
        report.frames,
        report.seconds,
        if report.completed {
            "completed"
        } else {
            "still running"
        }
    );
    println!("  position {}", t.position);
    println!("  rotation {}", t.rotation);
    println!("  scale    {}", t.scale);
    match t.opacity {
        Some(opacity) => println!("  opacity  {opacity:.3}"),
        None => println!("  opacity  -"),
    }
}
