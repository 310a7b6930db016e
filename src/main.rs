use std::path::PathBuf;

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use foxchase::{init_logging, FoxChasePlugin, SceneSettings};

/// A fox chasing taps across the floor while a chicken wanders by
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON file overriding the scene settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Asset path of the fox model
    #[arg(long)]
    fox_model: Option<String>,
    /// Asset path of the chicken model
    #[arg(long)]
    chicken_model: Option<String>,
    /// Seed for the chicken's wander targets
    #[arg(long)]
    seed: Option<u64>,
}

fn resolve_settings(args: &Args) -> Result<SceneSettings> {
    let mut settings = match &args.config {
        Some(path) => SceneSettings::from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => SceneSettings::default(),
    };
    if let Some(model) = &args.fox_model {
        settings.fox.model.clone_from(model);
    }
    if let Some(model) = &args.chicken_model {
        settings.chicken.model.clone_from(model);
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate().context("invalid scene settings")?;
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = resolve_settings(&args)?;

    let exit = App::new()
        .insert_resource(settings)
        .add_plugins(
            DefaultPlugins
                .build()
                .disable::<LogPlugin>()
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "foxchase".to_owned(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(FoxChasePlugin)
        .run();

    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("scene exited with error code {code}"),
    }
}
