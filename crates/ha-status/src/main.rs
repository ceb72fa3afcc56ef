//! Status card host
//!
//! Loads a card configuration, the registries from a `.storage/` directory
//! and a live-state dump, then prints what the card would show or emit as
//! JSON.

mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use ha_config::load_card_config;
use ha_core::LiveStates;
use ha_registries::{RegistryStore, StorageSource};
use ha_status_card::{HomeSnapshot, StatusCard, TileTarget, UiState};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::{Cli, Command, GlobalOpts};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose)?;

    let card = StatusCard::new(
        load_card_config(&cli.global.card)
            .with_context(|| format!("loading card {}", cli.global.card.display()))?,
    )?;
    let home = load_home(&cli.global).await?;

    run(&card, &home, cli.command)
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Registries and live state, loaded together
async fn load_home(opts: &GlobalOpts) -> Result<HomeSnapshot> {
    let store = RegistryStore::new();
    let source = StorageSource::new(&opts.config_dir);
    let registry = store
        .refresh(&source)
        .await
        .with_context(|| format!("loading registries from {}", opts.config_dir.display()))?;

    let states = load_states(&opts.states).await?;
    info!(
        entities = registry.entity_count(),
        states = states.len(),
        "Home snapshot loaded"
    );
    Ok(HomeSnapshot::from_shared(registry, Arc::new(states)))
}

async fn load_states(path: &Path) -> Result<LiveStates> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    LiveStates::from_json(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn run(card: &StatusCard, home: &HomeSnapshot, command: Command) -> Result<()> {
    debug!(command = ?command, "Running command");
    let mut ui = UiState::new();

    match command {
        Command::Summary => print_json(&card.summaries(home)),
        Command::Entities => print_json(&card.classify(home).entity_ids_by_domain()),
        Command::DrillDown { category, all } => {
            let TileTarget::Category(category) = TileTarget::parse(&category) else {
                bail!("'{category}' is an entity id, not a category");
            };
            ui.select(category.clone());
            if all {
                ui.toggle_show_all();
            }
            print_json(&card.drill_down(home, &category, &ui))
        }
        Command::Gesture { target, gesture } => {
            let target = TileTarget::parse(&target);
            print_json(&card.handle_gesture(home, &target, gesture.into(), &mut ui))
        }
        Command::Toggle { category } => {
            let TileTarget::Category(category) = TileTarget::parse(&category) else {
                bail!("'{category}' is an entity id, not a category");
            };
            ui.select(category);
            ui.request_bulk_toggle();
            print_json(&card.confirm_bulk_toggle(home, &mut ui))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
