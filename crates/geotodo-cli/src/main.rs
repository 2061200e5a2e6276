//! GeoTodo CLI Application
//!
//! Command-line client for the location-aware todo list.

mod app;
mod args;
mod cli;
mod hosts;
mod renderer;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use app::App;
use args::{Args, Commands};
use clap::Parser;
use geotodo_core::{models::User, StoreBuilder};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        notifications,
        at,
        command,
    } = Args::parse();

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize store")?;

    let renderer = TerminalRenderer::new(!no_color && std::io::stdout().is_terminal());

    let mut app = App::open(store, User::new(user), renderer, at, notifications.into())
        .await
        .context("Failed to load places and todos")?;

    info!("GeoTodo started");

    match command {
        Some(Place { command }) => app.handle_place_command(command).await,
        Some(Todo { command }) => app.handle_todo_command(command).await,
        Some(Nearby(args)) => app.nearby(args).await,
        Some(Watch) => app.watch().await,
        Some(Status) => app.status(),
        None => app.handle_todo_command(Commands::default_listing()).await,
    }
}
