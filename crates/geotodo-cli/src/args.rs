use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geotodo_core::models::Coordinate;

use crate::cli::{ListTodosArgs, NearbyArgs, NotificationsArg, PlaceCommands, TodoCommands};

/// Location-aware todo list
///
/// GeoTodo keeps places (named circular geofences) and todos that may be
/// anchored to a place, and tells you which todos need attention where you
/// are right now.
#[derive(Parser)]
#[command(version, about, name = "geotodo")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/geotodo/geotodo.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose places and todos are used
    #[arg(long, global = true, default_value = "local")]
    pub user: String,

    /// Notification permission the terminal starts with
    #[arg(long, global = true, value_enum, default_value_t = NotificationsArg::Default)]
    pub notifications: NotificationsArg,

    /// Current position as "lat,lng", used by nearby checks
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub at: Option<Coordinate>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the GeoTodo CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage places
    #[command(alias = "p")]
    Place {
        #[command(subcommand)]
        command: PlaceCommands,
    },
    /// Manage todos
    #[command(alias = "t")]
    Todo {
        #[command(subcommand)]
        command: TodoCommands,
    },
    /// Check once which todos are near the current position
    #[command(alias = "n")]
    Nearby(NearbyArgs),
    /// Follow positions read from stdin, one "lat,lng" per line
    Watch,
    /// Show the user and permission states
    Status,
}

impl Commands {
    /// Command run when none is given.
    pub fn default_listing() -> TodoCommands {
        TodoCommands::List(ListTodosArgs::default())
    }
}
