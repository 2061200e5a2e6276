//! Core library for GeoTodo, a location-aware todo list.
//!
//! Users keep *places* (named circular geofences) and *todos* (tasks that may
//! be anchored to a place). This crate works out which open todos are near
//! the device and decides when to tell the user about them.
//!
//! # Architecture
//!
//! ```text
//!  GeolocationHost ──▶ LocationWatch ──▶ LocationSample ─┐
//!                          │                             │
//!                          ▼                             ▼
//!                   PermissionTracker ◀── Session ──▶ compute_nearby ──▶ ProximityResult
//!                          ▲                 ▲                                │
//!                          │                 │                                ▼
//!  NotificationHost ◀── NotificationGate     TodoStore (Store: SQLite)   banner / alert
//! ```
//!
//! - [`geo`] and [`proximity`] are pure functions.
//! - [`location`] and [`notify`] wrap the host capabilities declared in
//!   [`host`] and record what they learn about permissions in
//!   [`permissions`].
//! - [`session`] holds one user's loaded data and last position.
//! - [`store`] and [`db`] persist places and todos.
//! - [`display`] renders everything as markdown.
//!
//! # Quick Start
//!
//! ```rust
//! use geotodo_core::{
//!     models::{LocationSample, TodoFilter, User},
//!     params::{CreatePlace, CreateTodo},
//!     permissions::PermissionTracker,
//!     session::Session,
//!     StoreBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("geotodo.db"))
//!     .build()
//!     .await?;
//! let mut session = Session::open(&store, User::new("local"), PermissionTracker::default()).await?;
//!
//! let bakery = session
//!     .add_place(&store, &CreatePlace {
//!         name: "Bakery".to_string(),
//!         address: None,
//!         lat: 52.52,
//!         lng: 13.405,
//!         radius_meters: Some(200.0),
//!     })
//!     .await?;
//! session
//!     .add_todo(&store, &CreateTodo {
//!         title: "Sourdough".to_string(),
//!         place_id: Some(bakery.id.clone()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! session.update_location(LocationSample::now("52.5201,13.4051".parse()?));
//! if let Some(summary) = session.nearby().summary() {
//!     println!("{summary}");
//! }
//! assert_eq!(session.visible_todos(TodoFilter::Nearby).len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod geo;
pub mod host;
pub mod location;
pub mod models;
pub mod notify;
pub mod params;
pub mod permissions;
pub mod proximity;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{CreateResult, OperationStatus, Places, TodoList, UpdateResult};
pub use error::{Capability, GeoTodoError, Result};
pub use geo::distance_meters;
pub use host::{Alert, GeolocationHost, NotificationHost, PositionError, PositionOptions};
pub use location::{LocationConfig, LocationWatch, WatchId, WatchStart};
pub use models::{
    Coordinate, DateBucket, LocationPermission, LocationSample, NotificationPermission,
    PermissionState, Place, Priority, Todo, TodoFilter, User,
};
pub use notify::{GateOutcome, NotificationGate};
pub use params::{CreatePlace, CreateTodo, Id, SetTodoDone};
pub use permissions::PermissionTracker;
pub use proximity::{compute_nearby, NearbySummary, ProximityResult};
pub use session::Session;
pub use store::{Store, StoreBuilder, TodoStore};
