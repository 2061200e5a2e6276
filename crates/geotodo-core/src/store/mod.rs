//! The store contract and its local SQLite implementation.
//!
//! [`TodoStore`] is what a [`Session`](crate::session::Session) loads from and
//! writes through. Loads return full sets; there is no pagination. [`Store`]
//! implements it on a SQLite file, running each operation on the blocking
//! pool with its own connection.
//!
//! ```rust
//! use geotodo_core::{models::User, params::CreatePlace, StoreBuilder, TodoStore};
//!
//! # async fn example() -> geotodo_core::Result<()> {
//! let store = StoreBuilder::new()
//!     .with_database_path(Some("geotodo.db"))
//!     .build()
//!     .await?;
//! let user = User::new("local");
//!
//! store
//!     .create_place(&user, &CreatePlace {
//!         name: "Bakery".to_string(),
//!         address: None,
//!         lat: 52.52,
//!         lng: 13.405,
//!         radius_meters: None,
//!     })
//!     .await?;
//! assert_eq!(store.load_places(&user).await?.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use crate::{
    db::Database,
    error::{GeoTodoError, Result},
    models::{Place, Todo, User},
    params::{CreatePlace, CreateTodo, SetTodoDone},
};

pub mod builder;

pub use builder::StoreBuilder;

/// Persistence for one user's places and todos.
pub trait TodoStore: Send + Sync {
    /// Every place the user owns, in creation order.
    fn load_places(&self, user: &User) -> impl Future<Output = Result<Vec<Place>>> + Send;

    /// Every todo the user owns, done or not, in creation order.
    fn load_todos(&self, user: &User) -> impl Future<Output = Result<Vec<Todo>>> + Send;

    /// Validates and stores a place; the store assigns id and `created_at`.
    fn create_place(
        &self,
        user: &User,
        params: &CreatePlace,
    ) -> impl Future<Output = Result<Place>> + Send;

    /// Validates and stores an open todo; the store assigns id and
    /// `created_at`. A referenced place must exist for the same user.
    fn create_todo(
        &self,
        user: &User,
        params: &CreateTodo,
    ) -> impl Future<Output = Result<Todo>> + Send;

    fn set_todo_done(
        &self,
        user: &User,
        params: &SetTodoDone,
    ) -> impl Future<Output = Result<Todo>> + Send;
}

/// SQLite-backed [`TodoStore`].
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    async fn with_db<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| GeoTodoError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

impl TodoStore for Store {
    async fn load_places(&self, user: &User) -> Result<Vec<Place>> {
        let uid = user.uid.clone();
        self.with_db(move |db| db.list_places(&uid)).await
    }

    async fn load_todos(&self, user: &User) -> Result<Vec<Todo>> {
        let uid = user.uid.clone();
        self.with_db(move |db| db.list_todos(&uid)).await
    }

    async fn create_place(&self, user: &User, params: &CreatePlace) -> Result<Place> {
        let center = params.validate()?;
        let uid = user.uid.clone();
        let name = params.name.trim().to_string();
        let address = params
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from);
        let radius = params.radius_meters;

        let place = self
            .with_db(move |db| db.create_place(&uid, &name, address.as_deref(), center, radius))
            .await?;
        debug!("created place {} ({})", place.id, place.name);
        Ok(place)
    }

    async fn create_todo(&self, user: &User, params: &CreateTodo) -> Result<Todo> {
        let todo = params.validate()?;
        let uid = user.uid.clone();

        let todo = self
            .with_db(move |db| {
                if let Some(place_id) = &todo.place_id {
                    if !db.place_exists(&uid, place_id)? {
                        return Err(GeoTodoError::PlaceNotFound {
                            id: place_id.clone(),
                        });
                    }
                }
                db.create_todo(&uid, &todo)
            })
            .await?;
        debug!("created todo {} ({})", todo.id, todo.title);
        Ok(todo)
    }

    async fn set_todo_done(&self, user: &User, params: &SetTodoDone) -> Result<Todo> {
        let uid = user.uid.clone();
        let id = params.id.clone();
        let done = params.done;

        self.with_db(move |db| db.set_todo_done(&uid, &id, done)).await
    }
}
