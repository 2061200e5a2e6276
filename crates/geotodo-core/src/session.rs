//! Per-user session state.
//!
//! A [`Session`] holds everything the presentation layer reads: the signed-in
//! user, the places and todos loaded for them, the last known location and
//! the shared [`PermissionTracker`]. Proximity is derived on demand from that
//! state, so a new sample or a reload is always reflected by the next
//! [`Session::nearby`] call. Dropping the session ends it.

use log::debug;

use crate::{
    error::{GeoTodoError, Result},
    models::{LocationSample, Place, PermissionState, Todo, TodoFilter, User},
    params::{CreatePlace, CreateTodo, SetTodoDone},
    permissions::PermissionTracker,
    proximity::{compute_nearby, ProximityResult},
    store::TodoStore,
};

pub struct Session {
    user: User,
    places: Vec<Place>,
    todos: Vec<Todo>,
    last_location: Option<LocationSample>,
    permissions: PermissionTracker,
}

impl Session {
    pub fn new(user: User, permissions: PermissionTracker) -> Self {
        Self {
            user,
            places: Vec::new(),
            todos: Vec::new(),
            last_location: None,
            permissions,
        }
    }

    /// Creates a session and loads the user's data from `store`.
    pub async fn open<S: TodoStore>(
        store: &S,
        user: User,
        permissions: PermissionTracker,
    ) -> Result<Self> {
        let mut session = Self::new(user, permissions);
        session.refresh(store).await?;
        Ok(session)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn permissions(&self) -> &PermissionTracker {
        &self.permissions
    }

    pub fn permission_state(&self) -> PermissionState {
        self.permissions.snapshot()
    }

    /// Reloads places and todos, replacing what was loaded before.
    pub async fn refresh<S: TodoStore>(&mut self, store: &S) -> Result<()> {
        let (places, todos) =
            tokio::try_join!(store.load_places(&self.user), store.load_todos(&self.user))?;
        debug!(
            "loaded {} place(s) and {} todo(s) for {}",
            places.len(),
            todos.len(),
            self.user.uid
        );
        self.set_data(places, todos);
        Ok(())
    }

    /// Replaces the loaded data wholesale.
    pub fn set_data(&mut self, places: Vec<Place>, todos: Vec<Todo>) {
        self.places = places;
        self.todos = todos;
    }

    /// Records a new device position. The newest sample always wins.
    pub fn update_location(&mut self, sample: LocationSample) {
        self.last_location = Some(sample);
    }

    pub fn last_location(&self) -> Option<&LocationSample> {
        self.last_location.as_ref()
    }

    /// Proximity for the current sample and data.
    pub fn nearby(&self) -> ProximityResult {
        compute_nearby(self.last_location.as_ref(), &self.places, &self.todos)
    }

    /// Open todos for a list view, highest priority first.
    ///
    /// Ties keep store order. For [`TodoFilter::Nearby`] the candidates are
    /// the todos of the current proximity result.
    pub fn visible_todos(&self, filter: TodoFilter) -> Vec<Todo> {
        let mut visible: Vec<Todo> = match filter {
            TodoFilter::Nearby => self.nearby().todos().cloned().collect(),
            _ => self
                .todos
                .iter()
                .filter(|t| !t.is_done && filter.includes(t.date_bucket))
                .cloned()
                .collect(),
        };
        visible.sort_by(|a, b| b.priority.cmp(&a.priority));
        visible
    }

    /// Looks up a loaded place; the first one wins when ids repeat.
    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn todo(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Stores a new place and adds it to the loaded set.
    pub async fn add_place<S: TodoStore>(&mut self, store: &S, params: &CreatePlace) -> Result<Place> {
        let place = store.create_place(&self.user, params).await?;
        self.places.push(place.clone());
        Ok(place)
    }

    /// Stores a new todo and adds it to the loaded set.
    pub async fn add_todo<S: TodoStore>(&mut self, store: &S, params: &CreateTodo) -> Result<Todo> {
        let todo = store.create_todo(&self.user, params).await?;
        self.todos.push(todo.clone());
        Ok(todo)
    }

    /// Flips a loaded todo between done and open.
    ///
    /// # Errors
    ///
    /// `TodoNotFound` when no loaded todo has this id.
    pub async fn toggle_todo<S: TodoStore>(&mut self, store: &S, id: &str) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| GeoTodoError::TodoNotFound { id: id.to_string() })?;

        let params = SetTodoDone {
            id: id.to_string(),
            done: !self.todos[index].is_done,
        };
        let updated = store.set_todo_done(&self.user, &params).await?;
        self.todos[index] = updated.clone();
        Ok(updated)
    }
}
