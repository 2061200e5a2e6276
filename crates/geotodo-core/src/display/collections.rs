//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper formats its items one after another and prints a fixed
//! message when there is nothing to show.

use std::fmt;

use crate::{
    models::{Place, Todo, TodoFilter},
    session::Session,
};

/// Newtype wrapper for displaying a user's places.
///
/// # Examples
///
/// ```rust
/// use geotodo_core::display::Places;
///
/// let places = Places(vec![]);
/// assert_eq!(places.to_string(), "No places yet.\n");
/// ```
pub struct Places(pub Vec<Place>);

impl fmt::Display for Places {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No places yet.");
        }
        for place in &self.0 {
            write!(f, "{place}")?;
        }
        Ok(())
    }
}

/// One row of a todo list: the todo plus what the list shows around it.
#[derive(Debug, Clone)]
pub struct TodoEntry {
    pub todo: Todo,
    /// Name of the resolved place, if the todo has one
    pub place_name: Option<String>,
    /// Whether the todo is in the current proximity result
    pub nearby: bool,
}

impl fmt::Display for TodoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let todo = &self.todo;
        let marker = if self.nearby { " 📍" } else { "" };

        writeln!(f, "### {}{marker}", todo.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- {} · {} · {} · {}",
            todo.action_type.to_uppercase(),
            todo.date_bucket,
            todo.priority,
            self.place_name.as_deref().unwrap_or("No place")
        )?;
        if !todo.tags.is_empty() {
            writeln!(f, "- Tags: {}", todo.tags.join(", "))?;
        }
        writeln!(f, "- ID: {}", todo.id)?;
        writeln!(f)
    }
}

/// A filtered, ordered todo list ready for display.
pub struct TodoList {
    entries: Vec<TodoEntry>,
    /// Whether the user has any todo at all, used for the empty message
    has_todos: bool,
}

impl TodoList {
    /// Builds the list a session shows for `filter`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geotodo_core::{
    ///     display::TodoList,
    ///     models::{TodoFilter, User},
    ///     permissions::PermissionTracker,
    ///     session::Session,
    /// };
    ///
    /// let session = Session::new(User::new("u1"), PermissionTracker::default());
    /// let list = TodoList::for_session(&session, TodoFilter::Today);
    /// assert_eq!(list.to_string(), "No todos yet.\n");
    /// ```
    pub fn for_session(session: &Session, filter: TodoFilter) -> Self {
        let nearby = session.nearby();
        let entries = session
            .visible_todos(filter)
            .into_iter()
            .map(|todo| TodoEntry {
                place_name: todo
                    .place_id
                    .as_deref()
                    .and_then(|id| session.place(id))
                    .map(|p| p.name.clone()),
                nearby: nearby.is_nearby(&todo.id),
                todo,
            })
            .collect();

        Self {
            entries,
            has_todos: !session.todos().is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TodoEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoEntry;
    type IntoIter = std::slice::Iter<'a, TodoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for TodoList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_todos {
            return writeln!(f, "No todos yet.");
        }
        if self.entries.is_empty() {
            return writeln!(f, "No todos for this filter.");
        }
        for entry in &self.entries {
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        models::{Coordinate, DateBucket, LocationSample, Priority, User},
        permissions::PermissionTracker,
    };

    fn session() -> Session {
        let mut session = Session::new(User::new("u1"), PermissionTracker::default());
        session.set_data(
            vec![Place {
                id: "p1".to_string(),
                name: "Pharmacy".to_string(),
                address: None,
                location: Some(Coordinate::new(0.0, 0.0)),
                radius_meters: 300.0,
                created_at: Timestamp::UNIX_EPOCH,
            }],
            vec![
                Todo {
                    id: "t1".to_string(),
                    title: "Aspirin".to_string(),
                    description: String::new(),
                    action_type: "buy".to_string(),
                    date_bucket: DateBucket::Today,
                    priority: Priority::new(2),
                    tags: vec![],
                    place_id: Some("p1".to_string()),
                    is_done: false,
                    created_at: Timestamp::UNIX_EPOCH,
                },
                Todo {
                    id: "t2".to_string(),
                    title: "Call mom".to_string(),
                    description: String::new(),
                    action_type: "call".to_string(),
                    date_bucket: DateBucket::Soon,
                    priority: Priority::new(5),
                    tags: vec!["family".to_string()],
                    place_id: None,
                    is_done: false,
                    created_at: Timestamp::UNIX_EPOCH,
                },
            ],
        );
        session
    }

    #[test]
    fn test_todo_list_entries() {
        let mut session = session();
        session.update_location(LocationSample::now(Coordinate::new(0.0, 0.0)));

        let list = TodoList::for_session(&session, TodoFilter::ThisWeek);
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().next().map(|e| e.todo.id.as_str()), Some("t2"));

        let output = list.to_string();
        assert!(output.contains("- CALL · Soon · P5 · No place"));
        assert!(output.contains("- Tags: family"));
        assert!(output.contains("### Aspirin 📍"));
        assert!(output.contains("- BUY · Today · P2 · Pharmacy"));
    }

    #[test]
    fn test_todo_list_empty_messages() {
        let session = session();
        let list = TodoList::for_session(&session, TodoFilter::Nearby);
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "No todos for this filter.\n");

        let places = Places(session.places().to_vec());
        assert_eq!(places.0.len(), 1);
        assert!(places.to_string().contains("Pharmacy"));
    }
}
