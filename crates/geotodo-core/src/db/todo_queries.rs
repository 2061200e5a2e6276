//! Todo queries.

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use super::place_queries::parse_timestamp;
use crate::{
    error::{DatabaseResultExt, GeoTodoError, Result},
    models::{DateBucket, Priority, Todo},
    params::NewTodo,
};

const INSERT_TODO_SQL: &str = "INSERT INTO todos (id, user_id, title, description, action_type, date_bucket, priority, tags, place_id, is_done, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10)";
const TODO_COLUMNS: &str =
    "id, title, description, action_type, date_bucket, priority, tags, place_id, is_done, created_at";
const UPDATE_TODO_DONE_SQL: &str = "UPDATE todos SET is_done = ?1 WHERE id = ?2 AND user_id = ?3";

impl super::Database {
    /// Inserts an open todo owned by `user_id` and returns it as stored.
    pub fn create_todo(&mut self, user_id: &str, todo: &NewTodo) -> Result<Todo> {
        let id = Uuid::new_v4().to_string();
        let now = Timestamp::now();
        let tags = serde_json::to_string(&todo.tags)?;

        self.connection
            .execute(
                INSERT_TODO_SQL,
                params![
                    &id,
                    user_id,
                    &todo.title,
                    &todo.description,
                    &todo.action_type,
                    todo.date_bucket.as_str(),
                    i64::from(todo.priority.value()),
                    tags,
                    todo.place_id.as_deref(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert todo")?;

        Ok(Todo {
            id,
            title: todo.title.clone(),
            description: todo.description.clone(),
            action_type: todo.action_type.clone(),
            date_bucket: todo.date_bucket,
            priority: todo.priority,
            tags: todo.tags.clone(),
            place_id: todo.place_id.clone(),
            is_done: false,
            created_at: now,
        })
    }

    /// Every todo owned by `user_id`, in insertion order.
    pub fn list_todos(&self, user_id: &str) -> Result<Vec<Todo>> {
        let query = format!("SELECT {TODO_COLUMNS} FROM todos WHERE user_id = ?1 ORDER BY rowid");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let todos = stmt
            .query_map(params![user_id], todo_from_row)
            .db_context("Failed to query todos")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read todo row")?;

        Ok(todos)
    }

    pub fn get_todo(&self, user_id: &str, todo_id: &str) -> Result<Option<Todo>> {
        let query =
            format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1 AND user_id = ?2");
        self.connection
            .query_row(&query, params![todo_id, user_id], todo_from_row)
            .optional()
            .db_context("Failed to query todo")
    }

    /// Marks a todo done or open and returns the updated row.
    pub fn set_todo_done(&mut self, user_id: &str, todo_id: &str, done: bool) -> Result<Todo> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let changed = tx
            .execute(UPDATE_TODO_DONE_SQL, params![done, todo_id, user_id])
            .db_context("Failed to update todo")?;
        if changed == 0 {
            return Err(GeoTodoError::TodoNotFound {
                id: todo_id.to_string(),
            });
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_todo(user_id, todo_id)?
            .ok_or_else(|| GeoTodoError::TodoNotFound {
                id: todo_id.to_string(),
            })
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let id: String = row.get(0)?;

    let bucket: Option<String> = row.get(4)?;
    let date_bucket = bucket
        .and_then(|b| b.parse::<DateBucket>().ok())
        .unwrap_or_default();

    let priority: Option<i64> = row.get(5)?;

    let tags: String = row.get(6)?;
    let tags = serde_json::from_str::<Vec<String>>(&tags).unwrap_or_else(|e| {
        warn!("todo {id} has unreadable tags: {e}");
        Vec::new()
    });

    Ok(Todo {
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        action_type: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        date_bucket,
        priority: priority.map(Priority::new).unwrap_or_default(),
        tags,
        place_id: row.get(7)?,
        is_done: row.get(8)?,
        created_at: parse_timestamp(row, 9)?,
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::super::Database;
    use crate::{
        error::GeoTodoError,
        models::{Coordinate, DateBucket, Priority},
        params::CreateTodo,
    };

    fn new_todo(title: &str, place_id: Option<&str>) -> crate::params::NewTodo {
        CreateTodo {
            title: title.to_string(),
            place_id: place_id.map(String::from),
            tags: vec!["a".to_string(), "b".to_string()],
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_round_trip_keeps_insertion_order() {
        let mut db = Database::in_memory().unwrap();
        let place = db
            .create_place("u1", "Shop", None, Coordinate::new(1.0, 2.0), Some(150.0))
            .unwrap();

        let first = db.create_todo("u1", &new_todo("First", Some(&place.id))).unwrap();
        let second = db.create_todo("u1", &new_todo("Second", None)).unwrap();

        let todos = db.list_todos("u1").unwrap();
        assert_eq!(todos, vec![first, second]);
        assert_eq!(todos[0].tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(todos[0].place_id.as_deref(), Some(place.id.as_str()));

        let places = db.list_places("u1").unwrap();
        assert_eq!(places, vec![place]);
    }

    #[test]
    fn test_rows_are_scoped_by_user() {
        let mut db = Database::in_memory().unwrap();
        db.create_place("u1", "Mine", None, Coordinate::new(0.0, 0.0), None)
            .unwrap();
        let todo = db.create_todo("u1", &new_todo("Mine", None)).unwrap();

        assert!(db.list_places("u2").unwrap().is_empty());
        assert!(db.list_todos("u2").unwrap().is_empty());
        assert!(db.get_todo("u2", &todo.id).unwrap().is_none());

        let err = db.set_todo_done("u2", &todo.id, true).unwrap_err();
        assert!(matches!(err, GeoTodoError::TodoNotFound { .. }));
    }

    #[test]
    fn test_set_todo_done_toggles() {
        let mut db = Database::in_memory().unwrap();
        let todo = db.create_todo("u1", &new_todo("Toggle me", None)).unwrap();

        assert!(db.set_todo_done("u1", &todo.id, true).unwrap().is_done);
        assert!(!db.set_todo_done("u1", &todo.id, false).unwrap().is_done);
    }

    #[test]
    fn test_unusable_stored_values_are_sanitized() {
        let db = Database::in_memory().unwrap();
        db.connection
            .execute_batch(
                "INSERT INTO places (id, user_id, name, lat, lng, radius_meters, created_at)
                     VALUES ('p1', 'u1', 'Odd', NULL, 5.0, -1, '2024-01-01T00:00:00Z');
                 INSERT INTO todos (id, user_id, title, date_bucket, priority, tags, created_at)
                     VALUES ('t1', 'u1', 'Odd', 'someday', 42, 'not json', '2024-01-01T00:00:00Z');",
            )
            .unwrap();

        let place = &db.list_places("u1").unwrap()[0];
        assert_eq!(place.location, None);
        assert_eq!(place.radius_meters, 300.0);

        let todo = &db.list_todos("u1").unwrap()[0];
        assert_eq!(todo.date_bucket, DateBucket::Eventually);
        assert_eq!(todo.priority, Priority::MAX);
        assert!(todo.tags.is_empty());
    }

    #[test]
    fn test_schema_version_recorded() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), super::super::migrations::SCHEMA_VERSION);
    }
}
