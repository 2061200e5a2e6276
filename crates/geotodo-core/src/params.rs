//! Parameter structures for GeoTodo operations.
//!
//! These are interface-independent inputs to the store. The CLI wraps them in
//! clap-derived argument structs and converts with `.into()`, so the core
//! stays free of presentation framework derives.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   TodoStore     │
//! │  (clap derives) │───▶│ (serde derives) │───▶│  (validation)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{GeoTodoError, Result},
    models::{parse_tags, Coordinate, DateBucket, Priority, DEFAULT_ACTION_TYPE},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: String,
}

/// Parameters for creating a new place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlace {
    /// Display name of the place
    pub name: String,
    /// Optional street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude of the geofence center
    pub lat: f64,
    /// Longitude of the geofence center
    pub lng: f64,
    /// Geofence radius in meters; unusable values fall back to 300
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_meters: Option<f64>,
}

impl CreatePlace {
    /// Checks the name and coordinate, returning the validated center.
    ///
    /// # Errors
    ///
    /// * `GeoTodoError::InvalidInput` - When the name is blank
    /// * `GeoTodoError::InvalidInput` - When either coordinate is out of range
    pub fn validate(&self) -> Result<Coordinate> {
        if self.name.trim().is_empty() {
            return Err(GeoTodoError::invalid_input("name").with_reason("Place name is required"));
        }
        Coordinate::validated(self.lat, self.lng)
    }
}

/// Parameters for creating a new todo.
///
/// Every field but the title is optional; the store fills in the defaults
/// used by the new-todo form: action `buy`, bucket `this_week`, priority 3.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Title of the todo
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Kind of errand (buy, call, visit, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_bucket: Option<DateBucket>,
    /// Any integer; clamped into 1..=5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Place to anchor the todo to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
}

/// A todo ready for insertion, with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub action_type: String,
    pub date_bucket: DateBucket,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub place_id: Option<String>,
}

impl CreateTodo {
    /// Validates the title and applies defaults.
    ///
    /// Blank optional strings count as absent. Tags are trimmed and
    /// de-duplicated.
    ///
    /// # Errors
    ///
    /// * `GeoTodoError::InvalidInput` - When the title is blank
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geotodo_core::{models::DateBucket, params::CreateTodo};
    ///
    /// let params = CreateTodo {
    ///     title: "  Milk ".to_string(),
    ///     priority: Some(9),
    ///     tags: vec!["dairy".to_string(), " dairy".to_string()],
    ///     ..Default::default()
    /// };
    /// let todo = params.validate()?;
    /// assert_eq!(todo.title, "Milk");
    /// assert_eq!(todo.action_type, "buy");
    /// assert_eq!(todo.date_bucket, DateBucket::ThisWeek);
    /// assert_eq!(todo.priority.value(), 5);
    /// assert_eq!(todo.tags, vec!["dairy".to_string()]);
    /// # geotodo_core::Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<NewTodo> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(GeoTodoError::invalid_input("title").with_reason("Title is required"));
        }

        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Ok(NewTodo {
            title: title.to_string(),
            description: non_blank(&self.description).unwrap_or_default(),
            action_type: non_blank(&self.action_type)
                .unwrap_or_else(|| DEFAULT_ACTION_TYPE.to_string()),
            date_bucket: self.date_bucket.unwrap_or(DateBucket::ThisWeek),
            priority: self.priority.map(Priority::new).unwrap_or_default(),
            tags: parse_tags(&self.tags.join(",")),
            place_id: non_blank(&self.place_id),
        })
    }
}

/// Parameters for marking a todo done or open again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTodoDone {
    pub id: String,
    pub done: bool,
}
