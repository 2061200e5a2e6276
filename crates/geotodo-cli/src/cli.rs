//! Subcommand argument structures.
//!
//! Each struct carries the clap attributes for one command and converts into
//! the matching core parameter type with `From`, so the core never sees clap.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Store / Session
//! ```

use clap::{Args, Subcommand, ValueEnum};
use geotodo_core::{
    models::{parse_tags, DateBucket, NotificationPermission, Priority, TodoFilter},
    params::{CreatePlace, CreateTodo, Id},
};

/// Create a new place
#[derive(Args)]
pub struct AddPlaceArgs {
    /// Name of the place
    pub name: String,
    /// Latitude of the place center
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,
    /// Longitude of the place center
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
    /// Street address, shown with the place
    #[arg(long)]
    pub address: Option<String>,
    /// Geofence radius in meters (default 300)
    #[arg(long)]
    pub radius: Option<f64>,
}

impl From<AddPlaceArgs> for CreatePlace {
    fn from(val: AddPlaceArgs) -> Self {
        CreatePlace {
            name: val.name,
            address: val.address,
            lat: val.lat,
            lng: val.lng,
            radius_meters: val.radius,
        }
    }
}

#[derive(Subcommand)]
pub enum PlaceCommands {
    /// Create a new place
    Add(AddPlaceArgs),
    /// List your places
    #[command(alias = "ls")]
    List,
}

/// Create a new todo
#[derive(Args)]
pub struct AddTodoArgs {
    /// Title of the todo
    pub title: String,
    /// Longer description
    #[arg(short, long)]
    pub description: Option<String>,
    /// Kind of errand: buy, call, visit, ...
    #[arg(long)]
    pub action: Option<String>,
    /// When it is due: today, tomorrow, soon, this_week, this_month, eventually
    #[arg(long)]
    pub when: Option<DateBucket>,
    /// Priority from 1 to 5; anything else is clamped
    #[arg(long, allow_hyphen_values = true)]
    pub priority: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    pub tags: Option<String>,
    /// ID of the place to anchor the todo to
    #[arg(long)]
    pub place: Option<String>,
}

impl From<AddTodoArgs> for CreateTodo {
    fn from(val: AddTodoArgs) -> Self {
        CreateTodo {
            title: val.title,
            description: val.description,
            action_type: val.action,
            date_bucket: val.when,
            priority: val
                .priority
                .as_deref()
                .map(|p| i64::from(Priority::parse_lenient(p).value())),
            tags: val.tags.as_deref().map(parse_tags).unwrap_or_default(),
            place_id: val.place,
        }
    }
}

/// List todos
#[derive(Args, Default)]
pub struct ListTodosArgs {
    /// Which todos to show: today, this_week, this_month, all, nearby
    #[arg(long, short, default_value = "today")]
    pub filter: TodoFilter,
}

/// Select a todo by ID
#[derive(Args)]
pub struct IdArgs {
    /// ID of the todo
    pub id: String,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Create a new todo
    Add(AddTodoArgs),
    /// List open todos, highest priority first
    #[command(alias = "ls")]
    List(ListTodosArgs),
    /// Mark a todo done, or open again
    Toggle(IdArgs),
}

/// Check which todos are nearby
#[derive(Args)]
pub struct NearbyArgs {
    /// Print the proximity result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Notification permission choices for the terminal notifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum NotificationsArg {
    /// Not decided; ask on the first nearby alert
    Default,
    Granted,
    Denied,
    /// The terminal cannot show alerts
    Unsupported,
}

impl From<NotificationsArg> for NotificationPermission {
    fn from(val: NotificationsArg) -> Self {
        match val {
            NotificationsArg::Default => NotificationPermission::Default,
            NotificationsArg::Granted => NotificationPermission::Granted,
            NotificationsArg::Denied => NotificationPermission::Denied,
            NotificationsArg::Unsupported => NotificationPermission::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_todo_conversion() {
        let params: CreateTodo = AddTodoArgs {
            title: "Pick up keys".to_string(),
            description: None,
            action: Some("visit".to_string()),
            when: Some(DateBucket::Tomorrow),
            priority: Some("urgent".to_string()),
            tags: Some("home, keys,,home".to_string()),
            place: Some("p1".to_string()),
        }
        .into();

        assert_eq!(params.priority, Some(1));
        assert_eq!(params.tags, vec!["home".to_string(), "keys".to_string()]);
        assert_eq!(params.date_bucket, Some(DateBucket::Tomorrow));
        assert_eq!(params.place_id.as_deref(), Some("p1"));
    }

    #[test]
    fn test_priority_is_clamped() {
        let params: CreateTodo = AddTodoArgs {
            title: "x".to_string(),
            description: None,
            action: None,
            when: None,
            priority: Some("9".to_string()),
            tags: None,
            place: None,
        }
        .into();

        assert_eq!(params.priority, Some(5));
        assert!(params.tags.is_empty());
    }
}
