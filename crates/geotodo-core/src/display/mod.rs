//! Markdown display for models, lists and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add list context and operation feedback. Everything
//! renders to markdown for the CLI's terminal renderer.
//!
//! - [`collections`]: [`Places`] and [`TodoList`]
//! - [`results`]: [`CreateResult`] and [`UpdateResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//!
//! ```rust
//! use geotodo_core::display::OperationStatus;
//!
//! let status = OperationStatus::failure("no position".to_string());
//! assert_eq!(status.to_string(), "Error: no position\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Places, TodoEntry, TodoList};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
