//! Data models for places, todos and the device position.
//!
//! These are plain values: the store produces places and todos, the location
//! watch produces [`LocationSample`]s, and the proximity engine reads all
//! three. Display implementations live in [`crate::display::models`] so the
//! data structures stay free of presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use geotodo_core::models::{Coordinate, Place, DEFAULT_RADIUS_METERS};
//! use jiff::Timestamp;
//!
//! let place = Place {
//!     id: "p1".to_string(),
//!     name: "Grocery".to_string(),
//!     address: None,
//!     location: Some(Coordinate::new(52.52, 13.405)),
//!     radius_meters: -4.0,
//!     created_at: Timestamp::UNIX_EPOCH,
//! };
//!
//! // Unusable radii fall back to the default
//! assert_eq!(place.radius(), DEFAULT_RADIUS_METERS);
//! ```

pub mod coordinate;
pub mod filters;
pub mod place;
pub mod status;
pub mod todo;
pub mod user;


pub use coordinate::{Coordinate, LocationSample};
pub use filters::TodoFilter;
pub use place::{effective_radius, Place, DEFAULT_RADIUS_METERS};
pub use status::{DateBucket, LocationPermission, NotificationPermission, PermissionState};
pub use todo::{parse_tags, Priority, Todo, DEFAULT_ACTION_TYPE};
pub use user::User;
