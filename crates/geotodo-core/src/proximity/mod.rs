//! The proximity engine: which open todos are anchored to a place that
//! currently contains the device.
//!
//! [`compute_nearby`] is a pure function. It is recomputed from scratch on
//! every new location sample or data load; nothing here is cached or patched
//! incrementally, and identical inputs always give an identical
//! [`ProximityResult`].
//!
//! ```text
//! LocationSample ─┐
//! [Place]        ─┼─▶ compute_nearby ─▶ ProximityResult ─▶ summary() ─▶ banner / alert
//! [Todo]         ─┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use geotodo_core::models::{Coordinate, DateBucket, LocationSample, Place, Priority, Todo};
//! use geotodo_core::proximity::compute_nearby;
//! use jiff::Timestamp;
//!
//! let place = Place {
//!     id: "p1".to_string(),
//!     name: "Bakery".to_string(),
//!     address: None,
//!     location: Some(Coordinate::new(0.0, 0.0)),
//!     radius_meters: 300.0,
//!     created_at: Timestamp::UNIX_EPOCH,
//! };
//! let todo = Todo {
//!     id: "t1".to_string(),
//!     title: "Bread".to_string(),
//!     description: String::new(),
//!     action_type: "buy".to_string(),
//!     date_bucket: DateBucket::Today,
//!     priority: Priority::default(),
//!     tags: vec![],
//!     place_id: Some("p1".to_string()),
//!     is_done: false,
//!     created_at: Timestamp::UNIX_EPOCH,
//! };
//! let sample = LocationSample::now(Coordinate::new(0.0, 0.0));
//!
//! let result = compute_nearby(Some(&sample), &[place], &[todo]);
//! assert!(result.is_nearby("t1"));
//! assert_eq!(result.summary().map(|s| s.count), Some(1));
//! ```

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
    geo::distance_meters,
    models::{LocationSample, Place, Todo},
};


/// One open todo whose place contains the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProximityMatch {
    pub todo: Todo,
    pub place: Place,
    /// Distance from the device to the place center, rounded to whole meters
    pub distance_meters: f64,
}

/// Outcome of one proximity computation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProximityResult {
    /// Matches in todo iteration order, not sorted by distance
    pub matches: Vec<ProximityMatch>,
    /// Ids of every matched todo
    pub nearby_todo_ids: BTreeSet<String>,
}

/// What the nearby banner and alert report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbySummary {
    /// Place of the first match
    pub place: Place,
    /// Number of matches
    pub count: usize,
}

impl ProximityResult {
    /// An empty result: nothing nearby, no banner.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_nearby(&self, todo_id: &str) -> bool {
        self.nearby_todo_ids.contains(todo_id)
    }

    /// The matched todos, in match order.
    pub fn todos(&self) -> impl Iterator<Item = &Todo> {
        self.matches.iter().map(|m| &m.todo)
    }

    /// The banner summary: the first match's place and the match count.
    ///
    /// The first match is not necessarily the nearest place.
    pub fn summary(&self) -> Option<NearbySummary> {
        self.matches.first().map(|first| NearbySummary {
            place: first.place.clone(),
            count: self.matches.len(),
        })
    }
}

/// Computes which open todos are anchored to a place containing `sample`.
///
/// Returns an empty result when there is no sample, no place or no todo.
/// Done todos, todos without a place, todos whose place is not loaded and
/// places without a coordinate are skipped. A todo exactly on the radius
/// edge counts as nearby. When several places share an id, the first one
/// loaded wins.
pub fn compute_nearby(
    sample: Option<&LocationSample>,
    places: &[Place],
    todos: &[Todo],
) -> ProximityResult {
    let Some(sample) = sample else {
        return ProximityResult::empty();
    };
    if places.is_empty() || todos.is_empty() {
        return ProximityResult::empty();
    }

    let mut by_id: HashMap<&str, &Place> = HashMap::with_capacity(places.len());
    for place in places {
        by_id.entry(place.id.as_str()).or_insert(place);
    }

    let mut result = ProximityResult::empty();
    for todo in todos.iter().filter(|t| !t.is_done) {
        let Some(place) = todo
            .place_id
            .as_deref()
            .and_then(|id| by_id.get(id).copied())
        else {
            continue;
        };
        let Some(center) = place.location else {
            continue;
        };

        let distance = distance_meters(sample.coordinate, center);
        if distance <= place.radius() {
            result.nearby_todo_ids.insert(todo.id.clone());
            result.matches.push(ProximityMatch {
                todo: todo.clone(),
                place: place.clone(),
                distance_meters: distance.round(),
            });
        }
    }

    result
}
