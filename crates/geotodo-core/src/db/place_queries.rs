//! Place queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Row};
use uuid::Uuid;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{effective_radius, Coordinate, Place},
};

const INSERT_PLACE_SQL: &str = "INSERT INTO places (id, user_id, name, address, lat, lng, radius_meters, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_PLACES_SQL: &str = "SELECT id, name, address, lat, lng, radius_meters, created_at FROM places WHERE user_id = ?1 ORDER BY rowid";
const CHECK_PLACE_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM places WHERE id = ?1 AND user_id = ?2)";

impl super::Database {
    /// Inserts a place owned by `user_id` and returns it as stored.
    pub fn create_place(
        &mut self,
        user_id: &str,
        name: &str,
        address: Option<&str>,
        center: Coordinate,
        radius_meters: Option<f64>,
    ) -> Result<Place> {
        let id = Uuid::new_v4().to_string();
        let now = Timestamp::now();
        let radius = effective_radius(radius_meters.unwrap_or(f64::NAN));

        self.connection
            .execute(
                INSERT_PLACE_SQL,
                params![
                    &id,
                    user_id,
                    name,
                    address,
                    center.lat,
                    center.lng,
                    radius,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert place")?;

        Ok(Place {
            id,
            name: name.to_string(),
            address: address.map(String::from),
            location: Some(center),
            radius_meters: radius,
            created_at: now,
        })
    }

    /// Every place owned by `user_id`, in insertion order.
    pub fn list_places(&self, user_id: &str) -> Result<Vec<Place>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLACES_SQL)
            .db_context("Failed to prepare query")?;

        let places = stmt
            .query_map(params![user_id], place_from_row)
            .db_context("Failed to query places")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read place row")?;

        Ok(places)
    }

    pub fn place_exists(&self, user_id: &str, place_id: &str) -> Result<bool> {
        self.connection
            .query_row(CHECK_PLACE_EXISTS_SQL, params![place_id, user_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check place existence")
    }
}

fn place_from_row(row: &Row<'_>) -> rusqlite::Result<Place> {
    let lat: Option<f64> = row.get(3)?;
    let lng: Option<f64> = row.get(4)?;
    let radius: Option<f64> = row.get(5)?;

    Ok(Place {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        location: lat.zip(lng).map(|(lat, lng)| Coordinate::new(lat, lng)),
        radius_meters: effective_radius(radius.unwrap_or(f64::NAN)),
        created_at: parse_timestamp(row, 6)?,
    })
}

/// Reads an RFC 3339 timestamp column.
pub(super) fn parse_timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}
