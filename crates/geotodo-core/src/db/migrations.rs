//! Database schema initialization and migrations.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 2;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Reads the schema version recorded in the file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    /// Upgrades databases written by older versions.
    fn apply_migrations(&self) -> Result<()> {
        let version = self.schema_version()?;
        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        // Version 1 stored todos without tags
        if !self.has_column("todos", "tags")? {
            debug!("adding tags column to todos");
            self.connection
                .execute(
                    "ALTER TABLE todos ADD COLUMN tags TEXT NOT NULL DEFAULT '[]'",
                    [],
                )
                .db_context("Failed to add tags column to todos table")?;
        }

        self.connection
            .execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .db_context("Failed to record schema version")?;
        debug!("database schema now at version {SCHEMA_VERSION}");

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        let count: i64 = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get(0),
            )
            .db_context("Failed to inspect table columns")?;
        Ok(count > 0)
    }
}
