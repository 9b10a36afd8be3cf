//! Schema initialization.

use super::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Creates the session table if needed, using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        Ok(())
    }
}
