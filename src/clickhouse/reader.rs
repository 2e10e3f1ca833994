// ABOUTME: ClickHouse schema introspection through SHOW queries
// ABOUTME: Lists databases and tables and fetches their CREATE statements

use super::{connect, ClickHouseConnection};
use crate::schema::SchemaSource;
use crate::utils::{display_name, quote_identifier};
use anyhow::{Context, Result};

/// Build `SHOW CREATE <kind> <name>` for the query builder
///
/// The client treats every `?` in query text as a bind placeholder, so a
/// literal `?` in the quoted name is written as `??`.
fn show_create_query(kind: &str, name: &str) -> String {
    format!("SHOW CREATE {} {}", kind, quote_identifier(name).replace('?', "??"))
}

impl SchemaSource for ClickHouseConnection {
    async fn open_database(&self, database: &str) -> Result<Self> {
        let scoped = self.connection_string().with_database(database);
        connect(&scoped).await.with_context(|| {
            format!(
                "Failed to open connection for database '{}'",
                display_name(database)
            )
        })
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        tracing::debug!("Running query: SHOW DATABASES");

        let databases = self
            .client()
            .query("SHOW DATABASES")
            .fetch_all::<String>()
            .await
            .context("Failed to execute query: SHOW DATABASES")?;

        tracing::info!("Found {} database(s) on the server", databases.len());

        Ok(databases)
    }

    async fn show_create_database(&self, database: &str) -> Result<Option<String>> {
        let query = show_create_query("DATABASE", database);
        tracing::debug!("Running query: {}", query);

        self.client()
            .query(&query)
            .fetch_optional::<String>()
            .await
            .with_context(|| {
                format!(
                    "Failed to get DDL for database '{}'",
                    display_name(database)
                )
            })
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let database = self.connection_string().database().unwrap_or("default");
        tracing::debug!("Running query: SHOW TABLES (database '{}')", database);

        let tables = self
            .client()
            .query("SHOW TABLES")
            .fetch_all::<String>()
            .await
            .with_context(|| {
                format!(
                    "Failed to execute query: SHOW TABLES in database '{}'",
                    display_name(database)
                )
            })?;

        tracing::info!(
            "Found {} table(s) in database '{}'",
            tables.len(),
            display_name(database)
        );

        Ok(tables)
    }

    async fn show_create_table(&self, table: &str) -> Result<Option<String>> {
        let query = show_create_query("TABLE", table);
        tracing::debug!("Running query: {}", query);

        self.client()
            .query(&query)
            .fetch_optional::<String>()
            .await
            .with_context(|| {
                format!(
                    "Failed to get DDL for table '{}'",
                    display_name(table)
                )
            })
    }
}
