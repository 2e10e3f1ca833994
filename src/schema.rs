// ABOUTME: Introspection interface the dump generator reads schema through
// ABOUTME: Implemented by the ClickHouse connection and by in-memory test sources

use anyhow::Result;

/// Source of database and table definitions
///
/// One value is bound to the server (used for `SHOW DATABASES`) and
/// [`SchemaSource::open_database`] derives a value scoped to a single database
/// for the `SHOW TABLES` / `SHOW CREATE TABLE` calls.
///
/// The `show_create_*` methods return `Ok(None)` when the server answers with
/// no rows; that object is then left out of the dump.
#[allow(async_fn_in_trait)]
pub trait SchemaSource: Sized {
    /// Open a connection scoped to `database`
    async fn open_database(&self, database: &str) -> Result<Self>;

    /// `SHOW DATABASES`, in server order
    async fn list_databases(&self) -> Result<Vec<String>>;

    /// First row of ``SHOW CREATE DATABASE `<database>` ``
    async fn show_create_database(&self, database: &str) -> Result<Option<String>>;

    /// `SHOW TABLES` for the scoped database, in server order
    ///
    /// Includes views and materialized views.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// First row of ``SHOW CREATE TABLE `<table>` `` in the scoped database
    async fn show_create_table(&self, table: &str) -> Result<Option<String>>;
}
