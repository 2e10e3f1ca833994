// ABOUTME: Dump generator producing the idempotent ON CLUSTER script
// ABOUTME: Walks databases then tables and writes each guarded CREATE statement

use crate::ddl::{guard_database_ddl, guard_table_ddl, write_statement, write_use};
use crate::filters::DatabaseFilter;
use crate::schema::SchemaSource;
use crate::utils::display_name;
use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use std::io::Write;

/// What goes into the script and how it is produced
#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub cluster_name: String,
    pub filter: DatabaseFilter,
    /// Table DDL fetches kept in flight per database
    pub jobs: usize,
}

impl DumpOptions {
    pub fn new(cluster_name: impl Into<String>, filter: DatabaseFilter) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            filter,
            jobs: 1,
        }
    }
}

/// Counts reported once the dump completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub databases: usize,
    pub objects: usize,
    /// `SHOW CREATE` queries that returned no row
    pub skipped: usize,
}

/// List the databases to dump, in server order
pub async fn select_databases<S: SchemaSource>(
    source: &S,
    filter: &DatabaseFilter,
) -> Result<Vec<String>> {
    let all_databases = source.list_databases().await?;
    let total = all_databases.len();
    let selected = filter.apply(all_databases);

    tracing::info!(
        "Selected {} of {} database(s) for the dump",
        selected.len(),
        total
    );
    if selected.is_empty() {
        tracing::warn!("No databases selected; the script will be empty");
    }

    Ok(selected)
}

/// Write the cluster script for every selected database
///
/// Output is written as it is produced. The first error aborts the run and
/// whatever was already written stays written.
pub async fn dump_cluster<S, W>(source: &S, options: &DumpOptions, out: &mut W) -> Result<DumpSummary>
where
    S: SchemaSource,
    W: Write,
{
    if options.cluster_name.is_empty() {
        bail!("Cluster name cannot be empty");
    }
    if options.jobs == 0 {
        bail!("Number of parallel jobs must be at least 1");
    }

    let databases = select_databases(source, &options.filter).await?;

    let mut summary = DumpSummary::default();
    for database in &databases {
        dump_database(source, database, options, out, &mut summary).await?;
    }

    out.flush().context("Failed to flush dump output")?;

    Ok(summary)
}

/// Write the CREATE DATABASE, USE and table blocks for one database
pub async fn dump_database<S, W>(
    source: &S,
    database: &str,
    options: &DumpOptions,
    out: &mut W,
    summary: &mut DumpSummary,
) -> Result<()>
where
    S: SchemaSource,
    W: Write,
{
    let shown = display_name(database);
    tracing::info!("Dumping database '{}'", shown);

    // Dropped at the end of this database, not at the end of the run
    let scoped = source.open_database(database).await?;

    match scoped.show_create_database(database).await? {
        Some(ddl) => {
            write_statement(out, &guard_database_ddl(&ddl), &options.cluster_name)
                .with_context(|| format!("Failed to write DDL for database '{}'", shown))?;
        }
        None => {
            tracing::warn!(
                "SHOW CREATE DATABASE returned no rows for '{}'; skipping its CREATE statement",
                shown
            );
            summary.skipped += 1;
        }
    }

    write_use(out, database)
        .with_context(|| format!("Failed to write USE statement for '{}'", shown))?;

    let tables = scoped.list_tables().await?;

    // `buffered` yields in input order, so the script follows SHOW TABLES order
    let scoped = &scoped;
    let mut definitions = stream::iter(tables)
        .map(|table| async move {
            let ddl = scoped.show_create_table(&table).await?;
            Ok::<_, anyhow::Error>((table, ddl))
        })
        .buffered(options.jobs);

    while let Some(definition) = definitions.next().await {
        let (table, ddl) = definition?;
        match ddl {
            Some(ddl) => {
                write_statement(out, &guard_table_ddl(&ddl), &options.cluster_name).with_context(
                    || {
                        format!(
                            "Failed to write DDL for table '{}.{}'",
                            shown,
                            display_name(&table)
                        )
                    },
                )?;
                summary.objects += 1;
            }
            None => {
                tracing::warn!(
                    "SHOW CREATE TABLE returned no rows for '{}.{}'; skipping it",
                    shown,
                    display_name(&table)
                );
                summary.skipped += 1;
            }
        }
    }

    summary.databases += 1;
    Ok(())
}
