// ABOUTME: Database selection logic for the schema dump
// ABOUTME: Handles reserved-name exclusion and include/exclude lists

use anyhow::{bail, Result};

/// Databases every ClickHouse server ships with
pub const RESERVED_DATABASES: [&str; 4] = [
    "INFORMATION_SCHEMA",
    "default",
    "information_schema",
    "system",
];

/// Represents which databases end up in the dump
#[derive(Debug, Clone)]
pub struct DatabaseFilter {
    exclude_default: bool,
    include_databases: Option<Vec<String>>,
    exclude_databases: Option<Vec<String>>,
}

impl Default for DatabaseFilter {
    fn default() -> Self {
        Self {
            exclude_default: true,
            include_databases: None,
            exclude_databases: None,
        }
    }
}

impl DatabaseFilter {
    /// Creates a filter from CLI arguments
    pub fn new(
        exclude_default: bool,
        include_databases: Option<Vec<String>>,
        exclude_databases: Option<Vec<String>>,
    ) -> Result<Self> {
        if include_databases.is_some() && exclude_databases.is_some() {
            bail!("Cannot use both --include-databases and --exclude-databases");
        }

        for list in [&include_databases, &exclude_databases].into_iter().flatten() {
            if list.iter().any(|name| name.trim().is_empty()) {
                bail!("Database lists cannot contain empty names");
            }
        }

        Ok(Self {
            exclude_default,
            include_databases,
            exclude_databases,
        })
    }

    /// Creates a filter that lets every database through
    pub fn all() -> Self {
        Self {
            exclude_default: false,
            include_databases: None,
            exclude_databases: None,
        }
    }

    pub fn excludes_default(&self) -> bool {
        self.exclude_default
    }

    /// Determines if a database should be dumped
    pub fn should_dump_database(&self, db_name: &str) -> bool {
        if self.exclude_default && RESERVED_DATABASES.contains(&db_name) {
            return false;
        }

        if let Some(ref include) = self.include_databases {
            if !include.iter().any(|name| name == db_name) {
                return false;
            }
        }

        if let Some(ref exclude) = self.exclude_databases {
            if exclude.iter().any(|name| name == db_name) {
                return false;
            }
        }

        true
    }

    /// Keeps the databases to dump, preserving server order
    pub fn apply(&self, databases: Vec<String>) -> Vec<String> {
        databases
            .into_iter()
            .filter(|db| self.should_dump_database(db))
            .collect()
    }
}
