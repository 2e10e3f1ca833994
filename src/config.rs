// ABOUTME: Parses the optional TOML config file and merges it with CLI flags
// ABOUTME: Produces validated DumpSettings before any connection is opened

use crate::clickhouse::ConnectionString;
use crate::dump::DumpOptions;
use crate::filters::DatabaseFilter;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of a config file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DumpConfig {
    pub conn_string: Option<String>,
    pub cluster_name: Option<String>,
    pub exclude_default: Option<bool>,
    pub include_databases: Option<Vec<String>>,
    pub exclude_databases: Option<Vec<String>>,
    pub jobs: Option<usize>,
    pub output: Option<PathBuf>,
}

pub fn load_config_from_file(path: &Path) -> Result<DumpConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("Failed to parse TOML config at {}", path.display()))
}

impl DumpConfig {
    /// Overlay values given on the command line; `other` wins where set
    pub fn merge(self, other: DumpConfig) -> DumpConfig {
        DumpConfig {
            conn_string: other.conn_string.or(self.conn_string),
            cluster_name: other.cluster_name.or(self.cluster_name),
            exclude_default: other.exclude_default.or(self.exclude_default),
            include_databases: other.include_databases.or(self.include_databases),
            exclude_databases: other.exclude_databases.or(self.exclude_databases),
            jobs: other.jobs.or(self.jobs),
            output: other.output.or(self.output),
        }
    }
}

/// Fully resolved, validated settings for one run
#[derive(Debug, Clone)]
pub struct DumpSettings {
    pub connection: ConnectionString,
    pub options: DumpOptions,
    pub output: Option<PathBuf>,
}

impl DumpSettings {
    pub fn resolve(config: DumpConfig) -> Result<Self> {
        let conn_string = match config.conn_string {
            Some(value) if !value.trim().is_empty() => value,
            _ => bail!("Missing required argument conn-string"),
        };
        let cluster_name = match config.cluster_name {
            Some(value) if !value.is_empty() => value,
            _ => bail!("Missing required argument cluster-name"),
        };

        let jobs = config.jobs.unwrap_or(1);
        if jobs == 0 {
            bail!("Number of parallel jobs must be at least 1");
        }

        let connection = ConnectionString::parse(&conn_string)?;
        let filter = DatabaseFilter::new(
            config.exclude_default.unwrap_or(true),
            config.include_databases,
            config.exclude_databases,
        )?;

        let mut options = DumpOptions::new(cluster_name, filter);
        options.jobs = jobs;

        Ok(Self {
            connection,
            options,
            output: config.output,
        })
    }
}
