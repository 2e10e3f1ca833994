// ABOUTME: CLI entry point for chdump
// ABOUTME: Parses flags, connects to ClickHouse and writes the cluster script

use anyhow::Context;
use chdump::config::{load_config_from_file, DumpConfig, DumpSettings};
use chdump::{clickhouse, dump};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chdump")]
#[command(
    about = "Dump ClickHouse databases and tables as an idempotent ON CLUSTER script",
    long_about = None
)]
struct Cli {
    /// Exclude default and system databases
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    exclude_default: Option<bool>,
    /// Name of the target cluster
    #[arg(long)]
    cluster_name: Option<String>,
    /// The ClickHouse connection string
    #[arg(long)]
    conn_string: Option<String>,
    /// Dump only these databases (comma-separated)
    #[arg(long, value_delimiter = ',')]
    include_databases: Option<Vec<String>>,
    /// Skip these databases (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude_databases: Option<Vec<String>>,
    /// Table definitions fetched concurrently per database
    #[arg(long)]
    jobs: Option<usize>,
    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// TOML file with defaults for any of the flags above
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<DumpConfig> {
        let file = match &self.config {
            Some(path) => load_config_from_file(path)?,
            None => DumpConfig::default(),
        };

        Ok(file.merge(DumpConfig {
            conn_string: self.conn_string,
            cluster_name: self.cluster_name,
            exclude_default: self.exclude_default,
            include_databases: self.include_databases,
            exclude_databases: self.exclude_databases,
            jobs: self.jobs,
            output: self.output,
        }))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the SQL script
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = DumpSettings::resolve(Cli::parse().into_config()?)?;

    tracing::info!("Connecting to {}", settings.connection);
    let source = clickhouse::connect(&settings.connection).await?;

    let mut out: Box<dyn Write> = match &settings.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file at {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    let summary = dump::dump_cluster(&source, &settings.options, &mut out).await?;

    tracing::info!(
        "✓ Dumped {} database(s) and {} object(s) for cluster '{}' ({} skipped)",
        summary.databases,
        summary.objects,
        settings.options.cluster_name,
        summary.skipped
    );

    Ok(())
}
