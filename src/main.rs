use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use dashpersist::{Persister, RunReport, Severity, TaskConfig, keys};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dashpersist")]
#[command(about = "Save and load dashboard state files as background persistence jobs")]
struct Cli {
    /// Emit the run report as JSON instead of plain text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a payload to the key's file, replacing any previous content.
    Save {
        /// Directory the file lives in. Must already exist.
        #[arg(long)]
        dir: String,
        /// Data key; defaults to "dashboard_state".
        #[arg(long)]
        key: Option<String>,
        /// Inline payload. Falls back to --file, then to stdin.
        #[arg(long)]
        data: Option<String>,
        /// Read the payload from this file.
        #[arg(long, conflicts_with = "data")]
        file: Option<PathBuf>,
    },
    /// Read a key's file back and print its content.
    Load {
        /// Directory the file lives in.
        #[arg(long)]
        dir: String,
        /// Data key; defaults to "dashboard_state".
        #[arg(long)]
        key: Option<String>,
    },
    /// List the well-known dashboard state keys.
    Keys,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    report: &'a RunReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    loaded_data: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Save {
            dir,
            key,
            data,
            file,
        } => save(&dir, key.as_deref(), data, file, cli.json).await,
        Command::Load { dir, key } => load(&dir, key.as_deref(), cli.json).await,
        Command::Keys => {
            for key in keys::ALL {
                println!("{}", key);
            }
            Ok(())
        }
    }
}

async fn save(
    dir: &str,
    key: Option<&str>,
    data: Option<String>,
    file: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let payload = match (data, file) {
        (Some(data), _) => data,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read payload file '{}'", path.display()))?,
        (None, None) => read_stdin()?,
    };

    let mut config = TaskConfig::new(dir).payload(&payload);
    if let Some(key) = key {
        config = config.data_key(key);
    }

    let report = execute(&Persister::local(), config).await;
    print_report(&report, None, json)?;
    exit_status(&report)
}

async fn load(dir: &str, key: Option<&str>, json: bool) -> Result<()> {
    let persister = Persister::local();

    let mut config = TaskConfig::new(dir).operation("load");
    if let Some(key) = key {
        config = config.data_key(key);
    }

    let report = execute(&persister, config).await;
    let loaded = persister.loaded_data();
    print_report(&report, loaded.as_deref(), json)?;
    exit_status(&report)
}

/// Runs one submission to completion and captures its full report.
async fn execute(persister: &Persister, config: TaskConfig) -> RunReport {
    let handle = persister.execute(config);
    let job = handle.job().clone();
    handle.join().await;
    RunReport::from_job(&job)
}

fn print_report(report: &RunReport, loaded_data: Option<&str>, json: bool) -> Result<()> {
    if json {
        let output = RunOutput {
            report,
            loaded_data,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for entry in &report.entries {
        match entry.severity {
            Severity::Info => println!("  {}", entry.message),
            Severity::Failure => println!("! {}", entry.message),
        }
    }
    println!("Job {}: {}", report.job_id, report.status);

    if let Some(loaded_data) = loaded_data {
        println!("{}", loaded_data);
    }
    Ok(())
}

fn exit_status(report: &RunReport) -> Result<()> {
    match report.status.failure_reason() {
        Some(reason) => Err(anyhow!("Persistence job failed: {}", reason)),
        None => Ok(()),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read payload from stdin")?;
    Ok(buffer)
}
