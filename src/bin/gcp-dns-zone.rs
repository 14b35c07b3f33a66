use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use gcp_dns_zone::{
    StackOutputs,
    config::{DEFAULT_DNS_ENDPOINT, DEFAULT_RESOURCE_MANAGER_ENDPOINT, GcpEndpoints, load_stack_input},
    stack,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// Stack input file (JSON if it ends in .json, YAML otherwise)
    #[arg(long, value_name = "PATH")]
    stack_input: PathBuf,
    /// Write exported outputs as JSON to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    outputs: Option<PathBuf>,
    /// Cloud DNS API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_DNS_ENDPOINT)]
    dns_endpoint: String,
    /// Cloud Resource Manager API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_RESOURCE_MANAGER_ENDPOINT)]
    resource_manager_endpoint: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let input = load_stack_input(&cli.stack_input)
        .await
        .context("failed to load stack-input")?;
    info!(
        domain = %input.target.domain_name(),
        project = %input.target.spec.project_id,
        records = input.target.spec.records.len(),
        "stack input loaded"
    );

    let endpoints = GcpEndpoints::new(&cli.dns_endpoint, &cli.resource_manager_endpoint);
    let run = stack::run(&input, endpoints).await;

    // zone outputs are written even when a later step failed
    if let Some(outputs) = &run.outputs {
        write_outputs(outputs, cli.outputs.as_deref()).await?;
    }

    if let Err(err) = &run.result {
        error!(error = %err, "stack run failed");
    }
    run.result.context("stack run failed")
}

async fn write_outputs(outputs: &StackOutputs, path: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(&outputs.to_output_map())
        .context("failed to render outputs")?;
    match path {
        Some(path) => tokio::fs::write(path, format!("{rendered}\n"))
            .await
            .with_context(|| format!("failed to write outputs to {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
