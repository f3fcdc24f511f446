//! Contract Export CLI
//!
//! Exports snapshot manifests (shape names, kinds, checksums) for
//! external consumers and drift detection in CI.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use hemvist_schemas::config::OutputFormat;
use hemvist_schemas::{Catalog, SchemasConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hemvist-export")]
#[command(about = "Export contract snapshot manifests")]
struct Cli {
    /// Catalog snapshot to export
    #[arg(default_value = "latest")]
    snapshot: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SchemasConfig::load().unwrap_or_default();

    let catalog = match cli.snapshot.trim_start_matches('v') {
        "1" | "1.0.0" => Catalog::v1()?,
        "2" | "2.0.0" => Catalog::v2()?,
        "latest" => Catalog::latest()?,
        other => bail!("Unknown snapshot '{other}' (expected v1, v2 or latest)"),
    };

    let manifest = catalog.manifest()?;
    let mut value = serde_json::to_value(&manifest)?;

    if !config.export.include_checksums {
        if let Some(shapes) = value.get_mut("shapes").and_then(|s| s.as_array_mut()) {
            for shape in shapes {
                if let Some(obj) = shape.as_object_mut() {
                    obj.remove("checksum");
                }
            }
        }
    }

    let compact = cli.compact || config.export.output_format == OutputFormat::Compact;
    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Manifest for {} written to {}", catalog.version(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
