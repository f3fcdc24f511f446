//! Contract Validator CLI
//!
//! Validates JSON payloads against named shapes and checks compatibility
//! between catalog snapshots.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use hemvist_schemas::{
    Catalog, CompatibilityChecker, ErrorLocation, SchemasConfig, ValidatorOptions,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hemvist-validator")]
#[command(about = "Validate payloads against the Hemvist contract catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON file against a named shape
    Check {
        /// Shape name (e.g. "Location", "DeviceEventRequest")
        shape: String,
        /// Path to the JSON payload
        file: PathBuf,
        /// Catalog snapshot to validate against
        #[arg(short, long, default_value = "latest")]
        snapshot: String,
        /// Request part reported in the error tree
        #[arg(long, default_value = "body")]
        location: String,
        /// Reject fields the shape does not declare
        #[arg(long)]
        strict: bool,
    },

    /// List the shapes of a snapshot
    List {
        /// Catalog snapshot
        #[arg(default_value = "latest")]
        snapshot: String,
    },

    /// Check compatibility between two snapshots
    Compatibility {
        /// Base snapshot
        #[arg(short, long)]
        from: String,
        /// Target snapshot
        #[arg(short, long)]
        to: String,
        /// Strict mode - any change is breaking
        #[arg(long)]
        strict: bool,
    },

    /// Check for breaking changes between the previous and latest snapshot
    Breaking,
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

fn open_snapshot(name: &str) -> anyhow::Result<Catalog> {
    let catalog = match name.trim_start_matches('v') {
        "1" | "1.0.0" => Catalog::v1()?,
        "2" | "2.0.0" => Catalog::v2()?,
        "latest" => Catalog::latest()?,
        other => bail!("Unknown snapshot '{other}' (expected v1, v2 or latest)"),
    };
    Ok(catalog)
}

fn parse_location(name: &str) -> anyhow::Result<ErrorLocation> {
    Ok(match name {
        "body" => ErrorLocation::Body,
        "query" => ErrorLocation::Query,
        "params" => ErrorLocation::Params,
        "cookies" => ErrorLocation::Cookies,
        "headers" => ErrorLocation::Headers,
        other => bail!("Unknown location '{other}'"),
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SchemasConfig::load().unwrap_or_default();

    match cli.command {
        Commands::Check {
            shape,
            file,
            snapshot,
            location,
            strict,
        } => {
            let catalog = open_snapshot(&snapshot)?;
            let location = parse_location(&location)?;
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;

            let options = ValidatorOptions {
                strict_unknown_fields: strict || config.validation.strict_unknown_fields,
                ..ValidatorOptions::from(&config.validation)
            };

            let entry = catalog.registry().get(&shape)?;
            match catalog.validator_with(options).validate(entry, &value) {
                Ok(()) => {
                    println!("✅ {} conforms to {} ({})", file.display(), shape, catalog.version());
                    Ok(())
                }
                Err(report) => {
                    let report = report.at_location(location);
                    println!("❌ {} does not conform to {}", file.display(), shape);
                    print!("{report}");
                    std::process::exit(1);
                }
            }
        }

        Commands::List { snapshot } => {
            let catalog = open_snapshot(&snapshot)?;
            let manifest = catalog.manifest()?;
            println!(
                "📋 {} shapes in snapshot {}",
                manifest.stats.total_shapes,
                catalog.version()
            );
            for entry in &manifest.shapes {
                println!("  {:<36} {:?}", entry.name, entry.kind);
            }
            Ok(())
        }

        Commands::Compatibility { from, to, strict } => {
            println!("🔍 Checking compatibility: {} -> {}", from, to);
            if strict {
                println!("  (strict mode enabled)");
            }
            println!();

            let old = open_snapshot(&from)?;
            let new = open_snapshot(&to)?;
            let checker = if strict {
                CompatibilityChecker::new().strict()
            } else {
                CompatibilityChecker::new()
            };
            let results = checker.check_registries(old.registry(), new.registry())?;

            let mut has_breaking = false;
            for (name, result) in &results {
                if result.is_breaking {
                    has_breaking = true;
                    println!("❌ {} - BREAKING CHANGE", name);
                    println!("   {}", result.summary);
                    for change in &result.changes {
                        if change.is_breaking {
                            println!("   └─ {} at {}", change.description, change.path);
                        }
                    }
                } else if !result.changes.is_empty() {
                    println!("✅ {} - {} changes (compatible)", name, result.changes.len());
                }
            }

            println!();
            if has_breaking {
                println!("❌ Breaking changes detected!");
                std::process::exit(1);
            }
            println!("✅ All changes are backward compatible");
            Ok(())
        }

        Commands::Breaking => {
            println!("🔍 Checking for breaking changes: v1 -> latest");
            println!();

            let old = Catalog::v1()?;
            let new = Catalog::latest()?;
            let results =
                CompatibilityChecker::new().check_registries(old.registry(), new.registry())?;

            let breaking: Vec<_> = results.iter().filter(|(_, r)| r.is_breaking).collect();

            if breaking.is_empty() {
                println!("✅ No breaking changes detected");
            } else {
                println!("❌ {} shape(s) with breaking changes:", breaking.len());
                for (name, result) in breaking {
                    println!();
                    println!("  {} ({} changes)", name, result.changes.len());
                    for change in &result.changes {
                        if change.is_breaking {
                            println!("    └─ {}", change.description);
                        }
                    }
                }
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
