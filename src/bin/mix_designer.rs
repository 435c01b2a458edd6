// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Mix Designer CLI
//!
//! Usage:
//!   mix-designer --catalog concrete.csv select --target 35
//!   mix-designer --catalog concrete.csv --model-dir models/ --format json select --target 35
//!   mix-designer --catalog concrete.csv --oracle physics evaluate
//!   mix-designer --catalog concrete.csv schema
//!
//! Results go to stdout, logs to stderr (`RUST_LOG` or `-v`).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ecomix_core::catalog::FieldRole;
use ecomix_core::oracle::MODEL_FILE;
use ecomix_core::presentation::{
    parse_target_strength, render_json, render_text, INPUT_ERROR_MESSAGE,
};
use ecomix_core::{
    evaluate, load_catalog, Catalog, ModelArtifact, PhysicsOracle, SearchConfig, SearchContext,
    StrengthOracle,
};

const EXIT_INPUT_ERROR: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "mix-designer")]
#[command(about = "Sustainable concrete mix selection")]
struct Cli {
    /// Mix catalog (CSV with a header row)
    #[arg(long, global = true, default_value = "concrete.csv")]
    catalog: PathBuf,

    /// Search configuration (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OracleKind::Auto)]
    oracle: OracleKind,

    /// Directory holding best_model.json
    #[arg(long, global = true, default_value = ".")]
    model_dir: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Pick the best feasible mix for a target strength
    Select {
        /// Target compressive strength (MPa)
        #[arg(long, allow_hyphen_values = true)]
        target: String,
    },
    /// Score the strength oracle against the catalog's measured strengths
    Evaluate,
    /// Show resolved column roles and emission factors
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OracleKind {
    /// Model artifact if present, physics otherwise
    Auto,
    Model,
    Physics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Validate input before touching any file
    let target = match &cli.command {
        Command::Select { target } => match parse_target_strength(target) {
            Ok(t) => Some(t),
            Err(err) => {
                eprintln!("{INPUT_ERROR_MESSAGE} ({err})");
                return Ok(ExitCode::from(EXIT_INPUT_ERROR));
            }
        },
        _ => None,
    };

    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SearchConfig::default(),
    };
    let catalog = load_catalog(&cli.catalog, &config.schema)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    if let Command::Schema = cli.command {
        print_schema(&catalog, &config, cli.format)?;
        return Ok(ExitCode::SUCCESS);
    }

    let oracle = build_oracle(&cli, &catalog, &config)?;
    info!(oracle = oracle.label(), "strength oracle ready");
    let context = SearchContext::new(catalog, &config, oracle);

    match target {
        Some(target) => {
            let result = context.select(target)?;
            match cli.format {
                OutputFormat::Text => print!("{}", render_text(&result)),
                OutputFormat::Json => println!("{}", render_json(&result)?),
            }
        }
        None => {
            let report = evaluate(context.catalog(), context.oracle())?;
            match cli.format {
                OutputFormat::Text => {
                    println!("ORACLE   : {}", report.oracle);
                    println!("SAMPLES  : {}", report.samples);
                    println!("MAE      : {:.2} MPa", report.mae);
                    println!("RMSE     : {:.2} MPa", report.rmse);
                    match report.r2 {
                        Some(r2) => println!("R²       : {r2:.4}"),
                        None => println!("R²       : n/a"),
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn build_oracle(
    cli: &Cli,
    catalog: &Catalog,
    config: &SearchConfig,
) -> Result<Box<dyn StrengthOracle>> {
    let use_model = match cli.oracle {
        OracleKind::Model => true,
        OracleKind::Physics => false,
        OracleKind::Auto => cli.model_dir.join(MODEL_FILE).is_file(),
    };

    if use_model {
        let artifact = ModelArtifact::discover(&cli.model_dir)
            .with_context(|| format!("loading model from {}", cli.model_dir.display()))?;
        Ok(Box::new(artifact.into_oracle(catalog.feature_names())?))
    } else {
        Ok(Box::new(PhysicsOracle::new(
            config.physics.clone(),
            catalog.schema(),
        )?))
    }
}

fn print_schema(catalog: &Catalog, config: &SearchConfig, format: OutputFormat) -> Result<()> {
    let schema = catalog.schema();
    let estimator = config.emissions.bind(catalog.feature_names());
    let rows: Vec<(&str, Option<FieldRole>, f64)> = catalog
        .feature_names()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), schema.role_of(i), estimator.factors()[i]))
        .collect();

    match format {
        OutputFormat::Text => {
            println!("TARGET   : {}", schema.target_name());
            println!("RECORDS  : {}", catalog.len());
            println!("{}", "-".repeat(60));
            for (name, role, factor) in &rows {
                let role = role.map_or("-", FieldRole::as_str);
                println!("{name:<48} {role:<8} {factor:.4}");
            }
        }
        OutputFormat::Json => {
            let features: Vec<_> = rows
                .iter()
                .map(|(name, role, factor)| json!({ "name": name, "role": role, "co2_factor": factor }))
                .collect();
            let doc = json!({
                "target": schema.target_name(),
                "records": catalog.len(),
                "match_rule": config.emissions.rule,
                "features": features,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}
