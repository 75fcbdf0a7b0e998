//! nebula-fields - derive scalar densities and velocity curl from z-slice dumps
//!
//! Reads per-timestep slice files, runs one engine over them, logs the global
//! extrema a renderer needs and optionally writes the enriched tables.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nebula_fields::config::{self, PipelineConfig};
use nebula_fields::engine::DepthNeighbor;
use nebula_fields::{
    Dataset, FieldDescriptor, FieldRegistry, contour_levels, global_extrema, quiver_scale,
    read_dataset, required_inputs, vector, write_dataset,
};

#[derive(Parser, Debug)]
#[command(name = "nebula-fields")]
#[command(about = "Derived fields for primordial chemistry z-slices", version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the input slice files (overrides the config)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the known fields
    Fields {
        /// List velocity fields instead of scalar fields
        #[arg(long)]
        vector: bool,
    },

    /// Derive one scalar field for a set of timesteps
    Scalar {
        /// Field key, e.g. `h_plus_number_density`
        #[arg(long)]
        field: String,

        /// Timesteps to process (default: from config)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        timesteps: Vec<u32>,

        /// Number of contour levels to report
        #[arg(long, default_value = "100")]
        levels: usize,

        /// Fail if the field cannot be produced
        #[arg(long)]
        strict: bool,

        /// Write enriched tables to this directory
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute the curl of the velocity field
    Curl {
        /// Timesteps to process (default: from config)
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        timesteps: Vec<u32>,

        /// Read the z+1 neighbor from a second layer when present
        #[arg(long)]
        next_layer: bool,

        /// Write curl tables to this directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Fields { vector } => {
            let registry = if vector {
                FieldRegistry::vector()
            } else {
                FieldRegistry::scalar()
            };
            list_fields(&registry);
            Ok(())
        }
        Commands::Scalar {
            field,
            timesteps,
            levels,
            strict,
            output,
        } => {
            let mut config = config;
            if let Some(dir) = cli.input {
                config.input.scalar_dir = dir;
            }
            config.derivation.strict |= strict;
            run_scalar(&config, &field, &pick(timesteps, &config), levels, output)
        }
        Commands::Curl {
            timesteps,
            next_layer,
            output,
        } => {
            let mut config = config;
            if let Some(dir) = cli.input {
                config.input.vector_dir = dir;
            }
            if next_layer {
                config.curl.depth_neighbor = DepthNeighbor::NextLayer;
            }
            run_curl(&config, &pick(timesteps, &config), output)
        }
    }
}

fn pick(timesteps: Vec<u32>, config: &PipelineConfig) -> Vec<u32> {
    if timesteps.is_empty() {
        config.timesteps.clone()
    } else {
        timesteps
    }
}

fn list_fields(registry: &FieldRegistry) {
    for field in registry.fields() {
        let kind = if field.is_given() { "given" } else { "derived" };
        println!(
            "{:>3}  {:<8} {:<30} {}",
            field.accessor.get(),
            kind,
            field.key,
            field.title()
        );
    }
}

fn run_scalar(
    config: &PipelineConfig,
    key: &str,
    timesteps: &[u32],
    levels: usize,
    output: Option<PathBuf>,
) -> Result<()> {
    let registry = FieldRegistry::scalar();
    let field: FieldDescriptor = *registry
        .find(key)
        .ok_or_else(|| anyhow!("unknown scalar field `{}`", key))?;
    let requested = [field];

    let files = config.scalar_files().files_for(timesteps);
    let mut dataset = read_dataset(&files, Some(&required_inputs(&requested)))?;

    #[cfg(feature = "parallel")]
    nebula_fields::compute_derived_fields_parallel(&mut dataset, &requested, &config.derivation)?;
    #[cfg(not(feature = "parallel"))]
    nebula_fields::compute_derived_fields(&mut dataset, &requested, &config.derivation)?;

    match global_extrema(&dataset, Some(field.accessor)) {
        Some(range) => {
            let levels = contour_levels(range, levels);
            info!(
                field = field.key,
                max = range.max,
                min = range.min,
                levels = levels.len(),
                "global extrema"
            );
        }
        None => warn!(field = field.key, "no values to scale"),
    }

    write_output(output, field.key, &dataset)
}

fn run_curl(config: &PipelineConfig, timesteps: &[u32], output: Option<PathBuf>) -> Result<()> {
    let curl_config = config.curl_config()?;
    let files = config.vector_files().files_for(timesteps);
    let columns: Vec<_> = vector::VELOCITY.iter().map(|f| f.accessor).collect();
    let mut dataset = read_dataset(&files, Some(&columns))?;

    #[cfg(feature = "parallel")]
    nebula_fields::compute_curl_parallel(&mut dataset, &curl_config)?;
    #[cfg(not(feature = "parallel"))]
    nebula_fields::compute_curl(&mut dataset, &curl_config)?;

    match global_extrema(&dataset, Some(vector::CURL_MAGNITUDE.accessor)) {
        Some(range) => info!(
            max = range.max,
            min = range.min,
            quiver_scale = ?quiver_scale(range.max),
            "curl magnitude extrema"
        ),
        None => warn!("no curl values to scale"),
    }

    write_output(output, "curl", &dataset)
}

fn write_output(output: Option<PathBuf>, stem: &str, dataset: &Dataset) -> Result<()> {
    if let Some(dir) = output {
        let written = write_dataset(&dir, stem, dataset)
            .with_context(|| format!("writing to {}", dir.display()))?;
        info!(files = written.len(), directory = %dir.display(), "output written");
    }
    Ok(())
}
