#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the accessibility pipeline.
//!
//! `score` computes the weighted composite accessibility score per
//! neighborhood, `label` computes categorical labels from street
//! sampling, and `compare` tabulates the two normalization strategies
//! side by side.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use access_map_pipeline::AccessConfig;
use access_map_scoring::Normalization;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "access-map", about = "Neighborhood accessibility pipeline")]
struct Cli {
    /// Directory containing `neighborhoods.csv`, `pois/`, and
    /// `streets.geojson`
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the result CSVs are written to
    #[arg(long, default_value = "results")]
    out_dir: PathBuf,

    /// Pipeline configuration TOML; defaults to the embedded reference
    /// configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the catchment radius in meters
    #[arg(long)]
    radius: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute weighted composite accessibility scores per neighborhood
    Score {
        /// Normalization strategy: "minmax" or "log"
        #[arg(long)]
        normalization: Option<String>,
    },
    /// Compute categorical labels from street sampling
    Label {
        /// Override the sampling interval in meters
        #[arg(long)]
        interval: Option<f64>,
    },
    /// Compare min-max and log composite scores side by side
    Compare,
}

fn load_config(cli: &Cli) -> Result<AccessConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            AccessConfig::from_toml_str(&text)?
        }
        None => AccessConfig::reference(),
    };
    if let Some(radius) = cli.radius {
        config.radius_m = radius;
    }
    Ok(config)
}

fn run_score(
    cli: &Cli,
    config: &AccessConfig,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let neighborhoods = access_map_ingest::read::read_neighborhoods(
        &cli.data_dir.join("neighborhoods.csv"),
    )?;
    let domains: Vec<String> = config.weights.domains().map(str::to_string).collect();
    let pois = access_map_ingest::read::read_pois(&cli.data_dir.join("pois"), &domains)?;

    let output = access_map_pipeline::run_score_pipeline(&neighborhoods, &pois, config)?;

    access_map_ingest::write::write_counts(&out_dir.join("poi_counts.csv"), &output.counts)?;
    access_map_ingest::write::write_domain_scores(
        &out_dir.join("domain_scores.csv"),
        &output.domain_scores,
    )?;
    access_map_ingest::write::write_composites(
        &out_dir.join("composite_scores.csv"),
        &output.composites,
    )?;

    for composite in &output.composites {
        let name = neighborhoods
            .iter()
            .find(|n| n.id == composite.neighborhood_id)
            .map_or("?", |n| n.name.as_str());
        log::info!("{name}: {:.2}", composite.score);
    }

    Ok(())
}

fn run_label(
    cli: &Cli,
    config: &AccessConfig,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let neighborhoods = access_map_ingest::read::read_neighborhoods(
        &cli.data_dir.join("neighborhoods.csv"),
    )?;
    let streets = access_map_ingest::read::read_streets(&cli.data_dir.join("streets.geojson"))?;
    let categories: Vec<String> = config
        .thresholds
        .iter()
        .map(|(category, _)| category.to_string())
        .collect();
    let pois = access_map_ingest::read::read_pois(&cli.data_dir.join("pois"), &categories)?;

    let output = access_map_pipeline::run_label_pipeline(&streets, &neighborhoods, &pois, config)?;

    access_map_ingest::write::write_samples(&out_dir.join("street_samples.csv"), &output.samples)?;
    access_map_ingest::write::write_distances(
        &out_dir.join("distances_per_sample.csv"),
        &output.records,
    )?;
    access_map_ingest::write::write_labels(
        &out_dir.join("neighborhood_labels.csv"),
        &output.labels,
    )?;

    for (category, rule) in config.thresholds.iter() {
        let passed = output
            .labels
            .iter()
            .filter(|l| l.category == category && l.meets_threshold)
            .count();
        let total = output.labels.iter().filter(|l| l.category == category).count();
        log::info!(
            "{}: {passed}/{total} neighborhoods within {}m",
            rule.display_name,
            rule.threshold_m
        );
    }

    Ok(())
}

fn run_compare(
    cli: &Cli,
    config: &AccessConfig,
    out_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let neighborhoods = access_map_ingest::read::read_neighborhoods(
        &cli.data_dir.join("neighborhoods.csv"),
    )?;
    let domains: Vec<String> = config.weights.domains().map(str::to_string).collect();
    let pois = access_map_ingest::read::read_pois(&cli.data_dir.join("pois"), &domains)?;

    let comparisons = access_map_pipeline::compare_normalizations(&neighborhoods, &pois, config)?;
    access_map_ingest::write::write_comparison(
        &out_dir.join("scores_comparison.csv"),
        &comparisons,
    )?;

    log::info!("{:<10} {:>8} {:>8} {:>8}", "nbhd", "minmax", "log", "diff");
    for row in &comparisons {
        log::info!(
            "{:<10} {:>8.2} {:>8.2} {:>8.2}",
            row.neighborhood_id,
            row.minmax_score,
            row.log_score,
            row.difference
        );
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    if let Commands::Score {
        normalization: Some(selector),
    } = &cli.command
    {
        config.normalization = selector.parse::<Normalization>()?;
    }
    if let Commands::Label {
        interval: Some(interval),
    } = &cli.command
    {
        config.sample_interval_m = *interval;
    }

    fs::create_dir_all(&cli.out_dir)?;
    let start = Instant::now();

    match &cli.command {
        Commands::Score { .. } => run_score(&cli, &config, &cli.out_dir)?,
        Commands::Label { .. } => run_label(&cli, &config, &cli.out_dir)?,
        Commands::Compare => run_compare(&cli, &config, &cli.out_dir)?,
    }

    log::info!("Done in {:.1}s", start.elapsed().as_secs_f64());
    Ok(())
}
