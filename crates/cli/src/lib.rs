//! Amenimap command line
//!
//! Loads the amenity and listing datasets from an input directory, runs one
//! analysis and writes its result files to an output directory.
//!
//! # Commands
//!
//! - **listings**: cluster basic amenities and pick ideal Airbnb listings
//! - **restaurants**: chain vs. non-chain restaurant statistics
//!
//! # Example
//!
//! ```ignore
//! use amenimap_cli::{Cli, run};
//! use clap::Parser;
//!
//! run(&Cli::parse())?;
//! ```

use amenimap::analysis::{ListingsReport, RestaurantsReport};
use amenimap::dataset::{AMENITIES_FILE, LISTINGS_FILE};
use amenimap::export;
use amenimap::{AnalysisConfig, PriceRange};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "amenimap", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Cluster basic amenities and select ideal Airbnb listings
    Listings(ListingsArgs),
    /// Compare chain and non-chain restaurant locations
    Restaurants(RestaurantsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DirArgs {
    #[arg(long, default_value = "input")]
    pub input_dir: PathBuf,

    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ListingsArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// JSON (or TOML) analysis configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Number of amenity clusters
    #[arg(short = 'k', long)]
    pub clusters: Option<usize>,

    /// Half side of the square searched around each cluster center
    #[arg(short, long)]
    pub radius_km: Option<f64>,

    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct RestaurantsArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Also export every branch of this restaurant
    #[arg(short, long)]
    pub name: Option<String>,
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Listings(args) => run_listings(args),
        Command::Restaurants(args) => run_restaurants(args),
    }
}

/// Configuration from the optional file with command line overrides applied.
pub fn resolve_config(args: &ListingsArgs) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let Some(clusters) = args.clusters {
        config = config.with_clusters(clusters);
    }
    if let Some(radius_km) = args.radius_km {
        config = config.with_radius_km(radius_km);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.min_price.is_some() || args.max_price.is_some() {
        let current = config.listing_filter.price_range;
        let range = PriceRange::from_bounds(
            args.min_price.or(current.map(|r| r.min)),
            args.max_price.or(current.map(|r| r.max)),
        );
        config = config.with_price_range(range);
    }

    config.validate()?;
    Ok(config)
}

fn prepare_output(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))
}

pub fn run_listings(args: &ListingsArgs) -> anyhow::Result<()> {
    let config = resolve_config(args)?;
    let amenities = amenimap::load_amenities(&args.dirs.input_dir.join(AMENITIES_FILE))?;
    let listings = amenimap::load_listings(&args.dirs.input_dir.join(LISTINGS_FILE))?;

    let report = amenimap::analyze_listings(&amenities, &listings, &config)?;
    prepare_output(&args.dirs.output_dir)?;
    write_listings_report(&args.dirs.output_dir, &report)?;

    info!(
        "Wrote {} ideal listings across {} clusters to {}",
        report.ideal_listings.len(),
        report.clusters.len(),
        args.dirs.output_dir.display()
    );
    Ok(())
}

/// Write every listings result file into `dir`.
pub fn write_listings_report(dir: &Path, report: &ListingsReport) -> anyhow::Result<()> {
    export::write_amenity_counts_csv(
        export::create_output(&dir.join("amenity-counts.csv"))?,
        &report.amenity_counts,
    )?;
    export::write_geojson(
        export::create_output(&dir.join("amenities.geojson"))?,
        &export::clustered_amenities_geojson(&report.amenities, &report.fit.assignments)?,
    )?;
    export::write_listings_csv(
        export::create_output(&dir.join("filtered-listings.csv"))?,
        &report.filtered_listings,
    )?;
    export::write_geojson(
        export::create_output(&dir.join("filtered-listings.geojson"))?,
        &export::listings_geojson(&report.filtered_listings)?,
    )?;
    export::write_clusters_json(
        export::create_output(&dir.join("amenity-clusters.json"))?,
        &report.clusters,
    )?;
    export::write_geojson(
        export::create_output(&dir.join("amenity-clusters.geojson"))?,
        &export::clusters_geojson(&report.clusters)?,
    )?;
    export::write_ideal_listings_csv(
        export::create_output(&dir.join("ideal-airbnb-listings.csv"))?,
        &report.ideal_listings,
    )?;
    export::write_geojson(
        export::create_output(&dir.join("ideal-airbnb-listings.geojson"))?,
        &export::ideal_listings_geojson(&report.ideal_listings)?,
    )?;
    Ok(())
}

pub fn run_restaurants(args: &RestaurantsArgs) -> anyhow::Result<()> {
    let config = AnalysisConfig::default();
    let amenities = amenimap::load_amenities(&args.dirs.input_dir.join(AMENITIES_FILE))?;

    let report = amenimap::analyze_restaurants(
        &amenities,
        &config.restaurant_categories,
        args.name.as_deref(),
    );
    prepare_output(&args.dirs.output_dir)?;
    write_restaurants_report(&args.dirs.output_dir, &report)?;

    info!(
        "Wrote restaurant analysis to {}",
        args.dirs.output_dir.display()
    );
    Ok(())
}

/// Write every restaurant result file into `dir`.
pub fn write_restaurants_report(dir: &Path, report: &RestaurantsReport) -> anyhow::Result<()> {
    export::write_summary(&dir.join("analysis.txt"), &report.summary())?;
    export::write_geojson(
        export::create_output(&dir.join("chain-restaurants.geojson"))?,
        &export::amenities_geojson(&report.split.chains)?,
    )?;
    export::write_geojson(
        export::create_output(&dir.join("non-chain-restaurants.geojson"))?,
        &export::amenities_geojson(&report.split.non_chains)?,
    )?;

    if let Some((name, branches)) = &report.locations {
        if branches.is_empty() {
            tracing::warn!("No restaurant named {name:?} found");
        }
        let stem = file_stem(name);
        export::write_geojson(
            export::create_output(&dir.join(format!("{stem}-locations.geojson")))?,
            &export::amenities_geojson(branches)?,
        )?;
        export::write_amenities_csv(
            export::create_output(&dir.join(format!("{stem}-locations.csv")))?,
            branches,
        )?;
    }
    Ok(())
}

/// File name prefix for a restaurant name: path separators and whitespace
/// become `_`.
pub fn file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' || c.is_whitespace() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
