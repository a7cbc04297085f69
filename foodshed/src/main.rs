use clap::{Parser, Subcommand};
use foodshed::{
    app::{
        coverage::{CoverageInputs, CoverageRun},
        euclidean::euclidean_coverage,
    },
    config::{parse_modes, CoverageConfiguration},
    model::{
        distance::{DistanceRange, DistanceSet, DistanceThreshold},
        geometry::read_boundary,
        layer::{LayerCatalog, LayerPaths},
        provider::read_providers,
        CoverageError,
    },
};
use foodshed_osm::model::{osm::OsmSource, TravelMode};
use serde_json::json;
use std::{path::PathBuf, str::FromStr};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FoodshedArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// precompute network coverage layers for every mode and distance
    Coverage {
        #[arg(long, help = "provider table (CSV) with latitude and longitude columns")]
        providers: PathBuf,
        #[arg(long, help = "study-region boundary (GeoJSON)")]
        boundary: PathBuf,
        #[arg(long, help = "OpenStreetMap .pbf extract covering the boundary")]
        network: String,
        #[arg(long, default_value = "coverage_layers")]
        output_dir: PathBuf,
        #[arg(long, help = "compute a single distance in miles")]
        distance_miles: Option<f64>,
        #[arg(long, help = "comma-separated distances in miles, e.g. 0.25,0.5,1")]
        distances: Option<String>,
        #[arg(long)]
        distance_start: Option<f64>,
        #[arg(long)]
        distance_end: Option<f64>,
        #[arg(long)]
        distance_step: Option<f64>,
        #[arg(long, help = "comma-separated travel modes (walk, drive)")]
        modes: Option<String>,
        #[arg(long, help = "path to a .toml or .json coverage configuration")]
        configuration_file: Option<PathBuf>,
        #[arg(long, help = "recompute layers even when inputs are unchanged")]
        no_cache: bool,
    },
    /// list or resolve precomputed layers
    Layers {
        #[arg(long, help = "run summary written by the coverage command")]
        summary: Option<PathBuf>,
        #[arg(long, help = "directory to scan for layer files instead of a summary")]
        directory: Option<PathBuf>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        distance: Option<f64>,
    },
    /// straight-line radius coverage, ignoring the street network
    Euclidean {
        #[arg(long)]
        providers: PathBuf,
        #[arg(long)]
        boundary: PathBuf,
        #[arg(long)]
        distance_miles: f64,
        #[arg(long, default_value_t = 64)]
        segments: usize,
    },
}

fn run(app: &App) -> Result<(), CoverageError> {
    match app {
        App::Coverage {
            providers,
            boundary,
            network,
            output_dir,
            distance_miles,
            distances,
            distance_start,
            distance_end,
            distance_step,
            modes,
            configuration_file,
            no_cache,
        } => {
            let mut conf = match configuration_file {
                None => CoverageConfiguration::default(),
                Some(f) => {
                    log::info!("reading coverage configuration from {}", f.display());
                    CoverageConfiguration::try_from(f.as_path())?
                }
            };
            let range_given =
                distance_start.is_some() || distance_end.is_some() || distance_step.is_some();
            if distance_miles.is_some() || distances.is_some() || range_given {
                let base = match &conf.distances {
                    DistanceSet::Range(range) => *range,
                    DistanceSet::List { .. } => DistanceRange::default(),
                };
                let range = DistanceRange {
                    start: distance_start.unwrap_or(base.start),
                    end: distance_end.unwrap_or(base.end),
                    step: distance_step.unwrap_or(base.step),
                };
                conf.distances =
                    DistanceSet::from_arguments(*distance_miles, distances.as_deref(), range)?;
            }
            if let Some(m) = modes {
                conf.modes = parse_modes(m)?;
            }
            if *no_cache {
                conf.reuse_cached_layers = false;
            }
            let inputs = CoverageInputs {
                providers: providers.clone(),
                boundary: boundary.clone(),
                network: OsmSource::Pbf {
                    pbf_filepath: network.clone(),
                },
                output_dir: output_dir.clone(),
            };
            let summary = CoverageRun::new(inputs, conf)?.run()?;
            eprintln!(
                "finished {} modes, {} skipped.",
                summary.modes.len(),
                summary.skipped_modes.len()
            );
            Ok(())
        }
        App::Layers {
            summary,
            directory,
            mode,
            distance,
        } => {
            let catalog = match (summary, directory) {
                (Some(s), _) => LayerCatalog::from_summary(s)?,
                (None, Some(d)) => LayerCatalog::discover(d)?,
                (None, None) => {
                    return Err(CoverageError::InvalidConfiguration(String::from(
                        "layers requires --summary or --directory",
                    )))
                }
            };
            match (mode, distance) {
                (Some(m), Some(d)) => {
                    let mode = TravelMode::from_str(m).map_err(CoverageError::InvalidConfiguration)?;
                    match catalog.lookup(mode, *d) {
                        Some(paths) => println!("{}", paths_json(mode, &DistanceThreshold::new(*d)?, paths)),
                        None => log::warn!("no {mode} layers for {d}mi"),
                    }
                }
                (None, None) => {
                    for (key, paths) in catalog.entries() {
                        println!("{}", paths_json(key.mode, &key.distance, paths));
                    }
                }
                _ => {
                    return Err(CoverageError::InvalidConfiguration(String::from(
                        "--mode and --distance must be given together",
                    )))
                }
            }
            Ok(())
        }
        App::Euclidean {
            providers,
            boundary,
            distance_miles,
            segments,
        } => {
            let points = read_providers(providers, &Default::default())?;
            let region = read_boundary(boundary)?;
            let distance = DistanceThreshold::new(*distance_miles)?;
            let result = euclidean_coverage(&points, &region, &distance, *segments)?;
            let report = json![{
                "distance_miles": distance.miles(),
                "provider_count": points.len(),
                "covered_area_sq_m": result.covered_area_sq_m,
                "uncovered_area_sq_m": result.uncovered_area_sq_m,
                "coverage_ratio": result.coverage_ratio,
            }];
            println!("{report}");
            Ok(())
        }
    }
}

fn paths_json(mode: TravelMode, distance: &DistanceThreshold, paths: &LayerPaths) -> serde_json::Value {
    json![{
        "mode": mode,
        "distance_miles": distance.miles(),
        "coverage_path": paths.coverage,
        "uncovered_path": paths.uncovered,
    }]
}

fn main() {
    env_logger::init();
    let args = FoodshedArguments::parse();
    if let Err(e) = run(&args.app) {
        log::error!("foodshed failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
