mod elements;
mod geo;
mod risk;
mod track;
mod watch;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

use crate::elements::{load_path, LoadOutcome};
use crate::geo::{subpoint, EarthModel, GeoPoint};
use crate::risk::RiskPolicy;
use crate::track::Propagator;
use crate::watch::{watch_all, BatchOutcome, WatchConfig, WatchReport};

const DEFAULT_RADIUS_KM: f64 = 3000.0;

#[derive(Parser)]
#[command(name = "reentry-watch")]
#[command(about = "Orbital decay prediction and geofenced re-entry watch")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the decay analysis over an element snapshot
    Analyze {
        /// Snapshot file or directory (.csv, .tle, .txt)
        elements: PathBuf,
        /// YAML analysis config; the flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        /// Reference point as "lat, lon"
        #[arg(long)]
        coordinates: Option<String>,
        /// Geofence radius in kilometers
        #[arg(long)]
        radius_km: Option<f64>,
        /// Analysis horizon, e.g. 48h
        #[arg(long, value_parser = parse_hours)]
        horizon: Option<u32>,
        /// Sample step, e.g. 30m
        #[arg(long, value_parser = parse_minutes)]
        step: Option<u32>,
        /// Risk policy: static, dynamic or both
        #[arg(long)]
        policy: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict one object's altitude at an hour offset
    Predict {
        /// Snapshot file or directory
        elements: PathBuf,
        /// Catalog number or name fragment
        object: String,
        /// Hours ahead of now, e.g. 12h
        #[arg(long, default_value = "1h", value_parser = parse_hours)]
        offset: u32,
        /// Altitude under which re-entry is called possible
        #[arg(long, default_value_t = 120.0)]
        threshold_km: f64,
    },
    /// Parse a snapshot and list the objects it contains
    Inspect {
        /// Snapshot file or directory
        elements: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            elements,
            config,
            coordinates,
            radius_km,
            horizon,
            step,
            policy,
            json,
        } => analyze(
            &elements,
            config.as_deref(),
            coordinates.as_deref(),
            radius_km,
            horizon,
            step,
            policy.as_deref(),
            json,
        ),
        Commands::Predict {
            elements,
            object,
            offset,
            threshold_km,
        } => predict(&elements, &object, offset, threshold_km),
        Commands::Inspect { elements } => inspect(&elements),
    }
}

#[allow(clippy::too_many_arguments)]
fn analyze(
    elements: &Path,
    config: Option<&Path>,
    coordinates: Option<&str>,
    radius_km: Option<f64>,
    horizon: Option<u32>,
    step: Option<u32>,
    policy: Option<&str>,
    json: bool,
) -> ExitCode {
    let mut cfg = match config {
        Some(path) => match WatchConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let Some(coordinates) = coordinates else {
                eprintln!("Provide --config or --coordinates \"lat, lon\"");
                return ExitCode::FAILURE;
            };
            let Some(center) = GeoPoint::from_coordinates(coordinates) else {
                eprintln!("Invalid coordinates: {}", coordinates);
                return ExitCode::FAILURE;
            };
            WatchConfig::for_reference(center, radius_km.unwrap_or(DEFAULT_RADIUS_KM))
        }
    };

    if config.is_some() {
        if let Some(coordinates) = coordinates {
            let Some(center) = GeoPoint::from_coordinates(coordinates) else {
                eprintln!("Invalid coordinates: {}", coordinates);
                return ExitCode::FAILURE;
            };
            cfg.fence.center = center;
        }
    }
    if let Some(radius) = radius_km {
        cfg.fence.max_radius_km = radius;
    }
    if let Some(horizon) = horizon {
        cfg.horizon_hours = horizon;
    }
    if let Some(step) = step {
        cfg.step_minutes = step;
    }
    if let Some(policy) = policy {
        match parse_policy(policy) {
            Some(p) => cfg.policy = p,
            None => {
                eprintln!("Unknown policy '{}': use static, dynamic or both", policy);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(e) = cfg.validate() {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match load_path(elements) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error loading elements: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = watch_all(&outcome.sets, &cfg, Utc::now(), outcome.skipped);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error encoding report: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    print_report(&report, &cfg);
    ExitCode::SUCCESS
}

fn print_report(report: &WatchReport, cfg: &WatchConfig) {
    match report.outcome {
        BatchOutcome::NoInput => {
            println!(
                "No element sets in snapshot ({} records skipped)",
                report.skipped_records
            );
            return;
        }
        BatchOutcome::Analyzed { objects } => {
            println!(
                "Analyzed {} objects ({} records skipped)",
                objects, report.skipped_records
            );
        }
    }

    println!(
        "Decay events within {:.0} km of {:.4}, {:.4}: {}",
        cfg.fence.max_radius_km,
        cfg.fence.center.latitude_deg,
        cfg.fence.center.longitude_deg,
        report.events.len()
    );
    for event in &report.events {
        println!(
            "  {} ({} local)  #{} {}  {:.2}, {:.2}  bearing {:.1}  {}",
            event.predicted_at.format("%Y-%m-%dT%H:%M:%SZ"),
            event.local_time().format("%Y-%m-%d %H:%M"),
            event.catalog_id,
            event.name,
            event.latitude_deg,
            event.longitude_deg,
            event.bearing_deg,
            event.verdict.level
        );
    }

    println!("Static decay watchlist: {}", report.static_risks.len());
    for risk in &report.static_risks {
        println!(
            "  #{} {}  drag {:.2e}  mean motion {:.2} rev/d  epoch age {:.1} d",
            risk.catalog_id,
            risk.name,
            risk.signals.drag_term,
            risk.signals.mean_motion_rev_per_day,
            risk.signals.epoch_age_days
        );
    }
}

fn predict(elements: &Path, object: &str, offset: u32, threshold_km: f64) -> ExitCode {
    let outcome = match load_path(elements) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error loading elements: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let needle = object.to_lowercase();
    let found = outcome.sets.iter().find(|s| {
        s.info.catalog_id.to_string() == object || s.info.name.to_lowercase().contains(&needle)
    });
    let Some(set) = found else {
        eprintln!("No object matching '{}'", object);
        return ExitCode::FAILURE;
    };

    let at = Utc::now() + Duration::hours(i64::from(offset));
    match set.propagator().position_km(at) {
        Ok(position) => {
            let sp = subpoint(position, EarthModel::Spherical);
            println!(
                "{} #{} at {}",
                set.info.name,
                set.info.catalog_id,
                at.format("%Y-%m-%dT%H:%M:%SZ")
            );
            println!(
                "  altitude {:.2} km  lat {:.2}  lon {:.2}",
                sp.altitude_km, sp.latitude_deg, sp.longitude_deg
            );
            if sp.altitude_km < threshold_km {
                println!("  re-entry possible (below {:.0} km)", threshold_km);
            } else {
                println!("  orbit stable");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Propagation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn inspect(elements: &Path) -> ExitCode {
    let outcome = match load_path(elements) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error loading elements: {}", e);
            return ExitCode::FAILURE;
        }
    };

    print_inventory(&outcome);
    ExitCode::SUCCESS
}

fn print_inventory(outcome: &LoadOutcome) {
    println!(
        "{} objects ({} records skipped)",
        outcome.sets.len(),
        outcome.skipped
    );
    for set in &outcome.sets {
        println!(
            "  #{} {}  epoch {}  mean motion {:.4} rev/d  [{}]",
            set.info.catalog_id,
            set.info.name,
            set.epoch().format("%Y-%m-%dT%H:%M:%S"),
            set.elements.mean_motion,
            set.info.source
        );
    }
}

fn parse_policy(s: &str) -> Option<RiskPolicy> {
    match s.to_ascii_lowercase().as_str() {
        "static" => Some(RiskPolicy::Static),
        "dynamic" => Some(RiskPolicy::Dynamic),
        "both" => Some(RiskPolicy::Both),
        _ => None,
    }
}

fn parse_hours(s: &str) -> Result<u32, String> {
    let duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
    let secs = duration.as_secs();
    if secs == 0 || secs % 3600 != 0 {
        return Err("expected a whole number of hours, e.g. 48h".into());
    }
    Ok((secs / 3600) as u32)
}

fn parse_minutes(s: &str) -> Result<u32, String> {
    let duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
    let secs = duration.as_secs();
    if secs == 0 || secs % 60 != 0 {
        return Err("expected a whole number of minutes, e.g. 30m".into());
    }
    Ok((secs / 60) as u32)
}
