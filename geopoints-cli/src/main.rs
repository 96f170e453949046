use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Great-circle distance and proximity search for geographic points
#[derive(Parser)]
#[command(name = "geopoints")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Distance in kilometers between two coordinates
    Distance {
        /// Latitude of the first point
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lat1: f64,

        /// Longitude of the first point
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lon1: f64,

        /// Latitude of the second point
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lat2: f64,

        /// Longitude of the second point
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lon2: f64,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Find the points of a file within a radius, nearest first
    Nearby {
        /// Input file (CSV or GeoJSON)
        input: PathBuf,

        /// Reference latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lat: f64,

        /// Reference longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true, value_parser = finite)]
        lon: f64,

        /// Search radius in kilometers (exclusive)
        #[arg(short, long, value_parser = finite)]
        radius: f64,

        /// Output file (same format as input if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Column name for latitude (CSV only)
        #[arg(long, default_value = "lat")]
        lat_col: String,

        /// Column name for longitude (CSV only)
        #[arg(long, default_value = "long")]
        lon_col: String,
    },
}

/// Parse a number, rejecting `NaN` and infinities.
fn finite(raw: &str) -> std::result::Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(format!("'{}' is not a finite number", raw)),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
            json,
        } => commands::distance::run(lat1, lon1, lat2, lon2, json),
        Commands::Nearby {
            input,
            lat,
            lon,
            radius,
            output,
            lat_col,
            lon_col,
        } => commands::nearby::run(input, output, lat, lon, radius, &lat_col, &lon_col),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_distance() {
        let cli = Cli::try_parse_from([
            "geopoints", "distance", "--lat1", "-33.87", "--lon1", "151.21", "--lat2", "51.5",
            "--lon2", "-0.13", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Distance {
                lat1, lon2, json, ..
            } => {
                assert_eq!(lat1, -33.87);
                assert_eq!(lon2, -0.13);
                assert!(json);
            }
            _ => panic!("expected distance command"),
        }
    }

    #[test]
    fn test_parse_nearby_defaults() {
        let cli = Cli::try_parse_from([
            "geopoints",
            "nearby",
            "points.csv",
            "--lat",
            "12.97",
            "--lon",
            "77.59",
            "--radius",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Nearby {
                input,
                radius,
                output,
                lat_col,
                lon_col,
                ..
            } => {
                assert_eq!(input, PathBuf::from("points.csv"));
                assert_eq!(radius, 5.0);
                assert!(output.is_none());
                assert_eq!(lat_col, "lat");
                assert_eq!(lon_col, "long");
            }
            _ => panic!("expected nearby command"),
        }
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        for value in ["NaN", "inf", "-inf", "1e999"] {
            let result = Cli::try_parse_from([
                "geopoints", "distance", "--lat1", value, "--lon1", "0", "--lat2", "0", "--lon2",
                "0",
            ]);
            assert!(result.is_err(), "{value} should be rejected");
        }

        let result = Cli::try_parse_from([
            "geopoints",
            "nearby",
            "points.csv",
            "--lat",
            "0",
            "--lon",
            "0",
            "--radius",
            "inf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_finite() {
        assert_eq!(finite(" -12.5 ").unwrap(), -12.5);
        assert!(finite("north").is_err());
        assert!(finite("NaN").unwrap_err().contains("finite"));
    }

    #[test]
    fn test_parse_nearby_requires_radius() {
        let result = Cli::try_parse_from([
            "geopoints",
            "nearby",
            "points.csv",
            "--lat",
            "0",
            "--lon",
            "0",
        ]);
        assert!(result.is_err());
    }
}
