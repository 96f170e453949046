use anyhow::{bail, Context, Result};
use csv::StringRecord;
use geopoints::geojson::{located_features, nearby_feature_collection, DELETED_PROPERTY};
use geopoints::{find_within_radius, Coordinates};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Column appended to each CSV row.
const DISTANCE_COLUMN: &str = "distance_km";

/// How many candidates were read and how many fell inside the radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SearchSummary {
    candidates: usize,
    matches: usize,
}

/// A CSV row with its parsed position.
struct CsvCandidate {
    record: StringRecord,
    lat: f64,
    lon: f64,
}

impl Coordinates for CsvCandidate {
    fn latitude(&self) -> f64 {
        self.lat
    }

    fn longitude(&self) -> f64 {
        self.lon
    }
}

pub fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    lat: f64,
    lon: f64,
    radius: f64,
    lat_col: &str,
    lon_col: &str,
) -> Result<()> {
    // Detect file format
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (output_path, summary) = match extension.as_str() {
        "csv" => {
            let output_path = output.unwrap_or_else(|| default_output(&input, "csv"));
            let data = read_input(&input)?;
            let writer = File::create(&output_path).context("Failed to create output file")?;
            let summary = search_csv(
                data.as_slice(),
                BufWriter::new(writer),
                lat,
                lon,
                radius,
                lat_col,
                lon_col,
            )?;
            (output_path, summary)
        }
        "geojson" | "json" => {
            let output_path = output.unwrap_or_else(|| default_output(&input, "geojson"));
            let data = read_input(&input)?;
            let writer = File::create(&output_path).context("Failed to create output file")?;
            let summary = search_geojson(
                data.as_slice(),
                BufWriter::new(writer),
                lat,
                lon,
                radius,
            )?;
            (output_path, summary)
        }
        _ => bail!(
            "Unsupported file format: {}. Use .csv or .geojson",
            extension
        ),
    };

    println!(
        "{} of {} points within {} km of ({}, {})",
        summary.matches, summary.candidates, radius, lat, lon
    );
    println!("Output written to: {}", output_path.display());
    Ok(())
}

/// Read the whole input up front, so `-o` may name the input itself.
fn read_input(input: &Path) -> Result<Vec<u8>> {
    fs::read(input).with_context(|| format!("Failed to open input file {}", input.display()))
}

/// `<stem>_nearby.<extension>` next to the input.
fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "points".into());
    input.with_file_name(format!("{}_nearby.{}", stem, extension))
}

fn search_csv<R: Read, W: Write>(
    input: R,
    output: W,
    lat: f64,
    lon: f64,
    radius: f64,
    lat_col: &str,
    lon_col: &str,
) -> Result<SearchSummary> {
    let mut reader = csv::Reader::from_reader(input);

    // Find column indices
    let headers = reader.headers()?.clone();
    let lat_idx = column(&headers, lat_col)?;
    let lon_idx = column(&headers, lon_col)?;
    let deleted_idx = headers.iter().position(|h| h == DELETED_PROPERTY);

    let records: Vec<StringRecord> = reader.records().collect::<Result<_, _>>()?;

    let pb = progress_bar(records.len() as u64)?;

    let mut candidates = Vec::with_capacity(records.len());
    for (row, record) in records.into_iter().enumerate() {
        pb.inc(1);

        if deleted_idx.is_some_and(|idx| is_truthy(record.get(idx).unwrap_or(""))) {
            continue;
        }

        // Header is line 1
        let line = row + 2;
        let lat = parse_coordinate(&record, lat_idx, lat_col, line)?;
        let lon = parse_coordinate(&record, lon_idx, lon_col, line)?;
        candidates.push(CsvCandidate { record, lat, lon });
    }
    pb.finish_and_clear();

    let total = candidates.len();
    let nearby = find_within_radius(lat, lon, radius, candidates);

    let mut writer = csv::Writer::from_writer(output);

    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.push(DISTANCE_COLUMN);
    writer.write_record(&new_headers)?;

    for result in &nearby {
        let distance = result.distance_km.to_string();
        let mut new_record: Vec<&str> = result.item.record.iter().collect();
        new_record.push(&distance);
        writer.write_record(&new_record)?;
    }
    writer.flush()?;

    Ok(SearchSummary {
        candidates: total,
        matches: nearby.len(),
    })
}

fn search_geojson<R: Read, W: Write>(
    input: R,
    mut output: W,
    lat: f64,
    lon: f64,
    radius: f64,
) -> Result<SearchSummary> {
    let geojson: geojson::GeoJson =
        serde_json::from_reader(input).context("Failed to parse GeoJSON")?;

    let geojson::GeoJson::FeatureCollection(collection) = geojson else {
        bail!("Expected a GeoJSON FeatureCollection");
    };

    let candidates = located_features(collection).context("Invalid feature in GeoJSON input")?;
    let total = candidates.len();

    let nearby = find_within_radius(lat, lon, radius, candidates);
    let matches = nearby.len();

    let result = geojson::GeoJson::FeatureCollection(nearby_feature_collection(nearby));
    serde_json::to_writer_pretty(&mut output, &result)?;
    output.flush()?;

    Ok(SearchSummary {
        candidates: total,
        matches,
    })
}

fn column(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .with_context(|| format!("Column '{}' not found in CSV", name))
}

fn parse_coordinate(record: &StringRecord, idx: usize, name: &str, line: usize) -> Result<f64> {
    let raw = record
        .get(idx)
        .with_context(|| format!("Missing '{}' on line {}", name, line))?;
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid '{}' on line {}: {}", name, line, raw))
}

/// Soft-delete flags as exported by PostgreSQL or spreadsheets.
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "1" | "yes"
    )
}

fn progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}
