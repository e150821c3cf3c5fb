//! Delimited-text dataset loader.
//!
//! Converts the raw bike-rental export into typed `BikeRecord`s: numeric
//! fields coerced, the `dd/mm/yyyy` date string kept for display alongside a
//! derived unix-seconds timestamp, a positional `index` attached, and any
//! trailing blank row dropped.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::{BikeRecord, Dataset, FunctioningDay, Holiday, Season};
use crate::error::{PlotError, PlotResult};

const EXPECTED_COLUMNS: usize = 14;

/// Loads a dataset from a delimited-text file on disk.
pub fn load_dataset(path: impl AsRef<Path>) -> PlotResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = parse_dataset(file)?;
    debug!(
        path = %path.display(),
        records = dataset.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Parses a dataset from any reader producing delimited text with a header row.
pub fn parse_dataset(reader: impl Read) -> PlotResult<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_len = csv_reader
        .headers()
        .map_err(|err| PlotError::DatasetLoad(err.to_string()))?
        .len();
    if header_len != EXPECTED_COLUMNS {
        return Err(PlotError::DatasetLoad(format!(
            "expected {EXPECTED_COLUMNS} columns, header has {header_len}"
        )));
    }

    let mut records = Vec::new();
    let mut skipped_blank = 0usize;
    for (row, result) in csv_reader.records().enumerate() {
        let raw = result.map_err(|err| PlotError::DatasetLoad(err.to_string()))?;

        // Exports commonly end with an empty line; drop it instead of failing.
        if raw.iter().all(|field| field.trim().is_empty()) {
            skipped_blank += 1;
            continue;
        }
        if raw.len() != EXPECTED_COLUMNS {
            return Err(PlotError::DatasetLoad(format!(
                "row {row}: expected {EXPECTED_COLUMNS} fields, found {}",
                raw.len()
            )));
        }

        records.push(parse_record(records.len(), row, &raw)?);
    }

    if skipped_blank > 0 {
        warn!(skipped_blank, "dropped blank rows while parsing dataset");
    }

    Dataset::new(records)
}

fn parse_record(index: usize, row: usize, raw: &csv::StringRecord) -> PlotResult<BikeRecord> {
    let date = raw[0].trim().to_owned();
    let timestamp = parse_date_timestamp(&date)
        .ok_or_else(|| PlotError::DatasetLoad(format!("row {row}: unparsable date `{date}`")))?;

    Ok(BikeRecord {
        index,
        date,
        timestamp,
        rented_bike_count: parse_numeric(row, "rented bike count", &raw[1])?,
        hour: parse_numeric(row, "hour", &raw[2])?,
        temperature: parse_numeric(row, "temperature", &raw[3])?,
        humidity: parse_numeric(row, "humidity", &raw[4])?,
        wind_speed: parse_numeric(row, "wind speed", &raw[5])?,
        visibility: parse_numeric(row, "visibility", &raw[6])?,
        dew_point_temperature: parse_numeric(row, "dew point temperature", &raw[7])?,
        solar_radiation: parse_numeric(row, "solar radiation", &raw[8])?,
        rainfall: parse_numeric(row, "rainfall", &raw[9])?,
        snowfall: parse_numeric(row, "snowfall", &raw[10])?,
        season: Season::parse(&raw[11])?,
        holiday: Holiday::parse(&raw[12])?,
        functioning_day: FunctioningDay::parse(&raw[13])?,
    })
}

fn parse_numeric(row: usize, field: &str, text: &str) -> PlotResult<f64> {
    let value: f64 = text.trim().parse().map_err(|_| {
        PlotError::DatasetLoad(format!("row {row}: field `{field}` is not numeric: `{text}`"))
    })?;
    if !value.is_finite() {
        return Err(PlotError::DatasetLoad(format!(
            "row {row}: field `{field}` must be finite"
        )));
    }
    Ok(value)
}

/// Derives the unix-seconds timestamp from a `dd/mm/yyyy` date string at
/// midnight UTC.
#[must_use]
pub fn parse_date_timestamp(date: &str) -> Option<i64> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").ok()?;
    Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().timestamp())
}
