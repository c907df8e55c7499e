use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CarDataset, CarRecord};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file '{}' does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("failed to read parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("failed to decode parquet batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("column '{0}' could not be read as text")]
    UnreadableColumn(String),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a car dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma-delimited text with a header row (default)
/// * `.tsv`          – tab-delimited text with a header row
/// * `.json`         – `[{ "brand": "...", "model": "...", ... }, ...]`
/// * `.parquet`      – one row per listing, any scalar column types
pub fn load_file(path: &Path) -> Result<CarDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path)?,
        "json" => read_json(path)?,
        "tsv" => read_delimited(open(path)?, b'\t')?,
        _ => read_delimited(open(path)?, b',')?,
    };

    let dataset = clean(table)?;
    info!(
        "Loaded {} cars from {} ({} rows dropped)",
        dataset.len(),
        path.display(),
        dataset.dropped_rows
    );
    Ok(dataset)
}

/// Parse delimited text from any reader. Used by [`load_file`] and tests.
pub fn from_csv_reader<R: Read>(reader: R, delimiter: u8) -> Result<CarDataset, LoadError> {
    clean(read_delimited(reader, delimiter)?)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Raw table: every format is reduced to header + text cells
// ---------------------------------------------------------------------------

/// A row that could not be decoded at all is kept as `None` so cleaning can
/// count it as dropped.
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Option<Vec<String>>>,
}

fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let rows: Vec<Option<Vec<String>>> = reader
        .records()
        .enumerate()
        .map(|(row_no, result)| match result {
            Ok(record) => Some(record.iter().map(str::to_string).collect()),
            Err(err) => {
                debug!("row {}: unreadable record: {err}", row_no + 2);
                None
            }
        })
        .collect();

    Ok(RawTable { headers, rows })
}

/// Records-oriented JSON (`df.to_json(orient='records')`). Keys may differ
/// between objects; a key absent from an object reads as an empty cell.
fn read_json(path: &Path) -> Result<RawTable, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;
    let records = root.as_array().ok_or(LoadError::NotAnArray)?;

    let mut headers: Vec<String> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut objects = Vec::with_capacity(records.len());

    for rec in records {
        let Some(obj) = rec.as_object() else {
            objects.push(None);
            continue;
        };
        let mut cells = BTreeMap::new();
        for (key, val) in obj {
            let col = *index.entry(key.clone()).or_insert_with(|| {
                headers.push(key.clone());
                headers.len() - 1
            });
            cells.insert(col, json_to_text(val));
        }
        objects.push(Some(cells));
    }

    let width = headers.len();
    let rows: Vec<Option<Vec<String>>> = objects
        .into_iter()
        .map(|cells| {
            cells.map(|mut cells| {
                (0..width)
                    .map(|col| cells.remove(&col).unwrap_or_default())
                    .collect()
            })
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Every column is cast to UTF-8 so Parquet files written by Pandas or
/// Polars go through the same cleaning as text files.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut columns = Vec::with_capacity(batch.num_columns());
        for (idx, col) in batch.columns().iter().enumerate() {
            let text = arrow::compute::cast(col.as_ref(), &DataType::Utf8)?;
            if text.as_string_opt::<i32>().is_none() {
                return Err(LoadError::UnreadableColumn(headers[idx].clone()));
            }
            columns.push(text);
        }

        for row in 0..batch.num_rows() {
            let cells: Vec<String> = columns
                .iter()
                .map(|col| {
                    let strings = col.as_string::<i32>();
                    if strings.is_null(row) {
                        String::new()
                    } else {
                        strings.value(row).to_string()
                    }
                })
                .collect();
            rows.push(Some(cells));
        }
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Canonical column name and the header spellings accepted for it, after
/// [`normalize_header`].
const COLUMNS: [(&str, &[&str]); 7] = [
    ("brand", &["brand", "make"]),
    ("model", &["model", "name"]),
    ("price", &["price", "ex_showroom_price"]),
    ("fuel", &["fuel", "fuel_type"]),
    ("transmission", &["transmission", "transmission_type", "gearbox"]),
    ("body", &["body", "body_type"]),
    ("seats", &["seats", "seating_capacity", "num_seats"]),
];

/// `" Fuel Type "` → `"fuel_type"`.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

fn resolve_columns(headers: &[String]) -> Result<[usize; 7], LoadError> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
    let mut positions = [0usize; 7];
    for (slot, (name, aliases)) in positions.iter_mut().zip(COLUMNS.iter()) {
        *slot = normalized
            .iter()
            .position(|h| aliases.iter().any(|a| a == h))
            .ok_or(LoadError::MissingColumn(*name))?;
    }
    Ok(positions)
}

#[derive(Debug, Error, PartialEq)]
enum DropReason {
    #[error("unreadable record")]
    Unreadable,
    #[error("empty {0}")]
    Empty(&'static str),
    #[error("price '{0}' is not a non-negative number")]
    BadPrice(String),
    #[error("seats '{0}' is not a positive integer")]
    BadSeats(String),
}

fn clean(table: RawTable) -> Result<CarDataset, LoadError> {
    let cols = resolve_columns(&table.headers)?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;
    for (row_idx, row) in table.rows.iter().enumerate() {
        // +2: rows are 0-based and the header is row 1
        let row_num = row_idx + 2;
        match row.as_deref().ok_or(DropReason::Unreadable).and_then(|cells| parse_row(cells, &cols)) {
            Ok(rec) => records.push(rec),
            Err(reason) => {
                debug!("row {row_num}: dropped ({reason})");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        info!("Dropped {dropped} malformed rows during cleaning");
    }
    Ok(CarDataset::from_records(records, dropped))
}

fn parse_row(cells: &[String], cols: &[usize; 7]) -> Result<CarRecord, DropReason> {
    let cell = |i: usize| cells.get(cols[i]).map(|s| s.trim()).unwrap_or("");
    let required = |i: usize| {
        let value = cell(i);
        if value.is_empty() {
            Err(DropReason::Empty(COLUMNS[i].0))
        } else {
            Ok(value.to_string())
        }
    };

    let brand = required(0)?;
    let model = required(1)?;
    let price = parse_amount(cell(2))
        .filter(|p| *p >= 0.0)
        .ok_or_else(|| DropReason::BadPrice(cell(2).to_string()))?;
    let seats = parse_seats(cell(6)).ok_or_else(|| DropReason::BadSeats(cell(6).to_string()))?;

    Ok(CarRecord {
        brand,
        model,
        price,
        fuel: cell(3).to_string(),
        transmission: cell(4).to_string(),
        body: cell(5).to_string(),
        seats,
    })
}

/// Parse a money amount, ignoring currency symbols, thousands separators
/// and whitespace. Returns `None` for anything non-finite.
pub fn parse_amount(s: &str) -> Option<f64> {
    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, '$' | '₹' | ',') && !c.is_whitespace())
        .collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Seat counts may arrive as `"5"` or, from float columns, `"5.0"`.
fn parse_seats(s: &str) -> Option<u32> {
    let s = s.trim();
    let seats = match s.parse::<u32>() {
        Ok(n) => n,
        Err(_) => {
            let f = s.parse::<f64>().ok()?;
            if !f.is_finite() || f.fract() != 0.0 || f < 0.0 || f > u32::MAX as f64 {
                return None;
            }
            f as u32
        }
    };
    (seats > 0).then_some(seats)
}
