//! Flat CSV projection of shop records, as read by the directory site's
//! static-data mode (`/data/eu_motorcycle_repairs.csv`).
//!
//! The file is maintained like the other sinks: rows are keyed by `id` and a
//! run only replaces the rows it produced, so rerunning a subset of countries
//! leaves every other country's rows in place.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use moto_core::ShopRecord;
use serde::{Deserialize, Serialize};

use crate::StoreError;

pub const CSV_HEADER: [&str; 12] = [
    "id",
    "name",
    "country_code",
    "lat",
    "lon",
    "city",
    "street",
    "housenumber",
    "postcode",
    "phone",
    "website",
    "email",
];

/// Field order must match [`CSV_HEADER`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CsvRow {
    id: i64,
    name: Option<String>,
    country_code: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    street: Option<String>,
    housenumber: Option<String>,
    postcode: Option<String>,
    phone: Option<String>,
    website: Option<String>,
    email: Option<String>,
}

impl From<&ShopRecord> for CsvRow {
    fn from(shop: &ShopRecord) -> Self {
        Self {
            id: shop.id,
            name: shop.name.clone(),
            country_code: shop.country_code.clone(),
            lat: shop.lat,
            lon: shop.lon,
            city: shop.address.city.clone(),
            street: shop.address.street.clone(),
            housenumber: shop.address.housenumber.clone(),
            postcode: shop.address.postcode.clone(),
            phone: shop.contact.phone.clone(),
            website: shop.contact.website.clone(),
            email: shop.contact.email.clone(),
        }
    }
}

/// Writes `records` as CSV, header first, absent values as empty cells.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if serialization or the underlying write fails.
pub fn write_csv<W: Write>(records: &[ShopRecord], writer: W) -> Result<usize, StoreError> {
    write_rows(records.iter().map(CsvRow::from), writer)
}

/// Upserts `records` into the CSV file at `path`, keyed by `id`.
///
/// Rows already in the file whose `id` is not in `records` are kept; rows
/// with a matching `id` are replaced. The result is ordered by `id`. When
/// `records` is empty an existing file is left untouched. Parent directories
/// are created as needed.
///
/// Returns the number of rows the file holds afterwards.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if the existing file cannot be parsed or the
/// new one cannot be written, or [`StoreError::Io`] on filesystem failures.
/// On error the existing file is not modified.
pub fn upsert_csv_file(records: &[ShopRecord], path: &Path) -> Result<usize, StoreError> {
    let mut rows = if path.exists() {
        read_rows(path)?
    } else {
        BTreeMap::new()
    };

    if records.is_empty() && path.exists() {
        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            "no new shops; CSV export left untouched"
        );
        return Ok(rows.len());
    }

    let existing = rows.len();
    for shop in records {
        rows.insert(shop.id, CsvRow::from(shop));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    // Write a sibling file first so a failed write cannot truncate the export.
    let staging = path.with_extension("csv.tmp");
    let total = write_rows(rows.into_values(), fs::File::create(&staging)?)?;
    fs::rename(&staging, path)?;

    tracing::info!(
        path = %path.display(),
        existing,
        upserted = records.len(),
        total,
        "updated CSV export"
    );
    Ok(total)
}

fn read_rows(path: &Path) -> Result<BTreeMap<i64, CsvRow>, StoreError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut rows = BTreeMap::new();
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        rows.insert(row.id, row);
    }
    Ok(rows)
}

fn write_rows<W, I>(rows: I, writer: W) -> Result<usize, StoreError>
where
    W: Write,
    I: IntoIterator<Item = CsvRow>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    let mut count = 0usize;
    for row in rows {
        wtr.serialize(row)?;
        count += 1;
    }
    wtr.flush()?;
    Ok(count)
}
