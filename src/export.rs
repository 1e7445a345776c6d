//! CSV serialization of the normalized table and the browser download link
//! built from it.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::entity::{DashboardError, NormalizedRow};

/// CSV column names, in `NormalizedRow` field order.
const CSV_HEADER: [&str; 9] = [
    "symbol",
    "name",
    "slug",
    "price",
    "market_cap",
    "volume_24h",
    "percent_change_1h",
    "percent_change_24h",
    "percent_change_7d",
];

/// Serializes rows to CSV text with a header line.
///
/// The header is written even for an empty table so the export is always a
/// well-formed CSV document.
pub fn to_csv(rows: &[NormalizedRow]) -> Result<String, DashboardError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| DashboardError::Csv(e.to_string()))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| DashboardError::Csv(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| DashboardError::Csv(e.to_string()))
}

/// Parses CSV text produced by [`to_csv`] back into rows.
pub fn from_csv(text: &str) -> Result<Vec<NormalizedRow>, DashboardError> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    reader
        .deserialize()
        .collect::<Result<Vec<NormalizedRow>, _>>()
        .map_err(|e| DashboardError::Csv(e.to_string()))
}

/// `data:` URI href for downloading the table as `crypto_data.csv` from a
/// rendered page.
pub fn download_href(rows: &[NormalizedRow]) -> Result<String, DashboardError> {
    let csv = to_csv(rows)?;
    Ok(format!("data:file/csv;base64,{}", STANDARD.encode(csv)))
}
