//! Reading leads from and writing enriched leads to CSV.
//!
//! Rows are kept verbatim: the loader only extracts the company, website and
//! location views it needs, and the writer re-emits every original field
//! before the enrichment columns.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use leadmap_core::{EnrichedLead, Lead, ENRICHMENT_COLUMNS};
use thiserror::Error;

/// Header names recognised as the company column, in priority order.
const COMPANY_ALIASES: &[&str] = &[
    "company",
    "company name",
    "company_name",
    "organization_name",
    "business name",
    "name",
];

/// Header names recognised as the website column, in priority order.
const WEBSITE_ALIASES: &[&str] = &[
    "website",
    "website url",
    "website_url",
    "url",
    "organization_website_url",
];

#[derive(Debug, Error)]
pub(crate) enum CsvIoError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no {role} column found (looked for: {candidates})")]
    MissingColumn {
        role: &'static str,
        candidates: String,
    },

    #[error("input already has a \"{column}\" column, which the output appends")]
    ColumnCollision { column: String },
}

/// Explicit column names that override alias detection.
#[derive(Debug, Default, Clone)]
pub(crate) struct ColumnOverrides {
    pub company: Option<String>,
    pub website: Option<String>,
}

/// The loaded input: header row plus one [`Lead`] per data row.
#[derive(Debug)]
pub(crate) struct LeadTable {
    pub headers: Vec<String>,
    pub leads: Vec<Lead>,
}

/// Opens `path` and loads leads from it.
///
/// # Errors
///
/// Returns [`CsvIoError::Io`] if the file cannot be opened, otherwise see
/// [`load_leads`].
pub(crate) fn load_leads_from_path(
    path: &Path,
    limit: Option<usize>,
    overrides: &ColumnOverrides,
) -> Result<LeadTable, CsvIoError> {
    let file = File::open(path).map_err(|source| CsvIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_leads(file, limit, overrides)?;
    tracing::info!(path = %path.display(), rows = table.leads.len(), "loaded leads");
    Ok(table)
}

/// Reads a CSV with a header row into a [`LeadTable`], stopping after
/// `limit` data rows when given.
///
/// The company column is required. A missing website column is tolerated:
/// every lead gets an empty website, which never matches. Rows shorter than
/// the header are padded with empty fields so enrichment columns stay aligned.
///
/// # Errors
///
/// - [`CsvIoError::Csv`] on malformed CSV.
/// - [`CsvIoError::MissingColumn`] if no company column can be found, or an
///   explicitly requested column does not exist.
/// - [`CsvIoError::ColumnCollision`] if a header already uses one of the
///   enrichment column names.
pub(crate) fn load_leads<R: Read>(
    reader: R,
    limit: Option<usize>,
    overrides: &ColumnOverrides,
) -> Result<LeadTable, CsvIoError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
    if let Some(column) = ENRICHMENT_COLUMNS
        .iter()
        .find(|name| find_header(&headers, name).is_some())
    {
        return Err(CsvIoError::ColumnCollision {
            column: (*column).to_string(),
        });
    }

    let company_idx = resolve_column(
        &headers,
        "company",
        overrides.company.as_deref(),
        COMPANY_ALIASES,
    )?
    .ok_or_else(|| missing("company", None, COMPANY_ALIASES))?;

    let website_idx = resolve_column(
        &headers,
        "website",
        overrides.website.as_deref(),
        WEBSITE_ALIASES,
    )?;
    if website_idx.is_none() {
        tracing::warn!("input has no website column; no lead can be matched");
    }

    let city_idx = find_header(&headers, "city");
    let state_idx = find_header(&headers, "state");

    let mut leads = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        if limit.is_some_and(|n| i >= n) {
            break;
        }
        let record = result?;
        let row = i + 1;

        let mut fields: Vec<String> = record.iter().map(str::to_owned).collect();
        if fields.len() != headers.len() {
            tracing::warn!(
                row,
                fields = fields.len(),
                expected = headers.len(),
                "row width differs from header"
            );
        }
        if fields.len() < headers.len() {
            fields.resize(headers.len(), String::new());
        }

        let field = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| fields.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let company = field(Some(company_idx)).unwrap_or_default();
        let website = field(website_idx).unwrap_or_default();
        let location = field(city_idx).or_else(|| field(state_idx));

        leads.push(Lead {
            row,
            company,
            website,
            location,
            record: fields,
        });
    }

    Ok(LeadTable { headers, leads })
}

/// Writes the header plus enrichment column names, then one row per lead.
///
/// # Errors
///
/// Returns [`CsvIoError::Csv`] if serialization or the underlying writer fails.
pub(crate) fn write_enriched<W: Write>(
    writer: W,
    headers: &[String],
    rows: &[EnrichedLead],
) -> Result<(), CsvIoError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    let header_row = headers
        .iter()
        .map(String::as_str)
        .chain(ENRICHMENT_COLUMNS.iter().copied());
    wtr.write_record(header_row)?;

    for row in rows {
        wtr.write_record(row.output_record())?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the enriched table to it.
///
/// # Errors
///
/// Returns [`CsvIoError::Io`] if the file cannot be created, otherwise see
/// [`write_enriched`].
pub(crate) fn write_enriched_to_path(
    path: &Path,
    headers: &[String],
    rows: &[EnrichedLead],
) -> Result<(), CsvIoError> {
    let file = File::create(path).map_err(|source| CsvIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_enriched(file, headers, rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote enriched leads");
    Ok(())
}

/// `enhanced_<file name>` next to the input file.
pub(crate) fn default_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map_or_else(|| "leads.csv".into(), |n| n.to_string_lossy().into_owned());
    input.with_file_name(format!("enhanced_{file_name}"))
}

/// Finds the column index for `role`.
///
/// An explicit override must exist (error otherwise); without one, the first
/// alias present in the header wins, and `Ok(None)` means none was present.
fn resolve_column(
    headers: &[String],
    role: &'static str,
    explicit: Option<&str>,
    aliases: &[&str],
) -> Result<Option<usize>, CsvIoError> {
    if let Some(name) = explicit {
        return find_header(headers, name)
            .map(Some)
            .ok_or_else(|| missing(role, Some(name), aliases));
    }
    Ok(aliases.iter().find_map(|alias| find_header(headers, alias)))
}

fn find_header(headers: &[String], name: &str) -> Option<usize> {
    let wanted = name.trim();
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

fn missing(role: &'static str, explicit: Option<&str>, aliases: &[&str]) -> CsvIoError {
    let candidates = match explicit {
        Some(name) => format!("\"{name}\""),
        None => aliases.join(", "),
    };
    CsvIoError::MissingColumn { role, candidates }
}

#[cfg(test)]
#[path = "csv_io_test.rs"]
mod tests;
