//! Colormap source-file parsing and normalization.
//!
//! Source files are plain text: any number of header/comment lines, a
//! marker line, then one color sample per row as comma-separated numeric
//! fields (`R,G,B` or `R,G,B,A`). Channel values are normalized by the
//! table-wide maximum, so files may carry 0–255 bytes or 0–1 floats.

/// Everything up to and including the first line whose trimmed content
/// equals this marker is discarded as header.
pub const SAMPLE_MARKER: &str = "# R,G,B";

/// File extensions recognized by the directory scan.
pub const DATA_EXTENSIONS: &[&str] = &["csv", "txt"];

/// Errors produced while parsing a single colormap source file.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("missing `# R,G,B` marker line")]
    MissingMarker,
    #[error("no sample rows after the marker line")]
    NoSamples,
    #[error("line {line}: expected 3 or 4 comma-separated fields, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: expected {expected} fields as in the first sample row, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid numeric field `{field}`")]
    InvalidNumber { line: usize, field: String },
    #[error("line {line}: negative or non-finite value {value}")]
    ValueOutOfRange { line: usize, value: f32 },
}

/// Parse the raw numeric table from a source file.
///
/// Rows carry 3 (RGB) or 4 (RGBA) fields; the first data row fixes the
/// arity for the rest of the table. Blank lines in the body are skipped.
/// Negative and non-finite values are rejected so that normalization can
/// guarantee the [0, 1] range.
pub fn parse_table(src: &str) -> Result<Vec<Vec<f32>>, ParseError> {
    let mut lines = src.lines().enumerate();
    let mut found_marker = false;
    for (_, line) in lines.by_ref() {
        if line.trim() == SAMPLE_MARKER {
            found_marker = true;
            break;
        }
    }
    if !found_marker {
        return Err(ParseError::MissingMarker);
    }

    let mut rows: Vec<Vec<f32>> = Vec::new();
    for (index, line) in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lineno = index + 1;

        let mut row = Vec::with_capacity(4);
        for field in line.split(',') {
            let field = field.trim();
            let value: f32 = field.parse().map_err(|_| ParseError::InvalidNumber {
                line: lineno,
                field: field.to_owned(),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(ParseError::ValueOutOfRange {
                    line: lineno,
                    value,
                });
            }
            row.push(value);
        }

        if !(3..=4).contains(&row.len()) {
            return Err(ParseError::ColumnCount {
                line: lineno,
                found: row.len(),
            });
        }
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(ParseError::RaggedRow {
                    line: lineno,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ParseError::NoSamples);
    }
    Ok(rows)
}

/// Divide every value by the table-wide maximum.
///
/// A maximum of 0 (degenerate all-zero table) leaves the table unchanged,
/// avoiding division by zero. Runs before alpha padding so a synthesized
/// alpha is never scaled; a real fourth column is normalized together with
/// the color channels.
pub fn normalize(rows: &mut [Vec<f32>]) {
    let max = rows
        .iter()
        .flatten()
        .copied()
        .fold(0.0_f32, f32::max);
    if max <= 0.0 {
        return;
    }
    for row in rows.iter_mut() {
        for value in row.iter_mut() {
            *value /= max;
        }
    }
}

/// Parse, normalize, and pad a source file into RGBA samples.
///
/// Three-column rows get an opaque alpha of 1.0.
pub fn parse_samples(src: &str) -> Result<Vec<[f32; 4]>, ParseError> {
    let mut rows = parse_table(src)?;
    normalize(&mut rows);
    Ok(rows
        .into_iter()
        .map(|row| {
            let alpha = row.get(3).copied().unwrap_or(1.0);
            [row[0], row[1], row[2], alpha]
        })
        .collect())
}
