//! Fixed width numeric fields
use crate::error::DecodeIssue;

/// RINEX uses the Fortran `D` exponent marker.
/// Every physical line of a record goes through [normalize] before
/// any field is extracted.
pub fn normalize(line: &str) -> String {
    line.replace('D', "E")
}

/// Decodes the float value located at `start..start+width` of given `line`.
/// `line_idx` is the index of this line within its record and is only used
/// to describe the [DecodeIssue].
///
/// The column range is clamped to the line length, so a short line
/// (trailing fields omitted) yields empty fields. Empty fields are `0.0`.
pub fn field(line: &str, line_idx: usize, start: usize, width: usize) -> Result<f64, DecodeIssue> {
    let end = (start + width).min(line.len());
    let start = start.min(end);

    let content = line.get(start..end).ok_or(DecodeIssue::ColumnRange {
        line: line_idx,
        start,
        end,
    })?;

    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Ok(0.0);
    }

    trimmed
        .parse::<f64>()
        .map_err(|_| DecodeIssue::InvalidFloat {
            line: line_idx,
            field: trimmed.to_string(),
        })
}

/// Truncates (toward zero) a decoded float into an integer field.
pub fn integer(value: f64, name: &'static str) -> Result<i64, DecodeIssue> {
    if !value.is_finite() {
        return Err(DecodeIssue::NonFinite(name));
    }
    Ok(value.trunc() as i64)
}
