use std::str::FromStr;

use log::trace;

use crate::{error::DecodeIssue, header::is_v3, prelude::Constellation};

/// Outcome of the record classification
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Classification {
    /// GPS record for this PRN starts on this line
    Accept(i64),

    /// Not the start of a GPS record: move forward by one line.
    /// Foreign records are not measured, each of their lines is skipped
    /// on its own.
    Skip,
}

/// Classifies the (normalized) first line of a candidate record.
///
/// RINEX3: first 3 columns hold the constellation letter and the PRN (`G07`).
/// RINEX2: first 2 columns hold the PRN alone, GPS navigation files
/// only contain GPS records.
pub fn classify(line: &str, version: f64) -> Result<Classification, DecodeIssue> {
    if is_v3(version) {
        let code = columns(line, 3);

        let Some(prn) = code.strip_prefix('G') else {
            if let Some(letter) = code.get(..1) {
                match Constellation::from_str(letter) {
                    Ok(constellation) => trace!("skipping {} line", constellation),
                    Err(_) => trace!("skipping \"{}\" line", code),
                }
            }
            return Ok(Classification::Skip);
        };

        let prn = prn
            .trim()
            .parse::<i64>()
            .map_err(|_| DecodeIssue::InvalidPrn(code.to_string()))?;

        Ok(Classification::Accept(prn))
    } else {
        match columns(line, 2).parse::<i64>() {
            Ok(prn) => Ok(Classification::Accept(prn)),
            Err(_) => Ok(Classification::Skip),
        }
    }
}

/// Returns the first `n` columns, trimmed
fn columns(line: &str, n: usize) -> &str {
    let mut end = line.len().min(n);
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    line[..end].trim()
}

#[cfg(test)]
mod test {
    use super::{Classification, classify};
    use crate::error::DecodeIssue;
    use rstest::*;

    #[rstest]
    #[case("G01 2025 12 04 00 00 00 2.500000000000E-04", Classification::Accept(1))]
    #[case("G07 2025 12 04 02 00 00", Classification::Accept(7))]
    #[case("G32 2025 12 04 02 00 00", Classification::Accept(32))]
    #[case("G 5 2025 12 04 02 00 00", Classification::Accept(5))]
    #[case("G99 2025 12 04 02 00 00", Classification::Accept(99))]
    #[case("G-1 2025 12 04 02 00 00", Classification::Accept(-1))]
    #[case("R05 2025 12 04 00 15 00", Classification::Skip)]
    #[case("E11 2025 12 04 00 10 00", Classification::Skip)]
    #[case("C20 2025 12 04 00 10 00", Classification::Skip)]
    #[case("J01 2025 12 04 00 10 00", Classification::Skip)]
    #[case("S23 2025 12 04 00 10 00", Classification::Skip)]
    #[case("     5.000000000000E+01-1.250000000000E+01", Classification::Skip)]
    #[case("", Classification::Skip)]
    fn rinex3(#[case] line: &str, #[case] expected: Classification) {
        assert_eq!(classify(line, 3.04), Ok(expected));
    }

    #[test]
    fn rinex3_invalid_prn() {
        assert_eq!(
            classify("GXX 2025 12 04 00 00 00", 3.0),
            Err(DecodeIssue::InvalidPrn("GXX".to_string()))
        );
    }

    #[rstest]
    #[case(" 1 25 12  4  0  0  0.0-4.600000000000E-04", Classification::Accept(1))]
    #[case("12 25 12  4  6  0  0.0", Classification::Accept(12))]
    #[case("-1 25 12  4  6  0  0.0", Classification::Accept(-1))]
    #[case("    1.000000000000E+02 2.000000000000E+02", Classification::Skip)]
    #[case("   -5.000000000000E-09", Classification::Skip)]
    #[case("G01 2025 12 04 00 00 00", Classification::Skip)]
    #[case("", Classification::Skip)]
    fn rinex2(#[case] line: &str, #[case] expected: Classification) {
        assert_eq!(classify(line, 2.10), Ok(expected));
    }
}
