use log::{debug, warn};

use crate::error::HeaderIssue;

/// Header terminator
const END_OF_HEADER: &str = "END OF HEADER";

/// Revision marker, revision is found in the first 9 columns of that line
const VERSION_TYPE: &str = "RINEX VERSION / TYPE";

/// Revision we fall back to when the header does not tell
pub const DEFAULT_VERSION: f64 = 2.0;

/// [RinexDocument] describes the header of one decoding request.
/// It only lives as long as the decoding does.
#[derive(Debug, Clone, PartialEq)]
pub struct RinexDocument {
    /// RINEX revision
    pub version: f64,

    /// Index of the first body line
    pub body_start: usize,

    /// Fallbacks applied while scanning the header
    pub issues: Vec<HeaderIssue>,
}

impl Default for RinexDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            body_start: 0,
            issues: Vec::new(),
        }
    }
}

impl RinexDocument {
    /// Scans the header section of given lines.
    /// This never fails: a malformed header resolves to the defaults
    /// (revision 2.0, body starting at line 0) and the issue is recorded.
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut doc = Self::default();
        let mut version_found = false;
        let mut terminated = false;

        for (i, line) in lines.iter().enumerate() {
            let line = line.as_ref();

            if line.contains(VERSION_TYPE) {
                version_found = true;
                let content = line.get(..line.len().min(9)).unwrap_or(line).trim();

                match content.parse::<f64>() {
                    Ok(version) => {
                        doc.version = version;
                    },
                    Err(_) => {
                        warn!("invalid revision \"{}\", assuming {:.2}", content, DEFAULT_VERSION);
                        doc.issues
                            .push(HeaderIssue::InvalidVersion(content.to_string()));
                    },
                }
            }

            if line.contains(END_OF_HEADER) {
                doc.body_start = i + 1;
                terminated = true;
                break;
            }
        }

        if !version_found {
            warn!("no revision marker, assuming {:.2}", DEFAULT_VERSION);
            doc.issues.push(HeaderIssue::MissingVersion);
        }

        if !terminated {
            warn!("no header terminator, considering entire input as body");
            doc.issues.push(HeaderIssue::MissingTerminator);
        }

        debug!(
            "RINEX v{:.2} - body starts at line #{}",
            doc.version, doc.body_start
        );

        doc
    }

    /// True for RINEX3 (and later) revisions
    pub fn is_v3(&self) -> bool {
        is_v3(self.version)
    }
}

/// True if given revision uses the RINEX3 record layout
pub(crate) fn is_v3(version: f64) -> bool {
    version >= 3.0
}
