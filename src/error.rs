use thiserror::Error;

/// Call level [Error]. Only the input source and the catalog
/// may abort a decoding request, everything else is absorbed by the scanner.
#[derive(Debug, Error)]
pub enum Error {
    /// Input could not be opened, decompressed or read.
    #[error("source unavailable \"{path}\": {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog data directory could not be created.
    #[error("failed to create data directory \"{path}\": {source}")]
    DataDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Catalog failed to write the synthetic stub file.
    #[error("failed to write stub file: {0}")]
    Stub(#[source] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Record level issue. A [DecodeIssue] never aborts the scan:
/// the cursor moves forward by one line and scanning resumes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeIssue {
    #[error("invalid PRN \"{0}\"")]
    InvalidPrn(String),

    /// Column range is not addressable (slice would split a character)
    #[error("record line #{line}: columns {start}..{end} not addressable")]
    ColumnRange {
        line: usize,
        start: usize,
        end: usize,
    },

    #[error("record line #{line}: invalid float \"{field}\"")]
    InvalidFloat { line: usize, field: String },

    /// Integer field (IODE, IODC, ToE, week, health) is NaN or infinite
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),

    #[error("record requires 8 lines, only {0} available")]
    Truncated(usize),
}

/// Header level issue. Each one comes with a documented fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeaderIssue {
    /// No `END OF HEADER`: entire input is considered body.
    #[error("missing END OF HEADER marker")]
    MissingTerminator,

    /// No `RINEX VERSION / TYPE`: version defaults to 2.0.
    #[error("missing RINEX VERSION / TYPE")]
    MissingVersion,

    /// Unparsable version field: version defaults to 2.0.
    #[error("invalid revision \"{0}\"")]
    InvalidVersion(String),
}
