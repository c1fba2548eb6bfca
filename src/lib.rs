#![doc(
    html_logo_url = "https://raw.githubusercontent.com/nav-solutions/.github/master/logos/logo2.jpg"
)]
#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * BRDC2AGNSS is part of the nav-solutions framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al,
 * (cf. https://github.com/nav-solutions/brdc2agnss/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 *
 * Documentation: https://github.com/nav-solutions/brdc2agnss
 */

extern crate gnss_rs as gnss;

pub mod catalog;
pub mod classifier;
pub mod ephemeris;
pub mod error;
pub mod field;
pub mod header;
pub mod payload;
pub mod scanner;
pub mod source;

#[cfg(test)]
mod tests;

use log::debug;

use std::path::Path;

use crate::{
    ephemeris::GpsEphemeris,
    error::Error,
    scanner::{Report, decode_lines},
    source::{FileDescriptor, ReadableLineSource},
};

pub mod prelude {
    pub use crate::catalog::{Candidate, Catalog, Offline, Resolution, Retriever, Settings};
    pub use crate::ephemeris::GpsEphemeris;
    pub use crate::error::{DecodeIssue, Error, HeaderIssue};
    pub use crate::payload::Payload;
    pub use crate::scanner::{Report, decode_lines};
    pub use crate::source::{FileDescriptor, ReadableLineSource};
    pub use crate::{parse_file, parse_file_report, parse_source};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

/// Decodes all GPS ephemerides contained in this RINEX navigation file,
/// plain or gzip compressed. Only an unavailable source is an error:
/// a file without usable GPS records simply returns an empty list.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<GpsEphemeris>, Error> {
    Ok(parse_file_report(path)?.into_records())
}

/// Same as [parse_file], with the decoding diagnostics.
pub fn parse_file_report<P: AsRef<Path>>(path: P) -> Result<Report, Error> {
    let path = path.as_ref();

    let unavailable = |source: std::io::Error| Error::SourceUnavailable {
        path: path.display().to_string(),
        source,
    };

    let mut fd = FileDescriptor::open(path).map_err(unavailable)?;
    let report = parse_source(&mut fd).map_err(unavailable)?;

    debug!(
        "{}: {} record(s), {} failure(s)",
        path.display(),
        report.records.len(),
        report.failures.len()
    );

    Ok(report)
}

/// Decodes all GPS ephemerides this [ReadableLineSource] provides
pub fn parse_source<R: ReadableLineSource>(source: &mut R) -> std::io::Result<Report> {
    let lines = source.read_lines()?;
    Ok(decode_lines(&lines))
}
