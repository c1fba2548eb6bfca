use itertools::Itertools;
use log::{debug, error, trace};

use crate::{
    classifier::{Classification, classify},
    ephemeris::{GpsEphemeris, RECORD_LINES},
    error::DecodeIssue,
    field::normalize,
    header::RinexDocument,
    prelude::SV,
};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
enum State {
    /// Looking for the start of a GPS record
    #[default]
    Scan,

    /// A GPS record for this PRN starts at the cursor
    TryRecord(i64),

    /// End of usable input
    Done,
}

/// Outcome of one decoding request
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    /// Decoded records, in file order
    pub records: Vec<GpsEphemeris>,

    /// Number of skipped (non GPS, non record) lines
    pub skipped: usize,

    /// Per record failures: line index and cause
    pub failures: Vec<(usize, DecodeIssue)>,

    /// Line index of the accepted record that could not be completed
    pub truncated: Option<usize>,
}

impl Report {
    /// Distinct satellites in this [Report], sorted.
    /// PRNs that are not satellite numbers are not listed.
    pub fn satellites(&self) -> Vec<SV> {
        self.records
            .iter()
            .filter_map(|eph| eph.sv())
            .unique()
            .sorted()
            .collect()
    }

    /// Turns this [Report] into its records
    pub fn into_records(self) -> Vec<GpsEphemeris> {
        self.records
    }
}

/// [Scanner] drives the line cursor through the body of a RINEX document.
/// Corrupt records never abort the scan: they are reported
/// and the cursor moves forward by a single line.
pub struct Scanner<'a, S: AsRef<str>> {
    lines: &'a [S],
    version: f64,
    cursor: usize,
    state: State,
    report: Report,
}

impl<'a, S: AsRef<str>> Scanner<'a, S> {
    /// Builds a new [Scanner] positioned at the start of the body
    pub fn new(lines: &'a [S], doc: &RinexDocument) -> Self {
        Self {
            lines,
            version: doc.version,
            cursor: doc.body_start,
            state: State::default(),
            report: Report::default(),
        }
    }

    /// Runs until the end of usable input
    pub fn run(mut self) -> Report {
        while self.state != State::Done {
            self.state = self.step();
        }

        debug!(
            "scan completed: {} record(s), {} skipped line(s), {} failure(s)",
            self.report.records.len(),
            self.report.skipped,
            self.report.failures.len()
        );

        self.report
    }

    fn step(&mut self) -> State {
        match self.state {
            State::Done => State::Done,
            State::Scan => {
                let Some(line) = self.lines.get(self.cursor) else {
                    return State::Done;
                };

                let line = line.as_ref();

                if line.trim().is_empty() {
                    self.cursor += 1;
                    return State::Scan;
                }

                match classify(&normalize(line), self.version) {
                    Ok(Classification::Accept(prn)) => State::TryRecord(prn),
                    Ok(Classification::Skip) => {
                        self.report.skipped += 1;
                        self.cursor += 1;
                        State::Scan
                    },
                    Err(e) => self.failure(e),
                }
            },
            State::TryRecord(prn) => {
                let end = self.cursor + RECORD_LINES;

                if end > self.lines.len() {
                    debug!(
                        "line #{}: G{:02} record truncated ({} line(s) remaining)",
                        self.cursor,
                        prn,
                        self.lines.len() - self.cursor
                    );
                    self.report.truncated = Some(self.cursor);
                    return State::Done;
                }

                match GpsEphemeris::assemble(&self.lines[self.cursor..end], prn, self.version) {
                    Ok(eph) => {
                        trace!("line #{}: decoded G{:02}", self.cursor, eph.sv_id);
                        self.report.records.push(eph);
                        self.cursor = end;
                        State::Scan
                    },
                    Err(e) => self.failure(e),
                }
            },
        }
    }

    /// Reports a record failure and moves forward by one line
    fn failure(&mut self, issue: DecodeIssue) -> State {
        error!("line #{}: {}", self.cursor, issue);
        self.report.failures.push((self.cursor, issue));
        self.cursor += 1;
        State::Scan
    }
}

/// Decodes all GPS records contained in these lines
pub fn decode_lines<S: AsRef<str>>(lines: &[S]) -> Report {
    let doc = RinexDocument::scan(lines);
    Scanner::new(lines, &doc).run()
}
