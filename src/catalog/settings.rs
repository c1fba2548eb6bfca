use std::path::PathBuf;

use hifitime::{Duration, Epoch, Unit};

/// Public IGS broadcast ephemeris mirror
pub const DEFAULT_MIRROR: &str = "https://igs.bkg.bund.de/root_ftp/IGS/BRDC";

/// Long (V3) file name prefixes, by order of preference
pub const DEFAULT_PREFIXES: [&str; 4] = ["BRDC00WRD_S", "BRDC00IGS_R", "BRD400DLR_S", "BRDM00DLR_S"];

/// Local directory where daily files are cached
pub const DEFAULT_DATA_DIR: &str = "ephemeris_data";

/// One candidate daily file
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Local (and remote) file name
    pub filename: String,

    /// Remote location
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Local cache directory
    pub data_dir: PathBuf,

    /// Remote mirror root
    pub mirror: String,

    /// Long file name prefixes (vendor/source), by order of preference
    pub prefixes: Vec<String>,

    /// Cached files younger than this are reused as is
    pub freshness: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            mirror: DEFAULT_MIRROR.to_string(),
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            freshness: Duration::from_hours(1.0),
        }
    }
}

impl Settings {
    /// Candidate daily files for the day `t` belongs to:
    /// all long (V3) names first, then the legacy (V2) name.
    pub fn candidates(&self, t: Epoch) -> Vec<Candidate> {
        let (year, doy) = year_day_of_year(t);

        let mut filenames = self
            .prefixes
            .iter()
            .map(|prefix| Self::v3_filename(prefix, year, doy))
            .collect::<Vec<_>>();

        filenames.push(Self::v2_filename(year, doy));

        filenames
            .into_iter()
            .map(|filename| Candidate {
                url: format!("{}/{}/{:03}/{}", self.mirror, year, doy, filename),
                filename,
            })
            .collect()
    }

    fn v3_filename(prefix: &str, year: i32, doy: u16) -> String {
        format!("{}_{}{:03}0000_01D_MN.rnx.gz", prefix, year, doy)
    }

    fn v2_filename(year: i32, doy: u16) -> String {
        format!("brdc{:03}0.{:02}n.gz", doy, year.rem_euclid(100))
    }
}

/// Returns (year, day of year) in UTC, day of year starting at 1
fn year_day_of_year(t: Epoch) -> (i32, u16) {
    let (y, m, d, _, _, _, _) = t.to_gregorian_utc();

    let jan1 = Epoch::from_gregorian_utc_at_midnight(y, 1, 1);
    let midnight = Epoch::from_gregorian_utc_at_midnight(y, m, d);

    let elapsed = (midnight - jan1).to_unit(Unit::Day).round() as u16;
    (y, elapsed + 1)
}
