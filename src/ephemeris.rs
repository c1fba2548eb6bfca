use serde::{Deserialize, Serialize};

use crate::{
    error::DecodeIssue,
    field::{field, integer, normalize},
    header::is_v3,
    prelude::{Constellation, SV},
};

/// Number of physical lines of one GPS record
pub const RECORD_LINES: usize = 8;

/// Width of every numeric field
const FIELD_WIDTH: usize = 19;

/// GPS broadcast ephemeris, as expected by A-GNSS consumers.
/// Field names and their order are the wire format.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsEphemeris {
    /// PRN number, passed through as found in the file
    pub sv_id: i64,

    /// Issue of Data (Ephemeris)
    pub iode: i64,

    /// Issue of Data (Clock)
    pub iodc: i64,

    /// Time of clock. Not decoded from the epoch field, always 0.
    pub toc: i64,

    /// Time of ephemeris (s of GPS week)
    pub toe: i64,

    /// Clock bias (s)
    pub af0: f64,

    /// Clock drift (s.s⁻¹)
    pub af1: f64,

    /// Clock drift rate (s.s⁻²)
    pub af2: f64,

    pub crs: f64,
    pub delta_n: f64,
    pub m0: f64,
    pub cuc: f64,
    pub cus: f64,
    pub crc: f64,
    pub cis: f64,
    pub cic: f64,
    pub i0: f64,
    pub idot: f64,
    pub omega0: f64,
    pub omega_dot: f64,
    pub sqrt_a: f64,

    /// Eccentricity
    pub e: f64,

    /// Argument of perigee (omega)
    pub w: f64,

    /// SV health
    pub health: i64,

    /// Total group delay (s)
    pub tgd: f64,

    /// GPS week number
    pub week: i64,
}

impl GpsEphemeris {
    /// Returns the [SV] this [GpsEphemeris] describes,
    /// None when the PRN cannot be a satellite number.
    pub fn sv(&self) -> Option<SV> {
        let prn = u8::try_from(self.sv_id).ok()?;
        Some(SV::new(Constellation::GPS, prn))
    }

    /// Assembles a [GpsEphemeris] from the 8 physical lines of one record.
    /// Lines do not need to be normalized.
    pub fn assemble<S: AsRef<str>>(
        lines: &[S],
        sv_id: i64,
        version: f64,
    ) -> Result<Self, DecodeIssue> {
        if lines.len() < RECORD_LINES {
            return Err(DecodeIssue::Truncated(lines.len()));
        }

        let lines = lines[..RECORD_LINES]
            .iter()
            .map(|line| normalize(line.as_ref()))
            .collect::<Vec<_>>();

        let layout = Layout::new(version);

        let (af0, af1, af2) = (
            field(&lines[0], 0, layout.clock[0], FIELD_WIDTH)?,
            field(&lines[0], 0, layout.clock[1], FIELD_WIDTH)?,
            field(&lines[0], 0, layout.clock[2], FIELD_WIDTH)?,
        );

        let [iode, crs, delta_n, m0] = layout.orbit(&lines, 1)?;
        let [cuc, e, cus, sqrt_a] = layout.orbit(&lines, 2)?;
        let [toe, cic, omega0, cis] = layout.orbit(&lines, 3)?;
        let [i0, crc, w, omega_dot] = layout.orbit(&lines, 4)?;
        let [idot, _l2_codes, week, _] = layout.orbit(&lines, 5)?;
        let [_accuracy, health, tgd, iodc] = layout.orbit(&lines, 6)?;

        Ok(Self {
            sv_id,
            iode: integer(iode, "iode")?,
            iodc: integer(iodc, "iodc")?,
            toc: 0,
            toe: integer(toe, "toe")?,
            af0,
            af1,
            af2,
            crs,
            delta_n,
            m0,
            cuc,
            cus,
            crc,
            cis,
            cic,
            i0,
            idot,
            omega0,
            omega_dot,
            sqrt_a,
            e,
            w,
            health: integer(health, "health")?,
            tgd,
            week: integer(week, "week")?,
        })
    }
}

/// Revision dependent column layout
struct Layout {
    /// Line indent of the broadcast orbits
    base: usize,

    /// Clock terms offsets on the first line
    clock: [usize; 3],
}

impl Layout {
    fn new(version: f64) -> Self {
        if is_v3(version) {
            Self {
                base: 4,
                clock: [23, 42, 61],
            }
        } else {
            Self {
                base: 3,
                clock: [22, 41, 60],
            }
        }
    }

    /// Decodes the 4 fields of a broadcast orbit line
    fn orbit(&self, lines: &[String], line_idx: usize) -> Result<[f64; 4], DecodeIssue> {
        let line = &lines[line_idx];
        let mut values = [0.0; 4];

        for (i, value) in values.iter_mut().enumerate() {
            *value = field(line, line_idx, self.base + i * FIELD_WIDTH, FIELD_WIDTH)?;
        }

        Ok(values)
    }
}

#[cfg(test)]
mod test {
    use super::GpsEphemeris;
    use crate::{
        error::DecodeIssue,
        prelude::{Constellation, SV},
    };

    const V2_RECORD: [&str; 8] = [
        " 1 25 12 04 12 00 00.0-4.600000000000E-04-1.000000000000E-11 0.000000000000E+00",
        "    1.000000000000E+02 2.000000000000E+02 4.000000000000E-09 1.500000000000E+00",
        "    3.000000000000E-06 5.000000000000E-03 6.000000000000E-06 5.153700000000E+03",
        "    4.320000000000E+05 8.000000000000E-08-2.000000000000E+00 9.000000000000E-08",
        "    9.500000000000E-01 2.500000000000E+02 1.500000000000E+00-7.000000000000E-09",
        "    5.000000000000E-10 0.000000000000E+00 2.395000000000E+03 0.000000000000E+00",
        "    2.000000000000E+00 0.000000000000E+00-5.000000000000E-09 1.000000000000E+02",
        "    0.000000000000E+00 0.000000000000E+00 0.000000000000E+00 0.000000000000E+00",
    ];

    const V3_RECORD: [&str; 8] = [
        "G01 2025 12 04 00 00 00 2.500000000000D-04-3.000000000000D-12 0.000000000000D+00",
        "     5.000000000000D+01-1.250000000000D+01 4.500000000000D-09-7.500000000000D-01",
        "    -6.500000000000D-07 1.100000000000D-02 8.000000000000D-06 5.153600000000D+03",
        "     3.456000000000D+05 1.300000000000D-07 2.100000000000D+00-3.700000000000D-08",
        "     9.600000000000D-01 2.300000000000D+02-1.700000000000D+00-8.100000000000D-09",
        "     1.200000000000D-10 1.000000000000D+00 2.395000000000D+03",
        "     2.000000000000D+00 0.000000000000D+00 5.100000000000D-09 5.000000000000D+01",
        "     4.300000000000D+05 4.000000000000D+00",
    ];

    #[test]
    fn rinex2_record() {
        let eph = GpsEphemeris::assemble(&V2_RECORD, 1, 2.10).unwrap();

        assert_eq!(eph.sv_id, 1);
        assert_eq!(eph.sv(), Some(SV::new(Constellation::GPS, 1)));
        assert_eq!(eph.af0, -4.6E-4);
        assert_eq!(eph.af1, -1.0E-11);
        assert_eq!(eph.af2, 0.0);
        assert_eq!(eph.iode, 100);
        assert_eq!(eph.crs, 200.0);
        assert_eq!(eph.delta_n, 4.0E-9);
        assert_eq!(eph.m0, 1.5);
        assert_eq!(eph.cuc, 3.0E-6);
        assert_eq!(eph.e, 5.0E-3);
        assert_eq!(eph.cus, 6.0E-6);
        assert_eq!(eph.sqrt_a, 5153.7);
        assert_eq!(eph.toe, 432000);
        assert_eq!(eph.cic, 8.0E-8);
        assert_eq!(eph.omega0, -2.0);
        assert_eq!(eph.cis, 9.0E-8);
        assert_eq!(eph.i0, 0.95);
        assert_eq!(eph.crc, 250.0);
        assert_eq!(eph.w, 1.5);
        assert_eq!(eph.omega_dot, -7.0E-9);
        assert_eq!(eph.idot, 5.0E-10);
        assert_eq!(eph.week, 2395);
        assert_eq!(eph.health, 0);
        assert_eq!(eph.tgd, -5.0E-9);
        assert_eq!(eph.iodc, 100);
        assert_eq!(eph.toc, 0);
    }

    #[test]
    fn rinex3_record() {
        let eph = GpsEphemeris::assemble(&V3_RECORD, 1, 3.04).unwrap();

        assert_eq!(eph.af0, 2.5E-4);
        assert_eq!(eph.af1, -3.0E-12);
        assert_eq!(eph.iode, 50);
        assert_eq!(eph.crs, -12.5);
        assert_eq!(eph.m0, -0.75);
        assert_eq!(eph.cuc, -6.5E-7);
        assert_eq!(eph.e, 0.011);
        assert_eq!(eph.sqrt_a, 5153.6);
        assert_eq!(eph.toe, 345600);
        assert_eq!(eph.omega0, 2.1);
        assert_eq!(eph.cis, -3.7E-8);
        assert_eq!(eph.crc, 230.0);
        assert_eq!(eph.w, -1.7);
        assert_eq!(eph.idot, 1.2E-10);
        assert_eq!(eph.week, 2395);
        assert_eq!(eph.tgd, 5.1E-9);
        assert_eq!(eph.iodc, 50);
        assert_eq!(eph.toc, 0);
    }

    #[test]
    fn out_of_range_prn() {
        let eph = GpsEphemeris::assemble(&V2_RECORD, -1, 2.10).unwrap();
        assert_eq!(eph.sv_id, -1);
        assert_eq!(eph.iode, 100);
        assert_eq!(eph.sv(), None);

        let eph = GpsEphemeris::assemble(&V3_RECORD, 300, 3.04).unwrap();
        assert_eq!(eph.sv_id, 300);
        assert_eq!(eph.sv(), None);
    }

    #[test]
    fn revision_dependent_layout() {
        // RINEX3 content interpreted with RINEX2 offsets is shifted by one column
        let nominal = GpsEphemeris::assemble(&V3_RECORD, 1, 3.04).unwrap();
        assert_ne!(GpsEphemeris::assemble(&V3_RECORD, 1, 2.11), Ok(nominal));
    }

    #[test]
    fn truncated_record() {
        assert_eq!(
            GpsEphemeris::assemble(&V2_RECORD[..5], 1, 2.10),
            Err(DecodeIssue::Truncated(5))
        );
    }

    #[test]
    fn non_finite_integer_field() {
        let mut lines = V2_RECORD.map(|line| line.to_string());
        lines[1] = "                   NaN 2.000000000000E+02 4.000000000000E-09 1.500000000000E+00"
            .to_string();

        // fields are 19 columns wide starting at column 3: NaN lands in the IODE field
        assert_eq!(
            GpsEphemeris::assemble(&lines, 1, 2.10),
            Err(DecodeIssue::NonFinite("iode"))
        );
    }
}
