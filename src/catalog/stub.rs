use flate2::{Compression, write::GzEncoder};

use std::{fs::File, io::Write, path::Path};

/// Synthetic stub file name
pub const STUB_FILENAME: &str = "dummy_ephemeris.rnx.gz";

/// Single GPS record (G01), RINEX2 layout
const STUB_CONTENT: &str = "     2.10           N: GPS NAV DATA                         RINEX VERSION / TYPE
                                                            END OF HEADER
 1 25 12 04 12 00 00.0-4.600000000000E-04-1.000000000000E-11 0.000000000000E+00
    1.000000000000E+02 2.000000000000E+02 4.000000000000E-09 1.500000000000E+00
    3.000000000000E-06 5.000000000000E-03 6.000000000000E-06 5.153700000000E+03
    4.320000000000E+05 8.000000000000E-08-2.000000000000E+00 9.000000000000E-08
    9.500000000000E-01 2.500000000000E+02 1.500000000000E+00-7.000000000000E-09
    5.000000000000E-10 0.000000000000E+00 2.395000000000E+03 0.000000000000E+00
    2.000000000000E+00 0.000000000000E+00-5.000000000000E-09 1.000000000000E+02
    0.000000000000E+00 0.000000000000E+00 0.000000000000E+00 0.000000000000E+00
";

/// Writes the gzip compressed stub file
pub fn write_stub(path: &Path) -> std::io::Result<()> {
    let fd = File::create(path)?;

    let compression = Compression::new(5);
    let mut encoder = GzEncoder::new(fd, compression);

    encoder.write_all(STUB_CONTENT.as_bytes())?;
    encoder.finish()?.sync_all()
}
