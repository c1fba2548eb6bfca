use flate2::bufread::GzDecoder;
use log::debug;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Gzip magic bytes
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Capability to produce text lines from an input.
/// The scanner only depends on this capability, whatever the transport.
pub trait ReadableLineSource {
    /// Consumes all remaining content, line by line.
    /// Line terminators are removed, nothing else is trimmed.
    /// Invalid UTF-8 sequences are replaced.
    fn read_lines(&mut self) -> std::io::Result<Vec<String>>;
}

impl<R: BufRead> ReadableLineSource for R {
    fn read_lines(&mut self) -> std::io::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(1024);
        let mut buf = Vec::with_capacity(128);

        loop {
            buf.clear();

            if self.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }

            lines.push(String::from_utf8_lossy(&buf).into_owned());
        }

        Ok(lines)
    }
}

/// [FileDescriptor] to a RINEX input
pub enum FileDescriptor {
    /// Readable text file
    Plain(BufReader<File>),

    /// Gzip compressed file
    Gzip(BufReader<GzDecoder<BufReader<File>>>),
}

impl FileDescriptor {
    /// Opens the file located at `path`. Gzip compression is detected
    /// from the content (magic bytes), not the file name.
    pub fn open<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);

        let gzip = reader.fill_buf()?.starts_with(&GZIP_MAGIC);

        if gzip {
            debug!("{}: gzip compressed", path.display());
            Ok(Self::Gzip(BufReader::new(GzDecoder::new(reader))))
        } else {
            debug!("{}: plain text", path.display());
            Ok(Self::Plain(reader))
        }
    }

    /// True if this [FileDescriptor] is gzip compressed
    pub fn is_gzip(&self) -> bool {
        matches!(self, Self::Gzip(_))
    }
}

impl Read for FileDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            Self::Plain(r) => r.read(buf),
            Self::Gzip(r) => r.read(buf),
        }
    }
}

impl BufRead for FileDescriptor {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            Self::Plain(r) => r.fill_buf(),
            Self::Gzip(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Self::Plain(r) => r.consume(amt),
            Self::Gzip(r) => r.consume(amt),
        }
    }
}
