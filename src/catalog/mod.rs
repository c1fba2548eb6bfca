//! Local catalog of daily broadcast navigation files
use log::{debug, info, warn};

use std::{
    fs,
    path::{Path, PathBuf},
};

use hifitime::{Duration, Epoch};

use crate::error::Error;

mod settings;
mod stub;

pub use settings::{Candidate, DEFAULT_DATA_DIR, DEFAULT_MIRROR, DEFAULT_PREFIXES, Settings};
pub use stub::STUB_FILENAME;

/// [Retriever] obtains a remote file and stores it locally.
/// `destination` should only exist once the retrieval has succeeded.
pub trait Retriever {
    fn retrieve(&self, url: &str, destination: &Path) -> std::io::Result<()>;
}

impl<F: Fn(&str, &Path) -> std::io::Result<()>> Retriever for F {
    fn retrieve(&self, url: &str, destination: &Path) -> std::io::Result<()> {
        self(url, destination)
    }
}

/// [Offline] [Retriever]: every attempt fails,
/// only the local cache (or the stub) is served.
#[derive(Debug, Default, Copy, Clone)]
pub struct Offline;

impl Retriever for Offline {
    fn retrieve(&self, url: &str, _: &Path) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            format!("offline: cannot retrieve {}", url),
        ))
    }
}

/// How the daily file was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Cached file, younger than the freshness window
    Fresh(PathBuf),

    /// Just retrieved
    Retrieved(PathBuf),

    /// Cached file, older than the freshness window, every retrieval failed
    Stale(PathBuf),

    /// Synthetic single record file, nothing else was available
    Stub(PathBuf),
}

impl Resolution {
    pub fn path(&self) -> &Path {
        match self {
            Self::Fresh(path) | Self::Retrieved(path) | Self::Stale(path) | Self::Stub(path) => {
                path
            },
        }
    }
}

/// [Catalog] of daily broadcast navigation files
pub struct Catalog<R: Retriever> {
    /// [Settings]
    pub settings: Settings,

    /// [Retriever]
    retriever: R,
}

impl Catalog<Offline> {
    /// Builds an offline [Catalog]
    pub fn offline(settings: Settings) -> Self {
        Self::new(settings, Offline)
    }
}

impl<R: Retriever> Catalog<R> {
    pub fn new(settings: Settings, retriever: R) -> Self {
        Self {
            settings,
            retriever,
        }
    }

    /// Resolves the daily file for the day `t` belongs to.
    /// Candidates are tried in order: a fresh cached copy is used as is,
    /// otherwise a retrieval is attempted. When every attempt failed,
    /// the first stale cached copy is preferred over the synthetic stub.
    pub fn resolve(&self, t: Epoch) -> Result<Resolution, Error> {
        let data_dir = &self.settings.data_dir;

        fs::create_dir_all(data_dir).map_err(|source| Error::DataDir {
            path: data_dir.display().to_string(),
            source,
        })?;

        let mut stale = Option::<PathBuf>::None;

        for candidate in self.settings.candidates(t) {
            let path = data_dir.join(&candidate.filename);

            if let Some(age) = Self::age(&path) {
                if age < self.settings.freshness {
                    info!("{} is fresh ({} old)", candidate.filename, age);
                    return Ok(Resolution::Fresh(path));
                }

                info!("{} is stale ({} old)", candidate.filename, age);

                if stale.is_none() {
                    stale = Some(path.clone());
                }
            }

            debug!("retrieving {} from {}", candidate.filename, candidate.url);

            match self.retriever.retrieve(&candidate.url, &path) {
                Ok(_) => {
                    info!("retrieved {}", candidate.filename);
                    return Ok(Resolution::Retrieved(path));
                },
                Err(e) => {
                    warn!("failed to retrieve {}: {}", candidate.filename, e);
                },
            }
        }

        if let Some(path) = stale {
            warn!("all retrievals failed, using stale {}", path.display());
            return Ok(Resolution::Stale(path));
        }

        let path = data_dir.join(STUB_FILENAME);
        warn!("all retrievals failed, creating {}", path.display());

        stub::write_stub(&path).map_err(Error::Stub)?;
        Ok(Resolution::Stub(path))
    }

    /// Age of the local file, None if it does not exist
    fn age(path: &Path) -> Option<Duration> {
        let modified = fs::metadata(path).ok()?.modified().ok()?;

        // modification date in the future: brand new
        let elapsed = modified.elapsed().unwrap_or_default();

        Some(Duration::from_seconds(elapsed.as_secs_f64()))
    }
}
