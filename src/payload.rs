use serde::{Deserialize, Serialize};

use crate::{ephemeris::GpsEphemeris, error::Error};

/// [Payload] is the envelope A-GNSS consumers receive:
/// either a (possibly empty) list of ephemerides, or an explicit error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Payload {
    Success { data: Vec<GpsEphemeris> },
    Error { message: String },
}

impl Payload {
    /// Message served when no input could be obtained
    pub const UNAVAILABLE: &'static str = "Unavailable";

    /// Builds an "unavailable" [Payload::Error]
    pub fn unavailable() -> Self {
        Self::Error {
            message: Self::UNAVAILABLE.to_string(),
        }
    }

    /// Serializes this [Payload] to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, Error> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl From<Result<Vec<GpsEphemeris>, Error>> for Payload {
    fn from(result: Result<Vec<GpsEphemeris>, Error>) -> Self {
        match result {
            Ok(data) => Self::Success { data },
            Err(_) => Self::unavailable(),
        }
    }
}
