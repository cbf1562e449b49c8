use thiserror::Error;

use gnss::prelude::SV;
use hifitime::Epoch;

/// Errors that may rise while reading the source records
/// (RINEX navigation files, SEM almanacs).
#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("missing data")]
    MissingData,
    #[error("missing header delimiter")]
    MissingHeaderDelimiter,
    #[error("non supported RINEX revision \"{0}\"")]
    NonSupportedRevision(String),
    #[error("not a navigation RINEX")]
    NotNavigationRinex,
    #[error("invalid epoch \"{0}\"")]
    EpochParsing(String),
    #[error("invalid sv \"{0}\"")]
    SvParsing(String),
    #[error("invalid float \"{0}\"")]
    FloatParsing(String),
    #[error("invalid integer \"{0}\"")]
    IntegerParsing(String),
    #[error("truncated almanac entry")]
    TruncatedAlmanacEntry,
}

/// Encoding errors. Every variant is fatal: no partial
/// navigation message is ever returned.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{field}: {value} does not fit in {bits} bits (encoded range [{min}, {max}])")]
    FieldOverflow {
        field: &'static str,
        value: f64,
        bits: u8,
        min: i64,
        max: i64,
    },
    #[error("no ephemeris for {sv} at {epoch}")]
    NoEphemerisForEpoch { sv: SV, epoch: Epoch },
    #[error("invalid frame number {0} (expecting 1..=25)")]
    InvalidFrame(u8),
    #[error("malformed source record: {0}")]
    MalformedSourceRecord(#[from] ParsingError),
    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
