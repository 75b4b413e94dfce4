//! Error types for the sky-position pipeline.
//!
//! Each failure domain gets its own enum so callers can decide where a
//! failure is absorbed: coordinate errors stay inside the time controller,
//! ephemeris errors stay inside the update loop, and everything else reaches
//! the host.

use thiserror::Error;

/// The ephemeris dataset could not be made available. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisLoadError {
    #[error("Unknown ephemeris kernel '{0}'")]
    UnknownKernel(String),

    #[error("Ephemeris kernel '{kernel}' has an empty validity span")]
    EmptySpan { kernel: String },
}

/// A body could not be resolved for one instant. Recovered per tick.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Julian date {jd_tt:.5} (TT) is outside the kernel validity span {start_jd:.1}..{end_jd:.1}")]
    OutOfRange {
        jd_tt: f64,
        start_jd: f64,
        end_jd: f64,
    },

    #[error("Ephemeris produced a non-finite {quantity} for the {body}")]
    NonFinite {
        body: &'static str,
        quantity: &'static str,
    },
}

/// Which of the two location text fields was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    Latitude,
    Longitude,
}

impl std::fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateField::Latitude => f.write_str("latitude"),
            CoordinateField::Longitude => f.write_str("longitude"),
        }
    }
}

/// Latitude/longitude text could not be turned into a coordinate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateParseError {
    #[error("The {field} '{text}' is not a decimal number")]
    NotANumber { field: CoordinateField, text: String },

    #[error("The {field} {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: CoordinateField,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Data that would turn into NaN geometry further down the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    #[error("Apparent distance {distance_km} km of the {body} does not exceed its radius {radius_km} km")]
    DistanceWithinBody {
        body: &'static str,
        distance_km: f64,
        radius_km: f64,
    },

    #[error("The {body} altitude {altitude} is outside [-90, 90]")]
    AltitudeOutOfRange { body: &'static str, altitude: f64 },
}

/// Why one body could not be resolved into an observation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("{0}")]
    Ephemeris(#[from] EphemerisError),

    #[error("{0}")]
    Invariant(#[from] InvariantViolation),
}

/// Anything that stops the tracker outright.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("{0}")]
    EphemerisLoad(#[from] EphemerisLoadError),

    #[error("{0}")]
    Invariant(#[from] InvariantViolation),

    #[error("Could not read the tracker config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Initial location in the config is invalid: {0}")]
    InitialLocation(#[from] CoordinateParseError),

    #[error("Could not read the wall clock: {0}")]
    WallClock(#[from] hifitime::Errors),
}
