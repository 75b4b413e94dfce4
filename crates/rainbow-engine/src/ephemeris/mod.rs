//! Ephemeris service: where the sun and moon appear for an observer.
//!
//! The pipeline only talks to the [`Ephemeris`] trait. [`AnalyticEphemeris`]
//! is the built-in implementation; anything backed by real kernel files can
//! slot in behind the same trait.

pub mod analytic;
pub mod series;
pub mod timescale;

pub use analytic::{AnalyticEphemeris, DEFAULT_KERNEL};
pub use timescale::{Time, Timescale};

use crate::core::location::GeoCoordinate;
use crate::error::EphemerisError;

/// Bodies the tracker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Physical radius in kilometres.
    pub const fn radius_km(self) -> f64 {
        match self {
            Body::Sun => 695_700.0,
            Body::Moon => 1_737.4,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
        }
    }
}

/// Topocentric apparent place of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    /// Degrees above the horizon, no refraction.
    pub altitude_deg: f64,
    /// Degrees from north through east, in [0, 360).
    pub azimuth_deg: f64,
    /// Distance from the observer in kilometres.
    pub distance_km: f64,
}

/// The contract an ephemeris backend must fulfil.
pub trait Ephemeris {
    /// Time-scale converter matching this ephemeris.
    fn timescale(&self) -> &Timescale;

    /// Apparent horizontal place of `body` for `observer` at `time`.
    fn observe(
        &self,
        body: Body,
        time: &Time,
        observer: &GeoCoordinate,
    ) -> Result<ApparentPlace, EphemerisError>;
}
