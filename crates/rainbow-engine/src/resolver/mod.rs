//! Per-tick resolvers: ephemeris output in, checked sky positions out.

pub mod bow;
pub mod position;

pub use bow::{resolve_bows, BowPoints};
pub use position::{angular_size_coefficient, resolve, CelestialObservation, SkyPositions};
