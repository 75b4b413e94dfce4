use crate::core::geometry::{antipode_of, Horizontal};
use crate::resolver::position::SkyPositions;

/// Centres of the rainbow (anti-solar) and moonbow (anti-lunar) arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BowPoints {
    pub rainbow: Horizontal,
    pub moonbow: Horizontal,
}

/// Derive both bow points. Pure; observations are already validated.
pub fn resolve_bows(sky: &SkyPositions) -> BowPoints {
    BowPoints {
        rainbow: antipode_of(sky.sun.horizontal()),
        moonbow: antipode_of(sky.moon.horizontal()),
    }
}
