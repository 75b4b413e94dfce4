//! Horizontal-coordinate geometry: pure math, no engine dependencies.
//!
//! Angles are degrees at every public boundary; radians only appear inside
//! the trig calls. The dome frame has `y` up and `z` along the azimuth
//! reference (north), so azimuth 90° (east) lies on `+x`.

use glam::DVec3;

/// Altitude/azimuth pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Horizontal {
    /// Angle above (+) or below (−) the horizon, in [-90, 90].
    pub altitude: f64,
    /// Bearing from north through east, in [0, 360).
    pub azimuth: f64,
}

impl Horizontal {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }
}

/// Euler rotation in degrees, applied the way the renderer applies it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Wrap an azimuth into [0, 360).
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let wrapped = azimuth.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// The point opposite `(altitude, azimuth)` on the sky dome.
///
/// Altitude is negated; azimuth moves by half a turn. The azimuth branch
/// subtracts when it can so that the result is exact for every azimuth in
/// [180, 360), which makes `antipode(antipode(p)) == p` exact whenever the
/// forward addition is exact (any azimuth with a short binary expansion).
pub fn antipode(altitude: f64, azimuth: f64) -> (f64, f64) {
    let azimuth = normalize_azimuth(azimuth);
    let opposite = if azimuth >= 180.0 {
        azimuth - 180.0
    } else {
        let shifted = azimuth + 180.0;
        if shifted >= 360.0 {
            shifted - 360.0
        } else {
            shifted
        }
    };
    (-altitude, opposite)
}

/// Same as [`antipode`], on a [`Horizontal`].
pub fn antipode_of(point: Horizontal) -> Horizontal {
    let (altitude, azimuth) = antipode(point.altitude, point.azimuth);
    Horizontal { altitude, azimuth }
}

/// `(sin, cos)` of an angle in degrees, exact at multiples of 90°.
fn sin_cos_degrees(degrees: f64) -> (f64, f64) {
    let turns = degrees.rem_euclid(360.0);
    if turns == 0.0 {
        (0.0, 1.0)
    } else if turns == 90.0 {
        (1.0, 0.0)
    } else if turns == 180.0 {
        (0.0, -1.0)
    } else if turns == 270.0 {
        (-1.0, 0.0)
    } else {
        degrees.to_radians().sin_cos()
    }
}

/// Project a horizontal position onto a dome of the given radius.
///
/// `x = r·cos(alt)·sin(az)`, `y = r·sin(alt)`, `z = r·cos(alt)·cos(az)`.
/// The zenith maps to exactly `(0, r, 0)` regardless of azimuth.
pub fn to_cartesian(altitude: f64, azimuth: f64, radius: f64) -> DVec3 {
    let (sin_alt, cos_alt) = sin_cos_degrees(altitude);
    let (sin_az, cos_az) = sin_cos_degrees(azimuth);
    DVec3::new(
        radius * cos_alt * sin_az,
        radius * sin_alt,
        radius * cos_alt * cos_az,
    )
}

/// Rotation that turns a ring's normal towards `(altitude, azimuth)`.
pub fn orientation_for(altitude: f64, azimuth: f64) -> Orientation {
    Orientation {
        x: -altitude,
        y: azimuth,
        z: 0.0,
    }
}

/// Rotation for the back face of the same ring.
pub fn mirror_orientation(altitude: f64, azimuth: f64) -> Orientation {
    Orientation {
        x: -altitude + 180.0,
        y: azimuth,
        z: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn antipode_negates_altitude() {
        for i in -180..=180 {
            let alt = i as f64 * 0.5;
            let (a, _) = antipode(alt, 42.0);
            assert_eq!(a, -alt);
            let (back, _) = antipode(a, 222.0);
            assert_eq!(back, alt);
        }
    }

    #[test]
    fn antipode_azimuth_is_half_turn() {
        for i in 0..720 {
            let az = i as f64 * 0.5;
            let (_, opposite) = antipode(10.0, az);
            assert_eq!(opposite, (az + 180.0) % 360.0, "az = {az}");
            assert!((0.0..360.0).contains(&opposite));
        }
    }

    #[test]
    fn antipode_is_an_involution_on_grid() {
        for i in 0..1440 {
            let az = i as f64 * 0.25;
            let alt = (i as f64 * 0.125) % 90.0;
            let (a1, z1) = antipode(alt, az);
            let (a2, z2) = antipode(a1, z1);
            assert_eq!(a2, alt);
            assert_eq!(z2, az, "az = {az}");
        }
    }

    #[test]
    fn antipode_is_an_involution_within_tolerance() {
        for az in [0.1, 17.3333, 179.999_999, 180.000_001, 359.95, 271.828] {
            let (_, z1) = antipode(5.0, az);
            let (_, z2) = antipode(-5.0, z1);
            assert_abs_diff_eq!(z2, az, epsilon = 1e-10);
        }
    }

    #[test]
    fn antipode_wraps_unnormalised_azimuth() {
        let (_, z) = antipode(0.0, -90.0);
        assert_eq!(z, 90.0);
        let (_, z) = antipode(0.0, 540.0);
        assert_eq!(z, 0.0);
    }

    #[test]
    fn cartesian_stays_on_the_sphere() {
        let radius = 25.0;
        for alt_step in -18..=18 {
            for az_step in 0..72 {
                let alt = alt_step as f64 * 5.0 + 0.3;
                let az = az_step as f64 * 5.0 + 0.7;
                let p = to_cartesian(alt.clamp(-90.0, 90.0), az, radius);
                assert_abs_diff_eq!(p.length_squared(), radius * radius, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn zenith_is_degenerate_for_every_azimuth() {
        for az_step in 0..360 {
            let az = az_step as f64 + 0.5;
            let p = to_cartesian(90.0, az, 25.0);
            assert_eq!(p.x, 0.0);
            assert_eq!(p.y, 25.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn cardinal_directions() {
        let north = to_cartesian(0.0, 0.0, 1.0);
        assert_eq!(north, DVec3::new(0.0, 0.0, 1.0));
        let east = to_cartesian(0.0, 90.0, 1.0);
        assert_eq!(east, DVec3::new(1.0, 0.0, 0.0));
        let nadir = to_cartesian(-90.0, 123.0, 2.0);
        assert_eq!(nadir, DVec3::new(0.0, -2.0, 0.0));
    }

    #[test]
    fn antipode_lands_on_the_opposite_side_of_the_dome() {
        let p = to_cartesian(23.5, 141.0, 10.0);
        let (alt, az) = antipode(23.5, 141.0);
        let q = to_cartesian(alt, az, 10.0);
        assert_abs_diff_eq!((p + q).length(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn orientation_and_mirror_differ_by_half_turn_about_x() {
        let front = orientation_for(12.0, 200.0);
        let back = mirror_orientation(12.0, 200.0);
        assert_eq!(front, Orientation { x: -12.0, y: 200.0, z: 0.0 });
        assert_eq!(back.x - front.x, 180.0);
        assert_eq!(back.y, front.y);
        assert_eq!(back.z, 0.0);
    }
}
