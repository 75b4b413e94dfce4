use crate::core::geometry::{normalize_azimuth, Horizontal};
use crate::core::time::AppState;
use crate::ephemeris::{ApparentPlace, Body, Ephemeris};
use crate::error::{InvariantViolation, ResolveError};

/// One body as seen from one place at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialObservation {
    /// Degrees, [-90, 90].
    pub altitude: f64,
    /// Degrees, [0, 360).
    pub azimuth: f64,
    /// Apparent angular size coefficient: `degrees(asin(radius / distance))`.
    /// A half-angle, used as a relative render scale.
    pub angular_size: f64,
}

impl CelestialObservation {
    pub fn horizontal(&self) -> Horizontal {
        Horizontal::new(self.altitude, self.azimuth)
    }
}

/// Sun and moon for a single tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyPositions {
    pub sun: CelestialObservation,
    pub moon: CelestialObservation,
}

/// Half-angle subtended by `body` at `distance_km`, in degrees.
///
/// A distance at or inside the body radius would push the arcsine out of its
/// domain, so it is reported instead of turning into NaN.
pub fn angular_size_coefficient(body: Body, distance_km: f64) -> Result<f64, InvariantViolation> {
    let radius_km = body.radius_km();
    if !(distance_km > radius_km) {
        return Err(InvariantViolation::DistanceWithinBody {
            body: body.name(),
            distance_km,
            radius_km,
        });
    }
    Ok((radius_km / distance_km).asin().to_degrees())
}

/// Turn a raw apparent place into a checked observation.
pub fn observation_from_place(
    body: Body,
    place: &ApparentPlace,
) -> Result<CelestialObservation, InvariantViolation> {
    if !(-90.0..=90.0).contains(&place.altitude_deg) {
        return Err(InvariantViolation::AltitudeOutOfRange {
            body: body.name(),
            altitude: place.altitude_deg,
        });
    }
    Ok(CelestialObservation {
        altitude: place.altitude_deg,
        azimuth: normalize_azimuth(place.azimuth_deg),
        angular_size: angular_size_coefficient(body, place.distance_km)?,
    })
}

/// Resolve sun and moon for the instant and location in `state`.
///
/// Stateless: the same state and ephemeris always give the same result.
pub fn resolve<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    state: &AppState,
) -> Result<SkyPositions, ResolveError> {
    let time = ephemeris.timescale().time(state.instant);

    let observe = |body: Body| -> Result<CelestialObservation, ResolveError> {
        let place = ephemeris.observe(body, &time, &state.location)?;
        Ok(observation_from_place(body, &place)?)
    };

    Ok(SkyPositions {
        sun: observe(Body::Sun)?,
        moon: observe(Body::Moon)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::location::GeoCoordinate;
    use crate::ephemeris::{AnalyticEphemeris, Time, Timescale, DEFAULT_KERNEL};
    use crate::error::EphemerisError;
    use approx::assert_abs_diff_eq;
    use hifitime::Epoch;

    /// Returns the same place for every body and time.
    struct StubEphemeris {
        timescale: Timescale,
        place: Result<ApparentPlace, EphemerisError>,
    }

    impl StubEphemeris {
        fn returning(place: Result<ApparentPlace, EphemerisError>) -> Self {
            Self {
                timescale: Timescale::default(),
                place,
            }
        }
    }

    impl Ephemeris for StubEphemeris {
        fn timescale(&self) -> &Timescale {
            &self.timescale
        }

        fn observe(
            &self,
            _body: Body,
            _time: &Time,
            _observer: &GeoCoordinate,
        ) -> Result<ApparentPlace, EphemerisError> {
            self.place.clone()
        }
    }

    fn state_at(epoch: Epoch, lat: f64, lon: f64) -> AppState {
        AppState {
            instant: epoch,
            running: true,
            location: GeoCoordinate::new(lat, lon).unwrap(),
        }
    }

    #[test]
    fn coefficient_is_a_half_angle() {
        // Sun at 1 AU subtends ~0.533°, half of that is ~0.2666°
        let size = angular_size_coefficient(Body::Sun, 149_597_870.7).unwrap();
        assert_abs_diff_eq!(size, 0.26645, epsilon = 1e-4);
    }

    #[test]
    fn coefficient_rejects_distance_inside_body() {
        let err = angular_size_coefficient(Body::Moon, 1000.0).unwrap_err();
        assert!(matches!(
            err,
            InvariantViolation::DistanceWithinBody { body: "moon", .. }
        ));
        assert!(angular_size_coefficient(Body::Moon, 1737.4).is_err());
        assert!(angular_size_coefficient(Body::Moon, f64::NAN).is_err());
    }

    #[test]
    fn azimuth_is_normalized() {
        let place = ApparentPlace {
            altitude_deg: 10.0,
            azimuth_deg: 360.0,
            distance_km: 384_400.0,
        };
        let obs = observation_from_place(Body::Moon, &place).unwrap();
        assert_eq!(obs.azimuth, 0.0);
        assert!(obs.angular_size > 0.0);
    }

    #[test]
    fn altitude_outside_range_is_an_invariant_violation() {
        let place = ApparentPlace {
            altitude_deg: 91.0,
            azimuth_deg: 0.0,
            distance_km: 384_400.0,
        };
        assert!(matches!(
            observation_from_place(Body::Moon, &place),
            Err(InvariantViolation::AltitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn ephemeris_failure_surfaces_as_ephemeris_error() {
        let stub = StubEphemeris::returning(Err(EphemerisError::OutOfRange {
            jd_tt: 0.0,
            start_jd: 1.0,
            end_jd: 2.0,
        }));
        let state = state_at(Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0), 0.0, 0.0);
        assert!(matches!(
            resolve(&stub, &state),
            Err(ResolveError::Ephemeris(EphemerisError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn degenerate_distance_surfaces_as_invariant() {
        let stub = StubEphemeris::returning(Ok(ApparentPlace {
            altitude_deg: 0.0,
            azimuth_deg: 0.0,
            distance_km: 10.0,
        }));
        let state = state_at(Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0), 0.0, 0.0);
        assert!(matches!(
            resolve(&stub, &state),
            Err(ResolveError::Invariant(_))
        ));
    }

    #[test]
    fn null_island_regression_fixture() {
        let eph = AnalyticEphemeris::load(DEFAULT_KERNEL, Timescale::default()).unwrap();
        let state = state_at(Epoch::from_gregorian_utc_hms(2024, 3, 20, 12, 0, 0), 0.0, 0.0);
        let sky = resolve(&eph, &state).unwrap();

        assert_abs_diff_eq!(sky.sun.altitude, 88.1645, epsilon = 0.01);
        assert_abs_diff_eq!(sky.sun.azimuth, 85.3936, epsilon = 0.01);
        assert_abs_diff_eq!(sky.sun.angular_size, 0.26754, epsilon = 1e-4);

        assert_abs_diff_eq!(sky.moon.altitude, -40.1117, epsilon = 0.01);
        assert_abs_diff_eq!(sky.moon.azimuth, 59.7764, epsilon = 0.01);
        assert_abs_diff_eq!(sky.moon.angular_size, 0.24497, epsilon = 1e-4);
    }

    #[test]
    fn each_body_keeps_its_own_size() {
        let eph = AnalyticEphemeris::load(DEFAULT_KERNEL, Timescale::default()).unwrap();
        let state = state_at(Epoch::from_gregorian_utc_hms(2024, 6, 21, 0, 0, 0), 51.4769, -0.0005);
        let sky = resolve(&eph, &state).unwrap();
        assert_abs_diff_eq!(sky.sun.angular_size, 0.26219, epsilon = 1e-4);
        assert_abs_diff_eq!(sky.moon.angular_size, 0.25971, epsilon = 1e-4);
    }
}
