use glam::DVec3;
use log::info;

use super::series::{self, Ecliptic};
use super::{ApparentPlace, Body, Ephemeris, Time, Timescale};
use crate::core::location::GeoCoordinate;
use crate::error::{EphemerisError, EphemerisLoadError};

/// Kernel id of the built-in truncated analytic theories.
pub const DEFAULT_KERNEL: &str = "meeus-truncated";

/// WGS-84 equatorial radius, km.
const WGS84_A_KM: f64 = 6378.137;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257223563;

/// Validity span of the built-in kernel: 1900-01-01 to 2100-01-01 (TT Julian dates).
const DEFAULT_SPAN: (f64, f64) = (2_415_020.5, 2_488_069.5);

/// Ephemeris evaluated from periodic series instead of data files.
///
/// Load once at startup; evaluation is cheap and allocation-free.
#[derive(Debug, Clone)]
pub struct AnalyticEphemeris {
    start_jd: f64,
    end_jd: f64,
    timescale: Timescale,
}

impl AnalyticEphemeris {
    /// Resolve a kernel id into a ready ephemeris.
    pub fn load(kernel: &str, timescale: Timescale) -> Result<Self, EphemerisLoadError> {
        let (start_jd, end_jd) = match kernel {
            DEFAULT_KERNEL => DEFAULT_SPAN,
            other => return Err(EphemerisLoadError::UnknownKernel(other.to_string())),
        };
        Self::with_span(kernel, start_jd, end_jd, timescale)
    }

    /// Same series, narrower validity span.
    pub fn with_span(
        kernel: &str,
        start_jd: f64,
        end_jd: f64,
        timescale: Timescale,
    ) -> Result<Self, EphemerisLoadError> {
        if !(start_jd < end_jd) {
            return Err(EphemerisLoadError::EmptySpan {
                kernel: kernel.to_string(),
            });
        }
        info!("Loaded ephemeris kernel '{kernel}' (JD {start_jd:.1}..{end_jd:.1} TT)");
        Ok(Self {
            start_jd,
            end_jd,
            timescale,
        })
    }

    fn check_span(&self, time: &Time) -> Result<(), EphemerisError> {
        if time.tt_jd.is_finite() && time.tt_jd >= self.start_jd && time.tt_jd <= self.end_jd {
            Ok(())
        } else {
            Err(EphemerisError::OutOfRange {
                jd_tt: time.tt_jd,
                start_jd: self.start_jd,
                end_jd: self.end_jd,
            })
        }
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn timescale(&self) -> &Timescale {
        &self.timescale
    }

    fn observe(
        &self,
        body: Body,
        time: &Time,
        observer: &GeoCoordinate,
    ) -> Result<ApparentPlace, EphemerisError> {
        self.check_span(time)?;

        let t = time.centuries_tt();
        let nutation = series::nutation(t);
        let obliquity = series::mean_obliquity(t) + nutation.obliquity;

        let Ecliptic {
            longitude,
            latitude,
            distance_km,
        } = match body {
            Body::Sun => series::sun_apparent(t, &nutation),
            Body::Moon => series::moon_apparent(t, &nutation),
        };
        let (ra, dec) = series::ecliptic_to_equatorial(longitude, latitude, obliquity);
        let geocentric = unit_vector(ra, dec) * distance_km;

        let gast = series::apparent_sidereal_time(time.ut1_jd, &nutation, obliquity);
        let local_sidereal = gast + observer.longitude();

        // Shift the origin from Earth's centre to the observer (parallax)
        let topocentric = geocentric - site_vector(observer.latitude(), local_sidereal);
        let (altitude_deg, azimuth_deg) =
            horizon_angles(topocentric, observer.latitude(), local_sidereal);

        let place = ApparentPlace {
            altitude_deg,
            azimuth_deg,
            distance_km: topocentric.length(),
        };
        if !place.altitude_deg.is_finite() || !place.azimuth_deg.is_finite() {
            return Err(EphemerisError::NonFinite {
                body: body.name(),
                quantity: "direction",
            });
        }
        if !place.distance_km.is_finite() {
            return Err(EphemerisError::NonFinite {
                body: body.name(),
                quantity: "distance",
            });
        }
        Ok(place)
    }
}

/// Unit vector for right ascension / declination in degrees.
fn unit_vector(ra: f64, dec: f64) -> DVec3 {
    let (sin_ra, cos_ra) = ra.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec.to_radians().sin_cos();
    DVec3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Observer position in the equatorial frame of date, km, at zero height.
fn site_vector(latitude: f64, local_sidereal: f64) -> DVec3 {
    let (sin_phi, cos_phi) = latitude.to_radians().sin_cos();
    let (sin_th, cos_th) = local_sidereal.to_radians().sin_cos();
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let n = WGS84_A_KM / (1.0 - e2 * sin_phi * sin_phi).sqrt();

    let rho_cos = n * cos_phi;
    let rho_sin = n * (1.0 - e2) * sin_phi;
    DVec3::new(rho_cos * cos_th, rho_cos * sin_th, rho_sin)
}

/// Altitude and azimuth (north through east) of an equatorial-of-date vector.
fn horizon_angles(v: DVec3, latitude: f64, local_sidereal: f64) -> (f64, f64) {
    let (sin_phi, cos_phi) = latitude.to_radians().sin_cos();
    let (sin_th, cos_th) = local_sidereal.to_radians().sin_cos();

    // Rotate so x points at the local meridian and y due east
    let meridian = v.x * cos_th + v.y * sin_th;
    let east = -v.x * sin_th + v.y * cos_th;

    let up = cos_phi * meridian + sin_phi * v.z;
    let north = -sin_phi * meridian + cos_phi * v.z;

    let altitude = up.atan2(east.hypot(north)).to_degrees();
    let azimuth = east.atan2(north).to_degrees().rem_euclid(360.0);
    (altitude, azimuth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::Epoch;

    fn ephemeris() -> AnalyticEphemeris {
        AnalyticEphemeris::load(DEFAULT_KERNEL, Timescale::default()).unwrap()
    }

    fn observe(body: Body, epoch: Epoch, lat: f64, lon: f64) -> ApparentPlace {
        let eph = ephemeris();
        let time = eph.timescale().time(epoch);
        eph.observe(body, &time, &GeoCoordinate::new(lat, lon).unwrap())
            .unwrap()
    }

    #[test]
    fn unknown_kernel_fails_to_load() {
        let err = AnalyticEphemeris::load("de999", Timescale::default()).unwrap_err();
        assert_eq!(err, EphemerisLoadError::UnknownKernel("de999".to_string()));
    }

    #[test]
    fn empty_span_fails_to_load() {
        let err =
            AnalyticEphemeris::with_span("x", 10.0, 10.0, Timescale::default()).unwrap_err();
        assert!(matches!(err, EphemerisLoadError::EmptySpan { .. }));
    }

    #[test]
    fn time_outside_span_is_an_error() {
        let eph = ephemeris();
        let time = eph
            .timescale()
            .time(Epoch::from_gregorian_utc_hms(2150, 1, 1, 0, 0, 0));
        let err = eph
            .observe(Body::Sun, &time, &GeoCoordinate::default())
            .unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
    }

    #[test]
    fn equinox_fixture_at_null_island() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 3, 20, 12, 0, 0);
        let sun = observe(Body::Sun, epoch, 0.0, 0.0);
        assert_abs_diff_eq!(sun.altitude_deg, 88.1645, epsilon = 0.01);
        assert_abs_diff_eq!(sun.azimuth_deg, 85.3936, epsilon = 0.01);
        assert_abs_diff_eq!(sun.distance_km, 1.4899e8, epsilon = 1e5);

        let moon = observe(Body::Moon, epoch, 0.0, 0.0);
        assert_abs_diff_eq!(moon.altitude_deg, -40.1117, epsilon = 0.01);
        assert_abs_diff_eq!(moon.azimuth_deg, 59.7764, epsilon = 0.01);
        assert_abs_diff_eq!(moon.distance_km, 406_360.0, epsilon = 10.0);
    }

    #[test]
    fn equinox_noon_sun_is_near_zenith_on_the_equator() {
        // Solar noon at Greenwich is ~12:07 UTC on 2024-03-20
        let sun = observe(
            Body::Sun,
            Epoch::from_gregorian_utc_hms(2024, 3, 20, 12, 7, 0),
            0.0,
            0.0,
        );
        assert!(sun.altitude_deg > 89.5, "alt = {}", sun.altitude_deg);
    }

    #[test]
    fn midsummer_midnight_sun_depression_at_greenwich() {
        // Lowest sun at 51.48°N near the June solstice: 90 − 51.48 − 23.44 below the north horizon
        let sun = observe(
            Body::Sun,
            Epoch::from_gregorian_utc_hms(2024, 6, 21, 0, 0, 0),
            51.4769,
            -0.0005,
        );
        assert_abs_diff_eq!(sun.altitude_deg, -15.09, epsilon = 0.05);
        assert_abs_diff_eq!(sun.azimuth_deg, 359.567, epsilon = 0.01);
    }

    #[test]
    fn j2000_noon_sun_on_the_equator_is_due_south() {
        let sun = observe(
            Body::Sun,
            Epoch::from_gregorian_utc_hms(2000, 1, 1, 12, 0, 0),
            0.0,
            0.0,
        );
        // Declination −23.0°, close to transit
        assert_abs_diff_eq!(sun.altitude_deg, 66.95, epsilon = 0.05);
        assert_abs_diff_eq!(sun.azimuth_deg, 178.06, epsilon = 0.1);
    }

    #[test]
    fn moon_parallax_changes_distance_by_about_an_earth_radius() {
        let epoch = Epoch::from_gregorian_utc_hms(2024, 6, 21, 0, 0, 0);
        let eph = ephemeris();
        let time = eph.timescale().time(epoch);
        let t = time.centuries_tt();
        let geocentric = series::moon_geometric(t).distance_km;
        let topocentric = observe(Body::Moon, epoch, 51.4769, -0.0005).distance_km;
        let delta = geocentric - topocentric;
        assert!(delta.abs() < WGS84_A_KM, "delta = {delta}");
    }

    #[test]
    fn zenith_and_horizon_vectors() {
        // Observer on the equator facing LST 0: +x is straight up, +z is north, +y is east
        let (alt, _) = horizon_angles(DVec3::X, 0.0, 0.0);
        assert_abs_diff_eq!(alt, 90.0, epsilon = 1e-12);
        let (alt, az) = horizon_angles(DVec3::Z, 0.0, 0.0);
        assert_abs_diff_eq!(alt, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(az, 0.0, epsilon = 1e-12);
        let (_, az) = horizon_angles(DVec3::Y, 0.0, 0.0);
        assert_abs_diff_eq!(az, 90.0, epsilon = 1e-12);
    }

    #[test]
    fn site_vector_has_earth_radius() {
        let equator = site_vector(0.0, 0.0);
        assert_abs_diff_eq!(equator.length(), WGS84_A_KM, epsilon = 1e-9);
        let pole = site_vector(90.0, 0.0);
        assert_abs_diff_eq!(pole.length(), 6356.752, epsilon = 1e-3);
    }
}
