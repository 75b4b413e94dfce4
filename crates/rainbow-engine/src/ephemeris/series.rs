//! Periodic series for the sun and moon: pure math, no engine dependencies.
//!
//! All functions take `t`, Julian centuries of TT from J2000.0, and return
//! degrees (kilometres for distances). Sources: the low-accuracy solar theory
//! and the truncated ELP-2000/82 lunar theory as tabulated in Meeus,
//! *Astronomical Algorithms* (2nd ed.), chapters 22, 25, 47.

const J2000_JD: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
pub const AU_KM: f64 = 149_597_870.7;

/// Mean Earth–Moon distance of the lunar series, km.
const MOON_MEAN_DISTANCE_KM: f64 = 385_000.56;
/// Constant of aberration divided by the sun's distance gives the correction, arcsec·AU.
const ABERRATION_ARCSEC_AU: f64 = 20.4898;

/// Ecliptic position of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecliptic {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
}

/// Nutation in longitude (Δψ) and obliquity (Δε), degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

/// Julian centuries from J2000.0 for a Julian date.
pub fn centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

fn wrap_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Low-precision nutation (four terms, ~0.5" in Δψ, ~0.1" in Δε).
pub fn nutation(t: f64) -> Nutation {
    let omega = (125.04452 - 1934.136261 * t + 0.0020708 * t * t + t * t * t / 450_000.0)
        .to_radians();
    let sun_mean = (280.4665 + 36_000.7698 * t).to_radians();
    let moon_mean = (218.3165 + 481_267.8813 * t).to_radians();

    let d_psi = -17.20 * omega.sin() - 1.32 * (2.0 * sun_mean).sin()
        - 0.23 * (2.0 * moon_mean).sin()
        + 0.21 * (2.0 * omega).sin();
    let d_eps = 9.20 * omega.cos() + 0.57 * (2.0 * sun_mean).cos()
        + 0.10 * (2.0 * moon_mean).cos()
        - 0.09 * (2.0 * omega).cos();

    Nutation {
        longitude: d_psi / 3600.0,
        obliquity: d_eps / 3600.0,
    }
}

/// Mean obliquity of the ecliptic (IAU 1980), degrees.
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + arcsec / 3600.0
}

/// Greenwich mean sidereal time for a UT1 Julian date, degrees.
pub fn mean_sidereal_time(ut1_jd: f64) -> f64 {
    let d = ut1_jd - J2000_JD;
    let t = d / DAYS_PER_CENTURY;
    wrap_degrees(
        280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Greenwich apparent sidereal time: mean time plus the equation of the equinoxes.
pub fn apparent_sidereal_time(ut1_jd: f64, nutation: &Nutation, true_obliquity: f64) -> f64 {
    wrap_degrees(
        mean_sidereal_time(ut1_jd) + nutation.longitude * true_obliquity.to_radians().cos(),
    )
}

/// Ecliptic (λ, β) to equatorial (α, δ), degrees.
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> (f64, f64) {
    let (sin_l, cos_l) = longitude.to_radians().sin_cos();
    let (sin_e, cos_e) = obliquity.to_radians().sin_cos();
    let b = latitude.to_radians();

    let ra = (sin_l * cos_e - b.tan() * sin_e).atan2(cos_l);
    let dec = (b.sin() * cos_e + b.cos() * sin_e * sin_l).asin();
    (wrap_degrees(ra.to_degrees()), dec.to_degrees())
}

/// Geometric ecliptic position of the sun. Accurate to ~0.01°.
pub fn sun_geometric(t: f64) -> Ecliptic {
    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;
    let m_rad = m.to_radians();

    // Equation of centre
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m_rad.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m_rad).sin()
        + 0.000289 * (3.0 * m_rad).sin();

    let true_anomaly = (m + c).to_radians();
    let r_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    Ecliptic {
        longitude: wrap_degrees(l0 + c),
        latitude: 0.0,
        distance_km: r_au * AU_KM,
    }
}

/// Apparent ecliptic position of the sun: nutation and annual aberration applied.
pub fn sun_apparent(t: f64, nutation: &Nutation) -> Ecliptic {
    let geometric = sun_geometric(t);
    let r_au = geometric.distance_km / AU_KM;
    Ecliptic {
        longitude: wrap_degrees(
            geometric.longitude + nutation.longitude - ABERRATION_ARCSEC_AU / 3600.0 / r_au,
        ),
        ..geometric
    }
}

/// Multiples of (D, M, M', F) with the longitude (1e-6 deg) and distance (1e-3 km)
/// coefficients.
const MOON_LONGITUDE_DISTANCE: [(i8, i8, i8, i8, f64, f64); 60] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
    (0, 1, 2, 0, -2_120.0, 5_751.0),
    (0, 2, 0, 0, -2_069.0, 0.0),
    (2, -2, -1, 0, 2_048.0, -4_950.0),
    (2, 0, 1, -2, -1_773.0, 4_130.0),
    (2, 0, 0, 2, -1_595.0, 0.0),
    (4, -1, -1, 0, 1_215.0, -3_958.0),
    (0, 0, 2, 2, -1_110.0, 0.0),
    (3, 0, -1, 0, -892.0, 3_258.0),
    (2, 1, 1, 0, -810.0, 2_616.0),
    (4, -1, -2, 0, 759.0, -1_897.0),
    (0, 2, -1, 0, -713.0, -2_117.0),
    (2, 2, -1, 0, -700.0, 2_354.0),
    (2, 1, -2, 0, 691.0, 0.0),
    (2, -1, 0, -2, 596.0, 0.0),
    (4, 0, 1, 0, 549.0, -1_423.0),
    (0, 0, 4, 0, 537.0, -1_117.0),
    (4, -1, 0, 0, 520.0, -1_571.0),
    (1, 0, -2, 0, -487.0, -1_739.0),
    (2, 1, 0, -2, -399.0, 0.0),
    (0, 0, 2, -2, -381.0, -4_421.0),
    (1, 1, 1, 0, 351.0, 0.0),
    (3, 0, -2, 0, -340.0, 0.0),
    (4, 0, -3, 0, 330.0, 0.0),
    (2, -1, 2, 0, 327.0, 0.0),
    (0, 2, 1, 0, -323.0, 1_165.0),
    (1, 1, -1, 0, 299.0, 0.0),
    (2, 0, 3, 0, 294.0, 0.0),
    (2, 0, -1, -2, 0.0, 8_752.0),
];

/// Multiples of (D, M, M', F) with the latitude coefficient (1e-6 deg).
const MOON_LATITUDE: [(i8, i8, i8, i8, f64); 60] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
    (0, 0, 0, 3, -1_749.0),
    (0, 1, -1, 1, -1_565.0),
    (1, 0, 0, 1, -1_491.0),
    (0, 1, 1, 1, -1_475.0),
    (0, 1, 1, -1, -1_410.0),
    (0, 1, 0, -1, -1_344.0),
    (1, 0, 0, -1, -1_335.0),
    (0, 0, 3, 1, 1_107.0),
    (4, 0, 0, -1, 1_021.0),
    (4, 0, -1, 1, 833.0),
    (0, 0, 1, -3, 777.0),
    (4, 0, -2, 1, 671.0),
    (2, 0, 0, -3, 607.0),
    (2, 0, 2, -1, 596.0),
    (2, -1, 1, -1, 491.0),
    (2, 0, -2, 1, -451.0),
    (0, 0, 3, -1, 439.0),
    (2, 0, 2, 1, 422.0),
    (2, 0, -3, -1, 421.0),
    (2, 1, -1, 1, -366.0),
    (2, 1, 0, 1, -351.0),
    (4, 0, 0, 1, 331.0),
    (2, -1, 1, 1, 315.0),
    (2, -2, 0, -1, 302.0),
    (0, 0, 1, 3, -283.0),
    (2, 1, 1, -1, -229.0),
    (1, 1, 0, -1, 223.0),
    (1, 1, 0, 1, 223.0),
    (0, 1, -2, -1, -220.0),
    (2, 1, -1, -1, -220.0),
    (1, 0, 1, 1, -185.0),
    (2, -1, -2, -1, 181.0),
    (0, 1, 2, 1, -177.0),
    (4, 0, -2, -1, 176.0),
    (4, -1, -1, -1, 166.0),
    (1, 0, 1, -1, -164.0),
    (4, 0, 1, -1, 132.0),
    (1, 0, -1, -1, -119.0),
    (4, -1, 0, -1, 115.0),
    (2, -2, 0, 1, 107.0),
];

/// Geocentric ecliptic position of the moon, referred to the mean equinox of date.
/// Accurate to ~10" in longitude, ~4" in latitude.
pub fn moon_geometric(t: f64) -> Ecliptic {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    // Fundamental arguments
    let lp = wrap_degrees(
        218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0,
    );
    let d = wrap_degrees(
        297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0,
    );
    let m = wrap_degrees(357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0);
    let mp = wrap_degrees(
        134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0,
    );
    let f = wrap_degrees(
        93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
            + t4 / 863_310_000.0,
    );
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    let a3 = 313.45 + 481_266.484 * t;

    // Earth orbit eccentricity damps every term that involves M
    let e = 1.0 - 0.002516 * t - 0.0000074 * t2;
    let ecc = |mult: i8| match mult.abs() {
        0 => 1.0,
        1 => e,
        _ => e * e,
    };
    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        (cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f).to_radians()
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, l, r) in MOON_LONGITUDE_DISTANCE.iter() {
        let arg = argument(cd, cm, cmp, cf);
        let k = ecc(cm);
        sum_l += l * k * arg.sin();
        sum_r += r * k * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, b) in MOON_LATITUDE.iter() {
        sum_b += b * ecc(cm) * argument(cd, cm, cmp, cf).sin();
    }

    // Venus, Jupiter and Earth-flattening terms
    let sin_deg = |x: f64| x.to_radians().sin();
    sum_l += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(lp - f) + 318.0 * sin_deg(a2);
    sum_b += -2235.0 * sin_deg(lp)
        + 382.0 * sin_deg(a3)
        + 175.0 * sin_deg(a1 - f)
        + 175.0 * sin_deg(a1 + f)
        + 127.0 * sin_deg(lp - mp)
        - 115.0 * sin_deg(lp + mp);

    Ecliptic {
        longitude: wrap_degrees(lp + sum_l / 1_000_000.0),
        latitude: sum_b / 1_000_000.0,
        distance_km: MOON_MEAN_DISTANCE_KM + sum_r / 1000.0,
    }
}

/// Apparent ecliptic position of the moon: nutation in longitude applied.
pub fn moon_apparent(t: f64, nutation: &Nutation) -> Ecliptic {
    let geometric = moon_geometric(t);
    Ecliptic {
        longitude: wrap_degrees(geometric.longitude + nutation.longitude),
        ..geometric
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn moon_matches_worked_example() {
        // 1992 April 12, 0h TD
        let t = centuries_since_j2000(2_448_724.5);
        let moon = moon_geometric(t);
        assert_abs_diff_eq!(moon.longitude, 133.162655, epsilon = 1e-5);
        assert_abs_diff_eq!(moon.latitude, -3.229126, epsilon = 1e-5);
        assert_abs_diff_eq!(moon.distance_km, 368_409.7, epsilon = 0.1);
    }

    #[test]
    fn moon_equatorial_matches_worked_example() {
        let t = centuries_since_j2000(2_448_724.5);
        let nut = nutation(t);
        let eps = mean_obliquity(t) + nut.obliquity;
        assert_abs_diff_eq!(eps, 23.440636, epsilon = 1e-4);
        let moon = moon_apparent(t, &nut);
        let (ra, dec) = ecliptic_to_equatorial(moon.longitude, moon.latitude, eps);
        assert_abs_diff_eq!(ra, 134.688470, epsilon = 1e-3);
        assert_abs_diff_eq!(dec, 13.768368, epsilon = 1e-3);
    }

    #[test]
    fn sun_matches_worked_example() {
        // 1992 October 13, 0h TD
        let t = centuries_since_j2000(2_448_908.5);
        let nut = nutation(t);
        let sun = sun_apparent(t, &nut);
        assert_abs_diff_eq!(sun.longitude, 199.90895, epsilon = 0.01);
        assert_abs_diff_eq!(sun.distance_km / AU_KM, 0.99766, epsilon = 1e-4);

        let eps = mean_obliquity(t) + nut.obliquity;
        let (ra, dec) = ecliptic_to_equatorial(sun.longitude, sun.latitude, eps);
        assert_abs_diff_eq!(ra, 198.38083, epsilon = 0.01);
        assert_abs_diff_eq!(dec, -7.78507, epsilon = 0.01);
    }

    #[test]
    fn sidereal_time_matches_worked_example() {
        // 1987 April 10, 0h UT: GMST 13h10m46.3668s
        let gmst = mean_sidereal_time(2_446_895.5);
        let expected = (13.0 + 10.0 / 60.0 + 46.3668 / 3600.0) * 15.0;
        assert_abs_diff_eq!(gmst, expected, epsilon = 1e-6);
    }

    #[test]
    fn obliquity_at_j2000() {
        assert_abs_diff_eq!(mean_obliquity(0.0), 23.4392911, epsilon = 1e-6);
    }

    #[test]
    fn sun_distance_stays_near_one_au() {
        for day in (0..366).step_by(5) {
            let t = centuries_since_j2000(2_460_310.5 + day as f64);
            let r = sun_geometric(t).distance_km / AU_KM;
            assert!(r > 0.983 && r < 1.017, "day {day}: {r} AU");
        }
    }

    #[test]
    fn moon_distance_stays_in_orbit_bounds() {
        for day in 0..60 {
            let t = centuries_since_j2000(2_460_310.5 + day as f64 * 0.5);
            let km = moon_geometric(t).distance_km;
            assert!(km > 356_000.0 && km < 407_000.0, "day {day}: {km} km");
        }
    }
}
