use hifitime::Epoch;

use super::series::centuries_since_j2000;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts UTC instants into the time arguments the series need.
/// Built once per process alongside the kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timescale {
    /// UT1 − UTC in seconds. Always under 0.9 s; zero is fine for display work.
    dut1_seconds: f64,
}

/// One instant expressed on the time scales the ephemeris uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Time {
    /// Julian date, Terrestrial Time. Drives the planetary series.
    pub tt_jd: f64,
    /// Julian date, UT1. Drives Earth rotation (sidereal time).
    pub ut1_jd: f64,
}

impl Time {
    /// Julian centuries of TT since J2000.0.
    pub fn centuries_tt(&self) -> f64 {
        centuries_since_j2000(self.tt_jd)
    }
}

impl Timescale {
    pub fn new(dut1_seconds: f64) -> Self {
        Self { dut1_seconds }
    }

    /// Leap seconds come from hifitime's table; TT = TAI + 32.184 s.
    pub fn time(&self, instant: Epoch) -> Time {
        Time {
            tt_jd: instant.to_jde_tt_days(),
            ut1_jd: instant.to_jde_utc_days() + self.dut1_seconds / SECONDS_PER_DAY,
        }
    }
}

impl Default for Timescale {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tt_leads_utc_by_leap_seconds_plus_offset() {
        let ts = Timescale::default();
        let time = ts.time(Epoch::from_gregorian_utc_hms(2024, 3, 20, 12, 0, 0));
        assert_abs_diff_eq!(time.ut1_jd, 2_460_390.0, epsilon = 1e-8);
        // 37 leap seconds + 32.184 s
        assert_abs_diff_eq!(
            (time.tt_jd - time.ut1_jd) * SECONDS_PER_DAY,
            69.184,
            epsilon = 1e-3
        );
    }

    #[test]
    fn dut1_shifts_only_ut1() {
        let instant = Epoch::from_gregorian_utc_hms(2010, 1, 1, 0, 0, 0);
        let plain = Timescale::default().time(instant);
        let shifted = Timescale::new(0.5).time(instant);
        assert_eq!(plain.tt_jd, shifted.tt_jd);
        assert_abs_diff_eq!(
            (shifted.ut1_jd - plain.ut1_jd) * SECONDS_PER_DAY,
            0.5,
            epsilon = 1e-4
        );
    }

    #[test]
    fn centuries_are_zero_at_j2000() {
        let time = Time {
            tt_jd: 2_451_545.0,
            ut1_jd: 2_451_545.0,
        };
        assert_eq!(time.centuries_tt(), 0.0);
    }
}
