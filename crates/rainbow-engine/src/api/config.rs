use serde::{Deserialize, Serialize};

use crate::core::location::GeoCoordinate;
use crate::ephemeris::DEFAULT_KERNEL;
use crate::error::TrackerError;

/// Configuration for the tracker, provided by the host.
/// Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Ephemeris kernel id (default: "meeus-truncated").
    pub kernel: String,
    /// Diameter of the ground disk and bow rings in world units (default: 50).
    pub ground_scale: f32,
    /// Sun/moon node size relative to the dome radius (default: 0.25).
    pub body_scale_factor: f32,
    /// Initial observer latitude in degrees.
    pub latitude: f64,
    /// Initial observer longitude in degrees, east positive.
    pub longitude: f64,
    /// Whether the clock follows real time from the first frame (default: true).
    pub start_running: bool,
    /// UT1 − UTC in seconds.
    pub dut1_seconds: f64,
    /// Node-instance capacity of the shared buffer (default: 16).
    pub max_nodes: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            kernel: DEFAULT_KERNEL.to_string(),
            ground_scale: 50.0,
            body_scale_factor: 0.25,
            latitude: 0.0,
            longitude: 0.0,
            start_running: true,
            dut1_seconds: 0.0,
            max_nodes: 16,
        }
    }
}

impl TrackerConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Radius of the sky dome: half the ground diameter.
    pub fn dome_radius(&self) -> f32 {
        self.ground_scale / 2.0
    }

    /// The configured starting location, validated.
    pub fn initial_location(&self) -> Result<GeoCoordinate, TrackerError> {
        Ok(GeoCoordinate::new(self.latitude, self.longitude)?)
    }
}
