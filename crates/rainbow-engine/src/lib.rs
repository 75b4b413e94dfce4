//! Sun, moon, rainbow and moonbow positions projected onto a 3D sky dome.
//!
//! One [`UpdateLoop::tick`] per frame: queued [`TimeCommand`]s move the
//! simulated clock, the ephemeris resolves both bodies for the observer, the
//! bow points are taken opposite them, and every dome node is rewritten into
//! a flat [`NodeBuffer`] for the renderer.

pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod ephemeris;
pub mod error;
pub mod input;
pub mod renderer;
pub mod resolver;
pub mod systems;

pub use hifitime;

// Re-export key types at crate root for convenience
pub use api::config::TrackerConfig;
pub use api::types::{NodeId, NodeKind};
pub use api::update::{status_line, DomeNodes, TickOutcome, TickReport, UpdateLoop};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use components::node::SceneNode;
pub use crate::core::geometry::{
    antipode, mirror_orientation, orientation_for, to_cartesian, Horizontal, Orientation,
};
pub use crate::core::location::GeoCoordinate;
pub use crate::core::scene::Scene;
pub use crate::core::time::{AppState, ClockState, FixedClock, SystemClock, TimeController, WallClock};
pub use ephemeris::{AnalyticEphemeris, ApparentPlace, Body, Ephemeris, Time, Timescale};
pub use error::{
    CoordinateParseError, EphemerisError, EphemerisLoadError, InvariantViolation, ResolveError,
    TrackerError,
};
pub use input::queue::{CommandQueue, TimeCommand};
pub use renderer::instance::{NodeBuffer, NodeInstance};
pub use resolver::{BowPoints, CelestialObservation, SkyPositions};
pub use systems::render::build_node_buffer;
