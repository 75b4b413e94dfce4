use hifitime::Epoch;
use log::{debug, error, info, warn};

use crate::api::config::TrackerConfig;
use crate::api::types::{NodeId, NodeKind};
use crate::bridge::protocol::{FrameHeader, ProtocolLayout};
use crate::components::node::SceneNode;
use crate::core::geometry::{to_cartesian, Horizontal};
use crate::core::location::GeoCoordinate;
use crate::core::scene::Scene;
use crate::core::time::{TimeController, WallClock};
use crate::ephemeris::{AnalyticEphemeris, Ephemeris, Timescale};
use crate::error::{CoordinateParseError, EphemerisError, ResolveError, TrackerError};
use crate::input::queue::CommandQueue;
use crate::renderer::instance::NodeBuffer;
use crate::resolver::{resolve, resolve_bows, BowPoints, CelestialObservation, SkyPositions};
use crate::systems::render::build_node_buffer;

/// `2024-03-20T12:00:00Z Lat: 0.0, Lon: 0.0`
///
/// Coordinates use the shortest text that round-trips the `f64`; whole
/// numbers keep a `.0`. Magnitudes below `1e-4` switch to exponent form (`1e-5`).
pub fn status_line(instant: Epoch, location: GeoCoordinate) -> String {
    let (y, mo, d, h, mi, s, _) = instant.to_gregorian_utc();
    format!(
        "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z Lat: {:?}, Lon: {:?}",
        location.latitude(),
        location.longitude()
    )
}

/// Whether this tick's scene reflects this tick's instant.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Updated,
    /// The ephemeris could not resolve the instant; the previous frame stays.
    Stale(EphemerisError),
}

/// What one pass of the loop did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub frame: u32,
    pub instant: Epoch,
    pub running: bool,
    pub status: String,
    /// Location commands refused this tick, in queue order.
    pub rejected: Vec<CoordinateParseError>,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn is_stale(&self) -> bool {
        matches!(self.outcome, TickOutcome::Stale(_))
    }
}

/// IDs of the fixed dome nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomeNodes {
    pub ground: NodeId,
    pub sun: NodeId,
    pub moon: NodeId,
    pub rainbow: NodeId,
    pub moonbow: NodeId,
}

/// Per-frame orchestration: commands, clock, resolvers, scene, buffer.
pub struct UpdateLoop<E: Ephemeris, W: WallClock> {
    config: TrackerConfig,
    ephemeris: E,
    controller: TimeController<W>,
    scene: Scene,
    nodes: DomeNodes,
    buffer: NodeBuffer,
    layout: ProtocolLayout,
    sky: Option<SkyPositions>,
    bows: Option<BowPoints>,
    frame: u32,
}

impl<W: WallClock> UpdateLoop<AnalyticEphemeris, W> {
    /// Load the configured kernel and start the clock at the wall time.
    pub fn from_config(config: TrackerConfig, wall: W) -> Result<Self, TrackerError> {
        let ephemeris = load_ephemeris(&config)?;
        let location = config.initial_location()?;
        let controller = TimeController::new(wall, location, config.start_running)?;
        Ok(Self::new(config, ephemeris, controller))
    }

    /// Same as [`UpdateLoop::from_config`] but starting at `instant`.
    pub fn from_config_at(
        config: TrackerConfig,
        wall: W,
        instant: Epoch,
    ) -> Result<Self, TrackerError> {
        let ephemeris = load_ephemeris(&config)?;
        let location = config.initial_location()?;
        let controller =
            TimeController::starting_at(wall, instant, location, config.start_running);
        Ok(Self::new(config, ephemeris, controller))
    }
}

fn load_ephemeris(config: &TrackerConfig) -> Result<AnalyticEphemeris, TrackerError> {
    AnalyticEphemeris::load(&config.kernel, Timescale::new(config.dut1_seconds)).map_err(|e| {
        error!("{e}");
        TrackerError::from(e)
    })
}

impl<E: Ephemeris, W: WallClock> UpdateLoop<E, W> {
    /// Spawn the dome nodes. Nothing is resolved until the first tick.
    pub fn new(config: TrackerConfig, ephemeris: E, controller: TimeController<W>) -> Self {
        let mut scene = Scene::with_capacity(NodeKind::ALL.len());
        let rings = config.ground_scale;

        let ground = scene.next_id();
        scene.spawn(
            SceneNode::new(ground, NodeKind::Ground)
                .double_sided()
                .facing(Horizontal::new(-90.0, 0.0))
                .with_scale(rings),
        );
        let sun = scene.next_id();
        scene.spawn(SceneNode::new(sun, NodeKind::Sun));
        let moon = scene.next_id();
        scene.spawn(SceneNode::new(moon, NodeKind::Moon));
        let rainbow = scene.next_id();
        scene.spawn(
            SceneNode::new(rainbow, NodeKind::Rainbow)
                .double_sided()
                .with_scale(rings),
        );
        let moonbow = scene.next_id();
        scene.spawn(
            SceneNode::new(moonbow, NodeKind::Moonbow)
                .double_sided()
                .with_scale(rings),
        );

        let layout = ProtocolLayout::from_config(&config);
        let mut buffer = NodeBuffer::with_capacity(layout.max_nodes);
        build_node_buffer(scene.iter(), &mut buffer);

        info!(
            "Tracker initialised: {} nodes, dome radius {}, {}",
            scene.len(),
            config.dome_radius(),
            status_line(controller.instant(), controller.location())
        );

        Self {
            config,
            ephemeris,
            controller,
            scene,
            nodes: DomeNodes {
                ground,
                sun,
                moon,
                rainbow,
                moonbow,
            },
            buffer,
            layout,
            sky: None,
            bows: None,
            frame: 0,
        }
    }

    /// Run one frame.
    ///
    /// Rejected location commands and ephemeris gaps are reported and the
    /// loop carries on; an invariant violation stops it.
    pub fn tick(
        &mut self,
        elapsed_real_seconds: f64,
        commands: &mut CommandQueue,
    ) -> Result<TickReport, TrackerError> {
        let mut rejected = Vec::new();
        for command in commands.drain() {
            if let Err(e) = self.controller.apply(command) {
                warn!("Location rejected, keeping {:?}: {e}", self.controller.location());
                rejected.push(e);
            }
        }
        self.controller.tick(elapsed_real_seconds);

        let state = self.controller.snapshot();
        let outcome = match resolve(&self.ephemeris, &state) {
            Ok(sky) => {
                let bows = resolve_bows(&sky);
                self.place_nodes(&sky, &bows);
                self.sky = Some(sky);
                self.bows = Some(bows);
                TickOutcome::Updated
            }
            Err(ResolveError::Ephemeris(e)) => {
                warn!("Frame {} left stale: {e}", self.frame);
                TickOutcome::Stale(e)
            }
            Err(ResolveError::Invariant(v)) => {
                error!("{v}");
                return Err(v.into());
            }
        };

        build_node_buffer(self.scene.iter(), &mut self.buffer);
        if self.buffer.dropped() > 0 {
            warn!(
                "{} node instances exceed the buffer capacity of {}",
                self.buffer.dropped(),
                self.buffer.capacity()
            );
        }

        let report = TickReport {
            frame: self.frame,
            instant: state.instant,
            running: state.running,
            status: status_line(state.instant, state.location),
            rejected,
            outcome,
        };
        debug!("{}", report.status);
        self.frame = self.frame.wrapping_add(1);
        Ok(report)
    }

    fn place_nodes(&mut self, sky: &SkyPositions, bows: &BowPoints) {
        let radius = f64::from(self.config.dome_radius());
        let body_scale = self.config.dome_radius() * self.config.body_scale_factor;

        let bodies = [(self.nodes.sun, &sky.sun), (self.nodes.moon, &sky.moon)];
        for (id, observation) in bodies {
            if let Some(node) = self.scene.get_mut(id) {
                place_body(node, observation, radius, body_scale);
            }
        }

        let rings = [(self.nodes.rainbow, bows.rainbow), (self.nodes.moonbow, bows.moonbow)];
        for (id, point) in rings {
            if let Some(node) = self.scene.get_mut(id) {
                node.position = to_cartesian(point.altitude, point.azimuth, radius).as_vec3();
                node.set_facing(point);
            }
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn controller(&self) -> &TimeController<W> {
        &self.controller
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn nodes(&self) -> DomeNodes {
        self.nodes
    }

    pub fn buffer(&self) -> &NodeBuffer {
        &self.buffer
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Sun and moon from the last successful tick.
    pub fn sky(&self) -> Option<SkyPositions> {
        self.sky
    }

    /// Bow points from the last successful tick.
    pub fn bows(&self) -> Option<BowPoints> {
        self.bows
    }

    /// Number of ticks run so far.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn frame_header(&self, stale: bool) -> FrameHeader {
        FrameHeader {
            frame: self.frame,
            node_count: self.buffer.instance_count(),
            dome_radius: self.config.dome_radius(),
            running: self.controller.is_running(),
            stale,
        }
    }
}

/// Sun and moon sit on the dome, sized by their own angular-size coefficient.
fn place_body(node: &mut SceneNode, observation: &CelestialObservation, radius: f64, body_scale: f32) {
    node.position = to_cartesian(observation.altitude, observation.azimuth, radius).as_vec3();
    node.scale = body_scale * observation.angular_size as f32;
}
