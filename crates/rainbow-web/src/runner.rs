use rainbow_engine::bridge::protocol::HEADER_FLOATS;
use rainbow_engine::{CommandQueue, Ephemeris, TimeCommand, TrackerError, UpdateLoop, WallClock};

/// Owns the update loop and everything the browser reads back after a tick.
///
/// wasm-bindgen cannot export generic structs, so `lib.rs` keeps one
/// concrete runner in a `thread_local!` and forwards free functions to it.
pub struct TrackerRunner<E: Ephemeris, W: WallClock> {
    tracker: UpdateLoop<E, W>,
    commands: CommandQueue,
    header: [f32; HEADER_FLOATS],
    status: String,
    /// Last location rejection, shown until a tick whose commits all succeed.
    validation: Option<String>,
    stale: bool,
    /// Set once the loop has hit an invariant violation; no further ticks run.
    halted: Option<String>,
}

impl<E: Ephemeris, W: WallClock> TrackerRunner<E, W> {
    pub fn new(tracker: UpdateLoop<E, W>) -> Self {
        let mut runner = Self {
            tracker,
            commands: CommandQueue::new(),
            header: [0.0; HEADER_FLOATS],
            status: String::new(),
            validation: None,
            stale: false,
            halted: None,
        };
        runner.write_header();
        runner
    }

    /// Queue a time-control button press. Unknown kinds are ignored.
    pub fn push_button(&mut self, kind: u32) {
        match TimeCommand::from_button(kind) {
            Some(command) => self.commands.push(command),
            None => log::warn!("Ignoring unknown time button {kind}"),
        }
    }

    /// Queue the location form's two text fields, verbatim.
    pub fn set_location(&mut self, latitude: &str, longitude: &str) {
        self.commands.push(TimeCommand::set_location(latitude, longitude));
    }

    /// Run one frame. `dt` is the real time since the previous frame, in seconds.
    pub fn tick(&mut self, dt: f64) -> Result<(), TrackerError> {
        if self.halted.is_some() {
            return Ok(());
        }

        let location_commits = self
            .commands
            .iter()
            .filter(|c| matches!(c, TimeCommand::SetLocation { .. }))
            .count();

        let report = match self.tracker.tick(dt, &mut self.commands) {
            Ok(report) => report,
            Err(e) => {
                log::error!("Tracker halted: {e}");
                self.halted = Some(e.to_string());
                return Err(e);
            }
        };

        if let Some(last) = report.rejected.last() {
            self.validation = Some(last.to_string());
        } else if location_commits > 0 {
            self.validation = None;
        }

        self.stale = report.is_stale();
        self.status = report.status;
        self.write_header();
        Ok(())
    }

    fn write_header(&mut self) {
        let frame = self.tracker.frame_header(self.stale);
        self.tracker.layout().write_header(&mut self.header, &frame);
    }

    // ---- Pointer accessors for zero-copy reads ----

    /// Header block; the browser reads it through `as_ptr()`.
    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.tracker.buffer().instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.tracker.buffer().instance_count()
    }

    // ---- Capacity accessors ----

    pub fn max_nodes(&self) -> u32 {
        self.tracker.layout().max_nodes as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.tracker.layout().buffer_total_floats as u32
    }

    pub fn dome_radius(&self) -> f32 {
        self.tracker.config().dome_radius()
    }

    // ---- Text for the UI ----

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn validation_message(&self) -> Option<&str> {
        self.validation.as_deref()
    }

    pub fn halted(&self) -> Option<&str> {
        self.halted.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.tracker.controller().is_running()
    }
}
