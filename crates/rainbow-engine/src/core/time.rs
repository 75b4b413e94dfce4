use hifitime::{Duration, Epoch, Errors, Unit};
use log::{debug, warn};

use crate::core::location::GeoCoordinate;
use crate::error::CoordinateParseError;
use crate::input::queue::TimeCommand;

/// Source of the current real UTC time.
pub trait WallClock {
    fn now(&self) -> Result<Epoch, Errors>;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> Result<Epoch, Errors> {
        Epoch::now()
    }
}

/// Wall clock frozen at one instant. For replaying fixed scenarios.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Epoch);

impl WallClock for FixedClock {
    fn now(&self) -> Result<Epoch, Errors> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Paused,
}

/// The simulated instant and whether it follows real time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedClock {
    pub instant: Epoch,
    pub running: bool,
}

/// Everything one tick of the pipeline needs to know about time and place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppState {
    pub instant: Epoch,
    pub running: bool,
    pub location: GeoCoordinate,
}

/// Owns the simulated clock and the last confirmed observer location.
/// All mutation goes through [`TimeController::apply`] and [`TimeController::tick`].
pub struct TimeController<W: WallClock> {
    clock: SimulatedClock,
    location: GeoCoordinate,
    wall: W,
}

impl<W: WallClock> TimeController<W> {
    /// Start at the current real time.
    pub fn new(wall: W, location: GeoCoordinate, running: bool) -> Result<Self, Errors> {
        let instant = wall.now()?;
        Ok(Self::starting_at(wall, instant, location, running))
    }

    /// Start at an explicit instant; `ResetToNow` still consults `wall`.
    pub fn starting_at(wall: W, instant: Epoch, location: GeoCoordinate, running: bool) -> Self {
        Self {
            clock: SimulatedClock { instant, running },
            location,
            wall,
        }
    }

    /// Apply one user command. A rejected location leaves the previous one in place.
    pub fn apply(&mut self, command: TimeCommand) -> Result<(), CoordinateParseError> {
        debug!("time command: {command:?}");
        match command {
            TimeCommand::AddSeconds(n) => self.shift(n, Unit::Second),
            TimeCommand::AddMinutes(n) => self.shift(n, Unit::Minute),
            TimeCommand::AddHours(n) => self.shift(n, Unit::Hour),
            TimeCommand::ResetToNow => match self.wall.now() {
                Ok(now) => self.clock.instant = now,
                Err(e) => warn!("Keeping the simulated time, the wall clock failed: {e}"),
            },
            TimeCommand::ToggleRun => self.clock.running = !self.clock.running,
            TimeCommand::SetLocation {
                latitude,
                longitude,
            } => {
                self.location = GeoCoordinate::parse(&latitude, &longitude)?;
            }
        }
        Ok(())
    }

    /// Advance a running clock by the real time elapsed since the last frame.
    pub fn tick(&mut self, elapsed_real_seconds: f64) {
        if !self.clock.running {
            return;
        }
        if !elapsed_real_seconds.is_finite() || elapsed_real_seconds <= 0.0 {
            return;
        }
        self.clock.instant += Duration::from_seconds(elapsed_real_seconds);
    }

    fn shift(&mut self, amount: i64, unit: Unit) {
        let step = Duration::from_f64(amount.unsigned_abs() as f64, unit);
        if amount >= 0 {
            self.clock.instant += step;
        } else {
            self.clock.instant -= step;
        }
    }

    pub fn state(&self) -> ClockState {
        if self.clock.running {
            ClockState::Running
        } else {
            ClockState::Paused
        }
    }

    pub fn instant(&self) -> Epoch {
        self.clock.instant
    }

    pub fn is_running(&self) -> bool {
        self.clock.running
    }

    pub fn location(&self) -> GeoCoordinate {
        self.location
    }

    /// Copy of the state handed to the resolvers for one tick.
    pub fn snapshot(&self) -> AppState {
        AppState {
            instant: self.clock.instant,
            running: self.clock.running,
            location: self.location,
        }
    }
}
