/// Commands the UI can issue to the time controller.
/// Negative amounts step backwards; `AddHours(-1)` is the "- Hour" button.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeCommand {
    /// Shift the simulated instant by whole seconds.
    AddSeconds(i64),
    /// Shift the simulated instant by whole minutes.
    AddMinutes(i64),
    /// Shift the simulated instant by whole hours.
    AddHours(i64),
    /// Jump back to the current real UTC time.
    ResetToNow,
    /// Pause a running clock or resume a paused one.
    ToggleRun,
    /// Commit the location form: raw latitude and longitude text.
    SetLocation { latitude: String, longitude: String },
}

impl TimeCommand {
    pub fn set_location(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        TimeCommand::SetLocation {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    /// Map a UI button kind to a command.
    /// Kinds follow the button column top to bottom: +sec, -sec, +min, -min,
    /// +hour, -hour, now, stop.
    pub fn from_button(kind: u32) -> Option<Self> {
        match kind {
            1 => Some(TimeCommand::AddSeconds(1)),
            2 => Some(TimeCommand::AddSeconds(-1)),
            3 => Some(TimeCommand::AddMinutes(1)),
            4 => Some(TimeCommand::AddMinutes(-1)),
            5 => Some(TimeCommand::AddHours(1)),
            6 => Some(TimeCommand::AddHours(-1)),
            7 => Some(TimeCommand::ResetToNow),
            8 => Some(TimeCommand::ToggleRun),
            _ => None,
        }
    }
}

/// A queue of pending time commands.
/// The UI pushes commands as they happen; the update loop drains them once per tick.
pub struct CommandQueue {
    commands: Vec<TimeCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(8),
        }
    }

    /// Push a new command (called from the UI layer).
    pub fn push(&mut self, command: TimeCommand) {
        self.commands.push(command);
    }

    /// Drain all pending commands in arrival order and clear the queue.
    pub fn drain(&mut self) -> Vec<TimeCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &TimeCommand> {
        self.commands.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
