use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Modal editing state. Read by the engine, never changed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Select,
    /// In-range mode tag with no dedicated variant (pending/minor modes).
    Other(u8),
}

impl Mode {
    const MAX_TAG: u8 = 4;

    /// Decode a raw mode record: tag 0 = Normal, 1 = Insert, 4 = Select.
    pub fn from_tag(kind: u8, minor: u8) -> Result<Self, ModeError> {
        match kind {
            0 => Ok(Mode::Normal),
            1 => Ok(Mode::Insert),
            4 => Ok(Mode::Select),
            k if k <= Self::MAX_TAG => Ok(Mode::Other(k)),
            k => Err(ModeError::UnknownTag { kind: k, minor }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::Insert => write!(f, "insert"),
            Mode::Select => write!(f, "select"),
            Mode::Other(tag) => write!(f, "mode#{}", tag),
        }
    }
}

/// What the host knows about the current mode when it calls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeReport {
    Known(Mode),
    Raw { kind: u8, minor: u8 },
    Unavailable,
}

impl From<Mode> for ModeReport {
    fn from(mode: Mode) -> Self {
        ModeReport::Known(mode)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModeError {
    #[error("unknown mode tag {kind} (minor {minor})")]
    UnknownTag { kind: u8, minor: u8 },
    #[error("mode state unavailable")]
    Unavailable,
}

/// What to assume when the mode cannot be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownModePolicy {
    /// Assume Normal: insert-only commands stay inert.
    #[default]
    Conservative,
    /// Assume Insert: typing commands keep working.
    Permissive,
}

impl FromStr for UnknownModePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conservative" | "normal" => Ok(UnknownModePolicy::Conservative),
            "permissive" | "insert" => Ok(UnknownModePolicy::Permissive),
            other => Err(format!("unknown mode policy '{}'", other)),
        }
    }
}

/// Answers whether the editor is in insert mode. One oracle applies one
/// policy to every command it gates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModeOracle {
    policy: UnknownModePolicy,
}

impl ModeOracle {
    pub fn new(policy: UnknownModePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> UnknownModePolicy {
        self.policy
    }

    pub fn resolve(&self, report: &ModeReport) -> Result<Mode, ModeError> {
        match *report {
            ModeReport::Known(mode) => Ok(mode),
            ModeReport::Raw { kind, minor } => Mode::from_tag(kind, minor),
            ModeReport::Unavailable => Err(ModeError::Unavailable),
        }
    }

    pub fn is_insert_mode(&self, report: &ModeReport) -> bool {
        match self.resolve(report) {
            Ok(mode) => mode == Mode::Insert,
            Err(err) => {
                let assume_insert = self.policy == UnknownModePolicy::Permissive;
                warn!(error = %err, policy = ?self.policy, assume_insert, "mode detection failed");
                assume_insert
            }
        }
    }
}
