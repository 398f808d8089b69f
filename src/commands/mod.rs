/// Motion & selection engine - Helix-style commands over a multi-range selection
///
/// Every command is a function of (document, selection) that returns a
/// `CommandResult`. Ranges are mapped one by one in stored order and the
/// main range keeps its index. `Engine` adds the mode gate in front.

pub mod command;
pub mod duplicate;
pub mod engine;
pub mod format;
pub mod goto;
pub mod insert;
pub mod motion;
pub mod select;

// Re-export public interface
pub use command::{Command, CommandResult, ModeGate};
pub use engine::{Engine, apply_result};
pub use insert::{BufferPrimitives, StandardPrimitives};
