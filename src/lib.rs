//! Helix-style motions and selection commands over a multi-cursor buffer.
//!
//! A host editor hands in a `Document` snapshot, the current `Selection`
//! and a `ModeReport`; `Engine::execute` answers with a `CommandResult`
//! that the host applies as one state transition.

pub mod commands;
pub mod config;
pub mod document_model;
pub mod keymap;
pub mod logging;
pub mod mode;
pub mod selection;

pub use commands::{Command, CommandResult, Engine, apply_result};
pub use document_model::{Document, Edit};
pub use mode::{Mode, ModeOracle, ModeReport, UnknownModePolicy};
pub use selection::{Range, Selection};
