/// Document model subsystem - Line-indexed text snapshots and edits
///
/// The engine reads a `Document`, never mutates it. Edits come back as
/// plain `Edit` values and are applied atomically through a `ChangeSet`,
/// which also remaps positions from the old text into the new one.

pub mod changes;
pub mod chars;
pub mod document;

// Re-export main types for convenience
pub use changes::{Assoc, ChangeSet, Edit, EditError};
pub use chars::{CharCategory, categorize};
pub use document::{Document, Line, LineEnding};
