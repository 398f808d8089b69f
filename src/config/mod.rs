/// Configuration subsystem - Settings loaded from .helixrc files
///
/// Settings cover which key tables are active, the insert-mode cursor
/// shape and the policy for an unreadable editor mode.

pub mod rc;

// Re-export public interface
pub use rc::{ConfigError, CursorShape, RcConfig, RcLoader};
