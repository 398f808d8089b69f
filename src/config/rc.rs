use crate::mode::UnknownModePolicy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

const RC_FILE_NAME: &str = ".helixrc";

/// Shape of the cursor while inserting. Only stored here; drawing it is
/// the host's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    Block,
    #[default]
    Bar,
}

impl FromStr for CursorShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "block" => Ok(CursorShape::Block),
            "bar" => Ok(CursorShape::Bar),
            other => Err(format!("invalid cursor shape '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RcConfig {
    pub enable_helix_keybindings: bool,
    pub cursor_in_insert_mode: CursorShape,
    pub enable_additional_keybindings: bool,
    pub unknown_mode: UnknownModePolicy,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            enable_helix_keybindings: false,
            cursor_in_insert_mode: CursorShape::Bar,
            enable_additional_keybindings: true,
            unknown_mode: UnknownModePolicy::Conservative,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .helixrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.helixrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(RC_FILE_NAME);
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(RC_FILE_NAME);
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load the RC file if there is one; defaults otherwise. Never fails.
    pub fn load_config() -> RcConfig {
        let Some(rc_path) = Self::get_rc_path() else {
            return RcConfig::default();
        };

        match Self::load_from(&rc_path) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "ignoring rc file");
                RcConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<RcConfig, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading rc file");

        let mut config = RcConfig::default();
        Self::parse_config_content(&content, &mut config);
        Ok(config)
    }

    /// Parse the content of an RC file
    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        // vim-style: "set key", "set nokey", "set key=value"
        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();
            match setting.split_once('=') {
                Some((key, value)) => Self::apply_setting(config, key.trim(), value.trim()),
                None => match setting.strip_prefix("no") {
                    Some(key) if Self::is_flag(key) => Self::apply_setting(config, key, "false"),
                    _ => Self::apply_setting(config, setting, "true"),
                },
            }
        } else if let Some((key, value)) = line.split_once('=') {
            Self::apply_setting(config, key.trim(), value.trim());
        } else {
            warn!(line, "unrecognized rc line");
        }
    }

    fn is_flag(key: &str) -> bool {
        matches!(
            key,
            "helix" | "enable_helix_keybindings" | "additional" | "enable_additional_keybindings"
        )
    }

    fn apply_setting(config: &mut RcConfig, key: &str, value: &str) {
        match key {
            "helix" | "enable_helix_keybindings" => match Self::parse_bool(value) {
                Some(enabled) => config.enable_helix_keybindings = enabled,
                None => warn!(key, value, "invalid boolean"),
            },
            "additional" | "enable_additional_keybindings" => match Self::parse_bool(value) {
                Some(enabled) => config.enable_additional_keybindings = enabled,
                None => warn!(key, value, "invalid boolean"),
            },
            "cursorinsert" | "cursor_in_insert_mode" => match value.parse() {
                Ok(shape) => config.cursor_in_insert_mode = shape,
                Err(err) => warn!(key, %err, "ignoring setting"),
            },
            "unknown_mode" => match value.parse() {
                Ok(policy) => config.unknown_mode = policy,
                Err(err) => warn!(key, %err, "ignoring setting"),
            },
            _ => warn!(key, "unknown setting"),
        }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# helix-motions configuration file (.helixrc)
# Lines starting with # or " are comments

# Turn the Helix key table on (or set nohelix)
set helix

# Bindings beyond e, s and = (W, B, E, S, X, C, G, Alt-s, insert-mode kills)
set additional

# Cursor in insert mode: block or bar
set cursorinsert=bar

# What to assume when the editor mode cannot be read:
# conservative (normal mode) or permissive (insert mode)
unknown_mode=conservative
"#
        .to_string()
    }
}
