use crate::commands::Command;
use crate::config::RcConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Key table for the Helix commands. The `e`, `s` and `=` bindings are
/// always present; the rest only when additional keybindings are on.
#[derive(Debug, Clone, Copy)]
pub struct Keymap {
    additional: bool,
}

impl Keymap {
    pub fn new(additional: bool) -> Self {
        Self { additional }
    }

    pub fn from_config(config: &RcConfig) -> Self {
        Self::new(config.enable_additional_keybindings)
    }

    pub fn lookup(&self, key_event: &KeyEvent) -> Option<Command> {
        let key = key_event.code;
        let modifiers = key_event.modifiers;

        if let Some(command) = Self::base_binding(key, modifiers) {
            return Some(command);
        }
        if self.additional {
            return Self::additional_binding(key, modifiers);
        }
        None
    }

    fn base_binding(key: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        if modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return None;
        }
        match key {
            KeyCode::Char('e') => Some(Command::MoveNextWordEnd),
            KeyCode::Char('s') => Some(Command::SelectRegex),
            KeyCode::Char('=') => Some(Command::FormatSelections),
            _ => None,
        }
    }

    fn additional_binding(key: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        match key {
            // Control keys first (insert mode editing)
            KeyCode::Char('w') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::DeleteWordBackward)
            }
            KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::KillToLineStart)
            }
            KeyCode::Char('k') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::KillToLineEnd)
            }
            KeyCode::Char('h') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::DeleteCharBackward)
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::DeleteCharForward)
            }
            _ if modifiers.contains(KeyModifiers::CONTROL) => None,

            KeyCode::Char('s') if modifiers.contains(KeyModifiers::ALT) => {
                Some(Command::SplitSelectionOnNewline)
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::ALT) => {
                Some(Command::DeleteWordForward)
            }
            _ if modifiers.contains(KeyModifiers::ALT) => None,

            // Terminals report Shift-w as 'W', with or without the SHIFT flag
            KeyCode::Char(c) => match c {
                'W' => Some(Command::MoveNextLongWordStart),
                'B' => Some(Command::MovePrevLongWordStart),
                'E' => Some(Command::MoveNextLongWordEnd),
                'S' => Some(Command::SplitSelection),
                'X' => Some(Command::ExtendToLineBounds),
                'C' => Some(Command::CopySelectionOnNextLine),
                'G' => Some(Command::GotoLine(None)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Parse key notation such as `e`, `W`, `Shift-w`, `Alt-s`, `Ctrl-w`.
pub fn parse_key(notation: &str) -> Result<KeyEvent, KeyParseError> {
    let notation = notation.trim();
    if notation.is_empty() {
        return Err(KeyParseError::Empty);
    }

    // A lone "-" or a trailing "--" names the minus key itself
    let (prefix, key) = match notation.rsplit_once('-') {
        Some((prefix, "")) if prefix.is_empty() || prefix.ends_with('-') => {
            (prefix.trim_end_matches('-'), "-")
        }
        Some((prefix, key)) => (prefix, key),
        None => ("", notation),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('-').filter(|p| !p.is_empty()) {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "c" => KeyModifiers::CONTROL,
            "alt" | "a" | "m" => KeyModifiers::ALT,
            "shift" | "s" => KeyModifiers::SHIFT,
            _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
        };
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "ret" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        KeyCode::Char(c.to_ascii_uppercase())
                    } else {
                        KeyCode::Char(c)
                    }
                }
                _ => return Err(KeyParseError::UnknownKey(key.to_string())),
            }
        }
    };

    Ok(KeyEvent::new(code, modifiers))
}
