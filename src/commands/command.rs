use crate::document_model::Edit;
use crate::selection::{Range, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // Word movement
    MoveNextWordEnd,       // e
    MoveNextLongWordStart, // W
    MovePrevLongWordStart, // B
    MoveNextLongWordEnd,   // E

    // Selection
    SplitSelectionOnNewline, // Alt-s
    SplitSelection,          // S
    ExtendToLineBounds,      // X
    SelectRegex,             // s

    // Editing
    CopySelectionOnNextLine, // C
    FormatSelections,        // =

    // Goto, last line when no number is given
    GotoLine(Option<usize>), // G

    // Insert mode
    DeleteWordBackward, // Ctrl-w
    DeleteWordForward,  // Alt-d
    KillToLineStart,    // Ctrl-u
    KillToLineEnd,      // Ctrl-k
    DeleteCharBackward, // Ctrl-h
    DeleteCharForward,  // Ctrl-d
}

/// Which mode a command may run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeGate {
    NormalOnly,
    InsertOnly,
}

impl Command {
    pub fn gate(&self) -> ModeGate {
        match self {
            Command::DeleteWordBackward
            | Command::DeleteWordForward
            | Command::KillToLineStart
            | Command::KillToLineEnd
            | Command::DeleteCharBackward
            | Command::DeleteCharForward => ModeGate::InsertOnly,
            _ => ModeGate::NormalOnly,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveNextWordEnd => "move_next_word_end",
            Command::MoveNextLongWordStart => "move_next_long_word_start",
            Command::MovePrevLongWordStart => "move_prev_long_word_start",
            Command::MoveNextLongWordEnd => "move_next_long_word_end",
            Command::SplitSelectionOnNewline => "split_selection_on_newline",
            Command::SplitSelection => "split_selection",
            Command::ExtendToLineBounds => "extend_to_line_bounds",
            Command::SelectRegex => "select_regex",
            Command::CopySelectionOnNextLine => "copy_selection_on_next_line",
            Command::FormatSelections => "format_selections",
            Command::GotoLine(_) => "goto_line",
            Command::DeleteWordBackward => "delete_word_backward",
            Command::DeleteWordForward => "delete_word_forward",
            Command::KillToLineStart => "kill_to_line_start",
            Command::KillToLineEnd => "kill_to_line_end",
            Command::DeleteCharBackward => "delete_char_backward",
            Command::DeleteCharForward => "delete_char_forward",
        }
    }
}

/// Outcome of one command, handed back to the host to apply as a single
/// state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Replace the selection.
    Selection(Selection),
    /// Apply `edits` atomically (offsets against the unedited document).
    /// `selection`, when present, is already in post-edit offsets;
    /// otherwise the host remaps the current one.
    Edit {
        edits: Vec<Edit>,
        selection: Option<Selection>,
    },
    /// Key consumed, nothing changed.
    Handled,
    /// Nothing to do; state must stay as it was.
    NoOp,
}

impl CommandResult {
    pub fn is_noop(&self) -> bool {
        matches!(self, CommandResult::NoOp)
    }

    pub(crate) fn from_ranges(ranges: Vec<Range>, main: usize) -> Self {
        match Selection::new(ranges, main) {
            Ok(selection) => CommandResult::Selection(selection),
            Err(_) => CommandResult::NoOp,
        }
    }

    pub(crate) fn from_edits(edits: Vec<Edit>) -> Self {
        if edits.is_empty() {
            CommandResult::NoOp
        } else {
            CommandResult::Edit {
                edits,
                selection: None,
            }
        }
    }
}
