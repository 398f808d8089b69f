use super::command::{Command, CommandResult, ModeGate};
use super::insert::{BufferPrimitives, StandardPrimitives};
use super::{duplicate, format, goto, insert, motion, select};
use crate::document_model::{ChangeSet, Document, EditError};
use crate::mode::{ModeOracle, ModeReport};
use crate::selection::Selection;
use tracing::{debug, trace};

/// Gates commands on the editor mode and runs them against a snapshot.
pub struct Engine {
    oracle: ModeOracle,
    primitives: Box<dyn BufferPrimitives>,
}

impl Engine {
    pub fn new(oracle: ModeOracle) -> Self {
        Self::with_primitives(oracle, Box::new(StandardPrimitives))
    }

    pub fn with_primitives(oracle: ModeOracle, primitives: Box<dyn BufferPrimitives>) -> Self {
        Self { oracle, primitives }
    }

    pub fn oracle(&self) -> &ModeOracle {
        &self.oracle
    }

    pub fn is_enabled(&self, command: &Command, mode: &ModeReport) -> bool {
        let insert = self.oracle.is_insert_mode(mode);
        match command.gate() {
            ModeGate::NormalOnly => !insert,
            ModeGate::InsertOnly => insert,
        }
    }

    pub fn execute(
        &self,
        command: &Command,
        doc: &Document,
        selection: &Selection,
        mode: &ModeReport,
    ) -> CommandResult {
        if !self.is_enabled(command, mode) {
            trace!(command = command.name(), ?mode, "command gated by mode");
            return CommandResult::NoOp;
        }

        let primitives = self.primitives.as_ref();
        let result = match *command {
            Command::MoveNextWordEnd => motion::move_next_word_end(doc, selection),
            Command::MoveNextLongWordStart => motion::move_next_long_word_start(doc, selection),
            Command::MovePrevLongWordStart => motion::move_prev_long_word_start(doc, selection),
            Command::MoveNextLongWordEnd => motion::move_next_long_word_end(doc, selection),
            Command::SplitSelectionOnNewline => select::split_selection_on_newline(doc, selection),
            Command::SplitSelection => select::split_selection(doc, selection),
            Command::ExtendToLineBounds => select::extend_to_line_bounds(doc, selection),
            Command::SelectRegex => select::select_word(doc, selection),
            Command::CopySelectionOnNextLine => {
                duplicate::copy_selection_on_next_line(doc, selection)
            }
            Command::FormatSelections => format::format_selections(),
            Command::GotoLine(line) => goto::goto_line(doc, line),
            Command::DeleteWordBackward => insert::delete_word_backward(doc, selection),
            Command::DeleteWordForward => insert::delete_word_forward(doc, selection),
            Command::KillToLineStart => insert::kill_to_line_start(primitives, doc, selection),
            Command::KillToLineEnd => insert::kill_to_line_end(primitives, doc, selection),
            Command::DeleteCharBackward => insert::delete_char_backward(primitives, doc, selection),
            Command::DeleteCharForward => insert::delete_char_forward(primitives, doc, selection),
        };

        match &result {
            CommandResult::NoOp => trace!(command = command.name(), "nothing to do"),
            CommandResult::Selection(next) => {
                debug!(command = command.name(), ranges = next.len(), "selection updated")
            }
            CommandResult::Edit { edits, .. } => {
                debug!(command = command.name(), edits = edits.len(), "edits produced")
            }
            CommandResult::Handled => debug!(command = command.name(), "handled"),
        }
        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ModeOracle::default())
    }
}

/// Host side of a command: apply the result to the snapshot it was
/// computed from and return the next document and selection. Edits go in
/// as one changeset; the selection is normalized afterwards.
pub fn apply_result(
    doc: &Document,
    selection: &Selection,
    result: CommandResult,
) -> Result<(Document, Selection), EditError> {
    match result {
        CommandResult::Selection(next) => Ok((doc.clone(), next.normalized())),
        CommandResult::Edit {
            edits,
            selection: next,
        } => {
            let changes = ChangeSet::new(edits, doc.len())?;
            let document = changes.apply(doc)?;
            let next = next.unwrap_or_else(|| selection.map(&changes));
            Ok((document, next.normalized()))
        }
        CommandResult::Handled | CommandResult::NoOp => Ok((doc.clone(), selection.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::Edit;
    use crate::mode::{Mode, UnknownModePolicy};
    use crate::selection::Range;

    #[test]
    fn test_normal_commands_noop_in_insert_mode() {
        let engine = Engine::default();
        let doc = Document::from_string("foo bar");
        let result = engine.execute(
            &Command::MoveNextWordEnd,
            &doc,
            &Selection::point(0),
            &Mode::Insert.into(),
        );
        assert_eq!(result, CommandResult::NoOp);
    }

    #[test]
    fn test_insert_commands_noop_in_normal_mode() {
        let engine = Engine::default();
        let doc = Document::from_string("foo bar");
        for command in [Command::DeleteWordBackward, Command::KillToLineStart] {
            let result = engine.execute(&command, &doc, &Selection::point(7), &Mode::Normal.into());
            assert_eq!(result, CommandResult::NoOp);
        }
    }

    #[test]
    fn test_select_mode_runs_normal_commands() {
        let engine = Engine::default();
        let doc = Document::from_string("foo bar");
        let result = engine.execute(
            &Command::MoveNextWordEnd,
            &doc,
            &Selection::point(0),
            &Mode::Select.into(),
        );
        assert_eq!(result, CommandResult::Selection(Selection::point(3)));
    }

    #[test]
    fn test_unknown_mode_uses_one_policy() {
        let doc = Document::from_string("foo bar");
        let sel = Selection::point(7);

        let conservative = Engine::default();
        assert!(conservative
            .execute(&Command::DeleteWordBackward, &doc, &sel, &ModeReport::Unavailable)
            .is_noop());
        assert!(!conservative
            .execute(&Command::ExtendToLineBounds, &doc, &sel, &ModeReport::Unavailable)
            .is_noop());

        let permissive = Engine::new(ModeOracle::new(UnknownModePolicy::Permissive));
        assert!(!permissive
            .execute(&Command::DeleteWordBackward, &doc, &sel, &ModeReport::Unavailable)
            .is_noop());
        assert!(permissive
            .execute(&Command::ExtendToLineBounds, &doc, &sel, &ModeReport::Unavailable)
            .is_noop());
    }

    struct RecordingPrimitives;

    impl BufferPrimitives for RecordingPrimitives {
        fn delete_to_line_start(&self, _: &Document, _: &Selection) -> Vec<Edit> {
            vec![Edit::delete(0, 1)]
        }
        fn delete_to_line_end(&self, _: &Document, _: &Selection) -> Vec<Edit> {
            vec![Edit::delete(1, 2)]
        }
        fn delete_char_backward(&self, _: &Document, _: &Selection) -> Vec<Edit> {
            Vec::new()
        }
        fn delete_char_forward(&self, _: &Document, _: &Selection) -> Vec<Edit> {
            vec![Edit::delete(2, 3)]
        }
    }

    #[test]
    fn test_host_primitives_are_used() {
        let engine = Engine::with_primitives(ModeOracle::default(), Box::new(RecordingPrimitives));
        let doc = Document::from_string("abcd");
        let sel = Selection::point(0);
        let insert_mode = ModeReport::Known(Mode::Insert);

        assert_eq!(
            engine.execute(&Command::KillToLineEnd, &doc, &sel, &insert_mode),
            CommandResult::Edit {
                edits: vec![Edit::delete(1, 2)],
                selection: None
            }
        );
        assert!(engine
            .execute(&Command::DeleteCharBackward, &doc, &sel, &insert_mode)
            .is_noop());
    }

    #[test]
    fn test_apply_result_remaps_cursors() {
        let doc = Document::from_string("foo bar baz");
        let selection = Selection::new(vec![Range::cursor(7), Range::cursor(11)], 1).unwrap();
        let result = insert::delete_word_backward(&doc, &selection);
        let (doc, selection) = apply_result(&doc, &selection, result).unwrap();
        assert_eq!(doc.text(), "foo  ");
        assert_eq!(selection.ranges(), &[Range::cursor(4), Range::cursor(5)]);
        assert_eq!(selection.main_index(), 1);
    }

    #[test]
    fn test_apply_result_noop_keeps_state() {
        let doc = Document::from_string("one");
        let selection = Selection::point(1);
        let (next_doc, next_sel) = apply_result(&doc, &selection, CommandResult::NoOp).unwrap();
        assert_eq!(next_doc.text(), "one");
        assert_eq!(next_sel, selection);
    }

    #[test]
    fn test_apply_result_rejects_bad_edits() {
        let doc = Document::from_string("one");
        let result = CommandResult::Edit {
            edits: vec![Edit::delete(0, 10)],
            selection: None,
        };
        assert!(apply_result(&doc, &Selection::point(0), result).is_err());
    }
}
