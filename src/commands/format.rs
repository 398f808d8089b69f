use super::CommandResult;

/// `=`: formatting needs an external formatter or language server, none
/// is wired in. The key is still consumed.
pub fn format_selections() -> CommandResult {
    CommandResult::Handled
}
