use clap::{ArgAction, Parser, ValueEnum};
use helix_motions::config::RcLoader;
use helix_motions::keymap::{Keymap, parse_key};
use helix_motions::logging::{LoggingConfig, init_logging};
use helix_motions::selection::SelectionError;
use helix_motions::{
    Command, Document, Engine, Mode, ModeOracle, ModeReport, Range, Selection, apply_result,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Normal,
    Insert,
    Select,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Normal => Mode::Normal,
            ModeArg::Insert => Mode::Insert,
            ModeArg::Select => Mode::Select,
        }
    }
}

/// Apply Helix-style motions and selection commands to a file.
#[derive(Debug, Parser)]
#[command(name = "helix-motions", version, about)]
struct Args {
    /// File to read
    file: PathBuf,

    /// Space separated keys, e.g. "W W Shift-x"
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Initial cursor offset (repeatable)
    #[arg(short = 'c', long = "cursor")]
    cursors: Vec<usize>,

    /// Editor mode the keys are pressed in
    #[arg(short, long, value_enum, default_value_t = ModeArg::Normal)]
    mode: ModeArg,

    /// Line number for G
    #[arg(short, long)]
    goto: Option<usize>,

    /// Print the selection only
    #[arg(long)]
    selection: bool,

    /// RC file to use instead of the .helixrc lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Raise the log level (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&LoggingConfig::from_verbosity(args.verbose))?;

    let config = match &args.config {
        Some(path) => RcLoader::load_from(path)?,
        None => RcLoader::load_config(),
    };
    info!(
        helix = config.enable_helix_keybindings,
        additional = config.enable_additional_keybindings,
        cursor_in_insert_mode = ?config.cursor_in_insert_mode,
        "configuration loaded"
    );

    let mut document = Document::from_file(&args.file)?;
    let mut selection = initial_selection(&document, &args.cursors)?;
    let mode = ModeReport::Known(args.mode.into());
    let engine = Engine::new(ModeOracle::new(config.unknown_mode));
    let keymap = Keymap::from_config(&config);

    for notation in args.keys.split_whitespace() {
        let key_event = parse_key(notation)?;
        let Some(command) = keymap.lookup(&key_event) else {
            warn!(key = notation, "no binding for key");
            continue;
        };
        let command = match command {
            Command::GotoLine(None) => Command::GotoLine(args.goto),
            other => other,
        };

        let result = engine.execute(&command, &document, &selection, &mode);
        (document, selection) = apply_result(&document, &selection, result)?;
    }

    if !args.selection {
        let text = document.text_with_line_ending();
        print!("{}", text);
        if !text.ends_with('\n') && !text.ends_with('\r') {
            println!();
        }
    }
    println!("{}", format_selection(&selection));

    Ok(())
}

fn initial_selection(document: &Document, cursors: &[usize]) -> Result<Selection, SelectionError> {
    if cursors.is_empty() {
        return Ok(Selection::point(0));
    }
    let ranges = cursors
        .iter()
        .map(|&pos| Range::cursor(pos.min(document.len())))
        .collect();
    Ok(Selection::new(ranges, 0)?.normalized())
}

fn format_selection(selection: &Selection) -> String {
    selection
        .iter()
        .enumerate()
        .map(|(idx, range)| {
            let marker = if idx == selection.main_index() { "*" } else { "" };
            format!("{}..{}{}", range.anchor, range.head, marker)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
