#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCategory {
    Whitespace,
    Word,
    Punctuation,
}

/// Word chars are alphanumerics and `_`; everything else that is not
/// whitespace is punctuation.
pub fn categorize(c: char) -> CharCategory {
    if c.is_whitespace() {
        CharCategory::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharCategory::Word
    } else {
        CharCategory::Punctuation
    }
}

/// Length of the whitespace run at the start of `chars`.
pub fn whitespace_run(chars: &[char]) -> usize {
    chars.iter().take_while(|c| c.is_whitespace()).count()
}

/// Length of the non-whitespace run at the start of `chars`.
pub fn non_whitespace_run(chars: &[char]) -> usize {
    chars.iter().take_while(|c| !c.is_whitespace()).count()
}

pub fn is_blank(chars: &[char]) -> bool {
    chars.iter().all(|c| c.is_whitespace())
}
