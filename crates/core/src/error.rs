use thiserror::Error;

/// Errors raised while reading bracket strings, classification codes and
/// annotation documents. Parsing is all-or-nothing: no partial result is
/// returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("unmatched closing bracket {symbol:?} at position {position}")]
    UnmatchedClosingBracket { symbol: char, position: usize },

    #[error("unmatched opening bracket {symbol:?} at position {position}")]
    UnmatchedOpeningBracket { symbol: char, position: usize },

    #[error("invalid stericity code {code:?} (expected c or t)")]
    InvalidStericityCode { code: char },

    #[error("invalid edge code {code:?} (expected w, h or s)")]
    InvalidEdgeCode { code: char },

    #[error("classification code {code:?} must have exactly 3 letters")]
    InvalidCodeLength { code: String },

    #[error("line {line}: expected `<code> <brackets>` or `seq <sequence>`")]
    MalformedLine { line: usize },

    #[error("line {line}: bad style {token:?} (expected color=<color> or thickness=<number>)")]
    InvalidStyle { line: usize, token: String },

    #[error("line {line}: sequence given more than once")]
    DuplicateSequence { line: usize },

    #[error("line {line}: bracket string has length {found}, sequence has length {expected}")]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<StructureError>,
    },

    #[error("no position given for nucleotide {position}")]
    MissingPosition { position: usize },
}

impl StructureError {
    /// Attach a 1-based document line number.
    pub(crate) fn at_line(self, line: usize) -> Self {
        StructureError::Line {
            line,
            source: Box::new(self),
        }
    }
}
