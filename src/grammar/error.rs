use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("Line {line}: expected {expected}, found {found}")]
    Syntax {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("grammar has no non-terminals, so it has no start symbol")]
    NoStartSymbol,

    #[error("symbol \"{0}\" is not part of the grammar")]
    UnknownSymbol(String),

    /// Substitution was requested for an alternative that does not start with
    /// the substituted non-terminal.
    #[error("cannot substitute \"{symbol}\": rule \"{rule}\" does not start with it")]
    NotLeadingSymbol { rule: String, symbol: String },

    #[error("unknown task \"{0}\"")]
    UnknownTask(String),

    #[error("failed to serialize result: {0}")]
    Output(String),
}

impl From<serde_json::Error> for GrammarError {
    fn from(e: serde_json::Error) -> Self {
        GrammarError::Output(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GrammarError>;
