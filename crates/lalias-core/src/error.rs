use thiserror::Error;

#[derive(Debug, Error)]
pub enum LalError {
    #[error("restricted characters in label '{0}'")]
    MalformedLabel(String),

    #[error("unexpected end of input at byte {offset}: unclosed '{delimiter}'")]
    UnexpectedEndOfInput {
        offset: usize,
        delimiter: &'static str,
    },

    #[error("alias '{0}' is missing its <<END>> terminator")]
    MissingTerminator(String),

    #[error("unexpected byte {byte:?} at byte {offset} in the body of alias '{label}': expected '{{' or <<END>>")]
    UnexpectedBodyByte {
        label: String,
        offset: usize,
        byte: char,
    },

    #[error("label not found: {0}")]
    LabelNotFound(String),

    #[error("label already exists: {0}")]
    LabelExists(String),

    #[error("insufficient inputs: expected at least {expected}, got {got}")]
    InsufficientInputs { expected: usize, got: usize },

    #[error("unexpected characters in non-negative integer input '{0}'")]
    BadNumericalInput(String),

    #[error("failed to truncate '{label}': asked for {requested} lines, only {available} present")]
    TruncateFailure {
        label: String,
        requested: usize,
        available: usize,
    },

    #[error("malformed placeholder '<<{0}>>': expected a non-negative argument index")]
    MalformedPlaceholder(String),

    #[error("unbalanced braces in line '{0}'")]
    UnbalancedLine(String),

    #[error("unknown flag: -{0}")]
    UnknownFlag(String),

    #[error("too many sub-commands: expected at most {max}, got {got}")]
    TooManySubcommands { max: usize, got: usize },

    #[error("failed to spawn shell: {0}")]
    ShellSpawn(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LalError>;
