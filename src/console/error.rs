//! Console error types

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// E01: No handler registered under the command name
    CommandNotFound,
    /// E02: More arguments than the tokenizer accepts
    TooManyArgs,
    /// E03: Invalid value format
    InvalidValue,
    /// E04: Missing required argument
    MissingArg,
    /// E05: Line is not valid text
    InvalidInput,
}

impl CliError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::CommandNotFound => "E01",
            Self::TooManyArgs => "E02",
            Self::InvalidValue => "E03",
            Self::MissingArg => "E04",
            Self::InvalidInput => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::CommandNotFound => "command not found",
            Self::TooManyArgs => "too many arguments",
            Self::InvalidValue => "invalid value",
            Self::MissingArg => "missing argument",
            Self::InvalidInput => "invalid input",
        }
    }
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}
