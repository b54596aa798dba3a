//! Error handling for LaserSVG
//!
//! Provides the error types shared by every layer of the engine:
//! - Template errors (tagging, slit correction, materialization)
//! - Path data errors (tokenizing and parsing command text)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::side::Side;
use thiserror::Error;

/// Template error type
///
/// Represents failures while tagging a contour, correcting a slit or
/// turning a template back into literal path data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Thickness (target length) is not a positive finite number
    #[error("Invalid thickness {value}: must be a positive finite number")]
    InvalidThickness {
        /// The rejected thickness value.
        value: f64,
    },

    /// Stored expression text cannot be re-parsed for incremental correction
    #[error("Corrupted template at command {index}: '{text}' ({reason})")]
    TemplateCorruption {
        /// Index of the command holding the expression.
        index: usize,
        /// The offending expression text.
        text: String,
        /// Why the text was rejected.
        reason: String,
    },

    /// Materialization hit an unexpected token, variable or value
    #[error("Cannot evaluate command {index}: {reason}")]
    TemplateEvalError {
        /// Index of the command that failed to evaluate.
        index: usize,
        /// Why evaluation failed.
        reason: String,
    },

    /// No tagging or correction rule exists for this command kind
    #[error("Unsupported command '{letter}' at index {index}")]
    UnsupportedCommandKind {
        /// Index of the command.
        index: usize,
        /// The command letter.
        letter: char,
    },

    /// Not enough neighbouring commands to correct one side of a slit
    #[error("Insufficient context for {side} side of command {index}: {reason}")]
    InsufficientContext {
        /// Index of the base command.
        index: usize,
        /// The side that could not be corrected.
        side: Side,
        /// What was missing.
        reason: String,
    },

    /// A slit base does not match the thickness within tolerance
    #[error("Command {index} has length {length}, which does not match thickness {thickness}")]
    NotThicknessSegment {
        /// Index of the command.
        index: usize,
        /// The measured length of the command.
        length: f64,
        /// The thickness it was compared against.
        thickness: f64,
    },

    /// A slit base already equals its own thickness tag
    #[error("Command {index} is already tagged; slit left as is")]
    AlreadyTagged {
        /// Index of the base command.
        index: usize,
    },
}

/// Path data error type
///
/// Represents errors found while tokenizing or parsing path command text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathDataError {
    /// A character or token that does not belong to the path grammar
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Byte offset of the token in the input.
        position: usize,
        /// The token text.
        token: String,
    },

    /// A numeric token that does not parse as a number
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// Byte offset of the token in the input.
        position: usize,
        /// The token text.
        text: String,
    },

    /// An arc flag that is not 0 or 1
    #[error("Invalid arc flag '{text}' at position {position}")]
    InvalidFlag {
        /// Byte offset of the token in the input.
        position: usize,
        /// The token text.
        text: String,
    },

    /// A command ran out of arguments
    #[error("Command '{letter}' expects {expected} arguments, found {found}")]
    MissingArguments {
        /// The command letter.
        letter: char,
        /// Number of arguments the command takes.
        expected: usize,
        /// Number of arguments actually present.
        found: usize,
    },

    /// A bracketed expression appeared where only literals are allowed
    #[error("Expression found in literal path data at command {index}")]
    ExpressionInLiteral {
        /// Index of the command.
        index: usize,
    },

    /// An absolute command appeared in template text
    #[error("Absolute command '{letter}' at index {index} is not allowed in a template")]
    AbsoluteInTemplate {
        /// Index of the command.
        index: usize,
        /// The command letter.
        letter: char,
    },

    /// Path data does not begin with a move command
    #[error("Path data must start with a move command")]
    MissingInitialMove,
}

/// Main error type for LaserSVG
///
/// A unified error type that can represent any error from the engine.
#[derive(Error, Debug)]
pub enum Error {
    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Path data error
    #[error(transparent)]
    PathData(#[from] PathDataError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a template error
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::Template(_))
    }

    /// Check if this is a path data error
    pub fn is_path_data_error(&self) -> bool {
        matches!(self, Error::PathData(_))
    }

    /// Check if this is an invalid thickness error
    pub fn is_invalid_thickness(&self) -> bool {
        matches!(
            self,
            Error::Template(TemplateError::InvalidThickness { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
