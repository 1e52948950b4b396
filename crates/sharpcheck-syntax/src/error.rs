//! Error types shared by the sharpcheck crates.
//!
//! Analysis is fail-fast: the parser stops at the first problem and returns
//! a single [`Error`] describing it. Every error carries an [`ErrorKind`],
//! a human-readable message and the location of the offending token.
//!
//! The lexer never produces an [`Error`]; characters it cannot classify are
//! skipped and reported as warnings instead.
//!
//! # Examples
//!
//! ```rust
//! use sharpcheck_syntax::error::{Error, ErrorKind, Result, error_at};
//!
//! fn check_name(name: &str, line: usize) -> Result<()> {
//!     if name.is_empty() {
//!         error_at(ErrorKind::Syntax, line, 1, "Expected IDENTIFIER")
//!     } else {
//!         Ok(())
//!     }
//! }
//!
//! let err = check_name("", 4).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::Syntax);
//! assert_eq!(err.to_string(), "Expected IDENTIFIER at 4:1");
//!
//! let dup = Error::duplicate("Variable 'x' is already declared in this scope", 7, 9);
//! assert_eq!(dup.line, 7);
//! ```

use std::fmt;

/// The closed set of fatal analysis failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A token did not match what the grammar expects at that point.
    Syntax,
    /// A name was declared twice in the same scope.
    DuplicateDeclaration,
    /// A name was used without being declared in any visible scope.
    UndeclaredVariable,
    /// Operand or assignment types disagree.
    TypeMismatch,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax error",
            ErrorKind::DuplicateDeclaration => "Duplicate declaration",
            ErrorKind::UndeclaredVariable => "Undeclared variable",
            ErrorKind::TypeMismatch => "Type mismatch",
        }
    }

    /// Stable identifier used in machine-readable reports.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::DuplicateDeclaration => "DuplicateDeclaration",
            ErrorKind::UndeclaredVariable => "UndeclaredVariable",
            ErrorKind::TypeMismatch => "TypeMismatch",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An error found while analyzing a program.
///
/// # Fields
///
/// - `kind`: which class of failure this is
/// - `msg`: human-readable description
/// - `line`: 1-based line of the offending token
/// - `col`: 1-based column of the offending token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Failure category
    pub kind: ErrorKind,

    /// Human-readable error message
    pub msg: String,

    /// Line number in source file (1-based)
    pub line: usize,

    /// Column number in source file (1-based)
    pub col: usize,
}

impl Error {
    /// Creates an error of the given kind at a source location.
    pub fn new(kind: ErrorKind, msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            msg: msg.into(),
            line,
            col,
        }
    }

    pub fn syntax(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::new(ErrorKind::Syntax, msg, line, col)
    }

    pub fn duplicate(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::new(ErrorKind::DuplicateDeclaration, msg, line, col)
    }

    pub fn undeclared(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::new(ErrorKind::UndeclaredVariable, msg, line, col)
    }

    pub fn type_mismatch(msg: impl Into<String>, line: usize, col: usize) -> Self {
        Self::new(ErrorKind::TypeMismatch, msg, line, col)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.msg, self.line, self.col)
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience function to create an error result with a source location.
///
/// Shorthand for `Err(Error::new(kind, msg, line, col))`.
pub fn error_at<T>(kind: ErrorKind, line: usize, col: usize, msg: impl Into<String>) -> Result<T> {
    Err(Error::new(kind, msg, line, col))
}
