//! Parser and extension error types.

use std::io;

/// Error reported while parsing a document.
///
/// Messages follow the wording of the reference reST implementation so that
/// diagnostics stay familiar no matter which directive implementation is
/// installed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No directive is registered under this name.
    #[error("line {line}: Unknown directive type \"{name}\".")]
    UnknownDirective {
        /// Directive name as written.
        name: String,
        /// Line of the directive marker (1-indexed).
        line: usize,
    },
    /// The directive invocation is malformed or the directive failed.
    #[error("line {line}: Error in \"{name}\" directive:\n{message}.")]
    Directive {
        /// Directive name as written.
        name: String,
        /// Line of the directive marker (1-indexed).
        line: usize,
        /// Error detail without trailing period.
        message: String,
    },
    /// No role is registered under this name.
    #[error("line {line}: Unknown interpreted text role \"{name}\".")]
    UnknownRole {
        /// Role name as written.
        name: String,
        /// Line of the role (1-indexed).
        line: usize,
    },
    /// The role implementation rejected its text.
    #[error("line {line}: Error in \"{name}\" role:\n{message}.")]
    Role {
        /// Role name as written.
        name: String,
        /// Line of the role (1-indexed).
        line: usize,
        /// Error detail without trailing period.
        message: String,
    },
    /// Nested parsing went deeper than the configured limit.
    #[error("line {line}: Maximum nesting depth ({max}) exceeded")]
    DepthExceeded {
        /// Line where the limit was hit (1-indexed).
        line: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Error returned by [`Directive::run`](crate::Directive::run).
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// Invalid directive input.
    #[error("{0}")]
    Markup(String),
    /// Failure while parsing nested content; reported unchanged.
    #[error(transparent)]
    Parse(Box<ParseError>),
    /// I/O error (e.g. an included file could not be read).
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl From<ParseError> for DirectiveError {
    fn from(err: ParseError) -> Self {
        Self::Parse(Box::new(err))
    }
}

/// Error returned by [`Role::run`](crate::Role::run).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct RoleError(pub String);
