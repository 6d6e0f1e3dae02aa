//! Registration error types.

/// Error returned by [`register`](crate::register).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtrasError {
    /// The configured default domain is not registered with the host parser.
    #[error("Unknown default domain \"{0}\"")]
    UnknownDomain(String),
    /// The configuration enables a plugin this build does not know about.
    #[error("Unknown plugin \"{0}\"")]
    UnknownPlugin(String),
}
