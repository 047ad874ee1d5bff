/// Error types for sqlx-query-template
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error compiling the placeholder scanner pattern
    #[error("Failed to parse SQL template: {0}")]
    Parse(#[from] regex::Error),

    /// Error from SQLx database operations
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A letter other than `d`, `f`, `#` or `a` followed `?`
    #[error("Invalid placeholder specifier '?{0}'")]
    InvalidSpecifier(char),

    /// The argument kind cannot be rendered where it was used
    #[error("Unsupported value type: {0}")]
    UnsupportedValueType(&'static str),

    /// Number of arguments differs from the number of placeholders
    #[error("Template has {expected} placeholder(s) but {supplied} argument(s) were supplied")]
    ArgumentCountMismatch { expected: usize, supplied: usize },

    /// NaN and infinities have no SQL literal
    #[error("Float value {0} has no SQL literal representation")]
    NonFiniteFloat(f64),

    /// Identifier is empty or contains a NUL character
    #[error("Invalid identifier {0:?}")]
    InvalidIdentifier(String),

    /// A `{` was found inside an already open conditional block
    #[error("Nested conditional block at byte {offset}")]
    NestedBlock { offset: usize },

    /// A `}` without an open block, or a `{` that is never closed
    #[error("Unbalanced conditional block brace at byte {offset}")]
    UnbalancedBrace { offset: usize },

    /// A skipped placeholder is not enclosed in a conditional block
    #[error("Skipped placeholder at byte {offset} is not inside a conditional block")]
    SkipOutsideBlock { offset: usize },
}

/// Result type alias for sqlx-query-template operations
pub type Result<T> = std::result::Result<T, Error>;
