/// Errors returned by table constructors and mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `put` received the wrong number of non-key fields
    DegreeMismatch {
        /// Fields the table expects (`degree - 1`)
        expected: usize,

        /// Fields that were supplied
        actual: usize,
    },

    /// A table was constructed without any columns
    NoColumns,

    /// A `Config` value is out of range
    InvalidConfig(&'static str),

    /// The key cannot be stored by this backend
    InvalidKey(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegreeMismatch { expected, actual } => write!(
                f,
                "wrong number of fields: expected {expected}, got {actual}"
            ),
            Self::NoColumns => write!(f, "a table needs at least a key column"),
            Self::InvalidConfig(reason) => write!(f, "invalid table config: {reason}"),
            Self::InvalidKey(key) => write!(f, "key {key:?} is not a single ASCII letter"),
        }
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
