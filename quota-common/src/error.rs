//! Wire-format error types for the client-quota protocol crates

/// A specialized `Result` type for wire-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// A failure of the primitive codec.
///
/// Application-level failures reported by a broker (a non-zero error code in
/// a response) are data and never surface as this type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The buffer ended before the value was complete
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes required by the value being read
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// A string length prefix below the null sentinel
    #[error("Invalid string length: {0}")]
    InvalidLength(i16),

    /// An array count that is negative or implausibly large
    #[error("Invalid array count: {0}")]
    InvalidCount(i32),

    /// A string whose byte length does not fit an INT16 prefix
    #[error("String too long to encode: {0} bytes")]
    StringTooLong(usize),

    /// A sequence whose length does not fit an INT32 prefix
    #[error("Too many elements to encode: {0}")]
    TooManyElements(usize),

    /// String bytes that are not valid UTF-8
    #[error("Invalid UTF-8 in string: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Returns true if the error means more bytes were expected.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }
}

impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Truncated { .. } => std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err),
            e => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}
