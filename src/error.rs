//! Errors raised while acquiring input.  Parsing itself cannot fail.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8 (line {line})")]
    InvalidUtf8 {
        /// 1-based line containing the first invalid byte.
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl Error {
    /// Builds an [`Error::InvalidUtf8`] from a failed conversion of `input`.
    pub(crate) fn invalid_utf8(input: &[u8], source: std::str::Utf8Error) -> Self {
        let line = input[..source.valid_up_to()]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        Error::InvalidUtf8 { line, source }
    }
}
