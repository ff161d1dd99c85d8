use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn unexpected_eof(context: impl Into<String>, needed: usize, available: usize) -> Error {
        Error(
            ErrorKind::UnexpectedEof {
                context: context.into(),
                needed,
                available,
            }
            .into(),
        )
    }

    pub fn delimiter_not_found(delim: u8, partial: Vec<u8>) -> Error {
        Error(ErrorKind::DelimiterNotFound { delim, partial }.into())
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn short_write(written: usize, expected: usize) -> Error {
        Error(ErrorKind::ShortWrite { written, expected }.into())
    }

    pub fn transfer(
        context: impl Into<String>,
        transferred: u64,
        source: std::io::Error,
    ) -> Error {
        Error(
            ErrorKind::Transfer {
                context: context.into(),
                transferred,
                source,
            }
            .into(),
        )
    }

    /// Number of bytes that were moved before the failure, for the kinds that
    /// track a partial count.
    pub fn transferred(&self) -> Option<u64> {
        match self.kind() {
            ErrorKind::UnexpectedEof { available, .. } => Some(*available as u64),
            ErrorKind::DelimiterNotFound { partial, .. } => Some(partial.len() as u64),
            ErrorKind::ShortWrite { written, .. } => Some(*written as u64),
            ErrorKind::Transfer { transferred, .. } => Some(*transferred),
            ErrorKind::InvalidArgument { .. } | ErrorKind::InvalidUtf8 { .. } => None,
        }
    }

    /// Takes the bytes consumed by a delimiter scan that ran off the end.
    pub fn into_partial(self) -> Option<Vec<u8>> {
        match self.into_kind() {
            ErrorKind::DelimiterNotFound { partial, .. } => Some(partial),
            _ => None,
        }
    }

    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnexpectedEof { .. })
    }

    pub fn is_delimiter_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::DelimiterNotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("unexpected end of data in {context}: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        context: String,
        needed: usize,
        available: usize,
    },

    #[error("delimiter {delim:#04x} not found after {} bytes", partial.len())]
    DelimiterNotFound { delim: u8, partial: Vec<u8> },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("short write: {written} of {expected} bytes accepted")]
    ShortWrite { written: usize, expected: usize },

    #[error("IO error for '{context}' after {transferred} bytes: {source}")]
    Transfer {
        context: String,
        transferred: u64,
        source: std::io::Error,
    },

    #[error("buffer content is not valid UTF-8: {source}")]
    InvalidUtf8 { source: std::str::Utf8Error },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        ErrorKind::InvalidUtf8 { source: e }.into()
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e.kind() {
            ErrorKind::UnexpectedEof { .. } | ErrorKind::DelimiterNotFound { .. } => {
                std::io::ErrorKind::UnexpectedEof
            }
            ErrorKind::InvalidArgument { .. } => std::io::ErrorKind::InvalidInput,
            ErrorKind::ShortWrite { .. } => std::io::ErrorKind::WriteZero,
            ErrorKind::InvalidUtf8 { .. } => std::io::ErrorKind::InvalidData,
            ErrorKind::Transfer { source, .. } => source.kind(),
        };
        std::io::Error::new(kind, e)
    }
}
