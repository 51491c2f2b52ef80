use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfMemory,
    Lexical,
    Syntax,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("out of memory")]
    OutOfMemory,
    #[error("line {line}: {message}")]
    Lexical { line: usize, message: String },
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("unable to read {name}: {message}")]
    Io { name: String, message: String },
}

impl Error {
    pub fn lexical(line: usize, message: impl Into<String>) -> Self {
        Self::Lexical {
            line,
            message: message.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }

    pub fn io(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfMemory => ErrorKind::OutOfMemory,
            Error::Lexical { .. } => ErrorKind::Lexical,
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Line the error was detected on. IO and allocation failures have none.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Lexical { line, .. } | Error::Syntax { line, .. } => Some(*line),
            Error::OutOfMemory | Error::Io { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::OutOfMemory => "out of memory",
            Error::Lexical { message, .. }
            | Error::Syntax { message, .. }
            | Error::Io { message, .. } => message,
        }
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_display_includes_line() {
        let err = Error::syntax(3, "':' expected");
        assert_eq!(err.to_string(), "line 3: ':' expected");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(err.line(), Some(3));
    }

    #[rstest::rstest]
    fn test_io_error_has_no_line() {
        let err = Error::io("missing.json", "No such file or directory");
        assert_eq!(
            err.to_string(),
            "unable to read missing.json: No such file or directory"
        );
        assert_eq!(err.line(), None);
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[rstest::rstest]
    fn test_try_reserve_maps_to_out_of_memory() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err), Error::OutOfMemory);
    }
}
