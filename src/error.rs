use std::fmt;

/// Where an invalid input was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// The request as a whole (e.g. mismatched word set / definition counts)
    Request,
    /// The word set at this index of the request
    WordSet(usize),
    /// The segmentation definition at this index of the request
    Definition(usize),
    /// The value / weight arrays handed to an aggregation
    Values,
}

impl fmt::Display for InputContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputContext::Request => write!(f, "request"),
            InputContext::WordSet(i) => write!(f, "word set #{}", i),
            InputContext::Definition(i) => write!(f, "definition #{}", i),
            InputContext::Values => write!(f, "values"),
        }
    }
}

/// Errors returned by `subset_frequency`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Shape or precondition violation in the caller's input.
    #[error("invalid input in {context}: {reason}")]
    InvalidInput {
        context: InputContext,
        reason: String,
    },

    /// The corpus adapter could not supply a document count or postings.
    #[error("corpus adapter failure: {0}")]
    AdapterFailure(String),
}

/// Result type alias for `subset_frequency` operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(context: InputContext, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            context,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    pub fn is_adapter_failure(&self) -> bool {
        matches!(self, Error::AdapterFailure(_))
    }

    /// The request position the error refers to, if any
    pub fn context(&self) -> Option<InputContext> {
        match self {
            Error::InvalidInput { context, .. } => Some(*context),
            Error::AdapterFailure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid(InputContext::WordSet(3), "31 words exceed the limit of 30");
        assert_eq!(
            err.to_string(),
            "invalid input in word set #3: 31 words exceed the limit of 30"
        );
        let err = Error::AdapterFailure("index closed".to_string());
        assert_eq!(err.to_string(), "corpus adapter failure: index closed");
    }

    #[test]
    fn test_error_kinds() {
        let err = Error::invalid(InputContext::Definition(1), "bad mask");
        assert!(err.is_invalid_input());
        assert!(!err.is_adapter_failure());
        assert_eq!(err.context(), Some(InputContext::Definition(1)));
        assert!(Error::AdapterFailure(String::new()).is_adapter_failure());
        assert_eq!(Error::AdapterFailure(String::new()).context(), None);
    }
}
