use thiserror::Error;

/// Failure taxonomy for the cognitive layer.
///
/// Every variant carries a machine-readable code and an HTTP-analog status so
/// frontends can map failures without string matching. The layer is read-only
/// and idempotent, so no variant is ever retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CogError {
    /// Malformed query text or missing mandatory clause.
    #[error("{0}")]
    Parse(String),

    /// Denylisted vocabulary found in the query.
    #[error("keyword \"{0}\" is prohibited in the read-only cognitive API")]
    Unsupported(String),

    /// Dataset exceeds a caller-supplied ceiling.
    #[error("{0}")]
    LimitExceeded(String),

    /// Unrecognized FROM target at execution time.
    #[error("unknown scope: {0}")]
    InvalidScope(String),

    /// Narrative requested over an empty filtered set (one-shot path only).
    #[error("narrative layer requires a non-empty data set for reduction")]
    NonReducible,

    /// Streaming subscription requested an unknown interpretation mode.
    #[error("mode must be DESCRIPTIVE, INTERPRETIVE or NARRATIVE, got \"{0}\"")]
    InvalidMode(String),

    /// Streaming subscription requested a window outside the allowed set.
    #[error("window must be 30, 60, 120 or 300 seconds, got {0}")]
    InvalidWindow(u64),

    /// Streaming subscription requested an unknown scope.
    #[error("invalid stream scope: {0}")]
    InvalidStreamScope(String),

    /// Unclassified internal failure; message is suppressed from clients.
    #[error("unexpected error in cognitive layer: {0}")]
    Internal(String),
}

impl CogError {
    pub fn code(&self) -> &'static str {
        match self {
            CogError::Parse(_) => "CQL_PARSE_ERROR",
            CogError::Unsupported(_) => "CQL_UNSUPPORTED_FEATURE",
            CogError::LimitExceeded(_) => "CQL_LIMIT_EXCEEDED",
            CogError::InvalidScope(_) => "CQL_INVALID_SCOPE",
            CogError::NonReducible => "CRM_NON_REDUCIBLE",
            CogError::InvalidMode(_) => "INVALID_MODE",
            CogError::InvalidWindow(_) => "INVALID_WINDOW",
            CogError::InvalidStreamScope(_) => "INVALID_SCOPE",
            CogError::Internal(_) => "INTERNAL_COG_ERROR",
        }
    }

    /// HTTP-analog status class for the failure.
    pub fn status(&self) -> u16 {
        match self {
            CogError::Parse(_) | CogError::Unsupported(_) => 400,
            CogError::LimitExceeded(_) => 413,
            CogError::InvalidScope(_)
            | CogError::NonReducible
            | CogError::InvalidMode(_)
            | CogError::InvalidWindow(_)
            | CogError::InvalidStreamScope(_) => 422,
            CogError::Internal(_) => 500,
        }
    }
}
