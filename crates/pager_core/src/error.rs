use std::fmt;

/// Error reported by a query backend alongside a completion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub message: String,
}

impl QueryError {
    pub fn new(kind: QueryErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(QueryErrorKind::ConnectionFailed, message)
    }

    pub fn cache_miss() -> Self {
        Self::new(QueryErrorKind::CacheMiss, "results not cached")
    }

    /// A cache miss is expected to be followed by a network-backed completion,
    /// so it never counts as a failure of the request.
    pub fn is_cache_miss(&self) -> bool {
        self.kind == QueryErrorKind::CacheMiss
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryErrorKind {
    ConnectionFailed,
    CacheMiss,
    Other { code: i32 },
}

impl QueryErrorKind {
    pub const CONNECTION_FAILED_CODE: i32 = 100;
    pub const CACHE_MISS_CODE: i32 = 120;

    /// Maps a backend's numeric error code onto the taxonomy.
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::CONNECTION_FAILED_CODE => QueryErrorKind::ConnectionFailed,
            Self::CACHE_MISS_CODE => QueryErrorKind::CacheMiss,
            code => QueryErrorKind::Other { code },
        }
    }

    pub fn code(self) -> i32 {
        match self {
            QueryErrorKind::ConnectionFailed => Self::CONNECTION_FAILED_CODE,
            QueryErrorKind::CacheMiss => Self::CACHE_MISS_CODE,
            QueryErrorKind::Other { code } => code,
        }
    }
}

impl fmt::Display for QueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryErrorKind::ConnectionFailed => write!(f, "connection failed"),
            QueryErrorKind::CacheMiss => write!(f, "cache miss"),
            QueryErrorKind::Other { code } => write!(f, "query error {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryError, QueryErrorKind};

    #[test]
    fn codes_map_both_ways() {
        assert_eq!(QueryErrorKind::from_code(100), QueryErrorKind::ConnectionFailed);
        assert_eq!(QueryErrorKind::from_code(120), QueryErrorKind::CacheMiss);
        assert_eq!(
            QueryErrorKind::from_code(141),
            QueryErrorKind::Other { code: 141 }
        );
        assert_eq!(QueryErrorKind::Other { code: 141 }.code(), 141);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = QueryError::connection_failed("host unreachable");
        assert_eq!(err.to_string(), "connection failed: host unreachable");
        assert!(!err.is_cache_miss());
        assert!(QueryError::cache_miss().is_cache_miss());
    }
}
