//! Error types for lrukit

use std::fmt;

/// Result type alias for lrukit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity below 1, or above the configured soft limit
    InvalidCapacity {
        /// Capacity that was asked for, saturated at `i64::MAX`
        requested: i64,
        /// Upper limit in force when the request was rejected, if any
        limit: Option<usize>,
    },
}

impl Error {
    /// Capacities above `i64::MAX` are reported as `i64::MAX`.
    pub(crate) fn invalid_capacity(requested: usize, limit: Option<usize>) -> Self {
        Error::InvalidCapacity {
            requested: i64::try_from(requested).unwrap_or(i64::MAX),
            limit,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity {
                requested,
                limit: Some(limit),
            } => write!(f, "Invalid capacity: {} (must be between 1 and {})", requested, limit),
            Error::InvalidCapacity {
                requested,
                limit: None,
            } => write!(f, "Invalid capacity: {} (must be at least 1)", requested),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_limit() {
        let err = Error::InvalidCapacity {
            requested: 0,
            limit: None,
        };
        assert_eq!(err.to_string(), "Invalid capacity: 0 (must be at least 1)");
    }

    #[test]
    fn test_display_with_limit() {
        let err = Error::invalid_capacity(3000, Some(2999));
        assert_eq!(
            err.to_string(),
            "Invalid capacity: 3000 (must be between 1 and 2999)"
        );
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_capacity_saturates() {
        let err = Error::invalid_capacity(usize::MAX, Some(10));
        assert_eq!(
            err,
            Error::InvalidCapacity {
                requested: i64::MAX,
                limit: Some(10)
            }
        );
    }
}
