//! Cache configuration

use crate::error::{Error, Result};

/// Construction parameters for [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub capacity: usize,

    /// Optional soft upper bound on `capacity`
    pub max_capacity: Option<usize>,
}

impl CacheConfig {
    /// Create a config with the given capacity and no upper bound
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_capacity: None,
        }
    }

    /// Reject capacities above `limit`
    pub fn with_max_capacity(mut self, limit: usize) -> Self {
        self.max_capacity = Some(limit);
        self
    }

    /// Check that the capacity is at least 1 and within the soft limit
    pub fn validate(&self) -> Result<()> {
        let too_large = self
            .max_capacity
            .is_some_and(|limit| self.capacity > limit);

        if self.capacity == 0 || too_large {
            return Err(Error::invalid_capacity(self.capacity, self.max_capacity));
        }
        Ok(())
    }
}

/// Convert a signed capacity request into a `usize`
///
/// Zero and negative values are rejected with [`Error::InvalidCapacity`].
pub fn checked_capacity(requested: i64) -> Result<usize> {
    match usize::try_from(requested) {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(Error::InvalidCapacity {
            requested,
            limit: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_valid() {
        assert!(CacheConfig::new(1).validate().is_ok());
        assert!(CacheConfig::new(10_000).validate().is_ok());
        assert!(CacheConfig::new(3000).with_max_capacity(3000).validate().is_ok());
    }

    #[test]
    fn test_config_zero() {
        let err = CacheConfig::new(0).validate().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCapacity {
                requested: 0,
                limit: None
            }
        );
    }

    #[test]
    fn test_config_above_limit() {
        let err = CacheConfig::new(3001)
            .with_max_capacity(3000)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCapacity {
                requested: 3001,
                limit: Some(3000)
            }
        );
    }

    #[test]
    fn test_checked_capacity() {
        assert_eq!(checked_capacity(2), Ok(2));
        assert!(checked_capacity(0).is_err());
        assert_eq!(
            checked_capacity(-5),
            Err(Error::InvalidCapacity {
                requested: -5,
                limit: None
            })
        );
    }
}
