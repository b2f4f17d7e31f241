//! Ordered-attempt results for the aggregation pipelines.
//!
//! Each pipeline resolves to a real value, a defined substitute, or a
//! failure. What a failure turns into is decided per integration by the
//! caller, not here.

use tracing::{debug, warn};

use crate::error::{AppError, Result};

#[derive(Debug)]
pub enum Resolved<T> {
    /// Fresh data from a successful upstream round trip.
    Value(T),
    /// A defined substitute: an "absent" sentinel or last-known-good data.
    Fallback(T),
    Failed(AppError),
}

impl<T> Resolved<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Resolved::Value(value),
            Err(err) => Resolved::Failed(err),
        }
    }

    /// `Ok(None)` means the upstream answered but had nothing to report.
    pub fn from_option<F>(result: Result<Option<T>>, absent: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match result {
            Ok(Some(value)) => Resolved::Value(value),
            Ok(None) => Resolved::Fallback(absent()),
            Err(err) => Resolved::Failed(err),
        }
    }

    /// Replace a failure with last-known-good data, if there is any.
    pub fn or_stale(self, stale: Option<T>) -> Self {
        match (self, stale) {
            (Resolved::Failed(err), Some(stale)) => {
                warn!("Serving stale data after upstream failure: {}", err);
                Resolved::Fallback(stale)
            }
            (resolved, _) => resolved,
        }
    }

    pub fn map<U, F>(self, f: F) -> Resolved<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Resolved::Value(v) => Resolved::Value(f(v)),
            Resolved::Fallback(v) => Resolved::Fallback(f(v)),
            Resolved::Failed(err) => Resolved::Failed(err),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }

    /// Collapse a failure into `fallback`, logging the cause under `integration`.
    pub fn unwrap_or_fallback<F>(self, integration: &str, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Resolved::Value(v) | Resolved::Fallback(v) => v,
            Resolved::Failed(AppError::ConfigurationAbsent(what)) => {
                debug!(integration, "{} not configured, using fallback", what);
                fallback()
            }
            Resolved::Failed(err) => {
                warn!(integration, error = %err, "Upstream unavailable, using fallback");
                fallback()
            }
        }
    }

    /// Surface a failure to the caller instead of substituting a value.
    pub fn into_result(self) -> Result<T> {
        match self {
            Resolved::Value(v) | Resolved::Fallback(v) => Ok(v),
            Resolved::Failed(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> AppError {
        AppError::UpstreamFetch("status 503".to_string())
    }

    #[test]
    fn test_from_option_tags_each_branch() {
        assert!(matches!(
            Resolved::from_option(Ok(Some(1)), || 0),
            Resolved::Value(1)
        ));
        assert!(matches!(
            Resolved::from_option(Ok(None), || 0),
            Resolved::Fallback(0)
        ));
        assert!(matches!(
            Resolved::<i32>::from_option(Err(failure()), || 0),
            Resolved::Failed(_)
        ));
    }

    #[test]
    fn test_unwrap_or_fallback_swallows_failure() {
        let value = Resolved::<i32>::Failed(failure()).unwrap_or_fallback("test", || -1);
        assert_eq!(value, -1);

        let value = Resolved::Value(5).unwrap_or_fallback("test", || -1);
        assert_eq!(value, 5);
    }

    #[test]
    fn test_absent_configuration_uses_fallback() {
        let value = Resolved::<i32>::Failed(AppError::ConfigurationAbsent("REDIS_URL".into()))
            .unwrap_or_fallback("analytics", || -1);
        assert_eq!(value, -1);
    }

    #[test]
    fn test_or_stale_only_replaces_failures() {
        let resolved = Resolved::<i32>::Failed(failure()).or_stale(Some(7));
        assert!(resolved.is_fallback());
        assert_eq!(resolved.into_result().unwrap(), 7);

        let resolved = Resolved::Value(9).or_stale(Some(7));
        assert!(matches!(resolved, Resolved::Value(9)));

        let resolved = Resolved::<i32>::Failed(failure()).or_stale(None);
        assert!(resolved.into_result().is_err());
    }

    #[test]
    fn test_map_keeps_tag() {
        assert!(Resolved::Fallback(2).map(|v| v * 10).is_fallback());
        assert!(matches!(Resolved::Value(2).map(|v| v * 10), Resolved::Value(20)));
    }
}
