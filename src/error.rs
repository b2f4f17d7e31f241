use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration absent: {0}")]
    ConfigurationAbsent(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("Counter store error: {0}")]
    StoreConnection(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::StoreConnection(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::UpstreamAuth("status 400".to_string());
        assert_eq!(err.to_string(), "Upstream authentication failed: status 400");

        let err = AppError::ConfigurationAbsent("REDIS_URL".to_string());
        assert_eq!(err.to_string(), "Configuration absent: REDIS_URL");
    }

    #[test]
    fn test_redis_error_maps_to_store_connection() {
        let redis_err = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        let err: AppError = redis_err.into();
        assert!(matches!(err, AppError::StoreConnection(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
