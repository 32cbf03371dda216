//! Application-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_error_display() {
        let e = AppError::Config("missing field".into());
        assert!(e.to_string().contains("missing field"));
    }

    #[test]
    fn server_error_display() {
        let e = AppError::Server("bind failed on 127.0.0.1:3000".into());
        assert!(e.to_string().starts_with("server error"));
        assert!(e.to_string().contains("127.0.0.1:3000"));
    }

    #[test]
    fn logger_error_is_a_std_error() {
        let e = AppError::Logger("unrecognised log level: 'loud'".into());
        assert!(e.to_string().starts_with("logger error"));
        let _: &dyn Error = &e;
    }
}
