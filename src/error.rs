//! Error types for the halo-issues report

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure that can end a report run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot create output file {}: {source}", path.display())]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed Halo payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error reports an expired or revoked session token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized))
    }
}

/// Failures talking to the Halo REST API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authorization failed. Check the API key id and secret in your credentials file.")]
    Unauthorized,

    #[error("Access denied. The API key is not allowed to read this resource.")]
    Forbidden,

    #[error("Halo resource not found: {0}")]
    NotFound(String),

    #[error("Halo API rate limit hit; retry after {0:?}")]
    RateLimit(Duration),

    #[error("Request rejected by the Halo API: {0}")]
    BadRequest(String),

    #[error("Halo API server error: {0}")]
    ServerError(String),

    #[error("Cannot reach the Halo API: {0}")]
    Network(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected Halo API response: {0}")]
    InvalidResponse(String),

    #[error("API response is missing the '{0}' field")]
    MissingField(&'static str),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection refused or host unknown".to_string()
        } else {
            err.to_string()
        };
        ApiError::Network(reason)
    }
}

/// Problems with the settings or credentials files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Malformed settings file: {0}")]
    ParseError(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credentials file not found: {}", .0.display())]
    CredentialsNotFound(PathBuf),

    #[error("No API credentials found in {}", .0.display())]
    NoCredentials(PathBuf),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unauthorized_triggers_reauthentication() {
        assert!(Error::from(ApiError::Unauthorized).is_unauthorized());
        assert!(!Error::from(ApiError::Forbidden).is_unauthorized());
        assert!(!Error::from(ApiError::ServerError("boom".into())).is_unauthorized());
        assert!(!Error::from(ConfigError::Invalid("x".into())).is_unauthorized());
    }

    #[test]
    fn test_unauthorized_points_at_credentials_file() {
        assert!(ApiError::Unauthorized.to_string().contains("credentials file"));
    }

    #[test]
    fn test_not_found_names_the_resource() {
        let err = ApiError::NotFound("/v2/issues/iss-42".to_string());
        assert!(err.to_string().contains("iss-42"));
    }

    #[test]
    fn test_rate_limit_shows_delay() {
        let msg = ApiError::RateLimit(Duration::from_secs(15)).to_string();
        assert!(msg.contains("rate limit"));
        assert!(msg.contains("15"));
    }

    #[test]
    fn test_missing_field_is_quoted() {
        let err = ApiError::MissingField("groups");
        assert!(err.to_string().contains("'groups'"));
    }

    #[test]
    fn test_config_errors_display_paths() {
        let err = ConfigError::CredentialsNotFound(PathBuf::from("/tmp/issues.auth"));
        assert!(err.to_string().contains("/tmp/issues.auth"));

        let err = ConfigError::NoCredentials(PathBuf::from("empty.auth"));
        assert!(err.to_string().contains("empty.auth"));

        let err = ConfigError::NotFound(PathBuf::from("/etc/halo.yaml"));
        assert!(err.to_string().contains("/etc/halo.yaml"));
    }

    #[test]
    fn test_read_error_names_the_file() {
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/halo/issues.auth"),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Cannot read /etc/halo/issues.auth"));
        assert!(msg.contains("valid UTF-8"));
    }

    #[test]
    fn test_output_file_error_names_the_file() {
        let err = Error::OutputFile {
            path: PathBuf::from("/no/such/dir/report.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert!(err.to_string().contains("/no/such/dir/report.json"));
    }

    #[test]
    fn test_api_errors_pass_through_unwrapped() {
        let err: Error = ApiError::Forbidden.into();
        assert_eq!(err.to_string(), ApiError::Forbidden.to_string());
    }

    #[test]
    fn test_yaml_error_becomes_parse_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("port: [8443").unwrap_err();
        let err: ConfigError = yaml_err.into();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Malformed settings file"));
    }
}
