use std::error::Error;

#[derive(Debug)]
pub enum ConfigError {
    ConfigParseError {
        path: String,
        message: String,
    },
    MissingField {
        field: &'static str,
        hint: &'static str,
    },
    InvalidConfiguration {
        message: String,
    },
    IoError {
        source: std::io::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigParseError { path, message } => {
                write!(f, "Failed to parse config file '{}': {}", path, message)
            }
            ConfigError::MissingField { field, hint } => {
                write!(f, "Missing required setting '{}' ({})", field, hint)
            }
            ConfigError::InvalidConfiguration { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConfigError::IoError { source } => {
                write!(f, "IO error reading config: {}", source)
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::IoError { source } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(source: std::io::Error) -> Self {
        ConfigError::IoError { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = ConfigError::MissingField {
            field: "user_name",
            hint: "pass --user-name",
        };
        assert_eq!(
            error.to_string(),
            "Missing required setting 'user_name' (pass --user-name)"
        );
    }

    #[test]
    fn test_io_error_has_source() {
        let error: ConfigError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(error.source().is_some());
        assert!(error.to_string().contains("denied"));
    }

    #[test]
    fn test_parse_error_has_no_source() {
        let error = ConfigError::ConfigParseError {
            path: "/tmp/config.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert!(error.source().is_none());
        assert!(error.to_string().contains("/tmp/config.toml"));
    }
}
