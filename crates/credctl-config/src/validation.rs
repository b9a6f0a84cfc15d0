use tracing::debug;

use crate::errors::ConfigError;
use crate::types::{
    ACCESS_KEY_ID_ENV, ACCESS_KEY_SECRET_ENV, CredctlConfig, DEFAULT_REGION, MissingPolicyMode,
    TeardownConfig, TeardownOverrides,
};

/// RAM limits policy names to 128 characters.
const MAX_POLICY_NAME_LEN: usize = 128;

/// Length of the fixed parts of a policy name: two hyphens and `policy`.
const POLICY_NAME_OVERHEAD: usize = "--policy".len();

/// Merge command-line overrides, the environment, and file config into a
/// validated [`TeardownConfig`].
///
/// Precedence for each setting is CLI flag, then environment (access keys
/// only), then config file, then built-in default.
pub fn resolve_teardown_config(
    overrides: TeardownOverrides,
    file_config: &CredctlConfig,
) -> Result<TeardownConfig, ConfigError> {
    let name = non_empty(overrides.name).ok_or(ConfigError::MissingField {
        field: "name",
        hint: "pass --name",
    })?;
    validate_name_prefix(&name)?;

    let credentials_requests_dir = overrides
        .credentials_requests_dir
        .filter(|dir| !dir.as_os_str().is_empty())
        .ok_or(ConfigError::MissingField {
            field: "credentials_requests_dir",
            hint: "pass --credentials-requests-dir",
        })?;

    let user_name = non_empty(overrides.user_name).ok_or(ConfigError::MissingField {
        field: "user_name",
        hint: "pass --user-name",
    })?;

    let access_key_id = non_empty(overrides.access_key_id)
        .or_else(|| non_empty(std::env::var(ACCESS_KEY_ID_ENV).ok()))
        .or_else(|| non_empty(file_config.alibabacloud.access_key_id.clone()))
        .ok_or(ConfigError::MissingField {
            field: "access_key_id",
            hint: "pass --root-access-key or set ALIBABA_CLOUD_ACCESS_KEY_ID",
        })?;

    let access_key_secret = non_empty(overrides.access_key_secret)
        .or_else(|| non_empty(std::env::var(ACCESS_KEY_SECRET_ENV).ok()))
        .or_else(|| non_empty(file_config.alibabacloud.access_key_secret.clone()))
        .ok_or(ConfigError::MissingField {
            field: "access_key_secret",
            hint: "pass --root-access-key-secret or set ALIBABA_CLOUD_ACCESS_KEY_SECRET",
        })?;

    let region = non_empty(overrides.region)
        .or_else(|| non_empty(file_config.alibabacloud.region.clone()))
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let endpoint = non_empty(file_config.alibabacloud.endpoint.clone());
    if let Some(endpoint) = &endpoint
        && !(endpoint.starts_with("https://") || endpoint.starts_with("http://"))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("endpoint '{}' must start with http:// or https://", endpoint),
        });
    }

    let ignore_missing =
        overrides.ignore_missing || file_config.teardown.ignore_missing.unwrap_or(false);
    let enable_tech_preview = overrides.enable_tech_preview
        || file_config.teardown.enable_tech_preview.unwrap_or(false);

    let config = TeardownConfig::new(
        name,
        credentials_requests_dir,
        user_name,
        region,
        endpoint,
        access_key_id,
        access_key_secret,
        MissingPolicyMode::from_ignore_flag(ignore_missing),
        enable_tech_preview,
    );

    debug!(event = "config.teardown_resolved", config = ?config);

    Ok(config)
}

/// Check that a resource-name prefix can produce valid RAM policy names.
pub fn validate_name_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "name prefix must not be empty".to_string(),
        });
    }

    if let Some(bad) = prefix
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "name prefix '{}' contains '{}'; only letters, digits and '-' are allowed",
                prefix, bad
            ),
        });
    }

    if prefix.len() + POLICY_NAME_OVERHEAD >= MAX_POLICY_NAME_LEN {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "name prefix '{}' leaves no room for a secret name within {} characters",
                prefix, MAX_POLICY_NAME_LEN
            ),
        });
    }

    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
