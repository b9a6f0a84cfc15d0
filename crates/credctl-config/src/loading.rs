//! Config file discovery and layering.
//!
//! The user file (`~/.credctl/config.toml`) is read first, then the project
//! file (`./.credctl/config.toml`) is layered on top of it. Missing files are
//! skipped; files that exist but fail to parse are errors.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::ConfigError;
use crate::types::{AlibabaCloudConfig, CredctlConfig, TeardownDefaults};

const CONFIG_DIR: &str = ".credctl";
const CONFIG_FILE: &str = "config.toml";

/// Path of the per-user config file, if a home directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Path of the project config file relative to the current directory.
pub fn project_config_path() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load the layered configuration (user, then project).
pub fn load_hierarchy() -> Result<CredctlConfig, ConfigError> {
    let mut config = CredctlConfig::default();

    if let Some(user_path) = user_config_path()
        && let Some(user_config) = load_config_file(&user_path)?
    {
        config = merge_configs(config, user_config);
    }

    if let Some(project_config) = load_config_file(&project_config_path())? {
        config = merge_configs(config, project_config);
    }

    Ok(config)
}

/// Read and parse a single config file.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Option<CredctlConfig>, ConfigError> {
    if !path.exists() {
        debug!(event = "config.load_skipped", path = %path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config: CredctlConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    info!(event = "config.loaded", path = %path.display());
    Ok(Some(config))
}

/// Layer `override_config` on top of `base`; set fields in the override win.
pub fn merge_configs(base: CredctlConfig, override_config: CredctlConfig) -> CredctlConfig {
    CredctlConfig {
        alibabacloud: AlibabaCloudConfig {
            region: override_config
                .alibabacloud
                .region
                .or(base.alibabacloud.region),
            endpoint: override_config
                .alibabacloud
                .endpoint
                .or(base.alibabacloud.endpoint),
            access_key_id: override_config
                .alibabacloud
                .access_key_id
                .or(base.alibabacloud.access_key_id),
            access_key_secret: override_config
                .alibabacloud
                .access_key_secret
                .or(base.alibabacloud.access_key_secret),
        },
        teardown: TeardownDefaults {
            ignore_missing: override_config
                .teardown
                .ignore_missing
                .or(base.teardown.ignore_missing),
            enable_tech_preview: override_config
                .teardown
                .enable_tech_preview
                .or(base.teardown.enable_tech_preview),
        },
    }
}
