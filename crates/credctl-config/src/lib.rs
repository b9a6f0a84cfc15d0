//! Configuration for credctl.
//!
//! Layered TOML files (`~/.credctl/config.toml`, then `./.credctl/config.toml`)
//! provide defaults; [`resolve_teardown_config`] folds in command-line values
//! and produces the immutable [`TeardownConfig`] used by `credctl-core`.

pub mod errors;
pub mod loading;
pub mod types;
pub mod validation;

pub use errors::ConfigError;
pub use loading::{load_config_file, load_hierarchy, merge_configs};
pub use types::{
    AlibabaCloudConfig, CredctlConfig, DEFAULT_REGION, MissingPolicyMode, TeardownConfig,
    TeardownDefaults, TeardownOverrides, mask_access_key_id,
};
pub use validation::{resolve_teardown_config, validate_name_prefix};
