use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Region used for RAM calls when none is configured.
pub const DEFAULT_REGION: &str = "cn-hangzhou";

/// Environment variable consulted for the access key id when no flag is given.
pub const ACCESS_KEY_ID_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";

/// Environment variable consulted for the access key secret when no flag is given.
pub const ACCESS_KEY_SECRET_ENV: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";

/// Shorten an access key id for logs: the first four characters, then `****`.
pub fn mask_access_key_id(id: &str) -> String {
    let visible: String = id.chars().take(4).collect();
    format!("{}****", visible)
}

/// How teardown treats remote responses saying the policy is already gone.
///
/// `Fail` treats every remote error as fatal. `Ignore` lets a detach that
/// reports "not attached" fall through to the delete, and treats a delete
/// that reports "policy not found" as done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicyMode {
    #[default]
    Fail,
    Ignore,
}

impl MissingPolicyMode {
    pub fn from_ignore_flag(ignore_missing: bool) -> Self {
        if ignore_missing {
            MissingPolicyMode::Ignore
        } else {
            MissingPolicyMode::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MissingPolicyMode::Fail => "fail",
            MissingPolicyMode::Ignore => "ignore",
        }
    }
}

impl std::fmt::Display for MissingPolicyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// On-disk configuration, as read from `config.toml`.
///
/// Every field is optional so that user and project files can be layered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredctlConfig {
    pub alibabacloud: AlibabaCloudConfig,
    pub teardown: TeardownDefaults,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlibabaCloudConfig {
    pub region: Option<String>,
    /// Override for the RAM endpoint, e.g. a GovCloud or private endpoint.
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
}

impl std::fmt::Debug for AlibabaCloudConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlibabaCloudConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field(
                "access_key_id",
                &self.access_key_id.as_deref().map(mask_access_key_id),
            )
            .field(
                "access_key_secret",
                &self.access_key_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeardownDefaults {
    pub ignore_missing: Option<bool>,
    pub enable_tech_preview: Option<bool>,
}

/// Values supplied on the command line for a `delete-ram-policy` run.
#[derive(Debug, Clone, Default)]
pub struct TeardownOverrides {
    pub name: Option<String>,
    pub credentials_requests_dir: Option<PathBuf>,
    pub user_name: Option<String>,
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub ignore_missing: bool,
    pub enable_tech_preview: bool,
}

/// Fully resolved, immutable settings for one teardown run.
///
/// Built once at the CLI boundary by [`crate::resolve_teardown_config`] and
/// passed by reference to the core.
#[derive(Clone, PartialEq, Eq)]
pub struct TeardownConfig {
    name_prefix: String,
    credentials_requests_dir: PathBuf,
    user_name: String,
    region: String,
    endpoint: Option<String>,
    access_key_id: String,
    access_key_secret: String,
    missing_policy: MissingPolicyMode,
    enable_tech_preview: bool,
}

impl TeardownConfig {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        name_prefix: String,
        credentials_requests_dir: PathBuf,
        user_name: String,
        region: String,
        endpoint: Option<String>,
        access_key_id: String,
        access_key_secret: String,
        missing_policy: MissingPolicyMode,
        enable_tech_preview: bool,
    ) -> Self {
        Self {
            name_prefix,
            credentials_requests_dir,
            user_name,
            region,
            endpoint,
            access_key_id,
            access_key_secret,
            missing_policy,
            enable_tech_preview,
        }
    }

    /// Prefix shared by every resource the provisioning run created.
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    pub fn credentials_requests_dir(&self) -> &std::path::Path {
        &self.credentials_requests_dir
    }

    /// RAM user the policies are detached from.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn access_key_secret(&self) -> &str {
        &self.access_key_secret
    }

    pub fn missing_policy(&self) -> MissingPolicyMode {
        self.missing_policy
    }

    pub fn enable_tech_preview(&self) -> bool {
        self.enable_tech_preview
    }
}

impl std::fmt::Debug for TeardownConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeardownConfig")
            .field("name_prefix", &self.name_prefix)
            .field("credentials_requests_dir", &self.credentials_requests_dir)
            .field("user_name", &self.user_name)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &mask_access_key_id(&self.access_key_id))
            .field("access_key_secret", &"<redacted>")
            .field("missing_policy", &self.missing_policy)
            .field("enable_tech_preview", &self.enable_tech_preview)
            .finish()
    }
}
