use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const CREDENTIALS_REQUEST_KIND: &str = "CredentialsRequest";

/// Annotation marking manifests that belong to a feature set.
pub const FEATURE_SET_ANNOTATION: &str = "release.openshift.io/feature-set";

/// Feature set value for manifests that only ship with tech preview clusters.
pub const TECH_PREVIEW_FEATURE_SET: &str = "TechPreviewNoUpgrade";

/// A `CredentialsRequest` manifest: the permissions one workload needs and the
/// secret its credentials are delivered in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: CredentialsRequestSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequestSpec {
    #[serde(default)]
    pub secret_ref: SecretReference,
    /// Cloud-specific permissions; kept opaque.
    #[serde(default)]
    pub provider_spec: Option<serde_yaml::Value>,
    #[serde(default)]
    pub service_account_names: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretReference {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
}

impl CredentialsRequest {
    /// Build a minimal request that only carries a secret name.
    pub fn with_secret_name(secret_name: impl Into<String>) -> Self {
        Self {
            api_version: Some("cloudcredential.openshift.io/v1".to_string()),
            kind: Some(CREDENTIALS_REQUEST_KIND.to_string()),
            metadata: ObjectMeta::default(),
            spec: CredentialsRequestSpec {
                secret_ref: SecretReference {
                    name: secret_name.into(),
                    namespace: None,
                },
                ..Default::default()
            },
        }
    }

    /// Name of the secret the credentials are written to; policy names derive from it.
    pub fn secret_name(&self) -> &str {
        &self.spec.secret_ref.name
    }

    /// `namespace/name` of the manifest, or `<unnamed>` when metadata is absent.
    pub fn display_name(&self) -> String {
        match (&self.metadata.namespace, &self.metadata.name) {
            (Some(ns), Some(name)) => format!("{}/{}", ns, name),
            (None, Some(name)) => name.clone(),
            _ => "<unnamed>".to_string(),
        }
    }

    pub fn is_tech_preview(&self) -> bool {
        self.metadata
            .annotations
            .get(FEATURE_SET_ANNOTATION)
            .is_some_and(|v| v == TECH_PREVIEW_FEATURE_SET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_manifest() {
        let manifest = r#"
apiVersion: cloudcredential.openshift.io/v1
kind: CredentialsRequest
metadata:
  name: alibaba-ccm
  namespace: openshift-cloud-credential-operator
spec:
  providerSpec:
    apiVersion: cloudcredential.openshift.io/v1
    kind: AlibabaCloudProviderSpec
    policyDocument:
      Version: "1"
  secretRef:
    name: kube-cloud-config
    namespace: openshift-cloud-controller-manager
"#;
        let request: CredentialsRequest = serde_yaml::from_str(manifest).unwrap();
        assert_eq!(request.secret_name(), "kube-cloud-config");
        assert_eq!(
            request.display_name(),
            "openshift-cloud-credential-operator/alibaba-ccm"
        );
        assert!(request.spec.provider_spec.is_some());
        assert!(!request.is_tech_preview());
    }

    #[test]
    fn test_tech_preview_annotation() {
        let mut request = CredentialsRequest::with_secret_name("s");
        request.metadata.annotations.insert(
            FEATURE_SET_ANNOTATION.to_string(),
            TECH_PREVIEW_FEATURE_SET.to_string(),
        );
        assert!(request.is_tech_preview());

        request
            .metadata
            .annotations
            .insert(FEATURE_SET_ANNOTATION.to_string(), "Default".to_string());
        assert!(!request.is_tech_preview());
    }

    #[test]
    fn test_display_name_without_metadata() {
        let request = CredentialsRequest::with_secret_name("s");
        assert_eq!(request.display_name(), "<unnamed>");
    }
}
