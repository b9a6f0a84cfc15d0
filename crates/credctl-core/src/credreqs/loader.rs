use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::errors::CredReqError;
use super::types::{CREDENTIALS_REQUEST_KIND, CredentialsRequest};

/// Load every `CredentialsRequest` found in `dir`.
///
/// Regular files are read in file-name order and may contain several YAML
/// (or JSON) documents. Subdirectories and empty documents are skipped.
/// Tech preview manifests are skipped unless `enable_tech_preview` is set.
///
/// # Errors
///
/// Returns [`CredReqError::DirectoryNotFound`] / [`CredReqError::NotADirectory`]
/// for a bad `dir`, [`CredReqError::DecodeFailed`] for a document that is not a
/// `CredentialsRequest`, and [`CredReqError::MissingSecretRef`] for a request
/// without a secret name.
pub fn load_credentials_requests(
    dir: &Path,
    enable_tech_preview: bool,
) -> Result<Vec<CredentialsRequest>, CredReqError> {
    debug!(
        event = "core.credreqs.load_started",
        dir = %dir.display(),
        enable_tech_preview = enable_tech_preview
    );

    if !dir.exists() {
        return Err(CredReqError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }
    if !dir.is_dir() {
        return Err(CredReqError::NotADirectory {
            path: dir.display().to_string(),
        });
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            debug!(event = "core.credreqs.subdir_skipped", path = %entry.path().display());
            continue;
        }
        files.push(entry.path());
    }
    files.sort();

    let mut requests = Vec::new();
    for path in &files {
        let content = std::fs::read_to_string(path)?;
        for request in parse_documents(path, &content)? {
            if request.is_tech_preview() && !enable_tech_preview {
                debug!(
                    event = "core.credreqs.tech_preview_skipped",
                    path = %path.display(),
                    name = %request.display_name()
                );
                continue;
            }
            requests.push(request);
        }
    }

    debug!(
        event = "core.credreqs.load_completed",
        dir = %dir.display(),
        files = files.len(),
        count = requests.len()
    );

    Ok(requests)
}

/// Decode all documents in one manifest file.
pub fn parse_documents(
    path: &Path,
    content: &str,
) -> Result<Vec<CredentialsRequest>, CredReqError> {
    let decode_failed = |message: String| CredReqError::DecodeFailed {
        path: path.display().to_string(),
        message,
    };

    let mut requests = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document)
            .map_err(|e| decode_failed(e.to_string()))?;
        if value.is_null() {
            continue;
        }

        let kind = value.get("kind").and_then(|k| k.as_str());
        if kind != Some(CREDENTIALS_REQUEST_KIND) {
            debug!(
                event = "core.credreqs.kind_rejected",
                path = %path.display(),
                kind = kind.unwrap_or("<none>")
            );
            return Err(decode_failed(match kind {
                Some(other) => {
                    format!("expected kind {}, found {}", CREDENTIALS_REQUEST_KIND, other)
                }
                None => "document has no kind".to_string(),
            }));
        }

        let request: CredentialsRequest =
            serde_yaml::from_value(value).map_err(|e| decode_failed(e.to_string()))?;

        if request.secret_name().trim().is_empty() {
            return Err(CredReqError::MissingSecretRef {
                path: path.display().to_string(),
                name: request.display_name(),
            });
        }

        requests.push(request);
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn manifest(name: &str, secret: &str) -> String {
        format!(
            r#"apiVersion: cloudcredential.openshift.io/v1
kind: CredentialsRequest
metadata:
  name: {name}
  namespace: openshift-cloud-credential-operator
spec:
  secretRef:
    name: {secret}
    namespace: openshift-{name}
"#
        )
    }

    fn secrets(requests: &[CredentialsRequest]) -> Vec<&str> {
        requests.iter().map(|r| r.secret_name()).collect()
    }

    #[test]
    fn test_load_orders_by_file_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("02-ingress.yaml"), manifest("ingress", "cloud-credentials")).unwrap();
        fs::write(dir.path().join("01-ccm.yaml"), manifest("ccm", "kube-cloud-config")).unwrap();
        fs::write(dir.path().join("03-registry.yaml"), manifest("registry", "installer-cloud-credentials")).unwrap();

        let requests = load_credentials_requests(dir.path(), false).unwrap();
        assert_eq!(
            secrets(&requests),
            vec!["kube-cloud-config", "cloud-credentials", "installer-cloud-credentials"]
        );
    }

    #[test]
    fn test_load_multi_document_file() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{}---\n{}---\n",
            manifest("ccm", "kube-cloud-config"),
            manifest("csi", "alibaba-disk-credentials")
        );
        fs::write(dir.path().join("bundle.yaml"), content).unwrap();

        let requests = load_credentials_requests(dir.path(), false).unwrap();
        assert_eq!(
            secrets(&requests),
            vec!["kube-cloud-config", "alibaba-disk-credentials"]
        );
    }

    #[test]
    fn test_load_accepts_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ccm.json"),
            r#"{"apiVersion":"cloudcredential.openshift.io/v1","kind":"CredentialsRequest","metadata":{"name":"ccm"},"spec":{"secretRef":{"name":"kube-cloud-config"}}}"#,
        )
        .unwrap();

        let requests = load_credentials_requests(dir.path(), false).unwrap();
        assert_eq!(secrets(&requests), vec!["kube-cloud-config"]);
    }

    #[test]
    fn test_load_skips_subdirectories_and_empty_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("x.yaml"), manifest("x", "x")).unwrap();
        fs::write(dir.path().join("empty.yaml"), "").unwrap();
        fs::write(dir.path().join("ccm.yaml"), manifest("ccm", "kube-cloud-config")).unwrap();

        let requests = load_credentials_requests(dir.path(), false).unwrap();
        assert_eq!(secrets(&requests), vec!["kube-cloud-config"]);
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let requests = load_credentials_requests(dir.path(), false).unwrap();
        assert!(requests.is_empty());
    }

    #[test]
    fn test_tech_preview_filtering() {
        let dir = TempDir::new().unwrap();
        let preview = manifest("preview", "preview-creds").replace(
            "  namespace: openshift-cloud-credential-operator\n",
            "  namespace: openshift-cloud-credential-operator\n  annotations:\n    release.openshift.io/feature-set: TechPreviewNoUpgrade\n",
        );
        fs::write(dir.path().join("a.yaml"), manifest("ccm", "kube-cloud-config")).unwrap();
        fs::write(dir.path().join("b.yaml"), preview).unwrap();

        let default_set = load_credentials_requests(dir.path(), false).unwrap();
        assert_eq!(secrets(&default_set), vec!["kube-cloud-config"]);

        let with_preview = load_credentials_requests(dir.path(), true).unwrap();
        assert_eq!(
            secrets(&with_preview),
            vec!["kube-cloud-config", "preview-creds"]
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = load_credentials_requests(&dir.path().join("nope"), false).unwrap_err();
        assert!(matches!(err, CredReqError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ccm.yaml");
        fs::write(&file, manifest("ccm", "kube-cloud-config")).unwrap();

        let err = load_credentials_requests(&file, false).unwrap_err();
        assert!(matches!(err, CredReqError::NotADirectory { .. }));
    }

    #[test]
    fn test_wrong_kind_is_decode_error() {
        let err = parse_documents(
            Path::new("secret.yaml"),
            "apiVersion: v1\nkind: Secret\nmetadata:\n  name: x\n",
        )
        .unwrap_err();
        match err {
            CredReqError::DecodeFailed { path, message } => {
                assert_eq!(path, "secret.yaml");
                assert!(message.contains("Secret"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_document_without_kind_is_decode_error() {
        let err = parse_documents(
            Path::new("loose.yaml"),
            "metadata:\n  name: ccm\nspec:\n  secretRef:\n    name: kube-cloud-config\n",
        )
        .unwrap_err();
        match err {
            CredReqError::DecodeFailed { path, message } => {
                assert_eq!(path, "loose.yaml");
                assert_eq!(message, "document has no kind");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_secret_ref() {
        let err = parse_documents(
            Path::new("ccm.yaml"),
            "kind: CredentialsRequest\nmetadata:\n  name: ccm\nspec: {}\n",
        )
        .unwrap_err();
        assert!(matches!(err, CredReqError::MissingSecretRef { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_documents(Path::new("bad.yaml"), "kind: [unterminated\n").unwrap_err();
        assert!(matches!(err, CredReqError::DecodeFailed { .. }));
    }
}
