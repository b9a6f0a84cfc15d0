//! Blocking HTTPS client for the Alibaba Cloud RAM RPC API.

use std::time::Duration;

use credctl_config::{TeardownConfig, mask_access_key_id};
use tracing::debug;

use super::errors::RamError;
use super::signer::{self, SIGNATURE_METHOD, SIGNATURE_VERSION};
use super::traits::RamClient;
use super::types::{
    DeletePolicyRequest, DetachPolicyFromUserRequest, RamAction, RamErrorBody, RamResponse,
};

pub const DEFAULT_ENDPOINT: &str = "https://ram.aliyuncs.com/";
pub const API_VERSION: &str = "2015-05-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const HTTP_METHOD: &str = "POST";

/// RAM client authenticated with an access key pair.
pub struct AlibabaRamClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    region: String,
    access_key_id: String,
    access_key_secret: String,
}

impl std::fmt::Debug for AlibabaRamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlibabaRamClient")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("access_key_id", &mask_access_key_id(&self.access_key_id))
            .finish_non_exhaustive()
    }
}

impl AlibabaRamClient {
    /// Create a client for `region` using the given access key pair.
    pub fn new(
        region: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Result<Self, RamError> {
        let access_key_id = access_key_id.into();
        let access_key_secret = access_key_secret.into();

        if access_key_id.is_empty() {
            return Err(RamError::MissingCredentials {
                field: "access_key_id",
            });
        }
        if access_key_secret.is_empty() {
            return Err(RamError::MissingCredentials {
                field: "access_key_secret",
            });
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("credctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RamError::Transport {
                action: "ClientInit".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: region.into(),
            access_key_id,
            access_key_secret,
        })
    }

    /// Build a client from resolved teardown settings.
    pub fn from_config(config: &TeardownConfig) -> Result<Self, RamError> {
        let client = Self::new(
            config.region(),
            config.access_key_id(),
            config.access_key_secret(),
        )?;
        Ok(match config.endpoint() {
            Some(endpoint) => client.with_endpoint(endpoint),
            None => client,
        })
    }

    /// Send requests to a different endpoint (GovCloud, VPC, proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Common plus action parameters, with the `Signature` appended.
    pub(crate) fn signed_params(
        &self,
        request: &dyn RamAction,
        nonce: &str,
        timestamp: &str,
    ) -> Vec<(String, String)> {
        let mut params = vec![
            ("Action".to_string(), request.action().to_string()),
            ("Format".to_string(), "JSON".to_string()),
            ("Version".to_string(), API_VERSION.to_string()),
            ("AccessKeyId".to_string(), self.access_key_id.clone()),
            ("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string()),
            ("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string()),
            ("SignatureNonce".to_string(), nonce.to_string()),
            ("Timestamp".to_string(), timestamp.to_string()),
            ("RegionId".to_string(), self.region.clone()),
        ];
        params.extend(request.params());

        let signature = signer::sign(&self.access_key_secret, HTTP_METHOD, &params);
        params.push(("Signature".to_string(), signature));
        params
    }

    fn call(&self, request: &dyn RamAction) -> Result<RamResponse, RamError> {
        let action = request.action();
        let nonce = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let params = self.signed_params(request, &nonce, &timestamp);

        debug!(
            event = "core.ram.request_started",
            action = action,
            endpoint = %self.endpoint,
            nonce = %nonce
        );

        let response = self
            .http
            .post(&self.endpoint)
            .form(&params)
            .send()
            .map_err(|e| RamError::Transport {
                action: action.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| RamError::Transport {
            action: action.to_string(),
            message: format!("failed to read response body: {}", e),
        })?;

        let result = decode_response(action, status, &body);
        if let Ok(ref ok) = result {
            debug!(
                event = "core.ram.request_completed",
                action = action,
                request_id = %ok.request_id
            );
        }
        result
    }
}

/// Turn an HTTP status and body into a RAM result.
pub(crate) fn decode_response(
    action: &str,
    status: u16,
    body: &str,
) -> Result<RamResponse, RamError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<RamResponse>(body).map_err(|e| {
            RamError::InvalidResponse {
                action: action.to_string(),
                status,
                message: e.to_string(),
            }
        });
    }

    match serde_json::from_str::<RamErrorBody>(body) {
        Ok(error_body) if !error_body.code.is_empty() => Err(RamError::Api {
            action: action.to_string(),
            status,
            code: error_body.code,
            message: error_body.message,
            request_id: error_body.request_id,
        }),
        Ok(_) => Err(RamError::InvalidResponse {
            action: action.to_string(),
            status,
            message: "error response without Code".to_string(),
        }),
        Err(e) => Err(RamError::InvalidResponse {
            action: action.to_string(),
            status,
            message: format!("{}: {}", e, body.chars().take(200).collect::<String>()),
        }),
    }
}

impl RamClient for AlibabaRamClient {
    fn detach_policy_from_user(
        &self,
        request: &DetachPolicyFromUserRequest,
    ) -> Result<RamResponse, RamError> {
        self.call(request)
    }

    fn delete_policy(&self, request: &DeletePolicyRequest) -> Result<RamResponse, RamError> {
        self.call(request)
    }
}
