use serde::Deserialize;

/// Which namespace a RAM policy lives in.
///
/// Policies created for CredentialsRequests are always `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    System,
    Custom,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::System => "System",
            PolicyType::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A RAM RPC action and its request parameters.
pub trait RamAction {
    /// The `Action` parameter sent to the API.
    fn action(&self) -> &'static str;

    /// Action-specific parameters, in addition to the common ones.
    fn params(&self) -> Vec<(String, String)>;
}

/// `DetachPolicyFromUser` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachPolicyFromUserRequest {
    pub policy_type: PolicyType,
    pub policy_name: String,
    pub user_name: String,
}

impl DetachPolicyFromUserRequest {
    /// Detach a custom policy from a user.
    pub fn custom(policy_name: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            policy_type: PolicyType::Custom,
            policy_name: policy_name.into(),
            user_name: user_name.into(),
        }
    }
}

impl RamAction for DetachPolicyFromUserRequest {
    fn action(&self) -> &'static str {
        "DetachPolicyFromUser"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![
            ("PolicyType".to_string(), self.policy_type.as_str().to_string()),
            ("PolicyName".to_string(), self.policy_name.clone()),
            ("UserName".to_string(), self.user_name.clone()),
        ]
    }
}

/// `DeletePolicy` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePolicyRequest {
    pub policy_name: String,
}

impl DeletePolicyRequest {
    pub fn new(policy_name: impl Into<String>) -> Self {
        Self {
            policy_name: policy_name.into(),
        }
    }
}

impl RamAction for DeletePolicyRequest {
    fn action(&self) -> &'static str {
        "DeletePolicy"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![("PolicyName".to_string(), self.policy_name.clone())]
    }
}

/// Successful RAM response. Mutating actions only return a request id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RamResponse {
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
}

/// Error body returned by the RAM API on non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct RamErrorBody {
    #[serde(rename = "RequestId", default)]
    pub request_id: String,
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detach_request_is_custom() {
        let request = DetachPolicyFromUserRequest::custom("p-policy", "ram-user-1");
        assert_eq!(request.policy_type, PolicyType::Custom);
        assert_eq!(request.action(), "DetachPolicyFromUser");
        assert_eq!(
            request.params(),
            vec![
                ("PolicyType".to_string(), "Custom".to_string()),
                ("PolicyName".to_string(), "p-policy".to_string()),
                ("UserName".to_string(), "ram-user-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_delete_request_params() {
        let request = DeletePolicyRequest::new("p-policy");
        assert_eq!(request.action(), "DeletePolicy");
        assert_eq!(
            request.params(),
            vec![("PolicyName".to_string(), "p-policy".to_string())]
        );
    }

    #[test]
    fn test_error_body_deserializes() {
        let body: RamErrorBody = serde_json::from_str(
            r#"{"RequestId":"R1","HostId":"ram.aliyuncs.com","Code":"EntityNotExist.Policy","Message":"The policy does not exist."}"#,
        )
        .unwrap();
        assert_eq!(body.code, "EntityNotExist.Policy");
        assert_eq!(body.request_id, "R1");
    }
}
