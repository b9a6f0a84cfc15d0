//! RAM client trait definition.

use crate::ram::errors::RamError;
use crate::ram::types::{DeletePolicyRequest, DetachPolicyFromUserRequest, RamResponse};

/// The two RAM operations the teardown needs.
///
/// [`crate::ram::AlibabaRamClient`] talks to the real API; tests substitute
/// recording doubles.
pub trait RamClient: Send + Sync {
    /// Remove the grant between a policy and a user. The policy itself survives.
    fn detach_policy_from_user(
        &self,
        request: &DetachPolicyFromUserRequest,
    ) -> Result<RamResponse, RamError>;

    /// Delete a policy. RAM refuses while the policy is still attached.
    fn delete_policy(&self, request: &DeletePolicyRequest) -> Result<RamResponse, RamError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyAll;

    impl RamClient for DenyAll {
        fn detach_policy_from_user(
            &self,
            request: &DetachPolicyFromUserRequest,
        ) -> Result<RamResponse, RamError> {
            Err(RamError::api(
                "DetachPolicyFromUser",
                "NoPermission",
                &format!("cannot detach {}", request.policy_name),
            ))
        }

        fn delete_policy(&self, _request: &DeletePolicyRequest) -> Result<RamResponse, RamError> {
            Err(RamError::api("DeletePolicy", "NoPermission", "denied"))
        }
    }

    #[test]
    fn trait_object_dispatch() {
        let client: &dyn RamClient = &DenyAll;
        let err = client
            .detach_policy_from_user(&DetachPolicyFromUserRequest::custom("p", "u"))
            .unwrap_err();
        assert!(err.to_string().contains("cannot detach p"));
        assert!(client.delete_policy(&DeletePolicyRequest::new("p")).is_err());
    }
}
