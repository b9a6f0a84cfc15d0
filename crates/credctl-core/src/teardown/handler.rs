use credctl_config::{MissingPolicyMode, TeardownConfig};
use tracing::{debug, info, warn};

use super::errors::TeardownError;
use super::naming::policy_name;
use crate::credreqs::{CredentialsRequest, load_credentials_requests};
use crate::ram::{DeletePolicyRequest, DetachPolicyFromUserRequest, RamClient, RamErrorKind};

/// Detach `policy` from `user_name`, then delete it.
///
/// Delete is never attempted when detach fails. A failed delete leaves the
/// user detached and the policy orphaned; running the same teardown again
/// converges when `mode` is [`MissingPolicyMode::Ignore`].
///
/// # Errors
///
/// Returns [`TeardownError::DetachFailed`] or [`TeardownError::DeleteFailed`]
/// wrapping the RAM error.
pub fn teardown_policy(
    client: &dyn RamClient,
    user_name: &str,
    policy: &str,
    mode: MissingPolicyMode,
) -> Result<(), TeardownError> {
    debug!(
        event = "core.teardown.policy_started",
        policy = policy,
        user = user_name
    );

    let detach = DetachPolicyFromUserRequest::custom(policy, user_name);
    match client.detach_policy_from_user(&detach) {
        Ok(_) => {
            info!(
                event = "core.teardown.policy_detached",
                policy = policy,
                user = user_name,
                "policy {} detached from user {}",
                policy,
                user_name
            );
        }
        Err(e)
            if mode == MissingPolicyMode::Ignore
                && matches!(
                    e.kind(),
                    RamErrorKind::PolicyNotAttached | RamErrorKind::PolicyNotFound
                ) =>
        {
            warn!(
                event = "core.teardown.detach_skipped",
                policy = policy,
                user = user_name,
                reason = %e
            );
        }
        Err(e) => {
            return Err(TeardownError::DetachFailed {
                policy: policy.to_string(),
                user: user_name.to_string(),
                source: e,
            });
        }
    }

    let delete = DeletePolicyRequest::new(policy);
    match client.delete_policy(&delete) {
        Ok(_) => {
            info!(
                event = "core.teardown.policy_deleted",
                policy = policy,
                "ram policy {} deleted",
                policy
            );
        }
        Err(e) if mode == MissingPolicyMode::Ignore && e.kind() == RamErrorKind::PolicyNotFound => {
            warn!(
                event = "core.teardown.delete_skipped",
                policy = policy,
                reason = %e
            );
        }
        Err(e) => {
            return Err(TeardownError::DeleteFailed {
                policy: policy.to_string(),
                source: e,
            });
        }
    }

    Ok(())
}

/// Tear down the policy of every request, in the order given.
///
/// Stops at the first failure; later requests are never touched and nothing
/// already removed is restored.
pub fn teardown_all(
    client: &dyn RamClient,
    name_prefix: &str,
    requests: &[CredentialsRequest],
    user_name: &str,
    mode: MissingPolicyMode,
) -> Result<(), TeardownError> {
    debug!(
        event = "core.teardown.batch_started",
        name_prefix = name_prefix,
        user = user_name,
        count = requests.len(),
        missing_policy = %mode
    );

    for request in requests {
        let policy = policy_name(name_prefix, request);
        teardown_policy(client, user_name, &policy, mode)?;
    }

    debug!(
        event = "core.teardown.batch_completed",
        user = user_name,
        count = requests.len()
    );

    Ok(())
}

/// Load the CredentialsRequests named by `config` and tear down their policies.
///
/// Returns the number of policies removed.
pub fn delete_ram_policies(
    client: &dyn RamClient,
    config: &TeardownConfig,
) -> Result<usize, TeardownError> {
    let requests = load_credentials_requests(
        config.credentials_requests_dir(),
        config.enable_tech_preview(),
    )?;

    teardown_all(
        client,
        config.name_prefix(),
        &requests,
        config.user_name(),
        config.missing_policy(),
    )?;

    Ok(requests.len())
}
