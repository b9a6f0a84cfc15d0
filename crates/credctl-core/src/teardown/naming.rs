use crate::credreqs::CredentialsRequest;

/// Name of the RAM policy provisioned for `request`: `<prefix>-<secret>-policy`.
///
/// Must stay in lockstep with the provisioning side, otherwise teardown
/// targets policies that were never created.
pub fn policy_name(prefix: &str, request: &CredentialsRequest) -> String {
    policy_name_for_secret(prefix, request.secret_name())
}

pub fn policy_name_for_secret(prefix: &str, secret_name: &str) -> String {
    format!("{}-{}-policy", prefix, secret_name)
}
