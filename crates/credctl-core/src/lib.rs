//! Core library for credctl.
//!
//! Loads `CredentialsRequest` manifests and tears down the RAM policies that
//! were provisioned for them: each policy is detached from the RAM user and
//! then deleted.

pub mod credreqs;
pub mod errors;
pub mod events;
pub mod logging;
pub mod ram;
pub mod teardown;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use credreqs::{CredReqError, CredentialsRequest, load_credentials_requests};
pub use errors::CredctlError;
pub use logging::init_logging;
pub use ram::{AlibabaRamClient, RamClient, RamError};
pub use teardown::{
    TeardownError, delete_ram_policies, policy_name, teardown_all, teardown_policy,
};
