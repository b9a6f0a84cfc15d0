pub mod errors;
pub mod handler;
pub mod naming;

// Public API exports
pub use errors::TeardownError;
pub use handler::{delete_ram_policies, teardown_all, teardown_policy};
pub use naming::{policy_name, policy_name_for_secret};
