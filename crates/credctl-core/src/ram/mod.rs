pub mod client;
pub mod errors;
pub mod signer;
pub mod traits;
pub mod types;

// Re-export public API
pub use client::AlibabaRamClient;
pub use errors::{RamError, RamErrorKind};
pub use traits::RamClient;
pub use types::{DeletePolicyRequest, DetachPolicyFromUserRequest, PolicyType, RamAction, RamResponse};
