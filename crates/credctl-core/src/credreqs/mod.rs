pub mod errors;
mod loader;
pub mod types;

// Public API exports
pub use errors::CredReqError;
pub use loader::{load_credentials_requests, parse_documents};
pub use types::{CredentialsRequest, CredentialsRequestSpec, ObjectMeta, SecretReference};
