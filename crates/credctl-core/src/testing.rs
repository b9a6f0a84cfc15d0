//! In-memory RAM client for tests.
//!
//! Records every call in order and fails the calls it has been told to fail.

use std::sync::Mutex;

use crate::ram::{
    DeletePolicyRequest, DetachPolicyFromUserRequest, RamClient, RamError, RamResponse,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RamCall {
    Detach { policy: String, user: String },
    Delete { policy: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamOp {
    Detach,
    Delete,
}

#[derive(Debug, Default)]
pub struct RecordingRamClient {
    calls: Mutex<Vec<RamCall>>,
    failures: Vec<(RamOp, String, String)>,
}

impl RecordingRamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `op` on `policy` fail with RAM error `code`.
    pub fn failing(mut self, op: RamOp, policy: &str, code: &str) -> Self {
        self.failures
            .push((op, policy.to_string(), code.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RamCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: RamCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn failure(&self, op: RamOp, policy: &str, action: &str) -> Option<RamError> {
        self.failures
            .iter()
            .find(|(o, p, _)| *o == op && p == policy)
            .map(|(_, _, code)| RamError::api(action, code, "injected failure"))
    }
}

impl RamClient for RecordingRamClient {
    fn detach_policy_from_user(
        &self,
        request: &DetachPolicyFromUserRequest,
    ) -> Result<RamResponse, RamError> {
        self.record(RamCall::Detach {
            policy: request.policy_name.clone(),
            user: request.user_name.clone(),
        });
        match self.failure(RamOp::Detach, &request.policy_name, "DetachPolicyFromUser") {
            Some(err) => Err(err),
            None => Ok(RamResponse {
                request_id: format!("detach-{}", request.policy_name),
            }),
        }
    }

    fn delete_policy(&self, request: &DeletePolicyRequest) -> Result<RamResponse, RamError> {
        self.record(RamCall::Delete {
            policy: request.policy_name.clone(),
        });
        match self.failure(RamOp::Delete, &request.policy_name, "DeletePolicy") {
            Some(err) => Err(err),
            None => Ok(RamResponse {
                request_id: format!("delete-{}", request.policy_name),
            }),
        }
    }
}
