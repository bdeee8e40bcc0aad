//! Bridge configuration

use serde::{Deserialize, Serialize};

/// What `next` does when a result document cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorPolicy {
    /// Return the error and end the execution (cursor released)
    #[default]
    AbortExecution,
    /// Return the error; the next call continues with the following document
    SkipRow,
}

/// Per-execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Behaviour on row decode failure
    pub decode_error_policy: DecodeErrorPolicy,
    /// Reject normalizer output that does not match the column type
    pub verify_rows: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            decode_error_policy: DecodeErrorPolicy::AbortExecution,
            verify_rows: true,
        }
    }
}

impl BridgeConfig {
    /// Config that keeps iterating past undecodable rows.
    pub fn lenient() -> Self {
        Self {
            decode_error_policy: DecodeErrorPolicy::SkipRow,
            ..Self::default()
        }
    }

    /// Config that trusts the normalizer's output types.
    pub fn unverified() -> Self {
        Self {
            verify_rows: false,
            ..Self::default()
        }
    }

    /// Check whether decode errors end the execution.
    pub fn aborts_on_decode_error(&self) -> bool {
        self.decode_error_policy == DecodeErrorPolicy::AbortExecution
    }
}
