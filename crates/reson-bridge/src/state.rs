//! Parameter state persistence.
//!
//! The bridge serializes its parameter values into a small versioned JSON
//! blob for host session documents. Loading is tolerant: unknown parameter
//! ids are skipped with a warning, out-of-range values clamp to the
//! parameter's range, and only a malformed blob or an unknown version is
//! an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use reson_core::{BridgeError, BridgeResult, DspKernel, ParameterId, ParameterValue};

use crate::bridge::RenderBridge;

/// Version of the serialized blob. Bumped on incompatible layout changes.
pub const STATE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct ParameterState {
    version: u32,
    parameters: BTreeMap<ParameterId, ParameterValue>,
}

impl<K: DspKernel> RenderBridge<K> {
    /// Serialize the current parameter values.
    pub fn save_state(&self) -> BridgeResult<Vec<u8>> {
        let state = ParameterState {
            version: STATE_VERSION,
            parameters: self
                .parameters
                .iter()
                .map(|p| (p.info().id, p.get()))
                .collect(),
        };
        serde_json::to_vec(&state).map_err(|err| BridgeError::State(err.to_string()))
    }

    /// Restore parameter values from a blob produced by
    /// [`save_state`](Self::save_state).
    ///
    /// Values outside a parameter's range clamp; ids the store does not
    /// know are skipped. Callable in any lifecycle state.
    pub fn load_state(&mut self, blob: &[u8]) -> BridgeResult<()> {
        let state: ParameterState = serde_json::from_slice(blob)
            .map_err(|err| BridgeError::State(format!("malformed state blob: {}", err)))?;
        if state.version > STATE_VERSION {
            return Err(BridgeError::State(format!(
                "unsupported state version {}",
                state.version
            )));
        }
        for (id, value) in state.parameters {
            if !self.parameters.set_value(id, value) {
                log::warn!("ignoring unknown parameter id {} in saved state", id);
            }
        }
        Ok(())
    }
}
