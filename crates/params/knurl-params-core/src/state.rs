//! Serializable parameter state for the persistence boundary.
//!
//! The archive format itself lives outside this crate; what it needs from the
//! core is a plain-data image of every parameter's values and keyframes
//! (`capture_state`) and a way to put one back (`restore_state`). Restoration
//! replays the ordinary mutation entry points under `StartupRestoration`, so
//! observers see the edits but autosave stays quiet and the batch collapses
//! into at most one evaluation.

use serde::{Deserialize, Serialize};

use crate::curve::{AnimCurve, Interpolation};
use crate::error::ParamError;
use crate::param::{ChangeReason, Parameter};
use crate::param_set::ParamSet;
use knurl_api_core::Value;

/// Plain-data image of one parameter's persistent state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ParamState {
    pub name: String,
    pub interpolation: Interpolation,
    pub values: Vec<Value>,
    #[serde(default)]
    pub curves: Vec<Option<AnimCurve>>,
}

impl ParamState {
    pub fn capture(param: &Parameter) -> Self {
        ParamState {
            name: param.name().to_string(),
            interpolation: param.interpolation(),
            values: param.values().to_vec(),
            curves: (0..param.dimension()).map(|d| param.curve(d).cloned()).collect(),
        }
    }
}

impl ParamSet {
    /// Image of every owned parameter, in creation order.
    pub fn capture_state(&self) -> Vec<ParamState> {
        self.iter().map(ParamState::capture).collect()
    }

    /// Replay a captured image into this container's parameters.
    pub fn restore_state(&mut self, states: &[ParamState]) -> Result<(), ParamError> {
        self.begin_changes(ChangeReason::StartupRestoration);
        let result = restore_into(self, states);
        self.end_changes(ChangeReason::StartupRestoration);
        result
    }
}

fn restore_into(set: &mut ParamSet, states: &[ParamState]) -> Result<(), ParamError> {
    const REASON: ChangeReason = ChangeReason::StartupRestoration;
    for state in states {
        set.set_interpolation(&state.name, state.interpolation, REASON)?;
        for (dim, value) in state.values.iter().enumerate() {
            set.set_value(&state.name, dim, value.clone(), REASON)?;
        }
        for (dim, curve) in state.curves.iter().enumerate() {
            let Some(curve) = curve else { continue };
            for key in curve.keys() {
                set.set_keyframe(&state.name, dim, key.clone(), REASON)?;
            }
        }
    }
    Ok(())
}
