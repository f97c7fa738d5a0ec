//! Error taxonomy for the parameter model.
//!
//! Every variant is a local contract violation: the failing call is rejected,
//! nothing is retried internally, and the container's state is left exactly
//! as it was before the call.

use serde::{Deserialize, Serialize};

use crate::curve::Interpolation;
use knurl_api_core::ValueKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ParamError {
    /// Dimension index past the parameter's dimension count
    #[error("dimension {dimension} out of range for \"{name}\" ({count} dimensions)")]
    DimensionOutOfRange {
        name: String,
        dimension: usize,
        count: usize,
    },

    /// Value variant tag does not match the established curve/value type
    #[error("value kind mismatch: expected {expected:?}, got {actual:?}")]
    InvalidValueKind {
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Keyframe set attempted on a kind that never animates
    #[error("\"{type_name}\" parameters cannot animate")]
    AnimationNotSupported { type_name: String },

    /// evaluate() called on a curve with zero keyframes
    #[error("cannot evaluate a curve with no keyframes")]
    EmptyCurve,

    /// Numeric-only interpolation mode on a non-numeric curve
    #[error("{mode:?} interpolation is not defined for {kind:?} curves")]
    UnsupportedInterpolation { mode: Interpolation, kind: ValueKind },

    /// Clone across differently-named parameters
    #[error("cannot clone values from \"{other}\" into \"{this}\"")]
    NameMismatch { this: String, other: String },

    /// Second declaration under an already-used internal name
    #[error("a parameter named \"{name}\" already exists")]
    DuplicateName { name: String },

    /// Lookup of a name the container never declared
    #[error("no parameter named \"{name}\"")]
    UnknownParameter { name: String },
}
