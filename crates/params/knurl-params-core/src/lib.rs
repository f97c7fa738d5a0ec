//! knurl-params-core: the parameter ("knob") and animation model underlying
//! a node-based compositor.
//!
//! Every adjustable value of a processing node is a `Parameter`: named,
//! multi-dimensional, type-erased behind the closed `Value` enum, and
//! optionally time-varying through per-dimension `AnimCurve`s. A `ParamSet`
//! owns the parameters of one node, brackets batches of edits so N changes
//! cost at most one re-evaluation, and folds every parameter's content hash
//! into an aggregate fingerprint that decides whether cached downstream
//! results are stale.

pub mod curve;
pub mod error;
pub mod hash;
pub mod interp;
pub mod kind;
pub mod observer;
pub mod param;
pub mod param_set;
pub mod state;

// Re-exports for consumers (hosts, persistence, editors)
pub use curve::{AnimCurve, Interpolation, Keyframe, Tangent};
pub use error::ParamError;
pub use hash::StateHasher;
pub use kind::ParamKind;
pub use observer::ParamObserver;
pub use param::{ChangeReason, NumericMeta, Parameter};
pub use param_set::{ParamSet, ParamSnapshot};
pub use state::ParamState;
pub use knurl_api_core::{Value, ValueKind};
