//! Observer seam replacing a toolkit's signal/slot broadcast.
//!
//! Observers are registered on the container and called synchronously before
//! the mutating entry point returns, so a presentation layer sees every
//! change in the order it happened. All hooks default to no-ops; implementors
//! override what they care about.

use crate::param::{ChangeReason, Parameter};

pub trait ParamObserver {
    /// A dimension's static value changed.
    fn value_changed(&mut self, _param: &Parameter, _dimension: usize, _reason: ChangeReason) {}

    /// A keyframe was inserted, updated, or removed on a dimension's curve.
    fn keyframe_changed(&mut self, _param: &Parameter, _dimension: usize, _reason: ChangeReason) {}

    fn visibility_changed(&mut self, _param: &Parameter, _visible: bool) {}

    fn enabled_changed(&mut self, _param: &Parameter, _enabled: bool) {}

    /// Outermost bracket around a batch of edits.
    fn changes_begun(&mut self, _reason: ChangeReason) {}

    fn changes_ended(&mut self, _reason: ChangeReason) {}

    /// At most once per batch: re-evaluate downstream results. `param` is the
    /// last significantly changed parameter of the batch.
    fn evaluate(&mut self, _param: &Parameter, _significant: bool) {}

    /// A completed batch changed project state outside a restoration pass.
    fn autosave_requested(&mut self) {}
}
