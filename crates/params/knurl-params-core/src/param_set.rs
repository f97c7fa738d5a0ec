//! The owning container: ordered parameters, batched change tracking, and
//! the aggregate change fingerprint.
//!
//! All mutation goes through `&mut ParamSet`, which makes the container the
//! single-writer synchronization boundary; a concurrent evaluation context
//! reads a `snapshot()` instead of live state. Edits inside one
//! `begin_changes`/`end_changes` bracket collapse into at most one `evaluate`
//! dispatch, observing the final state of every parameter touched.

use hashbrown::HashMap;
use log::debug;

use crate::curve::{Interpolation, Keyframe};
use crate::error::ParamError;
use crate::observer::ParamObserver;
use crate::param::{ChangeReason, Parameter};
use knurl_api_core::Value;

#[derive(Default)]
struct BatchState {
    depth: u32,
    any_change: bool,
    /// Slot of the last significantly changed parameter, if any.
    significant: Option<usize>,
}

#[derive(Default)]
pub struct ParamSet {
    params: Vec<Parameter>,
    index: HashMap<String, usize>,
    observers: Vec<Box<dyn ParamObserver>>,
    batch: BatchState,
    hash_cache: Option<u64>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- declaration and lookup ----

    /// Append a parameter. Creation order is preserved and meaningful: it is
    /// the display order and the aggregate-hash folding order.
    pub fn declare(&mut self, param: Parameter) -> Result<(), ParamError> {
        if self.index.contains_key(param.name()) {
            return Err(ParamError::DuplicateName {
                name: param.name().to_string(),
            });
        }
        debug!("declare \"{}\" ({})", param.name(), param.type_name());
        self.index.insert(param.name().to_string(), self.params.len());
        self.params.push(param);
        self.hash_cache = None;
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&slot| &self.params[slot])
    }

    fn slot(&self, name: &str) -> Result<usize, ParamError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| ParamError::UnknownParameter {
                name: name.to_string(),
            })
    }

    // ---- observers ----

    pub fn add_observer(&mut self, observer: Box<dyn ParamObserver>) {
        self.observers.push(observer);
    }

    /// Run a hook over every observer. Observers are moved out for the
    /// duration so they can borrow the container's state immutably.
    fn dispatch<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn ParamObserver, &ParamSet),
    {
        let mut observers = std::mem::take(&mut self.observers);
        for obs in observers.iter_mut() {
            f(obs.as_mut(), self);
        }
        observers.extend(self.observers.drain(..));
        self.observers = observers;
    }

    // ---- batching ----

    /// Enter a batch of edits. Nested calls only deepen the bracket; the
    /// outermost call is the one that opens it.
    pub fn begin_changes(&mut self, reason: ChangeReason) {
        if self.batch.depth == 0 {
            self.batch.any_change = false;
            self.batch.significant = None;
            self.dispatch(|obs, _| obs.changes_begun(reason));
        }
        self.batch.depth += 1;
    }

    /// Leave a batch. When the outermost bracket closes and a significant
    /// change was recorded, the aggregate hash is invalidated and `evaluate`
    /// fires exactly once for the whole batch.
    pub fn end_changes(&mut self, reason: ChangeReason) {
        debug_assert!(self.batch.depth > 0, "end_changes without begin_changes");
        if self.batch.depth == 0 {
            return;
        }
        self.batch.depth -= 1;
        if self.batch.depth > 0 {
            return;
        }
        let any_change = self.batch.any_change;
        let significant = self.batch.significant.take();
        self.batch.any_change = false;
        self.dispatch(|obs, _| obs.changes_ended(reason));
        if let Some(slot) = significant {
            self.hash_cache = None;
            debug!(
                "batch closed; evaluating after change to \"{}\"",
                self.params[slot].name()
            );
            self.dispatch(|obs, set| obs.evaluate(&set.params[slot], true));
        }
        if any_change && reason != ChangeReason::StartupRestoration {
            self.dispatch(|obs, _| obs.autosave_requested());
        }
    }

    fn record_change(&mut self, slot: usize) {
        self.batch.any_change = true;
        self.hash_cache = None;
        if !self.params[slot].is_insignificant() {
            self.batch.significant = Some(slot);
        }
    }

    // ---- value mutation (implicitly bracketed) ----

    /// Set a dimension's static value. A lone call is an implicit batch of
    /// one; multi-parameter edits should bracket explicitly.
    pub fn set_value(
        &mut self,
        name: &str,
        dimension: usize,
        value: Value,
        reason: ChangeReason,
    ) -> Result<(), ParamError> {
        let slot = self.slot(name)?;
        self.begin_changes(reason);
        let result = self.params[slot].set_value(dimension, value);
        if result.is_ok() {
            self.record_change(slot);
            self.dispatch(|obs, set| obs.value_changed(&set.params[slot], dimension, reason));
        }
        self.end_changes(reason);
        result
    }

    /// Insert or update a keyframe on a dimension's curve.
    pub fn set_value_at_time(
        &mut self,
        name: &str,
        time: f64,
        dimension: usize,
        value: Value,
        reason: ChangeReason,
    ) -> Result<(), ParamError> {
        self.set_keyframe(name, dimension, Keyframe::new(time, value), reason)
    }

    /// Keyframe insertion carrying authored tangents.
    pub fn set_keyframe(
        &mut self,
        name: &str,
        dimension: usize,
        key: Keyframe,
        reason: ChangeReason,
    ) -> Result<(), ParamError> {
        let slot = self.slot(name)?;
        self.begin_changes(reason);
        let result = self.params[slot].set_keyframe(dimension, key);
        if result.is_ok() {
            self.record_change(slot);
            self.dispatch(|obs, set| obs.keyframe_changed(&set.params[slot], dimension, reason));
        }
        self.end_changes(reason);
        result
    }

    /// Remove the keyframe at exactly `time`; absent times are a no-op.
    pub fn remove_keyframe(
        &mut self,
        name: &str,
        time: f64,
        dimension: usize,
        reason: ChangeReason,
    ) -> Result<bool, ParamError> {
        let slot = self.slot(name)?;
        self.begin_changes(reason);
        let result = self.params[slot].remove_keyframe(time, dimension);
        if let Ok(true) = result {
            self.record_change(slot);
            self.dispatch(|obs, set| obs.keyframe_changed(&set.params[slot], dimension, reason));
        }
        self.end_changes(reason);
        result
    }

    /// Drop every keyframe of a dimension, reverting it to its static value.
    pub fn clear_animation(
        &mut self,
        name: &str,
        dimension: usize,
        reason: ChangeReason,
    ) -> Result<bool, ParamError> {
        let slot = self.slot(name)?;
        self.begin_changes(reason);
        let result = self.params[slot].clear_animation(dimension);
        if let Ok(true) = result {
            self.record_change(slot);
            self.dispatch(|obs, set| obs.keyframe_changed(&set.params[slot], dimension, reason));
        }
        self.end_changes(reason);
        result
    }

    /// Change a parameter's interpolation mode (affects evaluated results).
    pub fn set_interpolation(
        &mut self,
        name: &str,
        mode: Interpolation,
        reason: ChangeReason,
    ) -> Result<(), ParamError> {
        let slot = self.slot(name)?;
        self.begin_changes(reason);
        self.params[slot].set_interpolation(mode);
        self.record_change(slot);
        self.end_changes(reason);
        Ok(())
    }

    // ---- presentation state (never hashed, never evaluated) ----

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), ParamError> {
        let slot = self.slot(name)?;
        self.params[slot].set_enabled(enabled);
        self.dispatch(|obs, set| obs.enabled_changed(&set.params[slot], enabled));
        Ok(())
    }

    pub fn set_visible(&mut self, name: &str, visible: bool) -> Result<(), ParamError> {
        let slot = self.slot(name)?;
        self.params[slot].set_visible(visible);
        self.dispatch(|obs, set| obs.visibility_changed(&set.params[slot], visible));
        Ok(())
    }

    // ---- reads ----

    pub fn get_value(&self, name: &str, dimension: usize) -> Result<&Value, ParamError> {
        let slot = self.slot(name)?;
        self.params[slot].get_value(dimension)
    }

    pub fn get_value_at_time(
        &self,
        name: &str,
        time: f64,
        dimension: usize,
    ) -> Result<Value, ParamError> {
        let slot = self.slot(name)?;
        self.params[slot].get_value_at_time(time, dimension)
    }

    pub fn keyframes(&self, name: &str, dimension: usize) -> Result<Vec<(f64, Value)>, ParamError> {
        let slot = self.slot(name)?;
        self.params[slot].keyframes(dimension)
    }

    pub fn has_animation(&self, name: &str, dimension: usize) -> Result<bool, ParamError> {
        let slot = self.slot(name)?;
        Ok(self.params[slot].has_animation(dimension))
    }

    // ---- aggregate hash ----

    /// Mark the aggregate hash stale; the next read recomputes it.
    pub fn invalidate_hash(&mut self) {
        self.hash_cache = None;
    }

    /// The aggregate fingerprint over every parameter's contribution, folded
    /// in creation order. Lazily recomputed; never stale once read.
    pub fn state_hash(&mut self) -> u64 {
        if let Some(hash) = self.hash_cache {
            return hash;
        }
        let mut h = crate::hash::StateHasher::new();
        for param in &self.params {
            h.write_u64(param.hash_contribution());
        }
        let hash = h.finish();
        self.hash_cache = Some(hash);
        hash
    }

    // ---- snapshot / clone ----

    /// Immutable deep copy for a concurrent evaluation context, so in-flight
    /// work never observes a half-applied edit.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            params: self.params.clone(),
            index: self.index.clone(),
        }
    }

    /// Clone every parameter of `other` into this container, pairwise in
    /// creation order. Both containers must have been initialized with the
    /// same parameter set.
    pub fn clone_params_from(&mut self, other: &ParamSet) -> Result<(), ParamError> {
        debug_assert_eq!(self.params.len(), other.params.len());
        for (mine, theirs) in self.params.iter_mut().zip(other.params.iter()) {
            mine.clone_values_from(theirs)?;
        }
        self.hash_cache = None;
        Ok(())
    }
}

/// Read-only image of a container's parameters, taken at scheduling time.
#[derive(Clone)]
pub struct ParamSnapshot {
    params: Vec<Parameter>,
    index: HashMap<String, usize>,
}

impl ParamSnapshot {
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&slot| &self.params[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    pub fn get_value_at_time(
        &self,
        name: &str,
        time: f64,
        dimension: usize,
    ) -> Result<Value, ParamError> {
        let param = self
            .index
            .get(name)
            .map(|&slot| &self.params[slot])
            .ok_or_else(|| ParamError::UnknownParameter {
                name: name.to_string(),
            })?;
        param.get_value_at_time(time, dimension)
    }
}
