//! The parameter ("knob"): a named, multi-dimensional, typed value holder.
//!
//! Each dimension carries a static value plus, once a keyframe is set, a
//! lazily created animation curve. The static value stays in place as the
//! non-animated fallback; a dimension reverts to static only when its last
//! keyframe is removed. Every value-affecting mutation refreshes the
//! parameter's hash contribution; presentation state never touches it.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::curve::{AnimCurve, Interpolation, Keyframe};
use crate::error::ParamError;
use crate::hash::StateHasher;
use crate::kind::ParamKind;
use knurl_api_core::Value;

/// Why a value changed. Forwarded unchanged to change notifications; never
/// alters the stored value. Restoration suppresses autosave downstream.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChangeReason {
    UserEdited,
    PluginEdited,
    StartupRestoration,
}

/// Advisory per-dimension range metadata for numeric kinds. Never enforced
/// on stored values and never part of the change fingerprint; the editing
/// surface decides what to do with it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct NumericMeta {
    pub mins: Vec<f64>,
    pub maxs: Vec<f64>,
    pub display_mins: Vec<f64>,
    pub display_maxs: Vec<f64>,
    pub increments: Vec<f64>,
    pub decimals: Vec<i32>,
}

/// Write `value` at `index`, padding any skipped slots with `filler`.
fn pad_set<T: Copy>(list: &mut Vec<T>, index: usize, value: T, filler: T) {
    if index < list.len() {
        list[index] = value;
    } else {
        while list.len() < index {
            list.push(filler);
        }
        list.push(value);
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    name: String,
    label: String,
    kind: ParamKind,
    dimension: usize,
    values: Vec<Value>,
    curves: Vec<Option<AnimCurve>>,
    interpolation: Interpolation,
    enabled: bool,
    visible: bool,
    undoable: bool,
    insignificant: bool,
    parent: Option<String>,
    hint: Option<String>,
    entries: Vec<String>,
    meta: NumericMeta,
    state_hash: u64,
}

impl Parameter {
    /// A parameter with default values in every dimension. The label starts
    /// out equal to the internal name; builders adjust the rest.
    pub fn new(kind: ParamKind, name: impl Into<String>, dimension: usize) -> Self {
        debug_assert!(dimension >= 1);
        // A 2-channel color makes no sense; 1 is grayscale, 3/4 are RGB(A).
        debug_assert!(kind != ParamKind::Color || (dimension <= 4 && dimension != 2));
        let name = name.into();
        let mut param = Parameter {
            label: name.clone(),
            name,
            kind,
            dimension,
            values: vec![kind.default_value(); dimension],
            curves: vec![None; dimension],
            interpolation: kind.default_interpolation(),
            enabled: true,
            visible: true,
            undoable: true,
            insignificant: false,
            parent: None,
            hint: None,
            entries: Vec::new(),
            meta: NumericMeta::default(),
            state_hash: 0,
        };
        param.recompute_hash();
        param
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Changes to this parameter will never trigger re-evaluation.
    pub fn insignificant(mut self) -> Self {
        self.insignificant = true;
        self
    }

    pub fn non_undoable(mut self) -> Self {
        self.undoable = false;
        self
    }

    // ---- identity and presentation ----

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    #[inline]
    pub fn can_animate(&self) -> bool {
        self.kind.can_animate()
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_undoable(&self) -> bool {
        self.undoable
    }

    #[inline]
    pub fn is_insignificant(&self) -> bool {
        self.insignificant
    }

    #[inline]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[inline]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_insignificant(&mut self, insignificant: bool) {
        self.insignificant = insignificant;
    }

    pub fn set_undoable(&mut self, undoable: bool) {
        self.undoable = undoable;
    }

    // ---- values and animation ----

    fn check_dimension(&self, dimension: usize) -> Result<(), ParamError> {
        if dimension >= self.dimension {
            return Err(ParamError::DimensionOutOfRange {
                name: self.name.clone(),
                dimension,
                count: self.dimension,
            });
        }
        Ok(())
    }

    fn check_kind(&self, value: &Value) -> Result<(), ParamError> {
        let expected = self.kind.value_kind();
        let actual = value.kind();
        if actual != expected {
            return Err(ParamError::InvalidValueKind { expected, actual });
        }
        Ok(())
    }

    /// Set the static value of a dimension. If the dimension is animated this
    /// only updates the non-animated fallback; existing keyframes stay.
    pub fn set_value(&mut self, dimension: usize, value: Value) -> Result<(), ParamError> {
        self.check_dimension(dimension)?;
        self.check_kind(&value)?;
        trace!("{}[{}] = {:?}", self.name, dimension, value);
        self.values[dimension] = value;
        self.recompute_hash();
        Ok(())
    }

    /// Insert or update a keyframe at `time` on a dimension's curve, creating
    /// the curve on first use.
    pub fn set_value_at_time(
        &mut self,
        time: f64,
        dimension: usize,
        value: Value,
    ) -> Result<(), ParamError> {
        self.set_keyframe(dimension, Keyframe::new(time, value))
    }

    /// Full-control variant of `set_value_at_time` carrying tangents.
    pub fn set_keyframe(&mut self, dimension: usize, key: Keyframe) -> Result<(), ParamError> {
        self.check_dimension(dimension)?;
        if !self.kind.can_animate() {
            return Err(ParamError::AnimationNotSupported {
                type_name: self.kind.type_name().to_string(),
            });
        }
        self.check_kind(&key.value)?;
        trace!("{}[{}] key at t={}", self.name, dimension, key.time);
        let interpolation = self.interpolation;
        let curve = self.curves[dimension].get_or_insert_with(|| AnimCurve::new(interpolation));
        let result = curve.insert_or_update(key);
        let now_empty = curve.is_empty();
        if now_empty {
            // A rejected first insert must not leave an empty curve behind.
            self.curves[dimension] = None;
        }
        result?;
        self.recompute_hash();
        Ok(())
    }

    /// The static (fallback) value of a dimension. Animated dimensions keep
    /// serving their fallback here; time-correct reads go through
    /// `get_value_at_time`.
    pub fn get_value(&self, dimension: usize) -> Result<&Value, ParamError> {
        self.check_dimension(dimension)?;
        Ok(&self.values[dimension])
    }

    /// All dimensions' static values, in dimension order.
    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The value of a dimension at `time`: the curve's evaluation when
    /// animated, the static value otherwise (time ignored).
    pub fn get_value_at_time(&self, time: f64, dimension: usize) -> Result<Value, ParamError> {
        self.check_dimension(dimension)?;
        if let Some(curve) = &self.curves[dimension] {
            if !curve.is_empty() {
                return curve.evaluate(time);
            }
        }
        Ok(self.values[dimension].clone())
    }

    /// Whether a dimension currently carries keyframes.
    pub fn has_animation(&self, dimension: usize) -> bool {
        self.curves
            .get(dimension)
            .and_then(|c| c.as_ref())
            .map(|c| !c.is_empty())
            .unwrap_or(false)
    }

    /// Ordered (time, value) pairs of a dimension's keyframes; empty when the
    /// dimension is static.
    pub fn keyframes(&self, dimension: usize) -> Result<Vec<(f64, Value)>, ParamError> {
        self.check_dimension(dimension)?;
        Ok(self.curves[dimension]
            .as_ref()
            .map(|c| c.keys().iter().map(|k| (k.time, k.value.clone())).collect())
            .unwrap_or_default())
    }

    pub fn curve(&self, dimension: usize) -> Option<&AnimCurve> {
        self.curves.get(dimension).and_then(|c| c.as_ref())
    }

    /// Remove the keyframe at exactly `time`; absent times are a no-op.
    /// Removing the last key reverts the dimension to its static value.
    pub fn remove_keyframe(&mut self, time: f64, dimension: usize) -> Result<bool, ParamError> {
        self.check_dimension(dimension)?;
        let Some(curve) = self.curves[dimension].as_mut() else {
            return Ok(false);
        };
        let removed = curve.remove_at(time);
        if curve.is_empty() {
            self.curves[dimension] = None;
        }
        if removed {
            self.recompute_hash();
        }
        Ok(removed)
    }

    /// Drop every keyframe of a dimension. Returns whether any existed.
    pub fn clear_animation(&mut self, dimension: usize) -> Result<bool, ParamError> {
        self.check_dimension(dimension)?;
        let had_keys = self.has_animation(dimension);
        self.curves[dimension] = None;
        if had_keys {
            self.recompute_hash();
        }
        Ok(had_keys)
    }

    /// Change the interpolation mode for existing and future curves.
    pub fn set_interpolation(&mut self, mode: Interpolation) {
        self.interpolation = mode;
        for curve in self.curves.iter_mut().flatten() {
            curve.set_interpolation(mode);
        }
        self.recompute_hash();
    }

    /// Copy every dimension's static value and animation curve from `other`,
    /// which must carry the same internal name. Used to snapshot live state
    /// into a copy that in-flight computations read undisturbed.
    pub fn clone_values_from(&mut self, other: &Parameter) -> Result<(), ParamError> {
        if self.name != other.name {
            return Err(ParamError::NameMismatch {
                this: self.name.clone(),
                other: other.name.clone(),
            });
        }
        self.values = other.values.clone();
        self.curves = other.curves.clone();
        self.interpolation = other.interpolation;
        self.recompute_hash();
        Ok(())
    }

    // ---- choice entries ----

    /// Populate the entry list of a Choice parameter.
    pub fn set_entries(&mut self, entries: Vec<String>) {
        debug_assert!(self.kind == ParamKind::Choice);
        self.entries = entries;
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Text of the active entry, for Choice parameters holding an in-range index.
    pub fn active_entry_text(&self) -> Option<&str> {
        match self.values.first() {
            Some(Value::Index(i)) => self.entries.get(*i).map(|s| s.as_str()),
            _ => None,
        }
    }

    // ---- advisory range metadata ----

    pub fn meta(&self) -> &NumericMeta {
        &self.meta
    }

    fn increment_filler(&self) -> f64 {
        if self.kind == ParamKind::Int {
            1.0
        } else {
            0.1
        }
    }

    pub fn set_minimum(&mut self, value: f64, index: usize) {
        pad_set(&mut self.meta.mins, index, value, 0.0);
    }

    pub fn set_maximum(&mut self, value: f64, index: usize) {
        pad_set(&mut self.meta.maxs, index, value, 99.0);
    }

    pub fn set_display_minimum(&mut self, value: f64, index: usize) {
        pad_set(&mut self.meta.display_mins, index, value, 0.0);
    }

    pub fn set_display_maximum(&mut self, value: f64, index: usize) {
        pad_set(&mut self.meta.display_maxs, index, value, 99.0);
    }

    pub fn set_increment(&mut self, value: f64, index: usize) {
        debug_assert!(value > 0.0);
        let filler = self.increment_filler();
        pad_set(&mut self.meta.increments, index, value, filler);
    }

    pub fn set_decimals(&mut self, value: i32, index: usize) {
        pad_set(&mut self.meta.decimals, index, value, 3);
    }

    // ---- hashing ----

    /// This parameter's contribution to the container's aggregate hash:
    /// kind tag plus, for hashed kinds, every dimension's value and curve.
    #[inline]
    pub fn hash_contribution(&self) -> u64 {
        self.state_hash
    }

    fn recompute_hash(&mut self) {
        let mut h = StateHasher::new();
        h.write_str(self.kind.type_name());
        if self.kind.hashed() {
            for (value, curve) in self.values.iter().zip(self.curves.iter()) {
                h.write_value(value);
                match curve {
                    Some(c) if !c.is_empty() => {
                        h.write_u8(1);
                        h.write_u8(interpolation_tag(c.interpolation()));
                        h.write_usize(c.len());
                        for key in c.keys() {
                            h.write_f64(key.time);
                            h.write_value(&key.value);
                            h.write_f64(key.left.dt);
                            h.write_value(&key.left.dv);
                            h.write_f64(key.right.dt);
                            h.write_value(&key.right.dv);
                        }
                    }
                    _ => h.write_u8(0),
                }
            }
        }
        self.state_hash = h.finish();
    }
}

fn interpolation_tag(mode: Interpolation) -> u8 {
    match mode {
        Interpolation::Constant => 0,
        Interpolation::Linear => 1,
        Interpolation::Cubic => 2,
        Interpolation::CatmullRom => 3,
    }
}
