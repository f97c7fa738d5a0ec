//! Keyframes and the per-dimension animation curve.
//!
//! A curve is an ordered run of keyframes, strictly increasing in time
//! (inserting at an existing time replaces that key). The first key
//! establishes the curve's value kind; every later insertion must match it.
//! Evaluation clamps to the endpoint values outside the keyed span.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;
use crate::interp::{catmull_rom_slope, hermite, lerp};
use knurl_api_core::{coercion, Value, ValueKind};

/// How a curve blends between bracketing keyframes.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interpolation {
    /// Step function: hold the left key until the next one.
    Constant,
    /// Linear blend by normalized position between the bracketing keys.
    Linear,
    /// Hermite blend using each key's own authored tangent slopes.
    Cubic,
    /// Hermite blend with slopes derived from neighboring keys; authored
    /// tangents are ignored.
    CatmullRom,
}

/// One side of a keyframe's tangent pair: a (time delta, value delta) step
/// whose ratio is the slope used by Cubic interpolation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tangent {
    pub dt: f64,
    pub dv: Value,
}

impl Tangent {
    /// A flat tangent (zero slope over a unit step).
    pub fn flat() -> Self {
        Tangent {
            dt: 1.0,
            dv: Value::Double(0.0),
        }
    }

    /// Slope in value units per time unit; zero for degenerate or
    /// non-numeric deltas.
    #[inline]
    pub fn slope(&self) -> f64 {
        if self.dt == 0.0 {
            return 0.0;
        }
        coercion::as_f64(&self.dv).unwrap_or(0.0) / self.dt
    }
}

impl Default for Tangent {
    fn default() -> Self {
        Self::flat()
    }
}

/// A single authored (time, value, tangent-pair) sample.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub value: Value,
    #[serde(default)]
    pub left: Tangent,
    #[serde(default)]
    pub right: Tangent,
}

impl Keyframe {
    /// A keyframe with flat tangents.
    pub fn new(time: f64, value: Value) -> Self {
        Keyframe {
            time,
            value,
            left: Tangent::flat(),
            right: Tangent::flat(),
        }
    }

    pub fn with_tangents(mut self, left: Tangent, right: Tangent) -> Self {
        self.left = left;
        self.right = right;
        self
    }
}

/// Ordered keyframes for one parameter dimension.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AnimCurve {
    interpolation: Interpolation,
    keys: Vec<Keyframe>,
}

impl AnimCurve {
    pub fn new(interpolation: Interpolation) -> Self {
        AnimCurve {
            interpolation,
            keys: Vec::new(),
        }
    }

    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, mode: Interpolation) {
        self.interpolation = mode;
    }

    /// The kind established by the first keyframe, if any.
    #[inline]
    pub fn value_kind(&self) -> Option<ValueKind> {
        self.keys.first().map(|k| k.value.kind())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Insert a keyframe, or replace the one at exactly `key.time`.
    ///
    /// Fails with `InvalidValueKind` if a kind is already established and the
    /// new value's tag differs.
    pub fn insert_or_update(&mut self, key: Keyframe) -> Result<(), ParamError> {
        debug_assert!(key.time.is_finite());
        if let Some(expected) = self.value_kind() {
            let actual = key.value.kind();
            if actual != expected {
                return Err(ParamError::InvalidValueKind { expected, actual });
            }
        }
        let idx = self.keys.partition_point(|k| k.time < key.time);
        if idx < self.keys.len() && self.keys[idx].time == key.time {
            self.keys[idx] = key;
        } else {
            self.keys.insert(idx, key);
        }
        Ok(())
    }

    /// Remove the keyframe at exactly `time`. Returns whether one existed;
    /// removing an absent time is not an error.
    pub fn remove_at(&mut self, time: f64) -> bool {
        let idx = self.keys.partition_point(|k| k.time < time);
        if idx < self.keys.len() && self.keys[idx].time == time {
            self.keys.remove(idx);
            true
        } else {
            false
        }
    }

    /// Evaluate the curve at an arbitrary time.
    ///
    /// Zero keys is a caller error (`EmptyCurve`): the dimension's static
    /// value is the fallback and callers must have checked for animation
    /// first. One key is constant everywhere. With two or more keys, times
    /// outside the keyed span clamp to the nearest endpoint's value and
    /// interior times interpolate per the curve's mode.
    pub fn evaluate(&self, time: f64) -> Result<Value, ParamError> {
        let n = self.keys.len();
        if n == 0 {
            return Err(ParamError::EmptyCurve);
        }
        let kind = self.keys[0].value.kind();
        // A multi-key non-numeric curve only holds under Constant; reject the
        // (curve, mode) pairing everywhere rather than just between keys.
        if n >= 2 && !kind.is_numeric() && self.interpolation != Interpolation::Constant {
            return Err(ParamError::UnsupportedInterpolation {
                mode: self.interpolation,
                kind,
            });
        }
        if n == 1 {
            return Ok(self.keys[0].value.clone());
        }
        if time <= self.keys[0].time {
            return Ok(self.keys[0].value.clone());
        }
        if time >= self.keys[n - 1].time {
            return Ok(self.keys[n - 1].value.clone());
        }

        // Bracketing pair around an interior time.
        let i1 = self.keys.partition_point(|k| k.time <= time);
        let i0 = i1 - 1;
        let k0 = &self.keys[i0];
        let k1 = &self.keys[i1];

        if self.interpolation == Interpolation::Constant {
            return Ok(k0.value.clone());
        }

        let p0 = coercion::as_f64(&k0.value).unwrap_or(0.0);
        let p1 = coercion::as_f64(&k1.value).unwrap_or(0.0);
        let span = k1.time - k0.time;
        let u = (time - k0.time) / span;

        let out = match self.interpolation {
            Interpolation::Linear => lerp(p0, p1, u),
            Interpolation::Cubic => hermite(p0, k0.right.slope(), p1, k1.left.slope(), span, u),
            Interpolation::CatmullRom => {
                let secant = (p1 - p0) / span;
                let m0 = if i0 == 0 {
                    secant
                } else {
                    let prev = &self.keys[i0 - 1];
                    catmull_rom_slope(
                        prev.time,
                        coercion::as_f64(&prev.value).unwrap_or(0.0),
                        k1.time,
                        p1,
                    )
                };
                let m1 = if i1 == n - 1 {
                    secant
                } else {
                    let next = &self.keys[i1 + 1];
                    catmull_rom_slope(
                        k0.time,
                        p0,
                        next.time,
                        coercion::as_f64(&next.value).unwrap_or(0.0),
                    )
                };
                hermite(p0, m0, p1, m1, span, u)
            }
            Interpolation::Constant => unreachable!(),
        };
        Ok(coercion::from_f64(kind, out))
    }
}
