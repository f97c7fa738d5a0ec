//! Canonical content hashing for change fingerprints.
//!
//! Fingerprints decide whether cached downstream results are stale, so they
//! must be a pure function of value content: every field is written through a
//! canonical byte encoding (floats normalize -0.0 and NaN, strings are
//! length-prefixed, variants are tag-prefixed) and digested with BLAKE3,
//! which is keyless and stable across runs and platforms.

use knurl_api_core::Value;

/// Streaming hasher producing a 64-bit fingerprint.
pub struct StateHasher {
    inner: blake3::Hasher,
}

impl StateHasher {
    pub fn new() -> Self {
        StateHasher {
            inner: blake3::Hasher::new(),
        }
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.inner.update(bytes);
    }

    #[inline]
    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    #[inline]
    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, v: i64) {
        self.write_bytes(&v.to_le_bytes());
    }

    #[inline]
    pub fn write_usize(&mut self, v: usize) {
        self.write_u64(v as u64);
    }

    #[inline]
    pub fn write_bool(&mut self, v: bool) {
        self.write_u8(v as u8);
    }

    /// Canonical float encoding: -0.0 folds into 0.0 and every NaN payload
    /// folds into the one quiet NaN, so equal values hash equally.
    #[inline]
    pub fn write_f64(&mut self, v: f64) {
        let canonical = if v == 0.0 {
            0u64
        } else if v.is_nan() {
            0x7ff8_0000_0000_0000
        } else {
            v.to_bits()
        };
        self.write_u64(canonical);
    }

    /// Length-prefixed UTF-8 bytes.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.write_usize(s.len());
        self.write_bytes(s.as_bytes());
    }

    /// Tag-prefixed encoding of a value.
    pub fn write_value(&mut self, v: &Value) {
        match v {
            Value::Int(i) => {
                self.write_u8(0);
                self.write_i64(*i);
            }
            Value::Double(d) => {
                self.write_u8(1);
                self.write_f64(*d);
            }
            Value::Bool(b) => {
                self.write_u8(2);
                self.write_bool(*b);
            }
            Value::Text(s) => {
                self.write_u8(3);
                self.write_str(s);
            }
            Value::Index(i) => {
                self.write_u8(4);
                self.write_usize(*i);
            }
            Value::TextList(items) => {
                self.write_u8(5);
                self.write_usize(items.len());
                for item in items {
                    self.write_str(item);
                }
            }
        }
    }

    /// First eight digest bytes as a little-endian u64.
    pub fn finish(self) -> u64 {
        let digest = self.inner.finalize();
        let mut out = [0u8; 8];
        out.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(out)
    }
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}
