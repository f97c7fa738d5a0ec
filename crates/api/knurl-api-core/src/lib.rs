//! knurl-api-core: the closed value vocabulary shared by every knurl crate.
//!
//! Parameters are type-erased behind a single tagged `Value` enum; the set of
//! variants is fixed at this layer and concrete parameter kinds constrain
//! which tags are legal for their dimensions.

pub mod coercion;
pub mod value;

pub use value::{Value, ValueKind};
