//! Shared arithmetic internals: limb helpers, the Montgomery engine, and the
//! field/scalar contracts consumed by the group and protocol layers.

pub(crate) mod field;
pub(crate) mod limb;
pub(crate) mod macros;
pub(crate) mod scalar;

pub use field::{PrimeField, Sqrt};
pub use scalar::{IsHigh, Reduce};
