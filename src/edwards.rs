//! The edwards25519 curve group.

pub(crate) mod extended;
pub(crate) mod mul;

pub use extended::{AffinePoint, CompressedEdwardsY, ExtendedPoint};
pub use mul::Context;
