//! Field element traits implemented by every macro-generated field.
//!
//! These play the role the `ff` trait crate plays for the per-curve crates in
//! the wider ecosystem, restricted to exactly the surface the group and
//! protocol layers of this crate consume.

use core::fmt::Debug;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// An element of a prime field, stored in Montgomery form.
///
/// All operations run in time independent of operand values.
pub trait PrimeField:
    Copy
    + Clone
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + PartialEq
    + Eq
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Canonical serialized length in bytes.
    const NUM_BYTES: usize;

    /// Parses a canonical encoding. Rejects inputs of the wrong length or
    /// with value `>=` the modulus.
    fn from_bytes(bytes: &[u8]) -> CtOption<Self>;

    /// Writes the canonical encoding into `out`, which must be exactly
    /// [`Self::NUM_BYTES`] long.
    fn to_bytes(&self, out: &mut [u8]);

    /// Returns `self * self`.
    fn square(&self) -> Self;

    /// Returns `2 * self`.
    fn double(&self) -> Self {
        *self + *self
    }

    /// Returns the multiplicative inverse, or `None` for zero.
    fn invert(&self) -> CtOption<Self>;

    /// Parity of the canonical representative.
    fn is_odd(&self) -> Choice;

    /// Whether this is the additive identity.
    fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }
}

/// Square roots, required of base fields (point decompression) but not of
/// scalar fields.
pub trait Sqrt: PrimeField {
    /// Returns a square root of `self`, or `None` when `self` is a
    /// non-residue.
    fn sqrt(&self) -> CtOption<Self>;
}
