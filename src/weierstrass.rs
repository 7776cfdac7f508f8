//! Short-Weierstrass curve groups, generic over the per-curve parameters.

pub(crate) mod affine;
pub(crate) mod mul;
pub(crate) mod projective;

pub use affine::AffinePoint;
pub use mul::Context;
pub use projective::ProjectivePoint;

use crate::arithmetic::{IsHigh, PrimeField, Reduce, Sqrt};
use core::fmt::Debug;

/// Parameters of a short-Weierstrass curve `y^2 = x^3 + ax + b` with prime
/// order and cofactor 1.
///
/// Implementations are zero-sized marker types; every associated item is a
/// compile-time constant, so a curve carries no runtime state of its own.
pub trait PrimeCurveParams:
    Copy + Clone + Debug + Default + Eq + Ord + Send + Sync + 'static
{
    /// Base field element type.
    type FieldElement: PrimeField + Sqrt;

    /// Scalar field (group order) element type.
    type Scalar: PrimeField + Reduce + IsHigh;

    /// Registry tag for this curve.
    const NAME: &'static str;

    /// Coefficient `a` of the curve equation.
    const EQUATION_A: Self::FieldElement;

    /// Coefficient `b` of the curve equation.
    const EQUATION_B: Self::FieldElement;

    /// Affine coordinates of the base point.
    const GENERATOR: (Self::FieldElement, Self::FieldElement);

    /// The group order `n` embedded in the base field (`n < p` holds for
    /// every supported curve). Used by the Jacobian-form `x mod n`
    /// comparison during verification.
    const ORDER_IN_FIELD: Self::FieldElement;

    /// `p - n` as canonical big-endian bytes, the bound below which an
    /// x-coordinate may have overflowed the order.
    const MODULUS_MINUS_ORDER: &'static [u8];

    /// `beta` such that `lambda * (x, y) = (beta * x, y)`, for curves with an
    /// efficient endomorphism.
    const ENDOMORPHISM_BETA: Option<Self::FieldElement> = None;

    /// Splits `k` into `(r1, r2)` with `k = r1 + r2 * lambda (mod n)` and
    /// both components (after sign folding) half-width, when the curve has an
    /// efficient endomorphism.
    fn decompose_scalar(k: &Self::Scalar) -> Option<(Self::Scalar, Self::Scalar)> {
        let _ = k;
        None
    }
}
