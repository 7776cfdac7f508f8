//! edwards25519 points in extended homogeneous coordinates.
//!
//! `(X, Y, Z, T)` with affine image `(X/Z, Y/Z)` and `T = XY/Z`. The
//! Hisil-Wong-Carter-Dawson unified formulas are complete on this curve
//! (a = -1, d a non-square), so one addition routine serves doubling and
//! every degenerate case without selects or branches.

use crate::ed25519::{FieldElement, GENERATOR_T, GENERATOR_X, GENERATOR_Y};
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Point on edwards25519 in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// x-coordinate.
    pub(crate) x: FieldElement,

    /// y-coordinate.
    pub(crate) y: FieldElement,
}

impl AffinePoint {
    /// The neutral element `(0, 1)`.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
    };

    /// Lifts into extended coordinates.
    pub fn to_extended(&self) -> ExtendedPoint {
        ExtendedPoint {
            x: self.x,
            y: self.y,
            z: FieldElement::ONE,
            t: self.x * self.y,
        }
    }
}

/// RFC 8032 encoding: 32 little-endian bytes of `y` with the parity of `x`
/// in the top bit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl CompressedEdwardsY {
    /// Attempts to decompress to an [`ExtendedPoint`].
    ///
    /// Rejects non-canonical `y`, `y` values whose `x² = (y² - 1)/(d y² + 1)`
    /// has no root, and the non-canonical encoding of `x = 0` with the sign
    /// bit set.
    pub fn decompress(&self) -> CtOption<ExtendedPoint> {
        let sign = Choice::from(self.0[31] >> 7);
        let mut y_bytes = self.0;
        y_bytes[31] &= 0x7f;

        FieldElement::from_bytes(&y_bytes).and_then(|y| {
            let yy = y.square();
            let u = yy - FieldElement::ONE;
            let v = yy * FieldElement::EDWARDS_D + FieldElement::ONE;

            let (is_square, mut x) = FieldElement::sqrt_ratio(&u, &v);

            let sign_mismatch = x.is_odd() ^ sign;
            x = FieldElement::conditional_select(&x, &-x, sign_mismatch);
            let bad_zero_sign = x.is_zero() & sign;

            let point = AffinePoint { x, y }.to_extended();
            CtOption::new(point, is_square & !bad_zero_sign)
        })
    }

    /// The raw byte encoding.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Point on edwards25519 in extended coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ExtendedPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl ExtendedPoint {
    /// The neutral element `(0, 1, 1, 0)`.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    /// The RFC 8032 base point.
    pub const GENERATOR: Self = Self {
        x: GENERATOR_X,
        y: GENERATOR_Y,
        z: FieldElement::ONE,
        t: GENERATOR_T,
    };

    /// Unified addition (HWCD 2008, §3.1, a = -1 variant with `2d`).
    pub fn add(&self, other: &Self) -> Self {
        let a = (self.y - self.x) * (other.y - other.x);
        let b = (self.y + self.x) * (other.y + other.x);
        let c = self.t * FieldElement::EDWARDS_D2 * other.t;
        let d = (self.z * other.z).double();

        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        Self {
            x: e * f,
            y: g * h,
            z: f * g,
            t: e * h,
        }
    }

    /// Doubles this point via the unified formulas.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// Is this the neutral element? Constant-time.
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.ct_eq(&self.z)
    }

    /// Whether the point lies in the kernel of multiplication by the
    /// cofactor.
    pub fn is_small_order(&self) -> Choice {
        self.double().double().double().is_identity()
    }

    /// Checks the projective curve equation `-X² + Y² = Z² + d T²` along
    /// with the extended-coordinate invariant `X Y = Z T`. Constant-time.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square() - self.x.square();
        let rhs = self.z.square() + FieldElement::EDWARDS_D * self.t.square();
        lhs.ct_eq(&rhs) & (self.x * self.y).ct_eq(&(self.z * self.t))
    }

    /// Converts to affine coordinates.
    pub fn to_affine(&self) -> AffinePoint {
        let zinv = self
            .z
            .invert()
            .unwrap_or_else(|| FieldElement::ZERO);
        AffinePoint {
            x: self.x * zinv,
            y: self.y * zinv,
        }
    }

    /// Compresses per RFC 8032 §5.1.2.
    pub fn compress(&self) -> CompressedEdwardsY {
        let affine = self.to_affine();
        let mut bytes = [0u8; 32];
        affine.y.to_bytes(&mut bytes);
        bytes[31] |= affine.x.is_odd().unwrap_u8() << 7;
        CompressedEdwardsY(bytes)
    }

    /// Constant-time multiplication by an arbitrary scalar.
    pub fn mul(&self, k: &crate::ed25519::Scalar) -> Self {
        super::mul::mul(self, k)
    }
}

impl ConditionallySelectable for ExtendedPoint {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }
}

impl ConstantTimeEq for ExtendedPoint {
    /// Projective comparison `X1 Z2 = X2 Z1`, `Y1 Z2 = Y2 Z1`.
    fn ct_eq(&self, other: &Self) -> Choice {
        (self.x * other.z).ct_eq(&(other.x * self.z))
            & (self.y * other.z).ct_eq(&(other.y * self.z))
    }
}

impl Default for ExtendedPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for ExtendedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ExtendedPoint {}

impl Add<&ExtendedPoint> for ExtendedPoint {
    type Output = ExtendedPoint;

    fn add(self, other: &ExtendedPoint) -> ExtendedPoint {
        ExtendedPoint::add(&self, other)
    }
}

impl AddAssign<&ExtendedPoint> for ExtendedPoint {
    fn add_assign(&mut self, rhs: &ExtendedPoint) {
        *self = ExtendedPoint::add(self, rhs);
    }
}

impl Sub<&ExtendedPoint> for ExtendedPoint {
    type Output = ExtendedPoint;

    fn sub(self, other: &ExtendedPoint) -> ExtendedPoint {
        ExtendedPoint::sub(&self, other)
    }
}

impl SubAssign<&ExtendedPoint> for ExtendedPoint {
    fn sub_assign(&mut self, rhs: &ExtendedPoint) {
        *self = ExtendedPoint::sub(self, rhs);
    }
}

impl Neg for ExtendedPoint {
    type Output = ExtendedPoint;

    fn neg(self) -> ExtendedPoint {
        ExtendedPoint::neg(&self)
    }
}

impl Neg for &ExtendedPoint {
    type Output = ExtendedPoint;

    fn neg(self) -> ExtendedPoint {
        ExtendedPoint::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{CompressedEdwardsY, ExtendedPoint};
    use hex_literal::hex;

    const G_COMPRESSED: [u8; 32] =
        hex!("5866666666666666666666666666666666666666666666666666666666666666");
    const G2_COMPRESSED: [u8; 32] =
        hex!("c9a3f86aae465f0e56513864510f3997561fa2c9e85ea21dc2292309f3cd6022");
    const G3_COMPRESSED: [u8; 32] =
        hex!("d4b4f5784868c3020403246717ec169ff79e26608ea126a1ab69ee77d1b16712");

    #[test]
    fn generator_compresses_to_vector() {
        assert_eq!(ExtendedPoint::GENERATOR.compress().0, G_COMPRESSED);
        assert!(bool::from(ExtendedPoint::GENERATOR.is_on_curve()));
    }

    #[test]
    fn double_and_add_vectors() {
        let g = ExtendedPoint::GENERATOR;
        let g2 = g.double();
        let g3 = g2.add(&g);

        assert_eq!(g2.compress().0, G2_COMPRESSED);
        assert_eq!(g3.compress().0, G3_COMPRESSED);
        assert!(bool::from(g2.is_on_curve()));
        assert!(bool::from(g3.is_on_curve()));

        assert_eq!(g3.sub(&g), g2);
        assert_eq!(g.add(&g.neg()), ExtendedPoint::IDENTITY);
        assert_eq!(g.add(&ExtendedPoint::IDENTITY), g);
    }

    #[test]
    fn decompress_roundtrip() {
        let g2 = CompressedEdwardsY(G2_COMPRESSED).decompress().unwrap();
        assert_eq!(g2, ExtendedPoint::GENERATOR.double());
        assert_eq!(g2.compress().0, G2_COMPRESSED);

        // flip the sign bit: still a valid point, no longer 2G
        let mut flipped = G2_COMPRESSED;
        flipped[31] ^= 0x80;
        let neg_g2 = CompressedEdwardsY(flipped).decompress().unwrap();
        assert_eq!(neg_g2, g2.neg());
    }

    #[test]
    fn decompress_rejects_non_canonical() {
        // y = p is non-canonical
        let y_eq_p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(bool::from(CompressedEdwardsY(y_eq_p).decompress().is_none()));

        // y = 2 gives a non-square x²
        let mut y_two = [0u8; 32];
        y_two[0] = 2;
        assert!(bool::from(CompressedEdwardsY(y_two).decompress().is_none()));

        // identity with sign bit set encodes x = 0 non-canonically
        let mut bad_identity = [0u8; 32];
        bad_identity[0] = 1;
        bad_identity[31] = 0x80;
        assert!(bool::from(
            CompressedEdwardsY(bad_identity).decompress().is_none()
        ));
    }

    #[test]
    fn small_order_detection() {
        assert!(bool::from(ExtendedPoint::IDENTITY.is_small_order()));
        assert!(!bool::from(ExtendedPoint::GENERATOR.is_small_order()));

        // the order-2 point (0, -1)
        let minus_one = crate::ed25519::FieldElement::ZERO - crate::ed25519::FieldElement::ONE;
        let two_torsion = super::AffinePoint {
            x: crate::ed25519::FieldElement::ZERO,
            y: minus_one,
        }
        .to_extended();
        assert!(bool::from(two_torsion.is_on_curve()));
        assert!(bool::from(two_torsion.is_small_order()));
    }
}
