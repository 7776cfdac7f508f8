//! Jacobian curve points and the group law.
//!
//! Points are `(X, Y, Z)` with affine image `(X/Z^2, Y/Z^3)`; the identity is
//! any triple with `Z = 0`, stored as `(1, 1, 0)`. One generic-`a` formula
//! set serves every curve; the degenerate cases of the addition formulas
//! (either input the identity, `P = Q`, `P = -Q`) are resolved with
//! constant-time selects, never branches, so the same code path is safe for
//! secret-dependent inputs.

use crate::arithmetic::PrimeField;
use crate::weierstrass::{mul, AffinePoint, PrimeCurveParams};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Point on a short-Weierstrass curve in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<C: PrimeCurveParams> {
    pub(crate) x: C::FieldElement,
    pub(crate) y: C::FieldElement,
    pub(crate) z: C::FieldElement,
}

impl<C> ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    /// Additive identity of the group.
    pub const IDENTITY: Self = Self {
        x: <C::FieldElement as PrimeField>::ONE,
        y: <C::FieldElement as PrimeField>::ONE,
        z: <C::FieldElement as PrimeField>::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: <C::FieldElement as PrimeField>::ONE,
    };

    /// Is this the point at infinity? Constant-time.
    pub fn is_identity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Checks `Y^2 = X^3 + aXZ^4 + bZ^6`, the Jacobian form of the curve
    /// equation. Constant-time.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z4 = z2.square();
        let z6 = z4 * z2;
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + C::EQUATION_A * self.x * z4 + C::EQUATION_B * z6;
        lhs.ct_eq(&rhs)
    }

    /// Doubles this point.
    ///
    /// `dbl-2007-bl` with the generic `M = 3X^2 + aZ^4` term; maps the
    /// identity to itself since `Z = 0` forces `Z3 = 0`.
    pub fn double(&self) -> Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();

        let s = ((self.x + yy).square() - xx - yyyy).double();
        let m = xx.double() + xx + C::EQUATION_A * zz.square();

        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - yyyy.double().double().double();
        let z3 = (self.y + self.z).square() - yy - zz;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`, complete over all inputs.
    pub fn add(&self, other: &Self) -> Self {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * z2z2 * other.z;
        let s2 = other.y * z1z1 * self.z;
        let h = u2 - u1;
        let r = s2 - s1;

        let h_zero = h.is_zero();
        let r_zero = r.is_zero();
        let p_inf = self.is_identity();
        let q_inf = other.is_identity();

        let hh = h.square();
        let hhh = h * hh;
        let v = u1 * hh;
        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - s1 * hhh;
        let z3 = h * self.z * other.z;

        let mut ret = Self {
            x: x3,
            y: y3,
            z: z3,
        };

        // H = 0 with neither input at infinity means P = +/-Q; the generic
        // formulas degenerate there.
        let degenerate = h_zero & !p_inf & !q_inf;
        ret.conditional_assign(&self.double(), degenerate & r_zero);
        ret.conditional_assign(&Self::IDENTITY, degenerate & !r_zero);
        ret.conditional_assign(other, p_inf);
        ret.conditional_assign(self, q_inf);
        ret
    }

    /// Returns `self + other` for an affine `other`, complete over all
    /// inputs.
    pub fn add_mixed(&self, other: &AffinePoint<C>) -> Self {
        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * z1z1 * self.z;
        let h = u2 - self.x;
        let r = s2 - self.y;

        let h_zero = h.is_zero();
        let r_zero = r.is_zero();
        let p_inf = self.is_identity();
        let q_inf = other.is_identity();

        let hh = h.square();
        let hhh = h * hh;
        let v = self.x * hh;
        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - self.y * hhh;
        let z3 = h * self.z;

        let mut ret = Self {
            x: x3,
            y: y3,
            z: z3,
        };

        let degenerate = h_zero & !p_inf & !q_inf;
        ret.conditional_assign(&self.double(), degenerate & r_zero);
        ret.conditional_assign(&Self::IDENTITY, degenerate & !r_zero);
        ret.conditional_assign(&Self::from(*other), p_inf);
        ret.conditional_assign(self, q_inf);
        ret
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `self - other` for an affine `other`.
    pub fn sub_mixed(&self, other: &AffinePoint<C>) -> Self {
        self.add_mixed(&other.neg())
    }

    /// Converts to affine coordinates with a single field inversion.
    pub fn to_affine(&self) -> AffinePoint<C> {
        self.z
            .invert()
            .map(|zinv| {
                let zinv2 = zinv.square();
                let zinv3 = zinv2 * zinv;
                AffinePoint {
                    x: self.x * zinv2,
                    y: self.y * zinv3,
                    infinity: 0,
                }
            })
            .unwrap_or_else(|| AffinePoint::IDENTITY)
    }

    /// Converts a batch of points to affine form with one shared inversion
    /// (Montgomery's trick). Identity inputs map to the affine identity.
    pub fn batch_normalize<const N: usize>(points: &[Self; N]) -> [AffinePoint<C>; N] {
        let one = <C::FieldElement as PrimeField>::ONE;
        let mut prefix = [one; N];
        let mut acc = one;
        for i in 0..N {
            prefix[i] = acc;
            let z =
                C::FieldElement::conditional_select(&points[i].z, &one, points[i].is_identity());
            acc = acc * z;
        }

        // acc is a product of nonzero factors, so the inversion succeeds.
        let mut inv = acc.invert().unwrap_or_else(|| one);

        let mut out = [AffinePoint::IDENTITY; N];
        for i in (0..N).rev() {
            let z =
                C::FieldElement::conditional_select(&points[i].z, &one, points[i].is_identity());
            let zinv = inv * prefix[i];
            inv = inv * z;

            let zinv2 = zinv.square();
            let zinv3 = zinv2 * zinv;
            let affine = AffinePoint {
                x: points[i].x * zinv2,
                y: points[i].y * zinv3,
                infinity: 0,
            };
            out[i] = AffinePoint::conditional_select(&affine, &AffinePoint::IDENTITY, points[i].is_identity());
        }
        out
    }

    /// Returns `[k] self` in constant time.
    pub fn mul(&self, k: &C::Scalar) -> Self {
        mul::mul(self, k)
    }
}

impl<C> From<AffinePoint<C>> for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        let projective = Self {
            x: p.x,
            y: p.y,
            z: <C::FieldElement as PrimeField>::ONE,
        };
        Self::conditional_select(&projective, &Self::IDENTITY, p.is_identity())
    }
}

impl<C> From<ProjectivePoint<C>> for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn from(p: ProjectivePoint<C>) -> Self {
        p.to_affine()
    }
}

impl<C> ConditionallySelectable for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            z: C::FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl<C> ConstantTimeEq for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    /// Cross-multiplied comparison `X1 Z2^2 = X2 Z1^2`, `Y1 Z2^3 = Y2 Z1^3`;
    /// no inversion.
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * z2z2 * other.z).ct_eq(&(other.y * z1z1 * self.z));

        let p_inf = self.is_identity();
        let q_inf = other.is_identity();
        (p_inf & q_inf) | (!p_inf & !q_inf & x_eq & y_eq)
    }
}

impl<C> Default for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> PartialEq for ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> Eq for ProjectivePoint<C> where C: PrimeCurveParams {}

impl<C: PrimeCurveParams> Add<ProjectivePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn add(self, other: ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(&self, &other)
    }
}

impl<C: PrimeCurveParams> Add<&ProjectivePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn add(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add(&self, other)
    }
}

impl<C: PrimeCurveParams> AddAssign<ProjectivePoint<C>> for ProjectivePoint<C> {
    fn add_assign(&mut self, rhs: ProjectivePoint<C>) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl<C: PrimeCurveParams> AddAssign<&ProjectivePoint<C>> for ProjectivePoint<C> {
    fn add_assign(&mut self, rhs: &ProjectivePoint<C>) {
        *self = ProjectivePoint::add(self, rhs);
    }
}

impl<C: PrimeCurveParams> Add<&AffinePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn add(self, other: &AffinePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::add_mixed(&self, other)
    }
}

impl<C: PrimeCurveParams> AddAssign<&AffinePoint<C>> for ProjectivePoint<C> {
    fn add_assign(&mut self, rhs: &AffinePoint<C>) {
        *self = ProjectivePoint::add_mixed(self, rhs);
    }
}

impl<C: PrimeCurveParams> Sub<ProjectivePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn sub(self, other: ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub(&self, &other)
    }
}

impl<C: PrimeCurveParams> Sub<&ProjectivePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn sub(self, other: &ProjectivePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub(&self, other)
    }
}

impl<C: PrimeCurveParams> SubAssign<ProjectivePoint<C>> for ProjectivePoint<C> {
    fn sub_assign(&mut self, rhs: ProjectivePoint<C>) {
        *self = ProjectivePoint::sub(self, &rhs);
    }
}

impl<C: PrimeCurveParams> Sub<&AffinePoint<C>> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn sub(self, other: &AffinePoint<C>) -> ProjectivePoint<C> {
        ProjectivePoint::sub_mixed(&self, other)
    }
}

impl<C: PrimeCurveParams> Mul<&C::Scalar> for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn mul(self, k: &C::Scalar) -> ProjectivePoint<C> {
        ProjectivePoint::mul(&self, k)
    }
}

impl<C: PrimeCurveParams> MulAssign<&C::Scalar> for ProjectivePoint<C> {
    fn mul_assign(&mut self, k: &C::Scalar) {
        *self = ProjectivePoint::mul(self, k);
    }
}

impl<C: PrimeCurveParams> Neg for ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint::neg(&self)
    }
}

impl<C: PrimeCurveParams> Neg for &ProjectivePoint<C> {
    type Output = ProjectivePoint<C>;

    fn neg(self) -> ProjectivePoint<C> {
        ProjectivePoint::neg(self)
    }
}
