//! Affine curve points and their SEC1 encodings.

use crate::arithmetic::{PrimeField, Sqrt};
use crate::error::{Error, Result};
use crate::weierstrass::PrimeCurveParams;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// SEC1 tag for a compressed point with even y.
const TAG_COMPRESSED_EVEN: u8 = 0x02;
/// SEC1 tag for a compressed point with odd y.
const TAG_COMPRESSED_ODD: u8 = 0x03;
/// SEC1 tag for an uncompressed point.
const TAG_UNCOMPRESSED: u8 = 0x04;
/// SEC1 tag for a hybrid point with even y.
const TAG_HYBRID_EVEN: u8 = 0x06;
/// SEC1 tag for a hybrid point with odd y.
const TAG_HYBRID_ODD: u8 = 0x07;

/// Point on a short-Weierstrass curve in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint<C: PrimeCurveParams> {
    /// x-coordinate.
    pub(crate) x: C::FieldElement,

    /// y-coordinate.
    pub(crate) y: C::FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes.
    ///
    /// Stored as `u8` rather than `Choice` so `IDENTITY` and `GENERATOR` can
    /// be `const`.
    pub(crate) infinity: u8,
}

impl<C> AffinePoint<C>
where
    C: PrimeCurveParams,
{
    /// Additive identity of the group, a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: <C::FieldElement as PrimeField>::ZERO,
        y: <C::FieldElement as PrimeField>::ZERO,
        infinity: 1,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        infinity: 0,
    };

    /// Encoded length: one tag byte plus one or two coordinates.
    pub const fn encoded_len(compress: bool) -> usize {
        if compress {
            1 + <C::FieldElement as PrimeField>::NUM_BYTES
        } else {
            1 + 2 * <C::FieldElement as PrimeField>::NUM_BYTES
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }

    /// Checks the curve equation `y^2 = x^3 + ax + b`. The identity is a
    /// valid group element.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = (self.x.square() + C::EQUATION_A) * self.x + C::EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }

    /// Recovers the point with the given x-coordinate and y parity.
    pub fn decompress(x: &C::FieldElement, y_is_odd: Choice) -> CtOption<Self> {
        let alpha = (x.square() + C::EQUATION_A) * *x + C::EQUATION_B;
        alpha.sqrt().map(|beta| {
            let y = C::FieldElement::conditional_select(
                &-beta,
                &beta,
                beta.is_odd().ct_eq(&y_is_odd),
            );
            Self {
                x: *x,
                y,
                infinity: 0,
            }
        })
    }

    /// Parses a SEC1-encoded point: compressed (`02`/`03`), uncompressed
    /// (`04`), or hybrid (`06`/`07`).
    ///
    /// Identity encodings, malformed lengths, off-curve coordinates, and
    /// hybrid parity mismatches are all rejected. Point encodings are public
    /// data, so parsing is variable-time.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let fe_len = <C::FieldElement as PrimeField>::NUM_BYTES;
        if bytes.is_empty() {
            return Err(Error::InvalidPoint);
        }

        match bytes[0] {
            tag @ (TAG_COMPRESSED_EVEN | TAG_COMPRESSED_ODD) => {
                if bytes.len() != 1 + fe_len {
                    return Err(Error::InvalidPoint);
                }
                let x = Option::<C::FieldElement>::from(C::FieldElement::from_bytes(&bytes[1..]))
                    .ok_or(Error::InvalidPoint)?;
                let y_is_odd = Choice::from(tag & 1);
                Option::from(Self::decompress(&x, y_is_odd)).ok_or(Error::InvalidPoint)
            }
            tag @ (TAG_UNCOMPRESSED | TAG_HYBRID_EVEN | TAG_HYBRID_ODD) => {
                if bytes.len() != 1 + 2 * fe_len {
                    return Err(Error::InvalidPoint);
                }
                let x = Option::<C::FieldElement>::from(C::FieldElement::from_bytes(
                    &bytes[1..1 + fe_len],
                ))
                .ok_or(Error::InvalidPoint)?;
                let y = Option::<C::FieldElement>::from(C::FieldElement::from_bytes(
                    &bytes[1 + fe_len..],
                ))
                .ok_or(Error::InvalidPoint)?;

                if tag != TAG_UNCOMPRESSED && bool::from(y.is_odd() ^ Choice::from(tag & 1)) {
                    return Err(Error::InvalidPoint);
                }

                let point = Self { x, y, infinity: 0 };
                if bool::from(point.is_on_curve()) {
                    Ok(point)
                } else {
                    Err(Error::InvalidPoint)
                }
            }
            _ => Err(Error::InvalidPoint),
        }
    }

    /// Writes the SEC1 encoding into `out` and returns the number of bytes
    /// written. The identity has no SEC1 encoding and is rejected.
    pub fn to_bytes(&self, out: &mut [u8], compress: bool) -> Result<usize> {
        if bool::from(self.is_identity()) {
            return Err(Error::InvalidPoint);
        }
        let fe_len = <C::FieldElement as PrimeField>::NUM_BYTES;
        let len = Self::encoded_len(compress);
        if out.len() < len {
            return Err(Error::InvalidPoint);
        }

        if compress {
            out[0] = TAG_COMPRESSED_EVEN | self.y.is_odd().unwrap_u8();
            self.x.to_bytes(&mut out[1..1 + fe_len]);
        } else {
            out[0] = TAG_UNCOMPRESSED;
            self.x.to_bytes(&mut out[1..1 + fe_len]);
            self.y.to_bytes(&mut out[1 + fe_len..len]);
        }
        Ok(len)
    }
}

impl<C> ConditionallySelectable for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: C::FieldElement::conditional_select(&a.x, &b.x, choice),
            y: C::FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl<C> ConstantTimeEq for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl<C> Default for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> PartialEq for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<C> Eq for AffinePoint<C> where C: PrimeCurveParams {}

impl<C> core::ops::Neg for AffinePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = Self;

    fn neg(self) -> Self {
        AffinePoint::neg(&self)
    }
}

impl<C> core::ops::Neg for &AffinePoint<C>
where
    C: PrimeCurveParams,
{
    type Output = AffinePoint<C>;

    fn neg(self) -> AffinePoint<C> {
        AffinePoint::neg(self)
    }
}
