//! NIST P-384 elliptic curve.
//!
//! Also known as secp384r1 (SECG); specified in NIST SP 800-186. Its
//! equation is `y² = x³ - 3x + b` over a ~384-bit prime field.

use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use crate::arithmetic::Sqrt;
use crate::weierstrass::{self, PrimeCurveParams};
use subtle::{ConstantTimeEq, CtOption};

/// NIST P-384 elliptic curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP384;

/// P-384 SEC1-encoded point, affine form.
pub type AffinePoint = weierstrass::AffinePoint<NistP384>;

/// P-384 point in Jacobian coordinates.
pub type ProjectivePoint = weierstrass::ProjectivePoint<NistP384>;

/// P-384 precomputed multiplication context.
pub type Context = weierstrass::Context<NistP384>;

impl_mont_field_element!(
    name: FieldElement,
    limbs: 6,
    num_bytes: 48,
    byte_order: be,
    modulus: [
        0x00000000ffffffff, 0xffffffff00000000,
        0xfffffffffffffffe, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
    ],
    n0: 0x0000000100000001,
    r1: [
        0xffffffff00000001, 0x00000000ffffffff,
        0x0000000000000001, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ],
    r2: [
        0xfffffffe00000001, 0x0000000200000000,
        0xfffffffe00000000, 0x0000000200000000,
        0x0000000000000001, 0x0000000000000000,
    ],
    doc: "Element in the finite field modulo p = 2^384 − 2^128 − 2^96 + 2^32 − 1.",
);

impl FieldElement {
    /// `(p + 1) / 4`; p ≡ 3 (mod 4).
    const SQRT_EXP: [u64; 6] = [
        0x0000000040000000, 0xbfffffffc0000000,
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0x3fffffffffffffff,
    ];

    /// Returns the square root of self mod p, or `None` if no square root
    /// exists.
    pub fn sqrt(&self) -> CtOption<Self> {
        let sqrt = self.pow_vartime(&Self::SQRT_EXP);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }
}

impl Sqrt for FieldElement {
    fn sqrt(&self) -> CtOption<Self> {
        Self::sqrt(self)
    }
}

impl_mont_scalar!(
    name: Scalar,
    limbs: 6,
    num_bytes: 48,
    num_bits: 384,
    byte_order: be,
    modulus: [
        0xecec196accc52973, 0x581a0db248b0a77a,
        0xc7634d81f4372ddf, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
    ],
    n0: 0x6ed46089e88fdc45,
    r1: [
        0x1313e695333ad68d, 0xa7e5f24db74f5885,
        0x389cb27e0bc8d220, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ],
    r2: [
        0x2d319b2419b409a9, 0xff3d81e5df1aa419,
        0xbc3e483afcb82947, 0xd40d49174aab1cc5,
        0x3fb05b7a28266895, 0x0c84ee012b39bf21,
    ],
    half_modulus: [
        0x76760cb5666294b9, 0xac0d06d9245853bd,
        0xe3b1a6c0fa1b96ef, 0xffffffffffffffff,
        0xffffffffffffffff, 0x7fffffffffffffff,
    ],
    doc: "Element in the scalar field modulo the P-384 group order n.",
);

impl PrimeCurveParams for NistP384 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;

    const NAME: &'static str = "P384";

    /// a = -3
    const EQUATION_A: FieldElement = FieldElement::from_montgomery([
        0x00000003fffffffc, 0xfffffffc00000000,
        0xfffffffffffffffb, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
    ]);

    const EQUATION_B: FieldElement = FieldElement::from_montgomery([
        0x081188719d412dcc, 0xf729add87a4c32ec,
        0x77f2209b1920022e, 0xe3374bee94938ae2,
        0xb62b21f41f022094, 0xcd08114b604fbff9,
    ]);

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_montgomery([
            0x3dd0756649c0b528, 0x20e378e2a0d6ce38,
            0x879c3afc541b4d6e, 0x6454868459a30eff,
            0x812ff723614ede2b, 0x4d3aadc2299e1513,
        ]),
        FieldElement::from_montgomery([
            0x23043dad4b03a4fe, 0xa1bfa8bf7bb4a9ac,
            0x8bade7562e83b050, 0xc6c3521968f4ffd9,
            0xdd8002263969a840, 0x2b78abc25a15c5e9,
        ]),
    );

    const ORDER_IN_FIELD: FieldElement = FieldElement::from_montgomery([
        0x2026eff6ccc52973, 0xdc2e8fab5bc48e11,
        0x08c8e08655ce6309, 0x4c513b93d96767ac,
        0xc7634d81bb9a7b62, 0xffffffffffffffff,
    ]);

    const MODULUS_MINUS_ORDER: &'static [u8] = &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x38, 0x9c, 0xb2, 0x7e,
        0x0b, 0xc8, 0xd2, 0x1f, 0xa7, 0xe5, 0xf2, 0x4c, 0xb7, 0x4f, 0x58, 0x85, 0x13, 0x13,
        0xe6, 0x96, 0x33, 0x3a, 0xd6, 0x8c,
    ];
}

impl crate::ecdsa::EcdsaCurve for NistP384 {
    type Digest = sha2::Sha384;
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, FieldElement, ProjectivePoint, Scalar};
    use hex_literal::hex;

    #[test]
    fn field_invert_and_sqrt() {
        let three = FieldElement::ONE.double() + FieldElement::ONE;
        assert_eq!(three.invert().unwrap() * three, FieldElement::ONE);

        let nine = three.square();
        let sqrt = nine.sqrt().unwrap();
        assert!(sqrt == three || sqrt == -three);
    }

    #[test]
    fn scalar_boundaries() {
        let n = hex!(
            "ffffffffffffffffffffffffffffffffffffffffffffffffc7634d81f4372ddf"
            "581a0db248b0a77aecec196accc52973"
        );
        assert!(bool::from(Scalar::from_bytes(&n).is_none()));
        let mut n_minus_1 = n;
        n_minus_1[47] -= 1;
        assert_eq!(Scalar::from_bytes(&n_minus_1).unwrap(), -Scalar::ONE);
    }

    #[test]
    fn generator_is_on_curve() {
        let g = AffinePoint::GENERATOR;
        assert!(bool::from(g.is_on_curve()));

        let g2 = ProjectivePoint::GENERATOR.double();
        assert!(bool::from(g2.is_on_curve()));
        assert_eq!(g2.add(&ProjectivePoint::GENERATOR.neg()), ProjectivePoint::GENERATOR);
    }

    #[test]
    fn generator_roundtrip() {
        let mut buf = [0u8; 49];
        let g = AffinePoint::GENERATOR;
        g.to_bytes(&mut buf, true).unwrap();
        assert_eq!(AffinePoint::from_bytes(&buf).unwrap(), g);
    }
}
