//! NIST P-521 elliptic curve.
//!
//! Specified in NIST SP 800-186 over the Mersenne prime `p = 2^521 - 1`;
//! field elements occupy 66 bytes with seven leading zero bits.

use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use crate::arithmetic::Sqrt;
use crate::weierstrass::{self, PrimeCurveParams};
use subtle::{ConstantTimeEq, CtOption};

/// NIST P-521 elliptic curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP521;

/// P-521 SEC1-encoded point, affine form.
pub type AffinePoint = weierstrass::AffinePoint<NistP521>;

/// P-521 point in Jacobian coordinates.
pub type ProjectivePoint = weierstrass::ProjectivePoint<NistP521>;

/// P-521 precomputed multiplication context.
pub type Context = weierstrass::Context<NistP521>;

impl_mont_field_element!(
    name: FieldElement,
    limbs: 9,
    num_bytes: 66,
    byte_order: be,
    modulus: [
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000001ff,
    ],
    n0: 0x0000000000000001,
    r1: [
        0x0080000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    r2: [
        0x0000000000000000, 0x0000400000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    doc: "Element in the finite field modulo the Mersenne prime p = 2^521 − 1.",
);

impl FieldElement {
    /// `(p + 1) / 4 = 2^519`; p ≡ 3 (mod 4).
    const SQRT_EXP: [u64; 9] = [
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000080,
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
    limbs: 9,
    num_bytes: 66,
    num_bits: 521,
    byte_order: be,
    modulus: [
        0xbb6fb71e91386409, 0x3bb5c9b8899c47ae,
        0x7fcc0148f709a5d0, 0x51868783bf2f966b,
        0xfffffffffffffffa, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000001ff,
    ],
    n0: 0x1d2f5ccd79a995c7,
    r1: [
        0xfb80000000000000, 0x28a2482470b763cd,
        0x17e2251b23bb31dc, 0xca4019ff5b847b2d,
        0x02d73cbc3e206834, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
        0x0000000000000000,
    ],
    r2: [
        0x137cd04dcf15dd04, 0xf707badce5547ea3,
        0x12a78d38794573ff, 0xd3721ef557f75e06,
        0xdd6e23d82e49c7db, 0xcff3d142b7756e3e,
        0x5bcc6d61a8e567bc, 0x2d8e03d1492d0d45,
        0x000000000000003d,
    ],
    half_modulus: [
        0x5db7db8f489c3204, 0x1ddae4dc44ce23d7,
        0xbfe600a47b84d2e8, 0x28c343c1df97cb35,
        0xfffffffffffffffd, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000000ff,
    ],
    doc: "Element in the scalar field modulo the P-521 group order n.",
);

impl PrimeCurveParams for NistP521 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;

    const NAME: &'static str = "P521";

    /// a = -3
    const EQUATION_A: FieldElement = FieldElement::from_montgomery([
        0xfe7fffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000001ff,
    ]);

    const EQUATION_B: FieldElement = FieldElement::from_montgomery([
        0x8014654fae586387, 0x78f7a28fea35a81f,
        0x839ab9efc41e961a, 0xbd8b29605e9dd8df,
        0xf0ab0c9ca8f63f49, 0xf9dc5a44c8c77884,
        0x77516d392dccd98a, 0x0fc94d10d05b42a0,
        0x000000000000004d,
    ]);

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_montgomery([
            0xb331a16381adc101, 0x4dfcbf3f18e172de,
            0x6f19a459e0c2b521, 0x947f0ee093d17fd4,
            0xdd50a5af3bf7f3ac, 0x90fc1457b035a69e,
            0x214e32409c829fda, 0xe6cf1f65b311cada,
            0x0000000000000074,
        ]),
        FieldElement::from_montgomery([
            0x28460e4a5a9e268e, 0x20445f4a3b4fe8b3,
            0xb09a9e3843513961, 0x2062a85c809fd683,
            0x164bf7394caf7a13, 0x340bd7de8b939f33,
            0xeccc7aa224abcda2, 0x022e452fda163e8d,
            0x00000000000001e0,
        ]),
    );

    const ORDER_IN_FIELD: FieldElement = FieldElement::from_montgomery([
        0x04ffffffffffffff, 0xd75db7db8f489c32,
        0xe81ddae4dc44ce23, 0x35bfe600a47b84d2,
        0xfd28c343c1df97cb, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
        0x00000000000001ff,
    ]);

    const MODULUS_MINUS_ORDER: &'static [u8] = &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0xae, 0x79, 0x78, 0x7c, 0x40, 0xd0, 0x69, 0x94,
        0x80, 0x33, 0xfe, 0xb7, 0x08, 0xf6, 0x5a, 0x2f, 0xc4, 0x4a, 0x36, 0x47, 0x76, 0x63,
        0xb8, 0x51, 0x44, 0x90, 0x48, 0xe1, 0x6e, 0xc7, 0x9b, 0xf6,
    ];
}

impl crate::ecdsa::EcdsaCurve for NistP521 {
    type Digest = sha2::Sha512;
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, FieldElement, ProjectivePoint};
    use hex_literal::hex;
    use subtle::ConstantTimeEq;

    const G2_COMPRESSED: [u8; 67] = hex!(
        "0200433c219024277e7e682fcb288148c282747403279b1ccc06352c6e5505d769"
        "be97b3b204da6ef55507aa104a3a35c5af41cf2fa364d60fd967f43e3933ba6d78"
        "3d"
    );
    const G3_COMPRESSED: [u8; 67] = hex!(
        "0301a73d352443de29195dd91d6a64b5959479b52a6e5b123d9ab9e5ad7a112d7a"
        "8dd1ad3f164a3a4832051da6bd16b59fe21baeb490862c32ea05a5919d2ede37ad"
        "7d"
    );

    #[test]
    fn field_bytes_are_66_wide() {
        let mut out = [0u8; 66];
        FieldElement::ONE.to_bytes(&mut out);
        assert_eq!(out[65], 1);
        assert_eq!(&out[..65], &[0u8; 65][..]);
    }

    #[test]
    fn field_sqrt() {
        let two = FieldElement::ONE.double();
        let four = two.square();
        let sqrt = four.sqrt().unwrap();
        assert!(sqrt == two || sqrt == -two);
    }

    #[test]
    fn generator_double_and_add() {
        let g = ProjectivePoint::GENERATOR;
        let g2 = AffinePoint::from_bytes(&G2_COMPRESSED).unwrap();
        let g3 = AffinePoint::from_bytes(&G3_COMPRESSED).unwrap();

        let d = g.double();
        assert_eq!(d.to_affine(), g2);
        assert_eq!(d.add_mixed(&g3).to_affine(), g.double().add(&g).add(&d).to_affine());
        assert_eq!(d.add(&g), ProjectivePoint::from(g3));
        assert!(bool::from(d.ct_eq(&ProjectivePoint::from(g2))));

        let mut buf = [0u8; 67];
        assert_eq!(d.to_affine().to_bytes(&mut buf, true).unwrap(), 67);
        assert_eq!(buf, G2_COMPRESSED);
    }
}
