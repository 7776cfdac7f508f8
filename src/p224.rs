//! NIST P-224 elliptic curve.
//!
//! Also known as secp224r1 (SECG); specified in NIST SP 800-186. The field
//! prime `p = 2^224 - 2^96 + 1` is 1 mod 4, so square roots go through a
//! constant-time Tonelli-Shanks loop over its 2-adicity of 96 rather than a
//! single exponentiation.

use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use crate::arithmetic::Sqrt;
use crate::weierstrass::{self, PrimeCurveParams};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// NIST P-224 elliptic curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP224;

/// P-224 SEC1-encoded point, affine form.
pub type AffinePoint = weierstrass::AffinePoint<NistP224>;

/// P-224 point in Jacobian coordinates.
pub type ProjectivePoint = weierstrass::ProjectivePoint<NistP224>;

/// P-224 precomputed multiplication context.
pub type Context = weierstrass::Context<NistP224>;

impl_mont_field_element!(
    name: FieldElement,
    limbs: 4,
    num_bytes: 28,
    byte_order: be,
    modulus: [
        0x0000000000000001, 0xffffffff00000000,
        0xffffffffffffffff, 0x00000000ffffffff,
    ],
    n0: 0xffffffffffffffff,
    r1: [
        0xffffffff00000000, 0xffffffffffffffff,
        0x0000000000000000, 0x0000000000000000,
    ],
    r2: [
        0xffffffff00000001, 0xffffffff00000000,
        0xfffffffe00000000, 0x00000000ffffffff,
    ],
    doc: "Element in the finite field modulo p = 2^224 − 2^96 + 1.",
);

impl FieldElement {
    /// 2-adicity of `p - 1`.
    const S: u32 = 96;

    /// `(t - 1) / 2` where `p - 1 = t * 2^96` with `t` odd.
    const TS_EXP: [u64; 4] = [
        0xffffffffffffffff, 0x7fffffffffffffff,
        0x0000000000000000, 0x0000000000000000,
    ];

    /// `g^t` for the non-residue `g = 11`, a primitive 2^96-th root of
    /// unity.
    const ROOT_OF_UNITY: Self = Self::from_montgomery([
        0x174131b85ee27c6c, 0x7869be5d866c223b,
        0x6d3e2af0dd915e4b, 0x00000000a31b1da4,
    ]);

    /// Returns the square root of self mod p, or `None` if no square root
    /// exists.
    ///
    /// Constant-time Tonelli-Shanks for q mod 16 = 1
    /// (<https://eprint.iacr.org/2012/685.pdf>, page 12, algorithm 5).
    pub fn sqrt(&self) -> CtOption<Self> {
        let w = self.pow_vartime(&Self::TS_EXP);

        let mut v = Self::S;
        let mut x = *self * w;
        let mut b = x * w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b = b * z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }
}

impl Sqrt for FieldElement {
    fn sqrt(&self) -> CtOption<Self> {
        Self::sqrt(self)
    }
}

impl_mont_scalar!(
    name: Scalar,
    limbs: 4,
    num_bytes: 28,
    num_bits: 224,
    byte_order: be,
    modulus: [
        0x13dd29455c5c2a3d, 0xffff16a2e0b8f03e,
        0xffffffffffffffff, 0x00000000ffffffff,
    ],
    n0: 0xd6e242706a1fc2eb,
    r1: [
        0xa3a3d5c300000000, 0x1f470fc1ec22d6ba,
        0x000000000000e95d, 0x0000000000000000,
    ],
    r2: [
        0x29947a695f517d15, 0xabc8ff5931d63f4b,
        0x6ad15f7cd9714856, 0x00000000b1e97961,
    ],
    half_modulus: [
        0x09ee94a2ae2e151e, 0xffff8b51705c781f,
        0xffffffffffffffff, 0x000000007fffffff,
    ],
    doc: "Element in the scalar field modulo the P-224 group order n.",
);

impl PrimeCurveParams for NistP224 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;

    const NAME: &'static str = "P224";

    /// a = -3
    const EQUATION_A: FieldElement = FieldElement::from_montgomery([
        0x0000000300000001, 0xffffffff00000000,
        0xfffffffffffffffc, 0x00000000ffffffff,
    ]);

    const EQUATION_B: FieldElement = FieldElement::from_montgomery([
        0xe768cdf663c059cd, 0x107ac2f3ccf01310,
        0x3dceba98c8528151, 0x000000007fc02f93,
    ]);

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_montgomery([
            0xbc9052266d0a4aea, 0x852597366018bfaa,
            0x6dd3af9bf96bec05, 0x00000000a21b5e60,
        ]),
        FieldElement::from_montgomery([
            0x2edca1e5eff3ede8, 0xf8cd672b05335a6b,
            0xaea9c5ae03dfe878, 0x00000000614786f1,
        ]),
    );

    const ORDER_IN_FIELD: FieldElement = FieldElement::from_montgomery([
        0xa3a3d5c40000e95d, 0x1f462664ec22d6ba,
        0x13dd29455c5d1398, 0x00000000e0b8f03e,
    ]);

    const MODULUS_MINUS_ORDER: &'static [u8] = &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0xe9, 0x5c, 0x1f, 0x47, 0x0f, 0xc1, 0xec, 0x22, 0xd6, 0xba, 0xa3, 0xa3, 0xd5, 0xc4,
    ];
}

impl crate::ecdsa::EcdsaCurve for NistP224 {
    type Digest = sha2::Sha256;
}
