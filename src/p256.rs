//! NIST P-256 elliptic curve.
//!
//! This curve is also known as prime256v1 (ANSI X9.62) and secp256r1 (SECG)
//! and is specified in NIST SP 800-186. Its equation is `y² = x³ - 3x + b`
//! over a ~256-bit prime field.

use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use crate::arithmetic::Sqrt;
use crate::weierstrass::{self, PrimeCurveParams};
use subtle::{ConstantTimeEq, CtOption};

/// NIST P-256 elliptic curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct NistP256;

/// P-256 SEC1-encoded point, affine form.
pub type AffinePoint = weierstrass::AffinePoint<NistP256>;

/// P-256 point in Jacobian coordinates.
pub type ProjectivePoint = weierstrass::ProjectivePoint<NistP256>;

/// P-256 precomputed multiplication context.
pub type Context = weierstrass::Context<NistP256>;

impl_mont_field_element!(
    name: FieldElement,
    limbs: 4,
    num_bytes: 32,
    byte_order: be,
    modulus: [
        0xffffffffffffffff, 0x00000000ffffffff,
        0x0000000000000000, 0xffffffff00000001,
    ],
    n0: 0x0000000000000001,
    r1: [
        0x0000000000000001, 0xffffffff00000000,
        0xffffffffffffffff, 0x00000000fffffffe,
    ],
    r2: [
        0x0000000000000003, 0xfffffffbffffffff,
        0xfffffffffffffffe, 0x00000004fffffffd,
    ],
    doc: "Element in the finite field modulo p = 2^{224}(2^{32} − 1) + 2^{192} + 2^{96} − 1.",
);

impl FieldElement {
    /// `(p + 1) / 4`; p ≡ 3 (mod 4), so a single exponentiation computes
    /// the square root candidate.
    const SQRT_EXP: [u64; 4] = [
        0x0000000000000000, 0x0000000040000000,
        0x4000000000000000, 0x3fffffffc0000000,
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
    limbs: 4,
    num_bytes: 32,
    num_bits: 256,
    byte_order: be,
    modulus: [
        0xf3b9cac2fc632551, 0xbce6faada7179e84,
        0xffffffffffffffff, 0xffffffff00000000,
    ],
    n0: 0xccd1c8aaee00bc4f,
    r1: [
        0x0c46353d039cdaaf, 0x4319055258e8617b,
        0x0000000000000000, 0x00000000ffffffff,
    ],
    r2: [
        0x83244c95be79eea2, 0x4699799c49bd6fa6,
        0x2845b2392b6bec59, 0x66e12d94f3d95620,
    ],
    half_modulus: [
        0x79dce5617e3192a8, 0xde737d56d38bcf42,
        0x7fffffffffffffff, 0x7fffffff80000000,
    ],
    doc: "Element in the scalar field modulo the P-256 group order n.",
);

impl PrimeCurveParams for NistP256 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;

    const NAME: &'static str = "P256";

    /// a = -3
    const EQUATION_A: FieldElement = FieldElement::from_montgomery([
        0xfffffffffffffffc, 0x00000003ffffffff,
        0x0000000000000000, 0xfffffffc00000004,
    ]);

    const EQUATION_B: FieldElement = FieldElement::from_montgomery([
        0xd89cdf6229c4bddf, 0xacf005cd78843090,
        0xe5a220abf7212ed6, 0xdc30061d04874834,
    ]);

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_montgomery([
            0x79e730d418a9143c, 0x75ba95fc5fedb601,
            0x79fb732b77622510, 0x18905f76a53755c6,
        ]),
        FieldElement::from_montgomery([
            0xddf25357ce95560a, 0x8b4ab8e4ba19e45c,
            0xd2e88688dd21f325, 0x8571ff1825885d85,
        ]),
    );

    const ORDER_IN_FIELD: FieldElement = FieldElement::from_montgomery([
        0x9ad169483335f568, 0x89b1054463fe9931,
        0x9c0166ce652e96b7, 0x98648c200fe30feb,
    ]);

    const MODULUS_MINUS_ORDER: &'static [u8] = &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x43, 0x19, 0x05, 0x53, 0x58, 0xe8, 0x61, 0x7b, 0x0c, 0x46, 0x35, 0x3d,
        0x03, 0x9c, 0xda, 0xae,
    ];
}

impl crate::ecdsa::EcdsaCurve for NistP256 {
    type Digest = sha2::Sha256;
}
