//! edwards25519 field and scalar arithmetic.
//!
//! The twisted Edwards curve `-x² + y² = 1 + d x² y²` over
//! `p = 2^255 - 19`, with the prime-order subgroup of cofactor 8 used by
//! Ed25519 (RFC 8032). Encodings are little-endian throughout, unlike the
//! SEC1 curves.

use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

impl_mont_field_element!(
    name: FieldElement,
    limbs: 4,
    num_bytes: 32,
    byte_order: le,
    modulus: [
        0xffffffffffffffed, 0xffffffffffffffff,
        0xffffffffffffffff, 0x7fffffffffffffff,
    ],
    n0: 0x86bca1af286bca1b,
    r1: [
        0x0000000000000026, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ],
    r2: [
        0x00000000000005a4, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ],
    doc: "Element in the finite field modulo p = 2^255 − 19.",
);

impl FieldElement {
    /// `(p - 5) / 8`, the exponent of the combined square-root/inversion
    /// chain; p ≡ 5 (mod 8).
    const SQRT_RATIO_EXP: [u64; 4] = [
        0xfffffffffffffffd, 0xffffffffffffffff,
        0xffffffffffffffff, 0x0fffffffffffffff,
    ];

    /// `sqrt(-1)`, the correction factor for the Atkin-style chain.
    pub(crate) const SQRT_M1: Self = Self::from_montgomery([
        0x3b5807d4fe2bdb04, 0x03f590fdb51be9ed,
        0x6d6e16bf336202d1, 0x75776b0bd6c71ba8,
    ]);

    /// The curve constant `d = -121665/121666`.
    pub(crate) const EDWARDS_D: Self = Self::from_montgomery([
        0x80ed8bfedf47e9fa, 0x10a18777afc62973,
        0xe5939207bc188690, 0x2c822b5a729fc526,
    ]);

    /// `2 * d`, folded into the unified addition formulas.
    pub(crate) const EDWARDS_D2: Self = Self::from_montgomery([
        0x01db17fdbe8fd3f4, 0x21430eef5f8c52e7,
        0xcb27240f78310d20, 0x590456b4e53f8a4d,
    ]);

    /// Computes `sqrt(u / v)` without a separate inversion, via the chain
    /// `u v^3 (u v^7)^((p-5)/8)` with a `sqrt(-1)` correction.
    ///
    /// Returns whether `u / v` was square, along with the (even or odd)
    /// root; point decompression fixes the sign afterwards.
    pub fn sqrt_ratio(u: &Self, v: &Self) -> (Choice, Self) {
        let v3 = v.square() * *v;
        let v7 = v3.square() * *v;
        let r = (*u * v3) * (*u * v7).pow_vartime(&Self::SQRT_RATIO_EXP);
        let check = *v * r.square();

        let correct = check.ct_eq(u);
        let flipped = check.ct_eq(&-*u);
        let r = Self::conditional_select(&r, &(r * Self::SQRT_M1), flipped);

        (correct | flipped, r)
    }

    /// Returns a square root of self mod p, or `None` for non-residues.
    pub fn sqrt(&self) -> CtOption<Self> {
        let (is_square, root) = Self::sqrt_ratio(self, &Self::ONE);
        CtOption::new(root, is_square)
    }
}

impl crate::arithmetic::Sqrt for FieldElement {
    fn sqrt(&self) -> CtOption<Self> {
        Self::sqrt(self)
    }
}

impl_mont_scalar!(
    name: Scalar,
    limbs: 4,
    num_bytes: 32,
    num_bits: 253,
    byte_order: le,
    modulus: [
        0x5812631a5cf5d3ed, 0x14def9dea2f79cd6,
        0x0000000000000000, 0x1000000000000000,
    ],
    n0: 0xd2b51da312547e1b,
    r1: [
        0xd6ec31748d98951d, 0xc6ef5bf4737dcf70,
        0xfffffffffffffffe, 0x0fffffffffffffff,
    ],
    r2: [
        0xa40611e3449c0f01, 0xd00e1ba768859347,
        0xceec73d217f5be65, 0x0399411b7c309a3d,
    ],
    half_modulus: [
        0x2c09318d2e7ae9f6, 0x0a6f7cef517bce6b,
        0x0000000000000000, 0x0800000000000000,
    ],
    doc: "Element in the scalar field modulo the prime subgroup order l = 2^252 + 27742317777372353535851937790883648493.",
);

/// Base point x-coordinate, Montgomery form.
pub(crate) const GENERATOR_X: FieldElement = FieldElement::from_montgomery([
    0xe2cabc553f9da287, 0x9ca598562396e489,
    0x9879936bade4b5b7, 0x759e23707e6077d0,
]);

/// Base point y-coordinate (`4/5`), Montgomery form.
pub(crate) const GENERATOR_Y: FieldElement = FieldElement::from_montgomery([
    0x333333333333334a, 0x3333333333333333,
    0x3333333333333333, 0x3333333333333333,
]);

/// Base point `t = x * y`, Montgomery form.
pub(crate) const GENERATOR_T: FieldElement = FieldElement::from_montgomery([
    0x4f0896aa994ae86c, 0xe3b7ad11b612506e,
    0x46c7a922f183c492, 0x5e181c59feb3930d,
]);

#[cfg(test)]
mod tests {
    use super::{FieldElement, Scalar, GENERATOR_T, GENERATOR_X, GENERATOR_Y};
    use hex_literal::hex;

    #[test]
    fn field_le_roundtrip() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(FieldElement::from_bytes(&one).unwrap(), FieldElement::ONE);

        // p itself must be rejected
        let p = hex!("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(bool::from(FieldElement::from_bytes(&p).is_none()));
    }

    #[test]
    fn sqrt_m1_squares_to_minus_one() {
        assert_eq!(FieldElement::SQRT_M1.square(), -FieldElement::ONE);
    }

    #[test]
    fn sqrt_ratio_on_squares() {
        let u = FieldElement::ONE.double().double().double(); // 8
        let v = FieldElement::ONE.double(); // 2
        let (is_square, r) = FieldElement::sqrt_ratio(&u, &v);
        assert!(bool::from(is_square));
        assert_eq!(r.square() * v, u);

        // 2 is a non-residue mod 2^255 - 19
        let (is_square, _) = FieldElement::sqrt_ratio(&v, &FieldElement::ONE);
        assert!(!bool::from(is_square));
    }

    #[test]
    fn generator_t_is_xy() {
        assert_eq!(GENERATOR_X * GENERATOR_Y, GENERATOR_T);
    }

    #[test]
    fn scalar_wide_reduce_matches_rfc8032_vector() {
        // The clamped secret scalar has its top bit pattern enforced.
        let clamped = hex!("f8ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        let s = Scalar::reduce_bytes(&clamped);
        let mut out = [0u8; 32];
        s.to_bytes(&mut out);
        // value is (2^255 - 8) mod l, which is far below 2^253
        assert!(out[31] < 0x20);
    }
}
