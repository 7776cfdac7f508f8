//! secp256k1 elliptic curve.
//!
//! The Koblitz curve `y² = x³ + 7` (SECG SEC2), best known from Bitcoin and
//! Ethereum. It carries an efficiently computable endomorphism
//! `lambda * (x, y) = (beta * x, y)`, which variable-time multiplication
//! exploits by splitting scalars into two half-width components
//! ("GLV decomposition"). The decomposition constants follow
//! "An Alternate Decomposition of an Integer for Faster Point Multiplication
//! on Certain Elliptic Curves" (Park, Jeong, Kim, Lim), with the division
//! replaced by rounded multiplication by the 2^272-precision estimates
//! `g1`, `g2`.

use crate::arithmetic::limb;
use crate::arithmetic::macros::{impl_mont_field_element, impl_mont_scalar};
use crate::arithmetic::Sqrt;
use crate::weierstrass::{self, PrimeCurveParams};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// secp256k1 elliptic curve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Secp256k1;

/// secp256k1 SEC1-encoded point, affine form.
pub type AffinePoint = weierstrass::AffinePoint<Secp256k1>;

/// secp256k1 point in Jacobian coordinates.
pub type ProjectivePoint = weierstrass::ProjectivePoint<Secp256k1>;

/// secp256k1 precomputed multiplication context.
pub type Context = weierstrass::Context<Secp256k1>;

impl_mont_field_element!(
    name: FieldElement,
    limbs: 4,
    num_bytes: 32,
    byte_order: be,
    modulus: [
        0xfffffffefffffc2f, 0xffffffffffffffff,
        0xffffffffffffffff, 0xffffffffffffffff,
    ],
    n0: 0xd838091dd2253531,
    r1: [
        0x00000001000003d1, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ],
    r2: [
        0x000007a2000e90a1, 0x0000000000000001,
        0x0000000000000000, 0x0000000000000000,
    ],
    doc: "Element in the finite field modulo p = 2^256 − 2^32 − 977.",
);

impl FieldElement {
    /// `(p + 1) / 4`; p ≡ 3 (mod 4).
    const SQRT_EXP: [u64; 4] = [
        0xffffffffbfffff0c, 0xffffffffffffffff,
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
    limbs: 4,
    num_bytes: 32,
    num_bits: 256,
    byte_order: be,
    modulus: [
        0xbfd25e8cd0364141, 0xbaaedce6af48a03b,
        0xfffffffffffffffe, 0xffffffffffffffff,
    ],
    n0: 0x4b0dff665588b13f,
    r1: [
        0x402da1732fc9bebf, 0x4551231950b75fc4,
        0x0000000000000001, 0x0000000000000000,
    ],
    r2: [
        0x896cf21467d7d140, 0x741496c20e7cf878,
        0xe697f5e45bcd07c6, 0x9d671cd581c69bc5,
    ],
    half_modulus: [
        0xdfe92f46681b20a0, 0x5d576e7357a4501d,
        0xffffffffffffffff, 0x7fffffffffffffff,
    ],
    doc: "Element in the scalar field modulo the secp256k1 group order n.",
);

/// `-lambda mod n`.
const MINUS_LAMBDA: Scalar = Scalar::from_montgomery([
    0xcf54734f06a3d4a3, 0x8e1af5392b820bee,
    0x8c5699f9ad96826d, 0xacd7bfe87aa729c6,
]);

/// `-b1 mod n`.
const MINUS_B1: Scalar = Scalar::from_montgomery([
    0xc50468d00ad9263c, 0x1b1c8205faa6ed42,
    0x1571b4ae8ac47f71, 0x221208ac9df506c6,
]);

/// `-b2 mod n`.
const MINUS_B2: Scalar = Scalar::from_montgomery([
    0x0cac5e506a144696, 0x1e8a8dc5f3ba5939,
    0x176cdf65ba244fce, 0xc25575eb8e173580,
]);

/// `round(2^272 * b2 / n)`, canonical limbs.
const G1: [u64; 4] = [
    0x90e49284eb153dab, 0xd221a7d46bcde86c,
    0x0000000000003086, 0x0000000000000000,
];

/// `round(2^272 * b1 / n)`, canonical limbs.
const G2: [u64; 4] = [
    0x7fa90abfe4c42212, 0x7ed6010e88286f54,
    0x000000000000e443, 0x0000000000000000,
];

impl Scalar {
    /// `floor(self * b / 2^shift)` rounded to nearest, on canonical values.
    ///
    /// Variable-time only in the (constant) shift amount; used by the GLV
    /// rounding step with `shift = 272`, so the result fits well below the
    /// group order.
    fn mul_shift_vartime(&self, b: &[u64; 4], shift: usize) -> Self {
        debug_assert!(shift >= 256);
        let a = self.to_canonical();
        let (lo, hi) = limb::mul_wide(&a, b);
        let full = [lo[0], lo[1], lo[2], lo[3], hi[0], hi[1], hi[2], hi[3]];

        let limb_off = shift / 64;
        let bit_off = (shift % 64) as u32;
        let mut shifted = [0u64; 4];
        for i in 0..4 {
            let lo_part = if limb_off + i < 8 {
                full[limb_off + i] >> bit_off
            } else {
                0
            };
            let hi_part = if bit_off > 0 && limb_off + i + 1 < 8 {
                full[limb_off + i + 1] << (64 - bit_off)
            } else {
                0
            };
            shifted[i] = lo_part | hi_part;
        }

        let round_bit = (full[(shift - 1) / 64] >> ((shift - 1) % 64)) & 1;
        let result = Self::from_canonical(shifted);
        Self::conditional_select(
            &result,
            &(result + Self::ONE),
            Choice::from(round_bit as u8),
        )
    }

    /// Finds `r1` and `r2` such that `r1 + r2 * lambda == self mod n`, with
    /// both components half-width after sign folding.
    pub(crate) fn decompose(&self) -> (Scalar, Scalar) {
        let c1 = self.mul_shift_vartime(&G1, 272);
        let c2 = self.mul_shift_vartime(&G2, 272);

        let c1 = c1 * MINUS_B1;
        let c2 = c2 * MINUS_B2;

        let r2 = c1 + c2;
        let r1 = *self + r2 * MINUS_LAMBDA;

        (r1, r2)
    }
}

impl PrimeCurveParams for Secp256k1 {
    type FieldElement = FieldElement;
    type Scalar = Scalar;

    const NAME: &'static str = "SECP256K1";

    /// a = 0
    const EQUATION_A: FieldElement = FieldElement::ZERO;

    /// b = 7
    const EQUATION_B: FieldElement = FieldElement::from_montgomery([
        0x0000000700001ab7, 0x0000000000000000,
        0x0000000000000000, 0x0000000000000000,
    ]);

    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_montgomery([
            0xd7362e5a487e2097, 0x231e295329bc66db,
            0x979f48c033fd129c, 0x9981e643e9089f48,
        ]),
        FieldElement::from_montgomery([
            0xb15ea6d2d3dbabe2, 0x8dfc5d5d1f1dc64d,
            0x70b6b59aac19c136, 0xcf3f851fd4a582d6,
        ]),
    );

    const ORDER_IN_FIELD: FieldElement = FieldElement::from_montgomery([
        0xe21120489f1d95e1, 0x24a1ac9eb3fde294,
        0xfffffffebaaed80d, 0xffffffffffffffff,
    ]);

    const MODULUS_MINUS_ORDER: &'static [u8] = &[
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x01, 0x45, 0x51, 0x23, 0x19, 0x50, 0xb7, 0x5f, 0xc4, 0x40, 0x2d, 0xa1, 0x72,
        0x2f, 0xc9, 0xba, 0xee,
    ];

    /// `lambda * (x, y) = (beta * x, y)`.
    const ENDOMORPHISM_BETA: Option<FieldElement> = Some(FieldElement::from_montgomery([
        0x58a4361c8e81894e, 0x03fde1631c4b80af,
        0xf8e98978d02e3905, 0x7a4a36aebcbb3d53,
    ]));

    fn decompose_scalar(k: &Scalar) -> Option<(Scalar, Scalar)> {
        Some(k.decompose())
    }
}

impl crate::ecdsa::EcdsaCurve for Secp256k1 {
    type Digest = sha2::Sha256;
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, Context, ProjectivePoint, Scalar, MINUS_LAMBDA};
    use hex_literal::hex;

    #[test]
    fn decompose_recombines() {
        let k = Scalar::reduce_bytes(&hex!(
            "6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296"
        ));
        let (r1, r2) = k.decompose();
        let lambda = -MINUS_LAMBDA;
        assert_eq!(r1 + r2 * lambda, k);

        // both components half-width after sign folding
        for r in [r1, r2] {
            let folded = if bool::from(r.is_high()) { -r } else { r };
            let mut bytes = [0u8; 32];
            folded.to_bytes(&mut bytes);
            assert_eq!(&bytes[..16], &[0u8; 16][..]);
        }
    }

    #[test]
    fn endomorphism_maps_generator() {
        let lambda = -MINUS_LAMBDA;
        let mapped = ProjectivePoint::GENERATOR.mul(&lambda).to_affine();

        let beta = super::Secp256k1::ENDOMORPHISM_BETA.unwrap();
        use crate::weierstrass::PrimeCurveParams;
        let g = AffinePoint::GENERATOR;
        let expected = AffinePoint {
            x: g.x * beta,
            y: g.y,
            infinity: 0,
        };
        assert_eq!(mapped, expected);
    }

    #[test]
    fn glv_lincomb_matches_naive() {
        let ctx = Context::new();
        let k1 = Scalar::reduce_bytes(b"first public scalar for the glv test....");
        let k2 = Scalar::reduce_bytes(b"second public scalar for the glv test...");
        let p = ProjectivePoint::GENERATOR.mul(&Scalar::from_u64(12345)).to_affine();

        let fast = ctx.lincomb_vartime(&k1, &p, &k2);
        let slow = ctx
            .mul_gen(&k1)
            .add(&ProjectivePoint::from(p).mul(&k2));
        assert_eq!(fast, slow);
    }

    #[test]
    fn low_s_boundary() {
        let half = Scalar::reduce_bytes(&hex!(
            "7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"
        ));
        assert!(!bool::from(half.is_high()));
        assert!(bool::from((half + Scalar::ONE).is_high()));
    }
}
