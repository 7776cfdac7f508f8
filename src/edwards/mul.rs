//! edwards25519 scalar multiplication.
//!
//! The same shapes as the Weierstrass engine: a radix-16 comb over the base
//! point for constant-time fixed-base multiplication (with the additive
//! blinding pair), a masked-window ladder for constant-time variable-base
//! multiplication, and width-5 wNAF for the variable-time double-base
//! computation inside verification. Table entries stay in extended
//! coordinates, where the unified addition needs no completeness selects.

use crate::arithmetic::scalar::{radix16, wnaf};
use crate::edwards::ExtendedPoint;
use crate::ed25519::{FieldElement, Scalar};
use crate::error::{Error, Result};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Radix-16 digit count for a 32-byte scalar.
const COMB_ROWS: usize = 65;

/// Upper bound on a width-5 NAF expansion of a 253-bit scalar.
const MAX_NAF_LEN: usize = 260;

/// Lookup table of the multiples `[p, 2p, ..., 8p]`.
#[derive(Clone, Copy)]
struct LookupTable([ExtendedPoint; 8]);

impl LookupTable {
    fn new(p: &ExtendedPoint) -> Self {
        let mut multiples = [*p; 8];
        for j in 0..7 {
            multiples[j + 1] = multiples[j].add(p);
        }
        Self(multiples)
    }

    /// Given `-8 <= x <= 8`, returns `x * p` in constant time.
    fn select(&self, x: i8) -> ExtendedPoint {
        debug_assert!((-8..=8).contains(&x));

        let xmask = x >> 7;
        let xabs = ((x + xmask) ^ xmask) as u8;

        let mut t = ExtendedPoint::IDENTITY;
        for j in 1u8..9 {
            let c = xabs.ct_eq(&j);
            t.conditional_assign(&self.0[(j - 1) as usize], c);
        }
        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_assign(&t.neg(), neg_mask);
        t
    }
}

impl Default for LookupTable {
    fn default() -> Self {
        Self([ExtendedPoint::IDENTITY; 8])
    }
}

/// Precomputed multiplication state: the fixed-base comb and the blinding
/// pair.
#[derive(Clone)]
pub struct Context {
    comb: [LookupTable; COMB_ROWS],
    blind: Scalar,
    unblind: ExtendedPoint,
}

impl Context {
    /// Builds the comb tables for the base point.
    pub fn new() -> Self {
        let mut comb = [LookupTable::default(); COMB_ROWS];
        let mut base = ExtendedPoint::GENERATOR;
        for row in comb.iter_mut() {
            *row = LookupTable::new(&base);
            for _ in 0..4 {
                base = base.double();
            }
        }

        Self {
            comb,
            blind: Scalar::ZERO,
            unblind: ExtendedPoint::IDENTITY,
        }
    }

    /// Refreshes the blinding masks from caller-supplied entropy (32 bytes).
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        if entropy.len() != Scalar::NUM_BYTES {
            return Err(Error::EntropyFailure);
        }

        let blind = Scalar::reduce_bytes(entropy);
        let unblind = self.comb_eval(&-blind, ExtendedPoint::IDENTITY);

        let mut buf = [0u8; 32];
        blind.to_bytes(&mut buf);
        let mask = FieldElement::from_bytes(&buf).unwrap_or_else(|| FieldElement::ONE);
        let mask = FieldElement::conditional_select(&mask, &FieldElement::ONE, mask.is_zero());
        buf.zeroize();

        // Uniform projective rescaling: T = XY/Z is preserved.
        self.unblind = ExtendedPoint {
            x: unblind.x * mask,
            y: unblind.y * mask,
            z: unblind.z * mask,
            t: unblind.t * mask,
        };
        self.blind = blind;
        Ok(())
    }

    /// Refreshes the blinding masks from a cryptographically secure RNG.
    #[cfg(feature = "rand_core")]
    pub fn randomize_with_rng(&mut self, rng: &mut impl rand_core::CryptoRngCore) -> Result<()> {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);
        let result = self.randomize(&entropy);
        entropy.zeroize();
        result
    }

    /// Constant-time blinded fixed-base multiplication `k * G`.
    pub fn mul_gen(&self, k: &Scalar) -> ExtendedPoint {
        let mut kb = *k + self.blind;
        let ret = self.comb_eval(&kb, self.unblind);
        kb.zeroize();
        ret
    }

    fn comb_eval(&self, k: &Scalar, init: ExtendedPoint) -> ExtendedPoint {
        let mut limbs = k.to_canonical();
        let mut digits = [0i8; COMB_ROWS];
        radix16(&limbs, &mut digits);

        let mut acc = init;
        for i in 0..COMB_ROWS {
            acc = acc.add(&self.comb[i].select(digits[i]));
        }

        limbs.zeroize();
        digits.zeroize();
        acc
    }

    /// Variable-time fixed-base multiplication via direct comb indexing.
    pub(crate) fn mul_gen_vartime(&self, k: &Scalar) -> ExtendedPoint {
        let limbs = k.to_canonical();
        let mut digits = [0i8; COMB_ROWS];
        radix16(&limbs, &mut digits);

        let mut acc = ExtendedPoint::IDENTITY;
        for i in 0..COMB_ROWS {
            let d = digits[i];
            if d != 0 {
                let entry = self.comb[i].0[(d.unsigned_abs() - 1) as usize];
                let entry = if d < 0 { entry.neg() } else { entry };
                acc = acc.add(&entry);
            }
        }
        acc
    }

    /// Variable-time `k1 * G + k2 * p`, for verification only.
    pub fn lincomb_vartime(&self, k1: &Scalar, p: &ExtendedPoint, k2: &Scalar) -> ExtendedPoint {
        self.mul_gen_vartime(k1).add(&mul_vartime(p, k2))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Constant-time variable-base multiplication `k * p`.
pub(crate) fn mul(p: &ExtendedPoint, k: &Scalar) -> ExtendedPoint {
    let table = LookupTable::new(p);
    let mut limbs = k.to_canonical();
    let mut digits = [0i8; COMB_ROWS];
    radix16(&limbs, &mut digits);

    let mut acc = table.select(digits[COMB_ROWS - 1]);
    for i in (0..COMB_ROWS - 1).rev() {
        acc = acc.double().double().double().double();
        acc = acc.add(&table.select(digits[i]));
    }

    limbs.zeroize();
    digits.zeroize();
    acc
}

/// Variable-time `k * p` via width-5 wNAF.
pub(crate) fn mul_vartime(p: &ExtendedPoint, k: &Scalar) -> ExtendedPoint {
    // odd multiples [p, 3p, ..., 15p]
    let p2 = p.double();
    let mut table = [*p; 8];
    for j in 0..7 {
        table[j + 1] = table[j].add(&p2);
    }

    let limbs = k.to_canonical();
    let mut naf = [0i8; MAX_NAF_LEN];
    let len = wnaf(&limbs, 5, &mut naf);

    let mut acc = ExtendedPoint::IDENTITY;
    for i in (0..len).rev() {
        acc = acc.double();
        let d = naf[i];
        if d != 0 {
            let entry = table[((d.unsigned_abs() - 1) / 2) as usize];
            let entry = if d < 0 { entry.neg() } else { entry };
            acc = acc.add(&entry);
        }
    }
    acc
}
