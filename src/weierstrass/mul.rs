//! Scalar multiplication: constant-time fixed-base and variable-base
//! ladders, and the variable-time double-base multiplication used by
//! verification.
//!
//! Constant-time paths decompose the scalar into signed radix-16 digits and
//! read 8-entry tables with a masked scan; no table index or branch ever
//! depends on a secret. Variable-time paths use width-5 wNAF, with the
//! secp256k1 endomorphism splitting scalars in half when the curve provides
//! a decomposition.

use crate::arithmetic::scalar::{radix16_be, wnaf};
use crate::arithmetic::{IsHigh, PrimeField, Reduce};
use crate::error::{Error, Result};
use crate::weierstrass::{AffinePoint, PrimeCurveParams, ProjectivePoint};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Largest scalar encoding across the supported curves (P-521).
pub(crate) const MAX_SCALAR_BYTES: usize = 66;

/// Radix-16 digit count for the largest scalar.
const MAX_COMB_ROWS: usize = 2 * MAX_SCALAR_BYTES + 1;

/// Upper bound on a width-5 NAF expansion (521 bits plus carry).
const MAX_NAF_LEN: usize = 528;

/// Lookup table of the multiples `[p, 2p, 3p, ..., 8p]` in affine form.
#[derive(Clone, Copy)]
pub(crate) struct LookupTable<C: PrimeCurveParams>(pub(crate) [AffinePoint<C>; 8]);

impl<C> LookupTable<C>
where
    C: PrimeCurveParams,
{
    /// Builds the table with one batched inversion.
    pub(crate) fn new(p: &ProjectivePoint<C>) -> Self {
        let mut multiples = [*p; 8];
        for j in 0..7 {
            multiples[j + 1] = multiples[j].add(p);
        }
        Self(ProjectivePoint::batch_normalize(&multiples))
    }

    /// Given `-8 <= x <= 8`, returns `x * p` in constant time by scanning
    /// the whole row under a mask.
    pub(crate) fn select(&self, x: i8) -> AffinePoint<C> {
        debug_assert!((-8..=8).contains(&x));

        // xabs = |x|
        let xmask = x >> 7;
        let xabs = ((x + xmask) ^ xmask) as u8;

        let mut t = AffinePoint::IDENTITY;
        for j in 1u8..9 {
            let c = xabs.ct_eq(&j);
            t.conditional_assign(&self.0[(j - 1) as usize], c);
        }
        // Now t == |x| * p; negate by sign.
        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_assign(&t.neg(), neg_mask);
        t
    }
}

impl<C> Default for LookupTable<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self([AffinePoint::IDENTITY; 8])
    }
}

/// Precomputed multiplication state for one curve: the fixed-base comb for
/// the generator and the scalar blinding pair.
///
/// The comb stores one 8-entry affine row per radix-16 digit position, so a
/// fixed-base multiplication is a single masked table read and mixed
/// addition per digit with no doublings. Rows are sized for the largest
/// supported curve; smaller curves leave the tail unused.
#[derive(Clone)]
pub struct Context<C: PrimeCurveParams> {
    comb: [LookupTable<C>; MAX_COMB_ROWS],
    blind: C::Scalar,
    unblind: ProjectivePoint<C>,
}

impl<C> Context<C>
where
    C: PrimeCurveParams,
{
    /// Number of comb rows this curve uses.
    fn comb_rows() -> usize {
        2 * <C::Scalar as PrimeField>::NUM_BYTES + 1
    }

    /// Builds the precomputed tables. The blinding pair starts out zero;
    /// call [`Context::randomize`] with caller entropy to arm it.
    pub fn new() -> Self {
        let mut comb = [LookupTable::default(); MAX_COMB_ROWS];
        let mut base = ProjectivePoint::GENERATOR;
        for row in comb.iter_mut().take(Self::comb_rows()) {
            *row = LookupTable::new(&base);
            for _ in 0..4 {
                base = base.double();
            }
        }

        Self {
            comb,
            blind: <C::Scalar as PrimeField>::ZERO,
            unblind: ProjectivePoint::IDENTITY,
        }
    }

    /// Refreshes the blinding masks from caller-supplied entropy.
    ///
    /// The buffer must be exactly the curve's scalar size; it seeds both the
    /// additive scalar mask and the projective z-rescaling mask. Masks only
    /// perturb intermediate representations; outputs are unchanged.
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        if entropy.len() != <C::Scalar as PrimeField>::NUM_BYTES {
            return Err(Error::EntropyFailure);
        }

        let blind = C::Scalar::reduce_bytes(entropy);
        let unblind = self.comb_eval(&-blind, ProjectivePoint::IDENTITY);

        // Derive a z-rescaling mask from the blind scalar; its canonical
        // value is below the field modulus on every supported curve.
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        let mut buf = [0u8; MAX_SCALAR_BYTES];
        blind.to_bytes(&mut buf[..nb]);
        let one = <C::FieldElement as PrimeField>::ONE;
        let mask = C::FieldElement::from_bytes(&buf[..<C::FieldElement as PrimeField>::NUM_BYTES])
            .unwrap_or_else(|| one);
        let mask = C::FieldElement::conditional_select(&mask, &one, mask.is_zero());
        buf.zeroize();

        let m2 = mask.square();
        let m3 = m2 * mask;
        self.unblind = ProjectivePoint {
            x: unblind.x * m2,
            y: unblind.y * m3,
            z: unblind.z * mask,
        };
        self.blind = blind;
        Ok(())
    }

    /// Refreshes the blinding masks from a cryptographically secure RNG.
    #[cfg(feature = "rand_core")]
    pub fn randomize_with_rng(&mut self, rng: &mut impl rand_core::CryptoRngCore) -> Result<()> {
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        let mut entropy = [0u8; MAX_SCALAR_BYTES];
        rng.fill_bytes(&mut entropy[..nb]);
        let result = self.randomize(&entropy[..nb]);
        entropy.zeroize();
        result
    }

    /// Constant-time blinded fixed-base multiplication `k * G`.
    ///
    /// Evaluates the comb at `k + blind` and folds in the stored
    /// `-blind * G`, so the digits fed to the table reads never equal the
    /// caller's scalar.
    pub fn mul_gen(&self, k: &C::Scalar) -> ProjectivePoint<C> {
        let mut kb = *k + self.blind;
        let ret = self.comb_eval(&kb, self.unblind);
        kb.zeroize();
        ret
    }

    /// Comb evaluation: one masked row read and mixed addition per digit.
    fn comb_eval(&self, k: &C::Scalar, init: ProjectivePoint<C>) -> ProjectivePoint<C> {
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        let rows = Self::comb_rows();

        let mut bytes = [0u8; MAX_SCALAR_BYTES];
        k.to_bytes(&mut bytes[..nb]);
        let mut digits = [0i8; MAX_COMB_ROWS];
        radix16_be(&bytes[..nb], &mut digits[..rows]);

        let mut acc = init;
        for i in 0..rows {
            acc = acc.add_mixed(&self.comb[i].select(digits[i]));
        }

        bytes.zeroize();
        digits.zeroize();
        acc
    }

    /// Variable-time `k1 * G + k2 * p`, for verification only.
    ///
    /// The fixed-base half indexes the comb directly (its table is far
    /// larger than any on-the-fly window); the variable-base half runs
    /// width-5 wNAF, split through the endomorphism when the curve has one.
    pub fn lincomb_vartime(
        &self,
        k1: &C::Scalar,
        p: &AffinePoint<C>,
        k2: &C::Scalar,
    ) -> ProjectivePoint<C> {
        self.mul_gen_vartime(k1).add(&mul_vartime(p, k2))
    }

    /// Variable-time fixed-base multiplication via direct comb indexing.
    pub(crate) fn mul_gen_vartime(&self, k: &C::Scalar) -> ProjectivePoint<C> {
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        let rows = Self::comb_rows();

        let mut bytes = [0u8; MAX_SCALAR_BYTES];
        k.to_bytes(&mut bytes[..nb]);
        let mut digits = [0i8; MAX_COMB_ROWS];
        radix16_be(&bytes[..nb], &mut digits[..rows]);

        let mut acc = ProjectivePoint::IDENTITY;
        for i in 0..rows {
            let d = digits[i];
            if d != 0 {
                let entry = self.comb[i].0[(d.unsigned_abs() - 1) as usize];
                let entry = if d < 0 { entry.neg() } else { entry };
                acc = acc.add_mixed(&entry);
            }
        }
        acc
    }
}

impl<C> Default for Context<C>
where
    C: PrimeCurveParams,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Constant-time variable-base multiplication `k * p`.
///
/// Precomputes `[p, 2p, ..., 8p]`, batch-normalizes the table to affine
/// form, then walks the scalar's signed radix-16 digits from the top with
/// four doublings and one masked mixed addition per digit.
pub(crate) fn mul<C>(p: &ProjectivePoint<C>, k: &C::Scalar) -> ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    let table = LookupTable::new(p);
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    let rows = 2 * nb + 1;

    let mut bytes = [0u8; MAX_SCALAR_BYTES];
    k.to_bytes(&mut bytes[..nb]);
    let mut digits = [0i8; MAX_COMB_ROWS];
    radix16_be(&bytes[..nb], &mut digits[..rows]);

    let mut acc = ProjectivePoint::from(table.select(digits[rows - 1]));
    for i in (0..rows - 1).rev() {
        acc = acc.double().double().double().double();
        acc = acc.add_mixed(&table.select(digits[i]));
    }

    bytes.zeroize();
    digits.zeroize();
    acc
}

/// Variable-time `k * p` for a public point and scalar.
pub(crate) fn mul_vartime<C>(p: &AffinePoint<C>, k: &C::Scalar) -> ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    if let (Some(beta), Some((r1, r2))) = (C::ENDOMORPHISM_BETA, C::decompose_scalar(k)) {
        let (a1, neg1) = fold_sign(r1);
        let (a2, neg2) = fold_sign(r2);

        let base1 = if neg1 { p.neg() } else { *p };
        let endo = AffinePoint {
            x: p.x * beta,
            y: p.y,
            infinity: p.infinity,
        };
        let base2 = if neg2 { endo.neg() } else { endo };

        let t1 = odd_multiples(&base1);
        let t2 = odd_multiples(&base2);

        let mut naf1 = [0i8; MAX_NAF_LEN];
        let mut naf2 = [0i8; MAX_NAF_LEN];
        let len1 = scalar_naf(&a1, &mut naf1);
        let len2 = scalar_naf(&a2, &mut naf2);

        wnaf_lincomb(&[(t1, &naf1[..len1]), (t2, &naf2[..len2])])
    } else {
        let table = odd_multiples(p);
        let mut naf = [0i8; MAX_NAF_LEN];
        let len = scalar_naf(k, &mut naf);
        wnaf_lincomb(&[(table, &naf[..len])])
    }
}

/// Folds a scalar into `[0, n/2]`, returning the magnitude and whether it
/// was negated.
fn fold_sign<S: PrimeField + IsHigh>(r: S) -> (S, bool) {
    if bool::from(r.is_high()) {
        (-r, true)
    } else {
        (r, false)
    }
}

/// The odd multiples `[p, 3p, 5p, ..., 15p]` in affine form.
fn odd_multiples<C>(p: &AffinePoint<C>) -> [AffinePoint<C>; 8]
where
    C: PrimeCurveParams,
{
    let pj = ProjectivePoint::from(*p);
    let p2 = pj.double();
    let mut t = [pj; 8];
    for j in 0..7 {
        t[j + 1] = t[j].add(&p2);
    }
    ProjectivePoint::batch_normalize(&t)
}

/// Width-5 NAF of a scalar's canonical value.
fn scalar_naf<S: PrimeField>(k: &S, out: &mut [i8; MAX_NAF_LEN]) -> usize {
    let nb = S::NUM_BYTES;
    let mut bytes = [0u8; MAX_SCALAR_BYTES];
    k.to_bytes(&mut bytes[..nb]);
    let limbs: [u64; 9] = crate::arithmetic::limb::from_be_bytes(&bytes[..nb]);
    wnaf(&limbs, 5, out)
}

/// Interleaved wNAF evaluation of `sum(k_i * base_i)` over odd-multiple
/// tables.
fn wnaf_lincomb<C>(terms: &[([AffinePoint<C>; 8], &[i8])]) -> ProjectivePoint<C>
where
    C: PrimeCurveParams,
{
    let max_len = terms.iter().map(|(_, naf)| naf.len()).max().unwrap_or(0);

    let mut acc = ProjectivePoint::IDENTITY;
    for i in (0..max_len).rev() {
        acc = acc.double();
        for (table, naf) in terms {
            if i < naf.len() && naf[i] != 0 {
                let d = naf[i];
                let entry = table[((d.unsigned_abs() - 1) / 2) as usize];
                let entry = if d < 0 { entry.neg() } else { entry };
                acc = acc.add_mixed(&entry);
            }
        }
    }
    acc
}
