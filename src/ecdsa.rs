//! Elliptic Curve Digital Signature Algorithm over the short-Weierstrass
//! curves.
//!
//! Nonces are deterministic per RFC 6979, driven by an HMAC-DRBG keyed with
//! the private key and the reduced message; signatures are low-S normalized
//! and carry a [`RecoveryId`] permitting public-key recovery. Callers
//! pre-hash: every function takes a message digest, of which the leftmost
//! `qlen` bits are used (RFC 6979 `bits2int`).
//!
//! Verification and recovery are variable-time (their inputs are public);
//! signing touches secrets only through the constant-time comb and wipes
//! every intermediate on all exit paths.

use crate::arithmetic::{IsHigh, PrimeField, Reduce};
use crate::error::{Error, Result};
use crate::weierstrass::mul::MAX_SCALAR_BYTES;
use crate::weierstrass::{AffinePoint, Context, PrimeCurveParams, ProjectivePoint};
use digest::{core_api::BlockSizeUser, Digest, FixedOutputReset};
use rfc6979::HmacDrbg;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::{Zeroize, Zeroizing};

/// Binds a curve to the digest driving its deterministic nonces.
///
/// The same hash feeds the HMAC-DRBG regardless of how the caller produced
/// the message digest.
pub trait EcdsaCurve: PrimeCurveParams {
    /// Preferred digest for this curve; a member of the SHA-2 family.
    type Digest: Digest + BlockSizeUser + FixedOutputReset;
}

/// Recovery identifier: bit 0 is the parity of `R.y`, bit 1 records whether
/// `R.x` exceeded the group order and was reduced.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Maximum value of a recovery id.
    pub const MAX: u8 = 3;

    /// Creates a recovery id from its component bits.
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self(((is_x_reduced as u8) << 1) | (is_y_odd as u8))
    }

    /// Parity of the nonce point's y-coordinate.
    pub const fn is_y_odd(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether the nonce point's x-coordinate overflowed the group order.
    pub const fn is_x_reduced(self) -> bool {
        self.0 & 2 == 2
    }

    /// Parses a recovery id from its byte encoding.
    pub fn from_byte(byte: u8) -> Result<Self> {
        if byte <= Self::MAX {
            Ok(Self(byte))
        } else {
            Err(Error::InvalidRecoveryId)
        }
    }

    /// Returns the byte encoding.
    pub const fn to_byte(self) -> u8 {
        self.0
    }
}

/// Fixed-width ECDSA signature: `r ‖ s`, each zero-padded to the scalar
/// size, both nonzero and fully reduced.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature<C: PrimeCurveParams> {
    r: C::Scalar,
    s: C::Scalar,
}

impl<C> Signature<C>
where
    C: PrimeCurveParams,
{
    /// Serialized length: two scalar-sized components.
    pub const ENCODED_LEN: usize = 2 * <C::Scalar as PrimeField>::NUM_BYTES;

    /// Creates a signature from its components, rejecting zeros.
    pub fn from_scalars(r: C::Scalar, s: C::Scalar) -> Result<Self> {
        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::InvalidSignature);
        }
        Ok(Self { r, s })
    }

    /// Parses the fixed-width `r ‖ s` encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        if bytes.len() != 2 * nb {
            return Err(Error::InvalidSignature);
        }
        let r = Option::<C::Scalar>::from(C::Scalar::from_bytes(&bytes[..nb]))
            .ok_or(Error::InvalidSignature)?;
        let s = Option::<C::Scalar>::from(C::Scalar::from_bytes(&bytes[nb..]))
            .ok_or(Error::InvalidSignature)?;
        Self::from_scalars(r, s)
    }

    /// Writes the fixed-width encoding, returning the number of bytes
    /// written.
    pub fn to_bytes(&self, out: &mut [u8]) -> Result<usize> {
        let nb = <C::Scalar as PrimeField>::NUM_BYTES;
        if out.len() < 2 * nb {
            return Err(Error::InvalidSignature);
        }
        self.r.to_bytes(&mut out[..nb]);
        self.s.to_bytes(&mut out[nb..2 * nb]);
        Ok(2 * nb)
    }

    /// The `r` component.
    pub fn r(&self) -> &C::Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &C::Scalar {
        &self.s
    }
}

/// Signs a prehashed message, returning the signature and its recovery id.
///
/// The private key is the fixed-width big-endian encoding of a scalar in
/// `[1, n-1]`. The nonce is derived per RFC 6979 and the produced `s` is
/// low-S normalized (with the recovery id's parity bit flipped to match).
/// The internal retry loop is unbounded by design; the DRBG output
/// distribution makes more than two pulls vanishingly unlikely.
pub fn sign<C>(
    ctx: &Context<C>,
    prehash: &[u8],
    private_key: &[u8],
) -> Result<(Signature<C>, RecoveryId)>
where
    C: EcdsaCurve,
{
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    if private_key.len() != nb {
        return Err(Error::InvalidPrivateKey);
    }
    let d = Option::<C::Scalar>::from(C::Scalar::from_bytes(private_key))
        .ok_or(Error::InvalidPrivateKey)?;
    if bool::from(d.is_zero()) {
        return Err(Error::InvalidPrivateKey);
    }
    let d = Zeroizing::new(d);

    let z = Zeroizing::new(bits2scalar::<C>(prehash));

    // RFC 6979: entropy = int2octets(d), nonce = bits2octets(prehash).
    let mut z_bytes = Zeroizing::new([0u8; MAX_SCALAR_BYTES]);
    z.to_bytes(&mut z_bytes[..nb]);
    let mut drbg = HmacDrbg::<C::Digest>::new(private_key, &z_bytes[..nb], &[]);

    let excess_bits = (8 * nb - <C::Scalar as Reduce>::NUM_BITS) as u32;

    loop {
        let mut k_bytes = Zeroizing::new([0u8; MAX_SCALAR_BYTES]);
        drbg.fill_bytes(&mut k_bytes[..nb]);
        shr_bytes_be(&mut k_bytes[..nb], excess_bits);

        let k = match Option::<C::Scalar>::from(C::Scalar::from_bytes(&k_bytes[..nb])) {
            Some(k) => Zeroizing::new(k),
            None => continue,
        };
        if bool::from(k.is_zero()) {
            continue;
        }

        let r_point = ctx.mul_gen(&k).to_affine();

        let mut x_bytes = [0u8; MAX_SCALAR_BYTES];
        r_point.x.to_bytes(&mut x_bytes[..nb]);
        let r = C::Scalar::reduce_bytes(&x_bytes[..nb]);
        if bool::from(r.is_zero()) {
            continue;
        }

        // Did reducing R.x mod n change it? Both values are public once the
        // signature is emitted.
        let mut r_bytes = [0u8; MAX_SCALAR_BYTES];
        r.to_bytes(&mut r_bytes[..nb]);
        let x_reduced = r_bytes[..nb] != x_bytes[..nb];

        let k_inv = match Option::<C::Scalar>::from(k.invert()) {
            Some(inv) => Zeroizing::new(inv),
            None => continue,
        };
        let s = *k_inv * (*z + r * *d);
        if bool::from(s.is_zero()) {
            continue;
        }

        let mut y_odd = r_point.y.is_odd();
        let high = s.is_high();
        let s = C::Scalar::conditional_select(&s, &-s, high);
        y_odd ^= high;

        let recovery_id = RecoveryId::new(bool::from(y_odd), x_reduced);
        return Ok((Signature { r, s }, recovery_id));
    }
}

/// Verifies a fixed-width signature over a prehashed message.
///
/// All failure modes collapse into [`Error::InvalidSignature`] except a
/// malformed public key, so a forger learns nothing from the error kind.
pub fn verify<C>(
    ctx: &Context<C>,
    prehash: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<()>
where
    C: EcdsaCurve,
{
    let sig = Signature::<C>::from_bytes(signature)?;
    let q = AffinePoint::<C>::from_bytes(public_key).map_err(|_| Error::InvalidPublicKey)?;
    verify_prehashed(ctx, prehash, &sig, &q)
}

/// Verifies a parsed signature against a parsed public key.
pub fn verify_prehashed<C>(
    ctx: &Context<C>,
    prehash: &[u8],
    sig: &Signature<C>,
    public_key: &AffinePoint<C>,
) -> Result<()>
where
    C: EcdsaCurve,
{
    let z = bits2scalar::<C>(prehash);
    let s_inv =
        Option::<C::Scalar>::from(sig.s.invert()).ok_or(Error::InvalidSignature)?;
    let u1 = z * s_inv;
    let u2 = sig.r * s_inv;

    let r_point = ctx.lincomb_vartime(&u1, public_key, &u2);
    if bool::from(r_point.is_identity()) {
        return Err(Error::InvalidSignature);
    }

    if x_coordinate_matches_r(&r_point, &sig.r) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// Recovers the signing public key from a signature and writes its SEC1
/// encoding into `output`, returning the number of bytes written.
pub fn recover<C>(
    ctx: &Context<C>,
    prehash: &[u8],
    signature: &[u8],
    recovery_id: RecoveryId,
    compress: bool,
    output: &mut [u8],
) -> Result<usize>
where
    C: EcdsaCurve,
{
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    let sig = Signature::<C>::from_bytes(signature)?;
    let z = bits2scalar::<C>(prehash);

    let mut r_bytes = [0u8; MAX_SCALAR_BYTES];
    sig.r.to_bytes(&mut r_bytes[..nb]);
    // r < n < p always holds, so the scalar encoding decodes into the field.
    let r_fe = Option::<C::FieldElement>::from(C::FieldElement::from_bytes(&r_bytes[..nb]))
        .ok_or(Error::InvalidSignature)?;

    let x = if recovery_id.is_x_reduced() {
        if !be_less_than(&r_bytes[..nb], C::MODULUS_MINUS_ORDER) {
            return Err(Error::InvalidRecoveryId);
        }
        r_fe + C::ORDER_IN_FIELD
    } else {
        r_fe
    };

    let y_is_odd = Choice::from(recovery_id.is_y_odd() as u8);
    let r_point = Option::<AffinePoint<C>>::from(AffinePoint::<C>::decompress(&x, y_is_odd))
        .ok_or(Error::InvalidRecoveryId)?;

    let r_inv =
        Option::<C::Scalar>::from(sig.r.invert()).ok_or(Error::InvalidSignature)?;
    let u1 = -(r_inv * z);
    let u2 = r_inv * sig.s;

    let public_key = ctx.lincomb_vartime(&u1, &r_point, &u2).to_affine();
    if bool::from(public_key.is_identity()) {
        return Err(Error::InvalidRecoveryId);
    }
    public_key.to_bytes(output, compress)
}

/// Derives the public key for a private scalar and writes its SEC1 encoding
/// into `output`, returning the number of bytes written.
pub fn public_key<C>(
    ctx: &Context<C>,
    private_key: &[u8],
    compress: bool,
    output: &mut [u8],
) -> Result<usize>
where
    C: EcdsaCurve,
{
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    if private_key.len() != nb {
        return Err(Error::InvalidPrivateKey);
    }
    let d = Option::<C::Scalar>::from(C::Scalar::from_bytes(private_key))
        .ok_or(Error::InvalidPrivateKey)?;
    if bool::from(d.is_zero()) {
        return Err(Error::InvalidPrivateKey);
    }
    let d = Zeroizing::new(d);

    let q = ctx.mul_gen(&d).to_affine();
    q.to_bytes(output, compress)
}

/// RFC 6979 `bits2int` followed by reduction mod n: the leftmost `qlen`
/// bits of the digest, as a scalar.
fn bits2scalar<C: PrimeCurveParams>(prehash: &[u8]) -> C::Scalar {
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    let bits = <C::Scalar as Reduce>::NUM_BITS;

    let take = prehash.len().min(nb);
    let mut buf = [0u8; MAX_SCALAR_BYTES];
    buf[..take].copy_from_slice(&prehash[..take]);

    if take == nb && 8 * nb > bits {
        shr_bytes_be(&mut buf[..take], (8 * nb - bits) as u32);
    }
    let scalar = C::Scalar::reduce_bytes(&buf[..take]);
    buf.zeroize();
    scalar
}

/// Jacobian-form check `x(R') == r mod n` without an affine conversion:
/// accept when `X = r Z²`, or when `X = (r + n) Z²` for the x-overflow case
/// (possible only if `r < p - n`).
fn x_coordinate_matches_r<C: PrimeCurveParams>(point: &ProjectivePoint<C>, r: &C::Scalar) -> bool {
    let nb = <C::Scalar as PrimeField>::NUM_BYTES;
    let mut r_bytes = [0u8; MAX_SCALAR_BYTES];
    r.to_bytes(&mut r_bytes[..nb]);

    let r_fe = match Option::<C::FieldElement>::from(C::FieldElement::from_bytes(&r_bytes[..nb])) {
        Some(fe) => fe,
        None => return false,
    };

    let zz = point.z.square();
    if bool::from((r_fe * zz).ct_eq(&point.x)) {
        return true;
    }

    if be_less_than(&r_bytes[..nb], C::MODULUS_MINUS_ORDER) {
        let shifted = r_fe + C::ORDER_IN_FIELD;
        if bool::from((shifted * zz).ct_eq(&point.x)) {
            return true;
        }
    }
    false
}

/// Big-endian lexicographic `a < b` over equal-length byte strings.
fn be_less_than(a: &[u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        if x != y {
            return x < y;
        }
    }
    false
}

/// In-place big-endian right shift by fewer than 8 bits.
fn shr_bytes_be(buf: &mut [u8], shift: u32) {
    debug_assert!(shift < 8);
    if shift == 0 {
        return;
    }
    let mut carry = 0u8;
    for b in buf.iter_mut() {
        let next_carry = *b << (8 - shift);
        *b = (*b >> shift) | carry;
        carry = next_carry;
    }
}
