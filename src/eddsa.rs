//! Ed25519 signatures (RFC 8032).
//!
//! Pure Ed25519 plus the `Ed25519ctx` and `Ed25519ph` variants, selected by
//! the `dom2` prefix. Signing hashes are SHA-512 throughout; secret scalars
//! are clamped per §5.1.5 and every secret intermediate is wiped on exit.
//! Verification applies the cofactored equation
//! `[8] S G = [8] R + [8] k A`, matching standard Ed25519 validation
//! criteria.

use crate::ed25519::Scalar;
use crate::edwards::{CompressedEdwardsY, Context, ExtendedPoint};
use crate::error::{Error, Result};
use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

/// Length of an Ed25519 seed (secret key).
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of an encoded public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a signature (`R ‖ S`).
pub const SIGNATURE_LENGTH: usize = 64;

/// `dom2` domain-separation tag (RFC 8032 §5.1).
const DOM2_PREFIX: &[u8] = b"SigEd25519 no Ed25519 collisions";

/// `dom2` parameters: the prehash flag and context string. `None` is pure
/// Ed25519, which omits the prefix entirely.
type Dom2<'a> = Option<(u8, &'a [u8])>;

/// Ed25519 signing and verification engine.
///
/// Owns the precomputed base-point tables and blinding state; cheap to
/// clone, expensive to build.
#[derive(Clone)]
pub struct Eddsa {
    ctx: Context,
}

impl Eddsa {
    /// Builds the base-point tables.
    pub fn new() -> Self {
        Self {
            ctx: Context::new(),
        }
    }

    /// Refreshes the scalar and point blinding masks from caller entropy
    /// (32 bytes).
    pub fn randomize(&mut self, entropy: &[u8]) -> Result<()> {
        self.ctx.randomize(entropy)
    }

    /// Derives the public key for a 32-byte seed.
    pub fn public_key(&self, seed: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
        let (a, _prefix) = self.expand_seed(seed)?;
        Ok(self.ctx.mul_gen(&a).compress().0)
    }

    /// Signs a message with pure Ed25519.
    pub fn sign(&self, msg: &[u8], seed: &[u8]) -> Result<[u8; SIGNATURE_LENGTH]> {
        self.sign_inner(None, msg, seed)
    }

    /// Signs a message with Ed25519ctx. The context must be at most 255
    /// bytes.
    pub fn sign_ctx(
        &self,
        msg: &[u8],
        seed: &[u8],
        context: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]> {
        self.sign_inner(Some((0, context)), msg, seed)
    }

    /// Signs a SHA-512 prehash with Ed25519ph.
    pub fn sign_prehashed(
        &self,
        prehash: &[u8],
        seed: &[u8],
        context: &[u8],
    ) -> Result<[u8; SIGNATURE_LENGTH]> {
        self.sign_inner(Some((1, context)), prehash, seed)
    }

    /// Verifies a pure Ed25519 signature.
    pub fn verify(&self, msg: &[u8], signature: &[u8], public_key: &[u8]) -> Result<()> {
        self.verify_inner(None, msg, signature, public_key)
    }

    /// Verifies an Ed25519ctx signature.
    pub fn verify_ctx(
        &self,
        msg: &[u8],
        signature: &[u8],
        public_key: &[u8],
        context: &[u8],
    ) -> Result<()> {
        self.verify_inner(Some((0, context)), msg, signature, public_key)
    }

    /// Verifies an Ed25519ph signature over a SHA-512 prehash.
    pub fn verify_prehashed(
        &self,
        prehash: &[u8],
        signature: &[u8],
        public_key: &[u8],
        context: &[u8],
    ) -> Result<()> {
        self.verify_inner(Some((1, context)), prehash, signature, public_key)
    }

    /// Clamps the SHA-512 expansion of the seed (§5.1.5): the secret scalar
    /// and the nonce prefix.
    fn expand_seed(&self, seed: &[u8]) -> Result<(Zeroizing<Scalar>, Zeroizing<[u8; 32]>)> {
        if seed.len() != SECRET_KEY_LENGTH {
            return Err(Error::InvalidPrivateKey);
        }

        let mut digest = Zeroizing::new([0u8; 64]);
        digest.copy_from_slice(&Sha512::digest(seed));
        let mut scalar_bytes = Zeroizing::new([0u8; 32]);
        scalar_bytes.copy_from_slice(&digest[..32]);
        scalar_bytes[0] &= 0xf8;
        scalar_bytes[31] &= 0x7f;
        scalar_bytes[31] |= 0x40;

        let a = Zeroizing::new(Scalar::reduce_bytes(&scalar_bytes[..]));

        let mut prefix = Zeroizing::new([0u8; 32]);
        prefix.copy_from_slice(&digest[32..]);

        Ok((a, prefix))
    }

    fn sign_inner(&self, dom: Dom2<'_>, msg: &[u8], seed: &[u8]) -> Result<[u8; 64]> {
        if let Some((_, context)) = dom {
            if context.len() > 255 {
                return Err(Error::InvalidSignature);
            }
        }

        let (a, prefix) = self.expand_seed(seed)?;
        let a_point = self.ctx.mul_gen(&a).compress();

        let mut r_digest = Zeroizing::new([0u8; 64]);
        r_digest.copy_from_slice(
            &dom2_hasher(dom)
                .chain_update(&prefix[..])
                .chain_update(msg)
                .finalize(),
        );
        let r = Zeroizing::new(Scalar::reduce_bytes(&r_digest[..]));
        let r_point = self.ctx.mul_gen(&r).compress();

        let k_digest = dom2_hasher(dom)
            .chain_update(r_point.as_bytes())
            .chain_update(a_point.as_bytes())
            .chain_update(msg)
            .finalize();
        let k = Scalar::reduce_bytes(&k_digest[..]);

        let s = *r + k * *a;

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature[..32].copy_from_slice(r_point.as_bytes());
        s.to_bytes(&mut signature[32..]);
        Ok(signature)
    }

    fn verify_inner(
        &self,
        dom: Dom2<'_>,
        msg: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        if let Some((_, context)) = dom {
            if context.len() > 255 {
                return Err(Error::InvalidSignature);
            }
        }
        if signature.len() != SIGNATURE_LENGTH {
            return Err(Error::InvalidSignature);
        }
        if public_key.len() != PUBLIC_KEY_LENGTH {
            return Err(Error::InvalidPublicKey);
        }

        let mut r_enc = [0u8; 32];
        r_enc.copy_from_slice(&signature[..32]);
        let r_point = Option::<ExtendedPoint>::from(CompressedEdwardsY(r_enc).decompress())
            .ok_or(Error::InvalidSignature)?;

        let mut a_enc = [0u8; 32];
        a_enc.copy_from_slice(public_key);
        let a_point = Option::<ExtendedPoint>::from(CompressedEdwardsY(a_enc).decompress())
            .ok_or(Error::InvalidPublicKey)?;

        // S must already be reduced (strict per RFC 8032 §5.1.7).
        let s = Option::<Scalar>::from(Scalar::from_bytes(&signature[32..]))
            .ok_or(Error::InvalidSignature)?;

        let k_digest = dom2_hasher(dom)
            .chain_update(&signature[..32])
            .chain_update(public_key)
            .chain_update(msg)
            .finalize();
        let k = Scalar::reduce_bytes(&k_digest[..]);

        // Cofactored check: [8] (S G - k A - R) == identity.
        let difference = self
            .ctx
            .lincomb_vartime(&s, &a_point, &-k)
            .sub(&r_point);
        if bool::from(difference.double().double().double().is_identity()) {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }
}

impl Default for Eddsa {
    fn default() -> Self {
        Self::new()
    }
}

/// SHA-512 seeded with the `dom2` prefix when a variant is in use.
fn dom2_hasher(dom: Dom2<'_>) -> Sha512 {
    let mut hasher = Sha512::new();
    if let Some((phflag, context)) = dom {
        hasher.update(DOM2_PREFIX);
        hasher.update([phflag]);
        hasher.update([context.len() as u8]);
        hasher.update(context);
    }
    hasher
}
