//! Error types.

use core::fmt;

/// Result type with the `ecc-core` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Elliptic curve cryptography errors.
///
/// Verification and recovery failures are deliberately coarse: every parse or
/// check failure inside those operations surfaces as [`Error::InvalidSignature`]
/// so callers cannot be turned into a distinguishing oracle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Field element encoding is out of range or has the wrong length.
    InvalidFieldElement,

    /// Scalar is zero where forbidden, out of range, or has the wrong length.
    InvalidScalar,

    /// Point encoding is malformed, off-curve, or the identity where forbidden.
    InvalidPoint,

    /// Signature failed to parse or verify.
    InvalidSignature,

    /// Private key is zero, out of range, or has the wrong length.
    InvalidPrivateKey,

    /// Public key failed to parse.
    InvalidPublicKey,

    /// Recovery id is out of range or recovery produced the identity.
    InvalidRecoveryId,

    /// Field element has no square root.
    ///
    /// Internal to point decompression; callers observe [`Error::InvalidPoint`].
    NotASquare,

    /// Caller-supplied entropy was rejected (e.g. length mismatch).
    EntropyFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidFieldElement => "invalid field element",
            Error::InvalidScalar => "invalid scalar",
            Error::InvalidPoint => "invalid curve point",
            Error::InvalidSignature => "signature verification failed",
            Error::InvalidPrivateKey => "invalid private key",
            Error::InvalidPublicKey => "invalid public key",
            Error::InvalidRecoveryId => "invalid recovery id",
            Error::NotASquare => "field element is not a square",
            Error::EntropyFailure => "entropy input rejected",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
