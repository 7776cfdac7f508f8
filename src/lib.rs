#![no_std]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! Pure Rust elliptic curve cryptography core.
//!
//! Implements the arithmetic and signature layers for six curves:
//!
//! - **ECDSA** (sign, verify, public-key recovery, public-key derivation)
//!   over NIST P-224, P-256, P-384, P-521, and secp256k1;
//! - **Ed25519** (sign, verify, public-key derivation) over edwards25519,
//!   including the `Ed25519ctx` and `Ed25519ph` variants.
//!
//! Every operation reachable from secret material is constant-time:
//! mask-based table reads, branch-free complete group formulas, and a single
//! Montgomery engine shared by all twelve prime fields. Verification paths
//! use faster variable-time algorithms (windowed NAF, and the secp256k1
//! endomorphism split).
//!
//! Callers pre-hash messages; this crate consumes digests through the
//! [`digest`] traits and never selects hash inputs itself, except for the
//! RFC 6979 nonce DRBG and the Ed25519 SHA-512 schedule, which are fixed by
//! the respective standards.
//!
//! # Example
//!
//! ```
//! use ecc_core::{ecdsa, p256};
//! use sha2::{Digest, Sha256};
//!
//! let ctx = p256::Context::new();
//! let private_key = [0x17u8; 32];
//! let digest = Sha256::digest(b"example message");
//!
//! let (signature, recovery_id) = ecdsa::sign(&ctx, &digest, &private_key)?;
//!
//! let mut public_key = [0u8; 33];
//! ecdsa::public_key(&ctx, &private_key, true, &mut public_key)?;
//!
//! let mut sig_bytes = [0u8; 64];
//! signature.to_bytes(&mut sig_bytes)?;
//! ecdsa::verify(&ctx, &digest, &sig_bytes, &public_key)?;
//!
//! let mut recovered = [0u8; 33];
//! ecdsa::recover(&ctx, &digest, &sig_bytes, recovery_id, true, &mut recovered)?;
//! assert_eq!(recovered, public_key);
//! # Ok::<(), ecc_core::Error>(())
//! ```

#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;
pub mod ecdsa;
pub mod ed25519;
pub mod eddsa;
pub mod edwards;
pub mod error;
pub mod k256;
pub mod p224;
pub mod p256;
pub mod p384;
pub mod p521;
pub mod weierstrass;

pub use crate::error::{Error, Result};
pub use crate::k256::Secp256k1;
pub use crate::p224::NistP224;
pub use crate::p256::NistP256;
pub use crate::p384::NistP384;
pub use crate::p521::NistP521;

use core::fmt;

/// Identifier for one of the supported curves.
///
/// The string tags are `"P224"`, `"P256"`, `"P384"`, `"P521"`,
/// `"SECP256K1"`, and `"ED25519"`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub enum CurveId {
    /// NIST P-224 (secp224r1).
    P224,
    /// NIST P-256 (secp256r1).
    P256,
    /// NIST P-384 (secp384r1).
    P384,
    /// NIST P-521 (secp521r1).
    P521,
    /// secp256k1.
    Secp256k1,
    /// edwards25519 / Ed25519.
    Ed25519,
}

impl CurveId {
    /// All supported curves.
    pub const ALL: [CurveId; 6] = [
        CurveId::P224,
        CurveId::P256,
        CurveId::P384,
        CurveId::P521,
        CurveId::Secp256k1,
        CurveId::Ed25519,
    ];

    /// Looks up a curve by its registry tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "P224" => Some(CurveId::P224),
            "P256" => Some(CurveId::P256),
            "P384" => Some(CurveId::P384),
            "P521" => Some(CurveId::P521),
            "SECP256K1" => Some(CurveId::Secp256k1),
            "ED25519" => Some(CurveId::Ed25519),
            _ => None,
        }
    }

    /// The registry tag.
    pub const fn name(self) -> &'static str {
        match self {
            CurveId::P224 => "P224",
            CurveId::P256 => "P256",
            CurveId::P384 => "P384",
            CurveId::P521 => "P521",
            CurveId::Secp256k1 => "SECP256K1",
            CurveId::Ed25519 => "ED25519",
        }
    }

    /// Serialized field element size in bytes.
    pub const fn field_size(self) -> usize {
        match self {
            CurveId::P224 => 28,
            CurveId::P256 | CurveId::Secp256k1 | CurveId::Ed25519 => 32,
            CurveId::P384 => 48,
            CurveId::P521 => 66,
        }
    }

    /// Serialized scalar size in bytes (equal to the field size on every
    /// supported curve).
    pub const fn scalar_size(self) -> usize {
        self.field_size()
    }

    /// Fixed-width signature size in bytes.
    pub const fn signature_size(self) -> usize {
        2 * self.scalar_size()
    }

    /// Group cofactor.
    pub const fn cofactor(self) -> u8 {
        match self {
            CurveId::Ed25519 => 8,
            _ => 1,
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::CurveId;

    #[test]
    fn registry_roundtrip() {
        for id in CurveId::ALL {
            assert_eq!(CurveId::from_name(id.name()), Some(id));
            assert_eq!(id.signature_size(), 2 * id.field_size());
        }
        assert_eq!(CurveId::from_name("P192"), None);
        assert_eq!(CurveId::P521.field_size(), 66);
        assert_eq!(CurveId::Ed25519.cofactor(), 8);
    }
}
