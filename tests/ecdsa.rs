//! ECDSA end-to-end vectors for every supported Weierstrass curve.
//!
//! One vector per curve: deterministic signature bytes, recovery id, derived
//! public key, verification, recovery, and bit-flip rejection sweeps.

use ecc_core::ecdsa::{self, EcdsaCurve, RecoveryId};
use ecc_core::weierstrass::Context;
use ecc_core::{NistP224, NistP256, NistP384, NistP521, Secp256k1};
use hex_literal::hex;

struct Vector {
    private_key: &'static [u8],
    public_key: &'static [u8],
    msg: &'static [u8],
    sig: &'static [u8],
    recovery_id: u8,
}

fn check_vector<C: EcdsaCurve>(vector: &Vector) {
    let mut ctx = Context::<C>::new();
    let entropy = vec![0xa5u8; scalar_len::<C>()];
    ctx.randomize(&entropy).unwrap();

    // deterministic signature + recovery id
    let (sig, rid) = ecdsa::sign(&ctx, vector.msg, vector.private_key).unwrap();
    let mut sig_bytes = [0u8; 132];
    let sig_len = sig.to_bytes(&mut sig_bytes).unwrap();
    assert_eq!(&sig_bytes[..sig_len], vector.sig);
    assert_eq!(rid.to_byte(), vector.recovery_id);

    // public key derivation (compressed)
    let mut pk = [0u8; 67];
    let pk_len = ecdsa::public_key(&ctx, vector.private_key, true, &mut pk).unwrap();
    assert_eq!(&pk[..pk_len], vector.public_key);

    // verification
    ecdsa::verify(&ctx, vector.msg, vector.sig, vector.public_key).unwrap();

    // recovery
    let mut rec = [0u8; 67];
    let rec_len = ecdsa::recover(
        &ctx,
        vector.msg,
        vector.sig,
        RecoveryId::from_byte(vector.recovery_id).unwrap(),
        true,
        &mut rec,
    )
    .unwrap();
    assert_eq!(&rec[..rec_len], vector.public_key);

    // flipping any sampled bit of message, signature, or key must fail
    let mut msg = vector.msg.to_vec();
    let mut sig_buf = vector.sig.to_vec();
    let mut pk_buf = vector.public_key.to_vec();
    for idx in [0, vector.msg.len() / 2, vector.msg.len() - 1] {
        msg[idx] ^= 1;
        assert!(ecdsa::verify(&ctx, &msg, &sig_buf, &pk_buf).is_err());
        msg[idx] ^= 1;
    }
    for idx in [0, sig_buf.len() / 2, sig_buf.len() - 1] {
        sig_buf[idx] ^= 1;
        assert!(ecdsa::verify(&ctx, &msg, &sig_buf, &pk_buf).is_err());
        sig_buf[idx] ^= 1;
    }
    for idx in [1, pk_buf.len() - 1] {
        pk_buf[idx] ^= 1;
        assert!(ecdsa::verify(&ctx, &msg, &sig_buf, &pk_buf).is_err());
        pk_buf[idx] ^= 1;
    }
    ecdsa::verify(&ctx, &msg, &sig_buf, &pk_buf).unwrap();
}

/// The scalar (and entropy) size for a curve.
fn scalar_len<C: EcdsaCurve>() -> usize {
    <C::Scalar as ecc_core::arithmetic::PrimeField>::NUM_BYTES
}

#[test]
fn p224_vector() {
    check_vector::<NistP224>(&Vector {
        private_key: &hex!("03184cae2f684828fbe684685ebeade42e81621ac3e9def7b674d24c"),
        public_key: &hex!("03cfef229d703e5c4539473d854e15668a1f8a5e95e6c5244b134c09dd"),
        msg: &hex!("0d768cad891306be8ab97d1d92122df498a225f6cb986ae848d84d10b0150bec"),
        sig: &hex!(
            "119455810efe95fe3798568cf1b353cd6199ecc2d040b0bf73d3213943532e35"
            "121ee0ed1768779f85e0cb011a6c320299afe4f51581ccfa"
        ),
        recovery_id: 0,
    });
}

#[test]
fn p256_vector() {
    check_vector::<NistP256>(&Vector {
        private_key: &hex!("43f729cc1d9494feb28c1e1d36dbcddfdcd717988d51da888feabc9e55e171b8"),
        public_key: &hex!("03802b0dc263d91bc5831b9efcc2b50e5bb5d902bd67a404f7b752db3eedeb39bf"),
        msg: &hex!("51890598bff4a6468635e8d1903edc7e9bf4eba756e97f3ca01a2ca9365404ae"),
        sig: &hex!(
            "f5b08560d4c67b9da2e5da5322101c9644386d7ec8d68fc64ab5fec65466f95e"
            "333e7d9c7cf2635e72497dcfffcb3896a2561020ee56429945114375000d96c5"
        ),
        recovery_id: 1,
    });
}

#[test]
fn p384_vector() {
    check_vector::<NistP384>(&Vector {
        private_key: &hex!(
            "914fead324c196e213213b2b95b39680468ee9b10d56335f4704e6f7df2a54ca"
            "18e1de2ecfa8924c61b5614f410963fa"
        ),
        public_key: &hex!(
            "0215d60babdbea58e19a84bf5e3a6bbfb4626ad91bb5d3924bc6386eb710667b"
            "0ffb683e004563e538158d0d58bfb12097"
        ),
        msg: &hex!(
            "44f046cf4181d901ffd39cce82ff05c7fd7bf9833558b76846c554a67329f40e"
            "6593e2d91cc80771498f77173acbf5f6"
        ),
        sig: &hex!(
            "562f6a5dbc58a9d5a0e3e010ff8e84f6e8d70c633e90498e32d2ce6e669a0503"
            "cd11f9de8d8c0488cadc9c36dd3015c56bd9ede836a8c7f5bf03efc0cdc45302"
            "2882b916306eb261e1dd547ad53a34081ea678d5184fb79509f03157d1ac4906"
        ),
        recovery_id: 1,
    });
}

#[test]
fn p521_vector() {
    check_vector::<NistP521>(&Vector {
        private_key: &hex!(
            "0031703d9434b12afc32b5512339a2c785b6b6ff22f4a1dd04e8e0c2fc628d9d"
            "9b41fc7c28f4fb4225f132bd6f92dcb6c05643c3d49c06b2d26d15be0be06a15"
            "7778"
        ),
        public_key: &hex!(
            "030007302949b5e2962ff211cf4723492a34ced71a1bc0ed342151dcf1b8e1a1"
            "9c6b66f2cd54be406242b2545022f341844c33847ab0387ea23a005d41a0e56a"
            "937a50"
        ),
        msg: &hex!(
            "5dedf58de6015e542ad1806e47692d8648af84311058374d46d912a1e5a32062"
            "0be4eac88ccc52a7aa17d4653754a4e3b4922ee928b8fb7e2f55d4d51586aec6"
        ),
        sig: &hex!(
            "01488eb18e717ece215ab90261b7aa5a1c042e5c0b02249e91af87104e14c967"
            "b8f05c70f000d8e1dce4f23514d94aeffb2ac8275e036e556bf8fee94bb5cf39"
            "b8d80094f00126b6129eb1ca5819d60fcb347b4402be210e6e5271bed613b651"
            "98b07983730fe54c176dd21e2398b5d166c14071a4425087dca9b5e20e8dd73d"
            "3ae1e217"
        ),
        recovery_id: 0,
    });
}

#[test]
fn secp256k1_vector() {
    check_vector::<Secp256k1>(&Vector {
        private_key: &hex!("cc524c2fe62cc8b820bc830890bedd623d3a836dce22517023bcda4f1c5c756e"),
        public_key: &hex!("0203cad7f301acf0bb102bc7e680dcb074003ffda0a6be696ad0cf129b87576cd0"),
        msg: &hex!("fa09ee3d85c4938e098fbbf6a4f761a0537e465f610b7873fb264306c37b336c"),
        sig: &hex!(
            "83ecd1ab7c388dc9f0957ae39e9c40df99f830300425ead6659f1acdedbec9e6"
            "1778974e168da0cd64d0f8963148ecbc7fa7325c5a8f1b9b3aa0eacf74568c1a"
        ),
        recovery_id: 0,
    });
}

#[test]
fn signatures_are_low_s() {
    let ctx = Context::<NistP256>::new();
    for seed in 1u8..16 {
        let private_key = [seed; 32];
        let msg = [seed.wrapping_mul(17); 32];
        let (sig, _) = ecdsa::sign(&ctx, &msg, &private_key).unwrap();
        assert!(!bool::from(sig.s().is_high()));
    }
}

#[test]
fn uncompressed_keys_verify() {
    let ctx = Context::<NistP256>::new();
    let private_key = hex!("43f729cc1d9494feb28c1e1d36dbcddfdcd717988d51da888feabc9e55e171b8");
    let msg = hex!("51890598bff4a6468635e8d1903edc7e9bf4eba756e97f3ca01a2ca9365404ae");

    let mut pk = [0u8; 65];
    let len = ecdsa::public_key(&ctx, &private_key, false, &mut pk).unwrap();
    assert_eq!(len, 65);
    assert_eq!(pk[0], 0x04);

    let (sig, _) = ecdsa::sign(&ctx, &msg, &private_key).unwrap();
    let mut sig_bytes = [0u8; 64];
    sig.to_bytes(&mut sig_bytes).unwrap();
    ecdsa::verify(&ctx, &msg, &sig_bytes, &pk).unwrap();
}
