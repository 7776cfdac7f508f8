//! Ed25519 end-to-end vectors: RFC 8032 §7.1 plus a fixed-seed
//! deterministic vector, with blinding and malformed-input coverage.

use ecc_core::eddsa::Eddsa;
use hex_literal::hex;

struct Vector {
    seed: [u8; 32],
    public_key: [u8; 32],
    msg: &'static [u8],
    sig: [u8; 64],
}

fn check_vector(eddsa: &Eddsa, vector: &Vector) {
    assert_eq!(eddsa.public_key(&vector.seed).unwrap(), vector.public_key);
    assert_eq!(eddsa.sign(vector.msg, &vector.seed).unwrap(), vector.sig);
    eddsa
        .verify(vector.msg, &vector.sig, &vector.public_key)
        .unwrap();
}

#[test]
fn deterministic_vector() {
    let mut eddsa = Eddsa::new();
    check_vector(
        &eddsa,
        &Vector {
            seed: hex!("d74c0153c5cdf48b7b3e602c2e4b36af2be662e6d783845fc4960f16250d23be"),
            public_key: hex!("750dcf38c4579c65ea16160c51c6422d72763e697fd86d095e91733b1aab4b7e"),
            msg: &hex!("9d89d6bd578361a99f018b2348ed97f1dd06d179e7e1a2baee59560abe54af06"),
            sig: hex!(
                "e233f6440e5a88c8dc206bfb5ee24197292b89396b26390a4257067001575a06"
                "61955a70d9144f929efd0ff52012a87489e105954509762d82b269ec82527b08"
            ),
        },
    );

    // signatures are unchanged under blinding
    eddsa
        .randomize(&hex!(
            "202122232425262728292a2b2c2d2e2f303132333435363738393a3b3c3d3e3f"
        ))
        .unwrap();
    check_vector(
        &eddsa,
        &Vector {
            seed: hex!("d74c0153c5cdf48b7b3e602c2e4b36af2be662e6d783845fc4960f16250d23be"),
            public_key: hex!("750dcf38c4579c65ea16160c51c6422d72763e697fd86d095e91733b1aab4b7e"),
            msg: &hex!("9d89d6bd578361a99f018b2348ed97f1dd06d179e7e1a2baee59560abe54af06"),
            sig: hex!(
                "e233f6440e5a88c8dc206bfb5ee24197292b89396b26390a4257067001575a06"
                "61955a70d9144f929efd0ff52012a87489e105954509762d82b269ec82527b08"
            ),
        },
    );
}

#[test]
fn rfc8032_test_1_empty_message() {
    check_vector(
        &Eddsa::new(),
        &Vector {
            seed: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
            public_key: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
            msg: b"",
            sig: hex!(
                "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
                "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
            ),
        },
    );
}

#[test]
fn rfc8032_test_2_one_byte() {
    check_vector(
        &Eddsa::new(),
        &Vector {
            seed: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
            public_key: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
            msg: &[0x72],
            sig: hex!(
                "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
                "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
            ),
        },
    );
}

#[test]
fn malformed_inputs() {
    let eddsa = Eddsa::new();
    let seed = hex!("d74c0153c5cdf48b7b3e602c2e4b36af2be662e6d783845fc4960f16250d23be");
    let public_key = eddsa.public_key(&seed).unwrap();
    let msg = b"message";
    let sig = eddsa.sign(msg, &seed).unwrap();

    // wrong lengths
    assert!(eddsa.public_key(&seed[..31]).is_err());
    assert!(eddsa.verify(msg, &sig[..63], &public_key).is_err());
    assert!(eddsa.verify(msg, &sig, &public_key[..31]).is_err());

    // non-canonical S (add the group order): strict verification rejects
    let mut high_s = sig;
    high_s[32..].copy_from_slice(&hex!(
        "eed3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010"
    ));
    assert!(eddsa.verify(msg, &high_s, &public_key).is_err());
}
