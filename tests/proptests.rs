//! Property tests: field/scalar ring laws against `num-bigint`, group-law
//! invariants, and sign/verify/recover round-trips for random keys.

use ecc_core::ecdsa::{self, RecoveryId};
use ecc_core::eddsa::Eddsa;
use ecc_core::p256::{Context, FieldElement, ProjectivePoint, Scalar};
use num_bigint::BigUint;
use num_traits::One;
use proptest::prelude::*;

fn p256_modulus() -> BigUint {
    BigUint::parse_bytes(
        b"ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
        16,
    )
    .unwrap()
}

fn p256_order() -> BigUint {
    BigUint::parse_bytes(
        b"ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
        16,
    )
    .unwrap()
}

fn fe_to_biguint(fe: &FieldElement) -> BigUint {
    let mut bytes = [0u8; 32];
    fe.to_bytes(&mut bytes);
    BigUint::from_bytes_be(&bytes)
}

fn fe_from_biguint(value: &BigUint) -> FieldElement {
    let bytes = value.to_bytes_be();
    let mut buf = [0u8; 32];
    buf[32 - bytes.len()..].copy_from_slice(&bytes);
    FieldElement::from_bytes(&buf).unwrap()
}

prop_compose! {
    fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
        let value = BigUint::from_bytes_be(&bytes) % p256_modulus();
        fe_from_biguint(&value)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn field_add_matches_bigint(a in field_element(), b in field_element()) {
        let expected = (fe_to_biguint(&a) + fe_to_biguint(&b)) % p256_modulus();
        prop_assert_eq!(fe_to_biguint(&(a + b)), expected);
    }

    #[test]
    fn field_sub_matches_bigint(a in field_element(), b in field_element()) {
        let m = p256_modulus();
        let expected = (&m + fe_to_biguint(&a) - fe_to_biguint(&b)) % &m;
        prop_assert_eq!(fe_to_biguint(&(a - b)), expected);
    }

    #[test]
    fn field_mul_matches_bigint(a in field_element(), b in field_element()) {
        let expected = (fe_to_biguint(&a) * fe_to_biguint(&b)) % p256_modulus();
        prop_assert_eq!(fe_to_biguint(&(a * b)), expected);
    }

    #[test]
    fn field_invert_is_inverse(a in field_element()) {
        prop_assume!(!bool::from(a.is_zero()));
        let inv = a.invert().unwrap();
        prop_assert_eq!(fe_to_biguint(&(a * inv)), BigUint::one());
    }

    #[test]
    fn field_roundtrip(a in field_element()) {
        let mut bytes = [0u8; 32];
        a.to_bytes(&mut bytes);
        prop_assert_eq!(FieldElement::from_bytes(&bytes).unwrap(), a);
    }

    #[test]
    fn scalar_wide_reduction_matches_bigint(bytes in any::<[u8; 64]>()) {
        let expected = BigUint::from_bytes_be(&bytes) % p256_order();
        let reduced = Scalar::reduce_bytes(&bytes);
        let mut out = [0u8; 32];
        reduced.to_bytes(&mut out);
        prop_assert_eq!(BigUint::from_bytes_be(&out), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn group_laws(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let ka = Scalar::reduce_bytes(&a);
        let kb = Scalar::reduce_bytes(&b);
        let g = ProjectivePoint::GENERATOR;

        let pa = g.mul(&ka);
        let pb = g.mul(&kb);

        // every multiple stays on the curve
        prop_assert!(bool::from(pa.is_on_curve()));

        // commutativity and the scalar homomorphism
        prop_assert_eq!(pa.add(&pb), pb.add(&pa));
        prop_assert_eq!(pa.add(&pb), g.mul(&(ka + kb)));

        // associativity against mixed addition
        let sum = pa.add(&pb).add(&g);
        let sum_mixed = pa.add_mixed(&pb.to_affine()).add_mixed(&g.to_affine());
        prop_assert_eq!(sum, sum_mixed);
    }
}

#[test]
fn order_times_generator_is_identity() {
    // n == 0 (mod n), so the comb over n must produce the identity
    let ctx = Context::new();
    assert_eq!(ctx.mul_gen(&Scalar::ZERO), ProjectivePoint::IDENTITY);

    // (n - 1) G == -G
    let minus_one = -Scalar::ONE;
    assert_eq!(
        ctx.mul_gen(&minus_one),
        ProjectivePoint::GENERATOR.neg()
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn ecdsa_sign_verify_recover_roundtrip(
        priv_bytes in any::<[u8; 32]>(),
        msg in any::<[u8; 32]>(),
    ) {
        let ctx = Context::new();
        let d = Scalar::reduce_bytes(&priv_bytes);
        prop_assume!(!bool::from(d.is_zero()));
        let mut private_key = [0u8; 32];
        d.to_bytes(&mut private_key);

        let (sig, rid) = ecdsa::sign(&ctx, &msg, &private_key).unwrap();
        let mut sig_bytes = [0u8; 64];
        sig.to_bytes(&mut sig_bytes).unwrap();

        let mut public_key = [0u8; 33];
        ecdsa::public_key(&ctx, &private_key, true, &mut public_key).unwrap();

        ecdsa::verify(&ctx, &msg, &sig_bytes, &public_key).unwrap();

        let mut recovered = [0u8; 33];
        ecdsa::recover(
            &ctx,
            &msg,
            &sig_bytes,
            RecoveryId::from_byte(rid.to_byte()).unwrap(),
            true,
            &mut recovered,
        )
        .unwrap();
        prop_assert_eq!(recovered, public_key);
    }

    #[test]
    fn eddsa_sign_verify_roundtrip(seed in any::<[u8; 32]>(), msg in any::<[u8; 48]>()) {
        let eddsa = Eddsa::new();
        let public_key = eddsa.public_key(&seed).unwrap();
        let sig = eddsa.sign(&msg, &seed).unwrap();
        eddsa.verify(&msg, &sig, &public_key).unwrap();
    }
}
