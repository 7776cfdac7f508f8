//! Field, group, and protocol microbenchmarks (NIST P-256).

use criterion::{criterion_group, criterion_main, Criterion};
use ecc_core::ecdsa;
use ecc_core::p256::{Context, FieldElement, ProjectivePoint, Scalar};
use hex_literal::hex;

fn bench_field(c: &mut Criterion) {
    let a = FieldElement::from_bytes(&hex!(
        "7cf27b188d034f7e8a52380304b51ac3c08969e277f21b35a60b48fc47669978"
    ))
    .unwrap();
    let b = a.square();

    c.bench_function("p256 field mul", |bench| bench.iter(|| a * b));
    c.bench_function("p256 field square", |bench| bench.iter(|| a.square()));
    c.bench_function("p256 field invert", |bench| bench.iter(|| a.invert()));
    c.bench_function("p256 field sqrt", |bench| bench.iter(|| a.sqrt()));
}

fn bench_group(c: &mut Criterion) {
    let ctx = Context::new();
    let k = Scalar::reduce_bytes(b"bench scalar, reduced mod the order.....");
    let p = ProjectivePoint::GENERATOR.mul(&k);

    c.bench_function("p256 mul_gen (comb)", |bench| {
        bench.iter(|| ctx.mul_gen(&k))
    });
    c.bench_function("p256 variable-base mul", |bench| bench.iter(|| p.mul(&k)));
    c.bench_function("p256 lincomb vartime", |bench| {
        let affine = p.to_affine();
        bench.iter(|| ctx.lincomb_vartime(&k, &affine, &k))
    });
}

fn bench_ecdsa(c: &mut Criterion) {
    let ctx = Context::new();
    let private_key = hex!("43f729cc1d9494feb28c1e1d36dbcddfdcd717988d51da888feabc9e55e171b8");
    let msg = hex!("51890598bff4a6468635e8d1903edc7e9bf4eba756e97f3ca01a2ca9365404ae");

    let (sig, _) = ecdsa::sign(&ctx, &msg, &private_key).unwrap();
    let mut sig_bytes = [0u8; 64];
    sig.to_bytes(&mut sig_bytes).unwrap();
    let mut public_key = [0u8; 33];
    ecdsa::public_key(&ctx, &private_key, true, &mut public_key).unwrap();

    c.bench_function("p256 ecdsa sign", |bench| {
        bench.iter(|| ecdsa::sign(&ctx, &msg, &private_key))
    });
    c.bench_function("p256 ecdsa verify", |bench| {
        bench.iter(|| ecdsa::verify(&ctx, &msg, &sig_bytes, &public_key))
    });
}

criterion_group!(benches, bench_field, bench_group, bench_ecdsa);
criterion_main!(benches);
