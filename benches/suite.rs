//! Benchmarks across the whole suite.
//!
//! ML-KEM and ML-DSA use their derandomized entry points so every
//! iteration does identical work. Falcon key generation is excluded
//! from the timed loops; one keypair per parameter set is generated
//! up front and reused.

use core::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pqchub::falcon::{self, Falcon512, Falcon1024, FalconParams};
use pqchub::mldsa::{self, MlDsa44, MlDsa65, MlDsa87, MlDsaParams};
use pqchub::mlkem::{
    decapsulate, encapsulate_derand, keypair_derand, MlKem512, MlKem768, MlKem1024, MlKemParams,
};

fn fixed_keygen_coins(tag: u8) -> [u8; 64] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(37)))
}

fn fixed_enc_coins(tag: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(tag.wrapping_mul(53)))
}

fn bench_mlkem<P: MlKemParams>(c: &mut Criterion, label: &str, tag: u8) {
    let keygen_coins = fixed_keygen_coins(tag);
    let enc_coins = fixed_enc_coins(tag);
    let (pk, sk) = keypair_derand::<P>(&keygen_coins);
    let (ct, _) = encapsulate_derand::<P>(&pk, &enc_coins);

    c.bench_function(&format!("{label}/keypair_derand"), |b| {
        b.iter(|| {
            let out = keypair_derand::<P>(black_box(&keygen_coins));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/encapsulate_derand"), |b| {
        b.iter(|| {
            let out = encapsulate_derand::<P>(black_box(&pk), black_box(&enc_coins));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/decapsulate"), |b| {
        b.iter(|| {
            let out = decapsulate::<P>(black_box(&ct), black_box(&sk));
            black_box(out);
        });
    });
}

fn bench_mldsa<P: MlDsaParams>(c: &mut Criterion, label: &str, tag: u8) {
    let xi: [u8; 32] = core::array::from_fn(|i| (i as u8).wrapping_add(tag));
    let (pk, sk) = mldsa::keypair_derand::<P>(&xi);
    let msg = b"benchmark message";
    let sig = mldsa::sign_derand::<P>(&sk, msg).unwrap();

    c.bench_function(&format!("{label}/keypair_derand"), |b| {
        b.iter(|| {
            let out = mldsa::keypair_derand::<P>(black_box(&xi));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/sign_derand"), |b| {
        b.iter(|| {
            let out = mldsa::sign_derand::<P>(black_box(&sk), black_box(msg));
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/verify"), |b| {
        b.iter(|| {
            let ok = mldsa::verify::<P>(black_box(&pk), black_box(msg), black_box(&sig));
            black_box(ok);
        });
    });
}

fn bench_falcon<P: FalconParams>(c: &mut Criterion, label: &str, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (pk, sk) = falcon::keypair::<P>(&mut rng).unwrap();
    let msg = b"benchmark message";
    let sig = falcon::sign::<P>(&sk, msg, &mut rng).unwrap();

    c.bench_function(&format!("{label}/sign"), |b| {
        b.iter(|| {
            let out = falcon::sign::<P>(black_box(&sk), black_box(msg), &mut rng);
            black_box(out);
        });
    });

    c.bench_function(&format!("{label}/verify"), |b| {
        b.iter(|| {
            let ok = falcon::verify::<P>(black_box(&pk), black_box(msg), black_box(&sig));
            black_box(ok);
        });
    });
}

fn mlkem_benches(c: &mut Criterion) {
    bench_mlkem::<MlKem512>(c, "mlkem512", 1);
    bench_mlkem::<MlKem768>(c, "mlkem768", 2);
    bench_mlkem::<MlKem1024>(c, "mlkem1024", 3);
}

fn mldsa_benches(c: &mut Criterion) {
    bench_mldsa::<MlDsa44>(c, "mldsa44", 4);
    bench_mldsa::<MlDsa65>(c, "mldsa65", 5);
    bench_mldsa::<MlDsa87>(c, "mldsa87", 6);
}

fn falcon_benches(c: &mut Criterion) {
    bench_falcon::<Falcon512>(c, "falcon512", 7);
    bench_falcon::<Falcon1024>(c, "falcon1024", 8);
}

criterion_group!(benches, mlkem_benches, mldsa_benches, falcon_benches);
criterion_main!(benches);
