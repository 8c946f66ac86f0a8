//! ML-DSA behavioral tests across parameter sets.

use pqchub::mldsa::{
    keypair, keypair_derand, sign, sign_derand, verify, MlDsa44, MlDsa65, MlDsa87, MlDsaParams,
    PublicKey, SecretKey, Signature,
};
use pqchub::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn roundtrip<P: MlDsaParams>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (pk, sk) = keypair::<P>(&mut rng);
    assert_eq!(pk.as_bytes().len(), P::PK_BYTES);
    assert_eq!(sk.as_bytes().len(), P::SK_BYTES);

    let msg = b"interoperability test message";
    let sig = sign::<P>(&sk, msg, &mut rng).unwrap();
    assert_eq!(sig.as_bytes().len(), P::SIG_BYTES);
    assert!(verify::<P>(&pk, msg, &sig));
    assert!(!verify::<P>(&pk, b"different message", &sig));
}

#[test]
fn roundtrip_all_sets() {
    roundtrip::<MlDsa44>(10);
    roundtrip::<MlDsa65>(11);
    roundtrip::<MlDsa87>(12);
}

#[test]
fn keypair_derand_is_reproducible() {
    let xi = [0x5Au8; 32];
    let (pk_a, sk_a) = keypair_derand::<MlDsa65>(&xi);
    let (pk_b, sk_b) = keypair_derand::<MlDsa65>(&xi);
    assert_eq!(pk_a.as_bytes(), pk_b.as_bytes());
    assert_eq!(sk_a.as_bytes(), sk_b.as_bytes());
}

#[test]
fn hedged_signatures_differ_but_both_verify() {
    let mut rng = StdRng::seed_from_u64(20);
    let (pk, sk) = keypair::<MlDsa44>(&mut rng);
    let sig_a = sign::<MlDsa44>(&sk, b"m", &mut rng).unwrap();
    let sig_b = sign::<MlDsa44>(&sk, b"m", &mut rng).unwrap();
    assert_ne!(sig_a.as_bytes(), sig_b.as_bytes());
    assert!(verify::<MlDsa44>(&pk, b"m", &sig_a));
    assert!(verify::<MlDsa44>(&pk, b"m", &sig_b));
}

#[test]
fn deterministic_signing_is_stable() {
    let (pk, sk) = keypair_derand::<MlDsa87>(&[9u8; 32]);
    let sig_a = sign_derand::<MlDsa87>(&sk, b"m").unwrap();
    let sig_b = sign_derand::<MlDsa87>(&sk, b"m").unwrap();
    assert_eq!(sig_a.as_bytes(), sig_b.as_bytes());
    assert!(verify::<MlDsa87>(&pk, b"m", &sig_a));
}

#[test]
fn empty_and_long_messages() {
    let (pk, sk) = keypair_derand::<MlDsa44>(&[1u8; 32]);
    for msg in [&b""[..], &[0xAB; 10_000][..]] {
        let sig = sign_derand::<MlDsa44>(&sk, msg).unwrap();
        assert!(verify::<MlDsa44>(&pk, msg, &sig));
    }
}

#[test]
fn megabyte_message_signs_and_verifies() {
    let (pk, sk) = keypair_derand::<MlDsa44>(&[3u8; 32]);
    let msg = vec![0xC3u8; (1 << 20) + 17];
    let sig = sign_derand::<MlDsa44>(&sk, &msg).unwrap();
    assert!(verify::<MlDsa44>(&pk, &msg, &sig));
}

#[test]
fn mangled_hint_region_is_rejected() {
    let (pk, sk) = keypair_derand::<MlDsa44>(&[2u8; 32]);
    let sig = sign_derand::<MlDsa44>(&sk, b"m").unwrap();

    // The hint block sits at the very end of the signature; a nonzero
    // byte in its padding makes the encoding non-canonical.
    let mut bytes = sig.as_bytes().to_vec();
    let len = bytes.len();
    bytes[len - MlDsa44::K - 2] = 0xFF;
    let mangled = Signature::<MlDsa44>::from_slice(&bytes).unwrap();
    assert!(!verify::<MlDsa44>(&pk, b"m", &mangled));
}

#[test]
fn truncated_inputs_error_cleanly() {
    let err = PublicKey::<MlDsa44>::from_slice(&[0u8; 100]).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidLength {
            expected: MlDsa44::PK_BYTES,
            actual: 100
        }
    );
    assert!(SecretKey::<MlDsa65>::from_slice(&[0u8; 10]).is_err());
    assert!(Signature::<MlDsa87>::from_slice(&[0u8; MlDsa87::SIG_BYTES]).is_ok());
}
