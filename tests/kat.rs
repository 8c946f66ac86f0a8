//! KAT-style regression test for ML-KEM.
//!
//! Draws keypair and encapsulation coins from the NIST AES-256-CTR DRBG,
//! formats a single-case transcript, and checks its SHA-256 against pinned
//! digests. The digests lock the full byte-level output (keys, ciphertext,
//! shared secret) for each parameter set; any arithmetic or serialisation
//! regression changes them.

use aes::cipher::{BlockEncrypt, KeyInit};
use sha2::{Digest, Sha256};

use pqchub::mlkem::{
    decapsulate, encapsulate_derand, keypair_derand, MlKem1024, MlKem512, MlKem768, MlKemParams,
};

// ---------------------------------------------------------------------------
// AES-256-CTR DRBG (NIST SP 800-90A, KAT reproducibility only)
// ---------------------------------------------------------------------------

struct NistDrbg {
    key: [u8; 32],
    v: [u8; 16],
}

fn increment_be(v: &mut [u8; 16]) {
    for byte in v.iter_mut().rev() {
        if *byte == 0xFF {
            *byte = 0;
        } else {
            *byte += 1;
            break;
        }
    }
}

impl NistDrbg {
    fn new(entropy: &[u8; 48]) -> Self {
        let mut drbg = NistDrbg {
            key: [0; 32],
            v: [0; 16],
        };
        drbg.update(Some(entropy));
        drbg
    }

    fn update(&mut self, provided: Option<&[u8; 48]>) {
        let cipher = aes::Aes256::new(self.key.as_slice().into());
        let mut temp = [0u8; 48];
        for chunk in temp.chunks_mut(16) {
            increment_be(&mut self.v);
            let mut block = aes::Block::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block);
        }
        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data.iter()) {
                *t ^= d;
            }
        }
        self.key.copy_from_slice(&temp[..32]);
        self.v.copy_from_slice(&temp[32..]);
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        let cipher = aes::Aes256::new(self.key.as_slice().into());
        for chunk in buf.chunks_mut(16) {
            increment_be(&mut self.v);
            let mut block = aes::Block::clone_from_slice(&self.v);
            cipher.encrypt_block(&mut block);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }
        self.update(None);
    }
}

/// Uppercase hex, matching the NIST KAT response format.
fn hex_upper(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect()
}

/// Run the first KAT case and hash the formatted transcript.
fn run_nist_kat_case<P: MlKemParams>() -> String {
    let entropy: [u8; 48] = core::array::from_fn(|i| i as u8);
    let mut drbg = NistDrbg::new(&entropy);

    let mut seed = [0u8; 48];
    drbg.fill_bytes(&mut seed);
    drbg = NistDrbg::new(&seed);

    let mut keypair_coins = [0u8; 64];
    drbg.fill_bytes(&mut keypair_coins);
    let (pk, sk) = keypair_derand::<P>(&keypair_coins);

    let mut enc_coins = [0u8; 32];
    drbg.fill_bytes(&mut enc_coins);
    let (ct, ss_enc) = encapsulate_derand::<P>(&pk, &enc_coins);

    let ss_dec = decapsulate::<P>(&ct, &sk);
    assert_eq!(
        ss_enc.as_ref(),
        ss_dec.as_ref(),
        "KAT: encapsulate and decapsulate shared secrets must match"
    );

    let transcript = format!(
        "count = 0\nseed = {}\npk = {}\nsk = {}\nct = {}\nss = {}\n",
        hex_upper(&seed),
        hex_upper(pk.as_bytes()),
        hex_upper(sk.as_bytes()),
        hex_upper(ct.as_bytes()),
        hex_upper(ss_enc.as_ref()),
    );

    hex::encode(Sha256::digest(transcript.as_bytes()))
}

#[test]
fn nist_kat_mlkem512() {
    assert_eq!(
        run_nist_kat_case::<MlKem512>(),
        "c70041a761e01cd6426fa60e9fd6a4412c2be817386c8d0f3334898082512782",
        "ML-KEM-512 NIST KAT SHA-256 mismatch"
    );
}

#[test]
fn nist_kat_mlkem768() {
    assert_eq!(
        run_nist_kat_case::<MlKem768>(),
        "5352539586b6c3df58be6158a6250aeff402bd73060b0a3de68850ac074c17c3",
        "ML-KEM-768 NIST KAT SHA-256 mismatch"
    );
}

#[test]
fn nist_kat_mlkem1024() {
    assert_eq!(
        run_nist_kat_case::<MlKem1024>(),
        "f580d851e5fb27e6876e5e203fa18be4cdbfd49e05d48fec3d3992c8f43a13e6",
        "ML-KEM-1024 NIST KAT SHA-256 mismatch"
    );
}
