#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use std::sync::OnceLock;

use paillier_ipp::{Decrypt, Encrypt, KeyPair, RngSource};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    // Small primes keep iterations fast; requires `allow-weak-keys`.
    let keypair = KEYPAIR
        .get_or_init(|| KeyPair::generate_with_size(64, &mut RngSource::seeded(0)).unwrap());

    let m = BigUint::from_bytes_be(data);
    let mut rng = RngSource::seeded(data.len() as u64);

    let ciphertext = match keypair.encrypt(&m, &mut rng) {
        Ok(ct) => ct,
        Err(_) => {
            assert!(&m >= keypair.public_key().n(), "rejected an in-range plaintext");
            return;
        }
    };

    let decrypted = keypair.decrypt(&ciphertext).expect("decryption of a fresh ciphertext failed");
    assert_eq!(m, decrypted);
});
