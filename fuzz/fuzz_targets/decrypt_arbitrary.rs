#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use paillier_ipp::{Ciphertext, Decrypt, ErrorKind, KeyPair, RngSource};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let keypair = KEYPAIR
        .get_or_init(|| KeyPair::generate_with_size(64, &mut RngSource::seeded(2)).unwrap());

    // Must return an error or a plaintext below n, never panic.
    match keypair.decrypt(&Ciphertext::from(data)) {
        Ok(m) => assert!(&m < keypair.public_key().n()),
        Err(err) => assert_eq!(err.kind(), ErrorKind::InvalidCiphertext),
    }
});
