#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use std::sync::OnceLock;

use paillier_ipp::{Decrypt, Encrypt, Homomorphic, KeyPair, RngSource};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let keypair = KEYPAIR
        .get_or_init(|| KeyPair::generate_with_size(64, &mut RngSource::seeded(1)).unwrap());
    let public_key = keypair.public_key();
    let n = public_key.n();

    let (m1_bytes, m2_bytes) = data.split_at(data.len() / 2);
    let m1 = BigUint::from_bytes_be(m1_bytes) % n;
    let m2 = BigUint::from_bytes_be(m2_bytes) % n;
    let mut rng = RngSource::seeded(data[0] as u64);

    let c1 = public_key.encrypt(&m1, &mut rng).unwrap();
    let c2 = public_key.encrypt(&m2, &mut rng).unwrap();

    let sum = public_key.ciphertext_product(&c1, &c2).unwrap();
    assert_eq!(keypair.decrypt(&sum).unwrap(), (&m1 + &m2) % n);

    let scaled = public_key.ciphertext_pow(&c1, &m2).unwrap();
    assert_eq!(keypair.decrypt(&scaled).unwrap(), (&m1 * &m2) % n);

    let neg = public_key.ciphertext_neg(&c2).unwrap();
    assert_eq!(keypair.decrypt(&neg).unwrap(), (n - &m2) % n);
});
