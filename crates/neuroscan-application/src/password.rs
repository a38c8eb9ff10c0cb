//! Password hashing.
//!
//! Salted, iterated SHA-256 (100k rounds) with a per-user random salt.
//! Stored form is `base64url(salt)$base64url(digest)`. Comparison runs in
//! constant time over the digest bytes.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const ROUNDS: u32 = 100_000;
const SALT_LEN: usize = 16;

/// Hashes a plaintext password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let digest = iterate(&salt, password);
    format!(
        "{}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(digest)
    )
}

/// Checks a plaintext password against a stored hash.
///
/// Returns `false` for unparseable stored values rather than erroring;
/// a corrupt hash must behave exactly like a wrong password.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_b64, digest_b64)) = stored.split_once('$') else {
        return false;
    };
    let Ok(salt) = URL_SAFE_NO_PAD.decode(salt_b64) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(digest_b64) else {
        return false;
    };

    let computed = iterate(&salt, password);
    bool::from(computed.as_slice().ct_eq(expected.as_slice()))
}

fn iterate(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest: [u8; 32] = hasher.finalize().into();

    for _ in 1..ROUNDS {
        digest = Sha256::digest(digest).into();
    }
    digest
}
