use rand::{rngs::OsRng, RngCore};

const KEY_BYTES: usize = 20;

/// Generate a fresh opaque token key: 20 bytes from the OS RNG, hex-encoded
/// to a 40-character string. Treated with the same sensitivity as a
/// password.
pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
