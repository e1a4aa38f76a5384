//! Per-administrator secret keys.
//!
//! A secret key is 16 random decimal digits. It is never derived from the
//! password and is the only credential whose change revokes issued tokens.

use rand::{Rng, rng};

/// Length of every secret key.
pub const SECRET_KEY_LEN: usize = 16;

/// Generate a fresh secret key.
pub fn generate_secret_key() -> String {
    let mut rng = rng();
    (0..SECRET_KEY_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// True when `key` has the fixed length and consists only of ASCII digits.
pub fn is_well_formed(key: &str) -> bool {
    key.len() == SECRET_KEY_LEN && key.bytes().all(|b| b.is_ascii_digit())
}
