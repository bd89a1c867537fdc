use crate::errors::InternalError;
use rand::RngCore;
use scrypt::Params;
use subtle::ConstantTimeEq;

const SALT_BYTES: usize = 16;
const KEY_BYTES: usize = 64;

// scrypt cost parameters: N = 2^14, r = 8, p = 1
const LOG_N: u8 = 14;
const R: u32 = 8;
const P: u32 = 1;

/// Hash a password with a fresh random salt.
///
/// The result is stored as `<derivedKeyHex>.<saltHex>`; the salt fed to the
/// KDF is the hex string's bytes, so verification only needs the stored
/// value itself.
///
/// # Errors
///
/// Returns `InternalError::Crypto` if key derivation fails.
pub fn hash_password(password: &str) -> Result<String, InternalError> {
    let mut salt = [0u8; SALT_BYTES];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt_hex = hex::encode(salt);

    let key = derive_key(password, &salt_hex)?;
    Ok(format!("{}.{}", hex::encode(key), salt_hex))
}

/// Verify a password against a stored `<derivedKeyHex>.<saltHex>` value.
///
/// Comparison is constant time. Any malformed stored value verifies as
/// false; this never errors on user-facing mismatches.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((key_hex, salt_hex)) = stored.split_once('.') else {
        return false;
    };
    let Ok(expected) = hex::decode(key_hex) else {
        return false;
    };
    if expected.len() != KEY_BYTES {
        return false;
    }
    let Ok(derived) = derive_key(password, salt_hex) else {
        return false;
    };
    bool::from(derived.as_slice().ct_eq(expected.as_slice()))
}

fn derive_key(password: &str, salt_hex: &str) -> Result<[u8; KEY_BYTES], InternalError> {
    let params = Params::new(LOG_N, R, P, KEY_BYTES)
        .map_err(|e| InternalError::crypto("scrypt_params", e.to_string()))?;
    let mut key = [0u8; KEY_BYTES];
    scrypt::scrypt(password.as_bytes(), salt_hex.as_bytes(), &params, &mut key)
        .map_err(|e| InternalError::crypto("scrypt_derive", e.to_string()))?;
    Ok(key)
}
