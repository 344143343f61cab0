//! Salted password hashing for employee credentials
//!
//! Stored form: `sha256$<salt>$<hex digest of salt || password>`.

use crate::error::{InventoryError, Result};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const SCHEME: &str = "sha256";

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    hash_with_salt(password, &salt)
}

/// Hash a password with the given salt
pub fn hash_with_salt(password: &str, salt: &str) -> String {
    format!("{}${}${}", SCHEME, salt, digest(salt, password))
}

/// Check a password against a stored credential
///
/// Returns an error when `stored` is not in the hashed form.
pub fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let (salt, expected) = parse(stored)?;
    Ok(constant_time_eq(digest(salt, password).as_bytes(), expected.as_bytes()))
}

/// Whether a stored value looks like a hashed credential
pub fn is_hashed(stored: &str) -> bool {
    parse(stored).is_ok()
}

fn parse(stored: &str) -> Result<(&str, &str)> {
    let mut parts = stored.splitn(3, '$');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(salt), Some(hash)) if !salt.is_empty() && hash.len() == 64 => {
            Ok((salt, hash))
        },
        _ => Err(InventoryError::Credential(
            "expected 'sha256$<salt>$<digest>'".to_string(),
        )),
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
