use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::Error;

pub fn hash_password(password: &str) -> Result<String, Error> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// Malformed stored hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    verify(password, stored).unwrap_or(false)
}

#[test]
fn verify_password_test() {
    let stored = hash_password("correct horse").unwrap();

    assert!(stored.starts_with("$2b$"));
    assert!(verify_password("correct horse", &stored));
    assert!(!verify_password("battery staple", &stored));
}

#[test]
fn hash_password_salt_test() {
    let first = hash_password("same").unwrap();
    let second = hash_password("same").unwrap();

    assert_ne!(first, second);
    assert!(verify_password("same", &first));
    assert!(verify_password("same", &second));
}

#[test]
fn malformed_hash_test() {
    assert!(!verify_password("anything", "not-a-hash"));
    assert!(!verify_password("anything", ""));
}
