use bcrypt::{DEFAULT_COST, hash, verify};

/// hash_password
///
/// One-way, salted hashing of a plaintext password using bcrypt at the default
/// adaptive cost. The resulting string embeds the salt and cost factor, so no
/// separate salt storage is needed.
pub fn hash_password(plaintext: &str) -> Result<String, bcrypt::BcryptError> {
    hash(plaintext, DEFAULT_COST)
}

/// verify_password
///
/// Recomputes the hash of `plaintext` against the salt embedded in `hashed`
/// and compares. Malformed hash input is reported as a mismatch rather than
/// an error, so callers get a plain boolean on every input.
pub fn verify_password(plaintext: &str, hashed: &str) -> bool {
    verify(plaintext, hashed).unwrap_or(false)
}
