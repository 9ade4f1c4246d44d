use sha2::{Digest, Sha256};

/// Sessions are stored by token hash, never by the raw token.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
