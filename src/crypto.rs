//! Password-based authenticated encryption for the vault file.
//!
//! Keys are derived with Argon2id from the password and a random salt; the
//! payload is sealed with ChaCha20-Poly1305 under a fresh nonce.

use anyhow::{Result, anyhow};
use argon2::Argon2;
use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::{TryRngCore, rngs::OsRng};
use zeroize::Zeroizing;

pub const SALT_LEN: usize = 16;
pub const NONCE_LEN: usize = 12;

/// Ciphertext together with the parameters needed to open it again.
pub struct Sealed {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

/// Derives the 256-bit cipher key. The key is wiped when dropped.
pub fn derive_key(password: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 32]>> {
    let mut key = Zeroizing::new([0u8; 32]);
    Argon2::default()
        .hash_password_into(password.as_bytes(), salt, key.as_mut_slice())
        .map_err(|e| anyhow!("Failed to derive encryption key using Argon2id: {}", e))?;
    Ok(key)
}

fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(bytes)
}

/// Encrypts `plaintext` under a key derived from `password`.
pub fn seal(plaintext: &[u8], password: &str) -> Result<Sealed> {
    let salt = random_bytes::<SALT_LEN>()?;
    let nonce = random_bytes::<NONCE_LEN>()?;
    let key = derive_key(password, &salt)?;

    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_slice()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| anyhow!("Encryption failed"))?;

    Ok(Sealed {
        salt,
        nonce,
        ciphertext,
    })
}

/// Decrypts `sealed`. Returns `None` when authentication fails, which in
/// practice means the password is wrong.
pub fn open(sealed: &Sealed, password: &str) -> Result<Option<Vec<u8>>> {
    let key = derive_key(password, &sealed.salt)?;
    let cipher = ChaCha20Poly1305::new(Key::from_slice(key.as_slice()));
    Ok(cipher
        .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_ref())
        .ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seal_then_open() {
        let sealed = seal(b"records", "pw").unwrap();
        assert_ne!(sealed.ciphertext, b"records");
        assert_eq!(open(&sealed, "pw").unwrap(), Some(b"records".to_vec()));
    }

    #[test]
    fn test_open_with_wrong_password() {
        let sealed = seal(b"records", "pw").unwrap();
        assert_eq!(open(&sealed, "other").unwrap(), None);
    }

    #[test]
    fn test_derive_key_is_deterministic_per_salt() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key("pw", &salt).unwrap();
        let b = derive_key("pw", &salt).unwrap();
        let c = derive_key("pw", &[8u8; SALT_LEN]).unwrap();
        assert_eq!(*a, *b);
        assert_ne!(*a, *c);
    }

    #[test]
    fn test_fresh_salt_and_nonce_per_seal() {
        let a = seal(b"x", "pw").unwrap();
        let b = seal(b"x", "pw").unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.nonce, b.nonce);
    }
}
