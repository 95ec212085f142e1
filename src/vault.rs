//! Encrypted vault file: the default [`StorageEngine`].
//!
//! The file is a small JSON envelope holding base64 encoded key derivation
//! salt, nonce and ciphertext. The plaintext is the JSON list of raw records.

use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::crypto::{self, NONCE_LEN, SALT_LEN, Sealed};
use crate::engine::{RawRecord, StorageEngine};
use crate::error::DbError;

const FORMAT_VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u8,
    argon2_salt: String,      // Base64 encoded
    encryption_nonce: String, // Base64 encoded
    encrypted_data: String,   // Base64 encoded
}

impl Envelope {
    fn from_sealed(sealed: &Sealed) -> Self {
        Self {
            version: FORMAT_VERSION,
            argon2_salt: general_purpose::STANDARD.encode(sealed.salt),
            encryption_nonce: general_purpose::STANDARD.encode(sealed.nonce),
            encrypted_data: general_purpose::STANDARD.encode(&sealed.ciphertext),
        }
    }

    fn to_sealed(&self) -> Result<Sealed> {
        if self.version != FORMAT_VERSION {
            return Err(anyhow!("unsupported vault version {}", self.version));
        }
        let salt: [u8; SALT_LEN] = decode_fixed(&self.argon2_salt, "salt")?;
        let nonce: [u8; NONCE_LEN] = decode_fixed(&self.encryption_nonce, "nonce")?;
        let ciphertext = general_purpose::STANDARD.decode(&self.encrypted_data)?;
        Ok(Sealed {
            salt,
            nonce,
            ciphertext,
        })
    }
}

fn decode_fixed<const N: usize>(encoded: &str, what: &str) -> Result<[u8; N]> {
    let bytes = general_purpose::STANDARD.decode(encoded)?;
    bytes
        .try_into()
        .map_err(|_| anyhow!("{} must be {} bytes", what, N))
}

fn load_envelope(path: &Path) -> Result<Envelope> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(anyhow!("vault file is empty"));
    }
    Ok(serde_json::from_str(&content)?)
}

fn corrupt(path: &Path, err: impl std::fmt::Display) -> DbError {
    DbError::Corrupt {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

/// Stores records in a single encrypted file.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaultEngine;

impl VaultEngine {
    pub fn new() -> Self {
        Self
    }

    fn decrypt(&self, path: &Path, password: &str) -> Result<Vec<u8>, DbError> {
        if !path.exists() {
            return Err(DbError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let sealed = load_envelope(path)
            .and_then(|envelope| envelope.to_sealed())
            .map_err(|e| corrupt(path, e))?;
        match crypto::open(&sealed, password).map_err(|e| corrupt(path, e))? {
            Some(plaintext) => Ok(plaintext),
            None => Err(DbError::WrongPassword {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl StorageEngine for VaultEngine {
    fn read(&self, path: &Path, password: &str) -> Result<Vec<RawRecord>, DbError> {
        let plaintext = self.decrypt(path, password)?;
        let records: Vec<RawRecord> =
            serde_json::from_slice(&plaintext).map_err(|e| corrupt(path, e))?;
        log::debug!("Decrypted {} raw records from {}", records.len(), path.display());
        Ok(records)
    }

    fn write(&self, path: &Path, password: &str, records: &[RawRecord]) -> Result<(), DbError> {
        let plaintext =
            serde_json::to_vec(records).map_err(|e| DbError::Conversion(e.to_string()))?;
        let sealed =
            crypto::seal(&plaintext, password).map_err(|e| DbError::Conversion(e.to_string()))?;
        let json = serde_json::to_string_pretty(&Envelope::from_sealed(&sealed))
            .map_err(|e| DbError::Conversion(e.to_string()))?;

        let io_err = |source: std::io::Error| DbError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;

        log::debug!("Wrote {} raw records to {}", records.len(), path.display());
        Ok(())
    }

    fn check_password(&self, path: &Path, password: &str) -> bool {
        self.decrypt(path, password).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::codes;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    fn sample() -> Vec<RawRecord> {
        let mut raw = RawRecord::new();
        raw.push(codes::TITLE, "mail");
        raw.push(codes::PASSWORD, "s3cr3t");
        vec![raw]
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.db");
        let engine = VaultEngine::new();

        engine.write(&path, "pw", &sample()).unwrap();
        assert!(engine.exists(&path));
        assert!(!dir.path().join("vault.tmp").exists());
        assert_eq!(engine.read(&path, "pw").unwrap(), sample());
    }

    #[test]
    fn test_file_does_not_leak_plaintext() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.db");
        VaultEngine::new().write(&path, "pw", &sample()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("s3cr3t"));
        assert!(content.contains("argon2_salt"));
    }

    #[test]
    fn test_error_kinds() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.db");
        let engine = VaultEngine::new();

        let err = engine.read(&path, "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        engine.write(&path, "pw", &sample()).unwrap();
        let err = engine.read(&path, "wrong").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongPassword);
        assert!(engine.check_password(&path, "pw"));
        assert!(!engine.check_password(&path, "wrong"));

        fs::write(&path, "{ not json").unwrap();
        let err = engine.read(&path, "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptOrUnreadable);

        fs::write(&path, "").unwrap();
        let err = engine.read(&path, "pw").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptOrUnreadable);
    }
}
