//! Symmetric authenticated encryption for application payloads.
//!
//! Payloads are hex encoded `nonce || ciphertext`; the nonce is random per
//! message.
use std::fmt;
use std::str::FromStr;

use aes_gcm::Aes256Gcm;
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use rand::RngCore;

use crate::container::Service;
use crate::kernel::error::{Error, Result};
use crate::services::error::ServiceError;

/// Cipher used when `APP_CIPHER` is not set.
pub const DEFAULT_CIPHER: Cipher = Cipher::Aes256Gcm;

/// Supported AEAD ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    Aes256Gcm,
    XChaCha20Poly1305,
}

impl Cipher {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cipher::Aes256Gcm => "AES-256-GCM",
            Cipher::XChaCha20Poly1305 => "XCHACHA20-POLY1305",
        }
    }

    pub fn key_len(&self) -> usize {
        32
    }

    pub fn nonce_len(&self) -> usize {
        match self {
            Cipher::Aes256Gcm => 12,
            Cipher::XChaCha20Poly1305 => 24,
        }
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cipher {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AES-256-GCM" => Ok(Cipher::Aes256Gcm),
            "XCHACHA20-POLY1305" => Ok(Cipher::XChaCha20Poly1305),
            _ => Err(ServiceError::UnsupportedCipher(s.to_string()).into()),
        }
    }
}

/// Encrypts and decrypts strings and bytes with a fixed key.
pub struct Encrypter {
    key: Vec<u8>,
    cipher: Cipher,
}

impl Service for Encrypter {
    const ID: &'static str = "hearth.encrypter";
}

impl Encrypter {
    pub fn new(key: Vec<u8>, cipher: Cipher) -> Result<Self> {
        if key.len() != cipher.key_len() {
            return Err(ServiceError::InvalidKey {
                cipher: cipher.to_string(),
                expected: cipher.key_len(),
                actual: key.len(),
            }
            .into());
        }
        Ok(Self { key, cipher })
    }

    /// Build from a hex key. Without a key a random one is generated, so
    /// payloads only survive for the lifetime of the process.
    pub fn from_hex_key(key: Option<&str>, cipher: Cipher) -> Result<Self> {
        let key = match key.map(str::trim).filter(|k| !k.is_empty()) {
            Some(hex_key) => hex::decode(hex_key).map_err(|e| ServiceError::InvalidKeyEncoding(e.to_string()))?,
            None => {
                log::warn!("APP_KEY is not set, using an ephemeral encryption key");
                Self::generate_key(cipher)
            }
        };
        Self::new(key, cipher)
    }

    /// Random key suitable for `cipher`.
    pub fn generate_key(cipher: Cipher) -> Vec<u8> {
        let mut key = vec![0u8; cipher.key_len()];
        rand::thread_rng().fill_bytes(&mut key);
        key
    }

    /// [`Encrypter::generate_key`], hex encoded as `APP_KEY` expects.
    pub fn generate_key_hex(cipher: Cipher) -> String {
        hex::encode(Self::generate_key(cipher))
    }

    pub fn cipher(&self) -> Cipher {
        self.cipher
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let mut nonce = vec![0u8; self.cipher.nonce_len()];
        rand::thread_rng().fill_bytes(&mut nonce);

        let ciphertext = match self.cipher {
            Cipher::Aes256Gcm => Aes256Gcm::new_from_slice(&self.key)
                .map_err(|e| ServiceError::EncryptionFailed(e.to_string()))?
                .encrypt(aes_gcm::Nonce::from_slice(&nonce), plaintext),
            Cipher::XChaCha20Poly1305 => XChaCha20Poly1305::new_from_slice(&self.key)
                .map_err(|e| ServiceError::EncryptionFailed(e.to_string()))?
                .encrypt(XNonce::from_slice(&nonce), plaintext),
        }
        .map_err(|e| ServiceError::EncryptionFailed(e.to_string()))?;

        nonce.extend_from_slice(&ciphertext);
        Ok(hex::encode(nonce))
    }

    pub fn encrypt_string(&self, plaintext: &str) -> Result<String> {
        self.encrypt(plaintext.as_bytes())
    }

    pub fn decrypt(&self, payload: &str) -> Result<Vec<u8>> {
        let bytes = hex::decode(payload.trim()).map_err(|e| ServiceError::InvalidPayload(e.to_string()))?;
        let nonce_len = self.cipher.nonce_len();
        if bytes.len() <= nonce_len {
            return Err(ServiceError::InvalidPayload("payload is shorter than its nonce".to_string()).into());
        }
        let (nonce, ciphertext) = bytes.split_at(nonce_len);

        let plaintext = match self.cipher {
            Cipher::Aes256Gcm => Aes256Gcm::new_from_slice(&self.key)
                .map_err(|e| ServiceError::EncryptionFailed(e.to_string()))?
                .decrypt(aes_gcm::Nonce::from_slice(nonce), ciphertext),
            Cipher::XChaCha20Poly1305 => XChaCha20Poly1305::new_from_slice(&self.key)
                .map_err(|e| ServiceError::EncryptionFailed(e.to_string()))?
                .decrypt(XNonce::from_slice(nonce), ciphertext),
        };
        plaintext.map_err(|_| ServiceError::DecryptionFailed.into())
    }

    pub fn decrypt_string(&self, payload: &str) -> Result<String> {
        let bytes = self.decrypt(payload)?;
        String::from_utf8(bytes).map_err(|e| ServiceError::InvalidPayload(e.to_string()).into())
    }
}

impl fmt::Debug for Encrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encrypter")
            .field("cipher", &self.cipher)
            .finish_non_exhaustive()
    }
}
