use crate::kernel::error::Error;
use crate::services::encryption::{Cipher, Encrypter, DEFAULT_CIPHER};
use crate::services::error::ServiceError;

#[test]
fn test_cipher_parsing() {
    assert_eq!("aes-256-gcm".parse::<Cipher>().unwrap(), Cipher::Aes256Gcm);
    assert_eq!(" XChaCha20-Poly1305 ".parse::<Cipher>().unwrap(), Cipher::XChaCha20Poly1305);
    assert_eq!(DEFAULT_CIPHER.to_string(), "AES-256-GCM");
    assert!(matches!(
        "AES-256-CBC".parse::<Cipher>(),
        Err(Error::Service(ServiceError::UnsupportedCipher(_)))
    ));
}

#[test]
fn test_encrypt_decrypt_with_both_ciphers() {
    for cipher in [Cipher::Aes256Gcm, Cipher::XChaCha20Poly1305] {
        let encrypter = Encrypter::new(Encrypter::generate_key(cipher), cipher).unwrap();
        let payload = encrypter.encrypt_string("secret value").unwrap();

        assert_ne!(payload, "secret value");
        assert_eq!(encrypter.decrypt_string(&payload).unwrap(), "secret value");
        // Random nonce per message
        assert_ne!(payload, encrypter.encrypt_string("secret value").unwrap());
    }
}

#[test]
fn test_wrong_key_fails() {
    let first = Encrypter::new(Encrypter::generate_key(Cipher::Aes256Gcm), Cipher::Aes256Gcm).unwrap();
    let second = Encrypter::new(Encrypter::generate_key(Cipher::Aes256Gcm), Cipher::Aes256Gcm).unwrap();

    let payload = first.encrypt(b"data").unwrap();
    assert!(matches!(
        second.decrypt(&payload),
        Err(Error::Service(ServiceError::DecryptionFailed))
    ));
}

#[test]
fn test_tampered_and_malformed_payloads() {
    let encrypter = Encrypter::from_hex_key(Some("11".repeat(32).as_str()), Cipher::XChaCha20Poly1305).unwrap();
    let mut payload = encrypter.encrypt(b"data").unwrap().into_bytes();
    let last = payload.len() - 1;
    payload[last] = if payload[last] == b'0' { b'1' } else { b'0' };
    let tampered = String::from_utf8(payload).unwrap();

    assert!(matches!(
        encrypter.decrypt(&tampered),
        Err(Error::Service(ServiceError::DecryptionFailed))
    ));
    assert!(matches!(
        encrypter.decrypt("not hex"),
        Err(Error::Service(ServiceError::InvalidPayload(_)))
    ));
    assert!(matches!(
        encrypter.decrypt("abcd"),
        Err(Error::Service(ServiceError::InvalidPayload(_)))
    ));
}

#[test]
fn test_key_validation() {
    assert!(matches!(
        Encrypter::new(vec![0u8; 16], Cipher::Aes256Gcm),
        Err(Error::Service(ServiceError::InvalidKey { expected: 32, actual: 16, .. }))
    ));
    assert!(matches!(
        Encrypter::from_hex_key(Some("zz"), Cipher::Aes256Gcm),
        Err(Error::Service(ServiceError::InvalidKeyEncoding(_)))
    ));
    // Missing key falls back to a generated one
    assert!(Encrypter::from_hex_key(None, Cipher::Aes256Gcm).is_ok());
    assert!(Encrypter::from_hex_key(Some("  "), Cipher::Aes256Gcm).is_ok());
}

#[test]
fn test_generated_hex_key_round_trips() {
    let key = Encrypter::generate_key_hex(Cipher::XChaCha20Poly1305);
    assert_eq!(key.len(), 64);
    let encrypter = Encrypter::from_hex_key(Some(key.as_str()), Cipher::XChaCha20Poly1305).unwrap();
    let payload = encrypter.encrypt_string("kept").unwrap();
    assert_eq!(encrypter.decrypt_string(&payload).unwrap(), "kept");
}
