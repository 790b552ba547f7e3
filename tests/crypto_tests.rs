//! Integration tests for the PassVault crypto module.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

use passvault::crypto::{
    decrypt, derive_key, encrypt, generate_salt, salt_from_identifier, EncryptedRecord,
};
use passvault::errors::PassVaultError;

fn assert_decryption_failed(result: passvault::errors::Result<zeroize::Zeroizing<String>>) {
    assert!(
        matches!(result, Err(PassVaultError::DecryptionFailed)),
        "expected DecryptionFailed"
    );
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip_various_inputs() {
    let key = derive_key("round-trip-password", &generate_salt()).expect("derive");

    let long = "x".repeat(4096);
    let inputs = ["", "P@ssw0rd!", "pässwörd — 密码 — 🔐", long.as_str()];

    for plaintext in inputs {
        let record = encrypt(plaintext, &key).expect("encrypt should succeed");
        let recovered = decrypt(&record, &key).expect("decrypt should succeed");
        assert_eq!(recovered.as_str(), plaintext);
    }
}

#[test]
fn encrypt_produces_different_nonce_and_ciphertext_each_time() {
    let key = derive_key("nonce-password", &generate_salt()).expect("derive");

    let r1 = encrypt("SECRET=hello", &key).expect("encrypt 1");
    let r2 = encrypt("SECRET=hello", &key).expect("encrypt 2");

    // Each call generates a new random nonce, so both fields must differ.
    assert_ne!(r1.nonce, r2.nonce, "nonces must never repeat");
    assert_ne!(r1.ciphertext, r2.ciphertext);
}

// ---------------------------------------------------------------------------
// Tamper and wrong-key detection
// ---------------------------------------------------------------------------

#[test]
fn flipping_any_byte_is_detected() {
    let key = derive_key("tamper-password", &generate_salt()).expect("derive");
    let record = encrypt("VALUE=abc", &key).expect("encrypt");

    let ciphertext = BASE64.decode(&record.ciphertext).unwrap();
    for i in 0..ciphertext.len() {
        let mut bytes = ciphertext.clone();
        bytes[i] ^= 0x01;
        let tampered = EncryptedRecord::new(BASE64.encode(&bytes), record.nonce.clone());
        assert_decryption_failed(decrypt(&tampered, &key));
    }

    let nonce = BASE64.decode(&record.nonce).unwrap();
    for i in 0..nonce.len() {
        let mut bytes = nonce.clone();
        bytes[i] ^= 0x80;
        let tampered = EncryptedRecord::new(record.ciphertext.clone(), BASE64.encode(&bytes));
        assert_decryption_failed(decrypt(&tampered, &key));
    }
}

#[test]
fn swapped_fields_are_rejected() {
    let key = derive_key("swap-password", &generate_salt()).expect("derive");
    let record = encrypt("VALUE=abc", &key).expect("encrypt");

    let swapped = EncryptedRecord::new(record.nonce.clone(), record.ciphertext.clone());
    assert_decryption_failed(decrypt(&swapped, &key));
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let salt = generate_salt();
    let key = derive_key("password-one", &salt).expect("derive 1");
    let wrong = derive_key("password-two", &salt).expect("derive 2");

    let record = encrypt("TOP_SECRET=42", &key).expect("encrypt");
    assert_decryption_failed(decrypt(&record, &wrong));
}

#[test]
fn malformed_encoding_is_a_decryption_error() {
    let key = derive_key("encoding-password", &generate_salt()).expect("derive");
    let record = EncryptedRecord::new("%%%not-base64%%%", "AAAAAAAAAAAAAAAA");
    assert_decryption_failed(decrypt(&record, &key));
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2)
// ---------------------------------------------------------------------------

#[test]
fn derive_same_inputs_produces_interchangeable_keys() {
    let salt = salt_from_identifier("same@example.com");

    let key1 = derive_key("my-secure-passphrase", &salt).expect("derive 1");
    let key2 = derive_key("my-secure-passphrase", &salt).expect("derive 2");

    let record = encrypt("cross-check", &key1).expect("encrypt");
    assert_eq!(decrypt(&record, &key2).expect("decrypt").as_str(), "cross-check");
}

#[test]
fn derive_different_salts_produce_different_keys() {
    let key1 = derive_key("same-password", &salt_from_identifier("a@b.com")).expect("derive 1");
    let key2 = derive_key("same-password", &salt_from_identifier("c@d.com")).expect("derive 2");

    let record = encrypt("value", &key1).expect("encrypt");
    assert_decryption_failed(decrypt(&record, &key2));
}

#[test]
fn derive_rejects_bad_salt_length() {
    let result = derive_key("hunter2", &[0u8; 32]);
    assert!(matches!(result, Err(PassVaultError::KeyDerivationFailed(_))));
}

#[test]
fn salt_from_identifier_is_stable() {
    let a = salt_from_identifier("a@b.com");
    let b = salt_from_identifier("a@b.com");
    assert_eq!(a, b);
    assert_eq!(a.len(), 16);
    assert_eq!(&a[..], &Sha256::digest(b"a@b.com")[..16]);
}

// ---------------------------------------------------------------------------
// End-to-end scenario
// ---------------------------------------------------------------------------

#[test]
fn hunter2_scenario() {
    let salt = salt_from_identifier("a@b.com");
    let key = derive_key("hunter2", &salt).expect("derive");

    let record = encrypt("P@ssw0rd!", &key).expect("encrypt");
    assert_eq!(decrypt(&record, &key).expect("decrypt").as_str(), "P@ssw0rd!");

    let wrong = derive_key("hunter3", &salt).expect("derive wrong");
    assert_decryption_failed(decrypt(&record, &wrong));
}
