//! Integration tests for the vault session lifecycle.

use std::sync::Arc;

use passvault::crypto::{generate_salt, Pbkdf2Params};
use passvault::errors::PassVaultError;
use passvault::vault::VaultSession;

#[tokio::test]
async fn lifecycle_locked_unlocked_locked() {
    let session = VaultSession::default();
    assert!(session.is_locked(), "new sessions start Locked");

    session.unlock("hunter2", "a@b.com").await.expect("unlock");
    assert!(!session.is_locked());

    session.lock();
    assert!(session.is_locked());
}

#[tokio::test]
async fn locked_session_refuses_crypto() {
    let session = VaultSession::default();

    let err = session.encrypt("secret").await.unwrap_err();
    assert!(matches!(err, PassVaultError::VaultLocked));

    session.unlock("hunter2", "a@b.com").await.expect("unlock");
    let record = session.encrypt("secret").await.expect("encrypt");
    session.lock();

    let err = session.decrypt(&record).await.unwrap_err();
    assert!(matches!(err, PassVaultError::VaultLocked));
}

#[tokio::test]
async fn relock_and_unlock_reads_old_records() {
    let session = VaultSession::default();
    session.unlock("hunter2", "a@b.com").await.expect("unlock");
    let record = session.encrypt("P@ssw0rd!").await.expect("encrypt");

    session.lock();
    session.unlock("hunter2", "a@b.com").await.expect("unlock again");

    let plaintext = session.decrypt(&record).await.expect("decrypt");
    assert_eq!(plaintext.as_str(), "P@ssw0rd!");
}

#[tokio::test]
async fn wrong_password_is_reported_by_verify() {
    let session = VaultSession::default();
    session.unlock("hunter2", "a@b.com").await.expect("unlock");
    let record = session.encrypt("P@ssw0rd!").await.expect("encrypt");

    // Re-unlocking replaces the key, even with the wrong password.
    session.unlock("hunter3", "a@b.com").await.expect("unlock wrong");
    assert!(matches!(
        session.decrypt(&record).await,
        Err(PassVaultError::DecryptionFailed)
    ));
    assert!(matches!(
        session.verify(&record).await,
        Err(PassVaultError::InvalidMasterPassword)
    ));
}

#[tokio::test]
async fn changed_identifier_cannot_read_old_records() {
    let session = VaultSession::default();
    session.unlock("hunter2", "a@b.com").await.expect("unlock");
    let record = session.encrypt("P@ssw0rd!").await.expect("encrypt");

    session.unlock("hunter2", "new@b.com").await.expect("unlock");
    assert!(session.decrypt(&record).await.is_err());
}

#[tokio::test]
async fn random_salt_unlock_is_reproducible() {
    let salt = generate_salt();
    let session = VaultSession::new(Pbkdf2Params::default());
    session.unlock_with_salt("hunter2", &salt).await.expect("unlock");
    let record = session.encrypt("value").await.expect("encrypt");

    let other = VaultSession::default();
    other.unlock_with_salt("hunter2", &salt).await.expect("unlock");
    assert_eq!(other.decrypt(&record).await.expect("decrypt").as_str(), "value");
}

#[tokio::test]
async fn weak_params_fail_unlock_and_stay_locked() {
    let session = VaultSession::new(Pbkdf2Params { iterations: 10 });
    let err = session.unlock("hunter2", "a@b.com").await.unwrap_err();
    assert!(matches!(err, PassVaultError::KeyDerivationFailed(_)));
    assert!(session.is_locked());
}

#[tokio::test]
async fn concurrent_decrypts_share_the_key() {
    let session = Arc::new(VaultSession::default());
    session.unlock("hunter2", "a@b.com").await.expect("unlock");

    let mut records = Vec::new();
    for i in 0..8 {
        records.push(session.encrypt(&format!("secret-{i}")).await.expect("encrypt"));
    }

    let results = decrypt_all(&session, &records).await;
    for (i, plaintext) in results.into_iter().enumerate() {
        assert_eq!(plaintext, format!("secret-{i}"));
    }
}

async fn decrypt_all(
    session: &Arc<VaultSession>,
    records: &[passvault::crypto::EncryptedRecord],
) -> Vec<String> {
    let mut handles = Vec::new();
    for record in records.iter().cloned() {
        let session = Arc::clone(session);
        handles.push(tokio::spawn(async move {
            session.decrypt(&record).await.map(|p| p.to_string())
        }));
    }

    let mut out = Vec::new();
    for handle in handles {
        out.push(handle.await.expect("join").expect("decrypt"));
    }
    out
}
