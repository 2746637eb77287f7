//! Cryptographic Provider Port
//!
//! Defines the interface for encrypting external data source connection
//! strings at rest (spec §3, §4.L).
//!
//! This port follows the dependency inversion principle: the trait is
//! defined here, the concrete AES-GCM implementation lives in
//! `govdocs-infrastructure`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Ciphertext and nonce produced by [`CryptoProvider::encrypt`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedData {
    /// The encrypted ciphertext.
    pub ciphertext: Vec<u8>,
    /// The nonce used for encryption.
    pub nonce: Vec<u8>,
}

impl EncryptedData {
    /// Construct a new encrypted data container.
    #[must_use]
    pub fn new(ciphertext: Vec<u8>, nonce: Vec<u8>) -> Self {
        Self { ciphertext, nonce }
    }
}

/// Symmetric encryption of small secrets (external data source credentials).
pub trait CryptoProvider: Send + Sync {
    /// Encrypt plaintext data.
    ///
    /// # Errors
    /// Returns an error if the underlying cryptographic primitive fails.
    fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedData>;

    /// Decrypt previously encrypted data.
    ///
    /// # Errors
    /// Returns an error if the ciphertext or nonce is invalid, or decryption fails.
    fn decrypt(&self, encrypted: &EncryptedData) -> Result<Vec<u8>>;

    /// Identifier of this provider implementation.
    fn provider_name(&self) -> &str;
}
