//! secp256k1 signing key and Ethereum address derivation.

use std::fmt;

use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use crate::errors::LedgerError;

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// A signature over a 32-byte hash, with the recovery id Ethereum needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// 0 or 1 for the low-s signatures produced here.
    pub recovery_id: u8,
}

pub struct Signer {
    key: SigningKey,
    address: [u8; 20],
}

impl Signer {
    /// Loads a key from hex, with or without the `0x` prefix.
    pub fn from_hex(private_key: &str) -> Result<Self, LedgerError> {
        let bytes = hex::decode(private_key.trim().trim_start_matches("0x"))
            .map_err(|e| LedgerError::InvalidKey(e.to_string()))?;
        let key = SigningKey::from_slice(&bytes)
            .map_err(|_| LedgerError::InvalidKey("not a valid secp256k1 scalar".to_string()))?;
        let address = derive_address(&key);
        Ok(Self { key, address })
    }

    pub fn address(&self) -> [u8; 20] {
        self.address
    }

    /// Lowercase `0x`-prefixed address.
    pub fn address_hex(&self) -> String {
        format!("0x{}", hex::encode(self.address))
    }

    /// Deterministic (RFC 6979) signature of a prehashed message.
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<RecoverableSignature, LedgerError> {
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(hash)
            .map_err(|e| LedgerError::Signing(e.to_string()))?;

        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
        })
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address_hex())
            .finish_non_exhaustive()
    }
}

/// Last 20 bytes of the Keccak-256 hash of the uncompressed public key.
fn derive_address(key: &SigningKey) -> [u8; 20] {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}
