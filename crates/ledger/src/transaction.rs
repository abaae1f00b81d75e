//! EIP-155 legacy transactions.

use crate::errors::LedgerError;
use crate::rlp::{encode_bytes, encode_list, encode_uint, trim_leading_zeros};
use crate::signer::{keccak256, Signer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyTransaction {
    pub nonce: u64,
    pub gas_price: u128,
    pub gas_limit: u64,
    pub to: [u8; 20],
    pub value: u128,
    pub data: Vec<u8>,
    pub chain_id: u64,
}

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub raw: Vec<u8>,
    pub hash: [u8; 32],
}

impl SignedTransaction {
    pub fn raw_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.raw))
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }
}

impl LegacyTransaction {
    fn unsigned_fields(&self) -> Vec<Vec<u8>> {
        vec![
            encode_uint(self.nonce as u128),
            encode_uint(self.gas_price),
            encode_uint(self.gas_limit as u128),
            encode_bytes(&self.to),
            encode_uint(self.value),
            encode_bytes(&self.data),
        ]
    }

    /// `rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0])`
    pub fn signing_payload(&self) -> Vec<u8> {
        let mut fields = self.unsigned_fields();
        fields.push(encode_uint(self.chain_id as u128));
        fields.push(encode_uint(0));
        fields.push(encode_uint(0));
        encode_list(&fields)
    }

    pub fn signing_hash(&self) -> [u8; 32] {
        keccak256(&self.signing_payload())
    }

    /// Signs with `v = chainId * 2 + 35 + recoveryId`.
    pub fn sign(&self, signer: &Signer) -> Result<SignedTransaction, LedgerError> {
        let signature = signer.sign_hash(&self.signing_hash())?;
        let v = self.chain_id as u128 * 2 + 35 + signature.recovery_id as u128;

        let mut fields = self.unsigned_fields();
        fields.push(encode_uint(v));
        fields.push(encode_bytes(trim_leading_zeros(&signature.r)));
        fields.push(encode_bytes(trim_leading_zeros(&signature.s)));

        let raw = encode_list(&fields);
        let hash = keccak256(&raw);
        Ok(SignedTransaction { raw, hash })
    }
}
