//! Contract ABI encoding for the audit recorder.

use crate::errors::LedgerError;
use crate::signer::keccak256;

pub const RECORD_AUDIT_SIGNATURE: &str = "recordAudit(string,string,uint256)";

const WORD: usize = 32;

/// First four bytes of the Keccak-256 hash of a function signature.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Call data for `recordAudit(date, verdict, score)`.
pub fn encode_record_audit(date: &str, verdict: &str, score: u64) -> Vec<u8> {
    let date_tail = encode_string_tail(date);
    let head_len = 3 * WORD;

    let mut out = Vec::with_capacity(4 + head_len + date_tail.len() + 3 * WORD);
    out.extend_from_slice(&function_selector(RECORD_AUDIT_SIGNATURE));
    out.extend_from_slice(&uint_word(head_len as u128));
    out.extend_from_slice(&uint_word((head_len + date_tail.len()) as u128));
    out.extend_from_slice(&uint_word(score as u128));
    out.extend_from_slice(&date_tail);
    out.extend_from_slice(&encode_string_tail(verdict));
    out
}

/// Parses a `0x`-prefixed 20-byte hex address. Checksum casing is not verified.
pub fn parse_address(address: &str) -> Result<[u8; 20], LedgerError> {
    let digits = address.trim().trim_start_matches("0x");
    let bytes =
        hex::decode(digits).map_err(|e| LedgerError::InvalidAddress(format!("{}: {}", address, e)))?;
    <[u8; 20]>::try_from(bytes.as_slice()).map_err(|_| {
        LedgerError::InvalidAddress(format!("{}: expected 20 bytes, got {}", address, bytes.len()))
    })
}

fn uint_word(value: u128) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Length word followed by the bytes, right-padded to a word boundary.
fn encode_string_tail(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let padded_len = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded_len);
    out.extend_from_slice(&uint_word(bytes.len() as u128));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded_len, 0);
    out
}
