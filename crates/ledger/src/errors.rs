use thiserror::Error;

/// Errors raised while submitting an audit to the ledger.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// The node did not answer the connectivity probe.
    #[error("Ledger node unreachable: {0}")]
    Unreachable(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Invalid contract address: {0}")]
    InvalidAddress(String),

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    #[error("Chain id mismatch: configured {expected}, node reports {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("Signing failed: {0}")]
    Signing(String),
}
