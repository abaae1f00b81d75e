use std::time::Duration;

pub const DEFAULT_RPC_URL: &str = "https://rpc.sepolia.org";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x78efd50b1607a9b0a350849202111e6ac7255d50";
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const DEFAULT_GAS_LIMIT: u64 = 500_000;
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://sepolia.etherscan.io/tx/";

/// Connection and signing settings for the EVM publisher.
#[derive(Clone)]
pub struct LedgerConfig {
    pub rpc_url: String,
    /// Hex-encoded secp256k1 key, with or without `0x`. `None` disables publishing.
    pub private_key: Option<String>,
    pub contract_address: String,
    pub chain_id: u64,
    pub gas_limit: u64,
    /// Upper bound on one whole publish (probe, nonce, gas price, submit).
    pub timeout: Duration,
    /// Prefix joined with `0x<hash>` to build explorer links.
    pub explorer_tx_url: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            private_key: None,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            chain_id: SEPOLIA_CHAIN_ID,
            gas_limit: DEFAULT_GAS_LIMIT,
            timeout: Duration::from_secs(15),
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("contract_address", &self.contract_address)
            .field("chain_id", &self.chain_id)
            .field("gas_limit", &self.gas_limit)
            .field("timeout", &self.timeout)
            .field("explorer_tx_url", &self.explorer_tx_url)
            .finish()
    }
}
