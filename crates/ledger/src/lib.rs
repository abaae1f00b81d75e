//! Solarbond Ledger Crate
//!
//! Records audit verdicts on an EVM chain by calling
//! `recordAudit(string date, string verdict, uint256 score)` on the audit
//! contract.
//!
//! # Architecture
//!
//! ```text
//! EvmLedgerPublisher (LedgerPublisherTrait)
//!   -> Signer        secp256k1 key, sender address
//!   -> abi           call data for recordAudit
//!   -> transaction   EIP-155 legacy transaction, RLP encoded and signed
//!   -> RpcClient     eth_chainId / eth_getTransactionCount / eth_gasPrice /
//!                    eth_sendRawTransaction over JSON-RPC
//! ```
//!
//! A publisher without a private key is disabled and never touches the network.

pub mod abi;
pub mod config;
pub mod errors;
pub mod publisher;
pub mod rlp;
pub mod rpc;
pub mod signer;
pub mod transaction;

pub use config::LedgerConfig;
pub use errors::LedgerError;
pub use publisher::EvmLedgerPublisher;
pub use signer::Signer;
