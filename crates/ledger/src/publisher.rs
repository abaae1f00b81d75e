use async_trait::async_trait;
use chrono::NaiveDate;
use log::{info, warn};
use solarbond_core::audit::Verdict;
use solarbond_core::ledger::{ledger_score, LedgerPublisherTrait, PublishOutcome};

use crate::abi::{encode_record_audit, parse_address};
use crate::config::LedgerConfig;
use crate::errors::LedgerError;
use crate::rpc::RpcClient;
use crate::signer::Signer;
use crate::transaction::LegacyTransaction;

/// Publishes audit verdicts as signed `recordAudit` transactions.
pub struct EvmLedgerPublisher {
    config: LedgerConfig,
    rpc: RpcClient,
    signer: Option<Signer>,
    contract: [u8; 20],
}

impl EvmLedgerPublisher {
    /// Fails on a malformed key or contract address. A missing key is not an
    /// error: the publisher is built disabled.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        let contract = parse_address(&config.contract_address)?;
        let signer = match config
            .private_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        {
            Some(key) => Some(Signer::from_hex(key)?),
            None => None,
        };

        match &signer {
            Some(signer) => info!(
                "Ledger publishing enabled: sender {} on chain {} via {}",
                signer.address_hex(),
                config.chain_id,
                config.rpc_url
            ),
            None => info!("Ledger publishing disabled: no private key configured"),
        }

        let rpc = RpcClient::new(config.rpc_url.clone(), config.timeout);

        Ok(Self {
            config,
            rpc,
            signer,
            contract,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.signer.is_some()
    }

    fn explorer_url(&self, tx_hash: &str) -> String {
        format!("{}{}", self.config.explorer_tx_url, tx_hash)
    }

    async fn submit(&self, signer: &Signer, call_data: Vec<u8>) -> Result<String, LedgerError> {
        let chain_id = self.rpc.chain_id().await.map_err(|e| match e {
            LedgerError::Transport(cause) => LedgerError::Unreachable(cause),
            other => other,
        })?;
        if chain_id != self.config.chain_id {
            return Err(LedgerError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id,
            });
        }

        let nonce = self.rpc.transaction_count(&signer.address_hex()).await?;
        let gas_price = self.rpc.gas_price().await?;

        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit: self.config.gas_limit,
            to: self.contract,
            value: 0,
            data: call_data,
            chain_id,
        };
        let signed = tx.sign(signer)?;

        let tx_hash = self.rpc.send_raw_transaction(&signed.raw_hex()).await?;
        if !tx_hash.eq_ignore_ascii_case(&signed.hash_hex()) {
            warn!(
                "Node reported tx hash {} but signed transaction hashes to {}",
                tx_hash,
                signed.hash_hex()
            );
        }
        Ok(format!("0x{}", tx_hash.trim_start_matches("0x")))
    }
}

#[async_trait]
impl LedgerPublisherTrait for EvmLedgerPublisher {
    async fn publish(
        &self,
        date: NaiveDate,
        verdict: Verdict,
        performance_ratio: f64,
    ) -> PublishOutcome {
        let Some(signer) = &self.signer else {
            return PublishOutcome::Disabled;
        };

        let call_data = encode_record_audit(
            &date.format("%Y-%m-%d").to_string(),
            verdict.as_str(),
            ledger_score(performance_ratio),
        );

        match tokio::time::timeout(self.config.timeout, self.submit(signer, call_data)).await {
            Ok(Ok(tx_hash)) => {
                info!("Recorded {} {} on ledger: {}", date, verdict, tx_hash);
                PublishOutcome::Submitted {
                    explorer_url: self.explorer_url(&tx_hash),
                    tx_hash,
                }
            }
            Ok(Err(LedgerError::Unreachable(cause))) => {
                warn!("Ledger node unreachable: {}", cause);
                PublishOutcome::ConnectionFailed
            }
            Ok(Err(err)) => {
                warn!("Failed to record {} {} on ledger: {}", date, verdict, err);
                PublishOutcome::Failed {
                    message: err.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    "Ledger publish for {} timed out after {:?}",
                    date, self.config.timeout
                );
                PublishOutcome::Failed {
                    message: format!("Timed out after {}s", self.config.timeout.as_secs_f64()),
                }
            }
        }
    }
}
