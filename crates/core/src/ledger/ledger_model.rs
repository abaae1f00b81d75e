use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened when an audit was handed to the ledger.
///
/// Publishing never fails the audit; every failure mode is a variant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublishOutcome {
    Submitted {
        #[serde(rename = "txHash")]
        tx_hash: String,
        #[serde(rename = "explorerUrl")]
        explorer_url: String,
    },
    /// The day was not scored, so nothing was sent.
    Skipped,
    /// No signing key configured.
    Disabled,
    /// The ledger node could not be reached.
    ConnectionFailed,
    Failed { message: String },
}

impl PublishOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, PublishOutcome::Submitted { .. })
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Submitted { explorer_url, .. } => f.write_str(explorer_url),
            PublishOutcome::Skipped => f.write_str("Skipped (ignored day)"),
            PublishOutcome::Disabled => f.write_str("Blockchain disabled (no private key)"),
            PublishOutcome::ConnectionFailed => f.write_str("Web3 connection failed"),
            PublishOutcome::Failed { message } => write!(f, "Blockchain Error: {}", message),
        }
    }
}

/// Integer form of a performance ratio as stored on-chain: hundredths of a
/// percent, so `75.5` becomes `7550`. Negative inputs clamp to zero.
pub fn ledger_score(performance_ratio: f64) -> u64 {
    (performance_ratio * 100.0).round().max(0.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_score_rounds() {
        assert_eq!(ledger_score(75.0), 7500);
        assert_eq!(ledger_score(75.5), 7550);
        assert_eq!(ledger_score(81.25), 8125);
        assert_eq!(ledger_score(0.0), 0);
        assert_eq!(ledger_score(-1.0), 0);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            PublishOutcome::Disabled.to_string(),
            "Blockchain disabled (no private key)"
        );
        assert_eq!(
            PublishOutcome::ConnectionFailed.to_string(),
            "Web3 connection failed"
        );
        assert_eq!(
            PublishOutcome::Failed {
                message: "nonce too low".to_string()
            }
            .to_string(),
            "Blockchain Error: nonce too low"
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = PublishOutcome::Submitted {
            tx_hash: "0xabc".to_string(),
            explorer_url: "https://sepolia.etherscan.io/tx/0xabc".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "SUBMITTED");
        assert_eq!(json["txHash"], "0xabc");
        assert_eq!(json["explorerUrl"], "https://sepolia.etherscan.io/tx/0xabc");

        let json = serde_json::to_value(PublishOutcome::Skipped).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "SKIPPED" }));

        let json = serde_json::to_value(PublishOutcome::ConnectionFailed).unwrap();
        assert_eq!(json["status"], "CONNECTION_FAILED");
    }
}
