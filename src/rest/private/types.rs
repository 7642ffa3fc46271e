//! Types for private REST API endpoints.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sort direction for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// `Desc` when `descending`, otherwise `Asc`.
    pub fn from_descending(descending: bool) -> Self {
        if descending { Self::Desc } else { Self::Asc }
    }
}

/// Request parameters for the transaction history.
///
/// Defaults to the 100 most recent transactions, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserTransactionsRequest {
    /// Number of transactions to skip.
    pub offset: u32,
    /// Maximum number of transactions to return.
    pub limit: u32,
    /// Sort direction.
    pub sort: SortOrder,
}

impl UserTransactionsRequest {
    /// Create a request for a page of history.
    pub fn new(offset: u32, limit: u32, descending: bool) -> Self {
        Self {
            offset,
            limit,
            sort: SortOrder::from_descending(descending),
        }
    }

    /// Set the offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the sort direction.
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }
}

impl Default for UserTransactionsRequest {
    fn default() -> Self {
        Self::new(0, 100, true)
    }
}

/// Fees charged on one currency or pair group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeTier {
    /// Currency or pair group the fees apply to (e.g., "BTC").
    pub pairs: String,
    /// Maker fee in percent.
    pub maker_fees: Decimal,
    /// Taker fee in percent.
    pub taker_fees: Decimal,
}

/// Account fee schedule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountInfo {
    /// Account-wide maker fee in percent.
    #[serde(default)]
    pub maker_fees: Option<Decimal>,
    /// Account-wide taker fee in percent.
    #[serde(default)]
    pub taker_fees: Option<Decimal>,
    /// Per-currency fee tiers.
    #[serde(default)]
    pub fees: Vec<FeeTier>,
}

/// A transaction from the account history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: u64,
    /// Transaction time (e.g., "2013-03-26 18:49:13").
    pub datetime: String,
    /// Transaction type code.
    #[serde(rename = "type")]
    pub kind: i64,
    /// Fee charged.
    pub fee: Decimal,
    /// Signed amount per currency (e.g., "usd" -> -39.25, "btc" -> 0.5).
    #[serde(flatten)]
    pub amounts: BTreeMap<String, Decimal>,
}

impl Transaction {
    /// Amount moved in `currency`, if the transaction touched it.
    pub fn amount(&self, currency: &str) -> Option<Decimal> {
        self.amounts.get(currency).copied()
    }
}

/// An open order. The field set is defined by the exchange.
pub type OpenOrder = serde_json::Map<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_user_transactions_request_serialization() {
        let request = UserTransactionsRequest::new(5, 10, false);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "offset": 5, "limit": 10, "sort": "asc" })
        );
    }

    #[test]
    fn test_user_transactions_request_default() {
        let request = UserTransactionsRequest::default();
        assert_eq!(request.offset, 0);
        assert_eq!(request.limit, 100);
        assert_eq!(request.sort, SortOrder::Desc);

        let request = request.offset(20).limit(50).sort(SortOrder::Asc);
        assert_eq!(request, UserTransactionsRequest::new(20, 50, false));
    }

    #[test]
    fn test_account_info_deserialize() {
        let json = r#"[{
            "maker_fees": "0.1",
            "taker_fees": "0.2",
            "fees": [
                {"pairs": "BTC", "maker_fees": "0.1", "taker_fees": "0.2"},
                {"pairs": "LTC", "maker_fees": "0.0", "taker_fees": "0.1"}
            ]
        }]"#;

        let infos: Vec<AccountInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].fees.len(), 2);
        assert_eq!(infos[0].fees[1].pairs, "LTC");
        assert_eq!(infos[0].taker_fees, Some(Decimal::from_str("0.2").unwrap()));
    }

    #[test]
    fn test_account_info_without_top_level_fees() {
        let json = r#"[{"fees": [{"pairs": "DRK", "maker_fees": "0.0", "taker_fees": "0.1"}]}]"#;
        let infos: Vec<AccountInfo> = serde_json::from_str(json).unwrap();
        assert!(infos[0].maker_fees.is_none());
        assert_eq!(infos[0].fees[0].pairs, "DRK");
    }

    #[test]
    fn test_transaction_deserialize() {
        let json = r#"{
            "usd": "-39.25",
            "datetime": "2013-03-26 18:49:13",
            "fee": "0.20",
            "btc": "0.50000000",
            "type": 2,
            "id": 213642
        }"#;

        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, 213642);
        assert_eq!(tx.kind, 2);
        assert_eq!(tx.fee, Decimal::from_str("0.20").unwrap());
        assert_eq!(tx.amount("usd"), Some(Decimal::from_str("-39.25").unwrap()));
        assert_eq!(tx.amount("btc"), Some(Decimal::from_str("0.5").unwrap()));
        assert_eq!(tx.amounts.len(), 2);
        assert!(tx.amount("eth").is_none());
    }
}
