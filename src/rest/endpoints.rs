//! Bitfinex REST API endpoint constants.

/// Base URL for the Bitfinex REST API.
pub const BITFINEX_BASE_URL: &str = "https://api.bitfinex.com";

/// Public endpoints (no authentication required).
pub mod public {
    /// Ticker for a single pair; append the pair symbol.
    pub const PUBTICKER: &str = "/v1/pubticker/";

    /// Ticker path for `pair` (e.g., "btcusd").
    pub fn ticker(pair: &str) -> String {
        format!("{PUBTICKER}{pair}")
    }
}

/// Private endpoints (authentication required).
pub mod private {
    /// Get account fee schedule.
    pub const ACCOUNT_INFOS: &str = "/v1/account_infos";
    /// Get transaction history.
    pub const USER_TRANSACTIONS: &str = "/v1/user_transactions";
    /// Get open orders.
    pub const OPEN_ORDERS: &str = "/v1/open_orders";
}
