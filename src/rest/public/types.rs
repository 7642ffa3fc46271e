//! Types for public REST API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Ticker snapshot for a single pair.
///
/// Prices arrive as decimal strings and are parsed without loss of precision.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// (bid + ask) / 2
    pub mid: Decimal,
    /// Innermost bid.
    pub bid: Decimal,
    /// Innermost ask.
    pub ask: Decimal,
    /// Price of the last executed order.
    pub last_price: Decimal,
    /// Lowest trade price of the last 24 hours.
    pub low: Decimal,
    /// Highest trade price of the last 24 hours.
    pub high: Decimal,
    /// Trading volume of the last 24 hours.
    pub volume: Decimal,
    /// Unix time (fractional seconds) at which this snapshot was valid.
    pub timestamp: Decimal,
}
