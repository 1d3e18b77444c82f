//! Domain primitives: Symbol and the store-allocated id newtypes.

use serde::{Deserialize, Serialize};

/// Ticker symbol identifying a tradable asset (e.g. "AAPL", "BTC").
///
/// Construction does not validate; the tracker entry points reject empty
/// or whitespace-only symbols before anything reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(symbol: impl Into<String>) -> Self {
        Symbol(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the symbol is usable as an asset key.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

/// Store-allocated asset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub i64);

/// Store-allocated purchase-lot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LotId(pub i64);

/// Store-allocated sale-record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SaleId(pub i64);
