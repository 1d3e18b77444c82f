//! Asset type identifying a tradable instrument.

use crate::domain::{AssetId, Symbol};
use serde::{Deserialize, Serialize};

/// A tradable instrument, keyed by its unique symbol.
///
/// Created by the store on first reference to an unseen symbol and never
/// deleted by the core. Its purchase lots and sale records live in the
/// store and are fetched per asset id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub symbol: Symbol,
}

impl Asset {
    pub fn new(id: AssetId, symbol: Symbol) -> Self {
        Asset { id, symbol }
    }
}
