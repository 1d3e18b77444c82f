//! Ledger store abstraction: the crate's only external boundary.
//!
//! Everything the core needs from persistence goes through [`LedgerStore`]:
//! reading an asset's ordered lots and aggregate sums, and committing the
//! per-lot mutations a consumption plan describes. Production callers back
//! this with a database; [`InMemoryLedger`] backs tests and session use.

use crate::domain::{Asset, AssetId, Decimal, LotId, PurchaseLot, SaleRecord, Symbol};
use chrono::NaiveDate;
use thiserror::Error;

pub mod memory;

pub use memory::InMemoryLedger;

/// Storage collaborator for assets, purchase lots, and sale records.
///
/// Implementations must serialize conflicting writes per asset; the core
/// performs no locking of its own. They are also expected to report
/// per-mutation success/failure honestly — plan application aggregates
/// those outcomes and offers no rollback.
pub trait LedgerStore {
    /// Look up an asset by symbol, creating and persisting it when unseen.
    fn get_or_create_asset(&self, symbol: &Symbol) -> Result<Asset, StoreError>;

    /// All outstanding purchase lots for the asset, ascending by settle
    /// date (ties broken by lot id) — the order FIFO matching consumes.
    fn list_purchase_lots(&self, asset: AssetId) -> Result<Vec<PurchaseLot>, StoreError>;

    /// All recorded sales for the asset, ascending by sell date.
    fn list_sales(&self, asset: AssetId) -> Result<Vec<SaleRecord>, StoreError>;

    /// Σ quantity over the asset's outstanding lots.
    fn sum_outstanding_quantity(&self, asset: AssetId) -> Result<Decimal, StoreError>;

    /// Σ quantity × unit price over the asset's outstanding lots.
    fn sum_outstanding_cost(&self, asset: AssetId) -> Result<Decimal, StoreError>;

    fn create_purchase_lot(
        &self,
        asset: AssetId,
        settle_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<PurchaseLot, StoreError>;

    fn update_purchase_lot_quantity(
        &self,
        lot: LotId,
        new_quantity: Decimal,
    ) -> Result<PurchaseLot, StoreError>;

    fn delete_purchase_lot(&self, lot: LotId) -> Result<(), StoreError>;

    fn create_sale_record(
        &self,
        asset: AssetId,
        sell_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<SaleRecord, StoreError>;
}

/// Error type for ledger store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Referenced asset or lot is missing, typically a race with a
    /// concurrent mutation of the same asset's lot set.
    #[error("not found: {0}")]
    NotFound(String),
    /// A write conflicted with existing state (e.g. duplicate id).
    #[error("conflict: {0}")]
    Conflict(String),
    /// Backend I/O failure.
    #[error("storage error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        assert_eq!(
            StoreError::NotFound("lot 7".to_string()).to_string(),
            "not found: lot 7"
        );
        assert_eq!(
            StoreError::Io("disk full".to_string()).to_string(),
            "storage error: disk full"
        );
    }
}
