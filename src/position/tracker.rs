//! Position tracker: purchases, sales, and unrealized gain/loss queries
//! over a ledger store.

use chrono::NaiveDate;
use tracing::debug;

use crate::apply::apply_plan;
use crate::domain::{Asset, Decimal, Symbol};
use crate::engine::match_sale;
use crate::error::LedgerError;
use crate::ledger::LedgerStore;

use super::{AssetPosition, Position, PurchaseOutcome, RejectReason, SaleOutcome};

/// Drives the FIFO engine against a ledger store and keeps a caller's
/// [`Position`] aggregate in sync.
///
/// The tracker performs no locking. Callers invoking [`add_sale`] or
/// [`add_purchase`] concurrently for the same symbol must serialize those
/// calls (one worker per symbol, or an external per-symbol mutex), or the
/// asset's lot set can lose updates.
///
/// [`add_sale`]: Self::add_sale
/// [`add_purchase`]: Self::add_purchase
#[derive(Debug)]
pub struct PositionTracker<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> PositionTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve an asset by symbol, creating it on first reference.
    ///
    /// # Errors
    /// `LedgerError::Validation` for an empty or whitespace-only symbol.
    pub fn get_or_create_asset(&self, symbol: &Symbol) -> Result<Asset, LedgerError> {
        if !symbol.is_valid() {
            return Err(LedgerError::Validation(
                "symbol must be a non-empty identifier".to_string(),
            ));
        }
        Ok(self.store.get_or_create_asset(symbol)?)
    }

    /// Persist a new purchase lot and return the refreshed position.
    ///
    /// Malformed input (invalid symbol, non-positive quantity, negative
    /// price) rejects softly: the starting position is returned unchanged
    /// inside [`PurchaseOutcome::Rejected`]. Store failures are hard
    /// errors.
    pub fn add_purchase(
        &self,
        position: Position,
        symbol: &Symbol,
        settle_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<PurchaseOutcome, LedgerError> {
        if let Some(reason) = validate_entry(symbol, quantity, unit_price) {
            debug!(%symbol, %reason, "purchase rejected");
            return Ok(PurchaseOutcome::Rejected { position, reason });
        }

        let asset = self.store.get_or_create_asset(symbol)?;
        self.store
            .create_purchase_lot(asset.id, settle_date, quantity, unit_price)?;

        let position = self.refresh_entry(position, asset)?;
        Ok(PurchaseOutcome::Applied(position))
    }

    /// Sell against the asset's lots, oldest first.
    ///
    /// Fetches the ordered lots, runs the FIFO matcher, commits the
    /// resulting plan, and, only once the plan has been fully applied,
    /// records a sale for the matched quantity (requested minus any
    /// unmatched remainder; a fully-unmatched sale records nothing).
    ///
    /// Malformed input rejects softly as [`SaleOutcome::Rejected`] with
    /// realized gain/loss of zero.
    ///
    /// # Errors
    /// `LedgerError::Apply` when the plan was only partially persisted:
    /// lots mutated before the failure stay mutated and no sale record is
    /// written. There is no retry and no undo.
    pub fn add_sale(
        &self,
        position: Position,
        symbol: &Symbol,
        sell_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<SaleOutcome, LedgerError> {
        if let Some(reason) = validate_entry(symbol, quantity, unit_price) {
            debug!(%symbol, %reason, "sale rejected");
            return Ok(SaleOutcome::Rejected { position, reason });
        }

        let asset = self.store.get_or_create_asset(symbol)?;
        let lots = self.store.list_purchase_lots(asset.id)?;

        let outcome = match_sale(&lots, quantity, unit_price)?;
        apply_plan(&self.store, &outcome.plan)?;

        let matched = outcome.matched(quantity);
        if matched.is_positive() {
            self.store
                .create_sale_record(asset.id, sell_date, matched, unit_price)?;
        }

        let position = self.refresh_entry(position, asset)?;
        Ok(SaleOutcome::Applied {
            position,
            realized: outcome.realized,
        })
    }

    /// Hypothetical gain/loss on the outstanding lots at `market_price`:
    /// `(market_price - average cost) * outstanding quantity`, from the
    /// store's aggregate sums.
    ///
    /// # Errors
    /// `LedgerError::NoOutstandingQuantity` when nothing is held, where
    /// the average cost would divide by zero.
    pub fn unrealized_gain_loss(
        &self,
        symbol: &Symbol,
        market_price: Decimal,
    ) -> Result<Decimal, LedgerError> {
        let asset = self.get_or_create_asset(symbol)?;
        let quantity = self.store.sum_outstanding_quantity(asset.id)?;
        let cost = self.store.sum_outstanding_cost(asset.id)?;

        let average_cost = cost
            .checked_div(quantity)
            .ok_or_else(|| LedgerError::NoOutstandingQuantity(symbol.clone()))?;
        Ok((market_price - average_cost) * quantity)
    }

    /// Re-fetch one asset's lots and sales and swap its entry into the
    /// position, leaving every other symbol untouched.
    fn refresh_entry(&self, position: Position, asset: Asset) -> Result<Position, LedgerError> {
        let lots = self.store.list_purchase_lots(asset.id)?;
        let sales = self.store.list_sales(asset.id)?;
        Ok(position.with_asset(AssetPosition { asset, lots, sales }))
    }
}

fn validate_entry(symbol: &Symbol, quantity: Decimal, unit_price: Decimal) -> Option<RejectReason> {
    if !symbol.is_valid() {
        Some(RejectReason::EmptySymbol)
    } else if !quantity.is_positive() {
        Some(RejectReason::NonPositiveQuantity)
    } else if unit_price.is_negative() {
        Some(RejectReason::NegativeUnitPrice)
    } else {
        None
    }
}
