//! Purchase lot: a discrete purchased quantity consumed over time by sales.

use crate::domain::{AssetId, Decimal, LotId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A discrete purchased quantity of an asset at a specific price and date.
///
/// Invariant: `quantity > 0` for as long as the lot exists. A lot whose
/// remaining quantity reaches zero is deleted from the store, never kept
/// at zero or negative quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLot {
    pub id: LotId,
    pub asset_id: AssetId,
    /// Settlement date; lots are consumed oldest settle date first.
    pub settle_date: NaiveDate,
    /// Remaining quantity, reduced as the lot is consumed.
    pub quantity: Decimal,
    /// Price per unit paid at purchase.
    pub unit_price: Decimal,
}

impl PurchaseLot {
    pub fn new(
        id: LotId,
        asset_id: AssetId,
        settle_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        PurchaseLot {
            id,
            asset_id,
            settle_date,
            quantity,
            unit_price,
        }
    }

    /// Remaining cost basis of this lot.
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}
