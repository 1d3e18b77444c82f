//! Sale record: the matched portion of a completed sale request.

use crate::domain::{AssetId, Decimal, SaleId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A recorded sale against an asset's lots.
///
/// `quantity` is the portion actually matched against cost basis, i.e.
/// the requested quantity minus any unmatched remainder when the lots on
/// record were insufficient. Written only after the consumption plan has
/// been applied successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: SaleId,
    pub asset_id: AssetId,
    pub sell_date: NaiveDate,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl SaleRecord {
    pub fn new(
        id: SaleId,
        asset_id: AssetId,
        sell_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        SaleRecord {
            id,
            asset_id,
            sell_date,
            quantity,
            unit_price,
        }
    }

    /// Gross proceeds of the matched portion.
    pub fn proceeds(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}
