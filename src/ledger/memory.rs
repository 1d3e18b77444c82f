//! In-memory ledger store for tests and single-session use.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use crate::domain::{Asset, AssetId, Decimal, LotId, PurchaseLot, SaleId, SaleRecord, Symbol};

use super::{LedgerStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    assets: BTreeMap<Symbol, Asset>,
    lots: BTreeMap<LotId, PurchaseLot>,
    sales: BTreeMap<SaleId, SaleRecord>,
    next_id: i64,
}

impl Inner {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Ledger store backed by in-process maps.
///
/// Ids are allocated from a single counter, so insertion order is
/// recoverable and tests stay deterministic. Individual lots can be
/// marked as failing via [`fail_lot`](Self::fail_lot) to exercise the
/// partial-application policy of `apply_plan`.
///
/// Not `Sync`; per the crate's concurrency contract, callers serialize
/// access per asset anyway.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: RefCell<Inner>,
    failing_lots: RefCell<HashSet<LotId>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a lot for `symbol`, creating the asset as needed.
    pub fn with_lot(
        self,
        symbol: &str,
        settle_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        let asset = self
            .get_or_create_asset(&Symbol::from(symbol))
            .expect("in-memory asset creation cannot fail");
        self.create_purchase_lot(asset.id, settle_date, quantity, unit_price)
            .expect("in-memory lot creation cannot fail");
        self
    }

    /// Make every subsequent update/delete of `lot` fail with an I/O
    /// error, leaving earlier mutations in place.
    pub fn fail_lot(&self, lot: LotId) {
        self.failing_lots.borrow_mut().insert(lot);
    }

    fn check_injected_failure(&self, lot: LotId) -> Result<(), StoreError> {
        if self.failing_lots.borrow().contains(&lot) {
            return Err(StoreError::Io(format!("injected failure for lot {:?}", lot)));
        }
        Ok(())
    }
}

impl LedgerStore for InMemoryLedger {
    fn get_or_create_asset(&self, symbol: &Symbol) -> Result<Asset, StoreError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(asset) = inner.assets.get(symbol) {
            return Ok(asset.clone());
        }
        let id = AssetId(inner.alloc_id());
        let asset = Asset::new(id, symbol.clone());
        inner.assets.insert(symbol.clone(), asset.clone());
        Ok(asset)
    }

    fn list_purchase_lots(&self, asset: AssetId) -> Result<Vec<PurchaseLot>, StoreError> {
        let inner = self.inner.borrow();
        let mut lots: Vec<PurchaseLot> = inner
            .lots
            .values()
            .filter(|lot| lot.asset_id == asset)
            .cloned()
            .collect();
        lots.sort_by_key(|lot| (lot.settle_date, lot.id));
        Ok(lots)
    }

    fn list_sales(&self, asset: AssetId) -> Result<Vec<SaleRecord>, StoreError> {
        let inner = self.inner.borrow();
        let mut sales: Vec<SaleRecord> = inner
            .sales
            .values()
            .filter(|sale| sale.asset_id == asset)
            .cloned()
            .collect();
        sales.sort_by_key(|sale| (sale.sell_date, sale.id));
        Ok(sales)
    }

    fn sum_outstanding_quantity(&self, asset: AssetId) -> Result<Decimal, StoreError> {
        let inner = self.inner.borrow();
        Ok(inner
            .lots
            .values()
            .filter(|lot| lot.asset_id == asset)
            .fold(Decimal::zero(), |acc, lot| acc + lot.quantity))
    }

    fn sum_outstanding_cost(&self, asset: AssetId) -> Result<Decimal, StoreError> {
        let inner = self.inner.borrow();
        Ok(inner
            .lots
            .values()
            .filter(|lot| lot.asset_id == asset)
            .fold(Decimal::zero(), |acc, lot| acc + lot.cost()))
    }

    fn create_purchase_lot(
        &self,
        asset: AssetId,
        settle_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<PurchaseLot, StoreError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.assets.values().any(|a| a.id == asset) {
            return Err(StoreError::NotFound(format!("asset {:?}", asset)));
        }
        let id = LotId(inner.alloc_id());
        let lot = PurchaseLot::new(id, asset, settle_date, quantity, unit_price);
        inner.lots.insert(id, lot.clone());
        Ok(lot)
    }

    fn update_purchase_lot_quantity(
        &self,
        lot: LotId,
        new_quantity: Decimal,
    ) -> Result<PurchaseLot, StoreError> {
        self.check_injected_failure(lot)?;
        let mut inner = self.inner.borrow_mut();
        let stored = inner
            .lots
            .get_mut(&lot)
            .ok_or_else(|| StoreError::NotFound(format!("lot {:?}", lot)))?;
        stored.quantity = new_quantity;
        Ok(stored.clone())
    }

    fn delete_purchase_lot(&self, lot: LotId) -> Result<(), StoreError> {
        self.check_injected_failure(lot)?;
        let mut inner = self.inner.borrow_mut();
        inner
            .lots
            .remove(&lot)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("lot {:?}", lot)))
    }

    fn create_sale_record(
        &self,
        asset: AssetId,
        sell_date: NaiveDate,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Result<SaleRecord, StoreError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.assets.values().any(|a| a.id == asset) {
            return Err(StoreError::NotFound(format!("asset {:?}", asset)));
        }
        let id = SaleId(inner.alloc_id());
        let sale = SaleRecord::new(id, asset, sell_date, quantity, unit_price);
        inner.sales.insert(id, sale.clone());
        Ok(sale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn day(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn get_or_create_is_idempotent_per_symbol() {
        let store = InMemoryLedger::new();
        let a = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();
        let b = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();
        assert_eq!(a, b);

        let c = store.get_or_create_asset(&Symbol::from("MSFT")).unwrap();
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn lots_list_ascending_by_settle_date() {
        let store = InMemoryLedger::new()
            .with_lot("AAPL", day(9), d("3"), d("110"))
            .with_lot("AAPL", day(2), d("5"), d("100"));
        let asset = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();

        let lots = store.list_purchase_lots(asset.id).unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].settle_date, day(2));
        assert_eq!(lots[1].settle_date, day(9));
    }

    #[test]
    fn same_day_lots_tie_break_by_id() {
        let store = InMemoryLedger::new()
            .with_lot("AAPL", day(1), d("1"), d("10"))
            .with_lot("AAPL", day(1), d("2"), d("20"));
        let asset = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();

        let lots = store.list_purchase_lots(asset.id).unwrap();
        assert!(lots[0].id < lots[1].id);
        assert_eq!(lots[0].quantity, d("1"));
    }

    #[test]
    fn aggregate_sums_cover_only_the_requested_asset() {
        let store = InMemoryLedger::new()
            .with_lot("AAPL", day(1), d("5"), d("100"))
            .with_lot("AAPL", day(2), d("10"), d("110"))
            .with_lot("MSFT", day(1), d("99"), d("1"));
        let asset = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();

        assert_eq!(store.sum_outstanding_quantity(asset.id).unwrap(), d("15"));
        assert_eq!(store.sum_outstanding_cost(asset.id).unwrap(), d("1600"));
    }

    #[test]
    fn update_and_delete_mutate_stored_lots() {
        let store = InMemoryLedger::new().with_lot("AAPL", day(1), d("5"), d("100"));
        let asset = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();
        let lot = store.list_purchase_lots(asset.id).unwrap().remove(0);

        let updated = store.update_purchase_lot_quantity(lot.id, d("2")).unwrap();
        assert_eq!(updated.quantity, d("2"));

        store.delete_purchase_lot(lot.id).unwrap();
        assert!(store.list_purchase_lots(asset.id).unwrap().is_empty());
    }

    #[test]
    fn missing_lot_mutations_report_not_found() {
        let store = InMemoryLedger::new();
        assert!(matches!(
            store.update_purchase_lot_quantity(LotId(42), d("1")),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_purchase_lot(LotId(42)),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn injected_failures_only_hit_the_marked_lot() {
        let store = InMemoryLedger::new()
            .with_lot("AAPL", day(1), d("5"), d("100"))
            .with_lot("AAPL", day(2), d("5"), d("100"));
        let asset = store.get_or_create_asset(&Symbol::from("AAPL")).unwrap();
        let lots = store.list_purchase_lots(asset.id).unwrap();

        store.fail_lot(lots[1].id);
        assert!(store.delete_purchase_lot(lots[0].id).is_ok());
        assert!(matches!(
            store.delete_purchase_lot(lots[1].id),
            Err(StoreError::Io(_))
        ));
    }
}
