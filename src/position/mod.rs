//! In-memory position aggregate and the tracker built on top of it.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::{Asset, Decimal, PurchaseLot, SaleRecord, Symbol};

pub mod tracker;

pub use tracker::PositionTracker;

/// One asset's view inside a position: the asset plus its outstanding
/// lots and recorded sales as last fetched from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetPosition {
    pub asset: Asset,
    /// Outstanding lots, ascending by settle date.
    pub lots: Vec<PurchaseLot>,
    /// Recorded sales, ascending by sell date.
    pub sales: Vec<SaleRecord>,
}

impl AssetPosition {
    /// Σ quantity over the outstanding lots.
    pub fn outstanding_quantity(&self) -> Decimal {
        self.lots
            .iter()
            .fold(Decimal::zero(), |acc, lot| acc + lot.quantity)
    }

    /// Σ quantity × unit price over the outstanding lots.
    pub fn cost_basis(&self) -> Decimal {
        self.lots
            .iter()
            .fold(Decimal::zero(), |acc, lot| acc + lot.cost())
    }
}

/// Session-scoped aggregate of assets keyed by symbol.
///
/// Updates are structural: replacing one symbol's entry produces a new
/// `Position` with every other entry untouched, never a rebuilt map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Position {
    assets: BTreeMap<Symbol, AssetPosition>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&AssetPosition> {
        self.assets.get(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.assets.keys()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Insert or replace the entry for `entry.asset.symbol`, leaving all
    /// other entries as they were.
    pub fn with_asset(mut self, entry: AssetPosition) -> Self {
        self.assets.insert(entry.asset.symbol.clone(), entry);
        self
    }
}

/// Why a purchase or sale entry was rejected at the tracker boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("symbol is empty")]
    EmptySymbol,
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    #[error("unit price must not be negative")]
    NegativeUnitPrice,
}

/// Outcome of [`PositionTracker::add_purchase`].
///
/// Malformed input rejects softly: the starting position comes back
/// unchanged, tagged with the reason so callers and tests can assert on
/// it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Applied(Position),
    Rejected {
        position: Position,
        reason: RejectReason,
    },
}

impl PurchaseOutcome {
    /// The resulting position, applied or not.
    pub fn into_position(self) -> Position {
        match self {
            PurchaseOutcome::Applied(position) => position,
            PurchaseOutcome::Rejected { position, .. } => position,
        }
    }
}

/// Outcome of [`PositionTracker::add_sale`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaleOutcome {
    Applied {
        position: Position,
        /// Realized gain (positive) or loss (negative) on the matched
        /// portion; zero when nothing matched.
        realized: Decimal,
    },
    Rejected {
        position: Position,
        reason: RejectReason,
    },
}

impl SaleOutcome {
    /// The resulting position plus realized gain/loss (zero on rejection).
    pub fn into_parts(self) -> (Position, Decimal) {
        match self {
            SaleOutcome::Applied { position, realized } => (position, realized),
            SaleOutcome::Rejected { position, .. } => (position, Decimal::zero()),
        }
    }
}
