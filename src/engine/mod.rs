//! Pure computation engine for deterministic FIFO lot matching.

use crate::domain::{Decimal, LotId};

pub mod fifo;

pub use fifo::match_sale;

/// A single mutation against one purchase lot.
///
/// Plans never carry an `Update` whose new quantity is zero or negative;
/// the matcher emits such cases, and plan normalization turns them into
/// `Delete` before anything reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LotAction {
    /// The lot was fully consumed and must be removed.
    Delete(LotId),
    /// The lot was partially consumed; its quantity shrinks to `new_quantity`.
    Update {
        lot: LotId,
        new_quantity: Decimal,
    },
}

impl LotAction {
    pub fn lot_id(&self) -> LotId {
        match self {
            LotAction::Delete(id) => *id,
            LotAction::Update { lot, .. } => *lot,
        }
    }
}

/// Ordered mutations produced by matching one sale, oldest lot first.
///
/// Ephemeral: consumed by [`crate::apply::apply_plan`] and discarded,
/// never persisted.
pub type ConsumptionPlan = Vec<LotAction>;

/// Result of matching a sale against an ordered lot sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Requested quantity left unsatisfied after every lot was consumed.
    /// Zero whenever the lots on record cover the sale.
    pub unmatched: Decimal,
    /// Realized gain (positive) or loss (negative) over the matched
    /// portion, summed in lot-consumption order.
    pub realized: Decimal,
    /// Per-lot mutations to bring the store in line with the match.
    pub plan: ConsumptionPlan,
}

impl MatchOutcome {
    /// Quantity of the request that was matched against cost basis.
    pub fn matched(&self, requested: Decimal) -> Decimal {
        requested - self.unmatched
    }
}
