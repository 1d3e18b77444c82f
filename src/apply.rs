//! Plan application: commits a consumption plan to the ledger store.
//!
//! Actions run in plan order and outcomes are aggregated into a single
//! result. There is no rollback: when an action fails, everything applied
//! before it stays applied, and the error says how far the walk got.
//! Callers that need atomicity must supply a store whose mutations share
//! a transaction.

use thiserror::Error;
use tracing::{debug, warn};

use crate::engine::{ConsumptionPlan, LotAction};
use crate::ledger::{LedgerStore, StoreError};

/// A consumption plan stopped partway through persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("consumption plan partially applied: {applied} of {total} actions committed: {source}")]
pub struct ApplyError {
    /// Actions committed before the failure; these are not rolled back.
    pub applied: usize,
    /// Total actions in the plan.
    pub total: usize,
    #[source]
    pub source: StoreError,
}

/// Apply each action of `plan` in order against `store`.
///
/// An `Update` whose new quantity is zero (or, defensively, negative) is
/// committed as a delete so that no lot is ever stored at non-positive
/// quantity.
///
/// # Errors
/// [`ApplyError`] on the first failing store call; earlier actions remain
/// committed.
pub fn apply_plan(store: &impl LedgerStore, plan: &ConsumptionPlan) -> Result<(), ApplyError> {
    for (index, action) in plan.iter().enumerate() {
        let result = match action {
            LotAction::Delete(lot) => store.delete_purchase_lot(*lot),
            LotAction::Update { lot, new_quantity } if new_quantity.is_positive() => store
                .update_purchase_lot_quantity(*lot, *new_quantity)
                .map(|_| ()),
            // Zero-quantity update normalizes to a delete.
            LotAction::Update { lot, .. } => store.delete_purchase_lot(*lot),
        };
        if let Err(source) = result {
            warn!(
                applied = index,
                total = plan.len(),
                error = %source,
                "consumption plan partially applied"
            );
            return Err(ApplyError {
                applied: index,
                total: plan.len(),
                source,
            });
        }
    }
    debug!(actions = plan.len(), "consumption plan applied");
    Ok(())
}
