use thiserror::Error;

use crate::apply::ApplyError;
use crate::domain::Symbol;
use crate::ledger::StoreError;

/// Crate-level error for tracker and engine entry points.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed input: empty symbol, non-positive quantity, negative
    /// price. The purchase/sale entry points report these as `Rejected`
    /// outcomes instead; this variant surfaces only where fail-soft does
    /// not apply (engine preconditions, asset resolution).
    #[error("validation error: {0}")]
    Validation(String),

    /// A consumption plan was only partially persisted.
    #[error(transparent)]
    Apply(#[from] ApplyError),

    /// Unrealized gain/loss requested with zero outstanding quantity;
    /// the average cost would divide by zero.
    #[error("no outstanding quantity for {0}")]
    NoOutstandingQuantity(Symbol),

    /// The ledger store failed outside of plan application, including a
    /// referenced asset or lot missing at commit time.
    #[error(transparent)]
    Store(#[from] StoreError),
}
