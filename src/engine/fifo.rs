//! FIFO matching: consume the oldest lots first to satisfy a sale.

use crate::domain::{Decimal, PurchaseLot};
use crate::error::LedgerError;

use super::{LotAction, MatchOutcome};

/// Match a sale against an ordered purchase-lot sequence.
///
/// `lots` must be sorted ascending by settle date (oldest first); the
/// matcher consumes them strictly in that order. The computation is pure:
/// it only describes mutations, it does not touch any store.
///
/// Per lot, while quantity remains to satisfy:
/// - lot smaller than the remainder: the lot is fully consumed
///   (`Delete`), its whole quantity realizes `(sale_px - lot_px) * qty`.
/// - lot covers the remainder: the lot shrinks by the remainder
///   (`Update`), the remainder realizes `(sale_px - lot_px) * remainder`,
///   and matching stops. A lot that exactly equals the remainder goes
///   through this branch and shrinks to zero; plan application treats
///   that as a delete, so no lot is ever stored at zero quantity.
///
/// An empty lot sequence yields `(sale_quantity, 0, [])`: the unmatched
/// remainder carries no cost basis and realizes nothing. Short-sale
/// accounting for that remainder is the caller's concern.
///
/// Runs as a plain loop, O(lots touched); lot chains of any length are
/// fine, there is no recursion to outgrow the stack.
///
/// # Errors
/// `LedgerError::Validation` when `sale_quantity` is not strictly
/// positive or `sale_unit_price` is negative; no lot is examined in
/// that case.
pub fn match_sale(
    lots: &[PurchaseLot],
    sale_quantity: Decimal,
    sale_unit_price: Decimal,
) -> Result<MatchOutcome, LedgerError> {
    if !sale_quantity.is_positive() {
        return Err(LedgerError::Validation(format!(
            "sale quantity must be positive, got {}",
            sale_quantity
        )));
    }
    if sale_unit_price.is_negative() {
        return Err(LedgerError::Validation(format!(
            "sale unit price must not be negative, got {}",
            sale_unit_price
        )));
    }

    let mut remaining = sale_quantity;
    let mut realized = Decimal::zero();
    let mut plan = Vec::new();

    for lot in lots {
        if remaining.is_zero() {
            break;
        }
        if lot.quantity < remaining {
            // Fully consumed; keep walking the chain.
            plan.push(LotAction::Delete(lot.id));
            realized = realized + (sale_unit_price - lot.unit_price) * lot.quantity;
            remaining = remaining - lot.quantity;
        } else {
            // Covers the remainder (possibly exactly); matching ends here.
            plan.push(LotAction::Update {
                lot: lot.id,
                new_quantity: lot.quantity - remaining,
            });
            realized = realized + (sale_unit_price - lot.unit_price) * remaining;
            remaining = Decimal::zero();
        }
    }

    Ok(MatchOutcome {
        unmatched: remaining,
        realized,
        plan,
    })
}
