use chrono::NaiveDate;
use lotbasis::{match_sale, AssetId, Decimal, LotAction, LotId, PurchaseLot};

fn d(s: &str) -> Decimal {
    Decimal::from_str_exact(s).unwrap()
}

fn lot(id: i64, day: u32, qty: &str, px: &str) -> PurchaseLot {
    PurchaseLot::new(
        LotId(id),
        AssetId(1),
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        d(qty),
        d(px),
    )
}

/// Quantity matched across the plan, reading each action against the
/// lot it touches.
fn planned_quantity(lots: &[PurchaseLot], plan: &[LotAction]) -> Decimal {
    plan.iter().fold(Decimal::zero(), |acc, action| {
        let source = lots
            .iter()
            .find(|l| l.id == action.lot_id())
            .expect("plan references a known lot");
        match action {
            LotAction::Delete(_) => acc + source.quantity,
            LotAction::Update { new_quantity, .. } => acc + (source.quantity - *new_quantity),
        }
    })
}

fn total_quantity(lots: &[PurchaseLot]) -> Decimal {
    lots.iter().fold(Decimal::zero(), |acc, l| acc + l.quantity)
}

#[test]
fn matched_quantity_is_conserved_when_lots_suffice() {
    let lots = [
        lot(1, 1, "5", "80"),
        lot(2, 2, "10", "100"),
        lot(3, 3, "15", "120"),
        lot(4, 4, "0.25", "90"),
    ];
    for qty in ["1", "5", "12.5", "20", "30.25"] {
        let sale_qty = d(qty);
        let outcome = match_sale(&lots, sale_qty, d("130")).unwrap();
        assert_eq!(outcome.unmatched, Decimal::zero(), "sale of {}", qty);
        assert_eq!(
            planned_quantity(&lots, &outcome.plan),
            sale_qty,
            "sale of {}",
            qty
        );
    }
}

#[test]
fn oversell_remainder_is_exact_and_every_lot_is_deleted() {
    let lots = [lot(1, 1, "5", "80"), lot(2, 2, "10", "100")];
    let outcome = match_sale(&lots, d("40"), d("130")).unwrap();

    assert_eq!(outcome.unmatched, d("40") - total_quantity(&lots));
    assert_eq!(
        outcome.plan,
        vec![LotAction::Delete(LotId(1)), LotAction::Delete(LotId(2))]
    );
}

#[test]
fn no_plan_carries_a_non_positive_update() {
    let lots = [
        lot(1, 1, "5", "80"),
        lot(2, 2, "10", "100"),
        lot(3, 3, "15", "120"),
    ];
    for qty in ["5", "15", "30", "7.5", "29.999"] {
        let outcome = match_sale(&lots, d(qty), d("100")).unwrap();
        for action in &outcome.plan {
            if let LotAction::Update { new_quantity, .. } = action {
                assert!(
                    !new_quantity.is_negative(),
                    "sale of {} produced a negative update",
                    qty
                );
            }
        }
        // An exact-exhaustion update (zero) is allowed in the plan; it is
        // normalized to a delete at application time.
    }
}

#[test]
fn worked_fifo_scenario_realizes_600() {
    let lots = [
        lot(1, 1, "5", "80"),
        lot(2, 2, "10", "100"),
        lot(3, 3, "15", "120"),
    ];
    let outcome = match_sale(&lots, d("20"), d("130")).unwrap();

    assert_eq!(outcome.realized, d("600"));
    assert_eq!(outcome.unmatched, Decimal::zero());
    assert_eq!(outcome.plan.len(), 3);
    assert_eq!(
        outcome.plan[2],
        LotAction::Update {
            lot: LotId(3),
            new_quantity: d("10"),
        }
    );
}

#[test]
fn empty_sequence_scenario() {
    let outcome = match_sale(&[], d("10"), d("100")).unwrap();
    assert_eq!(outcome.unmatched, d("10"));
    assert_eq!(outcome.realized, Decimal::zero());
    assert!(outcome.plan.is_empty());
}

#[test]
fn single_lot_partial_sale_scenario() {
    let lots = [lot(1, 1, "10", "400")];
    let outcome = match_sale(&lots, d("5"), d("200")).unwrap();
    assert_eq!(
        outcome.plan,
        vec![LotAction::Update {
            lot: LotId(1),
            new_quantity: d("5"),
        }]
    );
    assert_eq!(outcome.realized, d("-1000"));
}

#[test]
fn single_lot_oversell_scenario() {
    let lots = [lot(1, 1, "5", "400")];
    let outcome = match_sale(&lots, d("10"), d("200")).unwrap();
    assert_eq!(outcome.plan, vec![LotAction::Delete(LotId(1))]);
    assert_eq!(outcome.unmatched, d("5"));
    assert_eq!(outcome.realized, d("-1000"));
}

#[test]
fn realized_total_matches_per_lot_contributions() {
    // Loss-making early lot, gain-making later lot; contributions are
    // summed in consumption order.
    let lots = [lot(1, 1, "2", "150"), lot(2, 2, "3", "50")];
    let outcome = match_sale(&lots, d("4"), d("100")).unwrap();
    // (100-150)*2 + (100-50)*2
    assert_eq!(outcome.realized, d("0"));
    assert_eq!(outcome.unmatched, Decimal::zero());
}
