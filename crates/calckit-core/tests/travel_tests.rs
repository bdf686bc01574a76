use calckit_core::travel::trip::{self, ExpenseLedger, TripInput, STANDARD_CATEGORIES};
use calckit_core::types::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn trip_with(ledger: &ExpenseLedger, people: u32) -> TripInput {
    TripInput {
        distance: dec!(530),
        fuel_efficiency: dec!(15),
        fuel_cost_per_unit: dec!(100),
        people,
        expenses: ledger.snapshot(),
    }
}

#[test]
fn test_reference_trip() {
    let mut ledger = ExpenseLedger::new();
    ledger.add("Food", dec!(500)).unwrap();
    let out = trip::calculate_trip_cost(&trip_with(&ledger, 4)).unwrap().result;
    assert_eq!(round_money(out.fuel_cost), dec!(3533.33));
    assert_eq!(round_money(out.total_trip_cost), dec!(4033.33));
    assert_eq!(round_money(out.cost_per_person), dec!(1008.33));
}

#[test]
fn test_ledger_edits_flow_into_totals() {
    let mut ledger = ExpenseLedger::new();
    for (i, category) in STANDARD_CATEGORIES.iter().enumerate() {
        ledger.add(*category, Decimal::from(100 * (i as i64 + 1))).unwrap();
    }
    let before = trip::calculate_trip_cost(&trip_with(&ledger, 2)).unwrap().result;
    assert_eq!(before.total_additional_expenses, dec!(1500));
    assert_eq!(before.breakdown.len(), 6);

    // Drop "Activities" (300)
    ledger.remove(2).unwrap();
    let after = trip::calculate_trip_cost(&trip_with(&ledger, 2)).unwrap().result;
    assert_eq!(after.total_additional_expenses, dec!(1200));
    assert!(after.breakdown.iter().all(|c| c.category != "Activities"));
    assert_eq!(
        before.total_trip_cost - after.total_trip_cost,
        dec!(300)
    );
}

#[test]
fn test_breakdown_sums_to_total() {
    let mut ledger = ExpenseLedger::new();
    ledger.add("Food", dec!(450)).unwrap();
    ledger.add("Drinks", dec!(120)).unwrap();
    ledger.add("Food", dec!(300)).unwrap();
    let out = trip::calculate_trip_cost(&trip_with(&ledger, 3)).unwrap().result;
    let sum: Decimal = out.breakdown.iter().map(|c| c.amount).sum();
    assert_eq!(sum, out.total_trip_cost);
    assert_eq!(out.breakdown[0].category, "Fuel");
    assert_eq!(out.breakdown[0].amount, out.fuel_cost);
}

#[test]
fn test_zero_people_is_not_divided() {
    let ledger = ExpenseLedger::new();
    let out = trip::calculate_trip_cost(&trip_with(&ledger, 0)).unwrap();
    assert_eq!(out.result.cost_per_person, out.result.total_trip_cost);
}
