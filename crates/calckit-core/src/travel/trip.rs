use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::types::{
    checked_add, checked_div, checked_mul, with_metadata, ComputationOutput, Money, Quantity,
};
use crate::CalcResult;

/// Category labels offered for additional expenses.
pub const STANDARD_CATEGORIES: [&str; 5] = ["Food", "Accommodation", "Activities", "Drinks", "Other"];

/// Synthetic breakdown category for the fuel bill.
pub const FUEL_CATEGORY: &str = "Fuel";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripExpense {
    pub category: String,
    pub amount: Money,
}

/// Ordered, caller-owned list of additional expenses.
///
/// The engine never mutates it; pass `snapshot()` (or the slice) into
/// [`calculate_trip_cost`] each time the totals are needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseLedger {
    items: Vec<TripExpense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expense. Amounts of zero or less are rejected.
    pub fn add(&mut self, category: impl Into<String>, amount: Money) -> CalcResult<()> {
        if amount <= Decimal::ZERO {
            return Err(CalcError::InvalidInput {
                field: "amount".into(),
                reason: "Expense amount must be positive".into(),
            });
        }
        self.items.push(TripExpense {
            category: category.into(),
            amount,
        });
        Ok(())
    }

    /// Remove and return the expense at `index`, preserving the order of the rest.
    pub fn remove(&mut self, index: usize) -> CalcResult<TripExpense> {
        if index >= self.items.len() {
            return Err(CalcError::InvalidInput {
                field: "index".into(),
                reason: format!(
                    "No expense at position {index} (ledger has {})",
                    self.items.len()
                ),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn items(&self) -> &[TripExpense] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<TripExpense> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Input for splitting a road trip's cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripInput {
    /// Distance in km
    pub distance: Quantity,
    /// km per litre (or per unit of fuel)
    pub fuel_efficiency: Quantity,
    pub fuel_cost_per_unit: Money,
    pub people: u32,
    #[serde(default)]
    pub expenses: Vec<TripExpense>,
}

/// Amount spent per category, fuel first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripOutput {
    pub fuel_required: Quantity,
    pub fuel_cost: Money,
    pub total_additional_expenses: Money,
    pub total_trip_cost: Money,
    pub cost_per_person: Money,
    pub breakdown: Vec<CategoryTotal>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Fuel cost plus additional expenses, split evenly between travellers.
///
/// With zero travellers the total is returned undivided.
pub fn calculate_trip_cost(input: &TripInput) -> CalcResult<ComputationOutput<TripOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.distance.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "distance".into(),
            reason: "Distance cannot be negative".into(),
        });
    }
    if input.fuel_efficiency.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "fuel required (fuel efficiency is zero)".into(),
        });
    }
    if input.fuel_efficiency.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "fuel_efficiency".into(),
            reason: "Fuel efficiency must be positive".into(),
        });
    }
    if input.fuel_cost_per_unit.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "fuel_cost_per_unit".into(),
            reason: "Fuel price cannot be negative".into(),
        });
    }

    tracing::debug!(
        distance = %input.distance,
        people = input.people,
        expenses = input.expenses.len(),
        "calculating trip cost"
    );

    let fuel_required = checked_div(input.distance, input.fuel_efficiency, "fuel required")?;
    let fuel_cost = checked_mul(fuel_required, input.fuel_cost_per_unit, "fuel cost")?;
    let total_additional_expenses = input
        .expenses
        .iter()
        .try_fold(Decimal::ZERO, |sum, e| checked_add(sum, e.amount, "additional expenses"))?;
    let total_trip_cost = checked_add(fuel_cost, total_additional_expenses, "total trip cost")?;

    let cost_per_person = if input.people > 0 {
        total_trip_cost / Decimal::from(input.people)
    } else {
        warnings.push("No travellers given; cost per person is the full trip cost".into());
        total_trip_cost
    };

    let breakdown = breakdown_by_category(fuel_cost, &input.expenses)?;

    tracing::debug!(%total_trip_cost, %cost_per_person, "trip cost computed");

    let output = TripOutput {
        fuel_required,
        fuel_cost,
        total_additional_expenses,
        total_trip_cost,
        cost_per_person,
        breakdown,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fuel (distance / efficiency x price) plus itemised expenses, split evenly",
        &serde_json::json!({
            "distance": input.distance.to_string(),
            "fuel_efficiency": input.fuel_efficiency.to_string(),
            "fuel_cost_per_unit": input.fuel_cost_per_unit.to_string(),
            "people": input.people,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Group expenses by label in order of first appearance, seeded with fuel.
/// An expense labelled "Fuel" folds into the fuel entry.
pub fn breakdown_by_category(
    fuel_cost: Money,
    expenses: &[TripExpense],
) -> CalcResult<Vec<CategoryTotal>> {
    let mut totals = vec![CategoryTotal {
        category: FUEL_CATEGORY.to_string(),
        amount: fuel_cost,
    }];
    for expense in expenses {
        match totals.iter_mut().find(|t| t.category == expense.category) {
            Some(existing) => {
                existing.amount =
                    checked_add(existing.amount, expense.amount, &expense.category)?;
            }
            None => totals.push(CategoryTotal {
                category: expense.category.clone(),
                amount: expense.amount,
            }),
        }
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::round_money;
    use rust_decimal_macros::dec;

    fn default_input(expenses: Vec<TripExpense>) -> TripInput {
        TripInput {
            distance: dec!(530),
            fuel_efficiency: dec!(15),
            fuel_cost_per_unit: dec!(100),
            people: 4,
            expenses,
        }
    }

    fn expense(category: &str, amount: Decimal) -> TripExpense {
        TripExpense {
            category: category.into(),
            amount,
        }
    }

    #[test]
    fn test_overflowing_expenses_are_an_error() {
        let huge = dec!(50000000000000000000000000000);
        let input = default_input(vec![expense("Food", huge), expense("Food", huge)]);
        assert!(matches!(
            calculate_trip_cost(&input),
            Err(CalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_default_trip() {
        let out = calculate_trip_cost(&default_input(vec![expense("Food", dec!(500))]))
            .unwrap()
            .result;
        assert_eq!(round_money(out.fuel_required), dec!(35.33));
        assert_eq!(round_money(out.fuel_cost), dec!(3533.33));
        assert_eq!(out.total_additional_expenses, dec!(500));
        assert_eq!(round_money(out.total_trip_cost), dec!(4033.33));
        assert_eq!(round_money(out.cost_per_person), dec!(1008.33));
    }

    #[test]
    fn test_zero_people_returns_total() {
        let mut input = default_input(vec![]);
        input.people = 0;
        let out = calculate_trip_cost(&input).unwrap();
        assert_eq!(out.result.cost_per_person, out.result.total_trip_cost);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_breakdown_groups_by_label() {
        let expenses = vec![
            expense("Food", dec!(500)),
            expense("Drinks", dec!(200)),
            expense("Food", dec!(300)),
            expense("Fuel", dec!(50)),
        ];
        let totals = breakdown_by_category(dec!(1000), &expenses).unwrap();
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0], CategoryTotal { category: "Fuel".into(), amount: dec!(1050) });
        assert_eq!(totals[1].category, "Food");
        assert_eq!(totals[1].amount, dec!(800));
        assert_eq!(totals[2].category, "Drinks");
    }

    #[test]
    fn test_breakdown_without_expenses_has_fuel() {
        let totals = breakdown_by_category(dec!(42), &[]).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].category, FUEL_CATEGORY);
    }

    #[test]
    fn test_ledger_add_remove() {
        let mut ledger = ExpenseLedger::new();
        ledger.add("Food", dec!(500)).unwrap();
        ledger.add("Activities", dec!(1200)).unwrap();
        ledger.add("Other", dec!(80)).unwrap();
        assert!(ledger.add("Drinks", Decimal::ZERO).is_err());
        assert_eq!(ledger.len(), 3);

        let removed = ledger.remove(1).unwrap();
        assert_eq!(removed.category, "Activities");
        assert_eq!(ledger.items()[1].category, "Other");
        assert!(ledger.remove(5).is_err());
    }

    #[test]
    fn test_engine_does_not_touch_ledger() {
        let mut ledger = ExpenseLedger::new();
        ledger.add("Food", dec!(500)).unwrap();
        let out = calculate_trip_cost(&default_input(ledger.snapshot())).unwrap();
        assert_eq!(out.result.total_additional_expenses, dec!(500));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_zero_efficiency_rejected() {
        let mut input = default_input(vec![]);
        input.fuel_efficiency = Decimal::ZERO;
        assert!(matches!(
            calculate_trip_cost(&input),
            Err(CalcError::DivisionByZero { .. })
        ));
    }
}
