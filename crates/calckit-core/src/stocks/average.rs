use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{
    checked_add, checked_div, checked_mul, with_metadata, ComputationOutput, Money, Quantity,
};
use crate::CalcResult;

/// A single purchase of a stock: how many units at what price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLot {
    pub units: Quantity,
    pub price: Money,
}

impl StockLot {
    pub fn cost(&self) -> CalcResult<Money> {
        checked_mul(self.units, self.price, "lot investment")
    }
}

/// Input for averaging the cost of several purchase lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAverageInput {
    /// Purchase lots in the order they were entered
    pub lots: Vec<StockLot>,
}

/// Investment made through a single lot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotInvestment {
    /// 1-based position of the lot in the input
    pub lot: usize,
    pub units: Quantity,
    pub price: Money,
    pub investment: Money,
}

/// Weighted-average outcome across all lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAverageOutput {
    pub total_units: Quantity,
    /// total_amount / total_units, or zero when no units are held
    pub average_price: Money,
    pub total_amount: Money,
    pub lots: Vec<LotInvestment>,
}

/// Calculate the weighted average purchase price across lots.
///
/// Negative units or prices are accepted as given; they are flagged in the
/// warnings but not rejected.
pub fn calculate_stock_average(
    input: &StockAverageInput,
) -> CalcResult<ComputationOutput<StockAverageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    tracing::debug!(lots = input.lots.len(), "calculating stock average");

    if input.lots.is_empty() {
        warnings.push("No purchase lots supplied; all totals are zero".into());
    }

    let mut total_units = Decimal::ZERO;
    let mut total_amount = Decimal::ZERO;
    let mut lots = Vec::with_capacity(input.lots.len());

    for (i, lot) in input.lots.iter().enumerate() {
        if lot.units.is_sign_negative() || lot.price.is_sign_negative() {
            warnings.push(format!("Lot {} has a negative units or price value", i + 1));
        }
        let investment = lot.cost()?;
        total_units = checked_add(total_units, lot.units, "total units")?;
        total_amount = checked_add(total_amount, investment, "total amount")?;
        lots.push(LotInvestment {
            lot: i + 1,
            units: lot.units,
            price: lot.price,
            investment,
        });
    }

    let average_price = if total_units.is_zero() {
        if !input.lots.is_empty() {
            warnings.push("Total units is zero; average price reported as zero".into());
        }
        Decimal::ZERO
    } else {
        checked_div(total_amount, total_units, "average price")?
    };

    tracing::debug!(%average_price, %total_units, "stock average computed");

    let output = StockAverageOutput {
        total_units,
        average_price,
        total_amount,
        lots,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Weighted average cost (sum of units x price / sum of units)",
        &serde_json::json!({ "lot_count": input.lots.len() }),
        warnings,
        elapsed,
        output,
    ))
}
