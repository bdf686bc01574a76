use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{compound_factor_frac, fv_lump, pct_to_fraction};
use crate::types::{
    checked_mul, with_metadata, ComputationOutput, Money, Rate, MAX_HORIZON_YEARS,
};
use crate::CalcResult;

/// Input for a single-sum compound growth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueInput {
    pub initial_amount: Money,
    /// Annual growth rate in percent
    pub rate_pct: Rate,
    /// Horizon in years; a fractional part is applied as a fractional exponent
    pub years: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: u32,
    pub value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FutureValueOutput {
    pub future_value: Money,
    pub total_interest: Money,
    /// Value at every whole year from 0 to floor(years)
    pub trajectory: Vec<GrowthPoint>,
}

/// FV = initial * (1 + rate/100)^years
pub fn calculate_future_value(
    input: &FutureValueInput,
) -> CalcResult<ComputationOutput<FutureValueOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.initial_amount.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "initial_amount".into(),
            reason: "Initial amount cannot be negative".into(),
        });
    }
    if input.years.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "years".into(),
            reason: "Years cannot be negative".into(),
        });
    }
    if input.years > Decimal::from(MAX_HORIZON_YEARS) {
        return Err(CalcError::InvalidInput {
            field: "years".into(),
            reason: format!("Horizon cannot exceed {MAX_HORIZON_YEARS} years"),
        });
    }
    if input.rate_pct <= dec!(-100) {
        return Err(CalcError::InvalidInput {
            field: "rate_pct".into(),
            reason: "Rate must be greater than -100%".into(),
        });
    }

    tracing::debug!(
        initial = %input.initial_amount,
        rate_pct = %input.rate_pct,
        years = %input.years,
        "calculating future value"
    );

    let rate = pct_to_fraction(input.rate_pct);
    let future_value = checked_mul(
        input.initial_amount,
        compound_factor_frac(rate, input.years)?,
        "future value",
    )?;
    let total_interest = future_value - input.initial_amount;

    if input.rate_pct.is_sign_negative() {
        warnings.push("Negative growth rate: value shrinks over time".into());
    }

    let whole_years = input.years.floor().to_u32().ok_or_else(|| CalcError::Overflow {
        context: "future value horizon".into(),
    })?;
    let trajectory = (0..=whole_years)
        .map(|year| {
            Ok(GrowthPoint {
                year,
                value: fv_lump(input.initial_amount, rate, year)?,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let output = FutureValueOutput {
        future_value,
        total_interest,
        trajectory,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compound growth of a single sum, annual compounding",
        input,
        warnings,
        elapsed,
        output,
    ))
}
