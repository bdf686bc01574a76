use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{monthly_rate, pmt};
use crate::types::{
    checked_mul, with_metadata, ComputationOutput, Money, Rate, MAX_HORIZON_YEARS,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed-rate loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual interest rate in percent (10.5 = 10.5%)
    pub annual_rate_pct: Rate,
    pub tenure_years: u32,
}

/// Instalment and totals for the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub emi: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    pub months: u32,
    /// Principal as a percentage of the total amount payable
    pub principal_share_pct: Rate,
    /// Interest as a percentage of the total amount payable
    pub interest_share_pct: Rate,
    pub schedule: Vec<AmortizationYear>,
}

/// One year of the amortisation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub opening_balance: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Calculate the equated monthly instalment for a fixed-rate loan.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1) with r = annual% / 1200 and
/// n = years * 12. At a zero rate the instalment is simply P / n.
pub fn calculate_emi(input: &EmiInput) -> CalcResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // --- Validation ---
    if input.principal <= Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if input.annual_rate_pct.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.tenure_years == 0 {
        return Err(CalcError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Loan tenure must be at least one year".into(),
        });
    }

    if input.tenure_years > MAX_HORIZON_YEARS {
        return Err(CalcError::InvalidInput {
            field: "tenure_years".into(),
            reason: format!("Loan tenure cannot exceed {MAX_HORIZON_YEARS} years"),
        });
    }

    let months = input.tenure_years * 12;
    let rate = monthly_rate(input.annual_rate_pct);

    tracing::debug!(
        principal = %input.principal,
        rate_pct = %input.annual_rate_pct,
        months,
        "calculating EMI"
    );

    if rate.is_zero() {
        warnings.push("Zero interest rate: EMI is principal divided by months".into());
    }

    let emi = pmt(rate, months, input.principal)?;
    let total_amount = checked_mul(emi, Decimal::from(months), "total amount payable")?;
    let total_interest = total_amount - input.principal;

    let principal_share_pct = input.principal / total_amount * dec!(100);
    let interest_share_pct = dec!(100) - principal_share_pct;

    let schedule = amortize(input.principal, rate, emi, input.tenure_years);

    tracing::debug!(%emi, %total_interest, "EMI computed");

    let output = EmiOutput {
        emi,
        total_interest,
        total_amount,
        months,
        principal_share_pct,
        interest_share_pct,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Reducing-balance EMI (annuity in arrears, monthly compounding)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "tenure_years": input.tenure_years,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Roll the balance forward month by month, summarised per year.
/// The last instalment clears whatever balance remains.
fn amortize(principal: Money, rate: Decimal, emi: Money, years: u32) -> Vec<AmortizationYear> {
    let mut schedule = Vec::with_capacity(years as usize);
    let mut balance = principal;

    for year in 1..=years {
        let opening_balance = balance;
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for month in 1..=12 {
            let interest = balance * rate;
            let is_last = year == years && month == 12;
            let repaid = if is_last { balance } else { emi - interest };
            balance -= repaid;
            principal_paid += repaid;
            interest_paid += interest;
        }

        schedule.push(AmortizationYear {
            year,
            opening_balance,
            principal_paid,
            interest_paid,
            closing_balance: balance,
        });
    }

    schedule
}
