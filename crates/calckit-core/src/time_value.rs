use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{checked_div, checked_mul, Money, Rate};
use crate::CalcResult;

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert an annual percentage into a periodic fraction (10.5% p.a. -> 0.00875 monthly).
pub fn monthly_rate(annual_rate_pct: Rate) -> Decimal {
    annual_rate_pct / (MONTHS_PER_YEAR * HUNDRED)
}

/// Convert a percentage into a fraction (12 -> 0.12).
pub fn pct_to_fraction(rate_pct: Rate) -> Decimal {
    rate_pct / HUNDRED
}

/// (1 + r)^n for a whole number of periods, with overflow reported as an error.
pub fn compound_factor(rate: Decimal, periods: u32) -> CalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| CalcError::Overflow {
            context: format!("compounding {rate} over {periods} periods"),
        })
}

/// (1 + r)^t for a possibly fractional number of periods.
pub fn compound_factor_frac(rate: Decimal, periods: Decimal) -> CalcResult<Decimal> {
    if periods.fract().is_zero() {
        let whole = periods.to_u32().ok_or_else(|| CalcError::InvalidInput {
            field: "periods".into(),
            reason: format!("{periods} is not a valid whole number of periods"),
        })?;
        return compound_factor(rate, whole);
    }

    let base = Decimal::ONE + rate;
    if base <= Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field: "rate".into(),
            reason: "Growth rate must be greater than -100% for fractional periods".into(),
        });
    }
    base.checked_powd(periods).ok_or_else(|| CalcError::Overflow {
        context: format!("compounding {rate} over {periods} periods"),
    })
}

/// Future value of a single sum.
pub fn fv_lump(present_value: Money, rate: Decimal, periods: u32) -> CalcResult<Money> {
    checked_mul(present_value, compound_factor(rate, periods)?, "lump-sum future value")
}

/// Future value of an annuity-due: payments at the start of every period.
///
/// FV = P * ((1 + r)^n - 1) / r * (1 + r), collapsing to P * n when r = 0.
pub fn fv_annuity_due(payment: Money, rate: Decimal, periods: u32) -> CalcResult<Money> {
    const CONTEXT: &str = "annuity future value";
    if rate.is_zero() {
        return checked_mul(payment, Decimal::from(periods), CONTEXT);
    }
    let factor = compound_factor(rate, periods)?;
    let accrued = checked_mul(payment, factor - Decimal::ONE, CONTEXT)?;
    let growth = checked_div(accrued, rate, CONTEXT)?;
    checked_mul(growth, Decimal::ONE + rate, CONTEXT)
}

/// Level payment that amortises `principal` over `periods` (payments in arrears).
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), collapsing to P / n when r = 0.
pub fn pmt(rate: Decimal, periods: u32, principal: Money) -> CalcResult<Money> {
    if periods == 0 {
        return Err(CalcError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let factor = compound_factor(rate, periods)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let scaled = checked_mul(checked_mul(principal, rate, "PMT")?, factor, "PMT")?;
    checked_div(scaled, denominator, "PMT")
}
