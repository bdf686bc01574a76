use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::CalcError;
use crate::time_value::{fv_annuity_due, fv_lump, monthly_rate, pct_to_fraction};
use crate::types::{
    checked_add, checked_mul, with_metadata, ComputationOutput, Money, Rate, MAX_HORIZON_YEARS,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment plan, tagged by `mode` in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SipPlan {
    /// Same contribution at the start of every month.
    Regular { monthly_amount: Money },
    /// Monthly contribution raised by `step_up_rate_pct` after every full year.
    StepUp {
        monthly_amount: Money,
        step_up_rate_pct: Rate,
    },
    /// One upfront investment left to compound annually.
    Lumpsum { amount: Money },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SipMode {
    Regular,
    StepUp,
    Lumpsum,
}

impl SipPlan {
    pub fn mode(&self) -> SipMode {
        match self {
            SipPlan::Regular { .. } => SipMode::Regular,
            SipPlan::StepUp { .. } => SipMode::StepUp,
            SipPlan::Lumpsum { .. } => SipMode::Lumpsum,
        }
    }
}

/// Input for the SIP calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    #[serde(flatten)]
    pub plan: SipPlan,
    /// Expected annual return in percent
    pub annual_rate_pct: Rate,
    pub years: u32,
}

/// Portfolio value at a year boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipYearPoint {
    pub year: u32,
    pub invested: Money,
    pub future_value: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipOutput {
    pub mode: SipMode,
    pub future_value: Money,
    pub total_investment: Money,
    pub total_returns: Money,
    /// Year-by-year values for years 0..=years
    pub trajectory: Vec<SipYearPoint>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Project the value of a systematic or lumpsum investment.
pub fn calculate_sip(input: &SipInput) -> CalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let mode = input.plan.mode();
    tracing::debug!(?mode, rate_pct = %input.annual_rate_pct, years = input.years, "calculating SIP");

    if input.annual_rate_pct.is_zero() {
        warnings.push("Zero expected return: future value equals amount invested".into());
    }
    if input.years == 0 {
        warnings.push("Zero-year horizon: nothing is invested".into());
    }

    let (trajectory, methodology) = match &input.plan {
        SipPlan::Regular { monthly_amount } => (
            regular_trajectory(*monthly_amount, input.annual_rate_pct, input.years)?,
            "Regular SIP: annuity-due future value, monthly compounding",
        ),
        SipPlan::StepUp {
            monthly_amount,
            step_up_rate_pct,
        } => (
            step_up_trajectory(
                *monthly_amount,
                *step_up_rate_pct,
                input.annual_rate_pct,
                input.years,
            )?,
            "Step-up SIP: month-by-month simulation, contribution raised annually",
        ),
        SipPlan::Lumpsum { amount } => (
            lumpsum_trajectory(*amount, input.annual_rate_pct, input.years)?,
            "Lumpsum: annual compounding of a single investment",
        ),
    };

    // Trajectory always carries the year-0 point, so `last` is present.
    let (future_value, total_investment) = trajectory
        .last()
        .map(|p| (p.future_value, p.invested))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));
    let total_returns = future_value - total_investment;

    tracing::debug!(%future_value, %total_investment, "SIP computed");

    let output = SipOutput {
        mode,
        future_value,
        total_investment,
        total_returns,
        trajectory,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &SipInput) -> CalcResult<()> {
    if input.years > MAX_HORIZON_YEARS {
        return Err(CalcError::InvalidInput {
            field: "years".into(),
            reason: format!("Investment horizon cannot exceed {MAX_HORIZON_YEARS} years"),
        });
    }
    if input.annual_rate_pct.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Expected return cannot be negative".into(),
        });
    }
    let (field, amount) = match &input.plan {
        SipPlan::Regular { monthly_amount } => ("monthly_amount", *monthly_amount),
        SipPlan::StepUp {
            monthly_amount,
            step_up_rate_pct,
        } => {
            if *step_up_rate_pct <= dec!(-100) {
                return Err(CalcError::InvalidInput {
                    field: "step_up_rate_pct".into(),
                    reason: "Step-up rate must be greater than -100%".into(),
                });
            }
            ("monthly_amount", *monthly_amount)
        }
        SipPlan::Lumpsum { amount } => ("amount", *amount),
    };
    if amount.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: field.into(),
            reason: "Investment amount cannot be negative".into(),
        });
    }
    Ok(())
}

fn regular_trajectory(
    monthly_amount: Money,
    annual_rate_pct: Rate,
    years: u32,
) -> CalcResult<Vec<SipYearPoint>> {
    let rate = monthly_rate(annual_rate_pct);
    (0..=years)
        .map(|year| {
            let months = year * 12;
            Ok(SipYearPoint {
                year,
                invested: checked_mul(monthly_amount, Decimal::from(months), "SIP invested")?,
                future_value: fv_annuity_due(monthly_amount, rate, months)?,
            })
        })
        .collect()
}

/// Each month: invest, then grow the whole pot by one month's return.
/// The contribution steps up once a year has been completed.
fn step_up_trajectory(
    monthly_amount: Money,
    step_up_rate_pct: Rate,
    annual_rate_pct: Rate,
    years: u32,
) -> CalcResult<Vec<SipYearPoint>> {
    const CONTEXT: &str = "step-up SIP";
    let growth = Decimal::ONE + monthly_rate(annual_rate_pct);
    let step_up = Decimal::ONE + pct_to_fraction(step_up_rate_pct);

    let mut contribution = monthly_amount;
    let mut invested = Decimal::ZERO;
    let mut value = Decimal::ZERO;
    let mut points = Vec::with_capacity(years as usize + 1);
    points.push(SipYearPoint {
        year: 0,
        invested,
        future_value: value,
    });

    for year in 1..=years {
        for _ in 0..12 {
            invested = checked_add(invested, contribution, CONTEXT)?;
            value = checked_mul(checked_add(value, contribution, CONTEXT)?, growth, CONTEXT)?;
        }
        contribution = checked_mul(contribution, step_up, CONTEXT)?;
        points.push(SipYearPoint {
            year,
            invested,
            future_value: value,
        });
    }

    Ok(points)
}

fn lumpsum_trajectory(
    amount: Money,
    annual_rate_pct: Rate,
    years: u32,
) -> CalcResult<Vec<SipYearPoint>> {
    let rate = pct_to_fraction(annual_rate_pct);
    (0..=years)
        .map(|year| {
            Ok(SipYearPoint {
                year,
                invested: amount,
                future_value: fv_lump(amount, rate, year)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn regular(amount: Decimal, rate: Decimal, years: u32) -> SipInput {
        SipInput {
            plan: SipPlan::Regular {
                monthly_amount: amount,
            },
            annual_rate_pct: rate,
            years,
        }
    }

    #[test]
    fn test_regular_default() {
        // 5,000/month at 12% for 10 years => ~11.62 lakh
        let out = calculate_sip(&regular(dec!(5000), dec!(12), 10)).unwrap().result;
        assert_eq!(out.total_investment, dec!(600000));
        assert!(
            (out.future_value - dec!(1161695.38)).abs() < dec!(0.01),
            "got {}",
            out.future_value
        );
        assert_eq!(out.total_returns, out.future_value - out.total_investment);
        assert_eq!(out.trajectory.len(), 11);
        assert_eq!(out.trajectory[0].future_value, Decimal::ZERO);
    }

    #[test]
    fn test_regular_zero_rate() {
        let out = calculate_sip(&regular(dec!(2500), Decimal::ZERO, 3)).unwrap();
        assert_eq!(out.result.future_value, dec!(90000));
        assert_eq!(out.result.total_returns, Decimal::ZERO);
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_step_up_default() {
        let input = SipInput {
            plan: SipPlan::StepUp {
                monthly_amount: dec!(5000),
                step_up_rate_pct: dec!(10),
            },
            annual_rate_pct: dec!(12),
            years: 10,
        };
        let out = calculate_sip(&input).unwrap().result;
        assert_eq!(out.mode, SipMode::StepUp);
        assert!((out.total_investment - dec!(956245.48)).abs() < dec!(0.01));
        assert!((out.future_value - dec!(1687163.13)).abs() < dec!(0.01));
        assert_eq!(out.trajectory[1].invested, dec!(60000));
    }

    #[test]
    fn test_step_up_without_increase_matches_regular_investment() {
        let step = SipInput {
            plan: SipPlan::StepUp {
                monthly_amount: dec!(5000),
                step_up_rate_pct: Decimal::ZERO,
            },
            annual_rate_pct: dec!(12),
            years: 10,
        };
        let stepped = calculate_sip(&step).unwrap().result;
        let flat = calculate_sip(&regular(dec!(5000), dec!(12), 10)).unwrap().result;
        assert_eq!(stepped.total_investment, flat.total_investment);
        assert!((stepped.future_value - flat.future_value).abs() < dec!(0.01));
    }

    #[test]
    fn test_lumpsum() {
        let input = SipInput {
            plan: SipPlan::Lumpsum {
                amount: dec!(100000),
            },
            annual_rate_pct: dec!(12),
            years: 10,
        };
        let out = calculate_sip(&input).unwrap().result;
        assert_eq!(out.total_investment, dec!(100000));
        assert!((out.future_value - dec!(310584.82)).abs() < dec!(0.01));
        assert!(out.trajectory.iter().all(|p| p.invested == dec!(100000)));
        assert_eq!(out.trajectory[1].future_value, dec!(112000));
    }

    #[test]
    fn test_mode_tag_from_json() {
        let input: SipInput = serde_json::from_str(
            r#"{"mode": "step_up", "monthly_amount": 1000, "step_up_rate_pct": 5,
                "annual_rate_pct": 10, "years": 2}"#,
        )
        .unwrap();
        assert_eq!(input.plan.mode(), SipMode::StepUp);
    }

    #[test]
    fn test_step_up_overflow_is_an_error() {
        let input = SipInput {
            plan: SipPlan::StepUp {
                monthly_amount: dec!(5000),
                step_up_rate_pct: dec!(1000000),
            },
            annual_rate_pct: dec!(12),
            years: 30,
        };
        assert!(matches!(
            calculate_sip(&input),
            Err(CalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_regular_overflow_is_an_error() {
        let huge = dec!(10000000000000000000000000);
        assert!(matches!(
            calculate_sip(&regular(huge, dec!(12), MAX_HORIZON_YEARS)),
            Err(CalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_horizon_is_capped() {
        assert!(calculate_sip(&regular(dec!(5000), dec!(12), MAX_HORIZON_YEARS)).is_ok());
        assert!(matches!(
            calculate_sip(&regular(dec!(5000), Decimal::ZERO, MAX_HORIZON_YEARS + 1)),
            Err(CalcError::InvalidInput { field, .. }) if field == "years"
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(calculate_sip(&regular(dec!(-1), dec!(12), 1)).is_err());
    }
}
