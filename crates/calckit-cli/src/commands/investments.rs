use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use calckit_core::investments::future_value::{self, FutureValueInput};
use calckit_core::investments::sip::{self, SipInput, SipPlan};

use super::CommandResult;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SipModeArg {
    Regular,
    StepUp,
    Lumpsum,
}

/// Arguments for the SIP calculator
#[derive(Args)]
pub struct SipArgs {
    /// Investment mode
    #[arg(long, value_enum, default_value = "regular")]
    pub mode: SipModeArg,

    /// Monthly contribution (regular and step-up)
    #[arg(long, default_value = "5000")]
    pub amount: Decimal,

    /// One-time investment (lumpsum)
    #[arg(long, default_value = "100000")]
    pub lumpsum: Decimal,

    /// Expected annual return in percent
    #[arg(long, default_value = "12")]
    pub rate: Decimal,

    /// Investment horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Annual increase of the monthly contribution in percent (step-up)
    #[arg(long, default_value = "10")]
    pub step_up: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a future value projection
#[derive(Args)]
pub struct FutureValueArgs {
    /// Amount invested today
    #[arg(long, default_value = "100")]
    pub amount: Decimal,

    /// Annual growth rate in percent
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    pub rate: Decimal,

    /// Years to grow (fractions allowed)
    #[arg(long, default_value = "5")]
    pub years: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> CommandResult {
    let sip_input: SipInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let plan = match args.mode {
                SipModeArg::Regular => SipPlan::Regular {
                    monthly_amount: args.amount,
                },
                SipModeArg::StepUp => SipPlan::StepUp {
                    monthly_amount: args.amount,
                    step_up_rate_pct: args.step_up,
                },
                SipModeArg::Lumpsum => SipPlan::Lumpsum {
                    amount: args.lumpsum,
                },
            };
            SipInput {
                plan,
                annual_rate_pct: args.rate,
                years: args.years,
            }
        }
    };
    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_future_value(args: FutureValueArgs) -> CommandResult {
    let fv_input: FutureValueInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => FutureValueInput {
            initial_amount: args.amount,
            rate_pct: args.rate,
            years: args.years,
        },
    };
    let result = future_value::calculate_future_value(&fv_input)?;
    Ok(serde_json::to_value(result)?)
}
