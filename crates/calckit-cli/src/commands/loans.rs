use clap::Args;
use rust_decimal::Decimal;

use calckit_core::loans::emi::{self, EmiInput};

use super::CommandResult;
use crate::input;

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(long, default_value = "1000000")]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 10.5)
    #[arg(long, default_value = "10.5")]
    pub rate: Decimal,

    /// Loan tenure in years
    #[arg(long, default_value = "5")]
    pub years: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> CommandResult {
    let emi_input: EmiInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => EmiInput {
            principal: args.principal,
            annual_rate_pct: args.rate,
            tenure_years: args.years,
        },
    };
    let result = emi::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
