use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;

use calckit_core::travel::trip::{self, ExpenseLedger, TripInput};

use super::CommandResult;
use crate::input;

/// Arguments for the trip cost calculator
#[derive(Args)]
pub struct TripArgs {
    /// Distance to travel (km or miles)
    #[arg(long, default_value = "530")]
    pub distance: Decimal,

    /// Distance covered per unit of fuel
    #[arg(long, default_value = "15")]
    pub efficiency: Decimal,

    /// Price per unit of fuel
    #[arg(long = "fuel-price", default_value = "100")]
    pub fuel_price: Decimal,

    /// Number of people sharing the cost
    #[arg(long, default_value = "4")]
    pub people: u32,

    /// Additional expense as CATEGORY=AMOUNT (repeatable, e.g. --expense Food=500)
    #[arg(long = "expense", value_parser = parse_expense)]
    pub expenses: Vec<(String, Decimal)>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_expense(s: &str) -> Result<(String, Decimal), String> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("'{s}' is not in CATEGORY=AMOUNT form"))?;
    let category = category.trim();
    if category.is_empty() {
        return Err(format!("'{s}' has an empty category"));
    }
    let amount =
        Decimal::from_str(amount.trim()).map_err(|e| format!("bad amount '{amount}': {e}"))?;
    Ok((category.to_string(), amount))
}

pub fn run_trip(args: TripArgs) -> CommandResult {
    let trip_input: TripInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let mut ledger = ExpenseLedger::new();
            for (category, amount) in args.expenses {
                ledger.add(category, amount)?;
            }
            tracing::debug!(expenses = ledger.len(), "built expense ledger from flags");
            TripInput {
                distance: args.distance,
                fuel_efficiency: args.efficiency,
                fuel_cost_per_unit: args.fuel_price,
                people: args.people,
                expenses: ledger.snapshot(),
            }
        }
    };
    let result = trip::calculate_trip_cost(&trip_input)?;
    Ok(serde_json::to_value(result)?)
}
