use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;

use calckit_core::stocks::average::{self, StockAverageInput, StockLot};
use calckit_core::stocks::split::{self, SplitRatio, StockSplitInput};

use super::CommandResult;
use crate::input;

/// Arguments for averaging purchase lots
#[derive(Args)]
pub struct StockAverageArgs {
    /// Purchase lot as UNITS@PRICE (repeatable, e.g. --lot 10@250 --lot 5@240)
    #[arg(long = "lot", value_parser = parse_lot)]
    pub lots: Vec<StockLot>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a stock split
#[derive(Args)]
pub struct StockSplitArgs {
    /// Current share price before the split
    #[arg(long, default_value = "100")]
    pub price: Decimal,

    /// Split ratio as NEW:OLD (e.g. 1:2)
    #[arg(long, default_value = "1:2")]
    pub ratio: SplitRatio,

    /// Number of shares currently held
    #[arg(long, default_value = "100")]
    pub shares: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

fn parse_lot(s: &str) -> Result<StockLot, String> {
    let (units, price) = s
        .split_once('@')
        .ok_or_else(|| format!("'{s}' is not in UNITS@PRICE form"))?;
    let units = Decimal::from_str(units.trim()).map_err(|e| format!("bad units '{units}': {e}"))?;
    let price = Decimal::from_str(price.trim()).map_err(|e| format!("bad price '{price}': {e}"))?;
    Ok(StockLot { units, price })
}

pub fn run_stock_average(args: StockAverageArgs) -> CommandResult {
    let avg_input: StockAverageInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None if args.lots.is_empty() => {
            return Err("at least one --lot UNITS@PRICE (or --input) is required".into())
        }
        None => StockAverageInput { lots: args.lots },
    };
    let result = average::calculate_stock_average(&avg_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_stock_split(args: StockSplitArgs) -> CommandResult {
    let split_input: StockSplitInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => StockSplitInput {
            current_price: args.price,
            split_ratio: args.ratio,
            shares_owned: args.shares,
        },
    };
    let result = split::calculate_stock_split(&split_input)?;
    Ok(serde_json::to_value(result)?)
}
