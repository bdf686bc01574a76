use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use crate::error::CalcError;
use crate::types::{
    checked_add, checked_div, checked_mul, with_metadata, ComputationOutput, Money, Quantity,
};
use crate::CalcResult;

/// Split ratio written as `new:old`, e.g. `1:2`. Both sides are positive integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SplitRatio {
    new_shares: u32,
    old_shares: u32,
}

impl SplitRatio {
    pub fn new(new_shares: u32, old_shares: u32) -> CalcResult<Self> {
        if new_shares == 0 || old_shares == 0 {
            return Err(CalcError::MalformedRatio(format!(
                "{new_shares}:{old_shares}"
            )));
        }
        Ok(Self {
            new_shares,
            old_shares,
        })
    }

    pub fn new_shares(&self) -> u32 {
        self.new_shares
    }

    pub fn old_shares(&self) -> u32 {
        self.old_shares
    }

    /// new / old
    pub fn factor(&self) -> CalcResult<Decimal> {
        checked_div(
            Decimal::from(self.new_shares),
            Decimal::from(self.old_shares),
            "split factor",
        )
    }
}

impl FromStr for SplitRatio {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CalcError::MalformedRatio(s.to_string());
        let (new_part, old_part) = s.split_once(':').ok_or_else(malformed)?;
        let new_shares: u32 = new_part.trim().parse().map_err(|_| malformed())?;
        let old_shares: u32 = old_part.trim().parse().map_err(|_| malformed())?;
        Self::new(new_shares, old_shares).map_err(|_| malformed())
    }
}

impl TryFrom<String> for SplitRatio {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SplitRatio> for String {
    fn from(ratio: SplitRatio) -> Self {
        ratio.to_string()
    }
}

impl fmt::Display for SplitRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.new_shares, self.old_shares)
    }
}

/// Input for a stock split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSplitInput {
    /// Pre-split market price per share
    pub current_price: Money,
    pub split_ratio: SplitRatio,
    pub shares_owned: Quantity,
}

/// Holding after the split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockSplitOutput {
    pub split_factor: Decimal,
    pub new_price: Money,
    /// Whole shares credited by the split
    pub additional_shares: Quantity,
    pub total_shares: Quantity,
    /// Entitlement that could not be issued as a whole share
    pub fractional_shares: Quantity,
    /// Cash paid out for the fractional entitlement at the new price
    pub refund_amount: Money,
}

/// Calculate the holding after a stock split.
///
/// additional = floor(owned / old * new); the fraction left over is refunded
/// in cash at the post-split price, which keeps the holding's value constant.
pub fn calculate_stock_split(
    input: &StockSplitInput,
) -> CalcResult<ComputationOutput<StockSplitOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.current_price <= Decimal::ZERO {
        return Err(CalcError::InvalidInput {
            field: "current_price".into(),
            reason: "Current price must be positive".into(),
        });
    }
    if input.shares_owned.is_sign_negative() {
        return Err(CalcError::InvalidInput {
            field: "shares_owned".into(),
            reason: "Shares owned cannot be negative".into(),
        });
    }

    let ratio = SplitRatio::new(input.split_ratio.new_shares, input.split_ratio.old_shares)?;
    tracing::debug!(%ratio, shares = %input.shares_owned, "calculating stock split");

    let split_factor = ratio.factor()?;
    let exact_additional = checked_mul(
        input.shares_owned / Decimal::from(ratio.old_shares),
        Decimal::from(ratio.new_shares),
        "additional shares",
    )?;
    let additional_shares = exact_additional.floor();
    let total_shares = checked_add(input.shares_owned, additional_shares, "total shares")?;

    let new_price = if total_shares.is_zero() {
        warnings.push("No shares held; price is unaffected by the split".into());
        input.current_price
    } else {
        let holding_value = checked_mul(input.current_price, input.shares_owned, "holding value")?;
        holding_value / total_shares
    };

    let fractional_shares = exact_additional - additional_shares;
    let refund_amount = fractional_shares * new_price;

    let output = StockSplitOutput {
        split_factor,
        new_price,
        additional_shares,
        total_shares,
        fractional_shares,
        refund_amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Stock split with cash-in-lieu for fractional shares",
        &serde_json::json!({
            "current_price": input.current_price.to_string(),
            "split_ratio": ratio.to_string(),
            "shares_owned": input.shares_owned.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
