use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::CalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (10.5 = 10.5%), as every calculator takes them.
pub type Rate = Decimal;

/// Share counts, litres, kilograms and other non-monetary amounts
pub type Quantity = Decimal;

/// The calculators offered by the suite, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Calculator {
    StockAverage,
    StockSplit,
    Emi,
    Sip,
    FutureValue,
    Trip,
    Age,
    Bmi,
}

impl Calculator {
    pub const ALL: [Calculator; 8] = [
        Calculator::StockAverage,
        Calculator::StockSplit,
        Calculator::Emi,
        Calculator::Sip,
        Calculator::FutureValue,
        Calculator::Trip,
        Calculator::Age,
        Calculator::Bmi,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Calculator::StockAverage => "Stock Average",
            Calculator::StockSplit => "Stock Split",
            Calculator::Emi => "EMI Calculator",
            Calculator::Sip => "SIP Calculator",
            Calculator::FutureValue => "Future Value",
            Calculator::Trip => "Trip Calculator",
            Calculator::Age => "Age Calculator",
            Calculator::Bmi => "BMI Calculator",
        }
    }

    /// Fraction digits used when this calculator displays currency.
    /// `None` for calculators without monetary output.
    pub fn currency_digits(&self) -> Option<u32> {
        match self {
            Calculator::StockAverage | Calculator::StockSplit => Some(2),
            Calculator::Emi | Calculator::Sip | Calculator::FutureValue | Calculator::Trip => {
                Some(0)
            }
            Calculator::Age | Calculator::Bmi => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Longest horizon, in years, accepted by the loan and investment calculators.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// `a * b`, with overflow reported against `context`.
pub fn checked_mul(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| CalcError::Overflow {
        context: context.into(),
    })
}

/// `a + b`, with overflow reported against `context`.
pub fn checked_add(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| CalcError::Overflow {
        context: context.into(),
    })
}

/// `a / b`, with overflow or a zero divisor reported against `context`.
pub fn checked_div(a: Decimal, b: Decimal, context: &str) -> CalcResult<Decimal> {
    if b.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: context.into(),
        });
    }
    a.checked_div(b).ok_or_else(|| CalcError::Overflow {
        context: context.into(),
    })
}

/// Round to `dp` places, halves away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a monetary amount to paise/cents.
pub fn round_money(value: Money) -> Money {
    round_to(value, 2)
}
