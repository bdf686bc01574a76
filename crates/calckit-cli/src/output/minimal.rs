use calckit_core::format::format_for;
use calckit_core::Calculator;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use super::{result_section, scalar_text};

/// Headline fields in priority order, and whether each is a currency amount.
const HEADLINE_KEYS: [(&str, bool); 6] = [
    ("average_price", true),
    ("new_price", true),
    ("emi", true),
    ("future_value", true),
    ("cost_per_person", true),
    ("bmi", false),
];

/// Print just the headline answer.
///
/// Currency amounts are formatted in rupees with the calculator's display
/// digits; an age prints as years, months and days.
pub fn print_minimal(value: &Value, calculator: Option<Calculator>) {
    let result = result_section(value);

    if let Value::Object(map) = result {
        if let (Some(y), Some(m), Some(d)) = (map.get("years"), map.get("months"), map.get("days"))
        {
            println!(
                "{} years, {} months, {} days",
                scalar_text(y),
                scalar_text(m),
                scalar_text(d)
            );
            return;
        }

        for (key, is_money) in HEADLINE_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", render(val, is_money, calculator));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result));
}

fn render(value: &Value, is_money: bool, calculator: Option<Calculator>) -> String {
    let text = scalar_text(value);
    if !is_money {
        return text;
    }
    calculator
        .zip(Decimal::from_str(&text).ok())
        .and_then(|(calc, amount)| format_for(calc, amount))
        .unwrap_or(text)
}
