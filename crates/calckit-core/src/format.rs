//! Display formatting for monetary results.
//!
//! Engines return full precision; rounding to the displayed number of
//! fraction digits happens here and nowhere else.

use crate::types::{round_to, Calculator, Money};

const RUPEE: &str = "₹";

/// Format an amount as Indian rupees with lakh/crore digit grouping.
///
/// `format_inr(dec!(1234567.891), 2)` gives `₹12,34,567.89`.
pub fn format_inr(amount: Money, fraction_digits: u32) -> String {
    let rounded = round_to(amount, fraction_digits);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut magnitude = rounded.abs();
    magnitude.rescale(fraction_digits);
    let text = magnitude.to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(RUPEE);
    out.push_str(&group_indian(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Format an amount with the digits the given calculator displays.
/// Returns `None` for calculators that have no monetary output.
pub fn format_for(calculator: Calculator, amount: Money) -> Option<String> {
    calculator
        .currency_digits()
        .map(|digits| format_inr(amount, digits))
}

/// Last three digits form one group, every two digits before that another.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
