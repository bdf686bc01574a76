use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Stocks
// ---------------------------------------------------------------------------

#[napi]
pub fn stock_average(input_json: String) -> NapiResult<String> {
    let input: calckit_core::stocks::average::StockAverageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::stocks::average::calculate_stock_average(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn stock_split(input_json: String) -> NapiResult<String> {
    let input: calckit_core::stocks::split::StockSplitInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        calckit_core::stocks::split::calculate_stock_split(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans and investments
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: calckit_core::loans::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::loans::emi::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: calckit_core::investments::sip::SipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::investments::sip::calculate_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn future_value(input_json: String) -> NapiResult<String> {
    let input: calckit_core::investments::future_value::FutureValueInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::investments::future_value::calculate_future_value(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Travel
// ---------------------------------------------------------------------------

#[napi]
pub fn trip_cost(input_json: String) -> NapiResult<String> {
    let input: calckit_core::travel::trip::TripInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        calckit_core::travel::trip::calculate_trip_cost(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Append an expense to a serialized ledger and return the updated ledger.
#[napi]
pub fn ledger_add(ledger_json: String, category: String, amount: String) -> NapiResult<String> {
    let mut ledger: calckit_core::travel::trip::ExpenseLedger =
        serde_json::from_str(&ledger_json).map_err(to_napi_error)?;
    let amount = Decimal::from_str(&amount).map_err(to_napi_error)?;
    ledger.add(category, amount).map_err(to_napi_error)?;
    serde_json::to_string(&ledger).map_err(to_napi_error)
}

/// Remove the expense at `index` from a serialized ledger and return the updated ledger.
#[napi]
pub fn ledger_remove(ledger_json: String, index: u32) -> NapiResult<String> {
    let mut ledger: calckit_core::travel::trip::ExpenseLedger =
        serde_json::from_str(&ledger_json).map_err(to_napi_error)?;
    ledger.remove(index as usize).map_err(to_napi_error)?;
    serde_json::to_string(&ledger).map_err(to_napi_error)
}

#[napi]
pub fn expense_categories() -> Vec<String> {
    calckit_core::travel::trip::STANDARD_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Personal
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_age(input_json: String) -> NapiResult<String> {
    let input: calckit_core::personal::age::AgeInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::personal::age::calculate_age(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_bmi(input_json: String) -> NapiResult<String> {
    let input: calckit_core::personal::bmi::BmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calckit_core::personal::bmi::calculate_bmi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Convert `{weight, height}` between `"metric"` and `"imperial"`.
#[napi]
pub fn convert_units(measurements_json: String, from: String, to: String) -> NapiResult<String> {
    use calckit_core::personal::bmi::{self, BodyMeasurements, UnitSystem};

    let measurements: BodyMeasurements =
        serde_json::from_str(&measurements_json).map_err(to_napi_error)?;
    let from: UnitSystem =
        serde_json::from_value(serde_json::Value::String(from)).map_err(to_napi_error)?;
    let to: UnitSystem =
        serde_json::from_value(serde_json::Value::String(to)).map_err(to_napi_error)?;
    let converted = bmi::convert_units(measurements, from, to).map_err(to_napi_error)?;
    serde_json::to_string(&converted).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Rupee display string for `amount` (a decimal string) with the given digits.
#[napi]
pub fn format_currency(amount: String, fraction_digits: u32) -> NapiResult<String> {
    let amount = Decimal::from_str(&amount).map_err(to_napi_error)?;
    Ok(calckit_core::format::format_inr(amount, fraction_digits))
}
