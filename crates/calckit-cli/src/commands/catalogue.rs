use serde_json::json;

use calckit_core::Calculator;

use super::CommandResult;

/// List every calculator with its display title and currency precision.
pub fn run_list() -> CommandResult {
    let calculators: Vec<_> = Calculator::ALL
        .iter()
        .map(|c| {
            json!({
                "id": c,
                "title": c.title(),
                "currency_digits": c.currency_digits(),
            })
        })
        .collect();
    Ok(json!({ "calculators": calculators }))
}
