use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{is_row_array, result_section, scalar_text};

/// Format output as tables: scalar result fields first, then one table per
/// row-shaped field such as an amortisation schedule.
pub fn print_table(value: &Value) {
    match result_section(value) {
        Value::Object(result) => {
            print_fields(result);
            for (key, field) in result {
                if let Value::Array(rows) = field {
                    if is_row_array(field) {
                        println!("\n{}:", heading(key));
                        print_rows(rows);
                    }
                }
            }
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        if is_row_array(val) {
            continue;
        }
        builder.push_record([key.as_str(), &cell_text(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            println!("{}", cell_text(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| heading(h)));
    for item in rows {
        if let Value::Object(map) = item {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell_text).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Null => "-".to_string(),
        other => scalar_text(other),
    }
}

/// `closing_balance` -> `Closing Balance`
fn heading(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
