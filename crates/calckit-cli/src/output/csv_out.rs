use serde_json::Value;
use std::io;

use super::{is_row_array, result_section, scalar_text};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Scalar result fields come first as `field,value` pairs. Each row-shaped
/// field follows as its own block: a line with the field name, a header
/// line, then one line per row.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(stdout.lock());

    match result_section(value) {
        Value::Object(result) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in result.iter().filter(|(_, v)| !is_row_array(v)) {
                let _ = wtr.write_record([key.as_str(), &scalar_text(val)]);
            }
            for (key, val) in result.iter() {
                if let Value::Array(rows) = val {
                    if is_row_array(val) {
                        let _ = wtr.write_record([""]);
                        let _ = wtr.write_record([key.as_str()]);
                        write_rows(&mut wtr, rows);
                    }
                }
            }
        }
        Value::Array(rows) => write_rows(&mut wtr, rows),
        other => {
            let _ = wtr.write_record([scalar_text(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut StdoutWriter<'_>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for item in rows {
            let _ = wtr.write_record([scalar_text(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for item in rows {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(scalar_text).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&row);
        }
    }
}
