use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(info)) = map.get("info") {
                println!("{}", info.cyan());
            } else if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_object(None, map);
            }
        }
        Value::Array(arr) => print_rows(None, arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            print_status(res_map);
            print_object(None, res_map);
        }
        Value::Array(arr) => print_rows(None, arr),
        other => println!("{}", format_value(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Coloured one-line verdict when the result carries a KPI block.
fn print_status(result: &Map<String, Value>) {
    let Some(Value::Object(kpis)) = result.get("kpis") else {
        return;
    };
    let label = kpis.get("tier_label").and_then(Value::as_str).unwrap_or("");
    let ratio = kpis.get("debt_to_income").and_then(Value::as_str).unwrap_or("");
    let message = kpis.get("message").and_then(Value::as_str).unwrap_or("");
    let color = kpis.get("tier_color").and_then(Value::as_str).unwrap_or("");

    let status = format!("Estado: {label} | Carga financiera: {ratio}");
    let status = match color {
        "green" => status.green().bold(),
        "orange" => status.yellow().bold(),
        "red" => status.red().bold(),
        _ => status.bold(),
    };
    println!("{}\n{}\n", status, message);
}

/// Scalars go into one Field/Value table; nested objects and row arrays get
/// their own headed sections.
fn print_object(title: Option<&str>, map: &Map<String, Value>) {
    if let Some(t) = title {
        println!("\n{}", t.bold());
    }

    let scalars: Vec<(&String, &Value)> = map.iter().filter(|(_, v)| !is_section(v)).collect();
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in scalars {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }

    for (key, val) in map.iter().filter(|(_, v)| is_section(v)) {
        match val {
            Value::Object(inner) => print_object(Some(key), inner),
            Value::Array(arr) => print_rows(Some(key), arr),
            _ => {}
        }
    }
}

fn print_rows(title: Option<&str>, arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Items that nest their own row arrays (chart series, amortization
    // tables) are printed one section per item.
    if arr.iter().all(|item| matches!(item, Value::Object(m) if m.values().any(is_row_array))) {
        for item in arr {
            if let Value::Object(map) = item {
                let label = item_label(map);
                let heading = match title {
                    Some(t) => format!("{t}: {label}"),
                    None => label,
                };
                print_object(Some(&heading), map);
            }
        }
        return;
    }

    if let Some(t) = title {
        println!("\n{}", t.bold());
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn is_section(value: &Value) -> bool {
    matches!(value, Value::Object(_)) || is_row_array(value)
}

fn is_row_array(value: &Value) -> bool {
    matches!(value, Value::Array(arr) if arr.first().is_some_and(Value::is_object))
}

fn item_label(map: &Map<String, Value>) -> String {
    ["scenario", "name"]
        .iter()
        .find_map(|k| map.get(*k).and_then(Value::as_str))
        .unwrap_or("-")
        .to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
