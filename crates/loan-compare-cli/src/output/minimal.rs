use serde_json::Value;

/// Key answer fields, most specific first.
const PRIORITY_KEYS: [&str; 5] = [
    "tier",
    "debt_to_income_pct",
    "debt_to_income",
    "monthly_payment",
    "total_interest",
];

/// Nested blocks searched after the top level of the result.
const NESTED_BLOCKS: [&str; 2] = ["kpis", "assessment"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    if let Some(Value::String(info)) = value.get("info") {
        return info.clone();
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let candidates = std::iter::once(result_obj)
        .chain(NESTED_BLOCKS.iter().filter_map(|k| result_obj.get(*k)));
    for block in candidates {
        for key in &PRIORITY_KEYS {
            if let Some(val) = block.get(*key) {
                if !val.is_null() {
                    return format_minimal(val);
                }
            }
        }
    }

    if let Some((key, val)) = result_obj.as_object().and_then(|m| m.iter().next()) {
        return format!("{}: {}", key, format_minimal(val));
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_from_kpis() {
        let v = json!({"result": {"comparison": [], "kpis": {"tier": "CAUTION"}}});
        assert_eq!(minimal_answer(&v), "CAUTION");
    }

    #[test]
    fn test_schedule_payment() {
        let v = json!({"result": {"rows": [], "monthly_payment": "88848.79"}});
        assert_eq!(minimal_answer(&v), "88848.79");
    }

    #[test]
    fn test_info_passthrough() {
        let v = json!({"info": "nothing yet", "scenarios": 0});
        assert_eq!(minimal_answer(&v), "nothing yet");
    }
}
