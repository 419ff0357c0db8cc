use rust_decimal::Decimal;
use std::str::FromStr;

use loan_compare_core::ScenarioDraft;

/// Parse `name,principal,rate,term` into a draft. Every field is optional:
/// blank or missing fields take the input defaults, so `",2000000"` is a
/// 2M loan with the default name, rate and term.
pub fn parse_scenario(entry: &str) -> Result<ScenarioDraft, String> {
    let mut parts = entry.splitn(4, ',').map(str::trim);

    let name = parts.next().filter(|s| !s.is_empty()).map(String::from);
    let principal = parts
        .next()
        .map(|s| parse_amount(s, "principal"))
        .transpose()?
        .flatten();
    let annual_rate_pct = parts
        .next()
        .map(|s| parse_amount(s.trim_end_matches('%'), "rate"))
        .transpose()?
        .flatten();
    let term_months = parts
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| format!("invalid term '{s}': expected whole months"))
        })
        .transpose()?;

    Ok(ScenarioDraft {
        name,
        principal,
        annual_rate_pct,
        term_months,
    })
}

/// Plain decimals, optionally with `_` digit separators or a `$` prefix.
fn parse_amount(raw: &str, field: &str) -> Result<Option<Decimal>, String> {
    let cleaned: String = raw.chars().filter(|c| *c != '_' && *c != '$').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|_| format!("invalid {field} '{raw}'"))
}
