use std::io;

use serde_json::Value;

pub fn render_classify(data: &Value) -> io::Result<String> {
    let code = data
        .get("code")
        .and_then(Value::as_u64)
        .ok_or_else(|| io::Error::other("classify result is missing its code"))?;
    Ok(code.to_string())
}

pub fn render_batch(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("batch result is missing its rows"))?;

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for row in rows {
        let index = row.get("row").and_then(Value::as_u64).unwrap_or_default();
        let outcome = match row.get("code").and_then(Value::as_u64) {
            Some(code) => code.to_string(),
            None => {
                let message = row
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(Value::as_str)
                    .unwrap_or("could not classify row");
                format!("error: {message}")
            }
        };
        lines.push(format!("{index}\t{outcome}"));
    }

    let summary = data.get("summary").cloned().unwrap_or(Value::Null);
    lines.push(format!(
        "rows: {}  1: {}  2: {}  3: {}  invalid: {}",
        count(&summary, "rows_read"),
        count(&summary, "single_identity"),
        count(&summary, "two_identities"),
        count(&summary, "three_identities"),
        count(&summary, "rows_invalid"),
    ));

    Ok(lines.join("\n"))
}

pub fn render_nickname_check(data: &Value) -> io::Result<String> {
    let left = data.get("left").and_then(Value::as_str).unwrap_or_default();
    let right = data.get("right").and_then(Value::as_str).unwrap_or_default();
    let nicknames = flag(data, "nicknames");
    let equivalent = flag(data, "equivalent");
    let distance = count(data, "edit_distance");
    let source = data
        .get("nickname_source")
        .and_then(|value| value.get("source"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    let verdict = if nicknames {
        "registered nicknames"
    } else if equivalent {
        "typo of the same name"
    } else {
        "different names"
    };

    Ok([
        format!("{left} / {right}: {verdict}"),
        format!("  nicknames:     {}", yes_no(nicknames)),
        format!("  edit distance: {distance}"),
        format!("  equivalent:    {}", yes_no(equivalent)),
        format!("  table:         {source}"),
    ]
    .join("\n"))
}

fn count(data: &Value, key: &str) -> u64 {
    data.get(key).and_then(Value::as_u64).unwrap_or_default()
}

fn flag(data: &Value, key: &str) -> bool {
    data.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
