use serde_json::Value;

pub const SALARY_NOT_SPECIFIED: &str = "Salary not specified";

/// Display form of a salary value: strings are assumed pre-formatted,
/// numbers render as whole dollars with thousands separators.
pub fn format_salary(salary: Option<&Value>) -> String {
    match salary {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(amount) if amount != 0.0 => format_dollars(amount),
            _ => SALARY_NOT_SPECIFIED.to_string(),
        },
        _ => SALARY_NOT_SPECIFIED.to_string(),
    }
}

/// Truncates `text` to `limit` characters, marking the cut with `...`.
pub fn limit_text(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn format_dollars(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && rounded > 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
