//! Coercion between symbols and numbers.

use epilog_ast::{format_number, Term};

/// Numeric reading of a term. Non-numeric input yields `NaN`.
///
/// `blank` and `false` read as 0, `true` as 1, `infinity` and `neginfinity`
/// as the infinities. Other symbols are read by their longest numeric prefix,
/// so `12kg` is 12.
pub fn numberize(term: &Term) -> f64 {
    let Term::Sym(s) = term else {
        return f64::NAN;
    };
    match s.as_str() {
        "blank" | "false" => 0.0,
        "true" => 1.0,
        "infinity" => f64::INFINITY,
        "neginfinity" => f64::NEG_INFINITY,
        text => parse_prefix(text),
    }
}

fn parse_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    if let Ok(value) = text.parse::<f64>() {
        if !text.to_ascii_lowercase().contains("inf") && !text.to_ascii_lowercase().contains("nan") {
            return value;
        }
    }
    let bytes = text.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || (end == digits_start + 1 && bytes[digits_start] == b'.') {
        return f64::NAN;
    }
    let mantissa_end = end;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    text[..end]
        .parse::<f64>()
        .or_else(|_| text[..mantissa_end].parse::<f64>())
        .unwrap_or(f64::NAN)
}

/// Symbol for a number, `infinity`/`neginfinity` for the infinities.
pub fn stringize(value: f64) -> Term {
    Term::Sym(internment::Intern::new(format_number(value)))
}

/// Symbol for a computed number. `NaN` has no symbol, so it gives `None`.
pub fn number_term(value: f64) -> Option<Term> {
    if value.is_nan() {
        None
    } else {
        Some(stringize(value))
    }
}

/// Numbers of a proper list, `None` if it is not a list of numbers.
pub fn numlistify(list: &Term) -> Option<Vec<f64>> {
    let items = list.list_items()?;
    let mut out = Vec::with_capacity(items.len());
    for item in &items {
        let value = numberize(item);
        if value.is_nan() {
            return None;
        }
        out.push(value);
    }
    Some(out)
}

/// Quotes stripped from a string symbol; other symbols unchanged.
pub fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Quoted string symbol.
pub fn quotify(text: &str) -> Term {
    Term::string(text)
}
