//! String builtins: symbol normalisation and regular expressions.

use log::debug;
use regex::Regex;

/// Letters and digits of `text`, lowercased.
pub fn symbolize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Like [`symbolize`], but folds accented Latin letters to their base letter
/// first and keeps spaces as underscores.
pub fn newsymbolize(text: &str) -> String {
    text.chars()
        .map(fold_diacritic)
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'À'..='Æ' => 'A',
        'à'..='æ' => 'a',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ò'..='Ø' => 'O',
        'ò'..='ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ç' => 'C',
        'ç' => 'c',
        other => other,
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            debug!("bad pattern {:?}: {}", pattern, err);
            None
        }
    }
}

/// The first match of `pattern` in `text`: the whole match followed by each
/// capture group. Groups that did not participate come back empty.
pub fn first_match(text: &str, pattern: &str) -> Option<Vec<String>> {
    let re = compile(pattern)?;
    let caps = re.captures(text)?;
    Some(
        caps.iter()
            .map(|group| group.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect(),
    )
}

/// Every non-overlapping match of `pattern` in `text`, in order.
pub fn all_matches(text: &str, pattern: &str) -> Vec<String> {
    match compile(pattern) {
        Some(re) => re.find_iter(text).map(|m| m.as_str().to_string()).collect(),
        None => Vec::new(),
    }
}
