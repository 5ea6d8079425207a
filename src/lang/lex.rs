use super::Error;
use crate::error;
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, Error>;

/// Characters that survive into a section body besides letters and digits.
/// Everything else outside quotes (whitespace above all) is dropped, while
/// inside double quotes every byte is preserved.
const OPERATORS: [char; 21] = [
    ',', '!', '.', ':', '@', '(', ')', '{', '}', '[', ']', '$', '-', '~', '<', '>', ';', '"', '_',
    '\'', '\\',
];

fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Extracts `#name { ... }` sections from source text.
///
/// One pass with three state flags. A `#` starts name accumulation, which
/// ends at the first character that is neither alphabetic nor `_`; body
/// accumulation runs from the next `{` to the matching `}`. The returned
/// bodies carry no whitespace outside quotes, so later phases never have to
/// trim tokens.
pub fn sections(source: &str) -> Result<FxHashMap<String, String>> {
    let mut result: FxHashMap<String, String> = FxHashMap::default();

    let mut reading_name = false;
    let mut reading_body = false;
    let mut outside_quotes = true;
    let mut name = String::new();
    let mut body = String::new();

    for c in source.chars() {
        if reading_name && !(c.is_ascii_alphabetic() || c == '_') {
            if !name.is_empty() {
                result.entry(name.clone()).or_default();
            }
            reading_name = false;
        }

        if reading_body && c == '}' {
            result.insert(name.clone(), body.clone());
            body.clear();
            name.clear();
            reading_body = false;
        }

        if reading_name {
            name.push(c);
        }

        if (reading_body && (c.is_ascii_alphabetic() || is_operator(c)))
            || !outside_quotes
            || c.is_ascii_digit()
        {
            body.push(c);
        }

        if c == '"' && outside_quotes {
            outside_quotes = false;
            continue;
        }
        if c == '"' && !outside_quotes {
            outside_quotes = true;
        }

        if c == '{' && !reading_body {
            reading_body = true;
        }
        // `#` only opens a section name at the top level; inside a body it
        // is the optional prefix of a section-name parameter and is simply
        // not captured, so parameters arrive without it.
        if c == '#' && !reading_name && !reading_body {
            reading_name = true;
        }
    }

    if !outside_quotes {
        return Err(error!(Parse; "unterminated quote"));
    }
    if reading_body {
        return Err(error!(Parse; "missing '}}' for section '{}'", name));
    }

    Ok(result)
}

/// Splits a section body on top-level `;`, honoring quote state. Each
/// returned line includes its terminating `;`; a trailing unterminated
/// fragment is dropped.
pub fn lines(body: &str) -> Vec<String> {
    let mut result = vec![];
    let mut line = String::new();
    let mut in_quote = false;

    for c in body.chars() {
        if c != ';' || in_quote {
            line.push(c);
        } else {
            line.push(';');
            result.push(std::mem::take(&mut line));
        }
        if c == '"' {
            in_quote = !in_quote;
        }
    }

    result
}
