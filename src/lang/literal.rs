/*!
## Literal recognizers

The one place that decides what counts as a number, a character literal or a
quoted string. Every operation that needs a literal goes through here, so the
list engine, the declarators and the arithmetic library all agree on the
grammar.
*/

use super::Error;
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// A token is numeric iff it is non-empty, a `+`/`-` appears only at index
/// zero, it holds at most one `.`, every other character is an ASCII digit,
/// and the whole token is not a lone sign or dot.
pub fn is_number(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let mut dots = 0;
    for (index, c) in token.chars().enumerate() {
        match c {
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            '+' | '-' => {
                if index != 0 {
                    return false;
                }
            }
            _ => {
                if !c.is_ascii_digit() {
                    return false;
                }
            }
        }
    }
    !matches!(token, "+" | "-" | ".")
}

/// Parses the integer portion of a numeric token. A fractional part is
/// truncated, matching the textual pipeline the language is built on:
/// `"7.000000"` coming back out of a float variable still reads as `7`.
pub fn parse_int(token: &str) -> Result<i64> {
    let digits = match token.find('.') {
        Some(index) => &token[..index],
        None => token,
    };
    match digits.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            std::num::IntErrorKind::PosOverflow | std::num::IntErrorKind::NegOverflow => {
                Err(error!(Overflow; "'{}' does not fit in a 64-bit integer", token))
            }
            _ => Err(error!(BadLiteral; "'{}' is not a valid integer", token)),
        },
    }
}

pub fn parse_float(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| error!(BadLiteral; "'{}' is not a valid number", token))
}

/// True for tokens shaped `"..."`.
pub fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// Strips the first and last byte of a token. Callers use this on quoted
/// literals; tokens too short to strip collapse to the empty string.
pub fn unquote(token: &str) -> &str {
    token
        .get(1..token.len().saturating_sub(1))
        .unwrap_or("")
}

/// True for tokens that parse under the character-literal grammar.
pub fn is_char_literal(token: &str) -> bool {
    parse_char(token).is_ok()
}

/// Parses a single-quoted character literal. The interior is one plain
/// character, a two-character escape (`\n \t \r \b \f \v \\ \' \" \0`),
/// `\xHH` with exactly two hex digits, or `\ooo` with one to three octal
/// digits.
pub fn parse_char(token: &str) -> Result<char> {
    let inner = token
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .ok_or_else(|| error!(BadLiteral; "{} is not a character literal", token))?;
    let chars: Vec<char> = inner.chars().collect();
    match chars.as_slice() {
        [c] if *c != '\\' => Ok(*c),
        ['\\', 'x', hi, lo] => {
            let hi = hi
                .to_digit(16)
                .ok_or_else(|| error!(BadLiteral; "invalid hex escape in {}", token))?;
            let lo = lo
                .to_digit(16)
                .ok_or_else(|| error!(BadLiteral; "invalid hex escape in {}", token))?;
            Ok((hi * 16 + lo) as u8 as char)
        }
        ['\\', digits @ ..]
            if (1..=3).contains(&digits.len())
                && digits.iter().all(|c| ('0'..='7').contains(c)) =>
        {
            let mut value: u32 = 0;
            for c in digits {
                value = value * 8 + (*c as u32 - '0' as u32);
            }
            Ok(value as u8 as char)
        }
        ['\\', escape] => match escape {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'b' => Ok('\u{8}'),
            'f' => Ok('\u{c}'),
            'v' => Ok('\u{b}'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"' => Ok('"'),
            _ => Err(error!(BadLiteral; "unknown escape sequence '\\{}'", escape)),
        },
        _ => Err(error!(BadLiteral; "bad character literal {}", token)),
    }
}
