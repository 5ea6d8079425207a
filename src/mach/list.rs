/*!
## List engine

Lists are a facade over the flat section memory: a list `L` of size `n` is
the `i64` variable `___LIST___ENGINE___<L>___SIZE___` plus one element
variable `___LIST___ENGINE___<L>___<i>___` per index. Elements of a
`dynamic` list are typed from their lexical form with the shared literal
recognizers.
*/

use super::io::io_err;
use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};
use std::io::Write;

type Result<T> = std::result::Result<T, Error>;

fn size_name(list: &str) -> String {
    format!("___LIST___ENGINE___{}___SIZE___", list)
}

fn slot_name(list: &str, index: i64) -> String {
    format!("___LIST___ENGINE___{}___{}___", list, index)
}

/// Splits a bracketed values token into its elements. Brackets outside
/// quotes are consumed; a comma outside quotes ends an element; unescaped
/// quotes toggle the quote states and stay in the element; elements are
/// trimmed of surrounding whitespace.
fn split_elements(values: &str) -> Vec<String> {
    let chars: Vec<char> = values.chars().collect();
    let mut elements = vec![];
    let mut element = String::new();
    let mut in_double = false;
    let mut in_single = false;
    let mut depth: i32 = 0;

    for (index, &c) in chars.iter().enumerate() {
        if c == '[' && !in_double && !in_single {
            depth += 1;
            continue;
        }
        if c == ']' && !in_double && !in_single {
            depth = (depth - 1).max(0);
            continue;
        }

        if c == '"' && !in_single {
            let escaped = index > 0 && chars[index - 1] == '\\';
            if !escaped {
                in_double = !in_double;
                element.push(c);
                continue;
            }
        }
        if c == '\'' && !in_double {
            let escaped = index > 0 && chars[index - 1] == '\\';
            if !escaped {
                in_single = !in_single;
                element.push(c);
                continue;
            }
        }

        if c == ',' && !in_double && !in_single && depth >= 0 {
            elements.push(element.trim().to_string());
            element.clear();
            continue;
        }

        element.push(c);
    }

    if !element.is_empty() {
        elements.push(element.trim().to_string());
    }

    elements
}

/// Types one element from its lexical form.
fn infer_element(item: &str) -> Result<Val> {
    if item == "true" || item == "false" {
        return Ok(Val::Bool(item == "true"));
    }
    if literal::is_number(item) {
        if item.contains('.') {
            let number = literal::parse_float(item)?;
            if !number.is_finite() {
                return Err(error!(Overflow; "number is too big: {}", item));
            }
            return Ok(Val::narrowest_float(number));
        }
        return Ok(Val::narrowest_int(literal::parse_int(item)?));
    }
    if literal::is_char_literal(item) {
        return Ok(Val::Char(literal::parse_char(item)?));
    }
    if literal::is_quoted(item) {
        return Ok(Val::Str(literal::unquote(item).to_string()));
    }
    Err(error!(BadLiteral; "bad list element: {}", item))
}

fn read_size(mem: &SectionMemory, list: &str) -> Result<i64> {
    if !mem.contains(&size_name(list)) {
        return Err(error!(UnknownVariable; "couldn't find the list '{}'", list));
    }
    match mem.get(&size_name(list))? {
        Val::I64(size) => Ok(size),
        other => Err(error!(TypeMismatch; "size of list '{}' is not i64 but {}", list, other.tag())),
    }
}

fn three_params<'a>(params: &'a [String], op: &str) -> Result<(&'a str, &'a str, &'a str)> {
    if params.len() != 3 {
        return Err(error!(Parse; "{}() takes three parameters (name, type, values)", op));
    }
    Ok((&params[0], &params[1], &params[2]))
}

/// Only `dynamic` element typing is implemented; other type tokens are
/// reserved and keep size bookkeeping only.
fn is_dynamic(type_token: &str) -> bool {
    let ty = if literal::is_quoted(type_token) {
        literal::unquote(type_token)
    } else {
        type_token
    };
    ty == "dynamic"
}

pub fn new_list(params: &[String], _ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (list, type_token, values) = three_params(params, "new_list")?;
    if mem.contains(&size_name(list)) {
        return Err(error!(ListExists; "list '{}' already exists", list));
    }
    let contents = split_elements(values);
    mem.insert(&size_name(list), Val::I64(contents.len() as i64))?;
    if is_dynamic(type_token) {
        for (index, item) in contents.iter().enumerate() {
            mem.insert(&slot_name(list, index as i64), infer_element(item)?)?;
        }
    }
    Ok(())
}

/// Reassigns size and elements in place. Slots beyond the new size are left
/// behind untouched; the caller is responsible for matching the old size.
pub fn reassign_list(params: &[String], _ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (list, type_token, values) = three_params(params, "reAssign_list")?;
    if !mem.contains(&size_name(list)) {
        return Err(error!(UnknownVariable; "couldn't find the list '{}'", list));
    }
    let contents = split_elements(values);
    mem.reinsert(&size_name(list), Val::I64(contents.len() as i64))?;
    if is_dynamic(type_token) {
        for (index, item) in contents.iter().enumerate() {
            mem.reinsert(&slot_name(list, index as i64), infer_element(item)?)?;
        }
    }
    Ok(())
}

pub fn delete_list(params: &[String], _ret: &str, mem: &mut SectionMemory) -> Result<()> {
    for list in params {
        let size = read_size(mem, list)?;
        for index in 0..size {
            mem.remove(&slot_name(list, index))?;
        }
        mem.remove(&size_name(list))?;
    }
    Ok(())
}

/// Copies `list[index]` into the return variable. The index token may be a
/// literal, a `$` reference, or a quote-prefixed variable name.
pub fn get(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    if params.len() != 2 {
        return Err(error!(Parse; "get() requires two parameters (list_name, index)"));
    }
    if !mem.contains(ret) {
        return Err(error!(UnknownReturnAddress; "can't find the return address '{}'", ret));
    }

    let list = &params[0];
    let mut index_token = params[1].clone();
    if index_token.starts_with('$') {
        index_token = mem.resolve_ref(&index_token)?;
    } else if index_token.starts_with('\'') || index_token.starts_with('"') {
        let name = index_token.trim_matches(|c| c == '\'' || c == '"');
        index_token = mem.get(name)?.to_string();
    }
    let index = literal::parse_int(&index_token)?;

    let size = read_size(mem, list)?;
    if index < 0 || index >= size {
        return Err(error!(Overflow; "index {} out of range for list '{}'", index, list));
    }

    let val = mem.get(&slot_name(list, index))?;
    mem.reinsert(ret, val)
}

pub fn push(params: &[String], _ret: &str, mem: &mut SectionMemory) -> Result<()> {
    if params.len() != 2 {
        return Err(error!(Parse; "push() requires exactly two parameters"));
    }
    let list = &params[0];
    let size = read_size(mem, list)?;

    let item = mem.resolve_token(&params[1])?;
    mem.insert(&slot_name(list, size), infer_element(&item)?)?;
    mem.reinsert(&size_name(list), Val::I64(size + 1))
}

pub fn pop(params: &[String], _ret: &str, mem: &mut SectionMemory) -> Result<()> {
    if params.len() != 1 {
        return Err(error!(Parse; "pop() requires exactly one parameter"));
    }
    let list = &params[0];
    let size = read_size(mem, list)?;
    if size <= 0 {
        return Err(error!(UnknownVariable; "cannot pop from the empty list '{}'", list));
    }
    mem.remove(&slot_name(list, size - 1))?;
    mem.reinsert(&size_name(list), Val::I64(size - 1))
}

fn display_text(mem: &SectionMemory, token: &str) -> Result<String> {
    let mut text = if token.starts_with('$') {
        mem.resolve_ref(token)?
    } else {
        token.to_string()
    };
    if text.starts_with('"') {
        text = literal::unquote(&text).to_string();
    }
    Ok(text)
}

/// Prints `head`, the bracketed elements (strings and chars quoted), then
/// `tail`.
pub fn print_list<W: Write>(
    params: &[String],
    _ret: &str,
    mem: &mut SectionMemory,
    out: &mut W,
) -> Result<()> {
    if params.len() != 3 {
        return Err(error!(Parse; "print_list() requires 3 parameters (list_name, head, tail)"));
    }
    let list = &params[0];
    let head = display_text(mem, &params[1])?;
    let tail = display_text(mem, &params[2])?;

    let size = read_size(mem, list)?;
    write!(out, "{}[", head).map_err(io_err)?;
    for index in 0..size {
        if index > 0 {
            write!(out, ", ").map_err(io_err)?;
        }
        let val = mem.get(&slot_name(list, index))?;
        match val {
            Val::Str(_) | Val::Char(_) => write!(out, "\"{}\"", val).map_err(io_err)?,
            _ => write!(out, "{}", val).map_err(io_err)?,
        }
    }
    write!(out, "]{}", tail).map_err(io_err)
}
