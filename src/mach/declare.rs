/*!
## Declarators

The `new_<T>` / `reAssign_<T>` / `delete_var` family. Declarators create a
variable under a fresh name; reassigners replace an existing variable (and
may change its tag). Both take exactly `(name, value)`, where the value is
a literal or a `$` reference.
*/

use super::memory::check_return;
use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

#[derive(Debug, Clone, Copy)]
pub enum FloatWidth {
    F32,
    F64,
    FMax,
}

impl IntWidth {
    fn name(self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
        }
    }
}

impl FloatWidth {
    fn name(self) -> &'static str {
        match self {
            FloatWidth::F32 => "f32",
            FloatWidth::F64 => "f64",
            FloatWidth::FMax => "fmax",
        }
    }
}

fn two_params<'a>(params: &'a [String], op: &str) -> Result<(&'a str, &'a str)> {
    if params.len() != 2 {
        return Err(error!(Parse; "@{} takes exactly 2 parameters (name, value)", op));
    }
    Ok((&params[0], &params[1]))
}

fn int_value(raw: i64, width: IntWidth, name: &str) -> Result<Val> {
    let fits = |min: i64, max: i64| raw >= min && raw <= max;
    match width {
        IntWidth::I8 if !fits(i8::MIN as i64, i8::MAX as i64) => {
            Err(error!(Overflow; "value for '{}' cannot fit in i8", name))
        }
        IntWidth::I16 if !fits(i16::MIN as i64, i16::MAX as i64) => {
            Err(error!(Overflow; "value for '{}' cannot fit in i16", name))
        }
        IntWidth::I32 if !fits(i32::MIN as i64, i32::MAX as i64) => {
            Err(error!(Overflow; "value for '{}' cannot fit in i32", name))
        }
        IntWidth::I8 => Ok(Val::I8(raw as i8)),
        IntWidth::I16 => Ok(Val::I16(raw as i16)),
        IntWidth::I32 => Ok(Val::I32(raw as i32)),
        IntWidth::I64 => Ok(Val::I64(raw)),
    }
}

fn require_number(value: &str) -> Result<()> {
    if !literal::is_number(value) {
        return Err(error!(BadLiteral; "value must be a valid number, got '{}'", value));
    }
    Ok(())
}

pub fn new_int(params: &[String], ret: &str, mem: &mut SectionMemory, width: IntWidth) -> Result<()> {
    let (name, token) = two_params(params, &format!("new_{}", width.name()))?;
    check_return(mem, ret)?;
    let value = mem.resolve_token(token)?;
    if mem.contains(name) {
        return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
    }
    require_number(&value)?;
    let raw = literal::parse_int(&value)?;
    mem.insert(name, int_value(raw, width, name)?)
}

pub fn reassign_int(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    width: IntWidth,
) -> Result<()> {
    let (name, token) = two_params(params, &format!("reAssign_{}", width.name()))?;
    check_return(mem, ret)?;
    let value = mem.resolve_token(token)?;
    if !mem.contains(name) {
        return Err(error!(UnknownVariable; "variable '{}' doesn't exist", name));
    }
    require_number(&value)?;
    let raw = literal::parse_int(&value)?;
    mem.reinsert(name, int_value(raw, width, name)?)
}

fn float_value(raw: f64, width: FloatWidth) -> Val {
    match width {
        FloatWidth::F32 => Val::F32(raw as f32),
        FloatWidth::F64 => Val::F64(raw),
        FloatWidth::FMax => Val::FMax(raw),
    }
}

pub fn new_float(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    width: FloatWidth,
) -> Result<()> {
    let (name, token) = two_params(params, &format!("new_{}", width.name()))?;
    check_return(mem, ret)?;
    let value = mem.resolve_token(token)?;
    if mem.contains(name) {
        return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
    }
    require_number(&value)?;
    mem.insert(name, float_value(literal::parse_float(&value)?, width))
}

pub fn reassign_float(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    width: FloatWidth,
) -> Result<()> {
    let (name, token) = two_params(params, &format!("reAssign_{}", width.name()))?;
    check_return(mem, ret)?;
    let value = mem.resolve_token(token)?;
    if !mem.contains(name) {
        return Err(error!(UnknownVariable; "variable '{}' doesn't exist", name));
    }
    require_number(&value)?;
    mem.reinsert(name, float_value(literal::parse_float(&value)?, width))
}

fn string_value(mem: &SectionMemory, token: &str) -> Result<String> {
    if token.starts_with('$') {
        mem.resolve_ref(token)
    } else {
        // quoted literal: first and last byte stripped
        Ok(literal::unquote(token).to_string())
    }
}

pub fn new_str(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "new_str")?;
    check_return(mem, ret)?;
    let value = string_value(mem, token)?;
    if mem.contains(name) {
        return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
    }
    mem.insert(name, Val::Str(value))
}

pub fn reassign_str(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "reAssign_str")?;
    check_return(mem, ret)?;
    let value = string_value(mem, token)?;
    if !mem.contains(name) {
        return Err(error!(UnknownVariable; "variable '{}' doesn't exist", name));
    }
    mem.reinsert(name, Val::Str(value))
}

fn char_value(mem: &SectionMemory, token: &str) -> Result<char> {
    if token.starts_with('$') {
        let resolved = mem.resolve_ref(token)?;
        match resolved.chars().next() {
            Some(c) => Ok(c),
            None => Err(error!(BadLiteral; "reference {} resolved to an empty string", token)),
        }
    } else {
        literal::parse_char(token)
    }
}

pub fn new_char(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "new_char")?;
    check_return(mem, ret)?;
    let value = char_value(mem, token)?;
    if mem.contains(name) {
        return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
    }
    mem.insert(name, Val::Char(value))
}

pub fn reassign_char(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "reAssign_char")?;
    check_return(mem, ret)?;
    let value = char_value(mem, token)?;
    if !mem.contains(name) {
        return Err(error!(UnknownVariable; "variable '{}' doesn't exist", name));
    }
    mem.reinsert(name, Val::Char(value))
}

fn bool_value(mem: &SectionMemory, token: &str) -> Result<bool> {
    match mem.resolve_token(token)?.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(error!(BadLiteral; "boolean value must be true or false, got '{}'", other)),
    }
}

pub fn new_bool(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "new_bool")?;
    check_return(mem, ret)?;
    let value = bool_value(mem, token)?;
    if mem.contains(name) {
        return Err(error!(DuplicateVariable; "variable '{}' already exists", name));
    }
    mem.insert(name, Val::Bool(value))
}

pub fn reassign_bool(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    let (name, token) = two_params(params, "reAssign_bool")?;
    check_return(mem, ret)?;
    let value = bool_value(mem, token)?;
    if !mem.contains(name) {
        return Err(error!(UnknownVariable; "variable '{}' doesn't exist", name));
    }
    mem.reinsert(name, Val::Bool(value))
}

pub fn delete_var(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    if params.len() != 1 {
        return Err(error!(Parse; "@delete_var requires exactly 1 parameter"));
    }
    check_return(mem, ret)?;
    mem.remove(&params[0])
}
