/*!
## Relational operations

All comparisons write a boolean into the return variable, which must
already carry the `bool` tag. Numeric equality uses an absolute tolerance
so values that survived the textual round trip still compare equal; the
`isChars*` pair compares the resolved text of non-numeric operands.
*/

use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};

type Result<T> = std::result::Result<T, Error>;

const EPSILON: f64 = 1e-12;

fn require_return(mem: &SectionMemory, ret: &str) -> Result<()> {
    if ret == "nullptr" || !mem.contains(ret) {
        return Err(error!(UnknownReturnAddress; "can't find the return address '{}'", ret));
    }
    Ok(())
}

fn operands(params: &[String], mem: &SectionMemory) -> Result<(String, String)> {
    if params.len() != 2 {
        return Err(error!(Parse; "relational operations take exactly two parameters"));
    }
    Ok((
        mem.resolve_token(&params[0])?,
        mem.resolve_token(&params[1])?,
    ))
}

fn store(mem: &mut SectionMemory, ret: &str, value: bool, op: &str) -> Result<()> {
    match mem.get(ret)? {
        Val::Bool(_) => mem.reinsert(ret, Val::Bool(value)),
        _ => Err(error!(TypeMismatch; "{}() requires a boolean return address", op)),
    }
}

fn numeric_pair(left: &str, right: &str, op: &str, hint: &str) -> Result<(f64, f64)> {
    if !literal::is_number(left) || !literal::is_number(right) {
        return Err(error!(TypeMismatch; "{}() compares numbers; use {}()", op, hint));
    }
    Ok((literal::parse_float(left)?, literal::parse_float(right)?))
}

pub fn is_equal(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (left, right) = operands(params, mem)?;
    let (a, b) = numeric_pair(&left, &right, "isEqual", "isCharsEqual")?;
    store(mem, ret, (a - b).abs() < EPSILON, "isEqual")
}

pub fn is_not_equal(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (left, right) = operands(params, mem)?;
    let (a, b) = numeric_pair(&left, &right, "isNotEqual", "isCharsNotEqual")?;
    store(mem, ret, (a - b).abs() >= EPSILON, "isNotEqual")
}

pub fn compare(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    op: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<()> {
    require_return(mem, ret)?;
    let (left, right) = operands(params, mem)?;
    let (a, b) = numeric_pair(&left, &right, op, "isCharsEqual")?;
    store(mem, ret, cmp(a, b), op)
}

pub fn chars_equal(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    negate: bool,
) -> Result<()> {
    let op = if negate { "isCharsNotEqual" } else { "isCharsEqual" };
    require_return(mem, ret)?;
    let (left, right) = operands(params, mem)?;
    if literal::is_number(&left) || literal::is_number(&right) {
        let hint = if negate { "isNotEqual" } else { "isEqual" };
        return Err(error!(TypeMismatch; "{}() compares text; use {}()", op, hint));
    }
    let equal = left == right;
    store(mem, ret, if negate { !equal } else { equal }, op)
}
