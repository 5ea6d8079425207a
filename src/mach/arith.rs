/*!
## Arithmetic

All arithmetic runs through an `f64` accumulator and stores its result
according to the *current* tag of the return variable, range-checked for
every tag below the accumulator's own width. `sum` and `product` are
variadic; the rest take fixed arities. Division and modulus are not guarded
against zero denominators; they inherit platform semantics.
*/

use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};

type Result<T> = std::result::Result<T, Error>;

/// Arithmetic writes a result, so `nullptr` is not an acceptable return
/// address here.
fn require_return(mem: &SectionMemory, ret: &str) -> Result<()> {
    if ret == "nullptr" || !mem.contains(ret) {
        return Err(error!(UnknownReturnAddress; "can't find the return address '{}'", ret));
    }
    Ok(())
}

fn operand(mem: &SectionMemory, token: &str, op: &str) -> Result<f64> {
    let value = mem.resolve_token(token)?;
    if !literal::is_number(&value) {
        return Err(error!(BadLiteral; "bad value for {}(): {}", op, value));
    }
    literal::parse_float(&value)
}

fn binary<'a>(params: &'a [String], op: &str) -> Result<(&'a str, &'a str)> {
    if params.len() != 2 {
        return Err(error!(Parse; "{}() only takes two parameters", op));
    }
    Ok((&params[0], &params[1]))
}

fn unary<'a>(params: &'a [String], op: &str) -> Result<&'a str> {
    if params.len() != 1 {
        return Err(error!(Parse; "{}() only takes a single parameter", op));
    }
    Ok(&params[0])
}

/// Stores the accumulator into the return variable under its current tag.
fn store(mem: &mut SectionMemory, ret: &str, result: f64, op: &str) -> Result<()> {
    let too_small = || error!(Overflow; "return address too small for {}", op);
    let fits = |min: f64, max: f64| result >= min && result <= max;
    let val = match mem.get(ret)? {
        Val::I8(_) => {
            if !fits(i8::MIN as f64, i8::MAX as f64) {
                return Err(too_small());
            }
            Val::I8(result as i8)
        }
        Val::I16(_) => {
            if !fits(i16::MIN as f64, i16::MAX as f64) {
                return Err(too_small());
            }
            Val::I16(result as i16)
        }
        Val::I32(_) => {
            if !fits(i32::MIN as f64, i32::MAX as f64) {
                return Err(too_small());
            }
            Val::I32(result as i32)
        }
        Val::I64(_) => {
            if !fits(i64::MIN as f64, i64::MAX as f64) {
                return Err(too_small());
            }
            Val::I64(result as i64)
        }
        Val::F32(_) => {
            if !fits(-f64::from(f32::MAX), f64::from(f32::MAX)) {
                return Err(too_small());
            }
            Val::F32(result as f32)
        }
        Val::F64(_) => {
            if result < -f64::MAX || result > f64::MAX {
                return Err(too_small());
            }
            Val::F64(result)
        }
        Val::FMax(_) => Val::FMax(result),
        Val::Bool(_) | Val::Char(_) | Val::Str(_) => {
            return Err(error!(TypeMismatch; "{}() requires a numeric return address", op));
        }
    };
    mem.reinsert(ret, val)
}

pub fn sum(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let mut accumulator = 0.0;
    for token in params {
        accumulator += operand(mem, token, "sum")?;
    }
    store(mem, ret, accumulator, "sum")
}

pub fn product(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let mut accumulator = 1.0;
    for token in params {
        accumulator *= operand(mem, token, "product")?;
    }
    store(mem, ret, accumulator, "product")
}

pub fn subtract(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (lhs, rhs) = binary(params, "subtract")?;
    let result = operand(mem, lhs, "subtract")? - operand(mem, rhs, "subtract")?;
    store(mem, ret, result, "subtract")
}

pub fn divide(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (lhs, rhs) = binary(params, "divide")?;
    let result = operand(mem, lhs, "divide")? / operand(mem, rhs, "divide")?;
    store(mem, ret, result, "divide")
}

pub fn modulo(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (lhs, rhs) = binary(params, "mod")?;
    let result = (operand(mem, lhs, "mod")? as i64) % (operand(mem, rhs, "mod")? as i64);
    store(mem, ret, result as f64, "mod")
}

pub fn floor(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let value = operand(mem, unary(params, "floor")?, "floor")?;
    store(mem, ret, value.floor(), "floor")
}

pub fn ceiling(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let value = operand(mem, unary(params, "ceiling")?, "ceiling")?;
    store(mem, ret, value.ceil(), "ceiling")
}

pub fn abs(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let value = operand(mem, unary(params, "abs")?, "abs")?;
    store(mem, ret, value.abs(), "abs")
}

pub fn power(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    require_return(mem, ret)?;
    let (base, exponent) = binary(params, "pow")?;
    let result = operand(mem, base, "pow")?.powf(operand(mem, exponent, "pow")?);
    store(mem, ret, result, "pow")
}
