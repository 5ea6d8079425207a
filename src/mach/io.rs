/*!
## Terminal I/O operations

`print`/`println`/`flush` write to the VM's byte sink, `input` reads one
line from its input source. Nothing in here touches the process stdout or
stdin directly; the front end decides what the sink and source are.
*/

use super::memory::check_return;
use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};
use std::io::{BufRead, Write};

type Result<T> = std::result::Result<T, Error>;

pub(crate) fn io_err(e: std::io::Error) -> Error {
    error!(Io; "{}", e)
}

/// `$ref` prints the stringified value, a quoted literal prints its
/// interior, anything else prints verbatim.
fn write_token<W: Write>(out: &mut W, mem: &SectionMemory, token: &str) -> Result<()> {
    if token.starts_with('$') {
        write!(out, "{}", mem.resolve_ref(token)?).map_err(io_err)
    } else if literal::is_quoted(token) {
        write!(out, "{}", literal::unquote(token)).map_err(io_err)
    } else {
        write!(out, "{}", token).map_err(io_err)
    }
}

pub fn print<W: Write>(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    out: &mut W,
) -> Result<()> {
    check_return(mem, ret)?;
    for token in params {
        write_token(out, mem, token)?;
    }
    Ok(())
}

pub fn println<W: Write>(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    out: &mut W,
) -> Result<()> {
    check_return(mem, ret)?;
    for token in params {
        write_token(out, mem, token)?;
        writeln!(out).map_err(io_err)?;
    }
    Ok(())
}

pub fn flush<W: Write>(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    out: &mut W,
) -> Result<()> {
    check_return(mem, ret)?;
    if !params.is_empty() {
        return Err(error!(Parse; "flush() doesn't take any parameters"));
    }
    out.flush().map_err(io_err)
}

pub fn input<W: Write, R: BufRead>(
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    out: &mut W,
    source: &mut R,
) -> Result<()> {
    check_return(mem, ret)?;
    if params.len() > 1 {
        return Err(error!(Parse; "input() takes at most one display string"));
    }

    let mut display = params.first().cloned().unwrap_or_default();
    if display.starts_with('$') {
        display = mem.resolve_ref(&display)?;
    }
    if literal::is_quoted(&display) {
        display = literal::unquote(&display).to_string();
    }
    write!(out, "{}", display).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    let mut line = String::new();
    source.read_line(&mut line).map_err(io_err)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    if ret != "nullptr" {
        mem.reinsert(ret, Val::Str(line))?;
    }
    Ok(())
}
