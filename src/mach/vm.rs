use super::declare::{self, FloatWidth, IntWidth};
use super::memory::SectionMemory;
use super::program::Program;
use super::val::Val;
use super::{arith, io, list, loops, relate};
use crate::error;
use crate::lang::{literal, Error, Instruction};
use rustc_hash::FxHashMap;
use std::io::{BufRead, Write};

type Result<T> = std::result::Result<T, Error>;
type MemoryUnion = FxHashMap<String, SectionMemory>;

/// ## Virtual machine
///
/// Owns the compiled program, one [`SectionMemory`] per section, a byte
/// sink for output and a line source for input. Execution is synchronous
/// and run-to-completion; an error aborts the whole call with section and
/// instruction context attached, leaving partial output and memory
/// mutations in place.
pub struct Vm<W, R> {
    program: Program,
    memory: MemoryUnion,
    sink: W,
    input: R,
}

/// What the executed instruction asks the section loop to do next.
enum Flow {
    Next,
    Jump(usize),
}

impl<W: Write, R: BufRead> Vm<W, R> {
    pub fn new(program: Program, sink: W, input: R) -> Vm<W, R> {
        Vm {
            program,
            memory: MemoryUnion::default(),
            sink,
            input,
        }
    }

    /// Creates one empty memory per compiled section. Must run before
    /// [`Vm::execute`]; calling it again leaves existing memories alone.
    pub fn build_memory(&mut self) {
        for name in self.program.names() {
            self.memory.entry(name.to_string()).or_default();
        }
    }

    /// Runs a section from its first instruction to its last.
    pub fn execute(&mut self, section: &str) -> Result<()> {
        run(
            &self.program,
            &mut self.memory,
            &mut self.sink,
            &mut self.input,
            canonical(section),
            0,
            None,
        )
    }

    /// The memory of a section, for inspection after a run.
    pub fn memory(&self, section: &str) -> Option<&SectionMemory> {
        self.memory.get(canonical(section))
    }

    pub fn program(&self) -> &Program {
        &self.program
    }
}

/// Section names are stored without the `#` marker.
fn canonical(name: &str) -> &str {
    name.strip_prefix('#').unwrap_or(name)
}

fn section_memory<'a>(memory: &'a MemoryUnion, section: &str) -> Result<&'a SectionMemory> {
    memory
        .get(section)
        .ok_or_else(|| error!(UnknownSection; "no memory for section '{}'; build_memory() first", section))
}

fn section_memory_mut<'a>(
    memory: &'a mut MemoryUnion,
    section: &str,
) -> Result<&'a mut SectionMemory> {
    memory
        .get_mut(section)
        .ok_or_else(|| error!(UnknownSection; "no memory for section '{}'; build_memory() first", section))
}

fn run<W: Write, R: BufRead>(
    program: &Program,
    memory: &mut MemoryUnion,
    sink: &mut W,
    input: &mut R,
    section: &str,
    start: usize,
    end: Option<usize>,
) -> Result<()> {
    let code = program
        .section(section)
        .ok_or_else(|| error!(UnknownSection; "can't find the section '{}'", section))?;
    if !memory.contains_key(section) {
        return Err(error!(UnknownSection; "no memory for section '{}'; build_memory() first", section));
    }
    if code.is_empty() {
        return Ok(());
    }

    let last = end.unwrap_or(code.len() - 1);
    let mut idx = start;
    while idx <= last && idx < code.len() {
        let flow = exec(program, memory, sink, input, section, code, idx)
            .map_err(|e| e.at_instruction(idx).in_section(section))?;
        match flow {
            Flow::Next => idx += 1,
            Flow::Jump(next) => idx = next,
        }
    }
    Ok(())
}

/// Executes the instruction at `idx`: guard, return-address check, then
/// dispatch to a control-flow handler or the operation library.
fn exec<W: Write, R: BufRead>(
    program: &Program,
    memory: &mut MemoryUnion,
    sink: &mut W,
    input: &mut R,
    section: &str,
    code: &[Instruction],
    idx: usize,
) -> Result<Flow> {
    let ins = &code[idx];

    // `!` binds tighter than `$`: strip the negation, then resolve.
    let mut guard = ins.guard.as_str();
    let mut target = true;
    if let Some(rest) = guard.strip_prefix('!') {
        target = false;
        guard = rest;
    }
    let resolved;
    if guard.starts_with('$') {
        resolved = section_memory(memory, section)?.resolve_ref(guard)?;
        guard = &resolved;
    }
    let pass = match guard {
        "true" => true,
        "false" => false,
        _ => return Err(error!(BadGuard; "'{}' is not a boolean guard", ins.guard)),
    };
    if pass != target {
        return Ok(Flow::Next);
    }

    if ins.ret != "nullptr" && !section_memory(memory, section)?.contains(&ins.ret) {
        return Err(error!(UnknownReturnAddress; "can't find the return address '{}'", ins.ret));
    }

    match ins.op.as_str() {
        "start" => loop_block(program, memory, sink, input, section, code, idx),
        // `end` is paired by `start`; reached directly it is inert, exactly
        // like a `destination` label.
        "end" | "destination" => Ok(Flow::Next),
        "import" => {
            if ins.params.len() < 2 {
                return Err(
                    error!(Parse; "@import requires a source section and at least one variable"),
                );
            }
            transfer(memory, canonical(&ins.params[0]), section, &ins.params[1..])?;
            Ok(Flow::Next)
        }
        "export" => {
            if ins.params.len() < 2 {
                return Err(
                    error!(Parse; "@export requires a destination section and at least one variable"),
                );
            }
            transfer(memory, section, canonical(&ins.params[0]), &ins.params[1..])?;
            Ok(Flow::Next)
        }
        "execute" => {
            for name in &ins.params {
                let name = canonical(name);
                if !program.contains(name) {
                    return Err(error!(UnknownSection; "can't find the section '{}'", name));
                }
                run(program, memory, sink, input, name, 0, None)?;
            }
            Ok(Flow::Next)
        }
        "goto" => goto(code, idx, &ins.params),
        _ => {
            let mem = section_memory_mut(memory, section)?;
            dispatch(&ins.op, &ins.params, &ins.ret, mem, sink, input)?;
            Ok(Flow::Next)
        }
    }
}

/// Runs a `@start`/`@end` block: finds the matching `end`, reads the loop
/// bounds stored by `@loop`, and re-enters the executor once per iteration
/// with the iterator variable reinserted as `i64`.
fn loop_block<W: Write, R: BufRead>(
    program: &Program,
    memory: &mut MemoryUnion,
    sink: &mut W,
    input: &mut R,
    section: &str,
    code: &[Instruction],
    idx: usize,
) -> Result<Flow> {
    let ins = &code[idx];
    if ins.params.len() != 1 {
        return Err(error!(Parse; "@start requires a single parameter (the iterator name)"));
    }
    let iterator = ins.params[0].as_str();

    let end_idx = (idx + 1..code.len())
        .find(|&j| {
            code[j].op == "end" && code[j].params.first().map(String::as_str) == Some(iterator)
        })
        .ok_or_else(|| error!(MissingLoopEnd; "missing matching @end for @start {}", iterator))?;

    let (start, stop, step) = {
        let mem = section_memory(memory, section)?;
        let read = |field: &str| -> Result<i64> {
            let key = loops::option_name(iterator, field);
            if !mem.contains(&key) {
                return Err(
                    error!(UnknownVariable; "can't find the {} of loop '{}'; run @loop first", field, iterator),
                );
            }
            literal::parse_int(&mem.get(&key)?.to_string())
        };
        (read("start")?, read("stop")?, read("step")?)
    };
    if step == 0 {
        return Err(error!(BadLoopBounds; "step must not be zero"));
    }

    let mut iter = start;
    while iter <= stop {
        section_memory_mut(memory, section)?.reinsert(iterator, Val::I64(iter))?;
        run(program, memory, sink, input, section, idx + 1, Some(end_idx - 1))?;
        iter += step;
    }

    Ok(Flow::Jump(end_idx + 1))
}

/// Moves variables between two section memories, holding disjoint mutable
/// borrows by taking the source out of the union for the duration.
fn transfer(
    memory: &mut MemoryUnion,
    from_name: &str,
    to_name: &str,
    vars: &[String],
) -> Result<()> {
    if !memory.contains_key(from_name) {
        return Err(
            error!(UnknownSection; "can't find the section '{}' in the memory union", from_name),
        );
    }
    if !memory.contains_key(to_name) {
        return Err(
            error!(UnknownSection; "can't find the section '{}' in the memory union", to_name),
        );
    }

    if from_name == to_name {
        // transferring a variable onto itself is either a duplicate at the
        // receiver or missing at the source
        let mem = section_memory(memory, to_name)?;
        if let Some(name) = vars.first() {
            return Err(if mem.contains(name) {
                error!(DuplicateVariable; "variable '{}' already exists at the receiver", name)
            } else {
                error!(UnknownVariable; "variable '{}' doesn't exist", name)
            });
        }
        return Ok(());
    }

    let mut from = match memory.remove(from_name) {
        Some(mem) => mem,
        None => return Err(error!(UnknownSection; "can't find the section '{}'", from_name)),
    };
    let result = (|| {
        let to = section_memory_mut(memory, to_name)?;
        for name in vars {
            from.transfer(name, to)?;
        }
        Ok(())
    })();
    memory.insert(from_name.to_string(), from);
    result
}

/// Bidirectional outward search for the matching `@destination`, nearest
/// first. Execution resumes at the instruction after the label.
fn goto(code: &[Instruction], idx: usize, params: &[String]) -> Result<Flow> {
    if params.len() != 1 {
        return Err(error!(Parse; "@goto requires a single parameter (the destination name)"));
    }
    let label = params[0].as_str();
    let is_target = |ins: &Instruction| {
        ins.op == "destination" && ins.params.first().map(String::as_str) == Some(label)
    };

    let mut left = idx as i64 - 1;
    let mut right = idx + 1;
    while left >= 0 || right < code.len() {
        if left >= 0 {
            if is_target(&code[left as usize]) {
                return Ok(Flow::Jump(left as usize + 1));
            }
            left -= 1;
        }
        if right < code.len() {
            if is_target(&code[right]) {
                return Ok(Flow::Jump(right + 1));
            }
            right += 1;
        }
    }

    Err(error!(Parse; "couldn't find the goto destination '{}'", label))
}

/// Routes a non-control-flow instruction to the operation library.
fn dispatch<W: Write, R: BufRead>(
    op: &str,
    params: &[String],
    ret: &str,
    mem: &mut SectionMemory,
    sink: &mut W,
    input: &mut R,
) -> Result<()> {
    match op {
        "new_i8" => declare::new_int(params, ret, mem, IntWidth::I8),
        "new_i16" => declare::new_int(params, ret, mem, IntWidth::I16),
        "new_i32" => declare::new_int(params, ret, mem, IntWidth::I32),
        "new_i64" => declare::new_int(params, ret, mem, IntWidth::I64),
        "new_f32" => declare::new_float(params, ret, mem, FloatWidth::F32),
        "new_f64" => declare::new_float(params, ret, mem, FloatWidth::F64),
        "new_fmax" => declare::new_float(params, ret, mem, FloatWidth::FMax),
        "new_str" => declare::new_str(params, ret, mem),
        "new_char" => declare::new_char(params, ret, mem),
        "new_bool" => declare::new_bool(params, ret, mem),

        "reAssign_i8" => declare::reassign_int(params, ret, mem, IntWidth::I8),
        "reAssign_i16" => declare::reassign_int(params, ret, mem, IntWidth::I16),
        "reAssign_i32" => declare::reassign_int(params, ret, mem, IntWidth::I32),
        "reAssign_i64" => declare::reassign_int(params, ret, mem, IntWidth::I64),
        "reAssign_f32" => declare::reassign_float(params, ret, mem, FloatWidth::F32),
        "reAssign_f64" => declare::reassign_float(params, ret, mem, FloatWidth::F64),
        "reAssign_fmax" => declare::reassign_float(params, ret, mem, FloatWidth::FMax),
        "reAssign_str" => declare::reassign_str(params, ret, mem),
        "reAssign_char" => declare::reassign_char(params, ret, mem),
        "reAssign_bool" => declare::reassign_bool(params, ret, mem),

        "delete_var" => declare::delete_var(params, ret, mem),

        "print" => io::print(params, ret, mem, sink),
        "println" => io::println(params, ret, mem, sink),
        "flush" => io::flush(params, ret, mem, sink),
        "input" => io::input(params, ret, mem, sink, input),

        "add" | "sum" => arith::sum(params, ret, mem),
        "multiply" | "product" => arith::product(params, ret, mem),
        "subtract" => arith::subtract(params, ret, mem),
        "divide" => arith::divide(params, ret, mem),
        "mod" => arith::modulo(params, ret, mem),
        "floor" => arith::floor(params, ret, mem),
        "ceiling" => arith::ceiling(params, ret, mem),
        "abs" => arith::abs(params, ret, mem),
        "pow" => arith::power(params, ret, mem),

        "isEqual" => relate::is_equal(params, ret, mem),
        "isNotEqual" => relate::is_not_equal(params, ret, mem),
        "isGreater" => relate::compare(params, ret, mem, "isGreater", |a, b| a > b),
        "isLess" => relate::compare(params, ret, mem, "isLess", |a, b| a < b),
        "isGreaterEqual" => relate::compare(params, ret, mem, "isGreaterEqual", |a, b| a >= b),
        "isLessEqual" => relate::compare(params, ret, mem, "isLessEqual", |a, b| a <= b),
        "isCharsEqual" => relate::chars_equal(params, ret, mem, false),
        "isCharsNotEqual" | "isNotCharsEqual" => relate::chars_equal(params, ret, mem, true),

        "loop" => loops::setup(params, ret, mem),

        "new_list" => list::new_list(params, ret, mem),
        "reAssign_list" => list::reassign_list(params, ret, mem),
        "delete_list" => list::delete_list(params, ret, mem),
        "get" => list::get(params, ret, mem),
        "push" => list::push(params, ret, mem),
        "pop" => list::pop(params, ret, mem),
        "print_list" => list::print_list(params, ret, mem, sink),

        _ => Err(error!(UnknownOp; "the operation '{}' is not provided by the library", op)),
    }
}
