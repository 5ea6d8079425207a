#![allow(dead_code)]

use sigil::{compile, Error, Vm};
use std::io::Cursor;

/// Compiles and runs `main`, returning the outcome plus whatever reached
/// the sink before it (partial output is retained on failure).
pub fn exec(source: &str, input: &str) -> (Result<(), Error>, String) {
    let program = match compile(source) {
        Ok(program) => program,
        Err(error) => return (Err(error), String::new()),
    };
    let mut sink: Vec<u8> = vec![];
    let mut vm = Vm::new(program, &mut sink, Cursor::new(input.to_string()));
    vm.build_memory();
    let result = vm.execute("main");
    drop(vm);
    (result, String::from_utf8_lossy(&sink).into_owned())
}

pub fn run(source: &str) -> String {
    run_with_input(source, "")
}

pub fn run_with_input(source: &str, input: &str) -> String {
    let (result, output) = exec(source, input);
    if let Err(error) = result {
        panic!("?{} (output so far: {:?})", error, output);
    }
    output
}

pub fn fail(source: &str) -> Error {
    let (result, _) = exec(source, "");
    result.expect_err("program should fail")
}
