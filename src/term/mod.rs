/*!
## Terminal front end

Reads a source file, compiles it, builds the memory union and runs `main`
against the real stdout/stdin. Errors print bold on stderr, prefixed the
way the language has always reported them.
*/

use ansi_term::Style;
use sigil::{compile, Vm};
use std::io;

pub fn main() {
    let mut args = std::env::args();
    let _executable = args.next();
    let filename = match (args.next(), args.next()) {
        (Some(filename), None) => filename,
        _ => {
            println!("Usage: sigil FILENAME");
            return;
        }
    };

    let source = match std::fs::read_to_string(&filename) {
        Ok(source) => source,
        Err(error) => {
            report(&format!("{}: {}", filename, error));
            std::process::exit(1);
        }
    };

    let program = match compile(&source) {
        Ok(program) => program,
        Err(error) => {
            report(&format!("?{}", error));
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let stdin = io::stdin();
    let mut vm = Vm::new(program, stdout.lock(), stdin.lock());
    vm.build_memory();
    if let Err(error) = vm.execute("main") {
        report(&format!("?{}", error));
        std::process::exit(1);
    }
}

fn report(message: &str) {
    eprintln!("{}", Style::new().bold().paint(message));
}
