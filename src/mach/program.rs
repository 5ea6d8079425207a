use crate::lang::{self, Error, Instruction};
use rustc_hash::FxHashMap;

type Result<T> = std::result::Result<T, Error>;

/// Compiles source text into a [`Program`]. Pure: no memory is built and
/// nothing executes.
pub fn compile(source: &str) -> Result<Program> {
    Program::compile(source)
}

/// ## Compiled program
///
/// Map from section name to its ordered instruction list. Names are stored
/// without the leading `#`; the `#` is a source-syntactic marker only, and
/// the VM strips it from section-name parameters before lookup so both
/// spellings work in `@execute`/`@import`/`@export`.
#[derive(Debug, Default)]
pub struct Program {
    sections: FxHashMap<String, Vec<Instruction>>,
}

impl Program {
    pub fn compile(source: &str) -> Result<Program> {
        let mut sections = FxHashMap::default();
        for (name, body) in lang::sections(source)? {
            let mut instructions = vec![];
            for line in lang::lines(&body) {
                instructions.push(lang::parse(&line).map_err(|e| e.in_section(&name))?);
            }
            sections.insert(name, instructions);
        }
        Ok(Program { sections })
    }

    pub fn section(&self, name: &str) -> Option<&[Instruction]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}
