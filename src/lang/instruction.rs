/// ## Instruction
///
/// The four-field record the VM executes. `guard` gates execution
/// (`true`, `false`, `$name`, any of those behind `!`); `op` names the
/// operation; `params` holds the raw parameter tokens; `ret` is the
/// variable a result is written to, or `nullptr` for none.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub guard: String,
    pub op: String,
    pub params: Vec<String>,
    pub ret: String,
}

impl std::fmt::Display for Instruction {
    /// Canonical printed form. Compiling it back yields an equal
    /// instruction.
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "<{}> @{} : ({}) ~ {};",
            self.guard,
            self.op,
            self.params.join(", "),
            self.ret
        )
    }
}
