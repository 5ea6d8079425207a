/// Constructs an [`Error`] from an [`ErrorKind`], optionally with a
/// formatted message: `error!(Overflow)` or
/// `error!(Overflow; "value for '{}' cannot fit in i8", name)`.
#[macro_export]
macro_rules! error {
    ($kind:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorKind::$kind)
    };
    ($kind:ident; $($arg:tt)*) => {
        $crate::lang::Error::new($crate::lang::ErrorKind::$kind)
            .with_message(format!($($arg)*))
    };
}

/// ## Interpreter errors
///
/// Every failure in the pipeline carries a kind from the single taxonomy
/// plus, once known, the section name and instruction index it surfaced in.
/// An error aborts the whole `execute` call; nothing recovers locally.
#[derive(Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    section: Option<String>,
    instruction: Option<usize>,
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    UnknownSection,
    UnknownOp,
    UnknownVariable,
    UnknownReturnAddress,
    DuplicateVariable,
    ListExists,
    TypeMismatch,
    BadLiteral,
    Overflow,
    BadGuard,
    BadLoopBounds,
    MissingLoopEnd,
    Io,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Error {
        Error {
            kind,
            section: None,
            instruction: None,
            message: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Error {
        self.message = Some(message);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Records the section an error surfaced in. The innermost frame wins;
    /// callers further out leave an already-annotated error untouched.
    pub fn in_section(mut self, section: &str) -> Error {
        if self.section.is_none() {
            self.section = Some(section.to_string());
        }
        self
    }

    /// Records the instruction index, if not already recorded.
    pub fn at_instruction(mut self, index: usize) -> Error {
        if self.instruction.is_none() && self.section.is_none() {
            self.instruction = Some(index);
        }
        self
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorKind::*;
        let s = match self {
            Parse => "SYNTAX ERROR",
            UnknownSection => "UNKNOWN SECTION",
            UnknownOp => "UNKNOWN OPERATION",
            UnknownVariable => "UNKNOWN VARIABLE",
            UnknownReturnAddress => "UNKNOWN RETURN ADDRESS",
            DuplicateVariable => "DUPLICATE VARIABLE",
            ListExists => "LIST ALREADY EXISTS",
            TypeMismatch => "TYPE MISMATCH",
            BadLiteral => "BAD LITERAL",
            Overflow => "OVERFLOW",
            BadGuard => "BAD GUARD",
            BadLoopBounds => "BAD LOOP BOUNDS",
            MissingLoopEnd => "MISSING LOOP END",
            Io => "IO ERROR",
        };
        write!(f, "{}", s)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, "; {}", message)?;
        }
        match (&self.section, self.instruction) {
            (Some(section), Some(index)) => write!(f, "; in {}:{}", section, index),
            (Some(section), None) => write!(f, "; in {}", section),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Error {}
