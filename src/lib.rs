//! # Sigil
//!
//! A small scripting language built from named sections of explicit, typed
//! instructions.
//! ```text
//! #main{
//!     @new_f32 : (temp , 25.0);
//!     @multiply : (1.8 , $temp) ~ temp;
//!     @add : ($temp , 32) ~ temp;
//!     @println : ("In Fahrenheit: " , $temp);
//! }
//! ```
//!
//! Every statement names an operation (`@op`), its parameters, an optional
//! guard (`<$flag>`) and an optional return address (`~ var`). Sections own
//! their variables; `@import`/`@export` move variables between sections and
//! `@execute` calls another section outright.
//!
//! ## Embedding
//!
//! ```no_run
//! use std::io;
//!
//! let program = sigil::compile("#main{ @println : (\"hi\"); }")?;
//! let mut vm = sigil::Vm::new(program, io::stdout().lock(), io::stdin().lock());
//! vm.build_memory();
//! vm.execute("main")?;
//! # Ok::<(), sigil::Error>(())
//! ```
//!
//! The VM writes to any [`std::io::Write`] sink and reads lines from any
//! [`std::io::BufRead`] source, so output and input are fully capturable.

pub mod lang;
pub mod mach;

pub use lang::{Error, ErrorKind, Instruction};
pub use mach::{compile, Program, SectionMemory, Val, Vm};
