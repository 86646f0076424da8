//! A tiny, embeddable line-oriented command interpreter.
//!
//! The host program registers named commands as closures, then hands the
//! interpreter a line-based input stream. Each line is split into a command name
//! and arguments ([`Expression`]), the command is looked up in the registry, and
//! its callback runs with the arguments and an output sink. Arguments are kept as
//! raw text ([`Value`]) and converted to the type a command asks for on demand.
//!
//! Malformed input only ever affects its own line: unknown commands print the
//! `help` listing, failing commands are reported and the loop moves on.

mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod io_adapters;
mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;

pub use config::InterpreterConfig;
pub use env::Session;
pub use lexer::Expression;
pub use parser::ParseError;
pub use value::{FromValue, Value};
