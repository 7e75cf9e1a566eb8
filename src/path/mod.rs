//! Path-data codec: SVG `d` attribute micro-grammar

pub mod command;
mod grammar;
pub mod lexer;

pub use command::{serialize, to_absolute, CommandKind, PathCommand};
pub use grammar::parse;
