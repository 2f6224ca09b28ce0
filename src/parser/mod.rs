//! Parser for the builtin `{{ ... }}` template dialect

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::parse;
