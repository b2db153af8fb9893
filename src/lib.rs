//! Mython: a lexer and tree-walking evaluator for a small, indentation-
//! structured, dynamically-typed scripting language (a Python subset).
//!
//! The crate is split the way `jprochazk-hebi`'s own smallest, most
//! directly comparable member (`ex/tvm`) is: a lexer module, a node-tagged
//! `ast` module standing in for the parser this crate doesn't include, a
//! `value` model, and a handful of single-purpose `isolate` modules that
//! each own one evaluator concern (truthiness, comparison, method
//! invocation, instance construction). There is no parser — building the
//! statement tree from source text is treated as an external collaborator
//! (see `Stmt`'s constructors), and there is no program entry point beyond
//! the demo `bin/repl.rs` binary.

pub mod ast;
pub mod closure;
pub mod context;
pub mod error;
pub mod isolate;
pub mod lexer;
pub mod span;
pub mod token;
pub mod value;

pub use ast::{CompareOp, Stmt};
pub use closure::Closure;
pub use context::{BufferContext, Context, StdoutContext};
pub use error::{Error, LexerError, Result};
pub use lexer::Lexer;
pub use span::{Location, Span};
pub use token::{Token, TokenKind};
pub use value::{Class, ClassInstance, Method, Object, ObjectHolder};
