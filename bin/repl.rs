//! A thin demo binary standing in for the program entry point (out of scope
//! since there's no parser to drive a real "run this file" command).
//! Grounded on `jprochazk-hebi`'s own `crates/cli`: `clap` for subcommands,
//! `anyhow::Result` at the process boundary, `rustyline` for line editing.
//!
//! Three subcommands:
//! - `lex <file>`: tokenizes a file and prints its token stream, one token
//!   per line, the way a human would read the `Kind{value}` display form.
//! - `repl`: an interactive line editor that lexes whatever you type and
//!   prints the resulting tokens immediately — the closest thing to a REPL
//!   this crate can offer without a parser.
//! - `demo <name>`: runs one of the hand-built `Stmt` trees reproducing a
//!   concrete scenario, since those trees are what a parser
//!   would otherwise produce from source text.

use std::rc::Rc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mython::isolate::print;
use mython::{Class, Closure, CompareOp, Context, Lexer, Method, Stmt, StdoutContext, TokenKind};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Parser)]
#[command(author, version, about = "Mython lexer/evaluator demo", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  cmd: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
  /// Tokenize a file and print its token stream.
  Lex { path: String },
  /// Interactively lex whatever you type, one line at a time.
  Repl,
  /// Run a bundled hand-built Stmt tree reproducing a spec scenario.
  Demo { name: String },
}

fn main() -> anyhow::Result<()> {
  let args = Cli::parse();
  match args.cmd {
    Some(Cmd::Lex { path }) => lex_file(&path),
    Some(Cmd::Demo { name }) => run_demo(&name),
    Some(Cmd::Repl) | None => repl(),
  }
}

fn lex_file(path: &str) -> anyhow::Result<()> {
  let source = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
  print_tokens(&source);
  Ok(())
}

fn print_tokens(source: &str) {
  let mut lexer = Lexer::new(source);
  loop {
    let token = lexer.current().clone();
    println!("{token}");
    if token.kind == TokenKind::Eof {
      break;
    }
    lexer.advance();
  }
}

fn repl() -> anyhow::Result<()> {
  let mut editor = DefaultEditor::new()?;
  loop {
    match editor.readline("mython> ") {
      Ok(line) => {
        editor.add_history_entry(line.as_str()).ok();
        print_tokens(&format!("{line}\n"));
      }
      Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
      Err(err) => return Err(err.into()),
    }
  }
  Ok(())
}

/// Reproduces a handful of literal scenarios as hand-built `Stmt`
/// trees, the way the external parser this crate doesn't include would
/// have produced them from source text.
fn run_demo(name: &str) -> anyhow::Result<()> {
  let mut ctx = StdoutContext;
  let mut scope = Closure::default();
  let tree = match name {
    "arithmetic" => Stmt::print(vec![Stmt::add(Stmt::number(1), Stmt::mult(Stmt::number(2), Stmt::number(3)))]),
    "string-concat" => Stmt::compound(vec![
      Stmt::assignment("x", Stmt::string("abc")),
      Stmt::print(vec![Stmt::add(Stmt::var("x"), Stmt::string("de"))]),
    ]),
    "dunder-str" => {
      let str_method = Method::new("__str__", vec![], Stmt::ret(Stmt::string("hi")));
      let class = Rc::new(Class::new("X", vec![str_method], None));
      Stmt::compound(vec![
        Stmt::assignment("x", Stmt::new_instance(class, vec![])),
        Stmt::print(vec![Stmt::var("x")]),
      ])
    }
    "nested-return" => {
      let inner_if = Stmt::if_else(Stmt::boolean(true), Stmt::compound(vec![Stmt::ret(Stmt::number(42))]), None);
      let outer_if = Stmt::if_else(Stmt::boolean(true), Stmt::compound(vec![inner_if]), None);
      Stmt::compound(vec![outer_if])
    }
    "inheritance" => {
      let init = Method::new(
        "__init__",
        vec!["v".to_string()],
        Stmt::field_assignment(Stmt::var("self"), "v", Stmt::var("v")),
      );
      let a = Rc::new(Class::new("A", vec![init], None));
      let b = Rc::new(Class::new("B", vec![], Some(a)));
      Stmt::compound(vec![
        Stmt::assignment("b", Stmt::new_instance(b, vec![Stmt::number(42)])),
        Stmt::print(vec![Stmt::path(vec!["b".to_string(), "v".to_string()])]),
      ])
    }
    "comparisons" => Stmt::print(vec![Stmt::comparison(CompareOp::LessOrEq, Stmt::number(1), Stmt::number(2))]),
    other => {
      anyhow::bail!(
        "unknown demo '{other}'; choose one of: arithmetic, string-concat, dunder-str, nested-return, inheritance, comparisons"
      )
    }
  };
  let result = tree.execute(&mut scope, &mut ctx).map_err(|e| anyhow::anyhow!(e.to_string()))?;
  if name == "nested-return" {
    print::print(&result, &mut ctx).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    ctx.write_char('\n');
  }
  Ok(())
}
