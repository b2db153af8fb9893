use std::fmt::{self, Display};

use crate::span::{Location, Span};
use crate::token::TokenKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raised by the lexer's typed expectation helpers (`expect`) — not by the
/// lexer's own scanning, which never fails and degrades to `Char` tokens
/// instead.
#[derive(Debug, Clone)]
pub struct LexerError {
  kind: LexerErrorKind,
  span: Span,
}

#[derive(Debug, Clone)]
pub enum LexerErrorKind {
  WrongKind { expected: &'static str, found: TokenKind },
  WrongValue { expected: String, found: TokenKind },
}

impl LexerError {
  pub fn wrong_kind(expected: &'static str, found: TokenKind, span: Span) -> Self {
    Self {
      kind: LexerErrorKind::WrongKind { expected, found },
      span,
    }
  }

  pub fn wrong_value(expected: impl Into<String>, found: TokenKind, span: Span) -> Self {
    Self {
      kind: LexerErrorKind::WrongValue {
        expected: expected.into(),
        found,
      },
      span,
    }
  }

  pub fn span(&self) -> Span {
    self.span
  }
}

impl Display for LexerError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      LexerErrorKind::WrongKind { expected, found } => {
        write!(f, "another type was expected: wanted {expected}, found {found}")
      }
      LexerErrorKind::WrongValue { expected, found } => {
        write!(f, "another value was expected: wanted {expected}, found {found}")
      }
    }
  }
}

impl std::error::Error for LexerError {}

/// A runtime error raised by the evaluator: unknown names, method
/// resolution/arity failures, type mismatches with no dunder fallback,
/// division by zero, dereferencing `None` where a value is required, and
/// field access through a non-instance.
#[derive(Debug, Clone)]
pub struct Error {
  message: String,
  span: Option<Span>,
}

impl Error {
  pub fn runtime(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      span: None,
    }
  }

  pub fn at(message: impl Into<String>, span: Span) -> Self {
    Self {
      message: message.into(),
      span: Some(span),
    }
  }

  pub fn span(&self) -> Option<Span> {
    self.span
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  /// A `rustc`-flavored pretty report: the message, the offending line, and
  /// a caret pointing at the span, when the error carries one.
  pub fn report(&self, source: &str) -> String {
    let Some(span) = self.span else {
      return format!("error: {}", self.message);
    };
    if span.is_empty() {
      return format!("error: {}", self.message);
    }

    let loc = Location::of(source, span);
    let line_start = source[..span.start()].rfind('\n').map(|v| v + 1).unwrap_or(0);
    let line_end = source[span.start()..].find('\n').map(|v| v + span.start()).unwrap_or(source.len());
    let line = &source[line_start..line_end];
    let col = loc.column;

    format!(
      "error: {}\n{} |  {}\n{:w$} |  {:col$}^",
      self.message,
      loc.line,
      line,
      "",
      "",
      w = loc.line.to_string().len(),
      col = col,
    )
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.message)
  }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lexer_error_messages() {
    let e = LexerError::wrong_kind("Number", TokenKind::Eof, Span::empty());
    assert!(e.to_string().contains("Number"));
    assert!(e.to_string().contains("Eof"));
  }

  #[test]
  fn runtime_error_without_span() {
    let e = Error::runtime("unknown name 'x'");
    assert_eq!(e.to_string(), "unknown name 'x'");
    assert_eq!(e.report("whatever"), "error: unknown name 'x'");
  }

  #[test]
  fn runtime_error_report_points_at_span() {
    let src = "x = 1 / 0\n";
    let span = Span::new(4, 9);
    let e = Error::at("division by zero", span);
    let report = e.report(src);
    assert!(report.contains("division by zero"));
    assert!(report.contains("1 / 0"));
  }
}
