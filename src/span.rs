use std::fmt::Display;
use std::ops::Range;

/// A byte-offset range into the source text a token or error came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
  pub start: u32,
  pub end: u32,
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self {
    Self {
      start: start as u32,
      end: end as u32,
    }
  }

  pub fn start(&self) -> usize {
    self.start as usize
  }

  pub fn end(&self) -> usize {
    self.end as usize
  }

  pub fn empty() -> Span {
    Span { start: 0, end: 0 }
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  pub fn to(&self, other: Span) -> Span {
    Span {
      start: self.start.min(other.start),
      end: self.end.max(other.end),
    }
  }
}

impl From<Range<usize>> for Span {
  fn from(value: Range<usize>) -> Self {
    Span::new(value.start, value.end)
  }
}

impl From<Span> for Range<usize> {
  fn from(value: Span) -> Self {
    value.start()..value.end()
  }
}

impl Display for Span {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}..{}", self.start, self.end)
  }
}

/// Human-facing line/column for a span, computed lazily from source text.
#[derive(Debug, Clone, Copy)]
pub struct Location {
  pub line: usize,
  pub column: usize,
}

impl Location {
  pub fn of(source: &str, span: Span) -> Self {
    let line_start = source[..span.start()].rfind('\n').map(|v| v + 1).unwrap_or(0);
    let line = 1 + source[..line_start].matches('\n').count();
    let column = span.start() - line_start;
    Self { line, column }
  }
}
