use std::fmt::Write as _;
use std::io::Write as _;

/// Threaded through every `execute` call and through object printing.
/// The only capability the core evaluator needs from its host is somewhere
/// to write `print` output; implementations may grow additional
/// capabilities (e.g. input) without changing the evaluator.
pub trait Context {
  fn write_str(&mut self, s: &str);

  fn write_char(&mut self, c: char) {
    let mut buf = [0u8; 4];
    self.write_str(c.encode_utf8(&mut buf));
  }
}

/// Writes `print` output to the process's standard output.
#[derive(Default)]
pub struct StdoutContext;

impl Context for StdoutContext {
  fn write_str(&mut self, s: &str) {
    let _ = std::io::stdout().write_all(s.as_bytes());
  }
}

/// Captures `print` output in memory — used by tests and by `Stringify`'s
/// implementation detail of rendering an object through its `print` method.
#[derive(Default)]
pub struct BufferContext {
  buf: String,
}

impl BufferContext {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn as_str(&self) -> &str {
    &self.buf
  }

  pub fn into_string(self) -> String {
    self.buf
  }
}

impl Context for BufferContext {
  fn write_str(&mut self, s: &str) {
    let _ = self.buf.write_str(s);
  }
}
