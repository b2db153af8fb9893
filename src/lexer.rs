use std::collections::VecDeque;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Turns source text into a token stream with indent/dedent/newline events
/// synthesized from column counting. Stateful and single-threaded:
/// callers pump it with `current()`/`advance()`, the way a hand-written
/// recursive-descent parser drives `ex/tvm`'s `logos`-backed `Lexer`. This
/// one scans bytes by hand instead of going through `logos` — the
/// indentation algorithm needs imperative column counting and one-line
/// lookahead that a declarative token regex can't express as directly (see
/// DESIGN.md).
pub struct Lexer<'src> {
  bytes: &'src [u8],
  pos: usize,
  level: usize,
  at_line_start: bool,
  pending: VecDeque<Token>,
  current: Token,
}

impl<'src> Lexer<'src> {
  pub fn new(src: &'src str) -> Self {
    let mut lex = Self {
      bytes: src.as_bytes(),
      pos: 0,
      level: 0,
      at_line_start: true,
      pending: VecDeque::new(),
      current: Token::new(TokenKind::Eof, Span::empty()),
    };
    lex.current = lex.produce();
    lex
  }

  pub fn current(&self) -> &Token {
    &self.current
  }

  /// Moves to the next token, returning the one that was current.
  pub fn advance(&mut self) -> Token {
    let next = self.produce();
    std::mem::replace(&mut self.current, next)
  }

  fn peek_char(&self) -> Option<char> {
    std::str::from_utf8(&self.bytes[self.pos..]).ok()?.chars().next()
  }

  fn bump_char(&mut self) -> Option<char> {
    let c = self.peek_char()?;
    self.pos += c.len_utf8();
    Some(c)
  }

  fn eof_token(&self) -> Token {
    Token::new(TokenKind::Eof, Span::new(self.pos, self.pos))
  }

  fn produce(&mut self) -> Token {
    if let Some(t) = self.pending.pop_front() {
      return t;
    }
    if self.at_line_start {
      if let Some(t) = self.resolve_indentation() {
        return t;
      }
    }
    self.scan_token()
  }

  /// Indentation model: measures each physical line's leading spaces in
  /// turn via `measure_line_column`, queuing one `Indent`/`Dedent` per level
  /// of difference against the running level — every line counts, including
  /// a blank or comment-only one, which is why an indented comment can
  /// produce its own spurious `Indent`/`Dedent` pair even though it never
  /// emits a `Newline`. Blank and comment-only lines are then skipped and
  /// the loop moves on to the next line; a line with real content stops the
  /// loop and returns the first queued token, `None` falling through to
  /// `scan_token` when the level already matched.
  fn resolve_indentation(&mut self) -> Option<Token> {
    loop {
      let (col, start) = match self.measure_line_column() {
        Some(pair) => pair,
        None => {
          self.at_line_start = false;
          return Some(self.eof_token());
        }
      };
      self.queue_indent_delta(col, start);

      match self.peek_char() {
        Some('\n') => {
          self.pos += 1;
          continue;
        }
        Some('#') => {
          while !matches!(self.peek_char(), None | Some('\n')) {
            self.pos += 1;
          }
          if self.peek_char() == Some('\n') {
            self.pos += 1;
          }
          continue;
        }
        _ => {
          self.at_line_start = false;
          return self.pending.pop_front();
        }
      }
    }
  }

  /// Queues one `Indent` or `Dedent` token per level of difference between
  /// `col / 2` and the running level, updating the level to match.
  fn queue_indent_delta(&mut self, col: usize, start: usize) {
    let target = col / 2;
    while target > self.level {
      self.level += 1;
      self.pending.push_back(Token::new(TokenKind::Indent, Span::new(start, start)));
    }
    while target < self.level {
      self.level -= 1;
      self.pending.push_back(Token::new(TokenKind::Dedent, Span::new(start, start)));
    }
  }

  /// Consumes one line's leading spaces (and a lone `\r` before a line
  /// ending, restarting the count) and returns the space count together
  /// with the position right after them — whatever the line turns out to
  /// hold, blank, comment, or real content. `None` means input ran out
  /// before any character was visible.
  fn measure_line_column(&mut self) -> Option<(usize, usize)> {
    loop {
      let mut spaces = 0usize;
      while self.peek_char() == Some(' ') {
        spaces += 1;
        self.pos += 1;
      }
      let start = self.pos;
      match self.peek_char() {
        None => return None,
        Some('\r') => {
          self.pos += 1;
          continue;
        }
        Some(_) => return Some((spaces, start)),
      }
    }
  }

  /// Scans one token at whatever position we're at mid-line: skips
  /// intra-line spaces and comments, then recognises a newline, digit run,
  /// word, quoted string, or operator/`Char`.
  fn scan_token(&mut self) -> Token {
    loop {
      while self.peek_char() == Some(' ') {
        self.pos += 1;
      }
      if self.peek_char() == Some('#') {
        while !matches!(self.peek_char(), None | Some('\n')) {
          self.pos += 1;
        }
        continue;
      }
      break;
    }

    let start = self.pos;
    match self.peek_char() {
      None => {
        // Last content line wasn't newline-terminated: synthesize one
        // Newline before the Eof that the next call will produce.
        self.at_line_start = true;
        Token::new(TokenKind::Newline, Span::new(start, start))
      }
      Some('\r') => {
        self.pos += 1;
        self.scan_token()
      }
      Some('\n') => {
        self.pos += 1;
        self.at_line_start = true;
        Token::new(TokenKind::Newline, Span::new(start, self.pos))
      }
      Some(c) if c.is_ascii_digit() => self.scan_number(start),
      Some(c) if c.is_ascii_alphabetic() || c == '_' => self.scan_word(start),
      Some('"') | Some('\'') => self.scan_string(start),
      Some(_) => self.scan_operator(start),
    }
  }

  fn scan_number(&mut self, start: usize) -> Token {
    while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
      self.pos += 1;
    }
    let text = std::str::from_utf8(&self.bytes[start..self.pos]).expect("ascii digits");
    let value: i64 = text.parse().unwrap_or(0);
    Token::new(TokenKind::Number(value), Span::new(start, self.pos))
  }

  fn scan_word(&mut self, start: usize) -> Token {
    while matches!(self.peek_char(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
      self.pos += 1;
    }
    let text = std::str::from_utf8(&self.bytes[start..self.pos]).expect("ascii word");
    let kind = TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Id(text.to_string()));
    Token::new(kind, Span::new(start, self.pos))
  }

  /// Unknown escapes drop the backslash *and* the escaped character — an
  /// implementation choice left open by the design, resolved here to
  /// match the original's table-driven escape handling (see DESIGN.md).
  fn scan_string(&mut self, start: usize) -> Token {
    let quote = self.bump_char().expect("caller checked a quote is present");
    let mut value = String::new();
    loop {
      match self.peek_char() {
        None => break,
        Some(c) if c == quote => {
          self.pos += 1;
          break;
        }
        Some('\\') => {
          self.pos += 1;
          match self.peek_char() {
            Some('n') => {
              value.push('\n');
              self.pos += 1;
            }
            Some('t') => {
              value.push('\t');
              self.pos += 1;
            }
            Some('\'') => {
              value.push('\'');
              self.pos += 1;
            }
            Some('"') => {
              value.push('"');
              self.pos += 1;
            }
            Some(c) => {
              self.pos += c.len_utf8();
            }
            None => {}
          }
        }
        Some(c) => {
          value.push(c);
          self.pos += c.len_utf8();
        }
      }
    }
    Token::new(TokenKind::String(value), Span::new(start, self.pos))
  }

  /// Two-character operators (`==`, `!=`, `<=`, `>=`) win over a lone
  /// `Char`; everything else falls through to `Char(c)`.
  fn scan_operator(&mut self, start: usize) -> Token {
    let c = self.bump_char().expect("caller checked a character is present");
    let kind = match (c, self.peek_char()) {
      ('=', Some('=')) => {
        self.bump_char();
        TokenKind::Eq
      }
      ('!', Some('=')) => {
        self.bump_char();
        TokenKind::NotEq
      }
      ('<', Some('=')) => {
        self.bump_char();
        TokenKind::LessOrEq
      }
      ('>', Some('=')) => {
        self.bump_char();
        TokenKind::GreaterOrEq
      }
      _ => TokenKind::Char(c),
    };
    Token::new(kind, Span::new(start, self.pos))
  }
}
