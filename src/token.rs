use std::fmt::Display;

use crate::span::Span;

/// A single lexical token. Payload-bearing kinds carry their decoded value
/// directly (already unescaped for strings, already parsed for numbers) —
/// there is no separate source-lexeme lookup, unlike a span-only tokenizer.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub span: Span,
}

impl Token {
  pub fn new(kind: TokenKind, span: Span) -> Self {
    Self { kind, span }
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    Display::fmt(&self.kind, f)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
  Number(i64),
  Id(String),
  String(String),
  Char(char),

  Class,
  Return,
  If,
  Else,
  Def,
  Print,
  And,
  Or,
  Not,
  Eq,
  NotEq,
  LessOrEq,
  GreaterOrEq,
  None,
  True,
  False,

  Newline,
  Indent,
  Dedent,
  Eof,
}

impl TokenKind {
  /// Looks up a bare word against the keyword table. Returns `None`
  /// for anything that should lex as a plain `Id`.
  pub fn keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match word {
      "class" => Class,
      "return" => Return,
      "if" => If,
      "else" => Else,
      "def" => Def,
      "print" => Print,
      "and" => And,
      "or" => Or,
      "not" => Not,
      "None" => None,
      "True" => True,
      "False" => False,
      _ => return Option::None,
    })
  }
}

impl Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use TokenKind::*;
    match self {
      Number(v) => write!(f, "Number{{{v}}}"),
      Id(v) => write!(f, "Id{{{v}}}"),
      String(v) => write!(f, "String{{{v}}}"),
      Char(v) => write!(f, "Char{{{v}}}"),
      Class => write!(f, "Class"),
      Return => write!(f, "Return"),
      If => write!(f, "If"),
      Else => write!(f, "Else"),
      Def => write!(f, "Def"),
      Print => write!(f, "Print"),
      And => write!(f, "And"),
      Or => write!(f, "Or"),
      Not => write!(f, "Not"),
      Eq => write!(f, "Eq"),
      NotEq => write!(f, "NotEq"),
      LessOrEq => write!(f, "LessOrEq"),
      GreaterOrEq => write!(f, "GreaterOrEq"),
      None => write!(f, "None"),
      True => write!(f, "True"),
      False => write!(f, "False"),
      Newline => write!(f, "Newline"),
      Indent => write!(f, "Indent"),
      Dedent => write!(f, "Dedent"),
      Eof => write!(f, "Eof"),
    }
  }
}
