//! Optional color decoration of the disassembly. Decoding never depends on it.

/// What a piece of disassembly text represents.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Highlight {
  /// The header comment block.
  Comment,
  Id,
  ResultId,
  /// Numeric literals and extended instruction names.
  Literal,
  /// The contents of a string operand, inside its quotes.
  String,
}

/// Maps each kind of text to the markers written before and after it.
pub trait Palette {
  fn markers(&self, highlight: Highlight) -> (&str, &str);
}

/// Plain text.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoColor;

impl Palette for NoColor {
  fn markers(&self, _highlight: Highlight) -> (&str, &str) {
    ("", "")
  }
}

/// ANSI terminal escape sequences.
#[derive(Clone, Copy, Default, Debug)]
pub struct AnsiPalette;

const ANSI_RESET: &str = "\x1b[0m";

impl Palette for AnsiPalette {
  fn markers(&self, highlight: Highlight) -> (&str, &str) {
    let start =
      match highlight {
        Highlight::Comment  => "\x1b[1;30m", // grey
        Highlight::Id       => "\x1b[33m",   // yellow
        Highlight::ResultId => "\x1b[34m",   // blue
        Highlight::Literal  => "\x1b[31m",   // red
        Highlight::String   => "\x1b[32m",   // green
      };
    (start, ANSI_RESET)
  }
}
