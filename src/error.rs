/*!
  Errors produced while decoding or encoding SPIR-V words.

  Decoding fails fast: the first malformed word aborts the whole pass and no partial
  disassembly is returned. The `Diagnostic` carried by `Error::InvalidBinary` records where in
  the stream decoding stopped and why.
*/

use std::fmt::{Display, Formatter};
use std::io;

use thiserror::Error;

use crate::bytecode::{Word, INSTRUCTION_WORD_COUNT_MAX};

pub type Result<T> = std::result::Result<T, Error>;

/// Human readable context attached to a decode failure.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
  /// Word index into the binary at which decoding failed.
  pub position : usize,
  /// The offending word, when there was one to read.
  pub word     : Option<Word>,
  pub message  : String,
}

impl Diagnostic {
  pub fn new<S: Into<String>>(position: usize, message: S) -> Diagnostic {
    Diagnostic {
      position,
      word    : None,
      message : message.into()
    }
  }

  pub fn with_word<S: Into<String>>(position: usize, word: Word, message: S) -> Diagnostic {
    Diagnostic {
      position,
      word    : Some(word),
      message : message.into()
    }
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.word {
      Some(word) => write!(f, "word {} ({:#010x}): {}", self.position, word, self.message),
      None       => write!(f, "word {}: {}", self.position, self.message)
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed magic number, truncated header or instruction, unknown opcode, word count
  /// mismatch, or an operand value the grammar cannot resolve.
  #[error("invalid binary at {0}")]
  InvalidBinary(Diagnostic),

  /// An encoded instruction would exceed the 16 bit word count field.
  #[error("instruction word count '{limit}' exceeded")]
  LimitExceeded { limit: usize },

  /// A textual word dump could not be parsed.
  #[error("invalid word dump: {0}")]
  InvalidText(String),

  /// Writing the disassembly to its destination failed.
  #[error("failed to write disassembly: {0}")]
  Io(#[from] io::Error),
}

impl Error {
  pub(crate) fn invalid_binary<S: Into<String>>(position: usize, message: S) -> Error {
    Error::InvalidBinary(Diagnostic::new(position, message))
  }

  pub(crate) fn invalid_word<S: Into<String>>(position: usize, word: Word, message: S) -> Error {
    Error::InvalidBinary(Diagnostic::with_word(position, word, message))
  }

  pub(crate) fn limit_exceeded() -> Error {
    Error::LimitExceeded { limit: INSTRUCTION_WORD_COUNT_MAX }
  }

  /// The diagnostic attached to a decode failure, if any.
  pub fn diagnostic(&self) -> Option<&Diagnostic> {
    match self {
      Error::InvalidBinary(diagnostic) => Some(diagnostic),
      _                                => None
    }
  }
}
