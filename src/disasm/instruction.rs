/*!
  Decoding of a single instruction into a structured form which renders as one line of text.
*/

use std::fmt::{self, Display, Formatter, Write};

use crate::bytecode::{fix_word, split_opcode_word, Endianness, Op, Word};
use crate::error::{Error, Result};
use crate::grammar::{Grammar, OperandDesc};

use super::highlight::{Highlight, NoColor, Palette};
use super::operand::{decode_operand, operand_kind, DecodeState};

/// A piece of rendered disassembly text and what it represents.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fragment {
  /// `None` for text that is never colored, such as enumerant names.
  pub highlight : Option<Highlight>,
  pub text      : String,
}

impl Fragment {
  pub fn new<S: Into<String>>(highlight: Highlight, text: S) -> Fragment {
    Fragment {
      highlight : Some(highlight),
      text      : text.into()
    }
  }

  pub fn plain<S: Into<String>>(text: S) -> Fragment {
    Fragment {
      highlight : None,
      text      : text.into()
    }
  }

  /// Strings are quoted, with the palette's markers inside the quotes.
  pub fn write_to(&self, palette: &dyn Palette, out: &mut dyn Write) -> fmt::Result {
    let quoted = self.highlight == Some(Highlight::String);
    if quoted {
      out.write_char('"')?;
    }
    match self.highlight {
      Some(highlight) => {
        let (start, end) = palette.markers(highlight);
        write!(out, "{}{}{}", start, self.text, end)?;
      }
      None => out.write_str(&self.text)?
    }
    if quoted {
      out.write_char('"')?;
    }
    Ok(())
  }
}

impl Display for Fragment {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.write_to(&NoColor, f)
  }
}

/// One decoded instruction.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DecodedInstruction {
  pub opcode     : Op,
  pub word_count : u16,
  /// Word index of the instruction's first word within the module.
  pub position   : usize,
  pub result_id  : Option<Fragment>,
  /// The operands in order, the result id excluded.
  pub operands   : Vec<Fragment>,
}

impl DecodedInstruction {
  /// Writes `%result = OpName operand operand...`, without a line terminator.
  pub fn write_to(&self, palette: &dyn Palette, out: &mut dyn Write) -> fmt::Result {
    if let Some(result_id) = &self.result_id {
      result_id.write_to(palette, out)?;
      out.write_str(" = ")?;
    }
    write!(out, "{}", self.opcode.mnemonic())?;
    for operand in &self.operands {
      out.write_char(' ')?;
      operand.write_to(palette, out)?;
    }
    Ok(())
  }
}

impl Display for DecodedInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    self.write_to(&NoColor, f)
  }
}

/**
  Decodes the instruction whose first word is at `position`. Returns the instruction and the
  number of words its operands actually took, which the caller checks against the declared
  word count.
*/
pub(crate) fn decode_instruction(
  grammar  : &dyn Grammar,
  words    : &[Word],
  position : usize,
  endian   : Endianness,
  state    : &mut DecodeState,
) -> Result<(DecodedInstruction, usize)>
{
  let first =
    match words.get(position) {
      Some(word) => fix_word(*word, endian),
      None       => return Err(Error::invalid_binary(position, "missing instruction"))
    };
  let (word_count, opcode) = split_opcode_word(first);

  let desc =
    grammar.opcode(opcode).ok_or_else(|| {
      Error::invalid_word(position, first, format!("invalid opcode '{}'", opcode))
    })?;

  if word_count < desc.min_word_count {
    return Err(Error::invalid_word(
      position,
      first,
      format!(
        "{} has word count {}, minimum is {}",
        desc.opcode.mnemonic(),
        word_count,
        desc.min_word_count
      )
    ));
  }

  let result_index = desc.result_id_index();
  let end          = position + word_count as usize;

  let mut continuation : Option<&OperandDesc> = None;
  let mut result_id    : Option<Fragment>     = None;
  let mut operands     : Vec<Fragment>        = Vec::new();
  let mut cursor       : usize                = position + 1;
  let mut index        : usize                = 0;

  while cursor < end {
    index += 1;
    let word =
      match words.get(cursor) {
        Some(word) => fix_word(*word, endian),
        None => {
          return Err(Error::invalid_word(
            position,
            first,
            format!("{} is truncated by the end of the binary", desc.opcode.mnemonic())
          ));
        }
      };

    let kind =
      operand_kind(grammar, word, index, desc, &mut continuation).ok_or_else(|| {
        Error::invalid_word(
          cursor,
          word,
          format!("{} has no operand at position {}", desc.opcode.mnemonic(), index)
        )
      })?;

    let (fragment, consumed) =
      decode_operand(grammar, desc.opcode, kind, words, cursor, endian, state)?;

    if result_index == Some(index - 1) {
      result_id = Some(fragment);
    } else {
      operands.push(fragment);
    }
    cursor += consumed;
  }

  let instruction =
    DecodedInstruction {
      opcode: desc.opcode,
      word_count,
      position,
      result_id,
      operands
    };
  Ok((instruction, cursor - position))
}
