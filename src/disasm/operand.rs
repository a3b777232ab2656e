/*!
  Operand resolution and decoding.

  The kind of each operand is decided from its position within the instruction. Positions
  covered by the opcode's descriptor take the listed kind. An enumerant that carries operands of
  its own (`Aligned` takes an alignment literal, `BuiltIn` decorations take a built-in, ...)
  supplies the kinds of the positions that follow the fixed list. `OpSwitch` and
  `OpGroupMemberDecorate` alternate between their last two kinds to read `(literal, label)` and
  `(target, member)` pairs, and every other opcode repeats its last kind for variable length
  operand lists.
*/

use crate::bytecode::{fix_word, Endianness, Op, Word};
use crate::error::{Error, Result};
use crate::grammar::{ExtInstSet, Grammar, OpcodeDesc, OperandDesc, OperandKind};

use super::highlight::Highlight;
use super::instruction::Fragment;

/// State carried from one instruction to the next within a single disassembly pass.
#[derive(Clone, Copy, Default, Debug)]
pub(crate) struct DecodeState {
  /// Set by the most recent `OpExtInstImport` and consulted by `OpExtInst`.
  pub ext_inst_set: Option<ExtInstSet>,
}

/**
  The kind of the operand at 1-based position `index` of an instruction described by `desc`.

  `word` is the endian corrected operand word. When a fixed position holds an enumerant with
  operands of its own, that enumerant is remembered in `continuation` for the positions past
  the fixed list. The continuation is never cleared within an instruction.

  Returns `None` when no kind applies: the position runs past an active continuation, or the
  opcode takes no operands at all.
*/
pub(crate) fn operand_kind<'g>(
  grammar      : &'g dyn Grammar,
  word         : Word,
  index        : usize,
  desc         : &OpcodeDesc,
  continuation : &mut Option<&'g OperandDesc>,
) -> Option<OperandKind>
{
  let fixed = desc.operands;

  if index <= fixed.len() {
    let kind = fixed[index - 1];
    if let Some(entry) = grammar.operand(kind, word) {
      if !entry.operands.is_empty() {
        *continuation = Some(entry);
      }
    }
    Some(kind)
  } else if let Some(entry) = *continuation {
    entry.operands.get(index - fixed.len() - 1).copied()
  } else if reads_pairs(desc.opcode) && fixed.len() >= 2 {
    let pair = &fixed[fixed.len() - 2..];
    Some(pair[(index - fixed.len() - 1) % 2])
  } else {
    fixed.last().copied()
  }
}

fn reads_pairs(opcode: Op) -> bool {
  matches!(opcode, Op::Switch | Op::GroupMemberDecorate)
}

/**
  Decodes the operand of kind `kind` starting at `position` in `words`. Returns the rendered
  operand and the number of words it took, which is more than one only for strings.

  An `OpExtInstImport` string selects the extended instruction set for the rest of the pass,
  and the instruction number of an `OpExtInst` is rendered by name from that set.
*/
pub(crate) fn decode_operand(
  grammar  : &dyn Grammar,
  opcode   : Op,
  kind     : OperandKind,
  words    : &[Word],
  position : usize,
  endian   : Endianness,
  state    : &mut DecodeState,
) -> Result<(Fragment, usize)>
{
  let word =
    match words.get(position) {
      Some(word) => fix_word(*word, endian),
      None => {
        return Err(Error::invalid_binary(position, format!("missing {} operand", kind)));
      }
    };

  let fragment =
    match kind {

      OperandKind::Id       => Fragment::new(Highlight::Id, format!("%{}", word)),
      OperandKind::ResultId => Fragment::new(Highlight::ResultId, format!("%{}", word)),
      OperandKind::Literal  => Fragment::new(Highlight::Literal, word.to_string()),

      OperandKind::LiteralNumber if opcode == Op::ExtInst => {
        let set =
          state.ext_inst_set.ok_or_else(|| {
            Error::invalid_word(
              position,
              word,
              "extended instruction used before any extended instruction set import"
            )
          })?;
        let name =
          grammar.ext_inst(set, word).ok_or_else(|| {
            Error::invalid_word(position, word, format!("invalid {} instruction '{}'", set, word))
          })?;
        Fragment::new(Highlight::Literal, name)
      }

      OperandKind::LiteralNumber => Fragment::new(Highlight::Literal, word.to_string()),

      OperandKind::LiteralString => {
        let (text, word_count) = decode_string(words, position, endian)?;
        if opcode == Op::ExtInstImport {
          let set =
            grammar.ext_inst_set(&text).ok_or_else(|| {
              Error::invalid_word(
                position,
                word,
                format!("invalid extended instruction set import '{}'", text)
              )
            })?;
          state.ext_inst_set = Some(set);
        }
        return Ok((Fragment::new(Highlight::String, text), word_count));
      }

      OperandKind::Capability
      | OperandKind::SourceLanguage
      | OperandKind::ExecutionModel
      | OperandKind::AddressingModel
      | OperandKind::MemoryModel
      | OperandKind::ExecutionMode
      | OperandKind::StorageClass
      | OperandKind::Dimensionality
      | OperandKind::SamplerAddressingMode
      | OperandKind::SamplerFilterMode
      | OperandKind::ImageFormat
      | OperandKind::ImageOperands
      | OperandKind::FpFastMathMode
      | OperandKind::FpRoundingMode
      | OperandKind::LinkageType
      | OperandKind::AccessQualifier
      | OperandKind::FunctionParameterAttribute
      | OperandKind::Decoration
      | OperandKind::BuiltIn
      | OperandKind::SelectionControl
      | OperandKind::LoopControl
      | OperandKind::FunctionControl
      | OperandKind::MemorySemantics
      | OperandKind::MemoryAccess
      | OperandKind::ExecutionScope
      | OperandKind::GroupOperation
      | OperandKind::KernelEnqueueFlags
      | OperandKind::KernelProfilingInfo => {
        let entry =
          grammar.operand(kind, word).ok_or_else(|| {
            Error::invalid_word(position, word, format!("invalid {} operand '{}'", kind, word))
          })?;
        Fragment::plain(entry.name)
      }

    };

  Ok((fragment, 1))
}

/**
  Reads a nul terminated string starting at `position`, four bytes per word with the first byte
  in the lowest-order bits. Returns the text and the number of words up to and including the
  one holding the terminator.

  The text is the exact byte sequence when it is valid UTF-8. Bytes that are not are each
  replaced by U+FFFD, so such strings do not survive a decode and re-encode unchanged.

  The scan may run past the end of the current instruction; the caller detects that by
  comparing the words consumed against the instruction's word count.
*/
pub(crate) fn decode_string(
  words    : &[Word],
  position : usize,
  endian   : Endianness,
) -> Result<(String, usize)>
{
  let mut bytes: Vec<u8> = Vec::new();

  for (offset, word) in words[position.min(words.len())..].iter().enumerate() {
    for byte in fix_word(*word, endian).to_le_bytes().iter() {
      if *byte == 0 {
        return Ok((String::from_utf8_lossy(&bytes).into_owned(), offset + 1));
      }
      bytes.push(*byte);
    }
  }

  Err(Error::invalid_binary(position, "string operand is not nul terminated"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::bytecode::InstructionWords;
  use crate::grammar::SpirvGrammar;

  fn desc(op: Op) -> &'static OpcodeDesc {
    let grammar: &'static SpirvGrammar = &SpirvGrammar;
    grammar.opcode(op.code()).unwrap()
  }

  /// Resolves the kinds of `operands` in sequence the way the instruction decoder does.
  fn kinds(op: Op, operands: &[Word]) -> Vec<Option<OperandKind>> {
    let grammar: &dyn Grammar = &SpirvGrammar;
    let mut continuation = None;
    operands
      .iter()
      .enumerate()
      .map(|(i, word)| operand_kind(grammar, *word, i + 1, desc(op), &mut continuation))
      .collect()
  }

  #[test]
  fn fixed_positions_then_repeat_last() {
    // OpEntryPoint model %id "name" %interface...
    let resolved = kinds(Op::EntryPoint, &[0, 4, 0, 7, 8, 9]);
    assert_eq!(resolved[0], Some(OperandKind::ExecutionModel));
    assert_eq!(resolved[1], Some(OperandKind::Id));
    assert_eq!(resolved[3], Some(OperandKind::Id));
    assert_eq!(resolved[5], Some(OperandKind::Id));
  }

  #[test]
  fn aligned_memory_access_takes_a_literal() {
    // OpLoad %type %result %pointer Aligned 4
    let resolved = kinds(Op::Load, &[1, 2, 3, 0x2, 4]);
    assert_eq!(resolved[3], Some(OperandKind::MemoryAccess));
    assert_eq!(resolved[4], Some(OperandKind::Literal));
  }

  #[test]
  fn continuation_out_of_range_has_no_kind() {
    // OpDecorate %target SpecId 3 <extra>
    let resolved = kinds(Op::Decorate, &[1, 1, 3, 9]);
    assert_eq!(resolved[2], Some(OperandKind::Literal));
    assert_eq!(resolved[3], None);
  }

  #[test]
  fn switch_reads_pairs() {
    // OpSwitch %selector %default 1 %a 2 %b
    let resolved = kinds(Op::Switch, &[1, 2, 1, 10, 2, 11]);
    assert_eq!(
      resolved,
      vec![
        Some(OperandKind::Id),
        Some(OperandKind::Id),
        Some(OperandKind::Literal),
        Some(OperandKind::Id),
        Some(OperandKind::Literal),
        Some(OperandKind::Id),
      ]
    );
  }

  #[test]
  fn group_member_decorate_reads_pairs() {
    // OpGroupMemberDecorate %group %a 0 %b 2
    let resolved = kinds(Op::GroupMemberDecorate, &[1, 2, 0, 3, 2]);
    assert_eq!(
      resolved,
      vec![
        Some(OperandKind::Id),
        Some(OperandKind::Id),
        Some(OperandKind::Literal),
        Some(OperandKind::Id),
        Some(OperandKind::Literal),
      ]
    );
  }

  #[test]
  fn no_operands_no_kind() {
    assert_eq!(kinds(Op::Nop, &[0]), vec![None]);
  }

  #[test]
  fn strings_of_every_padding() {
    for text in &["", "abc", "main", "hello"] {
      let mut instruction = InstructionWords::new(Op::SourceExtension);
      instruction.encode_string(text).unwrap();
      let words = instruction.finish();
      let (decoded, count) = decode_string(&words, 1, Endianness::host()).unwrap();
      assert_eq!(decoded, *text);
      assert_eq!(count, text.len() / 4 + 1);
      assert_eq!(count, words.len() - 1);
    }
  }

  #[test]
  fn invalid_utf8_is_replaced() {
    let words = [Word::from_le_bytes([b'a', 0xff, b'b', 0])];
    let (decoded, count) = decode_string(&words, 0, Endianness::host()).unwrap();
    assert_eq!(decoded, "a\u{fffd}b");
    assert_eq!(count, 1);
  }

  #[test]
  fn unterminated_string() {
    let words = [Word::from_le_bytes(*b"abcd")];
    let error = decode_string(&words, 0, Endianness::host()).unwrap_err();
    assert_eq!(error.diagnostic().map(|d| d.position), Some(0));
  }

  #[test]
  fn ext_inst_needs_an_import() {
    let mut state = DecodeState::default();
    let words = [31];
    let result =
      decode_operand(
        &SpirvGrammar, Op::ExtInst, OperandKind::LiteralNumber, &words, 0, Endianness::host(),
        &mut state
      );
    assert!(result.is_err());

    state.ext_inst_set = Some(ExtInstSet::GlslStd450);
    let (fragment, count) =
      decode_operand(
        &SpirvGrammar, Op::ExtInst, OperandKind::LiteralNumber, &words, 0, Endianness::host(),
        &mut state
      ).unwrap();
    assert_eq!(fragment.text, "Sqrt");
    assert_eq!(count, 1);
  }

  #[test]
  fn import_selects_the_set() {
    let mut instruction = InstructionWords::new(Op::ExtInstImport);
    instruction.encode_string("OpenCL.std").unwrap();
    let words = instruction.finish();
    let mut state = DecodeState::default();
    let (fragment, _) =
      decode_operand(
        &SpirvGrammar, Op::ExtInstImport, OperandKind::LiteralString, &words, 1,
        Endianness::host(), &mut state
      ).unwrap();
    assert_eq!(fragment.text, "OpenCL.std");
    assert_eq!(fragment.highlight, Some(Highlight::String));
    assert_eq!(state.ext_inst_set, Some(ExtInstSet::OpenClStd));
  }

  #[test]
  fn unknown_enumerant() {
    let mut state = DecodeState::default();
    let error =
      decode_operand(
        &SpirvGrammar, Op::MemoryModel, OperandKind::AddressingModel, &[77], 0,
        Endianness::host(), &mut state
      ).unwrap_err();
    assert_eq!(
      error.diagnostic().map(|d| d.message.as_str()),
      Some("invalid addressing model operand '77'")
    );
  }
}
