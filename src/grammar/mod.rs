/*!
  The tables the decoder consults: what operands each opcode takes, the symbolic names of
  enumerated operand values, the instructions of each extended instruction set, and the names
  of known generators.

  The decoder only sees these through the `Grammar` trait. `SpirvGrammar` answers from
  built-in SPIR-V 1.0 tables which are built once and shared read-only by every decode pass.
*/

mod ext_inst;
mod generator;
mod opcodes;
mod operands;

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

use crate::bytecode::{Op, Word};

pub use ext_inst::ext_inst_index;

/**
  The semantic category of an operand, which decides how its word or words are decoded.

  Everything from `Capability` on is an enumerated operand: a single word whose value is
  looked up among the enumerants of that category.
*/
#[derive(StrumDisplay, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum OperandKind {
  #[strum(to_string = "id")]                           Id,
  #[strum(to_string = "result id")]                    ResultId,
  #[strum(to_string = "literal")]                      Literal,
  /// A literal that names an extended instruction when it belongs to `OpExtInst`.
  #[strum(to_string = "literal number")]               LiteralNumber,
  #[strum(to_string = "literal string")]               LiteralString,
  #[strum(to_string = "capability")]                   Capability,
  #[strum(to_string = "source language")]              SourceLanguage,
  #[strum(to_string = "execution model")]              ExecutionModel,
  #[strum(to_string = "addressing model")]             AddressingModel,
  #[strum(to_string = "memory model")]                 MemoryModel,
  #[strum(to_string = "execution mode")]               ExecutionMode,
  #[strum(to_string = "storage class")]                StorageClass,
  #[strum(to_string = "dimensionality")]               Dimensionality,
  #[strum(to_string = "sampler addressing mode")]      SamplerAddressingMode,
  #[strum(to_string = "sampler filter mode")]          SamplerFilterMode,
  #[strum(to_string = "image format")]                 ImageFormat,
  #[strum(to_string = "image operands")]               ImageOperands,
  #[strum(to_string = "floating-point fast math mode")] FpFastMathMode,
  #[strum(to_string = "floating-point rounding mode")] FpRoundingMode,
  #[strum(to_string = "linkage type")]                 LinkageType,
  #[strum(to_string = "access qualifier")]             AccessQualifier,
  #[strum(to_string = "function parameter attribute")] FunctionParameterAttribute,
  #[strum(to_string = "decoration")]                   Decoration,
  #[strum(to_string = "built-in")]                     BuiltIn,
  #[strum(to_string = "selection control")]            SelectionControl,
  #[strum(to_string = "loop control")]                 LoopControl,
  #[strum(to_string = "function control")]             FunctionControl,
  #[strum(to_string = "memory semantics")]             MemorySemantics,
  #[strum(to_string = "memory access")]                MemoryAccess,
  #[strum(to_string = "execution scope")]              ExecutionScope,
  #[strum(to_string = "group operation")]              GroupOperation,
  #[strum(to_string = "kernel enqueue flags")]         KernelEnqueueFlags,
  #[strum(to_string = "kernel profiling info")]        KernelProfilingInfo,
}

/// Describes the operands of one opcode.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct OpcodeDesc {
  pub opcode         : Op,
  /// The smallest legal word count, opcode word included.
  pub min_word_count : u16,
  /// Kinds of the operands at fixed positions. Trailing entries past `min_word_count - 1` are
  /// optional, and the last kind repeats for variable length operand lists.
  pub operands       : &'static [OperandKind],
}

impl OpcodeDesc {
  /// Position of the result id among the operands, if the instruction produces one.
  pub fn result_id_index(&self) -> Option<usize> {
    self.operands.iter().position(|kind| *kind == OperandKind::ResultId)
  }
}

/// One enumerant of an enumerated operand kind.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct OperandDesc {
  pub value    : Word,
  pub name     : &'static str,
  /// Kinds of the operands that follow when this value is present, e.g. the alignment literal
  /// after the `Aligned` memory access.
  pub operands : &'static [OperandKind],
}

/// Extended instruction sets an `OpExtInstImport` may name.
#[derive(StrumDisplay, EnumString, EnumIter, Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum ExtInstSet {
  #[strum(to_string = "GLSL.std.450")] GlslStd450,
  #[strum(to_string = "OpenCL.std")]   OpenClStd,
}

/// Lookups the decoder needs from the instruction grammar.
pub trait Grammar {
  fn opcode(&self, opcode: u16) -> Option<&OpcodeDesc>;

  /// The enumerant of `kind` with the given value. Kinds that are not enumerated have none.
  fn operand(&self, kind: OperandKind, value: Word) -> Option<&OperandDesc>;

  /// The extended instruction set imported under `name`.
  fn ext_inst_set(&self, name: &str) -> Option<ExtInstSet>;

  /// Name of instruction `index` of an extended instruction set.
  fn ext_inst(&self, set: ExtInstSet, index: Word) -> Option<&str>;

  /// Human readable name of the tool that produced a module.
  fn generator(&self, generator: Word) -> &str;
}

/// The SPIR-V 1.0 core grammar with the GLSL.std.450 and OpenCL.std instruction sets.
#[derive(Clone, Copy, Default, Debug)]
pub struct SpirvGrammar;

impl Grammar for SpirvGrammar {
  fn opcode(&self, opcode: u16) -> Option<&OpcodeDesc> {
    opcodes::lookup(opcode)
  }

  fn operand(&self, kind: OperandKind, value: Word) -> Option<&OperandDesc> {
    operands::lookup(kind, value)
  }

  fn ext_inst_set(&self, name: &str) -> Option<ExtInstSet> {
    name.parse::<ExtInstSet>().ok()
  }

  fn ext_inst(&self, set: ExtInstSet, index: Word) -> Option<&str> {
    ext_inst::ext_inst_name(set, index)
  }

  fn generator(&self, generator: Word) -> &str {
    generator::generator_name(generator)
  }
}
