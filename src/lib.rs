/*!
  A SPIR-V binary decoder and disassembler.

  `disasm` turns a module, given as a slice of 32 bit words in either byte order, into its
  textual form. `bytecode` has the word level primitives of the format, including the
  encoding side used to build instructions, and `grammar` has the tables that describe each
  opcode's operands.

  ```ignore
  let words = spirv_dis::bytecode::words_from_bytes(&std::fs::read("shader.spv")?)?;
  print!("{}", spirv_dis::disassemble(&words, spirv_dis::Options::default())?);
  ```
*/

pub mod bytecode;
pub mod disasm;
pub mod grammar;
mod error;

pub use disasm::{disassemble, print, DecodedInstruction, Disassembler, InstructionStream, Options};
pub use error::{Diagnostic, Error, Result};
