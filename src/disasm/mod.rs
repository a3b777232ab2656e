/*!
  Binary to text disassembly.

  A pass recovers the byte order from the magic number, reads the header, then decodes
  instructions from word 5 until the words run out. Each instruction is rendered on its own
  line after a comment block describing the header:

    ; SPIR-V
    ; Version: 65536
    ; Generator: Khronos
    ; Bound: 6
    ; Schema: 0
    OpMemoryModel Logical GLSL450
    %5 = OpIAdd %1 %3 %4

  The first malformed word stops the pass with `Error::InvalidBinary`. `disassemble` then
  returns no text at all, while `Disassembler::write_to` will already have written the lines
  before the failure.

  Passes share nothing but the read-only grammar, so any number may run at once.
*/

mod highlight;
mod instruction;
mod operand;

use std::io::{self, Write as IoWrite};
use std::iter::FusedIterator;

use log::{debug, trace, warn};

use crate::bytecode::{Endianness, Header, Word};
use crate::error::{Error, Result};
use crate::grammar::{Grammar, SpirvGrammar};

use operand::DecodeState;

pub use highlight::{AnsiPalette, Highlight, NoColor, Palette};
pub use instruction::{DecodedInstruction, Fragment};

/// Rendering switches for the convenience entry points.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq)]
pub struct Options {
  /// Decorate output with ANSI color codes.
  pub color: bool,
}

impl Options {
  fn palette(&self) -> &'static dyn Palette {
    match self.color {
      true  => &AnsiPalette,
      false => &NoColor
    }
  }
}

/**
  Iterates over the decoded instructions of a module.

  Yields `Err` for the first malformed instruction, after which it yields nothing.
*/
pub struct InstructionStream<'a> {
  grammar : &'a dyn Grammar,
  words   : &'a [Word],
  endian  : Endianness,
  header  : Header,
  cursor  : usize,
  state   : DecodeState,
  failed  : bool,
}

impl<'a> InstructionStream<'a> {
  /// Checks the magic number and reads the header. Fails when the header is absent or invalid.
  pub fn new(grammar: &'a dyn Grammar, words: &'a [Word]) -> Result<InstructionStream<'a>> {
    let endian = Endianness::detect(words)?;
    let header = Header::read(words, endian)?;

    debug!(
      "module header: version {:#010x}, generator {}, bound {}",
      header.version, header.generator, header.bound
    );
    if header.schema != 0 {
      warn!("module header has reserved schema {}", header.schema);
    }

    Ok(
      InstructionStream {
        grammar,
        words,
        endian,
        header,
        cursor : Header::INSTRUCTION_OFFSET,
        state  : DecodeState::default(),
        failed : false,
      }
    )
  }

  pub fn header(&self) -> &Header {
    &self.header
  }

  pub fn endianness(&self) -> Endianness {
    self.endian
  }

  fn decode_next(&mut self) -> Result<DecodedInstruction> {
    let (instruction, consumed) =
      instruction::decode_instruction(
        self.grammar, self.words, self.cursor, self.endian, &mut self.state
      )?;

    if consumed != instruction.word_count as usize {
      return Err(Error::invalid_binary(
        self.cursor,
        format!(
          "{} word count mismatch: declared {}, operands take {}",
          instruction.opcode.mnemonic(),
          instruction.word_count,
          consumed
        )
      ));
    }

    trace!("{:>6}: {}", self.cursor, instruction);
    self.cursor += consumed;
    Ok(instruction)
  }
}

impl<'a> Iterator for InstructionStream<'a> {
  type Item = Result<DecodedInstruction>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed || self.cursor >= self.words.len() {
      return None;
    }

    let result = self.decode_next();
    if let Err(error) = &result {
      debug!("disassembly stopped: {}", error);
      self.failed = true;
    }
    Some(result)
  }
}

impl<'a> FusedIterator for InstructionStream<'a> {}

/// Renders modules as text with a given grammar and palette.
pub struct Disassembler<'g> {
  grammar : &'g dyn Grammar,
  palette : &'g dyn Palette,
}

impl<'g> Disassembler<'g> {
  pub fn new(grammar: &'g dyn Grammar) -> Disassembler<'g> {
    Disassembler {
      grammar,
      palette: &NoColor
    }
  }

  pub fn with_palette(mut self, palette: &'g dyn Palette) -> Disassembler<'g> {
    self.palette = palette;
    self
  }

  /// Disassembles `words` into a string. On failure no text is returned.
  pub fn disassemble(&self, words: &[Word]) -> Result<String> {
    let mut text = String::new();
    self.run(words, |line| {
      text.push_str(line);
      Ok(())
    })?;
    Ok(text)
  }

  /// Writes the disassembly of `words` to `out` line by line as it is decoded.
  pub fn write_to<W: IoWrite>(&self, words: &[Word], out: &mut W) -> Result<()> {
    self.run(words, |line| out.write_all(line.as_bytes()).map_err(Error::from))?;
    out.flush()?;
    Ok(())
  }

  fn run<F>(&self, words: &[Word], mut emit: F) -> Result<()>
    where F: FnMut(&str) -> Result<()>
  {
    let stream = InstructionStream::new(self.grammar, words)?;
    emit(&self.header_comment(stream.header()))?;

    let mut line = String::new();
    for instruction in stream {
      line.clear();
      instruction?.write_to(self.palette, &mut line).map_err(format_error)?;
      line.push('\n');
      emit(&line)?;
    }
    Ok(())
  }

  fn header_comment(&self, header: &Header) -> String {
    let (start, end) = self.palette.markers(Highlight::Comment);
    format!(
      "{}; SPIR-V\n; Version: {}\n; Generator: {}\n; Bound: {}\n; Schema: {}\n{}",
      start,
      header.version,
      self.grammar.generator(header.generator),
      header.bound,
      header.schema,
      end
    )
  }
}

// Writing into a `String` only fails if a `Display` impl does.
fn format_error(_: std::fmt::Error) -> Error {
  Error::Io(io::Error::new(io::ErrorKind::Other, "formatting failed"))
}

/// Disassembles `words` with the built-in SPIR-V grammar.
pub fn disassemble(words: &[Word], options: Options) -> Result<String> {
  Disassembler::new(&SpirvGrammar)
    .with_palette(options.palette())
    .disassemble(words)
}

/// Writes the disassembly of `words` to standard output with the built-in SPIR-V grammar.
pub fn print(words: &[Word], options: Options) -> Result<()> {
  let stdout = io::stdout();
  let mut out = stdout.lock();
  Disassembler::new(&SpirvGrammar)
    .with_palette(options.palette())
    .write_to(words, &mut out)
}

/// The instructions of `words` decoded with the built-in SPIR-V grammar.
pub fn instructions(words: &[Word]) -> Result<InstructionStream<'_>> {
  InstructionStream::new(&SpirvGrammar, words)
}
