/*!

  A SPIR-V module is a stream of 32 bit words. The first five words are the header:

    Word 0:  magic number 0x07230203
    Word 1:  version
    Word 2:  generator id
    Word 3:  bound, every id in the module is less than the bound
    Word 4:  schema, reserved and zero

  Instructions follow from word 5 onward. The first word of every instruction packs the
  instruction's total word count (itself included) into the high 16 bits and the opcode into
  the low 16 bits. Operands fill the remaining words: ids and most literals take one word,
  strings are nul terminated and packed four bytes to a word.

  The producer of a module may have written it in either byte order. Words are therefore kept
  as they were loaded and passed through `fix_word` with the byte order recovered from the
  magic number whenever their value is needed.

*/

mod binary;
mod hexdump;
mod instruction;

pub use binary::{
  fix_word, pack_opcode_word, split_opcode_word, words_from_bytes, write_header, DoubleWord,
  Endianness, Header, TwoWords, Word, GENERATOR_KHRONOS, HEADER_WORD_COUNT,
  INSTRUCTION_WORD_COUNT_MAX, MAGIC_NUMBER, VERSION_NUMBER
};
pub use hexdump::parse_word_dump;
pub use instruction::{InstructionWords, Op};
