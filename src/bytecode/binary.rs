/*!
  This module is responsible for the word level layout of a module: the byte order of the
  stream, the five word header, and the packed first word of every instruction.

  Words are loaded in host order and corrected lazily with `fix_word`, so the same buffer can
  be inspected before and after the byte order is known.
*/

use log::debug;

use crate::error::{Error, Result};

// If you change this you must also change `split_opcode_word` and `pack_opcode_word`.
pub type Word = u32;
pub type DoubleWord = u64;
// Convenience for decomposing a DoubleWord into a high word and a low word:
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct TwoWords {
  pub low: Word,
  pub high: Word
}

impl From<DoubleWord> for TwoWords {
  fn from(value: DoubleWord) -> TwoWords {
    TwoWords {
      low  : (value & 0xFFFF_FFFF) as Word,
      high : (value >> 32) as Word
    }
  }
}

impl From<TwoWords> for DoubleWord {
  fn from(words: TwoWords) -> DoubleWord {
    (words.low as DoubleWord) | ((words.high as DoubleWord) << 32)
  }
}

pub const MAGIC_NUMBER      : Word = 0x0723_0203;
pub const VERSION_NUMBER    : Word = 0x0001_0000;
pub const GENERATOR_KHRONOS : Word = 0;

pub const HEADER_WORD_COUNT          : usize = 5;
/// The word count shares the first instruction word with the opcode and has 16 bits.
pub const INSTRUCTION_WORD_COUNT_MAX : usize = 0xFFFF;

const INDEX_MAGIC_NUMBER     : usize = 0;
const INDEX_VERSION_NUMBER   : usize = 1;
const INDEX_GENERATOR_NUMBER : usize = 2;
const INDEX_BOUND            : usize = 3;
const INDEX_SCHEMA           : usize = 4;

/// Byte order of a word stream.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum Endianness {
  Little,
  Big
}

impl Endianness {
  pub fn host() -> Endianness {
    if cfg!(target_endian = "little") {
      Endianness::Little
    } else {
      Endianness::Big
    }
  }

  /**
    Determines the byte order of the stream from the raw bytes of its first word, which must
    hold the magic number in one order or the other.
  */
  pub fn detect(words: &[Word]) -> Result<Endianness> {
    let first = match words.first() {
      Some(word) => *word,
      None       => return Err(Error::invalid_binary(0, "empty binary"))
    };

    let endian =
      match first.to_ne_bytes() {
        [0x03, 0x02, 0x23, 0x07] => Endianness::Little,
        [0x07, 0x23, 0x02, 0x03] => Endianness::Big,
        _ => {
          return Err(Error::invalid_word(
            INDEX_MAGIC_NUMBER,
            first,
            format!("invalid SPIR-V magic number '{:x}'", first)
          ));
        }
      };
    debug!("stream is {:?} endian, host is {:?} endian", endian, Endianness::host());
    Ok(endian)
  }
}

/// Converts a word read from a stream of the given byte order into host order. Applying it
/// twice gives back the original word.
#[inline]
pub fn fix_word(word: Word, endian: Endianness) -> Word {
  match endian == Endianness::host() {
    true  => word,
    false => word.swap_bytes()
  }
}

/// Reinterprets bytes as host order words. The byte order of the stream is resolved later by
/// `Endianness::detect`.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<Word>> {
  if bytes.len() % 4 != 0 {
    return Err(Error::invalid_binary(
      bytes.len() / 4,
      format!("binary length of {} bytes is not a whole number of words", bytes.len())
    ));
  }

  Ok(
    bytes
      .chunks_exact(4)
      .map(|chunk| Word::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
      .collect()
  )
}

/// Splits an (endian corrected) first instruction word into `(word_count, opcode)`.
#[inline]
pub fn split_opcode_word(word: Word) -> (u16, u16) {
  ((word >> 16) as u16, (word & 0xFFFF) as u16)
}

/// The inverse of `split_opcode_word`.
#[inline]
pub fn pack_opcode_word(word_count: u16, opcode: u16) -> Word {
  ((word_count as Word) << 16) | opcode as Word
}

/// The fixed preamble of every module.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Header {
  pub magic     : Word,
  pub version   : Word,
  pub generator : Word,
  /// Every id in the module is less than the bound.
  pub bound     : Word,
  /// Reserved, zero.
  pub schema    : Word,
}

impl Header {
  /// Word offset of the first instruction.
  pub const INSTRUCTION_OFFSET: usize = HEADER_WORD_COUNT;

  /// Reads the header fields, corrected for `endian`.
  pub fn read(words: &[Word], endian: Endianness) -> Result<Header> {
    if words.len() < HEADER_WORD_COUNT {
      return Err(Error::invalid_binary(
        words.len(),
        format!("invalid SPIR-V header: {} of {} words present", words.len(), HEADER_WORD_COUNT)
      ));
    }

    let header = Header {
      magic     : fix_word(words[INDEX_MAGIC_NUMBER], endian),
      version   : fix_word(words[INDEX_VERSION_NUMBER], endian),
      generator : fix_word(words[INDEX_GENERATOR_NUMBER], endian),
      bound     : fix_word(words[INDEX_BOUND], endian),
      schema    : fix_word(words[INDEX_SCHEMA], endian),
    };
    Ok(header)
  }
}

/**
  Writes a host order header for a module whose ids are all below `bound` into the first
  five words of `words`.
*/
pub fn write_header(words: &mut [Word], bound: Word) -> Result<()> {
  if words.len() < HEADER_WORD_COUNT {
    return Err(Error::invalid_binary(
      0,
      format!("header needs {} words but the buffer holds {}", HEADER_WORD_COUNT, words.len())
    ));
  }

  words[INDEX_MAGIC_NUMBER]     = MAGIC_NUMBER;
  words[INDEX_VERSION_NUMBER]   = VERSION_NUMBER;
  words[INDEX_GENERATOR_NUMBER] = GENERATOR_KHRONOS;
  words[INDEX_BOUND]            = bound;
  words[INDEX_SCHEMA]           = 0;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn swapped(endian: Endianness) -> Endianness {
    match endian {
      Endianness::Little => Endianness::Big,
      Endianness::Big    => Endianness::Little
    }
  }

  #[test]
  fn detects_both_byte_orders() {
    let native = [MAGIC_NUMBER];
    assert_eq!(Endianness::detect(&native).unwrap(), Endianness::host());

    let reversed = [MAGIC_NUMBER.swap_bytes()];
    assert_eq!(Endianness::detect(&reversed).unwrap(), swapped(Endianness::host()));

    let little = [Word::from_ne_bytes([0x03, 0x02, 0x23, 0x07])];
    assert_eq!(Endianness::detect(&little).unwrap(), Endianness::Little);
    let big = [Word::from_ne_bytes([0x07, 0x23, 0x02, 0x03])];
    assert_eq!(Endianness::detect(&big).unwrap(), Endianness::Big);
  }

  #[test]
  fn rejects_unknown_magic_and_empty_stream() {
    for &word in &[0xdead_beef, 0x0723_0204, 0x0203_2307, 0] {
      assert!(matches!(Endianness::detect(&[word]), Err(Error::InvalidBinary(_))), "{:#x}", word);
    }
    assert!(matches!(Endianness::detect(&[]), Err(Error::InvalidBinary(_))));
  }

  #[test]
  fn fix_word_is_an_involution() {
    for &word in &[0u32, 1, 0x0723_0203, 0xdead_beef, Word::max_value()] {
      for &endian in &[Endianness::Little, Endianness::Big] {
        assert_eq!(fix_word(fix_word(word, endian), endian), word);
      }
    }
    assert_eq!(fix_word(0x1122_3344, Endianness::host()), 0x1122_3344);
    assert_eq!(fix_word(0x1122_3344, swapped(Endianness::host())), 0x4433_2211);
  }

  #[test]
  fn header_round_trip() {
    let mut words = vec![0; HEADER_WORD_COUNT];
    write_header(&mut words, 42).unwrap();

    let endian = Endianness::detect(&words).unwrap();
    let header = Header::read(&words, endian).unwrap();
    assert_eq!(
      header,
      Header {
        magic     : MAGIC_NUMBER,
        version   : VERSION_NUMBER,
        generator : GENERATOR_KHRONOS,
        bound     : 42,
        schema    : 0
      }
    );

    let reversed: Vec<Word> = words.iter().map(|w| w.swap_bytes()).collect();
    let endian = Endianness::detect(&reversed).unwrap();
    assert_eq!(Header::read(&reversed, endian).unwrap(), header);
  }

  #[test]
  fn truncated_header_is_invalid() {
    let words = [MAGIC_NUMBER, VERSION_NUMBER, 0];
    assert!(matches!(
      Header::read(&words, Endianness::host()),
      Err(Error::InvalidBinary(_))
    ));
  }

  #[test]
  fn header_writer_needs_room() {
    let mut empty: [Word; 0] = [];
    assert!(matches!(write_header(&mut empty, 1), Err(Error::InvalidBinary(_))));
  }

  #[test]
  fn opcode_word_packing() {
    let word = pack_opcode_word(3, 5);
    assert_eq!(word, 0x0003_0005);
    assert_eq!(split_opcode_word(word), (3, 5));
  }

  #[test]
  fn double_word_halves() {
    let words = TwoWords::from(0x0123_4567_89ab_cdef_u64);
    assert_eq!(words.low, 0x89ab_cdef);
    assert_eq!(words.high, 0x0123_4567);
    assert_eq!(DoubleWord::from(words), 0x0123_4567_89ab_cdef);
  }

  #[test]
  fn loads_words_from_bytes() {
    let bytes = MAGIC_NUMBER.to_ne_bytes();
    assert_eq!(words_from_bytes(&bytes).unwrap(), vec![MAGIC_NUMBER]);
    assert!(matches!(words_from_bytes(&bytes[..3]), Err(Error::InvalidBinary(_))));
  }
}
