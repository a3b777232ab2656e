/*!
  Parses a textual dump of words, the form in which binaries are often pasted into bug
  reports and test fixtures:

  ```text
  0x07230203 0x00010000 0x00000000
  0x00000005, 0x00000000
  ```

  Words are hexadecimal with an optional `0x` prefix, separated by whitespace and/or commas.
  Words are taken in stream order, so the magic number decides the byte order as it does for
  a binary file.
*/

use nom::{
  branch::alt,
  bytes::complete::tag,
  character::complete::{char as one_char, hex_digit1, multispace0, multispace1},
  combinator::{all_consuming, map, map_res, opt},
  multi::{many0, separated_list},
  sequence::{delimited, preceded, tuple},
  IResult
};

use crate::bytecode::Word;
use crate::error::{Error, Result};

fn hex_word(input: &str) -> IResult<&str, Word> {
  map_res(
    preceded(opt(alt((tag("0x"), tag("0X")))), hex_digit1),
    |digits: &str| Word::from_str_radix(digits, 16)
  )(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
  alt((
    map(tuple((multispace0, one_char(','), multispace0)), |_| ()),
    map(multispace1, |_| ())
  ))(input)
}

/// Parses a whitespace or comma separated list of hexadecimal words.
pub fn parse_word_dump(text: &str) -> Result<Vec<Word>> {
  let words_p = delimited(
    multispace0,
    separated_list(separator, hex_word),
    tuple((opt(one_char(',')), multispace0))
  );

  match all_consuming(words_p)(text) {
    Ok((_rest, words)) => Ok(words),
    Err(_e)            => {
      // Report the first token that is not a word.
      let offending =
        many0(preceded(opt(separator), hex_word))(text)
          .map(|(rest, _)| rest.trim_start_matches(|c: char| c == ',' || c.is_whitespace()))
          .unwrap_or(text);
      let token = offending.split_whitespace().next().unwrap_or(offending);
      Err(Error::InvalidText(format!("'{}' is not a hexadecimal word", token)))
    }
  }
}
