use strum_macros::{Display as StrumDisplay, EnumString};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::binary::{pack_opcode_word, DoubleWord, TwoWords, Word, INSTRUCTION_WORD_COUNT_MAX};
use crate::error::{Error, Result};

/**
  Opcodes of the SPIR-V 1.0 core grammar.

  The `Display` form is the mnemonic without its `Op` prefix, so `Op::TypeInt` displays as
  `TypeInt` and `Op::from_str("TypeInt")` gives it back. Discriminants are the opcode values of
  the binary format; the gaps between them are values SPIR-V 1.0 leaves unassigned.
*/
#[derive(
  StrumDisplay, EnumString, TryFromPrimitive, IntoPrimitive,
  Clone,        Copy,       Eq, PartialEq,     Debug,         Hash
)]
#[repr(u16)]
pub enum Op {
  // Miscellaneous and debug
  Nop                      = 0,
  Undef                    = 1,
  SourceContinued          = 2,
  Source                   = 3,
  SourceExtension          = 4,
  Name                     = 5,
  MemberName               = 6,
  String                   = 7,
  Line                     = 8,
  Extension                = 10,
  ExtInstImport            = 11,
  ExtInst                  = 12,
  MemoryModel              = 14,
  EntryPoint               = 15,
  ExecutionMode            = 16,
  Capability               = 17,

  // Types
  TypeVoid                 = 19,
  TypeBool                 = 20,
  TypeInt                  = 21,
  TypeFloat                = 22,
  TypeVector               = 23,
  TypeMatrix               = 24,
  TypeImage                = 25,
  TypeSampler              = 26,
  TypeSampledImage         = 27,
  TypeArray                = 28,
  TypeRuntimeArray         = 29,
  TypeStruct               = 30,
  TypeOpaque               = 31,
  TypePointer              = 32,
  TypeFunction             = 33,
  TypeEvent                = 34,
  TypeDeviceEvent          = 35,
  TypeReserveId            = 36,
  TypeQueue                = 37,
  TypePipe                 = 38,
  TypeForwardPointer       = 39,

  // Constants
  ConstantTrue             = 41,
  ConstantFalse            = 42,
  Constant                 = 43,
  ConstantComposite        = 44,
  ConstantSampler          = 45,
  ConstantNull             = 46,
  SpecConstantTrue         = 48,
  SpecConstantFalse        = 49,
  SpecConstant             = 50,
  SpecConstantComposite    = 51,
  SpecConstantOp           = 52,

  // Functions
  Function                 = 54,
  FunctionParameter        = 55,
  FunctionEnd              = 56,
  FunctionCall             = 57,

  // Memory
  Variable                 = 59,
  ImageTexelPointer        = 60,
  Load                     = 61,
  Store                    = 62,
  CopyMemory               = 63,
  CopyMemorySized          = 64,
  AccessChain              = 65,
  InBoundsAccessChain      = 66,
  PtrAccessChain           = 67,
  ArrayLength              = 68,
  GenericPtrMemSemantics   = 69,
  InBoundsPtrAccessChain   = 70,

  // Annotations
  Decorate                 = 71,
  MemberDecorate           = 72,
  DecorationGroup          = 73,
  GroupDecorate            = 74,
  GroupMemberDecorate      = 75,

  // Composites
  VectorExtractDynamic     = 77,
  VectorInsertDynamic      = 78,
  VectorShuffle            = 79,
  CompositeConstruct       = 80,
  CompositeExtract         = 81,
  CompositeInsert          = 82,
  CopyObject               = 83,
  Transpose                = 84,

  // Images
  SampledImage             = 86,
  ImageSampleImplicitLod   = 87,
  ImageSampleExplicitLod   = 88,
  ImageSampleDrefImplicitLod = 89,
  ImageSampleDrefExplicitLod = 90,
  ImageSampleProjImplicitLod = 91,
  ImageSampleProjExplicitLod = 92,
  ImageSampleProjDrefImplicitLod = 93,
  ImageSampleProjDrefExplicitLod = 94,
  ImageFetch               = 95,
  ImageGather              = 96,
  ImageDrefGather          = 97,
  ImageRead                = 98,
  ImageWrite               = 99,
  Image                    = 100,
  ImageQueryFormat         = 101,
  ImageQueryOrder          = 102,
  ImageQuerySizeLod        = 103,
  ImageQuerySize           = 104,
  ImageQueryLod            = 105,
  ImageQueryLevels         = 106,
  ImageQuerySamples        = 107,

  // Conversions
  ConvertFToU              = 109,
  ConvertFToS              = 110,
  ConvertSToF              = 111,
  ConvertUToF              = 112,
  UConvert                 = 113,
  SConvert                 = 114,
  FConvert                 = 115,
  QuantizeToF16            = 116,
  ConvertPtrToU            = 117,
  SatConvertSToU           = 118,
  SatConvertUToS           = 119,
  ConvertUToPtr            = 120,
  PtrCastToGeneric         = 121,
  GenericCastToPtr         = 122,
  GenericCastToPtrExplicit = 123,
  Bitcast                  = 124,

  // Arithmetic
  SNegate                  = 126,
  FNegate                  = 127,
  IAdd                     = 128,
  FAdd                     = 129,
  ISub                     = 130,
  FSub                     = 131,
  IMul                     = 132,
  FMul                     = 133,
  UDiv                     = 134,
  SDiv                     = 135,
  FDiv                     = 136,
  UMod                     = 137,
  SRem                     = 138,
  SMod                     = 139,
  FRem                     = 140,
  FMod                     = 141,
  VectorTimesScalar        = 142,
  MatrixTimesScalar        = 143,
  VectorTimesMatrix        = 144,
  MatrixTimesVector        = 145,
  MatrixTimesMatrix        = 146,
  OuterProduct             = 147,
  Dot                      = 148,
  IAddCarry                = 149,
  ISubBorrow               = 150,
  UMulExtended             = 151,
  SMulExtended             = 152,

  // Relational and logical
  Any                      = 154,
  All                      = 155,
  IsNan                    = 156,
  IsInf                    = 157,
  IsFinite                 = 158,
  IsNormal                 = 159,
  SignBitSet               = 160,
  LessOrGreater            = 161,
  Ordered                  = 162,
  Unordered                = 163,
  LogicalEqual             = 164,
  LogicalNotEqual          = 165,
  LogicalOr                = 166,
  LogicalAnd               = 167,
  LogicalNot               = 168,
  Select                   = 169,
  IEqual                   = 170,
  INotEqual                = 171,
  UGreaterThan             = 172,
  SGreaterThan             = 173,
  UGreaterThanEqual        = 174,
  SGreaterThanEqual        = 175,
  ULessThan                = 176,
  SLessThan                = 177,
  ULessThanEqual           = 178,
  SLessThanEqual           = 179,
  FOrdEqual                = 180,
  FUnordEqual              = 181,
  FOrdNotEqual             = 182,
  FUnordNotEqual           = 183,
  FOrdLessThan             = 184,
  FUnordLessThan           = 185,
  FOrdGreaterThan          = 186,
  FUnordGreaterThan        = 187,
  FOrdLessThanEqual        = 188,
  FUnordLessThanEqual      = 189,
  FOrdGreaterThanEqual     = 190,
  FUnordGreaterThanEqual   = 191,

  // Bit
  ShiftRightLogical        = 194,
  ShiftRightArithmetic     = 195,
  ShiftLeftLogical         = 196,
  BitwiseOr                = 197,
  BitwiseXor               = 198,
  BitwiseAnd               = 199,
  Not                      = 200,
  BitFieldInsert           = 201,
  BitFieldSExtract         = 202,
  BitFieldUExtract         = 203,
  BitReverse               = 204,
  BitCount                 = 205,

  // Derivatives
  DPdx                     = 207,
  DPdy                     = 208,
  Fwidth                   = 209,
  DPdxFine                 = 210,
  DPdyFine                 = 211,
  FwidthFine               = 212,
  DPdxCoarse               = 213,
  DPdyCoarse               = 214,
  FwidthCoarse             = 215,

  // Primitives
  EmitVertex               = 218,
  EndPrimitive             = 219,
  EmitStreamVertex         = 220,
  EndStreamPrimitive       = 221,

  // Barriers and atomics
  ControlBarrier           = 224,
  MemoryBarrier            = 225,
  AtomicLoad               = 227,
  AtomicStore              = 228,
  AtomicExchange           = 229,
  AtomicCompareExchange    = 230,
  AtomicCompareExchangeWeak = 231,
  AtomicIIncrement         = 232,
  AtomicIDecrement         = 233,
  AtomicIAdd               = 234,
  AtomicISub               = 235,
  AtomicSMin               = 236,
  AtomicUMin               = 237,
  AtomicSMax               = 238,
  AtomicUMax               = 239,
  AtomicAnd                = 240,
  AtomicOr                 = 241,
  AtomicXor                = 242,

  // Control flow
  Phi                      = 245,
  LoopMerge                = 246,
  SelectionMerge           = 247,
  Label                    = 248,
  Branch                   = 249,
  BranchConditional        = 250,
  Switch                   = 251,
  Kill                     = 252,
  Return                   = 253,
  ReturnValue              = 254,
  Unreachable              = 255,
  LifetimeStart            = 256,
  LifetimeStop             = 257,

  // Groups
  GroupAsyncCopy           = 259,
  GroupWaitEvents          = 260,
  GroupAll                 = 261,
  GroupAny                 = 262,
  GroupBroadcast           = 263,
  GroupIAdd                = 264,
  GroupFAdd                = 265,
  GroupFMin                = 266,
  GroupUMin                = 267,
  GroupSMin                = 268,
  GroupFMax                = 269,
  GroupUMax                = 270,
  GroupSMax                = 271,

  // Pipes
  ReadPipe                 = 274,
  WritePipe                = 275,
  ReservedReadPipe         = 276,
  ReservedWritePipe        = 277,
  ReserveReadPipePackets   = 278,
  ReserveWritePipePackets  = 279,
  CommitReadPipe           = 280,
  CommitWritePipe          = 281,
  IsValidReserveId         = 282,
  GetNumPipePackets        = 283,
  GetMaxPipePackets        = 284,
  GroupReserveReadPipePackets = 285,
  GroupReserveWritePipePackets = 286,
  GroupCommitReadPipe      = 287,
  GroupCommitWritePipe     = 288,

  // Device side enqueue
  EnqueueMarker            = 291,
  EnqueueKernel            = 292,
  GetKernelNDrangeSubGroupCount = 293,
  GetKernelNDrangeMaxSubGroupSize = 294,
  GetKernelWorkGroupSize   = 295,
  GetKernelPreferredWorkGroupSizeMultiple = 296,
  RetainEvent              = 297,
  ReleaseEvent             = 298,
  CreateUserEvent          = 299,
  IsValidEvent             = 300,
  SetUserEventStatus       = 301,
  CaptureEventProfilingInfo = 302,
  GetDefaultQueue          = 303,
  BuildNDRange             = 304,

  // Sparse images
  ImageSparseSampleImplicitLod = 305,
  ImageSparseSampleExplicitLod = 306,
  ImageSparseSampleDrefImplicitLod = 307,
  ImageSparseSampleDrefExplicitLod = 308,
  ImageSparseSampleProjImplicitLod = 309,
  ImageSparseSampleProjExplicitLod = 310,
  ImageSparseSampleProjDrefImplicitLod = 311,
  ImageSparseSampleProjDrefExplicitLod = 312,
  ImageSparseFetch         = 313,
  ImageSparseGather        = 314,
  ImageSparseDrefGather    = 315,
  ImageSparseTexelsResident = 316,

  NoLine                   = 317,
  AtomicFlagTestAndSet     = 318,
  AtomicFlagClear          = 319,
  ImageSparseRead          = 320,
}

impl Op {
  pub fn code(&self) -> u16 {
    Into::<u16>::into(*self)
  }

  /// The textual form, `Op` followed by the opcode name.
  pub fn mnemonic(&self) -> String {
    format!("Op{}", self)
  }
}

/**
  Growable word buffer for a single instruction on the encode path.

  The first word is reserved for the packed `(word_count, opcode)` pair and filled in by
  `finish`. Every append checks that the instruction stays within
  `INSTRUCTION_WORD_COUNT_MAX` words.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct InstructionWords {
  opcode : Op,
  words  : Vec<Word>,
}

impl InstructionWords {
  pub fn new(opcode: Op) -> InstructionWords {
    InstructionWords {
      opcode,
      words: vec![0]
    }
  }

  pub fn opcode(&self) -> Op {
    self.opcode
  }

  /// Words used so far, including the opcode word.
  pub fn word_count(&self) -> usize {
    self.words.len()
  }

  fn reserve(&mut self, additional: usize) -> Result<()> {
    if self.words.len() + additional > INSTRUCTION_WORD_COUNT_MAX {
      return Err(Error::limit_exceeded());
    }
    Ok(())
  }

  pub fn encode_u32(&mut self, value: Word) -> Result<()> {
    self.reserve(1)?;
    self.words.push(value);
    Ok(())
  }

  /// Appends the low word, then the high word.
  pub fn encode_u64(&mut self, value: DoubleWord) -> Result<()> {
    self.reserve(2)?;
    let TwoWords { low, high } = TwoWords::from(value);
    self.words.push(low);
    self.words.push(high);
    Ok(())
  }

  /**
    Appends the bytes of `value` and a nul terminator, four bytes per word with the first byte
    in the lowest-order bits, zero padding the last word. Uses `value.len() / 4 + 1` words.
    A `value` with an interior nul decodes as the text before it.
  */
  pub fn encode_string(&mut self, value: &str) -> Result<()> {
    let bytes      = value.as_bytes();
    let word_count = bytes.len() / 4 + 1;
    self.reserve(word_count)?;

    let mut padded = bytes.to_vec();
    padded.resize(word_count * 4, 0);
    self.words.extend(
      padded
        .chunks_exact(4)
        .map(|chunk| Word::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    );
    Ok(())
  }

  /// Fills in the opcode word and returns the encoded instruction.
  pub fn finish(mut self) -> Vec<Word> {
    // `reserve` keeps the length within 16 bits.
    self.words[0] = pack_opcode_word(self.words.len() as u16, self.opcode.code());
    self.words
  }
}

#[cfg(test)]
mod tests {
  use std::convert::TryFrom;
  use std::str::FromStr;

  use super::*;

  #[test]
  fn opcode_names_and_values() {
    assert_eq!(Op::Name.code(), 5);
    assert_eq!(Op::Name.mnemonic(), "OpName");
    assert_eq!(Op::try_from(128u16).unwrap(), Op::IAdd);
    assert!(Op::try_from(9u16).is_err());
    assert_eq!(Op::from_str("ExtInstImport").unwrap(), Op::ExtInstImport);
  }

  #[test]
  fn finish_packs_word_count_and_opcode() {
    let mut instruction = InstructionWords::new(Op::TypeInt);
    instruction.encode_u32(1).unwrap();
    instruction.encode_u32(32).unwrap();
    instruction.encode_u32(0).unwrap();
    assert_eq!(instruction.finish(), vec![0x0004_0015, 1, 32, 0]);
  }

  #[test]
  fn u64_is_low_word_first() {
    let mut instruction = InstructionWords::new(Op::Constant);
    instruction.encode_u64(0x0000_0002_0000_0001).unwrap();
    assert_eq!(instruction.word_count(), 3);
    assert_eq!(&instruction.finish()[1..], &[1, 2]);
  }

  #[test]
  fn string_word_counts() {
    for &(text, words) in &[("", 1), ("abc", 1), ("abcd", 2), ("abcde", 2), ("main", 2)] {
      let mut instruction = InstructionWords::new(Op::Name);
      instruction.encode_string(text).unwrap();
      assert_eq!(instruction.word_count() - 1, words, "{:?}", text);
    }
  }

  #[test]
  fn string_packs_first_byte_lowest() {
    let mut instruction = InstructionWords::new(Op::Name);
    instruction.encode_string("main").unwrap();
    assert_eq!(&instruction.finish()[1..], &[0x6E69_616D, 0]);
  }

  #[test]
  fn word_count_ceiling() {
    let mut instruction = InstructionWords::new(Op::ConstantComposite);
    while instruction.word_count() < INSTRUCTION_WORD_COUNT_MAX {
      instruction.encode_u32(7).unwrap();
    }
    assert_eq!(instruction.word_count(), 65535);
    assert!(matches!(instruction.encode_u32(7), Err(Error::LimitExceeded { limit: 65535 })));
    assert!(matches!(instruction.encode_string(""), Err(Error::LimitExceeded { .. })));
    assert_eq!(instruction.finish()[0] >> 16, 0xFFFF);
  }

  #[test]
  fn u64_needs_two_free_words() {
    let mut instruction = InstructionWords::new(Op::Constant);
    while instruction.word_count() < INSTRUCTION_WORD_COUNT_MAX - 1 {
      instruction.encode_u32(0).unwrap();
    }
    assert!(matches!(instruction.encode_u64(1), Err(Error::LimitExceeded { .. })));
    instruction.encode_u32(0).unwrap();
  }
}
