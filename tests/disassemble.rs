use spirv_dis::bytecode::{
  pack_opcode_word, parse_word_dump, write_header, InstructionWords, Op, Word, HEADER_WORD_COUNT
};
use spirv_dis::disasm::{self, Highlight};
use spirv_dis::grammar::SpirvGrammar;
use spirv_dis::{disassemble, Disassembler, Error, InstructionStream, Options};

const HEADER_TEXT: &str = "; SPIR-V\n; Version: 65536\n; Generator: Khronos\n; Bound: 6\n; Schema: 0\n";

fn module(instructions: &[Vec<Word>]) -> Vec<Word> {
  let mut words = vec![0; HEADER_WORD_COUNT];
  write_header(&mut words, 6).unwrap();
  for instruction in instructions {
    words.extend_from_slice(instruction);
  }
  words
}

fn instruction(op: Op, operands: &[Word]) -> Vec<Word> {
  let mut words = InstructionWords::new(op);
  for operand in operands {
    words.encode_u32(*operand).unwrap();
  }
  words.finish()
}

fn with_string(op: Op, leading: &[Word], text: &str) -> Vec<Word> {
  let mut words = InstructionWords::new(op);
  for operand in leading {
    words.encode_u32(*operand).unwrap();
  }
  words.encode_string(text).unwrap();
  words.finish()
}

fn body(words: &[Word]) -> String {
  let text = disassemble(words, Options::default()).unwrap();
  assert!(text.starts_with(HEADER_TEXT), "{}", text);
  text[HEADER_TEXT.len()..].to_string()
}

fn failure_position(words: &[Word]) -> usize {
  match disassemble(words, Options::default()) {
    Err(Error::InvalidBinary(diagnostic)) => diagnostic.position,
    other => panic!("expected an invalid binary, got {:?}", other)
  }
}

#[test]
fn header_only() {
  assert_eq!(disassemble(&module(&[]), Options::default()).unwrap(), HEADER_TEXT);
}

#[test]
fn missing_or_bad_header() {
  assert!(disassemble(&[], Options::default()).is_err());
  assert!(disassemble(&module(&[])[..3], Options::default()).is_err());

  let mut words = module(&[]);
  words[0] = 0xdead_beef;
  assert_eq!(failure_position(&words), 0);
}

#[test]
fn name_with_string() {
  let words = module(&[with_string(Op::Name, &[3], "main")]);
  assert_eq!(body(&words), "OpName %3 \"main\"\n");
}

#[test]
fn result_id_comes_first() {
  let words = module(&[instruction(Op::IAdd, &[1, 5, 3, 4])]);
  assert_eq!(body(&words), "%5 = OpIAdd %1 %3 %4\n");
}

#[test]
fn preamble_instructions() {
  let words = module(&[
    instruction(Op::Capability, &[1]),
    instruction(Op::MemoryModel, &[0, 1]),
    with_string(Op::EntryPoint, &[0, 4], "main"),
    instruction(Op::TypeInt, &[2, 32, 1]),
    instruction(Op::Constant, &[2, 3, 7]),
  ]);
  assert_eq!(
    body(&words),
    "OpCapability Shader\n\
     OpMemoryModel Logical GLSL450\n\
     OpEntryPoint Vertex %4 \"main\"\n\
     %2 = OpTypeInt 32 1\n\
     %3 = OpConstant %2 7\n"
  );
}

#[test]
fn byte_swapped_module() {
  let words = module(&[
    with_string(Op::Name, &[3], "main"),
    instruction(Op::IAdd, &[1, 5, 3, 4]),
  ]);
  let swapped: Vec<Word> = words.iter().map(|word| word.swap_bytes()).collect();
  assert_eq!(
    disassemble(&swapped, Options::default()).unwrap(),
    disassemble(&words, Options::default()).unwrap()
  );
}

#[test]
fn word_count_below_minimum() {
  let words = module(&[vec![pack_opcode_word(3, Op::IAdd.code()), 1, 5]]);
  assert_eq!(failure_position(&words), HEADER_WORD_COUNT);
}

#[test]
fn string_overruns_its_instruction() {
  let mut name = with_string(Op::Name, &[3], "mainline");
  name[0] = pack_opcode_word(3, Op::Name.code());
  let words = module(&[name]);
  match disassemble(&words, Options::default()) {
    Err(Error::InvalidBinary(diagnostic)) => {
      assert!(diagnostic.message.contains("word count mismatch"), "{}", diagnostic.message);
    }
    other => panic!("expected a word count mismatch, got {:?}", other)
  }
}

#[test]
fn unknown_ext_inst_import() {
  let words = module(&[with_string(Op::ExtInstImport, &[1], "GLSL.std.451")]);
  assert_eq!(failure_position(&words), HEADER_WORD_COUNT + 2);
}

#[test]
fn ext_inst_without_import() {
  let words = module(&[instruction(Op::ExtInst, &[2, 4, 1, 31, 3])]);
  assert!(disassemble(&words, Options::default()).is_err());
}

#[test]
fn ext_inst_by_name() {
  let words = module(&[
    with_string(Op::ExtInstImport, &[1], "GLSL.std.450"),
    instruction(Op::ExtInst, &[2, 4, 1, 31, 3]),
  ]);
  assert_eq!(
    body(&words),
    "%1 = OpExtInstImport \"GLSL.std.450\"\n%4 = OpExtInst %2 %1 Sqrt %3\n"
  );
}

#[test]
fn decoration_with_built_in() {
  let words = module(&[instruction(Op::Decorate, &[1, 11, 0])]);
  assert_eq!(body(&words), "OpDecorate %1 BuiltIn Position\n");
}

#[test]
fn linkage_attributes_after_a_string() {
  let mut decorate = InstructionWords::new(Op::Decorate);
  decorate.encode_u32(1).unwrap();
  decorate.encode_u32(41).unwrap();
  decorate.encode_string("func").unwrap();
  decorate.encode_u32(0).unwrap();
  let words = module(&[decorate.finish()]);
  assert_eq!(body(&words), "OpDecorate %1 LinkageAttributes \"func\" Export\n");
}

#[test]
fn shadow_sampling() {
  let words = module(&[
    instruction(Op::ImageSampleDrefImplicitLod, &[1, 2, 3, 4, 5]),
    instruction(Op::ImageSampleDrefExplicitLod, &[1, 6, 3, 4, 5, 0x2, 7]),
    instruction(Op::ImageDrefGather, &[1, 8, 3, 4, 5]),
  ]);
  assert_eq!(
    body(&words),
    "%2 = OpImageSampleDrefImplicitLod %1 %3 %4 %5\n\
     %6 = OpImageSampleDrefExplicitLod %1 %3 %4 %5 Lod %7\n\
     %8 = OpImageDrefGather %1 %3 %4 %5\n"
  );
}

#[test]
fn remaining_core_opcodes() {
  let words = module(&[
    instruction(Op::SpecConstantOp, &[1, 2, 128, 3, 4]),
    instruction(Op::GroupMemberDecorate, &[1, 2, 0, 3, 2]),
    instruction(Op::DPdxFine, &[1, 5, 2]),
    instruction(Op::AtomicCompareExchangeWeak, &[1, 6, 2, 1, 0, 0, 3, 4]),
    instruction(Op::AtomicFlagClear, &[2, 1, 0]),
    instruction(Op::ImageSparseTexelsResident, &[1, 7, 2]),
  ]);
  assert_eq!(
    body(&words),
    "%2 = OpSpecConstantOp %1 128 %3 %4\n\
     OpGroupMemberDecorate %1 %2 0 %3 2\n\
     %5 = OpDPdxFine %1 %2\n\
     %6 = OpAtomicCompareExchangeWeak %1 %2 Device None None %3 %4\n\
     OpAtomicFlagClear %2 Device None\n\
     %7 = OpImageSparseTexelsResident %1 %2\n"
  );
}

#[test]
fn aligned_load() {
  let words = module(&[instruction(Op::Load, &[1, 2, 3, 0x2, 4])]);
  assert_eq!(body(&words), "%2 = OpLoad %1 %3 Aligned 4\n");
}

#[test]
fn switch_targets() {
  let words = module(&[instruction(Op::Switch, &[1, 2, 1, 10, 2, 11])]);
  assert_eq!(body(&words), "OpSwitch %1 %2 1 %10 2 %11\n");
}

#[test]
fn unknown_opcode() {
  let words = module(&[instruction(Op::Nop, &[]), vec![pack_opcode_word(1, 9)]]);
  assert_eq!(failure_position(&words), HEADER_WORD_COUNT + 1);
}

#[test]
fn unknown_enumerant() {
  let words = module(&[instruction(Op::Capability, &[0xffff])]);
  match disassemble(&words, Options::default()) {
    Err(Error::InvalidBinary(diagnostic)) => {
      assert_eq!(diagnostic.position, HEADER_WORD_COUNT + 1);
      assert_eq!(diagnostic.word, Some(0xffff));
      assert_eq!(diagnostic.message, "invalid capability operand '65535'");
    }
    other => panic!("expected an invalid capability, got {:?}", other)
  }
}

#[test]
fn truncated_module() {
  let mut words = module(&[instruction(Op::IAdd, &[1, 5, 3, 4])]);
  words.truncate(words.len() - 2);
  assert!(disassemble(&words, Options::default()).is_err());
}

#[test]
fn nonzero_schema_is_not_an_error() {
  let mut words = module(&[]);
  words[4] = 1;
  assert!(disassemble(&words, Options::default()).unwrap().ends_with("; Schema: 1\n"));
}

#[test]
fn unknown_generator() {
  let mut words = module(&[]);
  words[2] = 0x00ff_0001;
  assert!(disassemble(&words, Options::default()).unwrap().contains("; Generator: Unknown\n"));
}

#[test]
fn colored_output() {
  let words = module(&[instruction(Op::IAdd, &[1, 5, 3, 4])]);
  let text = disassemble(&words, Options { color: true }).unwrap();
  assert!(text.starts_with("\x1b[1;30m; SPIR-V\n"));
  assert!(text.ends_with("\x1b[34m%5\x1b[0m = OpIAdd \x1b[33m%1\x1b[0m \x1b[33m%3\x1b[0m \x1b[33m%4\x1b[0m\n"));
}

#[test]
fn streaming_writes_lines_before_a_failure() {
  let words = module(&[
    instruction(Op::IAdd, &[1, 5, 3, 4]),
    vec![pack_opcode_word(1, 9)],
  ]);

  let mut out: Vec<u8> = Vec::new();
  let result = Disassembler::new(&SpirvGrammar).write_to(&words, &mut out);
  assert!(result.is_err());
  assert_eq!(
    String::from_utf8(out).unwrap(),
    format!("{}%5 = OpIAdd %1 %3 %4\n", HEADER_TEXT)
  );
  assert!(disassemble(&words, Options::default()).is_err());
}

#[test]
fn instruction_stream_stops_after_an_error() {
  let words = module(&[
    instruction(Op::IAdd, &[1, 5, 3, 4]),
    vec![pack_opcode_word(1, 9)],
    instruction(Op::Nop, &[]),
  ]);
  let mut stream = InstructionStream::new(&SpirvGrammar, &words).unwrap();
  assert_eq!(stream.header().bound, 6);

  let first = stream.next().unwrap().unwrap();
  assert_eq!(first.opcode, Op::IAdd);
  assert_eq!(first.result_id.as_ref().map(|id| id.highlight), Some(Some(Highlight::ResultId)));
  assert_eq!(first.operands.len(), 3);
  assert!(stream.next().unwrap().is_err());
  assert!(stream.next().is_none());
}

#[test]
fn disassembles_a_word_dump() {
  let words = parse_word_dump(
    "0x07230203, 0x00010000, 0x00000000, 0x00000006, 0x00000000\n\
     0x00040015 0x00000002 0x00000020 0x00000001"
  ).unwrap();
  assert_eq!(body(&words), "%2 = OpTypeInt 32 1\n");
}

#[test]
fn instructions_with_the_built_in_grammar() {
  let words = module(&[instruction(Op::Capability, &[1]), instruction(Op::Nop, &[])]);
  let decoded: Vec<Op> =
    disasm::instructions(&words)
      .unwrap()
      .map(|instruction| instruction.unwrap().opcode)
      .collect();
  assert_eq!(decoded, vec![Op::Capability, Op::Nop]);
}
