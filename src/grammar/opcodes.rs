//! Operand layouts of the core opcodes.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{OpcodeDesc, OperandKind};
use crate::bytecode::Op;

// Each row is `Opcode min_word_count [operand kinds]`.
macro_rules! opcode_table {
  ( $( $op:ident $count:literal [ $( $kind:ident ),* ] ),* $(,)? ) => {
    &[
      $(
        OpcodeDesc {
          opcode         : Op::$op,
          min_word_count : $count,
          operands       : &[ $( OperandKind::$kind ),* ]
        }
      ),*
    ]
  };
}

static OPCODES: &[OpcodeDesc] = opcode_table![
  Nop                       1 [],
  Undef                     3 [Id, ResultId],
  SourceContinued           2 [LiteralString],
  Source                    3 [SourceLanguage, Literal, Id, LiteralString],
  SourceExtension           2 [LiteralString],
  Name                      3 [Id, LiteralString],
  MemberName                4 [Id, Literal, LiteralString],
  String                    3 [ResultId, LiteralString],
  Line                      4 [Id, Literal, Literal],
  Extension                 2 [LiteralString],
  ExtInstImport             3 [ResultId, LiteralString],
  ExtInst                   5 [Id, ResultId, Id, LiteralNumber, Id],
  MemoryModel               3 [AddressingModel, MemoryModel],
  EntryPoint                4 [ExecutionModel, Id, LiteralString, Id],
  ExecutionMode             3 [Id, ExecutionMode],
  Capability                2 [Capability],

  TypeVoid                  2 [ResultId],
  TypeBool                  2 [ResultId],
  TypeInt                   4 [ResultId, Literal, Literal],
  TypeFloat                 3 [ResultId, Literal],
  TypeVector                4 [ResultId, Id, Literal],
  TypeMatrix                4 [ResultId, Id, Literal],
  TypeImage                 9 [ResultId, Id, Dimensionality, Literal, Literal, Literal, Literal, ImageFormat, AccessQualifier],
  TypeSampler               2 [ResultId],
  TypeSampledImage          3 [ResultId, Id],
  TypeArray                 4 [ResultId, Id, Id],
  TypeRuntimeArray          3 [ResultId, Id],
  TypeStruct                2 [ResultId, Id],
  TypeOpaque                3 [ResultId, LiteralString],
  TypePointer               4 [ResultId, StorageClass, Id],
  TypeFunction              3 [ResultId, Id, Id],
  TypeEvent                 2 [ResultId],
  TypeDeviceEvent           2 [ResultId],
  TypeReserveId             2 [ResultId],
  TypeQueue                 2 [ResultId],
  TypePipe                  3 [ResultId, AccessQualifier],
  TypeForwardPointer        3 [Id, StorageClass],

  ConstantTrue              3 [Id, ResultId],
  ConstantFalse             3 [Id, ResultId],
  Constant                  4 [Id, ResultId, Literal],
  ConstantComposite         3 [Id, ResultId, Id],
  ConstantSampler           6 [Id, ResultId, SamplerAddressingMode, Literal, SamplerFilterMode],
  ConstantNull              3 [Id, ResultId],
  SpecConstantTrue          3 [Id, ResultId],
  SpecConstantFalse         3 [Id, ResultId],
  SpecConstant              4 [Id, ResultId, Literal],
  SpecConstantComposite     3 [Id, ResultId, Id],
  // The literal is the opcode of the operation being specialized.
  SpecConstantOp            4 [Id, ResultId, Literal, Id],

  Function                  5 [Id, ResultId, FunctionControl, Id],
  FunctionParameter         3 [Id, ResultId],
  FunctionEnd               1 [],
  FunctionCall              4 [Id, ResultId, Id, Id],

  Variable                  4 [Id, ResultId, StorageClass, Id],
  ImageTexelPointer         6 [Id, ResultId, Id, Id, Id],
  Load                      4 [Id, ResultId, Id, MemoryAccess],
  Store                     3 [Id, Id, MemoryAccess],
  CopyMemory                3 [Id, Id, MemoryAccess],
  CopyMemorySized           4 [Id, Id, Id, MemoryAccess],
  AccessChain               4 [Id, ResultId, Id, Id],
  InBoundsAccessChain       4 [Id, ResultId, Id, Id],
  PtrAccessChain            5 [Id, ResultId, Id, Id, Id],
  ArrayLength               5 [Id, ResultId, Id, Literal],
  GenericPtrMemSemantics    4 [Id, ResultId, Id],
  InBoundsPtrAccessChain    5 [Id, ResultId, Id, Id, Id],

  Decorate                  3 [Id, Decoration],
  MemberDecorate            4 [Id, Literal, Decoration],
  DecorationGroup           2 [ResultId],
  GroupDecorate             2 [Id, Id],
  // Operands past the decoration group come in (target, member) pairs.
  GroupMemberDecorate       2 [Id, Id, Literal],

  VectorExtractDynamic      5 [Id, ResultId, Id, Id],
  VectorInsertDynamic       6 [Id, ResultId, Id, Id, Id],
  VectorShuffle             5 [Id, ResultId, Id, Id, Literal],
  CompositeConstruct        3 [Id, ResultId, Id],
  CompositeExtract          4 [Id, ResultId, Id, Literal],
  CompositeInsert           5 [Id, ResultId, Id, Id, Literal],
  CopyObject                4 [Id, ResultId, Id],
  Transpose                 4 [Id, ResultId, Id],

  SampledImage              5 [Id, ResultId, Id, Id],
  ImageSampleImplicitLod    5 [Id, ResultId, Id, Id, ImageOperands],
  ImageSampleExplicitLod    7 [Id, ResultId, Id, Id, ImageOperands],
  ImageSampleDrefImplicitLod 6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSampleDrefExplicitLod 8 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSampleProjImplicitLod 5 [Id, ResultId, Id, Id, ImageOperands],
  ImageSampleProjExplicitLod 7 [Id, ResultId, Id, Id, ImageOperands],
  ImageSampleProjDrefImplicitLod 6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSampleProjDrefExplicitLod 8 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageFetch                5 [Id, ResultId, Id, Id, ImageOperands],
  ImageGather               6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageDrefGather           6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageRead                 5 [Id, ResultId, Id, Id, ImageOperands],
  ImageWrite                4 [Id, Id, Id, ImageOperands],
  Image                     4 [Id, ResultId, Id],
  ImageQueryFormat          4 [Id, ResultId, Id],
  ImageQueryOrder           4 [Id, ResultId, Id],
  ImageQuerySizeLod         5 [Id, ResultId, Id, Id],
  ImageQuerySize            4 [Id, ResultId, Id],
  ImageQueryLod             5 [Id, ResultId, Id, Id],
  ImageQueryLevels          4 [Id, ResultId, Id],
  ImageQuerySamples         4 [Id, ResultId, Id],

  ConvertFToU               4 [Id, ResultId, Id],
  ConvertFToS               4 [Id, ResultId, Id],
  ConvertSToF               4 [Id, ResultId, Id],
  ConvertUToF               4 [Id, ResultId, Id],
  UConvert                  4 [Id, ResultId, Id],
  SConvert                  4 [Id, ResultId, Id],
  FConvert                  4 [Id, ResultId, Id],
  QuantizeToF16             4 [Id, ResultId, Id],
  ConvertPtrToU             4 [Id, ResultId, Id],
  SatConvertSToU            4 [Id, ResultId, Id],
  SatConvertUToS            4 [Id, ResultId, Id],
  ConvertUToPtr             4 [Id, ResultId, Id],
  PtrCastToGeneric          4 [Id, ResultId, Id],
  GenericCastToPtr          4 [Id, ResultId, Id],
  GenericCastToPtrExplicit  5 [Id, ResultId, Id, StorageClass],
  Bitcast                   4 [Id, ResultId, Id],

  SNegate                   4 [Id, ResultId, Id],
  FNegate                   4 [Id, ResultId, Id],
  IAdd                      5 [Id, ResultId, Id, Id],
  FAdd                      5 [Id, ResultId, Id, Id],
  ISub                      5 [Id, ResultId, Id, Id],
  FSub                      5 [Id, ResultId, Id, Id],
  IMul                      5 [Id, ResultId, Id, Id],
  FMul                      5 [Id, ResultId, Id, Id],
  UDiv                      5 [Id, ResultId, Id, Id],
  SDiv                      5 [Id, ResultId, Id, Id],
  FDiv                      5 [Id, ResultId, Id, Id],
  UMod                      5 [Id, ResultId, Id, Id],
  SRem                      5 [Id, ResultId, Id, Id],
  SMod                      5 [Id, ResultId, Id, Id],
  FRem                      5 [Id, ResultId, Id, Id],
  FMod                      5 [Id, ResultId, Id, Id],
  VectorTimesScalar         5 [Id, ResultId, Id, Id],
  MatrixTimesScalar         5 [Id, ResultId, Id, Id],
  VectorTimesMatrix         5 [Id, ResultId, Id, Id],
  MatrixTimesVector         5 [Id, ResultId, Id, Id],
  MatrixTimesMatrix         5 [Id, ResultId, Id, Id],
  OuterProduct              5 [Id, ResultId, Id, Id],
  Dot                       5 [Id, ResultId, Id, Id],
  IAddCarry                 5 [Id, ResultId, Id, Id],
  ISubBorrow                5 [Id, ResultId, Id, Id],
  UMulExtended              5 [Id, ResultId, Id, Id],
  SMulExtended              5 [Id, ResultId, Id, Id],

  Any                       4 [Id, ResultId, Id],
  All                       4 [Id, ResultId, Id],
  IsNan                     4 [Id, ResultId, Id],
  IsInf                     4 [Id, ResultId, Id],
  IsFinite                  4 [Id, ResultId, Id],
  IsNormal                  4 [Id, ResultId, Id],
  SignBitSet                4 [Id, ResultId, Id],
  LessOrGreater             5 [Id, ResultId, Id, Id],
  Ordered                   5 [Id, ResultId, Id, Id],
  Unordered                 5 [Id, ResultId, Id, Id],
  LogicalEqual              5 [Id, ResultId, Id, Id],
  LogicalNotEqual           5 [Id, ResultId, Id, Id],
  LogicalOr                 5 [Id, ResultId, Id, Id],
  LogicalAnd                5 [Id, ResultId, Id, Id],
  LogicalNot                4 [Id, ResultId, Id],
  Select                    6 [Id, ResultId, Id, Id, Id],
  IEqual                    5 [Id, ResultId, Id, Id],
  INotEqual                 5 [Id, ResultId, Id, Id],
  UGreaterThan              5 [Id, ResultId, Id, Id],
  SGreaterThan              5 [Id, ResultId, Id, Id],
  UGreaterThanEqual         5 [Id, ResultId, Id, Id],
  SGreaterThanEqual         5 [Id, ResultId, Id, Id],
  ULessThan                 5 [Id, ResultId, Id, Id],
  SLessThan                 5 [Id, ResultId, Id, Id],
  ULessThanEqual            5 [Id, ResultId, Id, Id],
  SLessThanEqual            5 [Id, ResultId, Id, Id],
  FOrdEqual                 5 [Id, ResultId, Id, Id],
  FUnordEqual               5 [Id, ResultId, Id, Id],
  FOrdNotEqual              5 [Id, ResultId, Id, Id],
  FUnordNotEqual            5 [Id, ResultId, Id, Id],
  FOrdLessThan              5 [Id, ResultId, Id, Id],
  FUnordLessThan            5 [Id, ResultId, Id, Id],
  FOrdGreaterThan           5 [Id, ResultId, Id, Id],
  FUnordGreaterThan         5 [Id, ResultId, Id, Id],
  FOrdLessThanEqual         5 [Id, ResultId, Id, Id],
  FUnordLessThanEqual       5 [Id, ResultId, Id, Id],
  FOrdGreaterThanEqual      5 [Id, ResultId, Id, Id],
  FUnordGreaterThanEqual    5 [Id, ResultId, Id, Id],

  ShiftRightLogical         5 [Id, ResultId, Id, Id],
  ShiftRightArithmetic      5 [Id, ResultId, Id, Id],
  ShiftLeftLogical          5 [Id, ResultId, Id, Id],
  BitwiseOr                 5 [Id, ResultId, Id, Id],
  BitwiseXor                5 [Id, ResultId, Id, Id],
  BitwiseAnd                5 [Id, ResultId, Id, Id],
  Not                       4 [Id, ResultId, Id],
  BitFieldInsert            7 [Id, ResultId, Id, Id, Id, Id],
  BitFieldSExtract          6 [Id, ResultId, Id, Id, Id],
  BitFieldUExtract          6 [Id, ResultId, Id, Id, Id],
  BitReverse                4 [Id, ResultId, Id],
  BitCount                  4 [Id, ResultId, Id],

  DPdx                      4 [Id, ResultId, Id],
  DPdy                      4 [Id, ResultId, Id],
  Fwidth                    4 [Id, ResultId, Id],
  DPdxFine                  4 [Id, ResultId, Id],
  DPdyFine                  4 [Id, ResultId, Id],
  FwidthFine                4 [Id, ResultId, Id],
  DPdxCoarse                4 [Id, ResultId, Id],
  DPdyCoarse                4 [Id, ResultId, Id],
  FwidthCoarse              4 [Id, ResultId, Id],

  EmitVertex                1 [],
  EndPrimitive              1 [],
  EmitStreamVertex          2 [Id],
  EndStreamPrimitive        2 [Id],

  ControlBarrier            4 [ExecutionScope, ExecutionScope, MemorySemantics],
  MemoryBarrier             3 [ExecutionScope, MemorySemantics],
  AtomicLoad                6 [Id, ResultId, Id, ExecutionScope, MemorySemantics],
  AtomicStore               5 [Id, ExecutionScope, MemorySemantics, Id],
  AtomicExchange            7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicCompareExchange     9 [Id, ResultId, Id, ExecutionScope, MemorySemantics, MemorySemantics, Id, Id],
  AtomicCompareExchangeWeak 9 [Id, ResultId, Id, ExecutionScope, MemorySemantics, MemorySemantics, Id, Id],
  AtomicIIncrement          6 [Id, ResultId, Id, ExecutionScope, MemorySemantics],
  AtomicIDecrement          6 [Id, ResultId, Id, ExecutionScope, MemorySemantics],
  AtomicIAdd                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicISub                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicSMin                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicUMin                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicSMax                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicUMax                7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicAnd                 7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicOr                  7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],
  AtomicXor                 7 [Id, ResultId, Id, ExecutionScope, MemorySemantics, Id],

  Phi                       3 [Id, ResultId, Id],
  LoopMerge                 4 [Id, Id, LoopControl],
  SelectionMerge            3 [Id, SelectionControl],
  Label                     2 [ResultId],
  Branch                    2 [Id],
  BranchConditional         4 [Id, Id, Id, Literal],
  // Operands past the selector and default come in (literal, label) pairs.
  Switch                    3 [Id, Id, Literal, Id],
  Kill                      1 [],
  Return                    1 [],
  ReturnValue               2 [Id],
  Unreachable               1 [],
  LifetimeStart             3 [Id, Literal],
  LifetimeStop              3 [Id, Literal],

  GroupAsyncCopy            9 [Id, ResultId, ExecutionScope, Id, Id, Id, Id, Id],
  GroupWaitEvents           4 [ExecutionScope, Id, Id],
  GroupAll                  5 [Id, ResultId, ExecutionScope, Id],
  GroupAny                  5 [Id, ResultId, ExecutionScope, Id],
  GroupBroadcast            6 [Id, ResultId, ExecutionScope, Id, Id],
  GroupIAdd                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupFAdd                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupFMin                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupUMin                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupSMin                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupFMax                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupUMax                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],
  GroupSMax                 6 [Id, ResultId, ExecutionScope, GroupOperation, Id],

  ReadPipe                  7 [Id, ResultId, Id, Id, Id, Id],
  WritePipe                 7 [Id, ResultId, Id, Id, Id, Id],
  ReservedReadPipe          9 [Id, ResultId, Id, Id, Id, Id, Id, Id],
  ReservedWritePipe         9 [Id, ResultId, Id, Id, Id, Id, Id, Id],
  ReserveReadPipePackets    7 [Id, ResultId, Id, Id, Id, Id],
  ReserveWritePipePackets   7 [Id, ResultId, Id, Id, Id, Id],
  CommitReadPipe            5 [Id, Id, Id, Id],
  CommitWritePipe           5 [Id, Id, Id, Id],
  IsValidReserveId          4 [Id, ResultId, Id],
  GetNumPipePackets         6 [Id, ResultId, Id, Id, Id],
  GetMaxPipePackets         6 [Id, ResultId, Id, Id, Id],
  GroupReserveReadPipePackets  8 [Id, ResultId, ExecutionScope, Id, Id, Id, Id],
  GroupReserveWritePipePackets 8 [Id, ResultId, ExecutionScope, Id, Id, Id, Id],
  GroupCommitReadPipe       6 [ExecutionScope, Id, Id, Id, Id],
  GroupCommitWritePipe      6 [ExecutionScope, Id, Id, Id, Id],

  EnqueueMarker             7 [Id, ResultId, Id, Id, Id, Id],
  EnqueueKernel            13 [Id, ResultId, Id, KernelEnqueueFlags, Id, Id, Id, Id, Id, Id, Id, Id, Id],
  GetKernelNDrangeSubGroupCount   8 [Id, ResultId, Id, Id, Id, Id, Id],
  GetKernelNDrangeMaxSubGroupSize 8 [Id, ResultId, Id, Id, Id, Id, Id],
  GetKernelWorkGroupSize          7 [Id, ResultId, Id, Id, Id, Id],
  GetKernelPreferredWorkGroupSizeMultiple 7 [Id, ResultId, Id, Id, Id, Id],
  RetainEvent               2 [Id],
  ReleaseEvent              2 [Id],
  CreateUserEvent           3 [Id, ResultId],
  IsValidEvent              4 [Id, ResultId, Id],
  SetUserEventStatus        3 [Id, Id],
  CaptureEventProfilingInfo 4 [Id, KernelProfilingInfo, Id],
  GetDefaultQueue           3 [Id, ResultId],
  BuildNDRange              6 [Id, ResultId, Id, Id, Id],

  ImageSparseSampleImplicitLod         5 [Id, ResultId, Id, Id, ImageOperands],
  ImageSparseSampleExplicitLod         7 [Id, ResultId, Id, Id, ImageOperands],
  ImageSparseSampleDrefImplicitLod     6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseSampleDrefExplicitLod     8 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseSampleProjImplicitLod     5 [Id, ResultId, Id, Id, ImageOperands],
  ImageSparseSampleProjExplicitLod     7 [Id, ResultId, Id, Id, ImageOperands],
  ImageSparseSampleProjDrefImplicitLod 6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseSampleProjDrefExplicitLod 8 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseFetch                     5 [Id, ResultId, Id, Id, ImageOperands],
  ImageSparseGather                    6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseDrefGather                6 [Id, ResultId, Id, Id, Id, ImageOperands],
  ImageSparseTexelsResident            4 [Id, ResultId, Id],

  NoLine                    1 [],
  AtomicFlagTestAndSet      6 [Id, ResultId, Id, ExecutionScope, MemorySemantics],
  AtomicFlagClear           4 [Id, ExecutionScope, MemorySemantics],
  ImageSparseRead           5 [Id, ResultId, Id, Id, ImageOperands],
];

lazy_static! {
  static ref OPCODE_INDEX: HashMap<u16, &'static OpcodeDesc> =
    OPCODES
      .iter()
      .map(|desc| (desc.opcode.code(), desc))
      .collect();
}

pub(super) fn lookup(opcode: u16) -> Option<&'static OpcodeDesc> {
  OPCODE_INDEX.get(&opcode).copied()
}
