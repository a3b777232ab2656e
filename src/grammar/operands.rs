//! Enumerants of the enumerated operand kinds.

use std::collections::HashMap;

use lazy_static::lazy_static;
use strum::IntoEnumIterator;

use super::{OperandDesc, OperandKind};
use crate::bytecode::Word;

// Each row is `value => "Name"`, optionally followed by the kinds of the operands the value
// brings with it.
macro_rules! enumerants {
  ( $( $value:literal => $name:literal $( [ $( $kind:ident ),* ] )? ),* $(,)? ) => {
    &[
      $(
        OperandDesc {
          value    : $value,
          name     : $name,
          operands : &[ $( $( OperandKind::$kind ),* )? ]
        }
      ),*
    ]
  };
}

static SOURCE_LANGUAGE: &[OperandDesc] = enumerants![
  0 => "Unknown",
  1 => "ESSL",
  2 => "GLSL",
  3 => "OpenCL_C",
  4 => "OpenCL_CPP",
];

static EXECUTION_MODEL: &[OperandDesc] = enumerants![
  0 => "Vertex",
  1 => "TessellationControl",
  2 => "TessellationEvaluation",
  3 => "Geometry",
  4 => "Fragment",
  5 => "GLCompute",
  6 => "Kernel",
];

static ADDRESSING_MODEL: &[OperandDesc] = enumerants![
  0 => "Logical",
  1 => "Physical32",
  2 => "Physical64",
];

static MEMORY_MODEL: &[OperandDesc] = enumerants![
  0 => "Simple",
  1 => "GLSL450",
  2 => "OpenCL",
];

static EXECUTION_MODE: &[OperandDesc] = enumerants![
  0  => "Invocations" [Literal],
  1  => "SpacingEqual",
  2  => "SpacingFractionalEven",
  3  => "SpacingFractionalOdd",
  4  => "VertexOrderCw",
  5  => "VertexOrderCcw",
  6  => "PixelCenterInteger",
  7  => "OriginUpperLeft",
  8  => "OriginLowerLeft",
  9  => "EarlyFragmentTests",
  10 => "PointMode",
  11 => "Xfb",
  12 => "DepthReplacing",
  14 => "DepthGreater",
  15 => "DepthLess",
  16 => "DepthUnchanged",
  17 => "LocalSize" [Literal, Literal, Literal],
  18 => "LocalSizeHint" [Literal, Literal, Literal],
  19 => "InputPoints",
  20 => "InputLines",
  21 => "InputLinesAdjacency",
  22 => "Triangles",
  23 => "InputTrianglesAdjacency",
  24 => "Quads",
  25 => "Isolines",
  26 => "OutputVertices" [Literal],
  27 => "OutputPoints",
  28 => "OutputLineStrip",
  29 => "OutputTriangleStrip",
  30 => "VecTypeHint" [Literal],
  31 => "ContractionOff",
];

static STORAGE_CLASS: &[OperandDesc] = enumerants![
  0  => "UniformConstant",
  1  => "Input",
  2  => "Uniform",
  3  => "Output",
  4  => "Workgroup",
  5  => "CrossWorkgroup",
  6  => "Private",
  7  => "Function",
  8  => "Generic",
  9  => "PushConstant",
  10 => "AtomicCounter",
  11 => "Image",
];

static DIMENSIONALITY: &[OperandDesc] = enumerants![
  0 => "1D",
  1 => "2D",
  2 => "3D",
  3 => "Cube",
  4 => "Rect",
  5 => "Buffer",
  6 => "SubpassData",
];

static SAMPLER_ADDRESSING_MODE: &[OperandDesc] = enumerants![
  0 => "None",
  1 => "ClampToEdge",
  2 => "Clamp",
  3 => "Repeat",
  4 => "RepeatMirrored",
];

static SAMPLER_FILTER_MODE: &[OperandDesc] = enumerants![
  0 => "Nearest",
  1 => "Linear",
];

static IMAGE_FORMAT: &[OperandDesc] = enumerants![
  0  => "Unknown",
  1  => "Rgba32f",
  2  => "Rgba16f",
  3  => "R32f",
  4  => "Rgba8",
  5  => "Rgba8Snorm",
  6  => "Rg32f",
  7  => "Rg16f",
  8  => "R11fG11fB10f",
  9  => "R16f",
  10 => "Rgba16",
  11 => "Rgb10A2",
  12 => "Rg16",
  13 => "Rg8",
  14 => "R16",
  15 => "R8",
  16 => "Rgba16Snorm",
  17 => "Rg16Snorm",
  18 => "Rg8Snorm",
  19 => "R16Snorm",
  20 => "R8Snorm",
  21 => "Rgba32i",
  22 => "Rgba16i",
  23 => "Rgba8i",
  24 => "R32i",
  25 => "Rg32i",
  26 => "Rg16i",
  27 => "Rg8i",
  28 => "R16i",
  29 => "R8i",
  30 => "Rgba32ui",
  31 => "Rgba16ui",
  32 => "Rgba8ui",
  33 => "R32ui",
  34 => "Rgb10a2ui",
  35 => "Rg32ui",
  36 => "Rg16ui",
  37 => "Rg8ui",
  38 => "R16ui",
  39 => "R8ui",
];

static IMAGE_OPERANDS: &[OperandDesc] = enumerants![
  0x00 => "None",
  0x01 => "Bias" [Id],
  0x02 => "Lod" [Id],
  0x04 => "Grad" [Id, Id],
  0x08 => "ConstOffset" [Id],
  0x10 => "Offset" [Id],
  0x20 => "ConstOffsets" [Id],
  0x40 => "Sample" [Id],
  0x80 => "MinLod" [Id],
];

static FP_FAST_MATH_MODE: &[OperandDesc] = enumerants![
  0x00 => "None",
  0x01 => "NotNaN",
  0x02 => "NotInf",
  0x04 => "NSZ",
  0x08 => "AllowRecip",
  0x10 => "Fast",
];

static FP_ROUNDING_MODE: &[OperandDesc] = enumerants![
  0 => "RTE",
  1 => "RTZ",
  2 => "RTP",
  3 => "RTN",
];

static LINKAGE_TYPE: &[OperandDesc] = enumerants![
  0 => "Export",
  1 => "Import",
];

static ACCESS_QUALIFIER: &[OperandDesc] = enumerants![
  0 => "ReadOnly",
  1 => "WriteOnly",
  2 => "ReadWrite",
];

static FUNCTION_PARAMETER_ATTRIBUTE: &[OperandDesc] = enumerants![
  0 => "Zext",
  1 => "Sext",
  2 => "ByVal",
  3 => "Sret",
  4 => "NoAlias",
  5 => "NoCapture",
  6 => "NoWrite",
  7 => "NoReadWrite",
];

static DECORATION: &[OperandDesc] = enumerants![
  0  => "RelaxedPrecision",
  1  => "SpecId" [Literal],
  2  => "Block",
  3  => "BufferBlock",
  4  => "RowMajor",
  5  => "ColMajor",
  6  => "ArrayStride" [Literal],
  7  => "MatrixStride" [Literal],
  8  => "GLSLShared",
  9  => "GLSLPacked",
  10 => "CPacked",
  11 => "BuiltIn" [BuiltIn],
  13 => "NoPerspective",
  14 => "Flat",
  15 => "Patch",
  16 => "Centroid",
  17 => "Sample",
  18 => "Invariant",
  19 => "Restrict",
  20 => "Aliased",
  21 => "Volatile",
  22 => "Constant",
  23 => "Coherent",
  24 => "NonWritable",
  25 => "NonReadable",
  26 => "Uniform",
  28 => "SaturatedConversion",
  29 => "Stream" [Literal],
  30 => "Location" [Literal],
  31 => "Component" [Literal],
  32 => "Index" [Literal],
  33 => "Binding" [Literal],
  34 => "DescriptorSet" [Literal],
  35 => "Offset" [Literal],
  36 => "XfbBuffer" [Literal],
  37 => "XfbStride" [Literal],
  38 => "FuncParamAttr" [FunctionParameterAttribute],
  39 => "FPRoundingMode" [FpRoundingMode],
  40 => "FPFastMathMode" [FpFastMathMode],
  41 => "LinkageAttributes" [LiteralString, LinkageType],
  42 => "NoContraction",
  43 => "InputAttachmentIndex" [Literal],
  44 => "Alignment" [Literal],
];

static BUILT_IN: &[OperandDesc] = enumerants![
  0  => "Position",
  1  => "PointSize",
  3  => "ClipDistance",
  4  => "CullDistance",
  5  => "VertexId",
  6  => "InstanceId",
  7  => "PrimitiveId",
  8  => "InvocationId",
  9  => "Layer",
  10 => "ViewportIndex",
  11 => "TessLevelOuter",
  12 => "TessLevelInner",
  13 => "TessCoord",
  14 => "PatchVertices",
  15 => "FragCoord",
  16 => "PointCoord",
  17 => "FrontFacing",
  18 => "SampleId",
  19 => "SamplePosition",
  20 => "SampleMask",
  22 => "FragDepth",
  23 => "HelperInvocation",
  24 => "NumWorkgroups",
  25 => "WorkgroupSize",
  26 => "WorkgroupId",
  27 => "LocalInvocationId",
  28 => "GlobalInvocationId",
  29 => "LocalInvocationIndex",
  30 => "WorkDim",
  31 => "GlobalSize",
  32 => "EnqueuedWorkgroupSize",
  33 => "GlobalOffset",
  34 => "GlobalLinearId",
  36 => "SubgroupSize",
  37 => "SubgroupMaxSize",
  38 => "NumSubgroups",
  39 => "NumEnqueuedSubgroups",
  40 => "SubgroupId",
  41 => "SubgroupLocalInvocationId",
  42 => "VertexIndex",
  43 => "InstanceIndex",
];

static SELECTION_CONTROL: &[OperandDesc] = enumerants![
  0x0 => "None",
  0x1 => "Flatten",
  0x2 => "DontFlatten",
];

static LOOP_CONTROL: &[OperandDesc] = enumerants![
  0x0 => "None",
  0x1 => "Unroll",
  0x2 => "DontUnroll",
];

static FUNCTION_CONTROL: &[OperandDesc] = enumerants![
  0x0 => "None",
  0x1 => "Inline",
  0x2 => "DontInline",
  0x4 => "Pure",
  0x8 => "Const",
];

static MEMORY_SEMANTICS: &[OperandDesc] = enumerants![
  0x000 => "None",
  0x002 => "Acquire",
  0x004 => "Release",
  0x008 => "AcquireRelease",
  0x010 => "SequentiallyConsistent",
  0x040 => "UniformMemory",
  0x080 => "SubgroupMemory",
  0x100 => "WorkgroupMemory",
  0x200 => "CrossWorkgroupMemory",
  0x400 => "AtomicCounterMemory",
  0x800 => "ImageMemory",
];

static MEMORY_ACCESS: &[OperandDesc] = enumerants![
  0x0 => "None",
  0x1 => "Volatile",
  0x2 => "Aligned" [Literal],
  0x4 => "Nontemporal",
];

static EXECUTION_SCOPE: &[OperandDesc] = enumerants![
  0 => "CrossDevice",
  1 => "Device",
  2 => "Workgroup",
  3 => "Subgroup",
  4 => "Invocation",
];

static GROUP_OPERATION: &[OperandDesc] = enumerants![
  0 => "Reduce",
  1 => "InclusiveScan",
  2 => "ExclusiveScan",
];

static KERNEL_ENQUEUE_FLAGS: &[OperandDesc] = enumerants![
  0 => "NoWait",
  1 => "WaitKernel",
  2 => "WaitWorkGroup",
];

static KERNEL_PROFILING_INFO: &[OperandDesc] = enumerants![
  0x0 => "None",
  0x1 => "CmdExecTime",
];

static CAPABILITY: &[OperandDesc] = enumerants![
  0  => "Matrix",
  1  => "Shader",
  2  => "Geometry",
  3  => "Tessellation",
  4  => "Addresses",
  5  => "Linkage",
  6  => "Kernel",
  7  => "Vector16",
  8  => "Float16Buffer",
  9  => "Float16",
  10 => "Float64",
  11 => "Int64",
  12 => "Int64Atomics",
  13 => "ImageBasic",
  14 => "ImageReadWrite",
  15 => "ImageMipmap",
  17 => "Pipes",
  18 => "Groups",
  19 => "DeviceEnqueue",
  20 => "LiteralSampler",
  21 => "AtomicStorage",
  22 => "Int16",
  23 => "TessellationPointSize",
  24 => "GeometryPointSize",
  25 => "ImageGatherExtended",
  27 => "StorageImageMultisample",
  28 => "UniformBufferArrayDynamicIndexing",
  29 => "SampledImageArrayDynamicIndexing",
  30 => "StorageBufferArrayDynamicIndexing",
  31 => "StorageImageArrayDynamicIndexing",
  32 => "ClipDistance",
  33 => "CullDistance",
  34 => "ImageCubeArray",
  35 => "SampleRateShading",
  36 => "ImageRect",
  37 => "SampledRect",
  38 => "GenericPointer",
  39 => "Int8",
  40 => "InputAttachment",
  41 => "SparseResidency",
  42 => "MinLod",
  43 => "Sampled1D",
  44 => "Image1D",
  45 => "SampledCubeArray",
  46 => "SampledBuffer",
  47 => "ImageBuffer",
  48 => "ImageMSArray",
  49 => "StorageImageExtendedFormats",
  50 => "ImageQuery",
  51 => "DerivativeControl",
  52 => "InterpolationFunction",
  53 => "TransformFeedback",
  54 => "GeometryStreams",
  55 => "StorageImageReadWithoutFormat",
  56 => "StorageImageWriteWithoutFormat",
  57 => "MultiViewport",
];

/// The enumerants of `kind`; empty for kinds that are not enumerated.
pub(super) fn enumerants(kind: OperandKind) -> &'static [OperandDesc] {
  match kind {
    OperandKind::Id
    | OperandKind::ResultId
    | OperandKind::Literal
    | OperandKind::LiteralNumber
    | OperandKind::LiteralString => &[],

    OperandKind::Capability                 => CAPABILITY,
    OperandKind::SourceLanguage             => SOURCE_LANGUAGE,
    OperandKind::ExecutionModel             => EXECUTION_MODEL,
    OperandKind::AddressingModel            => ADDRESSING_MODEL,
    OperandKind::MemoryModel                => MEMORY_MODEL,
    OperandKind::ExecutionMode              => EXECUTION_MODE,
    OperandKind::StorageClass               => STORAGE_CLASS,
    OperandKind::Dimensionality             => DIMENSIONALITY,
    OperandKind::SamplerAddressingMode      => SAMPLER_ADDRESSING_MODE,
    OperandKind::SamplerFilterMode          => SAMPLER_FILTER_MODE,
    OperandKind::ImageFormat                => IMAGE_FORMAT,
    OperandKind::ImageOperands              => IMAGE_OPERANDS,
    OperandKind::FpFastMathMode             => FP_FAST_MATH_MODE,
    OperandKind::FpRoundingMode             => FP_ROUNDING_MODE,
    OperandKind::LinkageType                => LINKAGE_TYPE,
    OperandKind::AccessQualifier            => ACCESS_QUALIFIER,
    OperandKind::FunctionParameterAttribute => FUNCTION_PARAMETER_ATTRIBUTE,
    OperandKind::Decoration                 => DECORATION,
    OperandKind::BuiltIn                    => BUILT_IN,
    OperandKind::SelectionControl           => SELECTION_CONTROL,
    OperandKind::LoopControl                => LOOP_CONTROL,
    OperandKind::FunctionControl            => FUNCTION_CONTROL,
    OperandKind::MemorySemantics            => MEMORY_SEMANTICS,
    OperandKind::MemoryAccess               => MEMORY_ACCESS,
    OperandKind::ExecutionScope             => EXECUTION_SCOPE,
    OperandKind::GroupOperation             => GROUP_OPERATION,
    OperandKind::KernelEnqueueFlags         => KERNEL_ENQUEUE_FLAGS,
    OperandKind::KernelProfilingInfo        => KERNEL_PROFILING_INFO,
  }
}

lazy_static! {
  static ref OPERAND_INDEX: HashMap<(OperandKind, Word), &'static OperandDesc> = {
    let mut index = HashMap::new();
    for kind in OperandKind::iter() {
      for desc in enumerants(kind) {
        index.insert((kind, desc.value), desc);
      }
    }
    index
  };
}

pub(super) fn lookup(kind: OperandKind, value: Word) -> Option<&'static OperandDesc> {
  OPERAND_INDEX.get(&(kind, value)).copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn finds_enumerants_by_kind_and_value() {
    assert_eq!(lookup(OperandKind::Capability, 1).map(|d| d.name), Some("Shader"));
    assert_eq!(lookup(OperandKind::StorageClass, 1).map(|d| d.name), Some("Input"));
    assert_eq!(lookup(OperandKind::Dimensionality, 1).map(|d| d.name), Some("2D"));
    assert!(lookup(OperandKind::Capability, 16).is_none());
    assert!(lookup(OperandKind::Id, 0).is_none());
  }

  #[test]
  fn continuation_operands() {
    let aligned = lookup(OperandKind::MemoryAccess, 0x2).unwrap();
    assert_eq!(aligned.operands, &[OperandKind::Literal]);
    let volatile = lookup(OperandKind::MemoryAccess, 0x1).unwrap();
    assert!(volatile.operands.is_empty());
    let linkage = lookup(OperandKind::Decoration, 41).unwrap();
    assert_eq!(linkage.operands, &[OperandKind::LiteralString, OperandKind::LinkageType]);
  }

  #[test]
  fn enumerant_values_are_unique_per_kind() {
    for kind in OperandKind::iter() {
      let values = enumerants(kind);
      for (i, desc) in values.iter().enumerate() {
        assert!(
          values[i + 1..].iter().all(|other| other.value != desc.value),
          "{} value {} listed twice", kind, desc.value
        );
      }
    }
  }
}
