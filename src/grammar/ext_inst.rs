/*!
  Instruction names of the extended instruction sets. An `OpExtInst` names its instruction by
  number, so disassembly needs number to name, and assembly needs name to number; each set is
  kept as a bidirectional map.
*/

use bimap::BiMap;
use lazy_static::lazy_static;

use super::ExtInstSet;
use crate::bytecode::Word;

static GLSL_STD_450_NAMES: &[&str] = &[
  "Round", "RoundEven", "Trunc", "FAbs", "SAbs", "FSign", "SSign", "Floor", "Ceil", "Fract",
  "Radians", "Degrees", "Sin", "Cos", "Tan", "Asin", "Acos", "Atan", "Sinh", "Cosh", "Tanh",
  "Asinh", "Acosh", "Atanh", "Atan2", "Pow", "Exp", "Log", "Exp2", "Log2", "Sqrt",
  "InverseSqrt", "Determinant", "MatrixInverse", "Modf", "ModfStruct", "FMin", "UMin", "SMin",
  "FMax", "UMax", "SMax", "FClamp", "UClamp", "SClamp", "FMix", "IMix", "Step", "SmoothStep",
  "Fma", "Frexp", "FrexpStruct", "Ldexp", "PackSnorm4x8", "PackUnorm4x8", "PackSnorm2x16",
  "PackUnorm2x16", "PackHalf2x16", "PackDouble2x32", "UnpackSnorm2x16", "UnpackUnorm2x16",
  "UnpackHalf2x16", "UnpackSnorm4x8", "UnpackUnorm4x8", "UnpackDouble2x32", "Length",
  "Distance", "Cross", "Normalize", "FaceForward", "Reflect", "Refract", "FindILsb",
  "FindSMsb", "FindUMsb", "InterpolateAtCentroid", "InterpolateAtSample",
  "InterpolateAtOffset", "NMin", "NMax", "NClamp",
];

static OPENCL_STD_MATH_NAMES: &[&str] = &[
  "acos", "acosh", "acospi", "asin", "asinh", "asinpi", "atan", "atan2", "atanh", "atanpi",
  "atan2pi", "cbrt", "ceil", "copysign", "cos", "cosh", "cospi", "erfc", "erf", "exp", "exp2",
  "exp10", "expm1", "fabs", "fdim", "floor", "fma", "fmax", "fmin", "fmod", "fract", "frexp",
  "hypot", "ilogb", "ldexp", "lgamma", "lgamma_r", "log", "log2", "log10", "log1p", "logb",
  "mad", "maxmag", "minmag", "modf", "nan", "nextafter", "pow", "pown", "powr", "remainder",
  "remquo", "rint", "rootn", "round", "rsqrt", "sin", "sincos", "sinh", "sinpi", "sqrt", "tan",
  "tanh", "tanpi", "tgamma", "trunc",
];

lazy_static! {
  // GLSL.std.450 numbers its instructions from 1.
  static ref GLSL_STD_450: BiMap<Word, String> =
    GLSL_STD_450_NAMES
      .iter()
      .enumerate()
      .map(|(i, name)| (i as Word + 1, name.to_string()))
      .collect();

  static ref OPENCL_STD: BiMap<Word, String> = {
    let mut table: BiMap<Word, String> =
      OPENCL_STD_MATH_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (i as Word, name.to_string()))
        .collect();
    table.insert(184, "printf".to_string());
    table.insert(185, "prefetch".to_string());
    table
  };
}

fn table(set: ExtInstSet) -> &'static BiMap<Word, String> {
  match set {
    ExtInstSet::GlslStd450 => &*GLSL_STD_450,
    ExtInstSet::OpenClStd  => &*OPENCL_STD,
  }
}

pub(super) fn ext_inst_name(set: ExtInstSet, index: Word) -> Option<&'static str> {
  table(set).get_by_left(&index).map(String::as_str)
}

/// Number of the named instruction of an extended instruction set.
pub fn ext_inst_index(set: ExtInstSet, name: &str) -> Option<Word> {
  table(set).get_by_right(&name.to_string()).copied()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn glsl_numbering_starts_at_one() {
    assert_eq!(ext_inst_name(ExtInstSet::GlslStd450, 1), Some("Round"));
    assert_eq!(ext_inst_name(ExtInstSet::GlslStd450, 31), Some("Sqrt"));
    assert_eq!(ext_inst_name(ExtInstSet::GlslStd450, 81), Some("NClamp"));
    assert_eq!(ext_inst_name(ExtInstSet::GlslStd450, 0), None);
    assert_eq!(ext_inst_name(ExtInstSet::GlslStd450, 82), None);
  }

  #[test]
  fn opencl_numbering() {
    assert_eq!(ext_inst_name(ExtInstSet::OpenClStd, 0), Some("acos"));
    assert_eq!(ext_inst_name(ExtInstSet::OpenClStd, 66), Some("trunc"));
    assert_eq!(ext_inst_name(ExtInstSet::OpenClStd, 184), Some("printf"));
  }

  #[test]
  fn names_map_back_to_numbers() {
    assert_eq!(ext_inst_index(ExtInstSet::GlslStd450, "Sqrt"), Some(31));
    assert_eq!(ext_inst_index(ExtInstSet::OpenClStd, "sqrt"), Some(61));
    assert_eq!(ext_inst_index(ExtInstSet::OpenClStd, "Sqrt"), None);
  }
}
