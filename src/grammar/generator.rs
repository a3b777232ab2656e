use crate::bytecode::Word;

/// Registered generator ids. Anything else is reported as unknown.
pub(super) fn generator_name(generator: Word) -> &'static str {
  match generator {
    0  => "Khronos",
    1  => "LunarG",
    2  => "Valve",
    3  => "Codeplay",
    4  => "NVIDIA",
    5  => "ARM",
    6  => "Khronos LLVM/SPIR-V Translator",
    7  => "Khronos SPIR-V Tools Assembler",
    8  => "Khronos Glslang Reference Front End",
    9  => "Qualcomm",
    10 => "AMD",
    11 => "Intel",
    _  => "Unknown"
  }
}
