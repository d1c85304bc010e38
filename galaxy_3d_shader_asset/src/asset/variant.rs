/// Shading languages and compiled bytecode kinds.
///
/// Both are bit-disjoint flag sets. A combination describes "present in this
/// asset" or "wanted by this platform"; a single flag keys one source entry or
/// one compiled block. On disk a single flag is stored as a one-byte tag equal
/// to its bit value.

use bitflags::bitflags;

bitflags! {
    /// Shader source languages
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ShadingLanguage: u32 {
        /// HLSL (Direct3D, also consumed by DXC for SPIR-V)
        const HLSL = 1 << 0;
        /// GLSL (OpenGL / Vulkan)
        const GLSL = 1 << 1;
        /// Metal Shading Language
        const METAL = 1 << 2;
        /// SPIR-V assembly text
        const SPIRV = 1 << 3;
        /// WebGPU Shading Language
        const WGSL = 1 << 4;
    }
}

bitflags! {
    /// Precompiled bytecode formats
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct CompiledBytecodeKind: u32 {
        /// Direct3D 11 bytecode (FXC, shader model 5.x)
        const DXBC = 1 << 0;
        /// Direct3D 12 bytecode (DXC, shader model 6.x)
        const DXIL = 1 << 1;
        /// SPIR-V binary
        const SPIRV = 1 << 2;
        /// Compiled Metal library
        const METAL = 1 << 3;
    }
}

const LANGUAGE_NAMES: [(ShadingLanguage, &str); 5] = [
    (ShadingLanguage::HLSL, "HLSL"),
    (ShadingLanguage::GLSL, "GLSL"),
    (ShadingLanguage::METAL, "Metal"),
    (ShadingLanguage::SPIRV, "SPIR-V"),
    (ShadingLanguage::WGSL, "WGSL"),
];

const KIND_NAMES: [(CompiledBytecodeKind, &str); 4] = [
    (CompiledBytecodeKind::DXBC, "DXBC"),
    (CompiledBytecodeKind::DXIL, "DXIL"),
    (CompiledBytecodeKind::SPIRV, "SPIR-V"),
    (CompiledBytecodeKind::METAL, "Metal"),
];

impl ShadingLanguage {
    /// Every known language
    pub const ALL: Self = Self::all();

    /// True when exactly one known language is set
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1 && Self::all().contains(self)
    }

    /// On-disk tag of a single language
    pub fn tag(self) -> Option<u8> {
        if self.is_single() {
            u8::try_from(self.bits()).ok()
        } else {
            None
        }
    }

    /// Language for an on-disk tag, `None` for tags this build does not know
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_bits(tag as u32).filter(|language| language.is_single())
    }

    /// Human readable name of a single language
    pub fn name(self) -> &'static str {
        LANGUAGE_NAMES
            .iter()
            .find(|(language, _)| *language == self)
            .map_or("<combination>", |(_, name)| *name)
    }
}

impl CompiledBytecodeKind {
    /// Every known bytecode kind
    pub const ALL: Self = Self::all();

    /// True when exactly one known kind is set
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1 && Self::all().contains(self)
    }

    /// On-disk tag of a single kind
    pub fn tag(self) -> Option<u8> {
        if self.is_single() {
            u8::try_from(self.bits()).ok()
        } else {
            None
        }
    }

    /// Kind for an on-disk tag, `None` for tags this build does not know
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_bits(tag as u32).filter(|kind| kind.is_single())
    }

    /// Human readable name of a single kind
    pub fn name(self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("<combination>", |(_, name)| *name)
    }
}

#[cfg(test)]
#[path = "variant_tests.rs"]
mod tests;
