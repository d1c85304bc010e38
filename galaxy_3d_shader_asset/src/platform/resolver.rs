/// Table-driven platform resolution.
///
/// Maps a platform to the bytecode kinds its graphics backend can load and to
/// the source language used when falling back to just-in-time compilation.
/// Unrecognized platforms fail instead of defaulting: loading the wrong
/// bytecode would only fail later, inside the graphics layer.

use crate::asset::{CompiledBytecodeKind, ShadingLanguage};
use crate::error::{Error, Result};
use crate::platform::PlatformCapabilities;

/// One row of the resolution table
struct PlatformProfile {
    platform: PlatformCapabilities,
    /// Acceptable kinds, most preferred first
    kinds: &'static [CompiledBytecodeKind],
    language: ShadingLanguage,
}

const D3D11_KINDS: &[CompiledBytecodeKind] = &[CompiledBytecodeKind::DXBC];
const D3D12_KINDS: &[CompiledBytecodeKind] = &[CompiledBytecodeKind::DXIL, CompiledBytecodeKind::DXBC];
const SPIRV_KINDS: &[CompiledBytecodeKind] = &[CompiledBytecodeKind::SPIRV];
const METAL_KINDS: &[CompiledBytecodeKind] = &[CompiledBytecodeKind::METAL];

const PLATFORM_TABLE: &[PlatformProfile] = &[
    PlatformProfile {
        platform: PlatformCapabilities::WINDOWS.union(PlatformCapabilities::DIRECT3D11),
        kinds: D3D11_KINDS,
        language: ShadingLanguage::HLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::WINDOWS.union(PlatformCapabilities::DIRECT3D12),
        kinds: D3D12_KINDS,
        language: ShadingLanguage::HLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::WINDOWS.union(PlatformCapabilities::VULKAN),
        kinds: SPIRV_KINDS,
        language: ShadingLanguage::GLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::LINUX.union(PlatformCapabilities::VULKAN),
        kinds: SPIRV_KINDS,
        language: ShadingLanguage::GLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::ANDROID.union(PlatformCapabilities::VULKAN),
        kinds: SPIRV_KINDS,
        language: ShadingLanguage::GLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::WINDOWS.union(PlatformCapabilities::OPENGL),
        kinds: SPIRV_KINDS,
        language: ShadingLanguage::GLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::LINUX.union(PlatformCapabilities::OPENGL),
        kinds: SPIRV_KINDS,
        language: ShadingLanguage::GLSL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::MACOS.union(PlatformCapabilities::METAL),
        kinds: METAL_KINDS,
        language: ShadingLanguage::METAL,
    },
    PlatformProfile {
        platform: PlatformCapabilities::IOS.union(PlatformCapabilities::METAL),
        kinds: METAL_KINDS,
        language: ShadingLanguage::METAL,
    },
];

/// What a platform needs from a shader asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformRequirements {
    /// Platform these requirements were resolved for
    pub platform: PlatformCapabilities,
    /// Every bytecode kind the backend can load (never empty)
    pub required_kinds: CompiledBytecodeKind,
    /// `required_kinds` in preference order
    pub kind_preference: &'static [CompiledBytecodeKind],
    /// Source language for just-in-time compilation
    pub preferred_language: ShadingLanguage,
}

impl PlatformRequirements {
    /// Most preferred required kind among `available`
    pub fn preferred_kind_in(&self, available: CompiledBytecodeKind) -> Option<CompiledBytecodeKind> {
        self.kind_preference
            .iter()
            .copied()
            .find(|kind| available.contains(*kind))
    }
}

/// Resolve the requirements of a platform
///
/// # Errors
///
/// Returns `PlatformUnsupported` unless `platform` is exactly one of the
/// table entries (one OS flag, one backend flag, known combination).
pub fn resolve_platform(platform: PlatformCapabilities) -> Result<PlatformRequirements> {
    PLATFORM_TABLE
        .iter()
        .find(|profile| profile.platform == platform)
        .map(|profile| PlatformRequirements {
            platform,
            required_kinds: profile
                .kinds
                .iter()
                .fold(CompiledBytecodeKind::empty(), |acc, kind| acc | *kind),
            kind_preference: profile.kinds,
            preferred_language: profile.language,
        })
        .ok_or(Error::PlatformUnsupported(platform))
}

/// Every platform the resolver recognizes
pub fn supported_platforms() -> impl Iterator<Item = PlatformCapabilities> {
    PLATFORM_TABLE.iter().map(|profile| profile.platform)
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
