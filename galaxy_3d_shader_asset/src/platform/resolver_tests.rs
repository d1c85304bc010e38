//! Unit tests for resolver.rs and capabilities.rs

use crate::asset::{CompiledBytecodeKind, ShadingLanguage};
use crate::error::Error;
use crate::platform::{resolve_platform, supported_platforms, PlatformCapabilities};

// ============================================================================
// RESOLUTION TABLE
// ============================================================================

#[test]
fn test_resolve_windows_d3d11() {
    let req = resolve_platform(PlatformCapabilities::WINDOWS | PlatformCapabilities::DIRECT3D11).unwrap();
    assert_eq!(req.required_kinds, CompiledBytecodeKind::DXBC);
    assert_eq!(req.preferred_language, ShadingLanguage::HLSL);
}

#[test]
fn test_resolve_windows_d3d12_prefers_dxil() {
    let req = resolve_platform(PlatformCapabilities::WINDOWS | PlatformCapabilities::DIRECT3D12).unwrap();
    assert_eq!(req.required_kinds, CompiledBytecodeKind::DXIL | CompiledBytecodeKind::DXBC);
    assert_eq!(req.kind_preference, &[CompiledBytecodeKind::DXIL, CompiledBytecodeKind::DXBC]);
    assert_eq!(req.preferred_language, ShadingLanguage::HLSL);
}

#[test]
fn test_resolve_vulkan_platforms() {
    for os in [PlatformCapabilities::WINDOWS, PlatformCapabilities::LINUX, PlatformCapabilities::ANDROID] {
        let req = resolve_platform(os | PlatformCapabilities::VULKAN).unwrap();
        assert_eq!(req.required_kinds, CompiledBytecodeKind::SPIRV);
        assert_eq!(req.preferred_language, ShadingLanguage::GLSL);
    }
}

#[test]
fn test_resolve_opengl_platforms() {
    for os in [PlatformCapabilities::WINDOWS, PlatformCapabilities::LINUX] {
        let req = resolve_platform(os | PlatformCapabilities::OPENGL).unwrap();
        assert_eq!(req.required_kinds, CompiledBytecodeKind::SPIRV);
        assert_eq!(req.preferred_language, ShadingLanguage::GLSL);
    }
}

#[test]
fn test_resolve_metal_platforms() {
    for os in [PlatformCapabilities::MACOS, PlatformCapabilities::IOS] {
        let req = resolve_platform(os | PlatformCapabilities::METAL).unwrap();
        assert_eq!(req.required_kinds, CompiledBytecodeKind::METAL);
        assert_eq!(req.preferred_language, ShadingLanguage::METAL);
    }
}

#[test]
fn test_every_supported_platform_resolves() {
    let platforms: Vec<PlatformCapabilities> = supported_platforms().collect();
    assert_eq!(platforms.len(), 9);
    for platform in platforms {
        let req = resolve_platform(platform).unwrap();
        assert_eq!(req.platform, platform);
        assert!(!req.required_kinds.is_empty());
        assert!(req.preferred_language.is_single());
        assert_eq!(platform.os().bits().count_ones(), 1);
        assert_eq!(platform.backend().bits().count_ones(), 1);
    }
}

// ============================================================================
// UNSUPPORTED PLATFORMS
// ============================================================================

#[test]
fn test_unknown_combinations_are_unsupported() {
    let rejected = [
        PlatformCapabilities::empty(),
        PlatformCapabilities::WINDOWS,
        PlatformCapabilities::VULKAN,
        PlatformCapabilities::LINUX | PlatformCapabilities::METAL,
        PlatformCapabilities::MACOS | PlatformCapabilities::DIRECT3D12,
        PlatformCapabilities::WINDOWS | PlatformCapabilities::DIRECT3D11 | PlatformCapabilities::DIRECT3D12,
        PlatformCapabilities::WINDOWS | PlatformCapabilities::LINUX | PlatformCapabilities::VULKAN,
    ];
    for platform in rejected {
        assert_eq!(resolve_platform(platform), Err(Error::PlatformUnsupported(platform)));
    }
}

// ============================================================================
// PREFERENCE
// ============================================================================

#[test]
fn test_preferred_kind_in() {
    let req = resolve_platform(PlatformCapabilities::WINDOWS | PlatformCapabilities::DIRECT3D12).unwrap();

    assert_eq!(
        req.preferred_kind_in(CompiledBytecodeKind::DXBC | CompiledBytecodeKind::DXIL),
        Some(CompiledBytecodeKind::DXIL)
    );
    assert_eq!(
        req.preferred_kind_in(CompiledBytecodeKind::DXBC | CompiledBytecodeKind::SPIRV),
        Some(CompiledBytecodeKind::DXBC)
    );
    assert_eq!(req.preferred_kind_in(CompiledBytecodeKind::METAL), None);
}

// ============================================================================
// CAPABILITIES
// ============================================================================

#[test]
fn test_capability_masks() {
    let platform = PlatformCapabilities::LINUX | PlatformCapabilities::VULKAN;
    assert_eq!(platform.os(), PlatformCapabilities::LINUX);
    assert_eq!(platform.backend(), PlatformCapabilities::VULKAN);
    assert!(PlatformCapabilities::OS_MASK.intersection(PlatformCapabilities::BACKEND_MASK).is_empty());
}

#[test]
fn test_host_keeps_only_backend_bits() {
    let platform = PlatformCapabilities::host(PlatformCapabilities::VULKAN | PlatformCapabilities::MACOS);
    assert_eq!(platform.backend(), PlatformCapabilities::VULKAN);
    match PlatformCapabilities::host_os() {
        Some(os) => assert_eq!(platform.os(), os),
        None => assert!(platform.os().is_empty()),
    }
}
