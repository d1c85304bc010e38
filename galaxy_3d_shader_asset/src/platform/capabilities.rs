/// Platform capability descriptor (operating system + graphics backend).

use bitflags::bitflags;

bitflags! {
    /// Running platform identity
    ///
    /// A recognized value holds exactly one OS flag and one backend flag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlatformCapabilities: u32 {
        // Operating systems
        const WINDOWS = 1 << 0;
        const LINUX = 1 << 1;
        const MACOS = 1 << 2;
        const IOS = 1 << 3;
        const ANDROID = 1 << 4;

        // Graphics backends
        const DIRECT3D11 = 1 << 16;
        const DIRECT3D12 = 1 << 17;
        const VULKAN = 1 << 18;
        const METAL = 1 << 19;
        const OPENGL = 1 << 20;
    }
}

impl PlatformCapabilities {
    /// Every operating system flag
    pub const OS_MASK: Self = Self::WINDOWS
        .union(Self::LINUX)
        .union(Self::MACOS)
        .union(Self::IOS)
        .union(Self::ANDROID);

    /// Every graphics backend flag
    pub const BACKEND_MASK: Self = Self::DIRECT3D11
        .union(Self::DIRECT3D12)
        .union(Self::VULKAN)
        .union(Self::METAL)
        .union(Self::OPENGL);

    /// Operating system part
    pub fn os(self) -> Self {
        self.intersection(Self::OS_MASK)
    }

    /// Graphics backend part
    pub fn backend(self) -> Self {
        self.intersection(Self::BACKEND_MASK)
    }

    /// Operating system this crate was compiled for, if it is one we know
    pub fn host_os() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::WINDOWS)
        } else if cfg!(target_os = "android") {
            Some(Self::ANDROID)
        } else if cfg!(target_os = "linux") {
            Some(Self::LINUX)
        } else if cfg!(target_os = "ios") {
            Some(Self::IOS)
        } else if cfg!(target_os = "macos") {
            Some(Self::MACOS)
        } else {
            None
        }
    }

    /// Host operating system combined with a backend
    ///
    /// On an unknown host OS only the backend bits are returned, which the
    /// resolver rejects as unsupported.
    pub fn host(backend: Self) -> Self {
        Self::host_os().unwrap_or(Self::empty()) | backend.backend()
    }
}
