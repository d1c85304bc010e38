/*!
# Galaxy 3D Shader Asset

Binary shader asset container and its platform-aware import/export pipeline.

One asset file packages shader source code (several shading languages) and
precompiled bytecode (several target formats). At load time the importer
picks the single variant the running platform can use and reads nothing else.

## Architecture

- **Asset**: flag sets, the fixed header, the parsed description and `ShaderAsset`
- **Codec**: little-endian container encoding with partial decoding
- **Platform**: capability flags and the table-driven resolver
- **Pipeline**: `ShaderImporter` / `ShaderExporter`, the only stream-facing layer

All operations are reentrant. The only shared collaborator is the injected
`Logger`, which must be safe for concurrent use.
*/

// Internal modules
mod error;
pub mod log;
pub mod asset;
pub mod codec;
pub mod platform;
pub mod pipeline;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Import/export entry points
    pub use crate::pipeline::{ShaderImporter, ShaderExporter};

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, FacadeLogger, NullLogger};
    }

    // Asset record sub-module
    pub mod asset {
        pub use crate::asset::*;
    }

    // Container codec sub-module
    pub mod codec {
        pub use crate::codec::*;
    }

    // Platform resolver sub-module
    pub mod platform {
        pub use crate::platform::*;
    }

    // Import/export sub-module
    pub mod pipeline {
        pub use crate::pipeline::*;
    }
}
