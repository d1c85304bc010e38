//! Shader asset record
//!
//! In-memory representation of one shader asset: the variant flag sets, the
//! fixed header, the parsed section description and the owning aggregate.

mod variant;
mod header;
mod description;
mod shader_asset;

pub use variant::{ShadingLanguage, CompiledBytecodeKind};
pub use header::{
    AssetHeader,
    ASSET_MAGIC, ASSET_FORMAT_VERSION, ASSET_HEADER_SIZE, ENTRY_PREFIX_SIZE,
};
pub use description::{AssetDescription, CompiledBlock};
pub use shader_asset::{
    ShaderAsset, ShaderAssetDesc, SelectedVariant, SectionPresence,
    source_code_presence, compiled_data_presence,
    has_source_code, has_compiled_data,
};
