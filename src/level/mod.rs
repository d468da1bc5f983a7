mod descriptor;
mod errors;
mod source;

pub use descriptor::{END_MARKER, LevelDescriptor, START_MARKER, decode_tile, encode_tile};
pub use errors::{LevelFormatError, LevelLoadError};
pub use source::{
    BUILTIN_LEVELS, BuiltinLevel, BuiltinLevelSource, FileLevelSource, LevelCatalog, LevelSource, parse_level_file,
    split_level_blocks,
};
