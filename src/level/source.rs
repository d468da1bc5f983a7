use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::Vec2;
use crate::level::descriptor::{END_MARKER, LevelDescriptor, START_MARKER};
use crate::level::errors::{LevelFormatError, LevelLoadError};

/// Anything that can hand decoded levels to the engine.
pub trait LevelSource {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<LevelDescriptor>, LevelLoadError>;
}

/// Splits a level file into its `+++` ... `---` blocks. Text between blocks is ignored.
pub fn split_level_blocks(text: &str) -> Result<Vec<String>, LevelLoadError> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed == START_MARKER {
            if current.is_some() {
                return Err(LevelLoadError::Format {
                    index: blocks.len() + 1,
                    source: LevelFormatError::MissingEndMarker,
                });
            }
            current = Some(format!("{}\n", START_MARKER));
        } else if trimmed == END_MARKER {
            let Some(mut block) = current.take() else {
                return Err(LevelLoadError::Format {
                    index: blocks.len() + 1,
                    source: LevelFormatError::MissingStartMarker,
                });
            };
            block.push_str(END_MARKER);
            blocks.push(block);
        } else if let Some(block) = current.as_mut() {
            block.push_str(trimmed);
            block.push('\n');
        }
    }

    if current.is_some() {
        return Err(LevelLoadError::Format {
            index: blocks.len() + 1,
            source: LevelFormatError::MissingEndMarker,
        });
    }
    Ok(blocks)
}

/// Parses every block of a level file. Indices in errors are 1-based.
pub fn parse_level_file(text: &str) -> Result<Vec<LevelDescriptor>, LevelLoadError> {
    split_level_blocks(text)?
        .iter()
        .enumerate()
        .map(|(i, block)| {
            LevelDescriptor::parse(block).map_err(|source| LevelLoadError::Format { index: i + 1, source })
        })
        .collect()
}

pub struct FileLevelSource {
    path: PathBuf,
}

impl FileLevelSource {
    pub fn new(path: impl Into<PathBuf>) -> FileLevelSource {
        FileLevelSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LevelSource for FileLevelSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("level file")
    }

    fn load(&self) -> Result<Vec<LevelDescriptor>, LevelLoadError> {
        let text = fs::read_to_string(&self.path).map_err(|source| LevelLoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_level_file(&text)
    }
}

/// A level defined in code rather than in a level file.
pub struct BuiltinLevel {
    pub name: &'static str,
    pub player: Vec2,
    pub rows: &'static [&'static str],
}

impl BuiltinLevel {
    pub fn descriptor(&self) -> Result<LevelDescriptor, LevelFormatError> {
        let codes = self.rows.iter().map(|row| row.chars().collect()).collect();
        let cols = self.rows.first().map_or(0, |row| row.chars().count());
        LevelDescriptor::new(self.rows.len() as i32, cols as i32, self.player, codes)
    }
}

pub static BUILTIN_LEVELS: &[BuiltinLevel] = &[BuiltinLevel {
    name: "Warehouse",
    player: Vec2 { i: 1, j: 8 },
    rows: &[
        "wwwwwwwwwwwwwwww",
        "wwwwwwwggwwwwwww",
        "wwwwwwwccggwwwww",
        "wwwwwwwgc*gwwwww",
        "wwwww***gwwwwwww",
        "wwwwwwwcgwwwwwww",
        "wwwwwwwggwwwwwww",
        "wwwwwwwwwwwwwwww",
        "wwwwwwwwwwwwwwww",
        "wwwwwwwwwwwwwwww",
    ],
}];

pub struct BuiltinLevelSource;

impl LevelSource for BuiltinLevelSource {
    fn name(&self) -> &str {
        "built-in levels"
    }

    fn load(&self) -> Result<Vec<LevelDescriptor>, LevelLoadError> {
        BUILTIN_LEVELS
            .iter()
            .enumerate()
            .map(|(i, level)| {
                level.descriptor().map_err(|source| LevelLoadError::Format { index: i + 1, source })
            })
            .collect()
    }
}

/// Ordered list of playable levels gathered from several sources.
#[derive(Clone, Debug, Default)]
pub struct LevelCatalog {
    levels: Vec<LevelDescriptor>,
}

impl LevelCatalog {
    /// Sources that fail to load are skipped with a warning; an empty result is an error.
    pub fn from_sources(sources: &[&dyn LevelSource]) -> Result<LevelCatalog, LevelLoadError> {
        let mut levels = Vec::new();
        for source in sources {
            match source.load() {
                Ok(loaded) => {
                    info!(source = source.name(), count = loaded.len(), "loaded levels");
                    levels.extend(loaded);
                }
                Err(err) => {
                    warn!(source = source.name(), error = %err, "skipping level source");
                }
            }
        }

        if levels.is_empty() {
            return Err(LevelLoadError::NoLevels);
        }
        Ok(LevelCatalog { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Clamps a 1-based level number into the catalog's range.
    pub fn clamp_number(&self, number: usize) -> usize {
        number.clamp(1, self.levels.len().max(1))
    }

    /// Levels are numbered from 1.
    pub fn get(&self, number: usize) -> Option<&LevelDescriptor> {
        number.checked_sub(1).and_then(|index| self.levels.get(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDescriptor> {
        self.levels.iter()
    }
}
