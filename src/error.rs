/// Error types.
///
/// The game rules themselves never fail; only the outer shell does
/// (terminal I/O, reading `config.toml`).

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cell_size must be greater than zero")]
    ZeroCellSize,
    #[error("screen {axis} of {length}px is not a multiple of cell_size {cell_size}")]
    Misaligned { axis: &'static str, length: u32, cell_size: u32 },
    #[error("screen {axis} holds only {cells} cell(s); at least 2 are required")]
    TooFewCells { axis: &'static str, cells: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}
