/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::draw::Palette;
use crate::domain::grid::Grid;
use crate::error::ConfigError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub grid: Grid,
    pub speed: SpeedConfig,
    pub palette: Palette,
    pub gamepad: GamepadConfig,
    /// Fixed RNG seed for food placement; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub ticks_per_second: u32,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    screen: TomlScreen,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    colors: TomlColors,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlScreen {
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
    #[serde(default = "default_cell_size")]
    cell_size: u32,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tps")]
    ticks_per_second: u32,
}

#[derive(Deserialize, Debug)]
struct TomlColors {
    #[serde(default = "default_background")]
    background: [u8; 3],
    #[serde(default = "default_border")]
    border: [u8; 3],
    #[serde(default = "default_food")]
    food: [u8; 3],
    #[serde(default = "default_snake")]
    snake: [u8; 3],
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    log_file: Option<String>,
}

// ── Defaults ──

fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }
fn default_cell_size() -> u32 { 20 }   // 32 x 24 cells
fn default_tps() -> u32 { 15 }

fn default_background() -> [u8; 3] { [0, 0, 0] }
fn default_border() -> [u8; 3] { [93, 216, 228] }
fn default_food() -> [u8; 3] { [255, 0, 0] }
fn default_snake() -> [u8; 3] { [0, 255, 0] }

fn default_restart() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlScreen {
    fn default() -> Self {
        TomlScreen {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { ticks_per_second: default_tps() }
    }
}

impl Default for TomlColors {
    fn default() -> Self {
        TomlColors {
            background: default_background(),
            border: default_border(),
            food: default_food(),
            snake: default_snake(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            restart: default_restart(),
            quit: default_quit(),
        }
    }
}

// ── Validation ──

/// Cells along one axis. The axis must divide evenly and hold at least two
/// cells, otherwise a one-cell step could wrap back onto itself.
fn axis_cells(axis: &'static str, length: u32, cell_size: u32) -> Result<i32, ConfigError> {
    if length % cell_size != 0 {
        return Err(ConfigError::Misaligned { axis, length, cell_size });
    }
    let cells = length / cell_size;
    if cells < 2 {
        return Err(ConfigError::TooFewCells { axis, cells });
    }
    Ok(cells as i32)
}

fn build_grid(screen: &TomlScreen) -> Result<Grid, ConfigError> {
    if screen.cell_size == 0 {
        return Err(ConfigError::ZeroCellSize);
    }
    let w = axis_cells("width", screen.width, screen.cell_size)?;
    let h = axis_cells("height", screen.height, screen.cell_size)?;
    Ok(Grid::new(screen.cell_size as i32, w, h))
}

// ── Loading ──

impl Default for GameConfig {
    fn default() -> Self {
        let cell = default_cell_size() as i32;
        GameConfig {
            grid: Grid::new(cell, default_width() as i32 / cell, default_height() as i32 / cell),
            speed: SpeedConfig { ticks_per_second: default_tps() },
            palette: Palette::default(),
            gamepad: GamepadConfig { restart: default_restart(), quit: default_quit() },
            seed: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a config document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Self::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Result<Self, ConfigError> {
        let grid = build_grid(&toml_cfg.screen)?;
        let colors = toml_cfg.colors;

        Ok(GameConfig {
            grid,
            speed: SpeedConfig {
                ticks_per_second: toml_cfg.speed.ticks_per_second.max(1),
            },
            palette: Palette {
                background: colors.background.into(),
                border: colors.border.into(),
                food: colors.food.into(),
                snake: colors.snake.into(),
            },
            gamepad: GamepadConfig {
                restart: toml_cfg.gamepad.restart,
                quit: toml_cfg.gamepad.quit,
            },
            seed: toml_cfg.general.seed,
            log_file: toml_cfg.general.log_file.map(PathBuf::from),
        })
    }

    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    ///
    /// Never fails: a missing file gives defaults; an unreadable or invalid
    /// one gives defaults plus the error, for the caller to log once the
    /// logger is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        let search_dirs = candidate_dirs();

        for dir in &search_dirs {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            let result = std::fs::read_to_string(&path)
                .map_err(|source| ConfigError::Read { path: path.clone(), source })
                .and_then(|text| Self::from_toml_str(&text));
            return match result {
                Ok(cfg) => (cfg, None),
                Err(e) => (Self::default(), Some(e)),
            };
        }

        (Self::default(), None)
    }
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/gridsnake)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/gridsnake");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory
    let sys = PathBuf::from("/usr/share/gridsnake");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
