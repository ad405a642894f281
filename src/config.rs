/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub levels_dir: PathBuf,
    pub start_level: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
    pub turbo_factor: u32,   // ticks per frame while turbo is on
    pub max_ticks: u64,      // driver gives up after this many ticks
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_turbo_factor")]
    turbo_factor: u32,
    #[serde(default = "default_max_ticks")]
    max_ticks: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
    #[serde(default)]
    start_level: usize,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 16 }      // ~60 ticks per second
fn default_turbo_factor() -> u32 { 5 }
fn default_max_ticks() -> u64 { 20_000 }
fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            turbo_factor: default_turbo_factor(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            levels_dir: default_levels_dir(),
            start_level: 0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &[])
    }
}

// ── Loading ──

const CONFIG_FILE: &str = "config.toml";

impl GameConfig {
    /// Load `config.toml` from the first search root that has one.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let roots = search_roots();
        let (toml_cfg, home) = read_config(&roots);
        // The directory holding config.toml is searched for levels first.
        let roots: Vec<PathBuf> = home.into_iter().chain(roots).collect();
        GameConfig::from_toml(toml_cfg, &roots)
    }

    /// Parse config text directly. Relative `levels_dir` stays relative.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(GameConfig::from_toml(toml_cfg, &[]))
    }

    fn from_toml(toml_cfg: TomlConfig, roots: &[PathBuf]) -> Self {
        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms,
                turbo_factor: toml_cfg.speed.turbo_factor.max(1),
                max_ticks: toml_cfg.speed.max_ticks,
            },
            levels_dir: resolve_levels_dir(&toml_cfg.general.levels_dir, roots),
            start_level: toml_cfg.general.start_level,
        }
    }
}

/// Where a tapwalk install keeps its files: beside the binary, then the
/// working directory.
fn search_roots() -> Vec<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .map(|exe| exe.canonicalize().unwrap_or(exe))
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();

    let mut roots: Vec<PathBuf> = exe_dir.into_iter().chain(cwd).collect();
    roots.dedup();
    if roots.is_empty() {
        roots.push(PathBuf::from("."));
    }
    roots
}

/// Parse the first `config.toml` found under `roots` and return the root it
/// came from. A broken file is reported and replaced by defaults; later
/// roots are not consulted.
fn read_config(roots: &[PathBuf]) -> (TomlConfig, Option<PathBuf>) {
    let Some(home) = roots.iter().find(|d| d.join(CONFIG_FILE).is_file()) else {
        log::debug!("no {CONFIG_FILE} found; using defaults");
        return (TomlConfig::default(), None);
    };
    let path = home.join(CONFIG_FILE);
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| toml::from_str::<TomlConfig>(&text).map_err(|e| e.to_string()));

    match parsed {
        Ok(cfg) => {
            log::info!("config loaded from {}", path.display());
            (cfg, Some(home.clone()))
        }
        Err(e) => {
            log::warn!("{}: {e}; using default settings", path.display());
            (TomlConfig::default(), Some(home.clone()))
        }
    }
}

/// Absolute paths are taken as-is; a relative one names the first existing
/// directory under `roots`, or stays relative when none exists.
fn resolve_levels_dir(levels_dir: &str, roots: &[PathBuf]) -> PathBuf {
    let path = PathBuf::from(levels_dir);
    if path.is_absolute() {
        return path;
    }
    roots
        .iter()
        .map(|root| root.join(&path))
        .find(|candidate| candidate.is_dir())
        .unwrap_or(path)
}
