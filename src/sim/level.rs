/// Level loader.
///
/// ## Sources (priority order):
///   1. An explicit path (file or directory) given by the driver
///   2. `levels/` directory (individual `.txt` files, sorted by file name)
///   3. Built-in embedded levels
///
/// ## Pack format:
///   ```text
///   ## Pack Name
///   ## Author: name
///   ---
///   # Level 1 - Name
///   <map rows>
///   ---
///   # Level 2 - Name
///   <map rows>
///   ```
///
/// Levels are separated by a line containing only `---`.
/// Pack metadata lines (before the first separator) are skipped.
///
/// ## Single-level format (`.txt`):
///   Optional line 1: `# Level Name`
///   Lines: map rows
///
/// ## Tile legend:
///   'w' = Wall                'W' = Big wall (2x2, top-left)
///   'f' = Force field         'F' = Big force field (2x2, top-left)
///   'e' = Elevator            'g' = Goal
///   's' = Start (exactly one) '.' = Covered by a big object
///   ' ' = Empty

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::GameConfig;
use crate::domain::geom::Rect;
use crate::domain::object::Object;
use crate::domain::tile::Tile;
use crate::sim::field::Field;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level \"{level}\" has no start cell")]
    MissingStart { level: String },
    #[error("level \"{level}\" has two start cells: {first:?} and {second:?}")]
    MultipleStarts {
        level: String,
        first: (i32, i32),
        second: (i32, i32),
    },
    #[error("level \"{level}\" has no rows")]
    Empty { level: String },
    #[error("level index {index} out of range ({count} levels)")]
    NoSuchLevel { index: usize, count: usize },
    #[error("no levels found in {}", .0.display())]
    NoLevels(PathBuf),
    #[error("could not read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Level text as authored: a name plus grid rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDef {
    pub name: String,
    pub rows: Vec<String>,
}

impl LevelDef {
    pub fn new(name: &str, rows: &[&str]) -> Self {
        LevelDef {
            name: name.to_string(),
            rows: rows.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

// ══════════════════════════════════════════════════════════════
// Grid → Field
// ══════════════════════════════════════════════════════════════

/// Convert a level's grid into a Field. Objects are inserted in row-major
/// order. Exactly one start cell is required. The Field is bounded by the
/// grid, widest row first.
pub fn build_field(def: &LevelDef) -> Result<Field, LevelError> {
    if def.rows.is_empty() {
        return Err(LevelError::Empty { level: def.name.clone() });
    }

    let mut objects = vec![];
    let mut start: Option<(i32, i32)> = None;

    for (j, row) in def.rows.iter().enumerate() {
        for (i, ch) in row.chars().enumerate() {
            let (x, y) = (i as i32, j as i32);
            let tile = Tile::from_char(ch);
            match tile {
                Tile::WallSmall | Tile::WallBig => objects.push(Object::wall(x, y, tile.is_big())),
                Tile::FFSmall | Tile::FFBig => objects.push(Object::force_field(x, y, tile.is_big())),
                Tile::Elevator => objects.push(Object::elevator(x, y)),
                Tile::Goal => objects.push(Object::goal(x, y)),
                Tile::Start => {
                    if let Some(first) = start {
                        return Err(LevelError::MultipleStarts {
                            level: def.name.clone(),
                            first,
                            second: (x, y),
                        });
                    }
                    start = Some((x, y));
                }
                Tile::Empty | Tile::Part => {}
            }
        }
    }

    let start = start.ok_or_else(|| LevelError::MissingStart { level: def.name.clone() })?;
    let bounds = Rect::from_tiles(0, 0, def.width() as i32, def.height() as i32);
    log::debug!(
        "built level \"{}\": {} objects, start {:?}, {}x{} px",
        def.name,
        objects.len(),
        start,
        bounds.width(),
        bounds.height()
    );
    Ok(Field::new(objects, start).with_bounds(bounds))
}

/// Shorthand for tests and tools: build a Field from bare rows.
pub fn field_from_rows(rows: &[&str]) -> Result<Field, LevelError> {
    build_field(&LevelDef::new("inline", rows))
}

// ══════════════════════════════════════════════════════════════
// Public loading API
// ══════════════════════════════════════════════════════════════

/// Levels for a normal run: the configured directory if it holds any
/// level files, the embedded set otherwise.
pub fn load_levels(config: &GameConfig) -> Vec<LevelDef> {
    let dir = &config.levels_dir;
    if dir.is_dir() {
        match load_from_directory(dir) {
            Ok(levels) => {
                log::info!("loaded {} levels from {}", levels.len(), dir.display());
                return levels;
            }
            Err(e) => log::warn!("{e}; using built-in levels"),
        }
    }
    embedded_levels()
}

/// Load an explicit path: a directory of `.txt` files, a pack file, or a
/// single level file.
pub fn load_path(path: &Path) -> Result<Vec<LevelDef>, LevelError> {
    if path.is_dir() {
        return load_from_directory(path);
    }
    let content = read(path)?;
    let levels = if content.lines().any(|l| l.trim() == "---") {
        parse_pack_levels(&content)
    } else {
        parse_level_file(&content).into_iter().collect()
    };
    if levels.is_empty() {
        return Err(LevelError::NoLevels(path.to_path_buf()));
    }
    Ok(levels)
}

// ══════════════════════════════════════════════════════════════
// Text parsing
// ══════════════════════════════════════════════════════════════

/// Parse all levels from a pack file.
pub fn parse_pack_levels(content: &str) -> Vec<LevelDef> {
    let mut levels = vec![];
    let mut current_section = String::new();
    let mut in_levels = false;

    for line in content.lines() {
        if line.trim() == "---" {
            if in_levels {
                levels.extend(parse_level_file(&current_section));
            }
            current_section.clear();
            in_levels = true;
            continue;
        }
        if !in_levels {
            continue;
        }
        current_section.push_str(line);
        current_section.push('\n');
    }

    if in_levels {
        levels.extend(parse_level_file(&current_section));
    }
    levels
}

/// Parse a single level from text content. Returns `None` when the text
/// holds no grid rows.
pub fn parse_level_file(content: &str) -> Option<LevelDef> {
    let mut name = String::new();
    let mut rows: Vec<String> = vec![];

    for line in content.lines() {
        if let Some(rest) = line.strip_prefix('#') {
            if name.is_empty() {
                name = rest.trim_start_matches('#').trim().to_string();
            }
            continue;
        }
        rows.push(line.trim_end_matches('\r').to_string());
    }

    while rows.first().map_or(false, |r| r.trim().is_empty()) {
        rows.remove(0);
    }
    while rows.last().map_or(false, |r| r.trim().is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return None;
    }
    if name.is_empty() {
        name = "Unnamed Level".to_string();
    }
    Some(LevelDef { name, rows })
}

// ══════════════════════════════════════════════════════════════
// Directory loading (individual .txt files)
// ══════════════════════════════════════════════════════════════

fn load_from_directory(dir: &Path) -> Result<Vec<LevelDef>, LevelError> {
    let entries = std::fs::read_dir(dir).map_err(|source| LevelError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |e| e == "txt"))
        .collect();
    files.sort();

    let mut levels = vec![];
    for path in files {
        match read(&path) {
            Ok(content) => match parse_level_file(&content) {
                Some(def) => levels.push(def),
                None => log::warn!("{} holds no level rows, skipped", path.display()),
            },
            Err(e) => log::warn!("{e}"),
        }
    }

    if levels.is_empty() {
        return Err(LevelError::NoLevels(dir.to_path_buf()));
    }
    Ok(levels)
}

fn read(path: &Path) -> Result<String, LevelError> {
    std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ══════════════════════════════════════════════════════════════
// Embedded fallback levels
// ══════════════════════════════════════════════════════════════

pub fn embedded_levels() -> Vec<LevelDef> {
    vec![
        LevelDef::new("1 - First Steps", &[
            "wwwwwwwwwwwwwwww",
            "w              w",
            "w              w",
            "w s         g  w",
            "wwwwwwwwwwwwwwww",
        ]),
        LevelDef::new("2 - Switch Bridge", &[
            "wwwwwwwwwwwwwwww",
            "w              w",
            "w s         g  w",
            "wwwwwffwwwwwwwww",
            "wwwww  wwwwwwwww",
            "wwwwwwwwwwwwwwww",
        ]),
        LevelDef::new("3 - Lift", &[
            "wwwwwwwwwwwwwwww",
            "w              w",
            "w          g   w",
            "w    ewwwwwwwwww",
            "w    e         w",
            "w s  e         w",
            "wwwwwwwwwwwwwwww",
        ]),
        LevelDef::new("4 - Gallery", &[
            "wwwwwwwwwwwwwwww",
            "w              w",
            "w              w",
            "w              w",
            "w              w",
            "w              w",
            "w              w",
            "w              w",
            "w            g w",
            "weW.F.F.F.F.W. w",
            "we............ w",
            "we             w",
            "we             w",
            "we            sw",
            "wwwwwwwwwwwwwwww",
        ]),
    ]
}
