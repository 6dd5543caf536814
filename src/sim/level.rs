//! Brick grid loaded from a tile-code level file
//!
//! File format: one row per line, whitespace-separated non-negative integers.
//! Tile codes: 0 empty, 1 solid, 2-5 breakable (colored), anything else is an
//! inert breakable brick with the default white tint.

use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec4};

use super::entity::Brick;
use crate::consts::MAX_BRICKS;

/// Reasons a level cannot be loaded
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid tile code {token:?}")]
    InvalidTile { line: usize, token: String },
    #[error("line {line}: expected {expected} columns, found {found}")]
    InconsistentColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{rows}x{columns} grid exceeds the maximum of {max} bricks")]
    TooManyBricks {
        rows: usize,
        columns: usize,
        max: usize,
    },
    #[error("no valid level rows found")]
    Empty,
    #[error("level has no source file to reload from")]
    NoSource,
}

/// Parsed tile codes, row-major.
///
/// Only built by [`TileGrid::parse`], so it is never empty and
/// `tiles.len() == rows * columns <= MAX_BRICKS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    columns: usize,
    tiles: Vec<u32>,
}

impl TileGrid {
    /// Parse level text. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut tiles = Vec::new();
        let mut rows = 0;
        let mut columns = 0;

        for (line_idx, line) in text.lines().enumerate() {
            let line_no = line_idx + 1;
            let mut found = 0;
            for token in line.split_whitespace() {
                let code = token.parse::<u32>().map_err(|_| LevelError::InvalidTile {
                    line: line_no,
                    token: token.to_string(),
                })?;
                tiles.push(code);
                found += 1;
            }
            if found == 0 {
                continue;
            }
            if columns == 0 {
                columns = found;
            } else if found != columns {
                return Err(LevelError::InconsistentColumns {
                    line: line_no,
                    expected: columns,
                    found,
                });
            }
            rows += 1;
        }

        if rows == 0 || columns == 0 {
            return Err(LevelError::Empty);
        }
        if rows * columns > MAX_BRICKS {
            return Err(LevelError::TooManyBricks {
                rows,
                columns,
                max: MAX_BRICKS,
            });
        }

        Ok(Self {
            rows,
            columns,
            tiles,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn from_rows(rows: &[&[u32]]) -> Result<Self, LevelError> {
        let text = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(u32::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self::parse(&text)
    }
}

/// Tint for a breakable tile code
pub fn tile_color(code: u32) -> Vec4 {
    match code {
        2 => Vec4::new(0.2, 0.6, 1.0, 1.0),
        3 => Vec4::new(0.0, 0.7, 0.0, 1.0),
        4 => Vec4::new(0.8, 0.8, 0.4, 1.0),
        5 => Vec4::new(1.0, 0.5, 0.0, 1.0),
        _ => Vec4::ONE,
    }
}

/// A level: dense grid of optional bricks indexed by `row * columns + column`
#[derive(Debug, Clone)]
pub struct Level {
    grid: TileGrid,
    /// Area the grid is stretched over (width, height)
    area: Vec2,
    bricks: Vec<Option<Brick>>,
    source: Option<PathBuf>,
}

impl Level {
    /// Build a level covering `area` from already-parsed tiles
    pub fn from_grid(grid: TileGrid, area: Vec2) -> Self {
        let bricks = build_bricks(&grid, area);
        Self {
            grid,
            area,
            bricks,
            source: None,
        }
    }

    /// Read and parse a level file
    pub fn from_file(path: impl AsRef<Path>, area: Vec2) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let grid = read_grid(path)?;
        let mut level = Self::from_grid(grid, area);
        level.source = Some(path.to_path_buf());
        log::info!(
            "Loaded level {} ({} bricks)",
            path.display(),
            level.brick_count()
        );
        Ok(level)
    }

    /// Replace this level with the contents of `path`.
    ///
    /// On failure the error is logged and the current bricks stay as they were.
    pub fn load(&mut self, path: impl AsRef<Path>, area: Vec2) -> Result<(), LevelError> {
        let path = path.as_ref();
        match read_grid(path) {
            Ok(grid) => {
                self.bricks = build_bricks(&grid, area);
                self.grid = grid;
                self.area = area;
                self.source = Some(path.to_path_buf());
                log::info!(
                    "Loaded level {} ({} bricks)",
                    path.display(),
                    self.brick_count()
                );
                Ok(())
            }
            Err(e) => {
                log::error!("Level load failed for {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Re-read the source file from disk
    pub fn reload(&mut self) -> Result<(), LevelError> {
        let path = self.source.clone().ok_or(LevelError::NoSource)?;
        self.load(path, self.area)
    }

    /// Rebuild every brick from the stored tile grid
    pub fn reset(&mut self) {
        self.bricks = build_bricks(&self.grid, self.area);
        log::debug!("Level reset ({} bricks)", self.brick_count());
    }

    pub fn rows(&self) -> usize {
        self.grid.rows
    }

    pub fn columns(&self) -> usize {
        self.grid.columns
    }

    /// Number of grid cells (present or not)
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Brick at a cell, `None` for empty cells or out-of-range indices
    pub fn brick(&self, index: usize) -> Option<&Brick> {
        self.bricks.get(index).and_then(Option::as_ref)
    }

    pub fn brick_mut(&mut self, index: usize) -> Option<&mut Brick> {
        self.bricks.get_mut(index).and_then(Option::as_mut)
    }

    /// Brick at (row, column)
    pub fn brick_at(&self, row: usize, column: usize) -> Option<&Brick> {
        if row >= self.grid.rows || column >= self.grid.columns {
            return None;
        }
        self.brick(row * self.grid.columns + column)
    }

    /// Present bricks, including destroyed ones
    pub fn brick_count(&self) -> usize {
        self.bricks.iter().flatten().count()
    }

    /// Bricks that should be drawn: present and not destroyed
    pub fn visible_bricks(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (i, b)))
            .filter(|(_, b)| !b.destroyed)
    }

    /// True when no breakable brick is left standing
    pub fn is_completed(&self) -> bool {
        self.bricks
            .iter()
            .flatten()
            .all(|b| b.destroyed || b.solid)
    }
}

fn read_grid(path: &Path) -> Result<TileGrid, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    TileGrid::parse(&text)
}

fn build_bricks(grid: &TileGrid, area: Vec2) -> Vec<Option<Brick>> {
    let unit = Vec2::new(
        area.x / grid.columns as f32,
        area.y / grid.rows as f32,
    );

    grid.tiles
        .iter()
        .enumerate()
        .map(|(index, &code)| {
            let row = index / grid.columns;
            let column = index % grid.columns;
            let pos = Vec2::new(column as f32 * unit.x, row as f32 * unit.y);
            match code {
                0 => None,
                1 => Some(Brick::new(pos, unit).with_solid(true)),
                code => Some(Brick::new(pos, unit).with_color(tile_color(code))),
            }
        })
        .collect()
}
