use serde::{Deserialize, Serialize};

use waterline_core::geom::Rect;

use crate::error::LevelError;

/// Tile edge length in logical units.
pub const TILE_SIZE: f32 = 32.0;

pub const TILE_EMPTY: u8 = 0;
pub const TILE_SOLID: u8 = 1;
pub const TILE_COLLECTIBLE: u8 = 12;

fn is_known_code(code: u8) -> bool {
    matches!(code, TILE_EMPTY | TILE_SOLID | TILE_COLLECTIBLE)
}

/// Immutable, validated level layout. Sessions never play on a template
/// directly; [`LevelTemplate::instantiate`] hands out a fresh copy so
/// in-session mutation cannot corrupt the source for later resets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTemplate {
    cols: usize,
    cells: Vec<u8>,
}

impl LevelTemplate {
    /// Validate a row-major grid (rows top to bottom, columns left to
    /// right). Fails on an empty grid, ragged rows, or unknown codes.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, LevelError> {
        let Some(first) = rows.first() else {
            return Err(LevelError::EmptyGrid);
        };
        let cols = first.len();
        if cols == 0 {
            return Err(LevelError::EmptyGrid);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(LevelError::RaggedRow {
                    row: row_idx,
                    expected: cols,
                    got: row.len(),
                });
            }
            for (col_idx, &code) in row.iter().enumerate() {
                if !is_known_code(code) {
                    return Err(LevelError::UnknownCode {
                        row: row_idx,
                        col: col_idx,
                        code,
                    });
                }
                cells.push(code);
            }
        }
        Ok(Self { cols, cells })
    }

    /// Parse the JSON wire format: an array of equal-length rows of
    /// small integers.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let rows: Vec<Vec<u8>> =
            serde_json::from_str(text).map_err(|e| LevelError::Parse(e.to_string()))?;
        Self::from_rows(&rows)
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Fresh mutable copy for one play-through.
    pub fn instantiate(&self) -> TileLevel {
        TileLevel {
            cols: self.cols,
            cells: self.cells.clone(),
        }
    }
}

/// Mutable per-session tile grid. Cell values change only when a
/// collectible is picked up (the cell is zeroed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileLevel {
    cols: usize,
    cells: Vec<u8>,
}

impl TileLevel {
    /// Cell code at `(row, col)`; out-of-bounds reads are empty.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        if col >= self.cols || row >= self.rows() {
            return TILE_EMPTY;
        }
        self.cells[row * self.cols + col]
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) {
        if col < self.cols && row < self.rows() {
            self.cells[row * self.cols + col] = TILE_EMPTY;
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn pixel_width(&self) -> f32 {
        self.cols as f32 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f32 {
        self.rows() as f32 * TILE_SIZE
    }

    /// Single full scan; called once per fresh copy to fix the win
    /// threshold, never recomputed incrementally.
    pub fn count_collectibles(&self) -> u32 {
        self.cells
            .iter()
            .filter(|&&c| c == TILE_COLLECTIBLE)
            .count() as u32
    }

    /// World-space square covered by the cell at `(row, col)`.
    pub fn tile_box(row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * TILE_SIZE,
            row as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        )
    }
}

/// Ordered list of level templates for one play-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSet {
    templates: Vec<LevelTemplate>,
}

impl LevelSet {
    pub fn new(templates: Vec<LevelTemplate>) -> Result<Self, LevelError> {
        if templates.is_empty() {
            return Err(LevelError::EmptySet);
        }
        Ok(Self { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn template(&self, index: usize) -> Option<&LevelTemplate> {
        self.templates.get(index)
    }

    /// The opening level; `LevelSet::new` guarantees at least one.
    pub fn first(&self) -> &LevelTemplate {
        &self.templates[0]
    }
}
