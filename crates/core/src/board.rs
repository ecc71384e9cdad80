//! Board module - occupancy grid and placement arena
//!
//! The board is a 10x18 grid. Each cell is either empty or holds the id of the
//! placed piece covering it; ids index into an append-only arena of
//! [`PlacedPiece`]s kept in placement order. That order is what the rail path
//! follows, so pieces are never removed or reordered.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..17 (top to bottom).
//! Rows above the board (y < 0) are a spawn buffer: they never collide.

use serde::Serialize;

use crate::game_state::Tetromino;
use crate::pieces::{get_shape, world_segment, RailSegment};
use crate::types::{Cell, PieceId, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A committed piece. Immutable once appended to the arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPiece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Rail segment in world pixels, fixed at commit time.
    pub segment: RailSegment,
}

impl PlacedPiece {
    /// Absolute board cells covered by this piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        footprint(self.kind, self.rotation, self.x, self.y)
    }
}

/// Absolute cells of a kind/rotation anchored at (x, y).
pub fn footprint(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> [(i8, i8); 4] {
    get_shape(kind, rotation).map(|(dx, dy)| (x + dx, y + dy))
}

/// The game board - flat occupancy grid plus the placement arena
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    placed: Vec<PlacedPiece>,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            placed: Vec::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if position is outside the grid
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Id of the placed piece covering (x, y), if any.
    pub fn occupant(&self, x: i8, y: i8) -> Option<PieceId> {
        self.get(x, y).flatten()
    }

    /// Kind of the placed piece covering (x, y), if any.
    pub fn kind_at(&self, x: i8, y: i8) -> Option<PieceKind> {
        let id = self.occupant(x, y)?;
        self.placed.get(id).map(|p| p.kind)
    }

    /// Collision test for `piece` shifted by (dx, dy).
    ///
    /// A cell collides when it is left/right of the board, at or below the bottom
    /// row, or (for y >= 0 only) already occupied. Cells above the board pass.
    pub fn test_collision(&self, piece: &Tetromino, dx: i8, dy: i8) -> bool {
        piece.cells().iter().any(|&(cx, cy)| {
            let x = cx + dx;
            let y = cy + dy;
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && self.is_occupied(x, y)
        })
    }

    /// Commit a piece: mark its cells and append it to the arena.
    ///
    /// Returns `None` without touching the board if any cell is off the grid or
    /// already occupied.
    pub fn place(&mut self, piece: &Tetromino) -> Option<PieceId> {
        let cells = piece.cells();
        if cells
            .iter()
            .any(|&(x, y)| !matches!(self.get(x, y), Some(None)))
        {
            return None;
        }

        let id = self.placed.len();
        for &(x, y) in &cells {
            if let Some(idx) = Self::index(x, y) {
                self.cells[idx] = Some(id);
            }
        }

        self.placed.push(PlacedPiece {
            id,
            kind: piece.kind,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            segment: world_segment(piece.kind, piece.rotation, piece.x, piece.y),
        });
        Some(id)
    }

    /// All placed pieces, in placement order.
    pub fn placed(&self) -> &[PlacedPiece] {
        &self.placed
    }

    pub fn piece(&self, id: PieceId) -> Option<&PlacedPiece> {
        self.placed.get(id)
    }

    pub fn footprint_cells(&self, id: PieceId) -> Option<[(i8, i8); 4]> {
        self.placed.get(id).map(PlacedPiece::cells)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write kind codes (0 = empty) into a row-major grid.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = self
                    .kind_at(x as i8, y as i8)
                    .map(|k| k.code())
                    .unwrap_or(0);
            }
        }
    }

    /// Empty the grid and the arena
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
        self.placed.clear();
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 17), Some(179));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 18), None);
    }

    #[test]
    fn test_place_assigns_sequential_ids() {
        let mut board = Board::new();
        let a = Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 16,
        };
        let b = Tetromino { x: 2, ..a };

        assert_eq!(board.place(&a), Some(0));
        assert_eq!(board.place(&b), Some(1));
        assert_eq!(board.get(0, 16), Some(Some(0)));
        assert_eq!(board.get(3, 17), Some(Some(1)));
        assert_eq!(board.kind_at(3, 17), Some(PieceKind::O));
        assert_eq!(board.occupant(3, 17), Some(1));
        assert_eq!(board.occupant(4, 17), None);
        assert_eq!(board.footprint_cells(1), Some([(2, 16), (3, 16), (2, 17), (3, 17)]));
        assert_eq!(board.occupied_count(), 8);
    }

    #[test]
    fn test_place_rejects_overlap_without_side_effects() {
        let mut board = Board::new();
        let a = Tetromino {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 0,
            y: 16,
        };
        assert!(board.place(&a).is_some());
        let overlapping = Tetromino { x: 1, ..a };
        assert_eq!(board.place(&overlapping), None);
        assert_eq!(board.placed().len(), 1);
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_write_u8_grid_uses_kind_codes() {
        let mut board = Board::new();
        let t = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::North,
            x: 0,
            y: 16,
        };
        board.place(&t);

        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[16][1], PieceKind::T.code());
        assert_eq!(grid[17][0], PieceKind::T.code());
        assert_eq!(grid[16][0], 0);
    }
}
