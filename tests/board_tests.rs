//! Board module tests - collision rules and the placement arena

use tetris_train::core::{Board, Tetromino};
use tetris_train::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn piece(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Tetromino {
    Tetromino {
        kind,
        rotation,
        x,
        y,
    }
}

#[test]
fn test_board_dimensions() {
    let board = Board::new();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 18);
    assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_out_of_bounds_queries() {
    let board = Board::new();
    assert!(board.is_out_of_bounds(-1, 0));
    assert!(board.is_out_of_bounds(10, 0));
    assert!(board.is_out_of_bounds(0, 18));
    assert!(board.is_out_of_bounds(0, -1));
    assert!(!board.is_out_of_bounds(9, 17));
    assert_eq!(board.get(0, 18), None);
    assert!(!board.is_occupied(-1, -1));
}

#[test]
fn test_collision_with_walls_and_floor() {
    let board = Board::new();
    let bar = piece(PieceKind::I, Rotation::North, 0, 5);

    assert!(board.test_collision(&bar, -1, 0));
    assert!(!board.test_collision(&bar, 6, 0));
    assert!(board.test_collision(&bar, 7, 0));
    assert!(!board.test_collision(&bar, 0, 12));
    assert!(board.test_collision(&bar, 0, 13));
}

#[test]
fn test_rows_above_the_board_never_collide() {
    let mut board = Board::new();
    let floor = piece(PieceKind::I, Rotation::North, 0, 0);
    assert!(board.place(&floor).is_some());

    // A vertical bar hanging above row 0 only collides once it reaches it.
    let hanging = piece(PieceKind::I, Rotation::East, 0, -4);
    assert!(!board.test_collision(&hanging, 0, 0));
    assert!(board.test_collision(&hanging, 0, 1));
}

#[test]
fn test_collision_with_placed_pieces() {
    let mut board = Board::new();
    board.place(&piece(PieceKind::O, Rotation::North, 4, 16));

    let falling = piece(PieceKind::O, Rotation::North, 4, 13);
    assert!(!board.test_collision(&falling, 0, 1));
    assert!(board.test_collision(&falling, 0, 2));
    assert!(!board.test_collision(&falling, 2, 2));
}

#[test]
fn test_place_rejects_off_grid_pieces() {
    let mut board = Board::new();
    assert_eq!(board.place(&piece(PieceKind::I, Rotation::North, 7, 0)), None);
    assert_eq!(board.place(&piece(PieceKind::I, Rotation::East, 0, -1)), None);
    assert!(board.placed().is_empty());
    assert_eq!(board.occupied_count(), 0);
}

#[test]
fn test_placed_piece_records_world_segment() {
    let mut board = Board::new();
    let id = board
        .place(&piece(PieceKind::J, Rotation::East, 2, 10))
        .expect("placement");
    let placed = board.piece(id).expect("placed piece");

    assert_eq!(placed.kind, PieceKind::J);
    assert_eq!(placed.rotation, Rotation::East);
    assert_eq!((placed.x, placed.y), (2, 10));
    assert_eq!(placed.segment.len(), 3);
    assert_eq!(board.footprint_cells(id), Some(placed.cells()));
}

#[test]
fn test_occupancy_equals_union_of_footprints() {
    let mut board = Board::new();
    let pieces = [
        piece(PieceKind::I, Rotation::North, 0, 17),
        piece(PieceKind::O, Rotation::North, 4, 16),
        piece(PieceKind::T, Rotation::South, 6, 15),
        piece(PieceKind::L, Rotation::West, 0, 14),
    ];
    for p in &pieces {
        assert!(board.place(p).is_some(), "{:?}", p);
    }

    assert_eq!(board.occupied_count(), 16);
    for placed in board.placed() {
        for (x, y) in placed.cells() {
            assert_eq!(board.occupant(x, y), Some(placed.id));
        }
    }
}

#[test]
fn test_clear_empties_grid_and_arena() {
    let mut board = Board::new();
    board.place(&piece(PieceKind::S, Rotation::North, 3, 10));
    board.clear();
    assert_eq!(board.occupied_count(), 0);
    assert!(board.placed().is_empty());
    assert_eq!(board, Board::default());
}
