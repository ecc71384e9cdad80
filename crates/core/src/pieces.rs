//! Pieces module - the static piece catalog
//!
//! For every kind and rotation this supplies the four cell offsets and the rail
//! template the piece contributes once placed. Rail templates are written out
//! per rotation. The J and L corners and the reversed S/Z doglegs are not
//! rotations of one another, so nothing here is derived by rotating a base
//! pattern.
//!
//! Cell offsets are `(dx, dy)` from the anchor cell. Template points are in
//! block units measured from the anchor cell's top-left corner, so `(0.5, 0.5)`
//! is the centre of the anchor cell.

use arrayvec::ArrayVec;

use crate::types::{
    Direction, PieceKind, Rotation, Waypoint, BLOCK_SIZE, GRID_OFFSET_X, GRID_OFFSET_Y,
};

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the anchor
pub type PieceShape = [MinoOffset; 4];

/// Longest rail template in the catalog.
pub const MAX_SEGMENT_LEN: usize = 4;

/// World-space rail segment of one piece.
pub type RailSegment = ArrayVec<Waypoint, MAX_SEGMENT_LEN>;

/// One template waypoint in block units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailPoint {
    pub dx: f32,
    pub dy: f32,
    pub direction: Direction,
}

const fn p(dx: f32, dy: f32, direction: Direction) -> RailPoint {
    RailPoint { dx, dy, direction }
}

use crate::types::Direction::{East as E, Junction as X, North as N, South as S, West as W};

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => get_i_shape(rotation),
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::T => get_t_shape(rotation),
        PieceKind::S => get_s_shape(rotation),
        PieceKind::Z => get_z_shape(rotation),
        PieceKind::J => get_j_shape(rotation),
        PieceKind::L => get_l_shape(rotation),
    }
}

/// I piece: horizontal on even rotations, vertical on odd
fn get_i_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (1, 0), (2, 0), (3, 0)],
        Rotation::East | Rotation::West => [(0, 0), (0, 1), (0, 2), (0, 3)],
    }
}

fn get_t_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
        Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
    }
}

/// S piece: two footprints, repeated for South/West
fn get_s_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(1, 0), (2, 0), (0, 1), (1, 1)],
        Rotation::East | Rotation::West => [(1, 0), (1, 1), (2, 1), (2, 2)],
    }
}

/// Z piece: two footprints, repeated for South/West
fn get_z_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North | Rotation::South => [(0, 0), (1, 0), (1, 1), (2, 1)],
        Rotation::East | Rotation::West => [(2, 0), (1, 1), (2, 1), (1, 2)],
    }
}

fn get_j_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
    }
}

fn get_l_shape(rotation: Rotation) -> PieceShape {
    match rotation {
        Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
        Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
        Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
    }
}

// Straight track spans the full length of the bar, edge to edge.
const I_HORIZONTAL: [RailPoint; 2] = [p(0.0, 0.5, E), p(4.0, 0.5, E)];
const I_VERTICAL: [RailPoint; 2] = [p(0.5, 0.0, S), p(0.5, 4.0, S)];

// Square loop through the four cell centres, clockwise.
const O_LOOP: [RailPoint; 4] = [
    p(0.5, 0.5, E),
    p(1.5, 0.5, S),
    p(1.5, 1.5, W),
    p(0.5, 1.5, N),
];

// Junction star on the grid corner of the hub cell: short half-block stem,
// full-block arms. Points are listed top, left, right, bottom.
const T_NORTH: [RailPoint; 4] = [p(1.0, 0.5, X), p(0.0, 1.0, X), p(2.0, 1.0, X), p(1.0, 1.5, X)];
const T_EAST: [RailPoint; 4] = [p(2.0, 0.0, X), p(1.5, 1.0, X), p(2.5, 1.0, X), p(2.0, 2.0, X)];
const T_SOUTH: [RailPoint; 4] = [p(2.0, 1.5, X), p(1.0, 2.0, X), p(3.0, 2.0, X), p(2.0, 2.5, X)];
const T_WEST: [RailPoint; 4] = [p(1.0, 0.0, X), p(0.5, 2.0, X), p(1.5, 2.0, X), p(1.0, 3.0, X)];

const S_NORTH: [RailPoint; 4] = [p(0.5, 1.5, E), p(1.5, 1.5, N), p(1.5, 0.5, E), p(2.5, 0.5, E)];
const S_EAST: [RailPoint; 4] = [p(1.5, 0.5, S), p(1.5, 1.5, E), p(2.5, 1.5, S), p(2.5, 2.5, S)];
const S_SOUTH: [RailPoint; 4] = [p(2.5, 0.5, W), p(1.5, 0.5, S), p(1.5, 1.5, W), p(0.5, 1.5, W)];
const S_WEST: [RailPoint; 4] = [p(2.5, 2.5, N), p(2.5, 1.5, W), p(1.5, 1.5, N), p(1.5, 0.5, N)];

const Z_NORTH: [RailPoint; 4] = [p(0.5, 0.5, E), p(1.5, 0.5, S), p(1.5, 1.5, E), p(2.5, 1.5, E)];
const Z_EAST: [RailPoint; 4] = [p(2.5, 0.5, S), p(2.5, 1.5, W), p(1.5, 1.5, S), p(1.5, 2.5, S)];
const Z_SOUTH: [RailPoint; 4] = [p(2.5, 1.5, W), p(1.5, 1.5, N), p(1.5, 0.5, W), p(0.5, 0.5, W)];
const Z_WEST: [RailPoint; 4] = [p(1.5, 2.5, N), p(1.5, 1.5, E), p(2.5, 1.5, N), p(2.5, 0.5, N)];

// Corners run along cell edges; West is shared by J and L.
const J_NORTH: [RailPoint; 3] = [p(0.5, 0.0, S), p(0.5, 1.0, E), p(2.5, 1.0, E)];
const J_EAST: [RailPoint; 3] = [p(1.0, 0.5, E), p(2.0, 0.5, S), p(2.0, 2.5, S)];
const J_SOUTH: [RailPoint; 3] = [p(0.0, 1.0, E), p(2.0, 1.0, S), p(2.0, 2.0, S)];
const J_WEST: [RailPoint; 3] = [p(0.0, 0.0, E), p(1.0, 0.0, S), p(1.0, 2.0, S)];

const L_NORTH: [RailPoint; 3] = [p(2.5, 0.0, S), p(2.5, 1.0, W), p(0.0, 1.0, W)];
const L_EAST: [RailPoint; 3] = [p(1.0, 0.5, S), p(1.0, 2.0, E), p(2.0, 2.0, E)];
const L_SOUTH: [RailPoint; 3] = [p(0.0, 1.0, E), p(2.0, 1.0, N), p(2.0, 2.0, N)];
const L_WEST: [RailPoint; 3] = J_WEST;

/// Get the rail template (block units, anchor-relative) for a kind and rotation
pub fn rail_template(kind: PieceKind, rotation: Rotation) -> &'static [RailPoint] {
    use Rotation::{East as RE, North as RN, South as RS, West as RW};
    match (kind, rotation) {
        (PieceKind::I, RN | RS) => &I_HORIZONTAL,
        (PieceKind::I, RE | RW) => &I_VERTICAL,
        (PieceKind::O, _) => &O_LOOP,
        (PieceKind::T, RN) => &T_NORTH,
        (PieceKind::T, RE) => &T_EAST,
        (PieceKind::T, RS) => &T_SOUTH,
        (PieceKind::T, RW) => &T_WEST,
        (PieceKind::S, RN) => &S_NORTH,
        (PieceKind::S, RE) => &S_EAST,
        (PieceKind::S, RS) => &S_SOUTH,
        (PieceKind::S, RW) => &S_WEST,
        (PieceKind::Z, RN) => &Z_NORTH,
        (PieceKind::Z, RE) => &Z_EAST,
        (PieceKind::Z, RS) => &Z_SOUTH,
        (PieceKind::Z, RW) => &Z_WEST,
        (PieceKind::J, RN) => &J_NORTH,
        (PieceKind::J, RE) => &J_EAST,
        (PieceKind::J, RS) => &J_SOUTH,
        (PieceKind::J, RW) => &J_WEST,
        (PieceKind::L, RN) => &L_NORTH,
        (PieceKind::L, RE) => &L_EAST,
        (PieceKind::L, RS) => &L_SOUTH,
        (PieceKind::L, RW) => &L_WEST,
    }
}

/// World pixel position of a cell's top-left corner.
pub fn cell_origin(x: i8, y: i8) -> (f32, f32) {
    (
        GRID_OFFSET_X + x as f32 * BLOCK_SIZE,
        GRID_OFFSET_Y + y as f32 * BLOCK_SIZE,
    )
}

/// Translate a kind/rotation template to world space for an anchor cell.
pub fn world_segment(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> RailSegment {
    let (ox, oy) = cell_origin(x, y);
    rail_template(kind, rotation)
        .iter()
        .map(|pt| Waypoint::new(ox + pt.dx * BLOCK_SIZE, oy + pt.dy * BLOCK_SIZE, pt.direction))
        .collect()
}

/// Spawn anchor for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (crate::types::SPAWN_X, crate::types::SPAWN_Y);

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    #[test]
    fn every_rotation_covers_four_distinct_cells() {
        for kind in PieceKind::ALL {
            for rot in ROTATIONS {
                let shape = get_shape(kind, rot);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(shape[i], shape[j], "{:?} {:?} repeats a cell", kind, rot);
                    }
                }
            }
        }
    }

    #[test]
    fn templates_fit_segment_capacity() {
        for kind in PieceKind::ALL {
            for rot in ROTATIONS {
                let t = rail_template(kind, rot);
                assert!(t.len() >= 2 && t.len() <= MAX_SEGMENT_LEN);
            }
        }
    }

    #[test]
    fn world_segment_translates_by_anchor() {
        let seg = world_segment(PieceKind::I, Rotation::North, 4, 0);
        assert_eq!(seg.len(), 2);
        assert_eq!(seg[0], Waypoint::new(157.5, 95.0, Direction::East));
        assert_eq!(seg[1], Waypoint::new(277.5, 95.0, Direction::East));
    }

    #[test]
    fn cell_origin_matches_grid_offsets() {
        assert_eq!(cell_origin(0, 0), (GRID_OFFSET_X, GRID_OFFSET_Y));
        assert_eq!(cell_origin(1, 2), (GRID_OFFSET_X + 30.0, GRID_OFFSET_Y + 60.0));
    }
}
