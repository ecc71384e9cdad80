//! Rail module - the ordered waypoint route built from placed pieces
//!
//! A [`RailPath`] is the concatenation, in placement order, of every placed
//! piece's world-space rail segment. It is rebuilt from the board arena after
//! each commit rather than patched, so its length always equals the sum of the
//! segment lengths.
//!
//! The remaining queries (nearest waypoint, segment connectivity, thinning) are
//! read-only helpers for debug views and tooling; none of them mutate the live
//! path.

use serde::Serialize;

use crate::board::PlacedPiece;
use crate::types::{
    PieceId, Waypoint, CONNECT_DISTANCE, MIN_WAYPOINT_SPACING, NEAREST_WAYPOINT_DISTANCE,
};

/// Ordered waypoint route the train follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RailPath {
    waypoints: Vec<Waypoint>,
}

impl RailPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from the given pieces, in slice order.
    pub fn from_placed(placed: &[PlacedPiece]) -> Self {
        let mut path = Self::new();
        path.rebuild(placed);
        path
    }

    /// Wrap an explicit waypoint list (tooling and tests).
    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    /// Replace the route with the concatenated segments of `placed`.
    ///
    /// Reuses the existing allocation.
    pub fn rebuild(&mut self, placed: &[PlacedPiece]) {
        self.waypoints.clear();
        for piece in placed {
            self.waypoints.extend(piece.segment.iter().copied());
        }
        log::debug!(
            "rail path rebuilt: {} pieces, {} waypoints",
            placed.len(),
            self.waypoints.len()
        );
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// A route needs at least two waypoints to be travelled.
    pub fn is_valid(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    /// Closest waypoint strictly within `max_distance` of (x, y).
    ///
    /// Ties keep the earliest waypoint in route order.
    pub fn nearest_waypoint(&self, x: f32, y: f32, max_distance: f32) -> Option<Waypoint> {
        let mut best: Option<(f32, Waypoint)> = None;
        for wp in &self.waypoints {
            let d = wp.distance_to(x, y);
            if d >= max_distance {
                continue;
            }
            match best {
                Some((best_d, _)) if best_d <= d => {}
                _ => best = Some((d, *wp)),
            }
        }
        best.map(|(_, wp)| wp)
    }

    /// [`nearest_waypoint`](Self::nearest_waypoint) with the default 50px radius.
    pub fn nearest_waypoint_default(&self, x: f32, y: f32) -> Option<Waypoint> {
        self.nearest_waypoint(x, y, NEAREST_WAYPOINT_DISTANCE)
    }

    /// Copy of the route with waypoints closer than `min_spacing` to the last
    /// kept one removed. The first waypoint is always kept.
    pub fn optimized(&self, min_spacing: f32) -> RailPath {
        let mut waypoints: Vec<Waypoint> = Vec::with_capacity(self.waypoints.len());
        for wp in &self.waypoints {
            match waypoints.last() {
                Some(prev) if prev.distance_to(wp.x, wp.y) < min_spacing => {}
                _ => waypoints.push(*wp),
            }
        }
        RailPath { waypoints }
    }

    /// [`optimized`](Self::optimized) with the default 5px spacing.
    pub fn optimized_default(&self) -> RailPath {
        self.optimized(MIN_WAYPOINT_SPACING)
    }
}

/// True if any waypoint of `a` lies within `max_distance` of any waypoint of `b`.
pub fn segments_connect(a: &PlacedPiece, b: &PlacedPiece, max_distance: f32) -> bool {
    a.segment.iter().any(|pa| {
        b.segment
            .iter()
            .any(|pb| pa.distance_to(pb.x, pb.y) <= max_distance)
    })
}

/// All pairs `(i, j)` with `i < j` whose segments connect at the default
/// distance of one and a half blocks.
pub fn connected_pairs(placed: &[PlacedPiece]) -> Vec<(PieceId, PieceId)> {
    let mut pairs = Vec::new();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            if segments_connect(a, b, CONNECT_DISTANCE) {
                pairs.push((a.id, b.id));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::world_segment;
    use crate::types::{Direction, PieceKind, Rotation};

    fn placed(id: PieceId, kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> PlacedPiece {
        PlacedPiece {
            id,
            kind,
            rotation,
            x,
            y,
            segment: world_segment(kind, rotation, x, y),
        }
    }

    #[test]
    fn rebuild_concatenates_in_placement_order() {
        let pieces = [
            placed(0, PieceKind::I, Rotation::North, 0, 17),
            placed(1, PieceKind::O, Rotation::North, 0, 15),
        ];
        let path = RailPath::from_placed(&pieces);
        assert_eq!(path.len(), 6);
        assert_eq!(path.get(0), Some(&pieces[0].segment[0]));
        assert_eq!(path.get(2), Some(&pieces[1].segment[0]));
        assert!(path.is_valid());
    }

    #[test]
    fn rebuild_replaces_previous_route() {
        let mut path = RailPath::from_placed(&[placed(0, PieceKind::O, Rotation::North, 0, 0)]);
        path.rebuild(&[]);
        assert!(path.is_empty());
        assert!(!path.is_valid());
    }

    #[test]
    fn nearest_waypoint_tie_keeps_route_order() {
        let path = RailPath {
            waypoints: vec![
                Waypoint::new(0.0, 0.0, Direction::East),
                Waypoint::new(10.0, 0.0, Direction::South),
            ],
        };
        let hit = path.nearest_waypoint(5.0, 0.0, 50.0).expect("in range");
        assert_eq!(hit.direction, Direction::East);
        assert_eq!(hit.x, 0.0);
    }

    #[test]
    fn optimized_drops_close_neighbours_only() {
        let path = RailPath {
            waypoints: vec![
                Waypoint::new(0.0, 0.0, Direction::East),
                Waypoint::new(3.0, 0.0, Direction::East),
                Waypoint::new(10.0, 0.0, Direction::East),
            ],
        };
        let thin = path.optimized_default();
        assert_eq!(thin.len(), 2);
        assert_eq!(thin.waypoints()[1].x, 10.0);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn stacked_pieces_connect_and_distant_ones_do_not() {
        let bottom = placed(0, PieceKind::I, Rotation::North, 0, 17);
        let above = placed(1, PieceKind::I, Rotation::North, 0, 16);
        let far = placed(2, PieceKind::O, Rotation::North, 8, 0);

        assert!(segments_connect(&bottom, &above, CONNECT_DISTANCE));
        assert!(!segments_connect(&bottom, &far, CONNECT_DISTANCE));
        assert_eq!(connected_pairs(&[bottom, above, far]), vec![(0, 1)]);
    }
}
